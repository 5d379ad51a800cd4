use shared::error::ApiError;

/// Checks the `local@domain.tld` shape: exactly one `@`, no whitespace, a
/// non-empty local part and a dot in the domain with text on both sides.
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.chars().any(is_pattern_space) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Whitespace as ECMAScript's `\s` class sees it: Unicode `White_Space`
/// without NEL (U+0085), plus the byte order mark (U+FEFF).
fn is_pattern_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn is_blank(value: &str) -> bool {
    value.chars().all(is_pattern_space)
}

/// Name checks shared by the course type and course screens.
///
/// `existing` yields `(id, name)` of every row in the collection; the row
/// being edited, if any, is skipped when looking for duplicates.
pub(crate) fn check_name<'a, I>(
    name: &str,
    existing: I,
    editing: Option<&str>,
    required: &str,
    duplicate: &str,
) -> Result<(), ApiError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    if is_blank(name) {
        return Err(ApiError::validation(required));
    }
    let wanted = name.to_lowercase();
    let clash = existing
        .into_iter()
        .filter(|(id, _)| Some(*id) != editing)
        .any(|(_, other)| other.to_lowercase() == wanted);
    if clash {
        return Err(ApiError::validation(duplicate));
    }
    Ok(())
}

pub(crate) fn require(value: &str, message: &str) -> Result<(), ApiError> {
    if is_blank(value) {
        Err(ApiError::validation(message))
    } else {
        Ok(())
    }
}
