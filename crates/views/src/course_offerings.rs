use shared::{
    domain::{CourseId, CourseOffering, CourseOfferingId, CourseTypeId, EntityKind},
    error::ApiError,
    protocol::Command,
};
use storage::Snapshot;
use tracing::info;

use crate::{DeleteRequest, DeleteTarget, ViewContext};

const SELECTION_REQUIRED: &str = "Please select both a course and a course type";
const COMBINATION_TAKEN: &str = "This course offering combination already exists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingRow {
    pub offering: CourseOffering,
    /// "<course type> - <course>".
    pub display_name: String,
    pub registration_count: usize,
}

/// Selections made in the offering form. `None` means nothing picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferingForm {
    pub course_id: Option<CourseId>,
    pub course_type_id: Option<CourseTypeId>,
}

pub fn display_name(snapshot: &Snapshot, offering: &CourseOffering) -> String {
    let course_type = snapshot
        .course_type(&offering.course_type_id)
        .map_or("Unknown Type", |ct| ct.name.as_str());
    let course = snapshot
        .course(&offering.course_id)
        .map_or("Unknown Course", |c| c.name.as_str());
    format!("{course_type} - {course}")
}

pub(crate) fn row(snapshot: &Snapshot, offering: &CourseOffering) -> OfferingRow {
    OfferingRow {
        display_name: display_name(snapshot, offering),
        registration_count: snapshot.registrations_for_offering(&offering.id),
        offering: offering.clone(),
    }
}

pub fn list(ctx: &ViewContext) -> Vec<OfferingRow> {
    let snapshot = ctx.snapshot();
    snapshot
        .course_offerings
        .iter()
        .map(|offering| row(snapshot, offering))
        .collect()
}

/// Offerings can only be created once at least one course and one course
/// type exist.
pub fn is_available(ctx: &ViewContext) -> bool {
    let snapshot = ctx.snapshot();
    !snapshot.courses.is_empty() && !snapshot.course_types.is_empty()
}

/// Form pre-filled with the first course and the first course type.
pub fn default_form(ctx: &ViewContext) -> OfferingForm {
    let snapshot = ctx.snapshot();
    OfferingForm {
        course_id: snapshot.courses.first().map(|c| c.id.clone()),
        course_type_id: snapshot.course_types.first().map(|ct| ct.id.clone()),
    }
}

/// Form pre-filled from an existing offering, for editing.
pub fn edit_form(ctx: &ViewContext, id: &CourseOfferingId) -> Result<OfferingForm, ApiError> {
    let offering = ctx
        .snapshot()
        .course_offering(id)
        .ok_or_else(|| not_found(id))?;
    Ok(OfferingForm {
        course_id: Some(offering.course_id.clone()),
        course_type_id: Some(offering.course_type_id.clone()),
    })
}

pub fn add(ctx: &mut ViewContext, form: OfferingForm) -> Result<CourseOffering, ApiError> {
    let (course_id, course_type_id) = validate(ctx.snapshot(), form, None)?;
    let offering = CourseOffering {
        id: ctx.storage.next_id(EntityKind::CourseOffering).into(),
        course_id,
        course_type_id,
    };
    ctx.storage
        .dispatch(Command::AddCourseOffering(offering.clone()))?;
    info!(id = %offering.id, "course offering added");
    Ok(offering)
}

pub fn update(
    ctx: &mut ViewContext,
    id: &CourseOfferingId,
    form: OfferingForm,
) -> Result<CourseOffering, ApiError> {
    if ctx.snapshot().course_offering(id).is_none() {
        return Err(not_found(id));
    }
    let (course_id, course_type_id) = validate(ctx.snapshot(), form, Some(id))?;
    let offering = CourseOffering {
        id: id.clone(),
        course_id,
        course_type_id,
    };
    ctx.storage
        .dispatch(Command::UpdateCourseOffering(offering.clone()))?;
    info!(id = %offering.id, "course offering updated");
    Ok(offering)
}

pub fn request_delete(ctx: &ViewContext, id: &CourseOfferingId) -> Result<DeleteRequest, ApiError> {
    if ctx.snapshot().course_offering(id).is_none() {
        return Err(not_found(id));
    }
    Ok(DeleteRequest::new(DeleteTarget::CourseOffering(id.clone())))
}

fn validate(
    snapshot: &Snapshot,
    form: OfferingForm,
    editing: Option<&CourseOfferingId>,
) -> Result<(CourseId, CourseTypeId), ApiError> {
    let (Some(course_id), Some(course_type_id)) = (form.course_id, form.course_type_id) else {
        return Err(ApiError::validation(SELECTION_REQUIRED));
    };
    if snapshot.course(&course_id).is_none() || snapshot.course_type(&course_type_id).is_none() {
        return Err(ApiError::validation(SELECTION_REQUIRED));
    }
    let taken = snapshot.course_offerings.iter().any(|co| {
        Some(&co.id) != editing && co.course_id == course_id && co.course_type_id == course_type_id
    });
    if taken {
        return Err(ApiError::validation(COMBINATION_TAKEN));
    }
    Ok((course_id, course_type_id))
}

fn not_found(id: &CourseOfferingId) -> ApiError {
    ApiError::not_found(format!("course offering {id} not found"))
}

#[cfg(test)]
#[path = "tests/course_offerings_tests.rs"]
mod tests;
