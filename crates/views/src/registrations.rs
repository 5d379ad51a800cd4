use std::{fmt, str::FromStr};

use shared::{
    domain::{
        CourseOfferingId, CourseTypeId, EntityKind, Registration, RegistrationId, Student,
        StudentId,
    },
    error::ApiError,
    protocol::Command,
};
use tracing::info;

use crate::{
    course_offerings::{self, OfferingRow},
    validation::{is_valid_email, require},
    DeleteRequest, DeleteTarget, ViewContext,
};

/// Course type filter on the registrations screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CourseTypeFilter {
    #[default]
    All,
    Only(CourseTypeId),
}

impl CourseTypeFilter {
    pub fn matches(&self, course_type_id: &CourseTypeId) -> bool {
        match self {
            CourseTypeFilter::All => true,
            CourseTypeFilter::Only(id) => id == course_type_id,
        }
    }
}

impl FromStr for CourseTypeFilter {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Ok(CourseTypeFilter::All)
        } else {
            Ok(CourseTypeFilter::Only(raw.into()))
        }
    }
}

impl fmt::Display for CourseTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseTypeFilter::All => f.write_str("all"),
            CourseTypeFilter::Only(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub student_name: String,
    pub student_email: String,
    pub student_phone: String,
    pub course_offering_id: Option<CourseOfferingId>,
}

/// A registration on an offering together with its student, if the student
/// row still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledStudent {
    pub registration: Registration,
    pub student: Option<Student>,
}

pub fn filtered_offerings(ctx: &ViewContext, filter: &CourseTypeFilter) -> Vec<OfferingRow> {
    let snapshot = ctx.snapshot();
    snapshot
        .course_offerings
        .iter()
        .filter(|offering| filter.matches(&offering.course_type_id))
        .map(|offering| course_offerings::row(snapshot, offering))
        .collect()
}

/// Registering is only offered while the filter leaves at least one offering.
pub fn can_register(ctx: &ViewContext, filter: &CourseTypeFilter) -> bool {
    ctx.snapshot()
        .course_offerings
        .iter()
        .any(|offering| filter.matches(&offering.course_type_id))
}

/// Empty form with the first offering under `filter` pre-selected.
pub fn default_form(ctx: &ViewContext, filter: &CourseTypeFilter) -> RegistrationForm {
    let course_offering_id = ctx
        .snapshot()
        .course_offerings
        .iter()
        .find(|offering| filter.matches(&offering.course_type_id))
        .map(|offering| offering.id.clone());
    RegistrationForm {
        course_offering_id,
        ..RegistrationForm::default()
    }
}

/// Creates a new student and registers them on the selected offering.
///
/// Both rows are written together: either the student and the registration
/// exist afterwards, or neither does.
pub fn register(ctx: &mut ViewContext, form: RegistrationForm) -> Result<Registration, ApiError> {
    let course_offering_id = validate(ctx, &form)?;

    let student_id: StudentId = ctx.storage.next_id(EntityKind::Student).into();
    let registration_id: RegistrationId = ctx.storage.next_id(EntityKind::Registration).into();
    let student = Student {
        id: student_id.clone(),
        name: form.student_name,
        email: form.student_email,
        phone: form.student_phone,
    };
    let registration = Registration {
        id: registration_id,
        student_id,
        course_offering_id,
        registration_date: ctx.clock.today(),
    };

    ctx.storage.dispatch_all(vec![
        Command::AddStudent(student),
        Command::AddRegistration(registration.clone()),
    ])?;
    info!(
        id = %registration.id,
        student = %registration.student_id,
        offering = %registration.course_offering_id,
        "student registered"
    );
    Ok(registration)
}

pub fn students_for_offering(ctx: &ViewContext, id: &CourseOfferingId) -> Vec<EnrolledStudent> {
    let snapshot = ctx.snapshot();
    snapshot
        .registrations
        .iter()
        .filter(|r| &r.course_offering_id == id)
        .map(|r| EnrolledStudent {
            registration: r.clone(),
            student: snapshot.student(&r.student_id).cloned(),
        })
        .collect()
}

pub fn request_delete(ctx: &ViewContext, id: &RegistrationId) -> Result<DeleteRequest, ApiError> {
    if ctx.snapshot().registration(id).is_none() {
        return Err(ApiError::not_found(format!("registration {id} not found")));
    }
    Ok(DeleteRequest::new(DeleteTarget::Registration(id.clone())))
}

fn validate(ctx: &ViewContext, form: &RegistrationForm) -> Result<CourseOfferingId, ApiError> {
    require(&form.student_name, "Student name is required")?;
    require(&form.student_email, "Student email is required")?;
    if !is_valid_email(&form.student_email) {
        return Err(ApiError::validation("Please enter a valid email address"));
    }
    require(&form.student_phone, "Student phone is required")?;
    form.course_offering_id
        .as_ref()
        .filter(|id| ctx.snapshot().course_offering(id).is_some())
        .cloned()
        .ok_or_else(|| ApiError::validation("Please select a course offering"))
}

#[cfg(test)]
#[path = "tests/registrations_tests.rs"]
mod tests;
