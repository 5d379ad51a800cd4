use shared::{
    domain::{Course, CourseId, EntityKind},
    error::ApiError,
    protocol::Command,
};
use tracing::info;

use crate::{validation::check_name, DeleteRequest, DeleteTarget, ViewContext};

const NAME_REQUIRED: &str = "Course name is required";
const NAME_TAKEN: &str = "A course with this name already exists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    pub course: Course,
    pub offering_count: usize,
}

pub fn list(ctx: &ViewContext) -> Vec<CourseRow> {
    let snapshot = ctx.snapshot();
    snapshot
        .courses
        .iter()
        .map(|course| CourseRow {
            offering_count: snapshot.offerings_using_course(&course.id),
            course: course.clone(),
        })
        .collect()
}

pub fn add(ctx: &mut ViewContext, name: &str) -> Result<Course, ApiError> {
    validate(ctx, name, None)?;
    let course = Course {
        id: ctx.storage.next_id(EntityKind::Course).into(),
        name: name.to_string(),
    };
    ctx.storage.dispatch(Command::AddCourse(course.clone()))?;
    info!(id = %course.id, "course added");
    Ok(course)
}

pub fn update(ctx: &mut ViewContext, id: &CourseId, name: &str) -> Result<Course, ApiError> {
    if ctx.snapshot().course(id).is_none() {
        return Err(not_found(id));
    }
    validate(ctx, name, Some(id))?;
    let course = Course {
        id: id.clone(),
        name: name.to_string(),
    };
    ctx.storage.dispatch(Command::UpdateCourse(course.clone()))?;
    info!(id = %course.id, "course renamed");
    Ok(course)
}

pub fn request_delete(ctx: &ViewContext, id: &CourseId) -> Result<DeleteRequest, ApiError> {
    if ctx.snapshot().course(id).is_none() {
        return Err(not_found(id));
    }
    Ok(DeleteRequest::new(DeleteTarget::Course(id.clone())))
}

fn validate(ctx: &ViewContext, name: &str, editing: Option<&CourseId>) -> Result<(), ApiError> {
    let existing = ctx
        .snapshot()
        .courses
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()));
    check_name(
        name,
        existing,
        editing.map(CourseId::as_str),
        NAME_REQUIRED,
        NAME_TAKEN,
    )
}

fn not_found(id: &CourseId) -> ApiError {
    ApiError::not_found(format!("course {id} not found"))
}
