use shared::{
    domain::{CourseType, CourseTypeId, EntityKind},
    error::ApiError,
    protocol::Command,
};
use tracing::info;

use crate::{validation::check_name, DeleteRequest, DeleteTarget, ViewContext};

const NAME_REQUIRED: &str = "Course type name is required";
const NAME_TAKEN: &str = "A course type with this name already exists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTypeRow {
    pub course_type: CourseType,
    /// Offerings that use this type ("Used in N course offerings").
    pub offering_count: usize,
}

pub fn list(ctx: &ViewContext) -> Vec<CourseTypeRow> {
    let snapshot = ctx.snapshot();
    snapshot
        .course_types
        .iter()
        .map(|course_type| CourseTypeRow {
            offering_count: snapshot.offerings_using_course_type(&course_type.id),
            course_type: course_type.clone(),
        })
        .collect()
}

pub fn add(ctx: &mut ViewContext, name: &str) -> Result<CourseType, ApiError> {
    validate(ctx, name, None)?;
    let course_type = CourseType {
        id: ctx.storage.next_id(EntityKind::CourseType).into(),
        name: name.to_string(),
    };
    ctx.storage
        .dispatch(Command::AddCourseType(course_type.clone()))?;
    info!(id = %course_type.id, "course type added");
    Ok(course_type)
}

pub fn update(ctx: &mut ViewContext, id: &CourseTypeId, name: &str) -> Result<CourseType, ApiError> {
    if ctx.snapshot().course_type(id).is_none() {
        return Err(not_found(id));
    }
    validate(ctx, name, Some(id))?;
    let course_type = CourseType {
        id: id.clone(),
        name: name.to_string(),
    };
    ctx.storage
        .dispatch(Command::UpdateCourseType(course_type.clone()))?;
    info!(id = %course_type.id, "course type renamed");
    Ok(course_type)
}

pub fn request_delete(ctx: &ViewContext, id: &CourseTypeId) -> Result<DeleteRequest, ApiError> {
    if ctx.snapshot().course_type(id).is_none() {
        return Err(not_found(id));
    }
    Ok(DeleteRequest::new(DeleteTarget::CourseType(id.clone())))
}

fn validate(ctx: &ViewContext, name: &str, editing: Option<&CourseTypeId>) -> Result<(), ApiError> {
    let existing = ctx
        .snapshot()
        .course_types
        .iter()
        .map(|ct| (ct.id.as_str(), ct.name.as_str()));
    check_name(
        name,
        existing,
        editing.map(CourseTypeId::as_str),
        NAME_REQUIRED,
        NAME_TAKEN,
    )
}

fn not_found(id: &CourseTypeId) -> ApiError {
    ApiError::not_found(format!("course type {id} not found"))
}
