use serde::{Deserialize, Serialize};

use crate::domain::{
    Course, CourseId, CourseOffering, CourseOfferingId, CourseType, CourseTypeId, Registration,
    RegistrationId, Student,
};

/// A single mutation against the store.
///
/// The wire shape mirrors the reducer actions the front ends have always
/// produced: `{"type": "ADD_COURSE_TYPE", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    AddCourseType(CourseType),
    UpdateCourseType(CourseType),
    DeleteCourseType(CourseTypeId),
    AddCourse(Course),
    UpdateCourse(Course),
    DeleteCourse(CourseId),
    AddCourseOffering(CourseOffering),
    UpdateCourseOffering(CourseOffering),
    DeleteCourseOffering(CourseOfferingId),
    AddStudent(Student),
    AddRegistration(Registration),
    DeleteRegistration(RegistrationId),
}

impl Command {
    /// Stable snake_case name, used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddCourseType(_) => "add_course_type",
            Command::UpdateCourseType(_) => "update_course_type",
            Command::DeleteCourseType(_) => "delete_course_type",
            Command::AddCourse(_) => "add_course",
            Command::UpdateCourse(_) => "update_course",
            Command::DeleteCourse(_) => "delete_course",
            Command::AddCourseOffering(_) => "add_course_offering",
            Command::UpdateCourseOffering(_) => "update_course_offering",
            Command::DeleteCourseOffering(_) => "delete_course_offering",
            Command::AddStudent(_) => "add_student",
            Command::AddRegistration(_) => "add_registration",
            Command::DeleteRegistration(_) => "delete_registration",
        }
    }
}
