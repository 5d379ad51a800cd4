//! Screens that sit in front of the store.
//!
//! Each module owns the input checks for one screen and only dispatches a
//! command once the input passed them. Deletes are two-step: a
//! [`DeleteRequest`] is handed back to the caller, and nothing happens until
//! it is passed to [`confirm_delete`].

use chrono::{NaiveDate, Utc};
use shared::{
    domain::{CourseId, CourseOfferingId, CourseTypeId, RegistrationId},
    error::ApiError,
    protocol::Command,
};
use storage::{Snapshot, Storage};
use tracing::info;

pub mod course_offerings;
pub mod course_types;
pub mod courses;
pub mod registrations;
mod validation;

pub use validation::is_valid_email;

/// Source of "today" for registration dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Everything a screen needs: the store it reads and writes, and a clock.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub storage: Storage,
    pub clock: Clock,
}

impl ViewContext {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.storage.snapshot()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DeleteTarget {
    CourseType(CourseTypeId),
    Course(CourseId),
    CourseOffering(CourseOfferingId),
    Registration(RegistrationId),
}

impl DeleteTarget {
    fn prompt(&self) -> &'static str {
        match self {
            DeleteTarget::CourseType(_) => "Are you sure you want to delete this course type?",
            DeleteTarget::Course(_) => "Are you sure you want to delete this course?",
            DeleteTarget::CourseOffering(_) => {
                "Are you sure you want to delete this course offering?"
            }
            DeleteTarget::Registration(_) => {
                "Are you sure you want to delete this registration?"
            }
        }
    }

    fn into_command(self) -> Command {
        match self {
            DeleteTarget::CourseType(id) => Command::DeleteCourseType(id),
            DeleteTarget::Course(id) => Command::DeleteCourse(id),
            DeleteTarget::CourseOffering(id) => Command::DeleteCourseOffering(id),
            DeleteTarget::Registration(id) => Command::DeleteRegistration(id),
        }
    }
}

/// A delete awaiting the user's answer. Dropping it cancels the delete.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "nothing is deleted until the request is passed to confirm_delete"]
pub struct DeleteRequest {
    target: DeleteTarget,
}

impl DeleteRequest {
    pub(crate) fn new(target: DeleteTarget) -> Self {
        Self { target }
    }

    /// Question to put to the user before confirming.
    pub fn prompt(&self) -> &'static str {
        self.target.prompt()
    }
}

/// Dispatches a delete the user agreed to.
///
/// Returns [`shared::error::ErrorCode::Blocked`] with the store's notice when
/// dependent rows still reference the target; the store is left unchanged.
pub fn confirm_delete(ctx: &mut ViewContext, request: DeleteRequest) -> Result<(), ApiError> {
    let command = request.target.into_command();
    let name = command.name();
    ctx.storage.dispatch(command)?;
    info!(command = name, "delete confirmed");
    Ok(())
}
