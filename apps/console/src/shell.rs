//! Line-oriented front end over the views.

use std::io::{BufRead, Lines, Write};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser, Subcommand};
use shared::error::{ApiError, ErrorCode};
use views::{
    confirm_delete,
    course_offerings::{self, OfferingForm},
    course_types, courses,
    registrations::{self, CourseTypeFilter, RegistrationForm},
    DeleteRequest, ViewContext,
};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "registrar", disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// List course types with their usage.
    Types,
    AddType {
        name: String,
    },
    RenameType {
        id: String,
        name: String,
    },
    DeleteType {
        id: String,
    },
    /// List courses with their usage.
    Courses,
    AddCourse {
        name: String,
    },
    RenameCourse {
        id: String,
        name: String,
    },
    DeleteCourse {
        id: String,
    },
    /// List course offerings with enrolment counts.
    Offerings,
    /// Add an offering; omitted selections default to the first course/type.
    AddOffering {
        #[arg(long)]
        course: Option<String>,
        #[arg(long = "type")]
        course_type: Option<String>,
    },
    /// Change an offering; omitted selections keep their current value.
    EditOffering {
        id: String,
        #[arg(long)]
        course: Option<String>,
        #[arg(long = "type")]
        course_type: Option<String>,
    },
    DeleteOffering {
        id: String,
    },
    /// Show offerings and registration counts, optionally for one course type.
    Registrations {
        #[arg(long = "type", default_value = "all")]
        filter: CourseTypeFilter,
    },
    /// Register a new student on an offering.
    Register {
        name: String,
        email: String,
        phone: String,
        #[arg(long)]
        offering: Option<String>,
        #[arg(long = "type", default_value = "all")]
        filter: CourseTypeFilter,
    },
    /// List students registered on an offering.
    Students {
        offering: String,
    },
    Unregister {
        id: String,
    },
    /// Print the whole store as JSON.
    Dump,
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a, R, W> {
    ctx: &'a mut ViewContext,
    lines: Lines<R>,
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ctx: &'a mut ViewContext, input: R, out: W) -> Self {
        Self {
            ctx,
            lines: input.lines(),
            out,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = self.lines.next() else {
                writeln!(self.out)?;
                return Ok(());
            };
            let line = line.context("failed to read command line")?;
            match self.handle_line(&line)? {
                Flow::Continue => {}
                Flow::Quit => return Ok(()),
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let words = match split_words(line) {
            Some(words) if words.is_empty() => return Ok(Flow::Continue),
            Some(words) => words,
            None => {
                writeln!(self.out, "error: invalid quoting")?;
                return Ok(Flow::Continue);
            }
        };
        let parsed = match Line::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(err) => {
                match err.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        write!(self.out, "{}", err.render())?;
                    }
                    _ => writeln!(self.out, "{}", err.render().to_string().trim_end())?,
                }
                return Ok(Flow::Continue);
            }
        };
        self.execute(parsed.command)
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Types => {
                for row in course_types::list(self.ctx) {
                    writeln!(
                        self.out,
                        "{:<10} {:<24} used in {} course offerings",
                        row.course_type.id, row.course_type.name, row.offering_count
                    )?;
                }
            }
            ShellCommand::AddType { name } => {
                let outcome = course_types::add(self.ctx, &name);
                self.report(outcome.map(|ct| format!("added course type {}", ct.id)))?;
            }
            ShellCommand::RenameType { id, name } => {
                let outcome = course_types::update(self.ctx, &id.into(), &name);
                self.report(outcome.map(|ct| format!("renamed course type {}", ct.id)))?;
            }
            ShellCommand::DeleteType { id } => {
                let request = course_types::request_delete(self.ctx, &id.into());
                self.delete(request)?;
            }
            ShellCommand::Courses => {
                for row in courses::list(self.ctx) {
                    writeln!(
                        self.out,
                        "{:<10} {:<24} used in {} course offerings",
                        row.course.id, row.course.name, row.offering_count
                    )?;
                }
            }
            ShellCommand::AddCourse { name } => {
                let outcome = courses::add(self.ctx, &name);
                self.report(outcome.map(|c| format!("added course {}", c.id)))?;
            }
            ShellCommand::RenameCourse { id, name } => {
                let outcome = courses::update(self.ctx, &id.into(), &name);
                self.report(outcome.map(|c| format!("renamed course {}", c.id)))?;
            }
            ShellCommand::DeleteCourse { id } => {
                let request = courses::request_delete(self.ctx, &id.into());
                self.delete(request)?;
            }
            ShellCommand::Offerings => {
                if !course_offerings::is_available(self.ctx) {
                    writeln!(
                        self.out,
                        "Add at least one course and one course type before creating offerings."
                    )?;
                }
                for row in course_offerings::list(self.ctx) {
                    writeln!(
                        self.out,
                        "{:<10} {:<32} {} students enrolled",
                        row.offering.id, row.display_name, row.registration_count
                    )?;
                }
            }
            ShellCommand::AddOffering {
                course,
                course_type,
            } => {
                if !course_offerings::is_available(self.ctx) {
                    writeln!(
                        self.out,
                        "! Add at least one course and one course type first"
                    )?;
                    return Ok(Flow::Continue);
                }
                let defaults = course_offerings::default_form(self.ctx);
                let form = OfferingForm {
                    course_id: course.map(Into::into).or(defaults.course_id),
                    course_type_id: course_type.map(Into::into).or(defaults.course_type_id),
                };
                let outcome = course_offerings::add(self.ctx, form);
                self.report(outcome.map(|co| format!("added course offering {}", co.id)))?;
            }
            ShellCommand::EditOffering {
                id,
                course,
                course_type,
            } => {
                let id = id.into();
                let outcome = course_offerings::edit_form(self.ctx, &id).and_then(|current| {
                    let form = OfferingForm {
                        course_id: course.map(Into::into).or(current.course_id),
                        course_type_id: course_type.map(Into::into).or(current.course_type_id),
                    };
                    course_offerings::update(self.ctx, &id, form)
                });
                self.report(outcome.map(|co| format!("updated course offering {}", co.id)))?;
            }
            ShellCommand::DeleteOffering { id } => {
                let request = course_offerings::request_delete(self.ctx, &id.into());
                self.delete(request)?;
            }
            ShellCommand::Registrations { filter } => {
                let rows = registrations::filtered_offerings(self.ctx, &filter);
                if rows.is_empty() {
                    writeln!(
                        self.out,
                        "No course offerings available for the selected filter."
                    )?;
                }
                for row in rows {
                    writeln!(
                        self.out,
                        "{:<10} {:<32} {} student(s) registered",
                        row.offering.id, row.display_name, row.registration_count
                    )?;
                }
            }
            ShellCommand::Register {
                name,
                email,
                phone,
                offering,
                filter,
            } => {
                if !registrations::can_register(self.ctx, &filter) {
                    writeln!(self.out, "! No course offerings available")?;
                    return Ok(Flow::Continue);
                }
                let defaults = registrations::default_form(self.ctx, &filter);
                let form = RegistrationForm {
                    student_name: name,
                    student_email: email,
                    student_phone: phone,
                    course_offering_id: offering.map(Into::into).or(defaults.course_offering_id),
                };
                let outcome = registrations::register(self.ctx, form);
                self.report(outcome.map(|r| {
                    format!(
                        "registered student {} as {} on {}",
                        r.student_id, r.id, r.course_offering_id
                    )
                }))?;
            }
            ShellCommand::Students { offering } => {
                let enrolled = registrations::students_for_offering(self.ctx, &offering.into());
                if enrolled.is_empty() {
                    writeln!(self.out, "No students registered for this course offering.")?;
                }
                for entry in enrolled {
                    let registration = &entry.registration;
                    match &entry.student {
                        Some(student) => writeln!(
                            self.out,
                            "{:<10} {:<20} {:<28} {:<14} registered {}",
                            registration.id,
                            student.name,
                            student.email,
                            student.phone,
                            registration.registration_date
                        )?,
                        None => writeln!(
                            self.out,
                            "{:<10} {:<20} registered {}",
                            registration.id, "Unknown Student", registration.registration_date
                        )?,
                    }
                }
            }
            ShellCommand::Unregister { id } => {
                let request = registrations::request_delete(self.ctx, &id.into());
                self.delete(request)?;
            }
            ShellCommand::Dump => {
                let json = serde_json::to_string_pretty(self.ctx.snapshot())
                    .context("failed to serialize snapshot")?;
                writeln!(self.out, "{json}")?;
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Puts the request's question to the user and confirms on "y"/"yes".
    fn delete(&mut self, request: Result<DeleteRequest, ApiError>) -> Result<()> {
        let request = match request {
            Ok(request) => request,
            Err(err) => return self.report(Err(err)),
        };
        write!(self.out, "{} [y/N] ", request.prompt())?;
        self.out.flush()?;
        let answer = match self.lines.next() {
            Some(line) => line.context("failed to read confirmation")?,
            None => String::new(),
        };
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            writeln!(self.out, "cancelled")?;
            return Ok(());
        }
        let outcome = confirm_delete(self.ctx, request);
        self.report(outcome.map(|()| "deleted".to_string()))
    }

    fn report(&mut self, outcome: Result<String, ApiError>) -> Result<()> {
        match outcome {
            Ok(message) => writeln!(self.out, "{message}")?,
            Err(err) => match err.code {
                ErrorCode::Validation => writeln!(self.out, "! {}", err.message)?,
                ErrorCode::Blocked => writeln!(self.out, "notice: {}", err.message)?,
                ErrorCode::NotFound => writeln!(self.out, "error: {}", err.message)?,
            },
        }
        Ok(())
    }
}

/// Splits a command line into words with POSIX shell quoting rules.
fn split_words(line: &str) -> Option<Vec<String>> {
    shlex::split(line)
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
