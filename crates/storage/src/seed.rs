use chrono::NaiveDate;
use shared::domain::{Course, CourseOffering, CourseType, Registration, Student};

use crate::snapshot::Snapshot;

// Evaluated at compile time; an invalid date fails the build.
const SEED_REGISTRATION_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 4, 15) {
    Some(date) => date,
    None => panic!("seed registration date is not a calendar date"),
};

/// Fixture loaded at start-up so the front end has something to show.
pub fn seed_snapshot() -> Snapshot {
    Snapshot {
        course_types: vec![
            course_type("ct1", "Individual"),
            course_type("ct2", "Group"),
            course_type("ct3", "Special"),
        ],
        courses: vec![
            course("c1", "Hindi"),
            course("c2", "English"),
            course("c3", "Urdu"),
        ],
        course_offerings: vec![offering("co1", "c1", "ct1"), offering("co2", "c2", "ct2")],
        students: vec![
            student("s1", "John Doe", "john@example.com", "1234567890"),
            student("s2", "Jane Smith", "jane@example.com", "0987654321"),
        ],
        registrations: vec![Registration {
            id: "r1".into(),
            student_id: "s1".into(),
            course_offering_id: "co1".into(),
            registration_date: SEED_REGISTRATION_DATE,
        }],
    }
}

fn course_type(id: &str, name: &str) -> CourseType {
    CourseType {
        id: id.into(),
        name: name.to_string(),
    }
}

fn course(id: &str, name: &str) -> Course {
    Course {
        id: id.into(),
        name: name.to_string(),
    }
}

fn offering(id: &str, course_id: &str, course_type_id: &str) -> CourseOffering {
    CourseOffering {
        id: id.into(),
        course_id: course_id.into(),
        course_type_id: course_type_id.into(),
    }
}

fn student(id: &str, name: &str, email: &str, phone: &str) -> Student {
    Student {
        id: id.into(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    }
}
