use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(CourseTypeId);
id_newtype!(CourseId);
id_newtype!(CourseOfferingId);
id_newtype!(StudentId);
id_newtype!(RegistrationId);

/// The five collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    CourseType,
    Course,
    CourseOffering,
    Student,
    Registration,
}

impl EntityKind {
    /// Prefix prepended to generated identifiers of this kind.
    pub fn id_prefix(self) -> &'static str {
        match self {
            EntityKind::CourseType => "ct",
            EntityKind::Course => "c",
            EntityKind::CourseOffering => "co",
            EntityKind::Student => "s",
            EntityKind::Registration => "r",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::CourseType => "course type",
            EntityKind::Course => "course",
            EntityKind::CourseOffering => "course offering",
            EntityKind::Student => "student",
            EntityKind::Registration => "registration",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseType {
    pub id: CourseTypeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOffering {
    pub id: CourseOfferingId,
    pub course_id: CourseId,
    pub course_type_id: CourseTypeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    pub student_id: StudentId,
    pub course_offering_id: CourseOfferingId,
    pub registration_date: NaiveDate,
}
