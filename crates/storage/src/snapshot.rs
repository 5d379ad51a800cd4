use serde::{Deserialize, Serialize};
use shared::{
    domain::{
        Course, CourseId, CourseOffering, CourseOfferingId, CourseType, CourseTypeId, EntityKind,
        Registration, RegistrationId, Student, StudentId,
    },
    error::Rejection,
    protocol::Command,
};

/// Immutable view of all five collections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub course_types: Vec<CourseType>,
    pub courses: Vec<Course>,
    pub course_offerings: Vec<CourseOffering>,
    pub students: Vec<Student>,
    pub registrations: Vec<Registration>,
}

impl Snapshot {
    /// Computes the snapshot that results from applying `command`.
    ///
    /// Only the three guarded deletes can fail. Every other command is
    /// applied as given: uniqueness and foreign-key checks belong to the
    /// caller. Updating or deleting an id that is not present leaves the
    /// collections as they were.
    pub fn apply(&self, command: Command) -> Result<Snapshot, Rejection> {
        let mut next = self.clone();
        match command {
            Command::AddCourseType(course_type) => next.course_types.push(course_type),
            Command::UpdateCourseType(course_type) => {
                replace_by_id(&mut next.course_types, course_type, |ct| &ct.id);
            }
            Command::DeleteCourseType(id) => {
                let offerings = self.offerings_using_course_type(&id);
                if offerings > 0 {
                    return Err(Rejection::CourseTypeInUse { id, offerings });
                }
                next.course_types.retain(|ct| ct.id != id);
            }
            Command::AddCourse(course) => next.courses.push(course),
            Command::UpdateCourse(course) => {
                replace_by_id(&mut next.courses, course, |c| &c.id);
            }
            Command::DeleteCourse(id) => {
                let offerings = self.offerings_using_course(&id);
                if offerings > 0 {
                    return Err(Rejection::CourseInUse { id, offerings });
                }
                next.courses.retain(|c| c.id != id);
            }
            Command::AddCourseOffering(offering) => next.course_offerings.push(offering),
            Command::UpdateCourseOffering(offering) => {
                replace_by_id(&mut next.course_offerings, offering, |co| &co.id);
            }
            Command::DeleteCourseOffering(id) => {
                let registrations = self.registrations_for_offering(&id);
                if registrations > 0 {
                    return Err(Rejection::OfferingHasRegistrations { id, registrations });
                }
                next.course_offerings.retain(|co| co.id != id);
            }
            Command::AddStudent(student) => next.students.push(student),
            Command::AddRegistration(registration) => next.registrations.push(registration),
            Command::DeleteRegistration(id) => next.registrations.retain(|r| r.id != id),
        }
        Ok(next)
    }

    pub fn course_type(&self, id: &CourseTypeId) -> Option<&CourseType> {
        self.course_types.iter().find(|ct| &ct.id == id)
    }

    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.id == id)
    }

    pub fn course_offering(&self, id: &CourseOfferingId) -> Option<&CourseOffering> {
        self.course_offerings.iter().find(|co| &co.id == id)
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    pub fn registration(&self, id: &RegistrationId) -> Option<&Registration> {
        self.registrations.iter().find(|r| &r.id == id)
    }

    pub fn offerings_using_course_type(&self, id: &CourseTypeId) -> usize {
        self.course_offerings
            .iter()
            .filter(|co| &co.course_type_id == id)
            .count()
    }

    pub fn offerings_using_course(&self, id: &CourseId) -> usize {
        self.course_offerings
            .iter()
            .filter(|co| &co.course_id == id)
            .count()
    }

    pub fn registrations_for_offering(&self, id: &CourseOfferingId) -> usize {
        self.registrations
            .iter()
            .filter(|r| &r.course_offering_id == id)
            .count()
    }

    /// Whether `id` is taken within the collection for `kind`.
    pub fn contains_id(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::CourseType => self.course_types.iter().any(|e| e.id.as_str() == id),
            EntityKind::Course => self.courses.iter().any(|e| e.id.as_str() == id),
            EntityKind::CourseOffering => {
                self.course_offerings.iter().any(|e| e.id.as_str() == id)
            }
            EntityKind::Student => self.students.iter().any(|e| e.id.as_str() == id),
            EntityKind::Registration => self.registrations.iter().any(|e| e.id.as_str() == id),
        }
    }
}

fn replace_by_id<T, K, F>(items: &mut [T], replacement: T, key: F)
where
    K: PartialEq,
    F: Fn(&T) -> &K,
{
    if let Some(index) = items.iter().position(|item| key(item) == key(&replacement)) {
        items[index] = replacement;
    }
}
