use super::*;

use chrono::NaiveDate;
use shared::domain::{Course, CourseOffering, CourseType, Registration, Student};

fn offering(id: &str, course_id: &str, course_type_id: &str) -> CourseOffering {
    CourseOffering {
        id: id.into(),
        course_id: course_id.into(),
        course_type_id: course_type_id.into(),
    }
}

#[test]
fn seed_matches_fixture_counts() {
    let storage = Storage::seeded(IdStrategy::Sequential);
    let snapshot = storage.snapshot();
    assert_eq!(snapshot.course_types.len(), 3);
    assert_eq!(snapshot.courses.len(), 3);
    assert_eq!(snapshot.course_offerings.len(), 2);
    assert_eq!(snapshot.students.len(), 2);
    assert_eq!(snapshot.registrations.len(), 1);
    assert_eq!(
        snapshot.course_type(&"ct2".into()).map(|ct| ct.name.as_str()),
        Some("Group")
    );
    assert_eq!(
        snapshot.registrations[0].registration_date,
        NaiveDate::from_ymd_opt(2023, 4, 15).expect("date")
    );
    assert_eq!(storage.revision(), 0);
}

#[test]
fn update_replaces_in_place_and_keeps_position() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    storage
        .dispatch(Command::UpdateCourse(Course {
            id: "c2".into(),
            name: "British English".into(),
        }))
        .expect("update");

    let names: Vec<_> = storage
        .snapshot()
        .courses
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["Hindi", "British English", "Urdu"]);
    assert_eq!(storage.revision(), 1);
}

#[test]
fn update_of_unknown_id_is_a_no_op() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    let before = storage.snapshot().clone();
    storage
        .dispatch(Command::UpdateCourseType(CourseType {
            id: "ct404".into(),
            name: "Ghost".into(),
        }))
        .expect("update");
    assert_eq!(storage.snapshot(), &before);
}

#[test]
fn delete_course_type_in_use_is_rejected_without_changes() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    let before = storage.snapshot().clone();

    let err = storage
        .dispatch(Command::DeleteCourseType("ct1".into()))
        .expect_err("ct1 is referenced by co1");
    assert_eq!(
        err,
        Rejection::CourseTypeInUse {
            id: "ct1".into(),
            offerings: 1
        }
    );
    assert_eq!(storage.snapshot(), &before);
    assert_eq!(storage.revision(), 0);
}

#[test]
fn delete_unreferenced_course_type_succeeds() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    storage
        .dispatch(Command::DeleteCourseType("ct3".into()))
        .expect("ct3 is unused");
    assert!(storage.snapshot().course_type(&"ct3".into()).is_none());
}

#[test]
fn delete_offering_with_registrations_is_rejected() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    let err = storage
        .dispatch(Command::DeleteCourseOffering("co1".into()))
        .expect_err("co1 has r1");
    assert!(matches!(
        err,
        Rejection::OfferingHasRegistrations {
            registrations: 1,
            ..
        }
    ));

    storage
        .dispatch(Command::DeleteCourseOffering("co2".into()))
        .expect("co2 has no registrations");
    assert_eq!(storage.snapshot().course_offerings.len(), 1);
}

#[test]
fn add_offering_does_not_check_duplicates() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    storage
        .dispatch(Command::AddCourseOffering(offering("co9", "c2", "ct2")))
        .expect("store appends as given");
    assert_eq!(storage.snapshot().offerings_using_course(&"c2".into()), 2);
}

#[test]
fn students_and_registrations_are_never_guarded() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    storage
        .dispatch(Command::DeleteRegistration("r1".into()))
        .expect("registrations delete freely");
    storage
        .dispatch(Command::DeleteCourseOffering("co1".into()))
        .expect("co1 is free once r1 is gone");
    assert!(storage.snapshot().student(&"s1".into()).is_some());
}

#[test]
fn sequential_ids_skip_seeded_identifiers() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    assert_eq!(storage.next_id(EntityKind::CourseType), "ct4");
    assert_eq!(storage.next_id(EntityKind::CourseType), "ct5");
    assert_eq!(storage.next_id(EntityKind::CourseOffering), "co3");
    assert_eq!(storage.next_id(EntityKind::Registration), "r2");
}

#[test]
fn sequential_ids_are_not_reused_after_delete() {
    let mut storage = Storage::empty(IdStrategy::Sequential);
    let id = storage.next_id(EntityKind::Course);
    storage
        .dispatch(Command::AddCourse(Course {
            id: id.clone().into(),
            name: "Hindi".into(),
        }))
        .expect("add");
    storage
        .dispatch(Command::DeleteCourse(id.clone().into()))
        .expect("delete");

    assert_ne!(storage.next_id(EntityKind::Course), id);
}

#[test]
fn random_ids_carry_kind_prefix_and_differ() {
    let mut storage = Storage::empty(IdStrategy::Random);
    let first = storage.next_id(EntityKind::Student);
    let second = storage.next_id(EntityKind::Student);
    assert!(first.starts_with('s'));
    assert_eq!(first.len(), 33);
    assert_ne!(first, second);
}

#[test]
fn id_strategy_parses_from_config_strings() {
    assert_eq!("Sequential".parse::<IdStrategy>(), Ok(IdStrategy::Sequential));
    assert_eq!(" uuid ".parse::<IdStrategy>(), Ok(IdStrategy::Random));
    assert!("timestamp".parse::<IdStrategy>().is_err());
}

#[test]
fn storage_reports_the_strategy_it_was_built_with() {
    assert_eq!(
        Storage::empty(IdStrategy::Sequential).id_strategy(),
        IdStrategy::Sequential
    );
    assert_eq!(Storage::default().id_strategy(), IdStrategy::Random);
    assert_eq!(IdStrategy::Sequential.to_string(), "sequential");
}

#[test]
fn batch_is_all_or_nothing() {
    let mut storage = Storage::seeded(IdStrategy::Sequential);
    let before = storage.snapshot().clone();

    let err = storage
        .dispatch_all(vec![
            Command::AddStudent(Student {
                id: "s9".into(),
                name: "Asha".into(),
                email: "asha@example.com".into(),
                phone: "555".into(),
            }),
            Command::DeleteCourse("c1".into()),
        ])
        .expect_err("second command is blocked");
    assert!(matches!(err, Rejection::CourseInUse { .. }));
    assert_eq!(storage.snapshot(), &before);

    storage
        .dispatch_all(vec![
            Command::AddStudent(Student {
                id: "s9".into(),
                name: "Asha".into(),
                email: "asha@example.com".into(),
                phone: "555".into(),
            }),
            Command::AddRegistration(Registration {
                id: "r9".into(),
                student_id: "s9".into(),
                course_offering_id: "co2".into(),
                registration_date: NaiveDate::from_ymd_opt(2024, 1, 2).expect("date"),
            }),
        ])
        .expect("pair applies");
    assert_eq!(storage.revision(), 2);
    assert_eq!(storage.snapshot().registrations_for_offering(&"co2".into()), 1);
}

#[test]
fn snapshot_serializes_with_camel_case_collections() {
    let json = serde_json::to_value(seed_snapshot()).expect("serialize");
    assert_eq!(json["courseTypes"][0]["name"], "Individual");
    assert_eq!(json["courseOfferings"][1]["courseTypeId"], "ct2");
    assert_eq!(json["registrations"][0]["registrationDate"], "2023-04-15");
}
