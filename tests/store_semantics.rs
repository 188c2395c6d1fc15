#[path = "../src/model.rs"]
mod model;
#[path = "../src/store.rs"]
mod store;

use model::{Group, SchoolClass, Student};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use store::{ClassStore, StoreError};

fn temp_workspace(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ))
}

fn student(id: &str, name: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn sample_class() -> SchoolClass {
    SchoolClass {
        id: "c1".to_string(),
        name: "Math".to_string(),
        groups: vec![Group {
            id: "g1".to_string(),
            name: "A".to_string(),
            students: vec![student("s1", "Ada")],
        }],
        students: vec![student("s1", "Ada"), student("s2", "Grace")],
    }
}

#[test]
fn add_then_get_returns_equal_class_exactly_once() {
    let ws = temp_workspace("classpick-sem-add");
    let mut s = ClassStore::open(&ws).expect("open store");

    let class = sample_class();
    s.add_class(class.clone()).expect("add class");

    assert_eq!(s.class_by_id("c1"), Some(&class));
    assert_eq!(s.classes().iter().filter(|c| c.id == "c1").count(), 1);

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn remove_class_then_get_is_none() {
    let ws = temp_workspace("classpick-sem-remove");
    let mut s = ClassStore::open(&ws).expect("open store");

    s.add_class(sample_class()).expect("add class");
    assert!(s.remove_class("c1").expect("remove class"));
    assert_eq!(s.class_by_id("c1"), None);

    // Removing again changes nothing and reports it.
    assert!(!s.remove_class("c1").expect("remove absent class"));

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn existence_predicates_resolve_through_the_class() {
    let ws = temp_workspace("classpick-sem-exists");
    let mut s = ClassStore::open(&ws).expect("open store");
    s.add_class(sample_class()).expect("add class");

    assert!(s.group_name_exists("c1", "A"));
    assert!(!s.group_name_exists("c1", "B"));
    assert!(!s.group_name_exists("missing", "A"));

    assert!(s.student_id_exists("c1", "s2"));
    assert!(!s.student_id_exists("c1", "s9"));
    assert!(!s.student_id_exists("missing", "s1"));

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn duplicate_group_and_student_ids_are_rejected() {
    let ws = temp_workspace("classpick-sem-dup");
    let mut s = ClassStore::open(&ws).expect("open store");
    s.add_class(sample_class()).expect("add class");

    let dup_group = Group {
        id: "g1".to_string(),
        name: "B".to_string(),
        students: Vec::new(),
    };
    assert!(matches!(
        s.add_group("c1", dup_group).unwrap_err(),
        StoreError::DuplicateGroupId(_)
    ));

    assert!(matches!(
        s.add_student("c1", student("s1", "Imposter")).unwrap_err(),
        StoreError::DuplicateStudentId(_)
    ));

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn mutations_against_a_missing_class_fail_loud() {
    let ws = temp_workspace("classpick-sem-missing");
    let mut s = ClassStore::open(&ws).expect("open store");

    let group = Group {
        id: "g1".to_string(),
        name: "A".to_string(),
        students: Vec::new(),
    };
    assert!(matches!(
        s.add_group("missing", group).unwrap_err(),
        StoreError::ClassNotFound(_)
    ));
    assert!(matches!(
        s.add_student("missing", student("s1", "Ada")).unwrap_err(),
        StoreError::ClassNotFound(_)
    ));

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn removing_a_student_does_not_cascade_into_groups() {
    let ws = temp_workspace("classpick-sem-cascade");
    let mut s = ClassStore::open(&ws).expect("open store");
    s.add_class(sample_class()).expect("add class");

    assert!(s.remove_student("c1", "s1").expect("remove student"));

    // The class roster no longer has s1, the group's copy stays.
    assert!(!s.student_id_exists("c1", "s1"));
    let class = s.class_by_id("c1").expect("class");
    assert_eq!(class.groups[0].students.len(), 1);
    assert_eq!(class.groups[0].students[0].id, "s1");

    // Group membership is managed explicitly.
    assert!(s.unassign_student("c1", "g1", "s1").expect("unassign"));
    let class = s.class_by_id("c1").expect("class");
    assert!(class.groups[0].students.is_empty());

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn assignment_requires_student_and_group_to_resolve() {
    let ws = temp_workspace("classpick-sem-assign");
    let mut s = ClassStore::open(&ws).expect("open store");
    s.add_class(sample_class()).expect("add class");

    assert!(matches!(
        s.assign_student("c1", "g1", "nobody").unwrap_err(),
        StoreError::StudentNotFound(_)
    ));
    assert!(matches!(
        s.assign_student("c1", "g9", "s2").unwrap_err(),
        StoreError::GroupNotFound(_)
    ));

    // s2 is on the roster but not yet in g1.
    assert!(s.assign_student("c1", "g1", "s2").expect("assign"));
    assert!(!s.assign_student("c1", "g1", "s2").expect("assign again"));

    let _ = std::fs::remove_dir_all(ws);
}
