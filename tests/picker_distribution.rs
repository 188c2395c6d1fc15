#[path = "../src/model.rs"]
mod model;
#[path = "../src/store.rs"]
mod store;

use model::{Group, SchoolClass, Student};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use store::ClassStore;

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

fn group(id: &str, name: &str, students: Vec<Student>) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        students,
    }
}

fn populated_class() -> SchoolClass {
    SchoolClass {
        id: "c1".to_string(),
        name: "Math".to_string(),
        groups: vec![
            group("g1", "A", vec![student("s1", "Ada"), student("s2", "Grace")]),
            group("g2", "B", vec![student("s3", "Alan")]),
            group("g3", "C", Vec::new()),
        ],
        students: vec![
            student("s1", "Ada"),
            student("s2", "Grace"),
            student("s3", "Alan"),
        ],
    }
}

#[test]
fn picks_stay_inside_the_target_and_cover_it() {
    let ws = temp_workspace("classpick-dist-cover");
    let mut s = ClassStore::open(&ws).expect("open store");
    s.add_class(populated_class()).expect("add class");

    // 300 draws over 3 groups: every draw must be one of them, and each
    // should show up (the chance a group is never drawn is negligible).
    let mut seen_groups = HashSet::new();
    for _ in 0..300 {
        let g = s.pick_group("c1").expect("a group is always available");
        assert!(["g1", "g2", "g3"].contains(&g.id.as_str()));
        seen_groups.insert(g.id);
    }
    assert_eq!(seen_groups.len(), 3);

    let mut seen_students = HashSet::new();
    for _ in 0..300 {
        let st = s.pick_student("c1").expect("a student is always available");
        assert!(["s1", "s2", "s3"].contains(&st.id.as_str()));
        seen_students.insert(st.id);
    }
    assert_eq!(seen_students.len(), 3);

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn group_picks_come_from_that_group_only() {
    let ws = temp_workspace("classpick-dist-group");
    let mut s = ClassStore::open(&ws).expect("open store");
    s.add_class(populated_class()).expect("add class");

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let st = s
            .pick_student_from_group("c1", "g1")
            .expect("g1 has members");
        assert!(["s1", "s2"].contains(&st.id.as_str()));
        seen.insert(st.id);
    }
    assert_eq!(seen.len(), 2);

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn empty_or_unresolved_targets_yield_none() {
    let ws = temp_workspace("classpick-dist-empty");
    let mut s = ClassStore::open(&ws).expect("open store");
    s.add_class(SchoolClass {
        id: "empty".to_string(),
        name: "New Class".to_string(),
        groups: Vec::new(),
        students: Vec::new(),
    })
    .expect("add class");
    s.add_class(populated_class()).expect("add populated class");

    // No groups / no students on the class.
    assert_eq!(s.pick_group("empty"), None);
    assert_eq!(s.pick_student("empty"), None);

    // Missing class.
    assert_eq!(s.pick_group("missing"), None);
    assert_eq!(s.pick_student("missing"), None);
    assert_eq!(s.pick_student_from_group("missing", "g1"), None);

    // Missing group, and a group with an empty member list.
    assert_eq!(s.pick_student_from_group("c1", "missing"), None);
    assert_eq!(s.pick_student_from_group("c1", "g3"), None);

    let _ = std::fs::remove_dir_all(ws);
}
