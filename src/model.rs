use serde::{Deserialize, Serialize};

/// A named individual. The id is the stable identity; within a class the
/// presentation layer validates it unique before insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
}

/// A named subset of a class's students. The student list holds copies
/// independent of the owning class's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub students: Vec<Student>,
}

/// A top-level class. Group and student order is insertion order and is
/// preserved through persistence; display relies on it, selection does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub students: Vec<Student>,
}
