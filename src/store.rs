//! File-backed class roster store.
//!
//! One `ClassStore` owns the full in-memory roster plus the single data file
//! under the selected workspace. Every mutator rewrites that file before
//! returning, so disk always holds the last applied change.

use crate::model::{Group, SchoolClass, Student};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DATA_FILE: &str = "classes.json";
pub const ROSTER_FORMAT: &str = "classpick-roster-v1";
pub const ROSTER_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("roster file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported roster format tag: {0}")]
    UnsupportedFormat(String),
    #[error("unsupported roster version: {0}")]
    UnsupportedVersion(u32),
    #[error("class id already in use: {0}")]
    DuplicateClassId(String),
    #[error("group id already in use: {0}")]
    DuplicateGroupId(String),
    #[error("student id already in use: {0}")]
    DuplicateStudentId(String),
    #[error("class not found: {0}")]
    ClassNotFound(String),
    #[error("group not found: {0}")]
    GroupNotFound(String),
    #[error("student not found: {0}")]
    StudentNotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// On-disk envelope. `format` and `version` gate deserialization so a future
/// layout change fails loud instead of quietly handing back an empty roster.
#[derive(Debug, Deserialize)]
struct RosterFile {
    format: String,
    version: u32,
    #[allow(dead_code)]
    #[serde(rename = "savedAt", default)]
    saved_at: String,
    classes: Vec<SchoolClass>,
}

pub struct ClassStore {
    path: PathBuf,
    classes: Vec<SchoolClass>,
    // One generator for every randomized query, seeded once per store.
    rng: StdRng,
}

impl ClassStore {
    /// Open the roster under `workspace`, creating the directory if needed.
    /// A missing data file means a fresh workspace and an empty roster; a
    /// present but unreadable one is an error, never a silent reset.
    pub fn open(workspace: &Path) -> StoreResult<ClassStore> {
        fs::create_dir_all(workspace)?;
        let path = workspace.join(DATA_FILE);

        let classes = if path.is_file() {
            let text = fs::read_to_string(&path)?;
            let roster: RosterFile = serde_json::from_str(&text)?;
            if roster.format != ROSTER_FORMAT {
                return Err(StoreError::UnsupportedFormat(roster.format));
            }
            if roster.version != ROSTER_VERSION {
                return Err(StoreError::UnsupportedVersion(roster.version));
            }
            info!(count = roster.classes.len(), "loaded roster");
            for class in &roster.classes {
                debug!(name = %class.name, groups = class.groups.len(), "class");
            }
            roster.classes
        } else {
            info!(path = %path.display(), "no roster file, starting empty");
            Vec::new()
        };

        Ok(ClassStore {
            path,
            classes,
            rng: StdRng::from_entropy(),
        })
    }

    /// Rewrite the data file from the in-memory roster. Writes a sibling
    /// temp file and renames it into place so a crash mid-save cannot
    /// truncate the previous roster.
    pub fn save(&self) -> StoreResult<()> {
        let text = serde_json::to_string_pretty(&json!({
            "format": ROSTER_FORMAT,
            "version": ROSTER_VERSION,
            "savedAt": Utc::now().to_rfc3339(),
            "classes": self.classes,
        }))?;

        let tmp = self.path.with_extension("json.saving");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        debug!(count = self.classes.len(), "saved roster");
        Ok(())
    }

    /// Read-only view of the roster, in insertion order.
    pub fn classes(&self) -> &[SchoolClass] {
        &self.classes
    }

    pub fn class_by_id(&self, id: &str) -> Option<&SchoolClass> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Exact, case-sensitive match against class names.
    pub fn class_name_exists(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c.name == name)
    }

    /// False when the class itself is missing.
    pub fn group_name_exists(&self, class_id: &str, name: &str) -> bool {
        self.class_by_id(class_id)
            .map(|c| c.groups.iter().any(|g| g.name == name))
            .unwrap_or(false)
    }

    /// False when the class itself is missing.
    pub fn student_id_exists(&self, class_id: &str, student_id: &str) -> bool {
        self.class_by_id(class_id)
            .map(|c| c.students.iter().any(|s| s.id == student_id))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: SchoolClass) -> StoreResult<()> {
        if self.class_by_id(&class.id).is_some() {
            return Err(StoreError::DuplicateClassId(class.id));
        }
        self.classes.push(class);
        self.save()
    }

    /// Returns false when no class had that id; the roster file is only
    /// rewritten when something was actually removed.
    pub fn remove_class(&mut self, class_id: &str) -> StoreResult<bool> {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != class_id);
        if self.classes.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn class_mut(&mut self, class_id: &str) -> StoreResult<&mut SchoolClass> {
        self.classes
            .iter_mut()
            .find(|c| c.id == class_id)
            .ok_or_else(|| StoreError::ClassNotFound(class_id.to_string()))
    }

    pub fn add_group(&mut self, class_id: &str, group: Group) -> StoreResult<()> {
        let class = self.class_mut(class_id)?;
        if class.groups.iter().any(|g| g.id == group.id) {
            return Err(StoreError::DuplicateGroupId(group.id));
        }
        class.groups.push(group);
        self.save()
    }

    pub fn remove_group(&mut self, class_id: &str, group_id: &str) -> StoreResult<bool> {
        let class = self.class_mut(class_id)?;
        let before = class.groups.len();
        class.groups.retain(|g| g.id != group_id);
        if class.groups.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn add_student(&mut self, class_id: &str, student: Student) -> StoreResult<()> {
        let class = self.class_mut(class_id)?;
        if class.students.iter().any(|s| s.id == student.id) {
            return Err(StoreError::DuplicateStudentId(student.id));
        }
        class.students.push(student);
        self.save()
    }

    /// Removes from the class roster only. Group membership copies are
    /// independent collections and stay until unassigned.
    pub fn remove_student(&mut self, class_id: &str, student_id: &str) -> StoreResult<bool> {
        let class = self.class_mut(class_id)?;
        let before = class.students.len();
        class.students.retain(|s| s.id != student_id);
        if class.students.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Copies a roster student into the group's list. Returns false when the
    /// student is already assigned to that group.
    pub fn assign_student(
        &mut self,
        class_id: &str,
        group_id: &str,
        student_id: &str,
    ) -> StoreResult<bool> {
        let class = self.class_mut(class_id)?;
        let student = class
            .students
            .iter()
            .find(|s| s.id == student_id)
            .cloned()
            .ok_or_else(|| StoreError::StudentNotFound(student_id.to_string()))?;
        let group = class
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| StoreError::GroupNotFound(group_id.to_string()))?;
        if group.students.iter().any(|s| s.id == student_id) {
            return Ok(false);
        }
        group.students.push(student);
        self.save()?;
        Ok(true)
    }

    pub fn unassign_student(
        &mut self,
        class_id: &str,
        group_id: &str,
        student_id: &str,
    ) -> StoreResult<bool> {
        let class = self.class_mut(class_id)?;
        let group = class
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| StoreError::GroupNotFound(group_id.to_string()))?;
        let before = group.students.len();
        group.students.retain(|s| s.id != student_id);
        if group.students.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Uniform pick over the class's groups. `None` when the class is
    /// missing or has no groups; never an error.
    pub fn pick_group(&mut self, class_id: &str) -> Option<Group> {
        let class = self.classes.iter().find(|c| c.id == class_id)?;
        if class.groups.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..class.groups.len());
        let group = class.groups[index].clone();
        info!(class = %class.name, group = %group.name, "picked group");
        Some(group)
    }

    /// Uniform pick over the class's direct student roster.
    pub fn pick_student(&mut self, class_id: &str) -> Option<Student> {
        let class = self.classes.iter().find(|c| c.id == class_id)?;
        if class.students.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..class.students.len());
        let student = class.students[index].clone();
        info!(class = %class.name, student = %student.name, "picked student");
        Some(student)
    }

    /// Uniform pick over one group's student list.
    pub fn pick_student_from_group(&mut self, class_id: &str, group_id: &str) -> Option<Student> {
        let class = self.classes.iter().find(|c| c.id == class_id)?;
        let group = class.groups.iter().find(|g| g.id == group_id)?;
        if group.students.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..group.students.len());
        let student = group.students[index].clone();
        info!(group = %group.name, student = %student.name, "picked student from group");
        Some(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

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

    fn class(id: &str, name: &str) -> SchoolClass {
        SchoolClass {
            id: id.to_string(),
            name: name.to_string(),
            groups: Vec::new(),
            students: Vec::new(),
        }
    }

    #[test]
    fn duplicate_class_id_is_rejected() {
        let ws = temp_workspace("classpick-store-dup");
        let mut store = ClassStore::open(&ws).expect("open store");
        store.add_class(class("c1", "Math")).expect("add class");
        let err = store.add_class(class("c1", "Science")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateClassId(_)));
        let _ = std::fs::remove_dir_all(ws);
    }

    #[test]
    fn name_check_is_case_sensitive() {
        let ws = temp_workspace("classpick-store-case");
        let mut store = ClassStore::open(&ws).expect("open store");
        store.add_class(class("c1", "Math")).expect("add class");
        assert!(store.class_name_exists("Math"));
        assert!(!store.class_name_exists("math"));
        assert!(!store.class_name_exists("Math "));
        let _ = std::fs::remove_dir_all(ws);
    }
}
