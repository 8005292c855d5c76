//! File ownership conflicts between phases

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::plan::schema::PlanPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAccess {
    Created,
    Modified,
}

impl fmt::Display for FileAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAccess::Created => f.write_str("created"),
            FileAccess::Modified => f.write_str("modified"),
        }
    }
}

/// A path touched the same way by more than one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileConflict {
    pub path: String,
    pub access: FileAccess,
    pub owners: Vec<String>,
}

impl fmt::Display for FileConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File '{}' {} by multiple phases: {}. Cannot run in parallel.",
            self.path,
            self.access,
            self.owners.join(", ")
        )
    }
}

/// Path -> owning phase ids, in first-seen order
type OwnerMap = IndexMap<String, Vec<String>>;

fn add_owner(map: &mut OwnerMap, path: &str, phase_id: &str) {
    let owners = map.entry(path.to_string()).or_default();
    // A phase listing the same path twice is still one owner
    if !owners.iter().any(|o| o == phase_id) {
        owners.push(phase_id.to_string());
    }
}

fn conflicts(map: OwnerMap, access: FileAccess) -> impl Iterator<Item = FileConflict> {
    map.into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .map(move |(path, owners)| FileConflict {
            path,
            access,
            owners,
        })
}

/// Report every path created (or modified) by more than one phase.
///
/// Created-file conflicts come first, then modified-file conflicts, each in
/// the order paths were first seen. Created and modified lists are checked
/// independently of each other.
pub fn detect_file_conflicts(phases: &[PlanPhase]) -> Vec<FileConflict> {
    let mut created = OwnerMap::default();
    let mut modified = OwnerMap::default();

    for phase in phases {
        let pid = phase.id.as_str();
        for path in &phase.files_created {
            add_owner(&mut created, path, pid);
        }
        for path in &phase.files_modified {
            add_owner(&mut modified, path, pid);
        }
    }

    conflicts(created, FileAccess::Created)
        .chain(conflicts(modified, FileAccess::Modified))
        .collect()
}
