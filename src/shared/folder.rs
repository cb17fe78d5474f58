/**
 * Folder Document
 *
 * A folder is the unit of content the CMS manages: a named bucket of file
 * references with a set of free-form tags. Folders are owned by the folder
 * store; request handlers only see them as serialized JSON.
 */
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Folder document as stored and as returned by `GET /api/folders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Generated, unique folder id
    pub id: Uuid,
    /// Display name chosen by the user
    pub folder_name: String,
    /// Free-form tags, no duplicates
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// File references in display order
    #[serde(default)]
    pub files: Vec<String>,
}

impl Folder {
    /// Create an empty folder with a freshly generated id
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            folder_name: folder_name.into(),
            tags: BTreeSet::new(),
            files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_folder_is_empty() {
        let folder = Folder::new("Docs");
        assert_eq!(folder.folder_name, "Docs");
        assert!(folder.tags.is_empty());
        assert!(folder.files.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Folder::new("a").id, Folder::new("a").id);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let folder = Folder::new("Docs");
        let value = serde_json::to_value(&folder).unwrap();
        assert_eq!(value["folderName"], "Docs");
        assert_eq!(value["id"], folder.id.to_string());
        assert_eq!(value["tags"], serde_json::json!([]));
        assert_eq!(value["files"], serde_json::json!([]));
    }
}
