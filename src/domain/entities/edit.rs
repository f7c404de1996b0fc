use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    Checker,
    BlankColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub source_row: usize,
    pub field: EditableField,
}

impl CellKey {
    pub fn checker(source_row: usize) -> Self {
        Self {
            source_row,
            field: EditableField::Checker,
        }
    }

    pub fn blank_column(source_row: usize) -> Self {
        Self {
            source_row,
            field: EditableField::BlankColumn,
        }
    }
}

/// Values typed into editable cells that have not been committed yet.
///
/// Committing takes the draft out, so an Enter followed by the blur it causes
/// sends a single update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedEdits {
    staged_cells: HashMap<CellKey, String>,
}

impl StagedEdits {
    pub fn stage(&mut self, key: CellKey, value: String) {
        self.staged_cells.insert(key, value);
    }

    pub fn draft(&self, key: &CellKey) -> Option<&str> {
        self.staged_cells.get(key).map(String::as_str)
    }

    pub fn take(&mut self, key: &CellKey) -> Option<String> {
        self.staged_cells.remove(key)
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.staged_cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.staged_cells.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerUpdate {
    pub row_id: String,
    pub checker: String,
}

impl CheckerUpdate {
    pub fn new(row_id: impl Into<String>, checker: &str) -> Self {
        Self {
            row_id: row_id.into(),
            checker: checker.trim().to_string(),
        }
    }

    pub fn body(&self) -> CheckerBody<'_> {
        CheckerBody {
            checker: &self.checker,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckerBody<'a> {
    pub checker: &'a str,
}

/// Payload of `POST /update-blank-column`. `row_index` addresses the row in
/// the full sheet, not in the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlankColumnUpdate {
    pub sheet_name: String,
    pub row_index: usize,
    pub new_value: String,
}
