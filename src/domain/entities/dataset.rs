use indexmap::IndexMap;
use serde_json::Value;

pub const CHECKER_COLUMN: &str = "checker";
pub const BLANK_COLUMN: &str = "Blank_Column";
pub const ID_COLUMN: &str = "ID";
pub const NOT_ASSIGNED: &str = "Not Assigned";

pub type CellValue = Option<String>;

pub type SheetFilters = IndexMap<String, Vec<String>>;

pub fn cell_from_json(value: Value) -> CellValue {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

pub fn is_blank(cell: Option<&str>) -> bool {
    cell.map_or(true, str::is_empty)
}

/// `source_rows[i]` is the position of row `i` in the sheet's full dataset, so
/// a filtered view can still address the backend row it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: IndexMap<String, Vec<CellValue>>,
    source_rows: Vec<usize>,
}

impl Dataset {
    pub fn from_columns(columns: IndexMap<String, Vec<CellValue>>) -> Self {
        let row_count = columns.values().map(Vec::len).max().unwrap_or(0);
        Self {
            columns,
            source_rows: (0..row_count).collect(),
        }
    }

    pub fn from_json_columns(columns: IndexMap<String, Vec<Value>>) -> Self {
        Self::from_columns(
            columns
                .into_iter()
                .map(|(name, cells)| (name, cells.into_iter().map(cell_from_json).collect()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.source_rows.len()
    }

    #[allow(dead_code)]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn cell(&self, column: &str, row: usize) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|cells| cells.get(row))
            .and_then(|cell| cell.as_deref())
    }

    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = Option<&str>> {
        self.columns
            .values()
            .map(move |cells| cells.get(row).and_then(|cell| cell.as_deref()))
    }

    pub fn source_row(&self, row: usize) -> Option<usize> {
        self.source_rows.get(row).copied()
    }

    pub fn column_has_values(&self, column: &str) -> bool {
        (0..self.row_count()).any(|row| !is_blank(self.cell(column, row)))
    }

    pub fn select_rows(&self, rows: &[usize]) -> Dataset {
        let columns = self
            .columns
            .iter()
            .map(|(name, cells)| {
                let picked = rows
                    .iter()
                    .map(|&row| cells.get(row).cloned().flatten())
                    .collect();
                (name.clone(), picked)
            })
            .collect();
        let source_rows = rows
            .iter()
            .filter_map(|&row| self.source_rows.get(row).copied())
            .collect();
        Dataset {
            columns,
            source_rows,
        }
    }

    /// Writes a cell addressed by source row. Returns false when no row of this
    /// dataset maps to `source_row`. A missing column is created blank.
    pub fn set_cell_by_source(&mut self, column: &str, source_row: usize, value: String) -> bool {
        let Some(row) = self.source_rows.iter().position(|&r| r == source_row) else {
            return false;
        };
        let row_count = self.row_count();
        let cells = self
            .columns
            .entry(column.to_string())
            .or_insert_with(|| vec![None; row_count]);
        if cells.len() < row_count {
            cells.resize(row_count, None);
        }
        cells[row] = Some(value);
        true
    }
}
