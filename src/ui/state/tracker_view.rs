use dioxus::logger::tracing::warn;

use crate::domain::entities::dataset::{
    Dataset, SheetFilters, BLANK_COLUMN, CHECKER_COLUMN, ID_COLUMN, NOT_ASSIGNED,
};
use crate::domain::entities::edit::{BlankColumnUpdate, CellKey, CheckerUpdate, StagedEdits};
use crate::domain::entities::filters::{
    apply_column_filters, apply_search, cascading_filter_options, reconcile_filters,
    ActiveFilters, SearchQuery,
};
use crate::usecase::services::query_service::SheetPayload;

/// Issued when a sheet load starts; only the latest ticket may install data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLoadTicket {
    generation: u64,
    sheet: String,
}

impl SheetLoadTicket {
    pub fn sheet(&self) -> &str {
        &self.sheet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    BlankColumn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDropdown {
    pub column: String,
    pub options: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub name: String,
    pub kind: ColumnKind,
    pub filter: FilterDropdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub source_row: usize,
    pub row_id: Option<String>,
    pub cells: Vec<String>,
    pub checker: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub columns: Vec<TableColumn>,
    pub checker_filter: FilterDropdown,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerView {
    sheets: Vec<String>,
    selected_sheet: Option<String>,
    dataset: Dataset,
    sheet_filters: SheetFilters,
    checker_list: Vec<String>,
    active_filters: ActiveFilters,
    search: SearchQuery,
    search_input: String,
    generation: u64,
    loading: bool,
}

impl TrackerView {
    pub fn set_sheets(&mut self, sheets: Vec<String>) -> Option<String> {
        self.sheets = sheets;
        self.sheets.first().cloned()
    }

    pub fn sheets(&self) -> &[String] {
        &self.sheets
    }

    pub fn selected_sheet(&self) -> Option<&str> {
        self.selected_sheet.as_deref()
    }

    pub fn set_checker_list(&mut self, checkers: Vec<String>) {
        self.checker_list = checkers;
    }

    pub fn checker_list(&self) -> &[String] {
        &self.checker_list
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[allow(dead_code)]
    pub fn active_filters(&self) -> &ActiveFilters {
        &self.active_filters
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switches to `sheet`. Filters, search and the previous sheet's data are
    /// dropped right away so nothing stale renders while the fetch runs.
    pub fn begin_sheet_load(&mut self, sheet: String) -> SheetLoadTicket {
        self.generation += 1;
        self.selected_sheet = Some(sheet.clone());
        self.dataset = Dataset::default();
        self.sheet_filters = SheetFilters::new();
        self.active_filters.clear();
        self.search = SearchQuery::default();
        self.search_input.clear();
        self.loading = true;
        SheetLoadTicket {
            generation: self.generation,
            sheet,
        }
    }

    /// Installs a finished load. Returns false, leaving the view untouched,
    /// when a newer load has started since `ticket` was issued.
    pub fn finish_sheet_load(&mut self, ticket: &SheetLoadTicket, payload: SheetPayload) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.dataset = payload.dataset;
        self.sheet_filters = payload.filters;
        self.loading = false;
        true
    }

    pub fn set_filter(&mut self, column: &str, value: Option<String>) {
        self.active_filters.set(column, value);
        let mut options =
            cascading_filter_options(&self.dataset, &self.active_filters, &self.sheet_filters);
        // the checker dropdown always lists every checker
        options.shift_remove(CHECKER_COLUMN);
        for column in reconcile_filters(&mut self.active_filters, &options) {
            warn!("filter on '{column}' no longer matches any row, showing all");
        }
    }

    pub fn set_search(&mut self, raw: &str) {
        self.search_input = raw.to_string();
        self.search = SearchQuery::new(raw);
    }

    pub fn filtered(&self) -> Dataset {
        apply_column_filters(&self.dataset, &self.active_filters)
    }

    pub fn visible(&self) -> Dataset {
        let filtered = self.filtered();
        apply_search(&filtered, &self.search).into_owned()
    }

    /// `Blank_Column` is kept even when empty; `checker` has its own column.
    pub fn rendered_columns(&self) -> Vec<(String, ColumnKind)> {
        self.dataset
            .column_names()
            .filter(|name| !name.is_empty() && *name != CHECKER_COLUMN)
            .filter_map(|name| {
                if name == BLANK_COLUMN {
                    Some((name.to_string(), ColumnKind::BlankColumn))
                } else if self.dataset.column_has_values(name) {
                    Some((name.to_string(), ColumnKind::Text))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn table(&self) -> TableModel {
        let options =
            cascading_filter_options(&self.dataset, &self.active_filters, &self.sheet_filters);
        let columns: Vec<TableColumn> = self
            .rendered_columns()
            .into_iter()
            .map(|(name, kind)| TableColumn {
                filter: FilterDropdown {
                    column: name.clone(),
                    options: options.get(&name).cloned().unwrap_or_default(),
                    selected: self.active_filters.get(&name).map(str::to_string),
                },
                name,
                kind,
            })
            .collect();

        let checker_filter = FilterDropdown {
            column: CHECKER_COLUMN.to_string(),
            options: self.checker_list.clone(),
            selected: self
                .active_filters
                .get(CHECKER_COLUMN)
                .map(str::to_string),
        };

        let visible = self.visible();
        let rows = (0..visible.row_count())
            .filter_map(|row| {
                let source_row = visible.source_row(row)?;
                let cells = columns
                    .iter()
                    .map(|column| visible.cell(&column.name, row).unwrap_or_default().to_string())
                    .collect();
                let checker = visible
                    .cell(CHECKER_COLUMN, row)
                    .filter(|value| !value.is_empty())
                    .unwrap_or(NOT_ASSIGNED)
                    .to_string();
                let row_id = visible
                    .cell(ID_COLUMN, row)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string);
                Some(TableRow {
                    source_row,
                    row_id,
                    cells,
                    checker,
                })
            })
            .collect();

        TableModel {
            columns,
            checker_filter,
            rows,
        }
    }

    pub fn checker_update(&self, source_row: usize, raw: &str) -> Option<CheckerUpdate> {
        let Some(row_id) = self
            .dataset
            .cell(ID_COLUMN, source_row)
            .filter(|id| !id.is_empty())
        else {
            warn!("row {source_row} has no {ID_COLUMN}; checker not saved");
            return None;
        };
        let update = CheckerUpdate::new(row_id, raw);
        if !self.checker_list.is_empty() && !self.checker_list.iter().any(|c| *c == update.checker)
        {
            warn!("'{}' is not in the checker list", update.checker);
        }
        Some(update)
    }

    pub fn blank_column_update(&self, source_row: usize, value: String) -> Option<BlankColumnUpdate> {
        let Some(sheet_name) = self.selected_sheet.clone() else {
            warn!("no sheet selected; {BLANK_COLUMN} not saved");
            return None;
        };
        Some(BlankColumnUpdate {
            sheet_name,
            row_index: source_row,
            new_value: value,
        })
    }

    /// Takes the checker draft for `source_row` and applies it to the dataset.
    /// Returns the update to send, or `None` when there is nothing to commit.
    pub fn commit_checker(
        &mut self,
        drafts: &mut StagedEdits,
        source_row: usize,
    ) -> Option<CheckerUpdate> {
        let draft = drafts.take(&CellKey::checker(source_row))?;
        let update = self.checker_update(source_row, &draft)?;
        self.record_checker(source_row, update.checker.clone());
        Some(update)
    }

    pub fn commit_blank_column(
        &mut self,
        drafts: &mut StagedEdits,
        source_row: usize,
    ) -> Option<BlankColumnUpdate> {
        let draft = drafts.take(&CellKey::blank_column(source_row))?;
        let update = self.blank_column_update(source_row, draft)?;
        self.record_blank_column(source_row, update.new_value.clone());
        Some(update)
    }

    pub fn record_checker(&mut self, source_row: usize, value: String) {
        self.dataset
            .set_cell_by_source(CHECKER_COLUMN, source_row, value);
    }

    pub fn record_blank_column(&mut self, source_row: usize, value: String) {
        self.dataset
            .set_cell_by_source(BLANK_COLUMN, source_row, value);
    }

    pub fn status_line(&self) -> String {
        match (&self.selected_sheet, self.loading) {
            (None, _) => "No sheet selected".to_string(),
            (Some(sheet), true) => format!("Loading {sheet}…"),
            (Some(sheet), false) => {
                let shown = self.visible().row_count();
                let total = self.dataset.row_count();
                if shown == total {
                    format!("{sheet}: {total} rows")
                } else {
                    format!("{sheet}: {shown} of {total} rows")
                }
            }
        }
    }
}
