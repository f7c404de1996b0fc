use std::borrow::Cow;
use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};

use crate::domain::entities::dataset::{Dataset, SheetFilters};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilters {
    by_column: BTreeMap<String, String>,
}

impl ActiveFilters {
    pub fn set(&mut self, column: &str, value: Option<String>) {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.by_column.insert(column.to_string(), value);
            }
            None => {
                self.by_column.remove(column);
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.by_column.get(column).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_column.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_column
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }

    fn row_matches(&self, dataset: &Dataset, row: usize, skip_column: Option<&str>) -> bool {
        self.iter()
            .filter(|(column, _)| Some(*column) != skip_column)
            .all(|(column, value)| dataset.cell(column, row) == Some(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches_row(&self, dataset: &Dataset, row: usize) -> bool {
        dataset
            .row_cells(row)
            .any(|cell| cell.unwrap_or_default().to_lowercase().contains(&self.0))
    }
}

pub fn apply_column_filters(dataset: &Dataset, filters: &ActiveFilters) -> Dataset {
    let rows: Vec<usize> = (0..dataset.row_count())
        .filter(|&row| filters.row_matches(dataset, row, None))
        .collect();
    dataset.select_rows(&rows)
}

pub fn apply_search<'a>(dataset: &'a Dataset, query: &SearchQuery) -> Cow<'a, Dataset> {
    if query.is_empty() {
        return Cow::Borrowed(dataset);
    }
    let rows: Vec<usize> = (0..dataset.row_count())
        .filter(|&row| query.matches_row(dataset, row))
        .collect();
    Cow::Owned(dataset.select_rows(&rows))
}

pub fn recompute_filter_options(filtered: &Dataset) -> IndexMap<String, Vec<String>> {
    filtered
        .column_names()
        .map(|column| {
            let values: IndexSet<&str> = (0..filtered.row_count())
                .filter_map(|row| filtered.cell(column, row))
                .filter(|value| !value.is_empty())
                .collect();
            (
                column.to_string(),
                values.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}

/// A column's candidates come from `sheet_filters`, or from `dataset` when the
/// server sent none, and survive only if a row matching every other filter
/// holds them.
pub fn cascading_filter_options(
    dataset: &Dataset,
    filters: &ActiveFilters,
    sheet_filters: &SheetFilters,
) -> IndexMap<String, Vec<String>> {
    let full_values = recompute_filter_options(dataset);

    dataset
        .column_names()
        .map(|column| {
            let reachable: IndexSet<&str> = (0..dataset.row_count())
                .filter(|&row| filters.row_matches(dataset, row, Some(column)))
                .filter_map(|row| dataset.cell(column, row))
                .filter(|value| !value.is_empty())
                .collect();

            let candidates = sheet_filters
                .get(column)
                .filter(|values| !values.is_empty())
                .or_else(|| full_values.get(column));

            let options: Vec<String> = candidates
                .map(|values| {
                    let mut seen = IndexSet::new();
                    values
                        .iter()
                        .filter(|value| reachable.contains(value.as_str()))
                        .filter(|value| seen.insert(value.as_str()))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            (column.to_string(), options)
        })
        .collect()
}

pub fn reconcile_filters(
    filters: &mut ActiveFilters,
    options: &IndexMap<String, Vec<String>>,
) -> Vec<String> {
    let stale: Vec<String> = filters
        .iter()
        .filter(|(column, value)| {
            options
                .get(*column)
                .is_some_and(|values| !values.iter().any(|v| v == value))
        })
        .map(|(column, _)| column.to_string())
        .collect();
    for column in &stale {
        filters.set(column, None);
    }
    stale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dataset::cell_from_json;
    use serde_json::json;

    fn dataset(columns: &[(&str, serde_json::Value)]) -> Dataset {
        let mut map = IndexMap::new();
        for (name, values) in columns {
            let cells = values
                .as_array()
                .expect("fixture column should be an array")
                .iter()
                .cloned()
                .map(cell_from_json)
                .collect();
            map.insert(name.to_string(), cells);
        }
        Dataset::from_columns(map)
    }

    #[test]
    fn column_filter_keeps_matching_rows_only() {
        let data = dataset(&[("Country", json!(["US", "FR"])), ("ID", json!([1, 2]))]);
        let mut filters = ActiveFilters::default();
        filters.set("Country", Some("US".to_string()));

        let filtered = apply_column_filters(&data, &filters);

        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.column_count(), 2);
        assert_eq!(filtered.cell("Country", 0), Some("US"));
        assert_eq!(filtered.cell("ID", 0), Some("1"));
        assert_eq!(filtered.source_row(0), Some(0));
    }

    #[test]
    fn column_filters_combine_with_and() {
        let data = dataset(&[
            ("Country", json!(["US", "US", "FR"])),
            ("Priority", json!(["High", "Low", "High"])),
        ]);
        let mut filters = ActiveFilters::default();
        filters.set("Country", Some("US".to_string()));
        filters.set("Priority", Some("High".to_string()));

        let filtered = apply_column_filters(&data, &filters);

        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.source_row(0), Some(0));
    }

    #[test]
    fn filter_on_unknown_column_matches_nothing() {
        let data = dataset(&[("Country", json!(["US", "FR"]))]);
        let mut filters = ActiveFilters::default();
        filters.set("Region", Some("EU".to_string()));

        assert_eq!(apply_column_filters(&data, &filters).row_count(), 0);
    }

    #[test]
    fn empty_filter_value_clears_column() {
        let mut filters = ActiveFilters::default();
        filters.set("Country", Some("US".to_string()));
        filters.set("Country", Some(String::new()));

        assert!(filters.is_empty());
    }

    #[test]
    fn empty_search_returns_input_unchanged() {
        let data = dataset(&[("Country", json!(["US", "FR"]))]);

        let searched = apply_search(&data, &SearchQuery::new("   "));

        assert!(matches!(searched, Cow::Borrowed(_)));
        assert_eq!(&*searched, &data);
    }

    #[test]
    fn search_is_case_insensitive_across_columns() {
        let data = dataset(&[("Country", json!(["US", "FR"])), ("ID", json!([1, 2]))]);

        let searched = apply_search(&data, &SearchQuery::new("fr"));

        assert_eq!(searched.row_count(), 1);
        assert_eq!(searched.cell("Country", 0), Some("FR"));
        assert_eq!(searched.source_row(0), Some(1));
    }

    #[test]
    fn search_skips_null_cells() {
        let data = dataset(&[("Notes", json!([null, "urgent"]))]);

        let searched = apply_search(&data, &SearchQuery::new("URG"));

        assert_eq!(searched.row_count(), 1);
        assert_eq!(searched.source_row(0), Some(1));
    }

    #[test]
    fn recompute_options_deduplicates_and_drops_blanks() {
        let data = dataset(&[("Country", json!(["US", "", "US", null, "FR"]))]);

        let options = recompute_filter_options(&data);

        assert_eq!(options["Country"], vec!["US".to_string(), "FR".to_string()]);
    }

    #[test]
    fn cascading_options_ignore_own_column_filter() {
        let data = dataset(&[
            ("Country", json!(["US", "US", "FR"])),
            ("Priority", json!(["High", "Low", "Low"])),
        ]);
        let mut filters = ActiveFilters::default();
        filters.set("Country", Some("US".to_string()));

        let options = cascading_filter_options(&data, &filters, &SheetFilters::new());

        assert_eq!(options["Country"], vec!["US".to_string(), "FR".to_string()]);
        assert_eq!(options["Priority"], vec!["High".to_string(), "Low".to_string()]);

        filters.set("Priority", Some("High".to_string()));
        let options = cascading_filter_options(&data, &filters, &SheetFilters::new());
        assert_eq!(options["Country"], vec!["US".to_string()]);
    }

    #[test]
    fn cascading_options_follow_server_order_and_stay_within_it() {
        let data = dataset(&[("Country", json!(["US", "FR", "DE"]))]);
        let mut sheet_filters = SheetFilters::new();
        sheet_filters.insert(
            "Country".to_string(),
            vec!["FR".to_string(), "US".to_string()],
        );

        let options = cascading_filter_options(&data, &ActiveFilters::default(), &sheet_filters);

        assert_eq!(options["Country"], vec!["FR".to_string(), "US".to_string()]);
    }

    #[test]
    fn reconcile_drops_unreachable_selection() {
        let mut filters = ActiveFilters::default();
        filters.set("Country", Some("US".to_string()));
        filters.set("Priority", Some("High".to_string()));
        let mut options = IndexMap::new();
        options.insert("Country".to_string(), vec!["FR".to_string()]);
        options.insert("Priority".to_string(), vec!["High".to_string()]);

        let dropped = reconcile_filters(&mut filters, &options);

        assert_eq!(dropped, vec!["Country".to_string()]);
        assert_eq!(filters.get("Country"), None);
        assert_eq!(filters.get("Priority"), Some("High"));
    }
}
