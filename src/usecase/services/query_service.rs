use std::rc::Rc;

use dioxus::logger::tracing::{error, info};

use crate::domain::entities::dataset::{Dataset, SheetFilters};
use crate::usecase::ports::api::TrackerApi;

/// Everything fetched for one sheet. Parts that failed to load are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetPayload {
    pub dataset: Dataset,
    pub filters: SheetFilters,
}

pub struct QueryService<A> {
    api: Rc<A>,
}

impl<A: TrackerApi> QueryService<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self { api }
    }

    pub async fn list_sheets(&self) -> Vec<String> {
        match self.api.list_sheets().await {
            Ok(sheets) => {
                info!("loaded {} sheets", sheets.len());
                sheets
            }
            Err(err) => {
                error!("error loading sheets: {err}");
                Vec::new()
            }
        }
    }

    pub async fn load_checker_list(&self) -> Vec<String> {
        match self.api.checker_list().await {
            Ok(checkers) => {
                info!("loaded checker list ({} names)", checkers.len());
                checkers
            }
            Err(err) => {
                error!("error loading checker list: {err}");
                Vec::new()
            }
        }
    }

    pub async fn load_sheet(&self, sheet: &str) -> SheetPayload {
        let dataset = match self.api.sheet_data(sheet).await {
            Ok(dataset) => dataset,
            Err(err) => {
                error!("error loading sheet data for '{sheet}': {err}");
                Dataset::default()
            }
        };

        let filters = match self.api.sheet_filters(sheet).await {
            Ok(filters) => filters,
            Err(err) => {
                error!("error loading filters for '{sheet}': {err}");
                SheetFilters::new()
            }
        };

        SheetPayload { dataset, filters }
    }
}
