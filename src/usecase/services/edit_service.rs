use std::rc::Rc;

use dioxus::logger::tracing::{error, info};

use crate::domain::entities::edit::{BlankColumnUpdate, CheckerUpdate};
use crate::usecase::ports::api::TrackerApi;

/// Each call is a single POST. Failures are logged, not retried.
pub struct EditService<A> {
    api: Rc<A>,
}

impl<A: TrackerApi> EditService<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self { api }
    }

    pub async fn save_checker(&self, update: CheckerUpdate) {
        match self.api.update_checker(&update).await {
            Ok(()) => info!(
                "checker updated for project {}: {}",
                update.row_id, update.checker
            ),
            Err(err) => error!("failed to update checker for project {}: {err}", update.row_id),
        }
    }

    pub async fn update_blank_column(&self, update: BlankColumnUpdate) {
        match self.api.update_blank_column(&update).await {
            Ok(()) => info!(
                "blank column updated for sheet '{}', row {}",
                update.sheet_name, update.row_index
            ),
            Err(err) => error!(
                "failed to update blank column for sheet '{}', row {}: {err}",
                update.sheet_name, update.row_index
            ),
        }
    }
}
