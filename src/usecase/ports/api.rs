use crate::domain::entities::dataset::{Dataset, SheetFilters};
use crate::domain::entities::edit::{BlankColumnUpdate, CheckerUpdate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

#[allow(async_fn_in_trait)]
pub trait TrackerApi {
    async fn list_sheets(&self) -> Result<Vec<String>, ApiError>;
    async fn sheet_data(&self, sheet: &str) -> Result<Dataset, ApiError>;
    async fn sheet_filters(&self, sheet: &str) -> Result<SheetFilters, ApiError>;
    async fn checker_list(&self) -> Result<Vec<String>, ApiError>;

    async fn update_checker(&self, update: &CheckerUpdate) -> Result<(), ApiError>;
    async fn update_blank_column(&self, update: &BlankColumnUpdate) -> Result<(), ApiError>;
}
