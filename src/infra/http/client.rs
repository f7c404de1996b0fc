use indexmap::IndexMap;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::dataset::{cell_from_json, Dataset, SheetFilters};
use crate::domain::entities::edit::{BlankColumnUpdate, CheckerUpdate};
use crate::infra::config::ApiConfig;
use crate::infra::http::endpoints;
use crate::usecase::ports::api::{ApiError, TrackerApi};

/// Error bodies the backend sends: `{"error": ..}` from the checker route,
/// `{"status": "error", "message": ..}` from the blank column route.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpTrackerApi {
    client: Client,
    base_url: Url,
}

impl HttpTrackerApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let response = ensure_success(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<(), ApiError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        ensure_success(response).await.map(|_| ())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(&text),
    })
}

pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.or(parsed.message))
        .unwrap_or_else(|| body.trim().to_string())
}

pub(crate) fn decode_filters(raw: IndexMap<String, Vec<Value>>) -> SheetFilters {
    raw.into_iter()
        .map(|(column, values)| {
            let values = values.into_iter().filter_map(cell_from_json).collect();
            (column, values)
        })
        .collect()
}

impl TrackerApi for HttpTrackerApi {
    async fn list_sheets(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(endpoints::sheets(&self.base_url)?).await
    }

    async fn sheet_data(&self, sheet: &str) -> Result<Dataset, ApiError> {
        let raw: IndexMap<String, Vec<Value>> = self
            .get_json(endpoints::sheet_data(&self.base_url, sheet)?)
            .await?;
        Ok(Dataset::from_json_columns(raw))
    }

    async fn sheet_filters(&self, sheet: &str) -> Result<SheetFilters, ApiError> {
        let raw: IndexMap<String, Vec<Value>> = self
            .get_json(endpoints::sheet_filters(&self.base_url, sheet)?)
            .await?;
        Ok(decode_filters(raw))
    }

    async fn checker_list(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(endpoints::checker_list(&self.base_url)?).await
    }

    async fn update_checker(&self, update: &CheckerUpdate) -> Result<(), ApiError> {
        let url = endpoints::update_checker(&self.base_url, &update.row_id)?;
        self.post_json(url, &update.body()).await
    }

    async fn update_blank_column(&self, update: &BlankColumnUpdate) -> Result<(), ApiError> {
        let url = endpoints::update_blank_column(&self.base_url)?;
        self.post_json(url, update).await
    }
}
