use reqwest::Url;

use crate::usecase::ports::api::ApiError;

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::Endpoint(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub fn sheets(base: &Url) -> Result<Url, ApiError> {
    endpoint(base, &["sheets"])
}

pub fn sheet_data(base: &Url, sheet: &str) -> Result<Url, ApiError> {
    endpoint(base, &["data", sheet])
}

pub fn sheet_filters(base: &Url, sheet: &str) -> Result<Url, ApiError> {
    endpoint(base, &["filters", sheet])
}

pub fn checker_list(base: &Url) -> Result<Url, ApiError> {
    endpoint(base, &["checker_list"])
}

pub fn update_checker(base: &Url, row_id: &str) -> Result<Url, ApiError> {
    endpoint(base, &["update_checker", row_id])
}

pub fn update_blank_column(base: &Url) -> Result<Url, ApiError> {
    endpoint(base, &["update-blank-column"])
}

pub fn project_page(base: &Url, row_id: &str) -> Result<Url, ApiError> {
    endpoint(base, &["project", row_id])
}
