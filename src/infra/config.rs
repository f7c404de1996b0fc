use anyhow::{Context, Result};
use reqwest::Url;

pub const API_BASE_ENV: &str = "TRACKER_API_BASE";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        let base_url = Url::parse(&normalized)
            .with_context(|| format!("invalid backend url: {trimmed}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("backend url cannot carry paths: {trimmed}");
        }
        Ok(Self { base_url })
    }

    /// The page's own origin: the backend serves the page and the API.
    #[cfg(target_arch = "wasm32")]
    pub fn from_environment() -> Result<Self> {
        let window = web_sys::window().context("no browser window available")?;
        let origin = window
            .location()
            .origin()
            .map_err(|_| anyhow::anyhow!("unable to read page origin"))?;
        Self::parse(&origin)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_environment() -> Result<Self> {
        let raw = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::parse(&raw)
    }
}
