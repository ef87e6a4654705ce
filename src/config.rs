use crate::error::{NeuronError, Result};
use reqwest::Url;
use std::path::PathBuf;

pub const DEFAULT_CHECKOUT_SCRIPT: &str = "https://checkout.razorpay.com/v1/checkout.js";
pub const DEFAULT_STORAGE_PATH: &str = ".neuron/local_storage.json";

/// Runtime settings for the client, resolved from flags and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    backend_url: Url,
    pub storage_path: PathBuf,
    pub checkout_script: Url,
}

impl ClientConfig {
    pub fn new(backend_url: &str, storage_path: PathBuf, checkout_script: &str) -> Result<Self> {
        Ok(Self {
            backend_url: parse_http_url("backend URL", backend_url)?,
            storage_path,
            checkout_script: parse_http_url("checkout script URL", checkout_script)?,
        })
    }

    pub fn backend_url(&self) -> &Url {
        &self.backend_url
    }

    /// Root every REST endpoint hangs off, without a trailing slash.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.backend_url.as_str().trim_end_matches('/'))
    }
}

fn parse_http_url(what: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| NeuronError::ConfigError(format!("invalid {what} '{value}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(NeuronError::ConfigError(format!(
            "{what} must use http or https, got '{scheme}'"
        ))),
    }
}
