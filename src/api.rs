//! REST client for the vendor backend.
//!
//! One method per endpoint. Transport failures and non-success statuses
//! collapse into a single [`ApiError::Failed`] carrying the message shown to
//! the user; the distinction is deliberately not preserved. Fetching a
//! single vendor maps any failure to [`ApiError::NotFound`], which the edit
//! view treats as terminal.

use std::time::Duration;

use color_eyre::eyre::Result;
use thiserror::Error;
use tracing::debug;

use crate::vendor::{Vendor, VendorDraft, VendorId};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Vendor not found")]
    NotFound,

    #[error("{message}")]
    Failed {
        message: &'static str,
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl ApiError {
    fn failed(message: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Failed {
            message,
            source: Some(source),
        }
    }

    fn status(message: &'static str) -> Self {
        Self::Failed {
            message,
            source: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VendorClient {
    http: reqwest::Client,
    base_url: String,
}

impl VendorClient {
    /// `base_url` is the collection root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/vendors", self.base_url)
    }

    fn item_url(&self, id: VendorId) -> String {
        format!("{}/vendors/{id}", self.base_url)
    }

    pub async fn list(&self) -> Result<Vec<Vendor>, ApiError> {
        let message = "Failed to load vendors.";
        debug!("GET {}", self.collection_url());
        let res = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(ApiError::failed(message))?;
        if !res.status().is_success() {
            return Err(ApiError::status(message));
        }
        res.json().await.map_err(ApiError::failed(message))
    }

    pub async fn get(&self, id: VendorId) -> Result<Vendor, ApiError> {
        debug!("GET {}", self.item_url(id));
        let res = self
            .http
            .get(self.item_url(id))
            .send()
            .await
            .map_err(|_| ApiError::NotFound)?;
        if !res.status().is_success() {
            return Err(ApiError::NotFound);
        }
        res.json().await.map_err(|_| ApiError::NotFound)
    }

    /// POSTs a draft; the server assigns the id and returns the stored record.
    pub async fn create(&self, draft: &VendorDraft) -> Result<Vendor, ApiError> {
        let message = "Failed to add vendor.";
        debug!("POST {}", self.collection_url());
        let res = self
            .http
            .post(self.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(ApiError::failed(message))?;
        if !res.status().is_success() {
            return Err(ApiError::status(message));
        }
        res.json().await.map_err(ApiError::failed(message))
    }

    /// Whole-record replace, not a partial patch.
    pub async fn update(&self, id: VendorId, draft: VendorDraft) -> Result<Vendor, ApiError> {
        let message = "Failed to update vendor.";
        let body = Vendor::from_draft(id, draft);
        debug!("PUT {}", self.item_url(id));
        let res = self
            .http
            .put(self.item_url(id))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::failed(message))?;
        if !res.status().is_success() {
            return Err(ApiError::status(message));
        }
        res.json().await.map_err(ApiError::failed(message))
    }

    pub async fn delete(&self, id: VendorId) -> Result<(), ApiError> {
        let message = "Failed to delete vendor.";
        debug!("DELETE {}", self.item_url(id));
        let res = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(ApiError::failed(message))?;
        if !res.status().is_success() {
            return Err(ApiError::status(message));
        }
        Ok(())
    }
}
