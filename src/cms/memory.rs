//! In-memory CMS.
//!
//! Serves canned payloads per endpoint. With no payloads configured it
//! behaves like an unreachable CMS, which is what `render --offline` uses to
//! produce the fallback-only site.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use super::{CmsClient, CmsRequest};
use crate::error::CmsError;

/// Canned-response implementation of [`CmsClient`].
#[derive(Debug, Default)]
pub struct MemoryCms {
    responses: HashMap<String, Value>,
    failing: HashSet<String>,
    reject_writes: Option<String>,
    // std::sync::Mutex: only held to push/clone, never across an await.
    requests: Mutex<Vec<CmsRequest>>,
    created: Mutex<Vec<(String, Value)>>,
}

impl MemoryCms {
    /// An empty CMS: every read fails with [`CmsError::Unavailable`].
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }

    /// Serves `body` for every read of `endpoint`.
    #[must_use]
    pub fn with_response(mut self, endpoint: &str, body: Value) -> Self {
        self.failing.remove(endpoint);
        self.responses.insert(endpoint.to_string(), body);
        self
    }

    /// Makes every read of `endpoint` fail with a 500.
    #[must_use]
    pub fn with_failure(mut self, endpoint: &str) -> Self {
        self.responses.remove(endpoint);
        self.failing.insert(endpoint.to_string());
        self
    }

    /// Makes every write fail with the given CMS error message.
    #[must_use]
    pub fn rejecting_writes(mut self, message: &str) -> Self {
        self.reject_writes = Some(message.to_string());
        self
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<CmsRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Entries created so far as `(endpoint, body)`.
    #[must_use]
    pub fn created(&self) -> Vec<(String, Value)> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl CmsClient for MemoryCms {
    async fn get(&self, request: &CmsRequest) -> Result<Value, CmsError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if self.failing.contains(&request.endpoint) {
            return Err(CmsError::HttpStatus {
                endpoint: request.endpoint.clone(),
                status: 500,
                message: Some("Internal Server Error".to_string()),
            });
        }
        self.responses
            .get(&request.endpoint)
            .cloned()
            .ok_or_else(|| CmsError::Unavailable(format!("no content for {}", request.endpoint)))
    }

    async fn create(&self, endpoint: &str, body: &Value) -> Result<Value, CmsError> {
        if let Some(message) = &self.reject_writes {
            return Err(CmsError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: 400,
                message: Some(message.clone()),
            });
        }
        let mut created = self.created.lock().unwrap_or_else(PoisonError::into_inner);
        created.push((endpoint.to_string(), body.clone()));
        let id = created.len();
        drop(created);

        let mut entry = body.get("data").cloned().unwrap_or(Value::Null);
        if let Value::Object(map) = &mut entry {
            map.insert("id".to_string(), Value::from(id));
        }
        Ok(serde_json::json!({ "data": entry, "meta": {} }))
    }
}
