// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking HTTP transport for the shared-ledger service.
//!
//! Every response body is a `{ success, data, message }` envelope; callers
//! get the unwrapped `data`. A 401 clears the stored session and surfaces
//! as `Ok(None)` so command handlers can tell the user to log in again
//! instead of treating it as a transport failure.

use std::sync::Arc;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::session::Session;
use crate::utils::http_client;

pub const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },
    #[error("{0}")]
    Application(String),
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

pub struct ApiClient {
    base: String,
    http: Client,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<Session>) -> ApiResult<ApiClient> {
        let base = base_url.strip_suffix('/').unwrap_or(base_url).to_string();
        let http = http_client().map_err(|e| ApiError::Application(e.to_string()))?;
        Ok(ApiClient {
            base,
            http,
            session,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get(&self, path: &str) -> ApiResult<Option<Value>> {
        let url = format!("{}{}", self.base, path);
        debug!(%url, "GET");
        self.send(self.http.get(&url))
    }

    pub fn post(&self, path: &str, body: &Value) -> ApiResult<Option<Value>> {
        let url = format!("{}{}", self.base, path);
        debug!(%url, "POST");
        self.send(self.http.post(&url).body(body.to_string()))
    }

    pub fn delete(&self, path: &str) -> ApiResult<Option<Value>> {
        let url = format!("{}{}", self.base, path);
        debug!(%url, "DELETE");
        self.send(self.http.delete(&url))
    }

    fn send(&self, mut req: RequestBuilder) -> ApiResult<Option<Value>> {
        req = req.header("Content-Type", "application/json");
        if let Some(token) = self.session.token() {
            req = req.header(AUTH_HEADER, token);
        }
        let resp = req.send()?;
        let status = resp.status();

        if status.as_u16() == 401 {
            warn!("session expired, clearing stored credentials");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "failed to clear session file");
            }
            return Ok(None);
        }

        if status.as_u16() == 204 {
            return Ok(Some(Value::Null));
        }

        let body = resp.text().unwrap_or_default();

        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = serde_json::from_str(&body).map_err(|_| ApiError::RequestFailed {
            status: status.as_u16(),
            body: String::new(),
        })?;

        // Envelopes carry an explicit success flag; a missing flag means a
        // bare payload from an older service build.
        match envelope.get("success") {
            Some(Value::Bool(false)) => {
                let message = envelope
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .unwrap_or("Request failed")
                    .to_string();
                Err(ApiError::Application(message))
            }
            Some(_) => Ok(Some(
                envelope.get("data").cloned().unwrap_or(Value::Null),
            )),
            None => Ok(Some(envelope)),
        }
    }
}
