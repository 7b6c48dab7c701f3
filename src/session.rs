// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistent session: the access token and the currently selected ledger,
//! stored as a small JSON file in the platform data directory.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Ledgerclip", "ledgerclip"));

pub fn session_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("session.json"))
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ledger_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_ledger: Option<i64>,
}

pub struct Session {
    path: PathBuf,
    inner: Mutex<SessionFile>,
}

impl Session {
    pub fn open_default() -> Result<Session> {
        Ok(Session::open_at(session_path()?))
    }

    /// Open a session backed by `path`, starting empty when the file is
    /// absent or unreadable.
    pub fn open_at(path: PathBuf) -> Session {
        let inner = fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        Session {
            path,
            inner: Mutex::new(inner),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner.lock().unwrap().ledger_access_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }

    pub fn store_token(&self, token: &str) -> Result<()> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.ledger_access_token = Some(token.to_string());
        }
        self.save()
    }

    /// Drop both the token and the ledger selection. Used on logout and on
    /// a 401 from the service.
    pub fn clear(&self) -> Result<()> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.ledger_access_token = None;
            inner.current_ledger = None;
        }
        self.save()
    }

    pub fn current_ledger(&self) -> Option<i64> {
        self.inner.lock().unwrap().current_ledger
    }

    pub fn set_current_ledger(&self, id: i64) -> Result<()> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.current_ledger = Some(id);
        }
        self.save()
    }

    pub fn require_current_ledger(&self) -> Result<i64> {
        self.current_ledger()
            .context("No ledger selected. Run 'ledgerclip ledgers use <id>' first.")
    }

    fn save(&self) -> Result<()> {
        let body = {
            let inner = self.inner.lock().unwrap();
            serde_json::to_string_pretty(&*inner)?
        };
        fs::write(&self.path, body)
            .with_context(|| format!("Write session file {}", self.path.display()))
    }
}

/// Pull the access token out of a login response. The service has shipped
/// all of `access_token`, `accessToken`, `token`, and a bare string body.
pub fn extract_token(v: &Value) -> Option<String> {
    for key in ["access_token", "accessToken", "token"] {
        if let Some(Value::String(s)) = v.get(key) {
            if !s.is_empty() {
                return Some(s.clone());
            }
        }
    }
    if let Value::String(s) = v {
        if !s.is_empty() {
            return Some(s.clone());
        }
    }
    None
}
