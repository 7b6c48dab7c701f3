// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8081";
pub const API_URL_ENV: &str = "LEDGERCLIP_API_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// Resolve the API base URL: command-line flag, then environment,
    /// then the built-in default.
    pub fn resolve(flag: Option<&str>) -> Config {
        let api_url = flag
            .map(str::to_string)
            .or_else(|| env::var(API_URL_ENV).ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Config { api_url }
    }
}
