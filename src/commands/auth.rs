// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use serde_json::json;

use crate::api::ApiClient;
use crate::commands::SESSION_EXPIRED;
use crate::models::User;
use crate::session::{extract_token, Session};

pub fn login(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    do_login(api, session, email, password)
}

fn do_login(api: &ApiClient, session: &Session, email: &str, password: &str) -> Result<()> {
    let body = json!({ "email": email, "password": password });
    let Some(data) = api.post("/api/v1/auth/login", &body)? else {
        bail!("Login rejected: check your email and password.");
    };
    let Some(token) = extract_token(&data) else {
        bail!("Login response carried no access token.");
    };
    session.store_token(&token)?;
    println!("Logged in as {}", email);
    Ok(())
}

pub fn register(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();

    let body = json!({ "name": name, "email": email, "password": password });
    if api.post("/api/v1/auth/register", &body)?.is_none() {
        bail!("Registration rejected.");
    }
    println!("Registered {}", email);
    do_login(api, session, email, password)
}

pub fn logout(session: &Session) -> Result<()> {
    session.clear()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(api: &ApiClient) -> Result<()> {
    let Some(data) = api.get("/api/v1/users/me")? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    let user = User::from_value(&data);
    let name = if user.name.is_empty() {
        format!("User {}", user.id)
    } else {
        user.name
    };
    if user.email.is_empty() {
        println!("{} (id: {})", name, user.id);
    } else {
        println!("{} <{}> (id: {})", name, user.email, user.id);
    }
    Ok(())
}
