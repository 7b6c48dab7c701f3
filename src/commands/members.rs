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
use crate::session::Session;
use crate::state;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, session, sub)?,
        Some(("add", sub)) => add(api, session, sub)?,
        Some(("remove", sub)) => remove(api, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let Some(members) = state::fetch_members(api, ledger_id)? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &members)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = members
        .iter()
        .map(|m| vec![m.user_id.to_string(), m.name.clone(), m.role.clone()])
        .collect();
    println!("{}", pretty_table(&["User ID", "Name", "Role"], rows));
    Ok(())
}

fn add(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let email = sub.get_one::<String>("email").unwrap();
    let role = sub.get_one::<String>("role").unwrap();

    let lookup = format!("/api/v1/user-lookup?email={}", urlencoding::encode(email));
    let Some(found) = api.get(&lookup)? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    let user = User::from_value(&found);
    if user.id == 0 {
        bail!("No user found for '{}'.", email);
    }

    let body = json!({ "user_id": user.id, "role": role });
    let path = format!("/api/v1/ledgers/{}/members", ledger_id);
    if api.post(&path, &body)?.is_none() {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    }
    println!("Added {} as {} (user id: {})", user.name, role, user.id);
    Ok(())
}

fn remove(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let user_id = *sub.get_one::<i64>("user-id").unwrap();
    let path = format!("/api/v1/ledgers/{}/members/{}", ledger_id, user_id);
    if api.delete(&path)?.is_none() {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    }
    println!("Removed member {}", user_id);
    Ok(())
}
