// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side view of the selected ledger and the refresh machinery
//! that keeps it current.
//!
//! Each refresh is stamped with a generation number taken when it was
//! issued. Applying a leg's result checks the stamp against the live
//! counter, so a refresh that was overtaken by a newer selection is
//! discarded instead of clobbering fresher data.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::{
    AnalyticsSnapshot, BudgetStatusItem, Ledger, LedgerMeta, Member, Transaction,
};

#[derive(Debug, Clone, Default)]
pub struct TxnFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub txn_type: Option<String>,
}

impl TxnFilter {
    /// Render the filter as a query string. Dates expand to full-day
    /// bounds; values go through percent encoding.
    pub fn query(&self) -> String {
        let mut q = String::from("page=1&size=200");
        if let Some(from) = self.from {
            q.push_str("&from=");
            q.push_str(&urlencoding::encode(&format!("{}T00:00:00", from)));
        }
        if let Some(to) = self.to {
            q.push_str("&to=");
            q.push_str(&urlencoding::encode(&format!("{}T23:59:59", to)));
        }
        if let Some(t) = &self.txn_type {
            q.push_str("&type=");
            q.push_str(&urlencoding::encode(t));
        }
        q
    }
}

fn items_of(v: &Value) -> &[Value] {
    const EMPTY: &[Value] = &[];
    if let Value::Array(items) = v {
        return items;
    }
    for key in ["items", "content"] {
        if let Some(Value::Array(items)) = v.get(key) {
            return items;
        }
    }
    EMPTY
}

pub fn fetch_ledgers(api: &ApiClient) -> ApiResult<Option<Vec<Ledger>>> {
    let Some(data) = api.get("/api/v1/ledgers/mine")? else {
        return Ok(None);
    };
    Ok(Some(items_of(&data).iter().map(Ledger::from_value).collect()))
}

pub fn fetch_meta(api: &ApiClient, ledger_id: i64) -> ApiResult<Option<LedgerMeta>> {
    let Some(data) = api.get(&format!("/api/v1/ledgers/{}", ledger_id))? else {
        return Ok(None);
    };
    Ok(Some(LedgerMeta::from_value(&data)))
}

pub fn fetch_members(api: &ApiClient, ledger_id: i64) -> ApiResult<Option<Vec<Member>>> {
    let Some(data) = api.get(&format!("/api/v1/ledgers/{}/members", ledger_id))? else {
        return Ok(None);
    };
    Ok(Some(items_of(&data).iter().map(Member::from_value).collect()))
}

pub fn fetch_transactions(
    api: &ApiClient,
    ledger_id: i64,
    filter: &TxnFilter,
) -> ApiResult<Option<Vec<Transaction>>> {
    let path = format!(
        "/api/v1/ledgers/{}/transactions?{}",
        ledger_id,
        filter.query()
    );
    let Some(data) = api.get(&path)? else {
        return Ok(None);
    };
    Ok(Some(
        items_of(&data).iter().map(Transaction::from_value).collect(),
    ))
}

pub fn fetch_analytics(
    api: &ApiClient,
    ledger_id: i64,
    months: u32,
) -> ApiResult<Option<AnalyticsSnapshot>> {
    let path = format!(
        "/api/v1/ledgers/{}/analytics/overview?months={}",
        ledger_id, months
    );
    let Some(data) = api.get(&path)? else {
        return Ok(None);
    };
    Ok(Some(AnalyticsSnapshot::from_value(&data)))
}

pub fn fetch_budget_status(
    api: &ApiClient,
    ledger_id: i64,
    year: i32,
    month: u32,
) -> ApiResult<Option<Vec<BudgetStatusItem>>> {
    let path = format!(
        "/api/v1/ledgers/{}/budgets/status?year={}&month={}",
        ledger_id, year, month
    );
    let Some(data) = api.get(&path)? else {
        return Ok(None);
    };
    Ok(Some(
        items_of(&data)
            .iter()
            .map(BudgetStatusItem::from_value)
            .collect(),
    ))
}

/// Stamp handed out when a refresh is issued; apply calls present it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    pub ledger_id: i64,
}

#[derive(Default)]
pub struct LedgerState {
    generation: u64,
    pub current_ledger: Option<i64>,
    pub ledgers: Vec<Ledger>,
    pub meta: LedgerMeta,
    pub members: Vec<Member>,
    pub transactions: Vec<Transaction>,
    pub analytics: Option<AnalyticsSnapshot>,
    pub budget_status: Vec<BudgetStatusItem>,
}

impl LedgerState {
    pub fn new() -> LedgerState {
        LedgerState::default()
    }

    /// Start a refresh for `ledger_id`, invalidating every ticket issued
    /// before this one.
    pub fn begin_refresh(&mut self, ledger_id: i64) -> RefreshTicket {
        self.generation += 1;
        self.current_ledger = Some(ledger_id);
        RefreshTicket {
            generation: self.generation,
            ledger_id,
        }
    }

    fn ticket_live(&self, ticket: RefreshTicket) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                live = self.generation,
                "discarding stale refresh result"
            );
            return false;
        }
        true
    }

    pub fn apply_meta(&mut self, ticket: RefreshTicket, meta: LedgerMeta) -> bool {
        if !self.ticket_live(ticket) {
            return false;
        }
        self.meta = meta;
        true
    }

    pub fn apply_members(&mut self, ticket: RefreshTicket, members: Vec<Member>) -> bool {
        if !self.ticket_live(ticket) {
            return false;
        }
        self.members = members;
        true
    }

    pub fn apply_transactions(&mut self, ticket: RefreshTicket, txns: Vec<Transaction>) -> bool {
        if !self.ticket_live(ticket) {
            return false;
        }
        self.transactions = txns;
        true
    }

    pub fn apply_analytics(&mut self, ticket: RefreshTicket, snap: AnalyticsSnapshot) -> bool {
        if !self.ticket_live(ticket) {
            return false;
        }
        self.analytics = Some(snap);
        true
    }

    pub fn apply_budget_status(
        &mut self,
        ticket: RefreshTicket,
        items: Vec<BudgetStatusItem>,
    ) -> bool {
        if !self.ticket_live(ticket) {
            return false;
        }
        self.budget_status = items;
        true
    }

    /// Select a ledger and refresh its meta, members, and transactions in
    /// parallel. A failed leg logs a warning and keeps the previous data
    /// for that slice; the other legs still apply.
    pub fn select_ledger(&mut self, api: &ApiClient, ledger_id: i64) -> ApiResult<()> {
        let ticket = self.begin_refresh(ledger_id);
        let filter = TxnFilter::default();

        let (meta, members, txns) = std::thread::scope(|s| {
            let meta = s.spawn(|| fetch_meta(api, ledger_id));
            let members = s.spawn(|| fetch_members(api, ledger_id));
            let txns = s.spawn(|| fetch_transactions(api, ledger_id, &filter));
            (join_leg(meta), join_leg(members), join_leg(txns))
        });

        match meta {
            Ok(Some(m)) => {
                self.apply_meta(ticket, m);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "ledger meta refresh failed"),
        }
        match members {
            Ok(Some(m)) => {
                self.apply_members(ticket, m);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "member refresh failed"),
        }
        match txns {
            Ok(Some(t)) => {
                self.apply_transactions(ticket, t);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "transaction refresh failed"),
        }
        Ok(())
    }

    /// Load the ledger list. Keeps a previously selected ledger when it is
    /// still in the list, otherwise selects the first one.
    pub fn load_ledgers(
        &mut self,
        api: &ApiClient,
        previous: Option<i64>,
    ) -> ApiResult<Option<i64>> {
        let Some(ledgers) = fetch_ledgers(api)? else {
            return Ok(None);
        };
        self.ledgers = ledgers;

        let selected = previous
            .filter(|id| self.ledgers.iter().any(|l| l.id == *id))
            .or_else(|| self.ledgers.first().map(|l| l.id));

        if let Some(id) = selected {
            self.select_ledger(api, id)?;
        }
        Ok(selected)
    }
}

fn join_leg<T>(
    handle: std::thread::ScopedJoinHandle<'_, ApiResult<T>>,
) -> ApiResult<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(ApiError::Application("refresh worker panicked".to_string())))
}
