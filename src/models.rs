// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Canonical typed views over the service's JSON payloads.
//!
//! Each `from_value` constructor is total: it never fails on shape drift,
//! it just falls back field by field through the readers in [`normalize`].

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::normalize::{self, Scalar};

#[derive(Debug, Clone, Serialize)]
pub struct Ledger {
    pub id: i64,
    pub name: String,
    pub ledger_type: String,
    pub base_currency: String,
    pub role: Option<String>,
}

impl Ledger {
    pub fn from_value(v: &Value) -> Ledger {
        Ledger {
            id: normalize::int(v, "ledger_id", "ledgerId")
                .or_else(|| normalize::int(v, "id", "id"))
                .unwrap_or_default(),
            name: normalize::string(v, "name", "name").unwrap_or_default(),
            ledger_type: normalize::string(v, "ledger_type", "ledgerType").unwrap_or_default(),
            base_currency: normalize::string(v, "base_currency", "baseCurrency")
                .unwrap_or_default(),
            role: normalize::string(v, "role", "role"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub user_id: i64,
    pub name: String,
    pub role: String,
}

impl Member {
    pub fn from_value(v: &Value) -> Member {
        Member {
            user_id: normalize::int(v, "user_id", "userId").unwrap_or_default(),
            name: normalize::string(v, "name", "userName").unwrap_or_default(),
            role: normalize::string(v, "role", "role").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: String,
}

impl Category {
    pub fn from_value(v: &Value) -> Category {
        Category {
            id: normalize::int(v, "id", "id").unwrap_or_default(),
            name: normalize::string(v, "name", "name").unwrap_or_default(),
            kind: normalize::string(v, "kind", "kind").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LedgerMeta {
    pub ledger_type: String,
    pub base_currency: String,
    pub role: Option<String>,
    pub categories: Vec<Category>,
}

impl LedgerMeta {
    pub fn from_value(v: &Value) -> LedgerMeta {
        LedgerMeta {
            ledger_type: normalize::string(v, "ledger_type", "ledgerType").unwrap_or_default(),
            base_currency: normalize::string(v, "base_currency", "baseCurrency")
                .unwrap_or_default(),
            role: normalize::string(v, "role", "role"),
            categories: normalize::array(v, "categories", "categories")
                .iter()
                .map(Category::from_value)
                .collect(),
        }
    }

    pub fn summary(&self) -> String {
        let mut s = format!("{} • {}", self.ledger_type, self.base_currency);
        if let Some(role) = &self.role {
            s.push_str(&format!(" • Role: {}", role));
        }
        s
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub txn_at: Option<String>,
    pub txn_type: String,
    pub currency: String,
    pub amount_total: Scalar,
    pub payer_id: Option<i64>,
    pub category_id: Option<i64>,
    pub created_by: Option<i64>,
    pub note: Option<String>,
}

impl Transaction {
    pub fn from_value(v: &Value) -> Transaction {
        Transaction {
            id: normalize::int(v, "transaction_id", "transactionId")
                .or_else(|| normalize::int(v, "id", "id"))
                .unwrap_or_default(),
            txn_at: normalize::canon_datetime(normalize::pick(v, "txn_at", "txnAt")),
            txn_type: normalize::string(v, "type", "type")
                .or_else(|| normalize::string(v, "txn_type", "txnType"))
                .unwrap_or_default(),
            currency: normalize::string(v, "currency", "currency").unwrap_or_default(),
            amount_total: normalize::scalar(v, "amount_total", "amountTotal"),
            payer_id: normalize::int(v, "payer_id", "payerId"),
            category_id: normalize::int(v, "category_id", "categoryId"),
            created_by: normalize::int(v, "created_by", "createdBy"),
            note: normalize::string(v, "note", "note"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SplitDetail {
    pub user_id: i64,
    pub user_name: Option<String>,
    pub method: String,
    pub share_value: Scalar,
    pub amount: Scalar,
}

impl SplitDetail {
    pub fn from_value(v: &Value) -> SplitDetail {
        let method = normalize::string(v, "split_method", "splitMethod")
            .or_else(|| normalize::string(v, "method", "method"))
            .unwrap_or_else(|| "EXACT".to_string());
        let mut amount = normalize::scalar(v, "computed_amount", "computedAmount");
        if amount.is_missing() {
            amount = normalize::scalar(v, "amount", "amount");
        }
        if amount.is_missing() {
            amount = Scalar::Num(Decimal::ZERO);
        }
        SplitDetail {
            user_id: normalize::int(v, "user_id", "userId").unwrap_or_default(),
            user_name: normalize::string(v, "user_name", "userName"),
            method,
            share_value: normalize::scalar(v, "share_value", "shareValue"),
            amount,
        }
    }

    /// Human rendering of the share value under its method.
    pub fn value_label(&self) -> String {
        match self.method.as_str() {
            "PERCENT" => format!("{}%", self.share_value.raw()),
            "SHARE" | "WEIGHT" => format!("{} shares", self.share_value.raw()),
            _ => self.share_value.raw(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionDetail {
    pub txn: Transaction,
    pub rounding_strategy: Option<String>,
    pub tail_allocation: Option<String>,
    pub splits: Vec<SplitDetail>,
}

impl TransactionDetail {
    pub fn from_value(v: &Value) -> TransactionDetail {
        let txn_obj = normalize::pick(v, "txn", "transaction").unwrap_or(v);
        TransactionDetail {
            txn: Transaction::from_value(txn_obj),
            rounding_strategy: normalize::string(v, "rounding_strategy", "roundingStrategy"),
            tail_allocation: normalize::string(v, "tail_allocation", "tailAllocation"),
            splits: normalize::array(v, "splits", "splits")
                .iter()
                .map(SplitDetail::from_value)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrendPoint {
    pub period: String,
    pub income: Decimal,
    pub expense: Decimal,
}

impl TrendPoint {
    pub fn from_value(v: &Value) -> TrendPoint {
        TrendPoint {
            period: normalize::string(v, "period", "period").unwrap_or_default(),
            income: normalize::decimal(v, "income", "income"),
            expense: normalize::decimal(v, "expense", "expense"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryShare {
    pub name: String,
    pub amount: Decimal,
}

impl CategoryShare {
    pub fn from_value(v: &Value) -> CategoryShare {
        CategoryShare {
            name: normalize::string(v, "category_name", "categoryName")
                .or_else(|| normalize::string(v, "name", "name"))
                .unwrap_or_else(|| "Other".to_string()),
            amount: normalize::decimal(v, "amount", "amount"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArapEntry {
    pub user_id: i64,
    pub user_name: Option<String>,
    pub ar: Scalar,
    pub ap: Scalar,
}

impl ArapEntry {
    pub fn from_value(v: &Value) -> ArapEntry {
        ArapEntry {
            user_id: normalize::int(v, "user_id", "userId").unwrap_or_default(),
            user_name: normalize::string(v, "user_name", "userName"),
            ar: normalize::scalar(v, "ar", "ar"),
            ap: normalize::scalar(v, "ap", "ap"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MerchantStat {
    pub label: String,
    pub amount: Scalar,
}

impl MerchantStat {
    pub fn from_value(v: &Value) -> MerchantStat {
        MerchantStat {
            label: normalize::string(v, "label", "label")
                .or_else(|| normalize::string(v, "merchant", "merchant"))
                .unwrap_or_default(),
            amount: normalize::scalar(v, "amount", "amount"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub code: String,
    pub message: String,
    pub severity: Option<String>,
}

impl Recommendation {
    pub fn from_value(v: &Value) -> Recommendation {
        // Some builds return plain strings here instead of objects.
        if let Value::String(s) = v {
            return Recommendation {
                code: String::new(),
                message: s.clone(),
                severity: None,
            };
        }
        Recommendation {
            code: normalize::string(v, "code", "code").unwrap_or_default(),
            message: normalize::string(v, "message", "message").unwrap_or_default(),
            severity: normalize::string(v, "severity", "severity"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsSnapshot {
    pub currency: String,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
    pub total_income: Scalar,
    pub total_expense: Scalar,
    pub net: Scalar,
    pub trend: Vec<TrendPoint>,
    pub by_category: Vec<CategoryShare>,
    pub arap: Vec<ArapEntry>,
    pub merchants: Vec<MerchantStat>,
    pub recommendations: Vec<Recommendation>,
}

impl AnalyticsSnapshot {
    pub fn from_value(v: &Value) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            currency: normalize::string(v, "currency", "currency")
                .unwrap_or_else(|| "USD".to_string()),
            range_start: normalize::string(v, "range_start", "rangeStart"),
            range_end: normalize::string(v, "range_end", "rangeEnd"),
            total_income: normalize::scalar(v, "total_income", "totalIncome"),
            total_expense: normalize::scalar(v, "total_expense", "totalExpense"),
            net: normalize::scalar(v, "net_balance", "netBalance"),
            trend: normalize::array(v, "trend", "trend")
                .iter()
                .map(TrendPoint::from_value)
                .collect(),
            by_category: normalize::array(v, "by_category", "byCategory")
                .iter()
                .map(CategoryShare::from_value)
                .collect(),
            arap: normalize::array(v, "arap", "arAp")
                .iter()
                .map(ArapEntry::from_value)
                .collect(),
            merchants: normalize::array(v, "top_merchants", "topMerchants")
                .iter()
                .map(MerchantStat::from_value)
                .collect(),
            recommendations: normalize::array(v, "recommendations", "recommendations")
                .iter()
                .map(Recommendation::from_value)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BudgetStatusItem {
    pub budget_id: Option<i64>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub limit_amount: Decimal,
    pub spent_amount: Scalar,
    pub ratio: Option<Decimal>,
    pub status: String,
}

impl BudgetStatusItem {
    pub fn from_value(v: &Value) -> BudgetStatusItem {
        let ratio = match normalize::scalar(v, "ratio", "ratio") {
            Scalar::Num(d) => Some(d),
            _ => None,
        };
        BudgetStatusItem {
            budget_id: normalize::int(v, "budget_id", "budgetId"),
            category_id: normalize::int(v, "category_id", "categoryId"),
            category_name: normalize::string(v, "category_name", "categoryName"),
            limit_amount: normalize::decimal(v, "limit_amount", "limitAmount"),
            spent_amount: normalize::scalar(v, "spent_amount", "spentAmount"),
            ratio,
            status: normalize::string(v, "status", "status").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettlementTransfer {
    pub from_user_id: i64,
    pub from_user_name: Option<String>,
    pub to_user_id: i64,
    pub to_user_name: Option<String>,
    pub amount: Scalar,
}

impl SettlementTransfer {
    pub fn from_value(v: &Value) -> SettlementTransfer {
        SettlementTransfer {
            from_user_id: normalize::int(v, "from_user_id", "fromUserId").unwrap_or_default(),
            from_user_name: normalize::string(v, "from_user_name", "fromUserName"),
            to_user_id: normalize::int(v, "to_user_id", "toUserId").unwrap_or_default(),
            to_user_name: normalize::string(v, "to_user_name", "toUserName"),
            amount: normalize::scalar(v, "amount", "amount"),
        }
    }

    pub fn from_label(&self) -> String {
        self.from_user_name
            .clone()
            .unwrap_or_else(|| format!("User {}", self.from_user_id))
    }

    pub fn to_label(&self) -> String {
        self.to_user_name
            .clone()
            .unwrap_or_else(|| format!("User {}", self.to_user_id))
    }
}

#[derive(Debug, Clone)]
pub struct SettlementPlan {
    pub currency: String,
    pub transfer_count: Option<i64>,
    pub transfers: Vec<SettlementTransfer>,
}

impl SettlementPlan {
    pub fn from_value(v: &Value) -> SettlementPlan {
        SettlementPlan {
            currency: normalize::string(v, "currency", "currency")
                .unwrap_or_else(|| "USD".to_string()),
            transfer_count: normalize::int(v, "transfer_count", "transferCount"),
            transfers: normalize::array(v, "transfers", "transfers")
                .iter()
                .map(SettlementTransfer::from_value)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn from_value(v: &Value) -> User {
        User {
            id: normalize::int(v, "user_id", "userId")
                .or_else(|| normalize::int(v, "id", "id"))
                .unwrap_or_default(),
            name: normalize::string(v, "name", "name").unwrap_or_default(),
            email: normalize::string(v, "email", "email").unwrap_or_default(),
        }
    }
}
