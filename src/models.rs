// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::coerce_amount;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_CATEGORY: &str = "Other";

/// A named, independently persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Income,
    Expenses,
    Goals,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Income, Collection::Expenses, Collection::Goals];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Income => "income",
            Collection::Expenses => "expenses",
            Collection::Goals => "goals",
        }
    }
}

/// Which side of the ledger a transaction collection represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn collection(self) -> Collection {
        match self {
            TransactionKind::Income => Collection::Income,
            TransactionKind::Expense => Collection::Expenses,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expenses",
        }
    }
}

/// A persisted record with a store-assigned id.
pub trait Record: Serialize + DeserializeOwned + Clone {
    type Draft;
    type Patch;

    fn id(&self) -> i64;
    fn from_draft(id: i64, draft: Self::Draft) -> Self;
    /// Shallow merge: every field present in the patch overwrites.
    fn merge(&mut self, patch: Self::Patch);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "amount_serde")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionDraft {
    pub date: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub category: Option<String>,
}

/// `None` leaves a field untouched; `Some(None)` clears an optional field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionPatch {
    pub date: Option<Option<String>>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<Option<String>>,
}

impl From<TransactionDraft> for TransactionPatch {
    fn from(d: TransactionDraft) -> Self {
        Self {
            date: Some(d.date),
            description: Some(d.description),
            amount: Some(d.amount),
            category: Some(d.category),
        }
    }
}

impl Record for Transaction {
    type Draft = TransactionDraft;
    type Patch = TransactionPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: TransactionDraft) -> Self {
        Self {
            id,
            date: d.date,
            description: d.description,
            amount: d.amount,
            category: d.category,
        }
    }

    fn merge(&mut self, p: TransactionPatch) {
        if let Some(v) = p.date {
            self.date = v;
        }
        if let Some(v) = p.description {
            self.description = v;
        }
        if let Some(v) = p.amount {
            self.amount = v;
        }
        if let Some(v) = p.category {
            self.category = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, with = "amount_serde")]
    pub target: Decimal,
    #[serde(default, with = "amount_serde")]
    pub current: Decimal,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoalDraft {
    pub title: String,
    pub target: Decimal,
    pub current: Decimal,
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub target: Option<Decimal>,
    pub current: Option<Decimal>,
    pub deadline: Option<Option<String>>,
}

impl Record for Goal {
    type Draft = GoalDraft;
    type Patch = GoalPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: GoalDraft) -> Self {
        Self {
            id,
            title: d.title,
            target: d.target,
            current: d.current,
            deadline: d.deadline,
        }
    }

    fn merge(&mut self, p: GoalPatch) {
        if let Some(v) = p.title {
            self.title = v;
        }
        if let Some(v) = p.target {
            self.target = v;
        }
        if let Some(v) = p.current {
            self.current = v;
        }
        if let Some(v) = p.deadline {
            self.deadline = v;
        }
    }
}

pub const DEFAULT_PROFILE_NAME: &str = "User";
pub const DEFAULT_PROFILE_EMAIL: &str = "email@example.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_email")]
    pub email: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_name(),
            email: default_email(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

fn default_email() -> String {
    DEFAULT_PROFILE_EMAIL.to_string()
}

fn blank_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<String> = Option::deserialize(de)?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

/// Amounts are stored as plain JSON numbers when that is exact, otherwise as
/// decimal strings. Reading accepts numbers or numeric strings and coerces
/// anything else to zero.
mod amount_serde {
    use super::*;

    pub fn serialize<S: Serializer>(d: &Decimal, ser: S) -> Result<S::Ok, S::Error> {
        if d.fract().is_zero() {
            if let Some(i) = d.to_i64() {
                return ser.serialize_i64(i);
            }
        }
        match d.to_f64().filter(|f| round_trips(*f, d)) {
            Some(f) => ser.serialize_f64(f),
            None => ser.serialize_str(&d.normalize().to_string()),
        }
    }

    /// Whether `f`, written as JSON, reads back as exactly `d`.
    fn round_trips(f: f64, d: &Decimal) -> bool {
        serde_json::Number::from_f64(f)
            .and_then(|n| n.to_string().parse::<Decimal>().ok())
            .is_some_and(|back| back == *d)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Decimal, D::Error> {
        let v = serde_json::Value::deserialize(de)?;
        Ok(coerce_amount(&v))
    }
}
