// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Form controller: turns raw user input into records, writes them through
//! the record store and hands back freshly rendered views.

use crate::aggregate::Snapshot;
use crate::config::Settings;
use crate::db::KeyValueStore;
use crate::error::FormError;
use crate::models::{
    Collection, Goal, GoalDraft, GoalPatch, Transaction, TransactionDraft, TransactionKind,
    TransactionPatch,
};
use crate::months::{MonthId, current_month};
use crate::render::Views;
use crate::store::RecordStore;
use crate::utils::{parse_amount_input, parse_record_date};
use rust_decimal::Decimal;
use tracing::info;

/// Raw fields of the income/expense form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
}

impl TransactionForm {
    pub fn validate(&self) -> Result<TransactionDraft, FormError> {
        let description = self.description.trim();
        let amount = parse_amount_input(&self.amount).unwrap_or(Decimal::ZERO);
        if description.is_empty() || amount.is_zero() {
            return Err(FormError::MissingDescriptionOrAmount);
        }
        if amount.is_sign_negative() {
            return Err(FormError::NegativeAmount);
        }
        Ok(TransactionDraft {
            date: normalize_date(&self.date)?,
            description: description.to_string(),
            amount,
            category: non_blank(&self.category),
        })
    }
}

/// Raw fields of the new-goal form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalForm {
    pub title: String,
    pub target: String,
    pub deadline: String,
}

impl GoalForm {
    /// New goals always start from zero saved.
    pub fn validate(&self) -> Result<GoalDraft, FormError> {
        let title = self.title.trim();
        let target = parse_amount_input(&self.target).unwrap_or(Decimal::ZERO);
        if title.is_empty() || target.is_zero() {
            return Err(FormError::MissingTitleOrTarget);
        }
        if target.is_sign_negative() {
            return Err(FormError::NegativeAmount);
        }
        Ok(GoalDraft {
            title: title.to_string(),
            target,
            current: Decimal::ZERO,
            deadline: normalize_date(&self.deadline)?,
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Blank stays absent; anything else must parse and is stored as `YYYY-MM-DD`.
fn normalize_date(raw: &str) -> Result<Option<String>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_record_date(raw)
        .map(|d| Some(d.format("%Y-%m-%d").to_string()))
        .ok_or_else(|| FormError::InvalidDate(raw.to_string()))
}

fn parse_edit_id(id: Option<&str>) -> Result<i64, FormError> {
    id.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(FormError::MissingId)
}

/// Result of a mutation: the affected record (if any) and the re-rendered
/// views.
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted<T> {
    pub record: T,
    pub views: Views,
}

pub struct FormController<'a, S: KeyValueStore> {
    store: &'a mut RecordStore<S>,
    settings: Settings,
    month: MonthId,
}

impl<'a, S: KeyValueStore> FormController<'a, S> {
    pub fn new(store: &'a mut RecordStore<S>, settings: Settings) -> Self {
        Self::for_month(store, settings, current_month())
    }

    /// Controller whose re-renders are anchored on `month` instead of today.
    pub fn for_month(store: &'a mut RecordStore<S>, settings: Settings, month: MonthId) -> Self {
        Self {
            store,
            settings,
            month,
        }
    }

    /// Recomputes every view from the store's current contents.
    pub fn refresh(&self) -> Views {
        Views::build(&Snapshot::load(&*self.store), self.month, &self.settings)
    }

    fn done<T>(&self, record: T) -> Submitted<T> {
        Submitted {
            record,
            views: self.refresh(),
        }
    }

    pub fn submit_transaction(
        &mut self,
        kind: TransactionKind,
        form: &TransactionForm,
    ) -> Result<Submitted<Transaction>, FormError> {
        let draft = form.validate()?;
        let record: Transaction = self.store.create(kind.collection(), draft);
        info!(collection = kind.collection().key(), id = record.id, "recorded transaction");
        Ok(self.done(record))
    }

    /// Replaces the editable fields of an existing transaction. An unknown id
    /// is not an error; the record comes back as `None`.
    pub fn submit_edit(
        &mut self,
        kind: TransactionKind,
        id: Option<&str>,
        form: &TransactionForm,
    ) -> Result<Submitted<Option<Transaction>>, FormError> {
        let id = parse_edit_id(id)?;
        let draft = form.validate()?;
        let record =
            self.store
                .update::<Transaction>(kind.collection(), id, TransactionPatch::from(draft));
        Ok(self.done(record))
    }

    pub fn submit_goal(&mut self, form: &GoalForm) -> Result<Submitted<Goal>, FormError> {
        let draft = form.validate()?;
        let record: Goal = self.store.create(Collection::Goals, draft);
        info!(id = record.id, title = %record.title, "created goal");
        Ok(self.done(record))
    }

    /// Sets how much has been saved towards a goal.
    pub fn submit_goal_progress(
        &mut self,
        id: Option<&str>,
        current: &str,
    ) -> Result<Submitted<Option<Goal>>, FormError> {
        let id = parse_edit_id(id)?;
        let current = parse_amount_input(current).ok_or(FormError::MissingAmount)?;
        if current.is_sign_negative() && !current.is_zero() {
            return Err(FormError::NegativeAmount);
        }
        let patch = GoalPatch {
            current: Some(current),
            ..GoalPatch::default()
        };
        let record = self.store.update::<Goal>(Collection::Goals, id, patch);
        Ok(self.done(record))
    }

    pub fn delete(&mut self, collection: Collection, id: i64) -> Views {
        match collection {
            Collection::Goals => self.store.delete::<Goal>(collection, id),
            Collection::Income | Collection::Expenses => {
                self.store.delete::<Transaction>(collection, id)
            }
        }
        self.refresh()
    }
}
