// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stateless sums and percentages over record snapshots.

use crate::db::KeyValueStore;
use crate::models::{Goal, Transaction, TransactionKind};
use crate::months::MonthId;
use crate::store::RecordStore;
use crate::utils::parse_record_date;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Sum of `amount` over records dated inside `month`. Records without a
/// parseable date are left out.
pub fn sum_for_month(records: &[Transaction], month: MonthId) -> Decimal {
    records
        .iter()
        .filter(|r| {
            r.date
                .as_deref()
                .and_then(parse_record_date)
                .is_some_and(|d| month.contains(d))
        })
        .map(|r| r.amount)
        .sum()
}

/// One total per month, in the order given.
pub fn monthly_series(records: &[Transaction], months: &[MonthId]) -> Vec<Decimal> {
    months.iter().map(|m| sum_for_month(records, *m)).collect()
}

/// Whole-percent change from `previous` to `current`.
///
/// From a zero baseline the result is `Some(100)` if anything was recorded
/// and `None` otherwise.
pub fn percent_change(current: Decimal, previous: Decimal) -> Option<i64> {
    if previous.is_zero() {
        return (current > Decimal::ZERO).then_some(100);
    }
    let ratio = (current - previous).checked_div(previous)?;
    round_whole(ratio.checked_mul(Decimal::ONE_HUNDRED)?)
}

/// Share of `target` reached by `current`, clamped to `0..=100`. Zero when
/// either side is zero.
pub fn goal_progress_percent(current: Decimal, target: Decimal) -> u8 {
    if current.is_zero() || target.is_zero() {
        return 0;
    }
    current
        .checked_div(target)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(round_whole)
        .map(|p| p.clamp(0, 100) as u8)
        .unwrap_or(100)
}

fn round_whole(d: Decimal) -> Option<i64> {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Whether a percent change is good news for this kind of transaction:
/// more income is favourable, more spending is not.
pub fn change_is_favorable(kind: TransactionKind, pct: i64) -> bool {
    match kind {
        TransactionKind::Income => pct >= 0,
        TransactionKind::Expense => pct <= 0,
    }
}

/// How a month compares with its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Change {
    /// Nothing to compare against and nothing recorded now.
    Undefined,
    /// Previous month was zero, current month is not.
    FromZero,
    Percent(i64),
}

impl Change {
    pub fn between(current: Decimal, previous: Decimal) -> Self {
        match percent_change(current, previous) {
            None => Change::Undefined,
            Some(_) if previous.is_zero() => Change::FromZero,
            Some(p) => Change::Percent(p),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComparison {
    pub kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub current: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous: Decimal,
    pub change: Change,
}

impl MonthComparison {
    pub fn compute(kind: TransactionKind, records: &[Transaction], month: MonthId) -> Self {
        let current = sum_for_month(records, month);
        let previous = sum_for_month(records, month.previous());
        Self {
            kind,
            current,
            previous,
            change: Change::between(current, previous),
        }
    }

    /// The signed percentage, only when measured against a non-zero month.
    pub fn measured_percent(&self) -> Option<i64> {
        match self.change {
            Change::Percent(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_favorable(&self) -> Option<bool> {
        self.measured_percent()
            .map(|p| change_is_favorable(self.kind, p))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub percent: u8,
}

impl GoalProgress {
    pub fn of(goal: &Goal) -> Self {
        Self {
            percent: goal_progress_percent(goal.current, goal.target),
            goal: goal.clone(),
        }
    }
}

/// Goals at 50% or more, closest to done first, at most `limit`.
pub fn almost_done_goals(goals: &[Goal], limit: usize) -> Vec<GoalProgress> {
    let mut out: Vec<GoalProgress> = goals
        .iter()
        .map(GoalProgress::of)
        .filter(|g| g.percent >= 50)
        .collect();
    out.sort_by(|a, b| b.percent.cmp(&a.percent));
    out.truncate(limit);
    out
}

/// The first `limit` goals in stored order.
pub fn top_goals(goals: &[Goal], limit: usize) -> Vec<GoalProgress> {
    goals.iter().take(limit).map(GoalProgress::of).collect()
}

/// Totals per category in first-seen order, over all dates.
pub fn category_totals(records: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut out: Vec<(String, Decimal)> = Vec::new();
    for r in records {
        let cat = r.category_or_default();
        match out.iter_mut().find(|(c, _)| c == cat) {
            Some((_, total)) => *total += r.amount,
            None => out.push((cat.to_string(), r.amount)),
        }
    }
    out
}

/// A read of every collection taken at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub income: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
    pub goals: Vec<Goal>,
}

impl Snapshot {
    pub fn load<S: KeyValueStore>(store: &RecordStore<S>) -> Self {
        Self {
            income: store.transactions(TransactionKind::Income),
            expenses: store.transactions(TransactionKind::Expense),
            goals: store.goals(),
        }
    }

    pub fn transactions(&self, kind: TransactionKind) -> &[Transaction] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expenses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub income: MonthComparison,
    pub expenses: MonthComparison,
}

impl DashboardSummary {
    pub fn compute(snapshot: &Snapshot, month: MonthId) -> Self {
        let income = MonthComparison::compute(TransactionKind::Income, &snapshot.income, month);
        let expenses =
            MonthComparison::compute(TransactionKind::Expense, &snapshot.expenses, month);
        Self {
            month: month.label(),
            balance: income.current - expenses.current,
            income,
            expenses,
        }
    }
}
