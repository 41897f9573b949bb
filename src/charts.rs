// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart payloads for the page's charting library: labels plus numeric
//! datasets, serialised as JSON config objects.

use crate::aggregate::{Snapshot, category_totals, monthly_series, sum_for_month};
use crate::config::MAX_CHART_MONTHS;
use crate::models::TransactionKind;
use crate::months::{MonthId, trailing_months_from};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde_json::{Value, json};

const INCOME_COLOR: &str = "#00c853";
const EXPENSE_COLOR: &str = "#e53935";
const CATEGORY_PALETTE: [&str; 6] = [
    "#00c853", "#ffb300", "#29b6f6", "#8e24aa", "#ff5252", "#9e9e9e",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: Value,
}

/// Every chart a page can show, keyed by the canvas id it binds to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub evolution: ChartConfig,
    pub income_by_month: ChartConfig,
    pub expenses_by_month: ChartConfig,
    pub expense_distribution: ChartConfig,
    pub income_comparison: ChartConfig,
    pub expense_comparison: ChartConfig,
}

impl ChartSet {
    /// `months` is clamped to `1..=MAX_CHART_MONTHS`.
    pub fn build(snapshot: &Snapshot, anchor: MonthId, months: usize) -> Self {
        let months = months.clamp(1, MAX_CHART_MONTHS);
        Self {
            evolution: evolution_chart(snapshot, anchor, months),
            income_by_month: monthly_bar_chart(snapshot, TransactionKind::Income, anchor, months),
            expenses_by_month: monthly_bar_chart(
                snapshot,
                TransactionKind::Expense,
                anchor,
                months,
            ),
            expense_distribution: expense_distribution_chart(snapshot),
            income_comparison: comparison_chart(snapshot, TransactionKind::Income, anchor),
            expense_comparison: comparison_chart(snapshot, TransactionKind::Expense, anchor),
        }
    }
}

fn to_points(values: &[Decimal]) -> Vec<f64> {
    values.iter().map(|d| d.to_f64().unwrap_or(0.0)).collect()
}

fn kind_color(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => INCOME_COLOR,
        TransactionKind::Expense => EXPENSE_COLOR,
    }
}

/// `#rrggbb` plus alpha as an `rgba()` string.
fn with_alpha(hex: &str, alpha: f64) -> String {
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2).unwrap_or("00"), 16).unwrap_or(0);
    format!("rgba({}, {}, {}, {})", channel(1), channel(3), channel(5), alpha)
}

fn y_from_zero() -> Value {
    json!({ "maintainAspectRatio": false, "scales": { "y": { "beginAtZero": true } } })
}

/// Income and expense lines over the trailing window.
pub fn evolution_chart(snapshot: &Snapshot, anchor: MonthId, months: usize) -> ChartConfig {
    let window = trailing_months_from(anchor, months);
    let ids: Vec<MonthId> = window.iter().map(|(m, _)| *m).collect();
    let line = |kind: TransactionKind, alpha: f64| Dataset {
        label: Some(kind.label().to_string()),
        data: to_points(&monthly_series(snapshot.transactions(kind), &ids)),
        background_color: Value::String(with_alpha(kind_color(kind), alpha)),
        border_color: Some(Value::String(kind_color(kind).to_string())),
        border_width: None,
        tension: Some(0.3),
    };
    ChartConfig {
        chart_type: ChartType::Line,
        data: ChartData {
            labels: window.into_iter().map(|(_, l)| l).collect(),
            datasets: vec![
                line(TransactionKind::Income, 0.08),
                line(TransactionKind::Expense, 0.06),
            ],
        },
        options: json!({
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "top" } }
        }),
    }
}

pub fn monthly_bar_chart(
    snapshot: &Snapshot,
    kind: TransactionKind,
    anchor: MonthId,
    months: usize,
) -> ChartConfig {
    let window = trailing_months_from(anchor, months);
    let ids: Vec<MonthId> = window.iter().map(|(m, _)| *m).collect();
    ChartConfig {
        chart_type: ChartType::Bar,
        data: ChartData {
            labels: window.into_iter().map(|(_, l)| l).collect(),
            datasets: vec![Dataset {
                label: Some(kind.label().to_string()),
                data: to_points(&monthly_series(snapshot.transactions(kind), &ids)),
                background_color: Value::String(with_alpha(kind_color(kind), 0.6)),
                border_color: Some(Value::String(kind_color(kind).to_string())),
                border_width: Some(1),
                tension: None,
            }],
        },
        options: y_from_zero(),
    }
}

/// All-time expense totals per category.
pub fn expense_distribution_chart(snapshot: &Snapshot) -> ChartConfig {
    let totals = category_totals(&snapshot.expenses);
    let (labels, values): (Vec<String>, Vec<Decimal>) = totals.into_iter().unzip();
    ChartConfig {
        chart_type: ChartType::Doughnut,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: None,
                data: to_points(&values),
                background_color: json!(CATEGORY_PALETTE),
                border_color: None,
                border_width: None,
                tension: None,
            }],
        },
        options: json!({
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "right" } }
        }),
    }
}

/// Previous month next to the current one.
pub fn comparison_chart(
    snapshot: &Snapshot,
    kind: TransactionKind,
    anchor: MonthId,
) -> ChartConfig {
    let records = snapshot.transactions(kind);
    let prev = anchor.previous();
    let color = kind_color(kind);
    ChartConfig {
        chart_type: ChartType::Bar,
        data: ChartData {
            labels: vec![prev.label(), anchor.label()],
            datasets: vec![Dataset {
                label: Some(kind.label().to_string()),
                data: to_points(&[sum_for_month(records, prev), sum_for_month(records, anchor)]),
                background_color: json!([with_alpha(color, 0.4), with_alpha(color, 0.8)]),
                border_color: Some(json!([color, color])),
                border_width: Some(1),
                tension: None,
            }],
        },
        options: y_from_zero(),
    }
}
