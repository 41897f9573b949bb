// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Markup for lists, goal cards, month comparisons and the dashboard.
//!
//! Everything here is recomputed from a [`Snapshot`]; nothing is cached
//! between renders.

use crate::aggregate::{
    Change, DashboardSummary, GoalProgress, MonthComparison, Snapshot, almost_done_goals,
    top_goals,
};
use crate::charts::ChartSet;
use crate::config::Settings;
use crate::format::{escape_html, format_currency, format_short_date, format_signed_percent};
use crate::models::{Goal, Profile, Transaction, TransactionKind};
use crate::months::MonthId;
use crate::profile::render_profile_badge;
use serde::Serialize;
use std::fmt::Write;

/// Class carried by every empty-collection placeholder.
pub const EMPTY_STATE_CLASS: &str = "empty-state";

const CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Motivational message band for a goal card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalTier {
    Reached,
    FinalStretch,
    GoodPace,
    GoodStart,
    JustStarted,
}

impl GoalTier {
    pub fn for_percent(pct: u8) -> Self {
        match pct {
            100.. => GoalTier::Reached,
            80..=99 => GoalTier::FinalStretch,
            50..=79 => GoalTier::GoodPace,
            25..=49 => GoalTier::GoodStart,
            _ => GoalTier::JustStarted,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GoalTier::Reached => "Goal reached!",
            GoalTier::FinalStretch => "Almost there! Final stretch!",
            GoalTier::GoodPace => "Good pace! Keep it up.",
            GoalTier::GoodStart => "Good start!",
            GoalTier::JustStarted => "You can do it!",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            GoalTier::Reached => "goal-message--done",
            GoalTier::FinalStretch => "goal-message--close",
            GoalTier::GoodPace => "goal-message--good",
            GoalTier::GoodStart => "goal-message--start",
            GoalTier::JustStarted => "goal-message--go",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            GoalTier::Reached => "fa-trophy",
            GoalTier::FinalStretch => "fa-fire",
            GoalTier::GoodPace => "fa-star",
            GoalTier::GoodStart => "fa-seedling",
            GoalTier::JustStarted => "fa-hand-point-right",
        }
    }
}

/// Income and expense tables, newest first.
pub fn render_transaction_list(kind: TransactionKind, records: &[Transaction]) -> String {
    if records.is_empty() {
        return format!(
            r#"<div class="{} text-muted text-center">No records found.</div>"#,
            EMPTY_STATE_CLASS
        );
    }
    let collection = kind.collection().key();
    let mut html = String::from(
        r#"<div class="table-responsive"><table class="table table-hover"><thead><tr><th>Name</th><th>Category</th><th class="text-end">Amount</th><th class="text-center">Actions</th></tr></thead><tbody>"#,
    );
    for r in records.iter().rev() {
        let date = r
            .date
            .as_deref()
            .and_then(format_short_date)
            .map(|d| format!(r#"<small class="text-muted">{}</small>"#, escape_html(&d)))
            .unwrap_or_default();
        let _ = write!(
            html,
            r#"<tr><td><div class="item-name">{desc}</div>{date}</td><td><span class="badge">{cat}</span></td><td class="text-end"><strong>{amount}</strong></td><td class="text-center"><button class="btn-edit" data-action="edit" data-collection="{coll}" data-id="{id}" title="Edit">Edit</button><button class="btn-delete" data-action="delete" data-collection="{coll}" data-id="{id}" title="Remove">Remove</button></td></tr>"#,
            desc = escape_html(&r.description),
            date = date,
            cat = escape_html(r.category_or_default()),
            amount = format_currency(r.amount),
            coll = collection,
            id = r.id,
        );
    }
    html.push_str("</tbody></table></div>");
    html
}

fn progress_bar(pct: u8) -> String {
    format!(
        r#"<div class="progress-container"><div class="progress-bar-goal" style="width: {}%"></div></div>"#,
        pct
    )
}

/// Goal cards, newest first, each with its motivational tier.
pub fn render_goal_cards(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return format!(
            r#"<div class="{} goals-empty"><p class="goals-empty-title">No goals yet</p><p class="goals-empty-text">Create your first goal and start turning plans into reality!</p></div>"#,
            EMPTY_STATE_CLASS
        );
    }
    let mut html = String::from(r#"<div class="row g-4">"#);
    for goal in goals.iter().rev() {
        let pct = GoalProgress::of(goal).percent;
        let tier = GoalTier::for_percent(pct);
        let band = match pct {
            100.. => "done",
            50..=99 => "close",
            _ => "early",
        };
        let _ = write!(
            html,
            r#"<div class="col-md-6 col-lg-4"><div class="goal-card goal-card--pct-{band}" data-id="{id}"><div class="goal-card-header"><h6 class="goal-card-title">{title}</h6><button class="btn-delete" data-action="delete" data-collection="goals" data-id="{id}" title="Remove goal">Remove</button></div><div class="goal-card-body"><div class="goal-info"><span class="goal-label">Target</span><span class="goal-value">{target}</span></div><div class="goal-info"><span class="goal-label">Progress</span><span class="goal-percentage">{pct}%</span></div>{bar}<div class="goal-message {tier_class}"><i class="fas {icon}"></i> {message}</div><div class="goal-info"><span class="goal-label">Deadline</span><span class="goal-deadline">{deadline}</span></div></div></div></div>"#,
            band = band,
            id = goal.id,
            title = escape_html(&goal.title),
            target = format_currency(goal.target),
            pct = pct,
            bar = progress_bar(pct),
            tier_class = tier.css_class(),
            icon = tier.icon(),
            message = tier.message(),
            deadline = escape_html(goal.deadline.as_deref().unwrap_or("-")),
        );
    }
    html.push_str("</div>");
    html
}

/// Month-over-month panel on the income and expense pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonView {
    pub current: String,
    pub previous: String,
    pub variation: String,
    pub variation_class: &'static str,
}

pub fn comparison_view(cmp: &MonthComparison) -> ComparisonView {
    let (variation, variation_class) = match cmp.change {
        Change::Undefined => ("—".to_string(), "stat-variation--neutral"),
        Change::FromZero => ("+100%".to_string(), "stat-variation--neutral"),
        Change::Percent(p) => {
            let class = if cmp.is_favorable().unwrap_or(true) {
                "stat-variation--positive"
            } else {
                "stat-variation--negative"
            };
            (format_signed_percent(p), class)
        }
    };
    ComparisonView {
        current: format_currency(cmp.current),
        previous: format_currency(cmp.previous),
        variation,
        variation_class,
    }
}

pub fn render_comparison(kind: TransactionKind, view: &ComparisonView) -> String {
    format!(
        r#"<div class="month-comparison" data-kind="{kind}"><div class="stat"><span class="stat-label">This month</span><span class="stat-value">{cur}</span></div><div class="stat"><span class="stat-label">Last month</span><span class="stat-value">{prev}</span></div><span class="stat-variation {class}">{var}</span></div>"#,
        kind = kind.collection().key(),
        cur = view.current,
        prev = view.previous,
        class = view.variation_class,
        var = view.variation,
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub class: &'static str,
}

/// One income/expense tile on the dashboard. Badge and comparison line only
/// appear when last month had something to compare with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub total: String,
    pub badge: Option<Badge>,
    pub comparison: Option<Badge>,
}

impl SummaryCard {
    pub fn from_comparison(cmp: &MonthComparison) -> Self {
        let total = format_currency(cmp.current);
        let Some(pct) = cmp.measured_percent() else {
            return Self {
                total,
                badge: None,
                comparison: None,
            };
        };
        let good = cmp.is_favorable().unwrap_or(true);
        let wording = match (cmp.kind, good) {
            (_, true) => "Better than last month",
            (TransactionKind::Income, false) => "Lower than last month",
            (TransactionKind::Expense, false) => "Higher than last month",
        };
        let signed = format_signed_percent(pct);
        Self {
            total,
            badge: Some(Badge {
                text: signed.clone(),
                class: if good {
                    "summary-badge--positive"
                } else {
                    "summary-badge--negative"
                },
            }),
            comparison: Some(Badge {
                text: format!("{} ({})", wording, signed),
                class: if good {
                    "summary-comparison--positive"
                } else {
                    "summary-comparison--negative"
                },
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub balance: String,
    pub income: SummaryCard,
    pub expenses: SummaryCard,
    /// `None` hides the section.
    pub almost_done: Option<String>,
    pub top_goals: String,
}

impl DashboardView {
    pub fn build(summary: &DashboardSummary, goals: &[Goal], limit: usize) -> Self {
        Self {
            balance: format_currency(summary.balance),
            income: SummaryCard::from_comparison(&summary.income),
            expenses: SummaryCard::from_comparison(&summary.expenses),
            almost_done: render_almost_done(&almost_done_goals(goals, limit)),
            top_goals: render_top_goals(&top_goals(goals, limit)),
        }
    }
}

pub fn render_almost_done(goals: &[GoalProgress]) -> Option<String> {
    if goals.is_empty() {
        return None;
    }
    let mut html = String::new();
    for g in goals {
        let _ = write!(
            html,
            r#"<div class="col-md-4"><div class="goal-close-card"><div class="goal-close-header"><span class="goal-close-title">{title}</span><span class="goal-close-pct">{pct}%</span></div>{bar}<div class="goal-close-value">{cur} / {target}</div></div></div>"#,
            title = escape_html(&g.goal.title),
            pct = g.percent,
            bar = progress_bar(g.percent),
            cur = format_currency(g.goal.current),
            target = format_currency(g.goal.target),
        );
    }
    Some(html)
}

pub fn render_top_goals(goals: &[GoalProgress]) -> String {
    if goals.is_empty() {
        return format!(
            r#"<div class="col-12"><div class="{} top-goals-empty"><p>You have no goals yet. <a href="goals.html">Create your first goal</a></p></div></div>"#,
            EMPTY_STATE_CLASS
        );
    }
    let mut html = String::new();
    for g in goals {
        let deadline = g
            .goal
            .deadline
            .as_deref()
            .map(|d| format_short_date(d).unwrap_or_else(|| d.to_string()))
            .unwrap_or_else(|| "No deadline".to_string());
        let _ = write!(
            html,
            r#"<div class="col-md-4"><div class="goal-card-dashboard" data-id="{id}"><div class="goal-card-dashboard-header"><h6 class="goal-card-dashboard-title">{title}</h6><span class="goal-card-dashboard-pct">{pct}%</span></div><div class="goal-card-dashboard-values"><span class="goal-card-dashboard-current">{cur}</span><span class="goal-card-dashboard-target">of {target}</span></div>{bar}<div class="goal-card-dashboard-footer"><span class="goal-card-dashboard-deadline">{deadline}</span></div></div></div>"#,
            id = g.goal.id,
            title = escape_html(&g.goal.title),
            pct = g.percent,
            cur = format_currency(g.goal.current),
            target = format_currency(g.goal.target),
            bar = progress_bar(g.percent),
            deadline = escape_html(&deadline),
        );
    }
    html
}

/// Everything a page needs, rebuilt from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Views {
    pub month: MonthId,
    pub income_list: String,
    pub expense_list: String,
    pub goal_cards: String,
    pub income_comparison: ComparisonView,
    pub expense_comparison: ComparisonView,
    pub dashboard: DashboardView,
    pub charts: ChartSet,
}

impl Views {
    pub fn build(snapshot: &Snapshot, month: MonthId, settings: &Settings) -> Self {
        let summary = DashboardSummary::compute(snapshot, month);
        Self {
            month,
            income_list: render_transaction_list(TransactionKind::Income, &snapshot.income),
            expense_list: render_transaction_list(TransactionKind::Expense, &snapshot.expenses),
            goal_cards: render_goal_cards(&snapshot.goals),
            income_comparison: comparison_view(&summary.income),
            expense_comparison: comparison_view(&summary.expenses),
            dashboard: DashboardView::build(&summary, &snapshot.goals, settings.dashboard_goals),
            charts: ChartSet::build(snapshot, month, settings.chart_months),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Income,
    Expenses,
    Goals,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Income, Page::Expenses, Page::Goals];

    pub fn file_name(self) -> &'static str {
        match self {
            Page::Dashboard => "index.html",
            Page::Income => "income.html",
            Page::Expenses => "expenses.html",
            Page::Goals => "goals.html",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Income => "Income",
            Page::Expenses => "Expenses",
            Page::Goals => "Goals",
        }
    }
}

fn canvas(id: &str) -> String {
    format!(r#"<div class="chart-box"><canvas id="{}"></canvas></div>"#, id)
}

fn summary_tile(title: &str, card: &SummaryCard) -> String {
    let badge = card
        .badge
        .as_ref()
        .map(|b| format!(r#"<span class="summary-badge {}">{}</span>"#, b.class, b.text))
        .unwrap_or_default();
    let comparison = card
        .comparison
        .as_ref()
        .map(|b| format!(r#"<p class="summary-comparison {}">{}</p>"#, b.class, b.text))
        .unwrap_or_default();
    format!(
        r#"<div class="summary-card"><h6>{}</h6>{}<p class="summary-value">{}</p>{}</div>"#,
        title, badge, card.total, comparison
    )
}

fn page_body(page: Page, views: &Views) -> String {
    match page {
        Page::Dashboard => {
            let d = &views.dashboard;
            let mut body = format!(
                r#"<section class="summary"><div class="summary-card"><h6>Balance</h6><p class="summary-value" id="dashboard-balance">{}</p></div>{}{}</section>"#,
                d.balance,
                summary_tile("Income", &d.income),
                summary_tile("Expenses", &d.expenses),
            );
            body.push_str(&canvas("evolution"));
            body.push_str(&canvas("expense_distribution"));
            if let Some(almost) = &d.almost_done {
                let _ = write!(
                    body,
                    r#"<section id="goals-almost-done"><h5>Almost there</h5><div class="row">{}</div></section>"#,
                    almost
                );
            }
            let _ = write!(
                body,
                r#"<section id="top-goals"><h5>Top goals</h5><div class="row">{}</div></section>"#,
                d.top_goals
            );
            body
        }
        Page::Income => format!(
            "{}{}{}{}",
            render_comparison(TransactionKind::Income, &views.income_comparison),
            canvas("income_by_month"),
            canvas("income_comparison"),
            views.income_list
        ),
        Page::Expenses => format!(
            "{}{}{}{}",
            render_comparison(TransactionKind::Expense, &views.expense_comparison),
            canvas("expenses_by_month"),
            canvas("expense_comparison"),
            views.expense_list
        ),
        Page::Goals => views.goal_cards.clone(),
    }
}

/// JSON safe to embed inside a `<script>` element.
fn script_json<T: Serialize>(v: &T) -> String {
    serde_json::to_string(v)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

/// A complete HTML document for `page`.
pub fn render_page(page: Page, views: &Views, profile: &Profile) -> String {
    let nav: String = Page::ALL
        .iter()
        .map(|p| {
            let active = if *p == page { r#" class="active""# } else { "" };
            format!(r#"<a href="{}"{}>{}</a>"#, p.file_name(), active, p.title())
        })
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Tallybook</title>
<script src="{chart_js}"></script>
</head>
<body>
<header><nav>{nav}</nav>{profile}</header>
<main data-month="{month}">
{body}
</main>
<script type="application/json" id="chart-data">{charts}</script>
<script>
(function () {{
  if (typeof Chart === 'undefined') return;
  var charts = JSON.parse(document.getElementById('chart-data').textContent);
  Object.keys(charts).forEach(function (id) {{
    var canvas = document.getElementById(id);
    if (canvas) new Chart(canvas.getContext('2d'), charts[id]);
  }});
}})();
</script>
</body>
</html>
"#,
        title = page.title(),
        chart_js = CHART_JS_SRC,
        nav = nav,
        profile = render_profile_badge(profile),
        month = views.month,
        body = page_body(page, views),
        charts = script_json(&views.charts),
    )
}
