// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tallybook::aggregate::{Change, DashboardSummary, MonthComparison, Snapshot};
use tallybook::charts::{ChartSet, ChartType};
use tallybook::config::{MAX_CHART_MONTHS, Settings};
use tallybook::models::{Goal, Profile, Transaction, TransactionKind};
use tallybook::months::MonthId;
use tallybook::render::{
    DashboardView, EMPTY_STATE_CLASS, GoalTier, Page, SummaryCard, Views, comparison_view,
    render_goal_cards, render_page, render_transaction_list,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: i64, date: &str, desc: &str, amount: &str, category: Option<&str>) -> Transaction {
    Transaction {
        id,
        date: Some(date.to_string()),
        description: desc.to_string(),
        amount: dec(amount),
        category: category.map(str::to_string),
    }
}

fn goal(id: i64, title: &str, current: &str, target: &str) -> Goal {
    Goal {
        id,
        title: title.to_string(),
        target: dec(target),
        current: dec(current),
        deadline: None,
    }
}

fn comparison(kind: TransactionKind, current: &str, previous: &str) -> MonthComparison {
    let (current, previous) = (dec(current), dec(previous));
    MonthComparison {
        kind,
        current,
        previous,
        change: Change::between(current, previous),
    }
}

fn march_2024() -> MonthId {
    MonthId::new(2024, 2).unwrap()
}

#[test]
fn empty_collections_render_placeholders() {
    let list = render_transaction_list(TransactionKind::Income, &[]);
    assert!(list.contains(EMPTY_STATE_CLASS));
    assert!(list.contains("No records found."));
    assert!(!list.contains("<table"));

    let cards = render_goal_cards(&[]);
    assert!(cards.contains(EMPTY_STATE_CLASS));
    assert!(cards.contains("No goals yet"));
}

#[test]
fn transaction_list_is_newest_first_and_escaped() {
    let records = vec![
        tx(1, "2024-03-01", "Older", "10", None),
        tx(2, "2024-03-05", "<b>Newer</b>", "1234.5", Some("Food & Drink")),
    ];
    let html = render_transaction_list(TransactionKind::Expense, &records);
    let newer = html.find("&lt;b&gt;Newer&lt;/b&gt;").unwrap();
    let older = html.find("Older").unwrap();
    assert!(newer < older);
    assert!(!html.contains("<b>Newer"));
    assert!(html.contains("Food &amp; Drink"));
    assert!(html.contains("Other"));
    assert!(html.contains("$1,234.50"));
    assert!(html.contains("3/5/2024"));
    assert!(html.contains(r#"data-collection="expenses" data-id="2""#));
}

#[test]
fn goal_tiers_by_percent() {
    let cases = [
        (100, GoalTier::Reached),
        (99, GoalTier::FinalStretch),
        (80, GoalTier::FinalStretch),
        (79, GoalTier::GoodPace),
        (50, GoalTier::GoodPace),
        (49, GoalTier::GoodStart),
        (25, GoalTier::GoodStart),
        (24, GoalTier::JustStarted),
        (0, GoalTier::JustStarted),
    ];
    for (pct, tier) in cases {
        assert_eq!(GoalTier::for_percent(pct), tier, "pct {}", pct);
    }
    assert_eq!(GoalTier::Reached.message(), "Goal reached!");
    assert_eq!(GoalTier::JustStarted.message(), "You can do it!");
}

#[test]
fn goal_cards_show_progress_and_message() {
    let goals = vec![goal(1, "Car", "900", "1000"), goal(2, "Trip", "0", "500")];
    let html = render_goal_cards(&goals);
    assert!(html.contains("90%"));
    assert!(html.contains("Almost there! Final stretch!"));
    assert!(html.contains("You can do it!"));
    assert!(html.contains("width: 90%"));
    assert!(html.find("Trip").unwrap() < html.find("Car").unwrap());
}

#[test]
fn comparison_view_variations() {
    let v = comparison_view(&comparison(TransactionKind::Income, "0", "0"));
    assert_eq!(v.variation, "—");
    assert_eq!(v.variation_class, "stat-variation--neutral");

    let v = comparison_view(&comparison(TransactionKind::Income, "50", "0"));
    assert_eq!(v.variation, "+100%");
    assert_eq!(v.variation_class, "stat-variation--neutral");

    let v = comparison_view(&comparison(TransactionKind::Income, "80", "100"));
    assert_eq!(v.variation, "-20%");
    assert_eq!(v.variation_class, "stat-variation--negative");
    assert_eq!(v.current, "$80.00");
    assert_eq!(v.previous, "$100.00");

    let v = comparison_view(&comparison(TransactionKind::Expense, "80", "100"));
    assert_eq!(v.variation_class, "stat-variation--positive");
}

#[test]
fn summary_card_hides_badges_without_baseline() {
    let card = SummaryCard::from_comparison(&comparison(TransactionKind::Income, "300", "0"));
    assert_eq!(card.total, "$300.00");
    assert!(card.badge.is_none());
    assert!(card.comparison.is_none());
}

#[test]
fn summary_card_wording_by_kind() {
    let card = SummaryCard::from_comparison(&comparison(TransactionKind::Expense, "150", "100"));
    let badge = card.badge.unwrap();
    assert_eq!(badge.text, "+50%");
    assert_eq!(badge.class, "summary-badge--negative");
    assert_eq!(card.comparison.unwrap().text, "Higher than last month (+50%)");

    let card = SummaryCard::from_comparison(&comparison(TransactionKind::Income, "50", "100"));
    assert_eq!(card.comparison.unwrap().text, "Lower than last month (-50%)");

    let card = SummaryCard::from_comparison(&comparison(TransactionKind::Income, "120", "100"));
    assert_eq!(card.comparison.unwrap().text, "Better than last month (+20%)");
}

#[test]
fn dashboard_hides_almost_done_when_nothing_qualifies() {
    let snapshot = Snapshot::default();
    let summary = DashboardSummary::compute(&snapshot, march_2024());
    let view = DashboardView::build(&summary, &[goal(1, "Far", "10", "100")], 3);
    assert!(view.almost_done.is_none());
    assert!(view.top_goals.contains("Far"));
    assert!(view.top_goals.contains("No deadline"));

    let view = DashboardView::build(&summary, &[], 3);
    assert!(view.top_goals.contains(EMPTY_STATE_CLASS));
    assert!(view.top_goals.contains("goals.html"));
    assert_eq!(view.balance, "$0.00");
}

#[test]
fn dashboard_lists_almost_done_goals() {
    let summary = DashboardSummary::compute(&Snapshot::default(), march_2024());
    let view = DashboardView::build(&summary, &[goal(1, "Close", "75", "100")], 3);
    let html = view.almost_done.unwrap();
    assert!(html.contains("Close"));
    assert!(html.contains("$75.00 / $100.00"));
}

#[test]
fn charts_cover_trailing_window() {
    let snapshot = Snapshot {
        income: vec![tx(1, "2024-03-02", "Pay", "100", None)],
        expenses: vec![
            tx(2, "2024-02-10", "Rent", "40", Some("Home")),
            tx(3, "2024-03-10", "Food", "10", None),
        ],
        goals: vec![],
    };
    let charts = ChartSet::build(&snapshot, march_2024(), 6);
    assert_eq!(charts.evolution.chart_type, ChartType::Line);
    assert_eq!(charts.evolution.data.labels.len(), 6);
    assert_eq!(charts.evolution.data.labels.last().map(String::as_str), Some("Mar 2024"));
    assert_eq!(charts.evolution.data.datasets[0].data.last(), Some(&100.0));
    assert_eq!(charts.expenses_by_month.data.datasets[0].data[4], 40.0);
    assert_eq!(charts.expense_distribution.chart_type, ChartType::Doughnut);
    assert_eq!(charts.expense_distribution.data.labels, vec!["Home", "Other"]);
    assert_eq!(
        charts.expense_comparison.data.labels,
        vec!["Feb 2024", "Mar 2024"]
    );
    assert_eq!(charts.expense_comparison.data.datasets[0].data, vec![40.0, 10.0]);

    let json = serde_json::to_value(&charts.evolution).unwrap();
    assert_eq!(json["type"], "line");
    assert!(json["data"]["datasets"][0]["borderColor"].is_string());
}

#[test]
fn oversized_chart_window_is_bounded() {
    let settings = Settings {
        chart_months: usize::MAX,
        ..Settings::default()
    };
    let views = Views::build(&Snapshot::default(), march_2024(), &settings);
    assert_eq!(views.charts.evolution.data.labels.len(), MAX_CHART_MONTHS);
    assert_eq!(
        views.charts.income_by_month.data.labels.last().map(String::as_str),
        Some("Mar 2024")
    );

    let empty = ChartSet::build(&Snapshot::default(), march_2024(), 0);
    assert_eq!(empty.evolution.data.labels, vec!["Mar 2024"]);
}

#[test]
fn page_embeds_chart_json_safely() {
    let snapshot = Snapshot {
        income: vec![],
        expenses: vec![tx(1, "2024-03-01", "Odd", "5", Some("</script>"))],
        goals: vec![],
    };
    let views = Views::build(&snapshot, march_2024(), &Settings::default());
    let profile = Profile {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
    };
    let html = render_page(Page::Expenses, &views, &profile);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<\/script>"#));
    assert!(html.contains("&lt;/script&gt;"));
    assert!(html.contains(r#"<a href="expenses.html" class="active">Expenses</a>"#));
    assert!(html.contains(">AL<"));
    assert!(html.contains(r#"data-month="2024-03""#));
    assert!(html.contains(r#"id="expenses_by_month""#));
}

#[test]
fn page_files_are_distinct() {
    let names: Vec<&str> = Page::ALL.iter().map(|p| p.file_name()).collect();
    assert_eq!(
        names,
        vec!["index.html", "income.html", "expenses.html", "goals.html"]
    );
}
