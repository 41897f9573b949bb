// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{DashboardSummary, Snapshot, almost_done_goals, top_goals};
use crate::config::Config;
use crate::db::KeyValueStore;
use crate::format::format_currency;
use crate::months::current_month;
use crate::profile::load_profile;
use crate::render::SummaryCard;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValueStore>(
    store: &RecordStore<S>,
    config: &Config,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let snapshot = Snapshot::load(store);
    let summary = DashboardSummary::compute(&snapshot, current_month());
    let limit = config.settings.dashboard_goals;
    if maybe_print_json(sub.get_flag("json"), &summary)? {
        return Ok(());
    }

    let profile = load_profile(store);
    println!("{} · {}", profile.name, summary.month);
    let card = |label: &str, c: &SummaryCard| {
        vec![
            label.to_string(),
            c.total.clone(),
            c.comparison
                .as_ref()
                .map(|b| b.text.clone())
                .unwrap_or_default(),
        ]
    };
    let income = SummaryCard::from_comparison(&summary.income);
    let expenses = SummaryCard::from_comparison(&summary.expenses);
    println!(
        "{}",
        pretty_table(
            &["", "This month", "Compared to last month"],
            vec![
                card("Income", &income),
                card("Expenses", &expenses),
                vec![
                    "Balance".to_string(),
                    format_currency(summary.balance),
                    String::new()
                ],
            ],
        )
    );

    let almost = almost_done_goals(&snapshot.goals, limit);
    if !almost.is_empty() {
        println!("Almost there:");
        let rows = almost
            .into_iter()
            .map(|g| {
                vec![
                    g.goal.title,
                    format!("{}%", g.percent),
                    format!(
                        "{} / {}",
                        format_currency(g.goal.current),
                        format_currency(g.goal.target)
                    ),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Progress", "Saved"], rows));
    }

    let top = top_goals(&snapshot.goals, limit);
    if top.is_empty() {
        println!("You have no goals yet. Create one with `tallybook goal add`.");
    } else {
        let rows = top
            .into_iter()
            .map(|g| {
                vec![
                    g.goal.title,
                    format!("{}%", g.percent),
                    g.goal.deadline.unwrap_or_else(|| "No deadline".to_string()),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Progress", "Deadline"], rows));
    }
    Ok(())
}
