// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::MonthComparison;
use crate::config::Config;
use crate::db::KeyValueStore;
use crate::format::format_currency;
use crate::forms::{FormController, TransactionForm};
use crate::models::TransactionKind;
use crate::months::current_month;
use crate::render::comparison_view;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    config: &Config,
    kind: TransactionKind,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, config, kind, sub)?,
        Some(("edit", sub)) => edit(store, config, kind, sub)?,
        Some(("list", sub)) => list(store, kind, sub)?,
        Some(("rm", sub)) => remove(store, config, kind, sub)?,
        Some(("compare", sub)) => compare(store, kind, sub)?,
        _ => {}
    }
    Ok(())
}

/// Collects the form fields from `add`/`edit` arguments, blanks for missing.
pub fn form_from_matches(sub: &clap::ArgMatches) -> TransactionForm {
    let field = |name: &str| sub.get_one::<String>(name).cloned().unwrap_or_default();
    TransactionForm {
        date: field("date"),
        description: field("description"),
        amount: field("amount"),
        category: field("category"),
    }
}

fn add<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    config: &Config,
    kind: TransactionKind,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let form = form_from_matches(sub);
    let mut ctl = FormController::new(store, config.settings);
    let done = ctl.submit_transaction(kind, &form)?;
    let view = match kind {
        TransactionKind::Income => &done.views.income_comparison,
        TransactionKind::Expense => &done.views.expense_comparison,
    };
    println!(
        "Recorded {} '{}' (id {}). This month: {} ({})",
        format_currency(done.record.amount),
        done.record.description,
        done.record.id,
        view.current,
        view.variation
    );
    Ok(())
}

fn edit<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    config: &Config,
    kind: TransactionKind,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let form = form_from_matches(sub);
    let id = sub.get_one::<String>("id").map(String::as_str);
    let mut ctl = FormController::new(store, config.settings);
    let done = ctl.submit_edit(kind, id, &form)?;
    match done.record {
        Some(r) => println!(
            "Updated '{}' (id {}) to {}",
            r.description,
            r.id,
            format_currency(r.amount)
        ),
        None => println!("No {} entry with id {}", kind.label().to_lowercase(), id.unwrap_or("")),
    }
    Ok(())
}

fn remove<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    config: &Config,
    kind: TransactionKind,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").map(String::as_str).unwrap_or(""))?;
    let mut ctl = FormController::new(store, config.settings);
    let views = ctl.delete(kind.collection(), id);
    let view = match kind {
        TransactionKind::Income => &views.income_comparison,
        TransactionKind::Expense => &views.expense_comparison,
    };
    println!("Removed entry {}. This month: {}", id, view.current);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
}

/// Rows for `list`, newest entry first.
pub fn query_rows<S: KeyValueStore>(
    store: &RecordStore<S>,
    kind: TransactionKind,
) -> Vec<TransactionRow> {
    store
        .transactions(kind)
        .into_iter()
        .rev()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.clone().unwrap_or_default(),
            category: t.category_or_default().to_string(),
            amount: format_currency(t.amount),
            description: t.description,
        })
        .collect()
}

fn list<S: KeyValueStore>(
    store: &RecordStore<S>,
    kind: TransactionKind,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = query_rows(store, kind);
    if maybe_print_json(sub.get_flag("json"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No records found.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .into_iter()
        .map(|r| vec![r.id.to_string(), r.date, r.description, r.category, r.amount])
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Description", "Category", "Amount"], rows)
    );
    Ok(())
}

fn compare<S: KeyValueStore>(
    store: &RecordStore<S>,
    kind: TransactionKind,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let month = current_month();
    let cmp = MonthComparison::compute(kind, &store.transactions(kind), month);
    let view = comparison_view(&cmp);
    if maybe_print_json(sub.get_flag("json"), &view)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Kind", "Last month", "This month", "Change"],
            vec![vec![
                kind.label().to_string(),
                view.previous,
                view.current,
                view.variation,
            ]],
        )
    );
    Ok(())
}
