// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::GoalProgress;
use crate::config::Config;
use crate::db::KeyValueStore;
use crate::format::format_currency;
use crate::forms::{FormController, GoalForm};
use crate::models::Collection;
use crate::render::GoalTier;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    config: &Config,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, config, sub)?,
        Some(("progress", sub)) => progress(store, config, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").map(String::as_str).unwrap_or(""))?;
            FormController::new(store, config.settings).delete(Collection::Goals, id);
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn form_from_matches(sub: &clap::ArgMatches) -> GoalForm {
    let field = |name: &str| sub.get_one::<String>(name).cloned().unwrap_or_default();
    GoalForm {
        title: field("title"),
        target: field("target"),
        deadline: field("deadline"),
    }
}

fn add<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    config: &Config,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let form = form_from_matches(sub);
    let mut ctl = FormController::new(store, config.settings);
    let done = ctl.submit_goal(&form)?;
    println!(
        "Created goal '{}' (id {}) targeting {}",
        done.record.title,
        done.record.id,
        format_currency(done.record.target)
    );
    Ok(())
}

fn progress<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    config: &Config,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = sub.get_one::<String>("id").map(String::as_str);
    let current = sub.get_one::<String>("current").map(String::as_str).unwrap_or("");
    let mut ctl = FormController::new(store, config.settings);
    let done = ctl.submit_goal_progress(id, current)?;
    match done.record {
        Some(goal) => {
            let p = GoalProgress::of(&goal);
            println!(
                "'{}': {} of {} ({}%). {}",
                goal.title,
                format_currency(goal.current),
                format_currency(goal.target),
                p.percent,
                GoalTier::for_percent(p.percent).message()
            );
        }
        None => println!("No goal with id {}", id.unwrap_or("")),
    }
    Ok(())
}

fn list<S: KeyValueStore>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<GoalProgress> = store.goals().iter().rev().map(GoalProgress::of).collect();
    if maybe_print_json(sub.get_flag("json"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No goals yet.");
        return Ok(());
    }
    let rows = data
        .into_iter()
        .map(|p| {
            vec![
                p.goal.id.to_string(),
                p.goal.title,
                format_currency(p.goal.current),
                format_currency(p.goal.target),
                format!("{}%", p.percent),
                GoalTier::for_percent(p.percent).message().to_string(),
                p.goal.deadline.unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Title", "Saved", "Target", "Progress", "", "Deadline"],
            rows
        )
    );
    Ok(())
}
