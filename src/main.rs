// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use tallybook::config::Config;
use tallybook::db::{self, FileStore};
use tallybook::models::TransactionKind;
use tallybook::store::RecordStore;
use tallybook::{cli, commands};

fn main() -> Result<()> {
    tallybook::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let dir = db::data_dir(matches.get_one::<PathBuf>("data-dir").map(PathBuf::as_path))?;
    let config = Config::load(&dir);
    let mut store = RecordStore::new(FileStore::open(&dir)?);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data directory ready at {}", dir.display());
        }
        Some(("income", sub)) => {
            commands::transactions::handle(&mut store, &config, TransactionKind::Income, sub)?
        }
        Some(("expense", sub)) => {
            commands::transactions::handle(&mut store, &config, TransactionKind::Expense, sub)?
        }
        Some(("goal", sub)) => commands::goals::handle(&mut store, &config, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&store, &config, sub)?,
        Some(("render", sub)) => commands::site::handle(&store, &config, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
