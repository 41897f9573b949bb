// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::profile::{initials, load_profile, reset_profile, save_profile};
use crate::store::RecordStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<S: KeyValueStore>(store: &mut RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let p = load_profile(store);
            println!(
                "{}",
                pretty_table(
                    &["Initials", "Name", "Email"],
                    vec![vec![initials(&p.name), p.name, p.email]]
                )
            );
        }
        Some(("set", sub)) => {
            let current = load_profile(store);
            let name = sub.get_one::<String>("name").unwrap_or(&current.name);
            let email = sub.get_one::<String>("email").unwrap_or(&current.email);
            let saved = save_profile(store, name, email);
            println!("Profile saved: {} <{}>", saved.name, saved.email);
        }
        Some(("reset", _)) => {
            let p = reset_profile(store);
            println!("Profile reset to {} <{}>", p.name, p.email);
        }
        _ => {}
    }
    Ok(())
}
