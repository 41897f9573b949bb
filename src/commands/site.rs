// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Snapshot;
use crate::config::Config;
use crate::db::KeyValueStore;
use crate::months::{MonthId, current_month};
use crate::profile::load_profile;
use crate::render::{Page, Views, render_page};
use crate::store::RecordStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn handle<S: KeyValueStore>(
    store: &RecordStore<S>,
    config: &Config,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let out = sub
        .get_one::<PathBuf>("out")
        .context("--out is required")?;
    let written = write_site(store, config, current_month(), out)?;
    for p in written {
        println!("Wrote {}", p.display());
    }
    Ok(())
}

/// Renders every page from one snapshot into `out`, returning the paths.
pub fn write_site<S: KeyValueStore>(
    store: &RecordStore<S>,
    config: &Config,
    month: MonthId,
    out: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let views = Views::build(&Snapshot::load(store), month, &config.settings);
    let profile = load_profile(store);
    let mut written = Vec::new();
    for page in Page::ALL {
        let path = out.join(page.file_name());
        fs::write(&path, render_page(page, &views, &profile))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(page = page.title(), path = %path.display(), "rendered page");
        written.push(path);
    }
    Ok(written)
}
