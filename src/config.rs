// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SETTINGS_FILE: &str = "settings.json";

/// Longest trailing window the charts will cover.
pub const MAX_CHART_MONTHS: usize = 120;

/// Tunables read from `settings.json` in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Months shown by the trailing-window charts.
    pub chart_months: usize,
    /// Goal cards shown on the dashboard.
    pub dashboard_goals: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chart_months: 6,
            dashboard_goals: 3,
        }
    }
}

impl Settings {
    /// Pulls `chart_months` into `1..=MAX_CHART_MONTHS`.
    pub fn clamped(self) -> Self {
        let chart_months = self.chart_months.clamp(1, MAX_CHART_MONTHS);
        if chart_months != self.chart_months {
            warn!(
                requested = self.chart_months,
                used = chart_months,
                "chart_months out of range"
            );
        }
        Self {
            chart_months,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub settings: Settings,
}

impl Config {
    /// Loads settings from `data_dir`. A missing file means defaults; an
    /// unreadable or malformed one is logged and also means defaults.
    /// Out-of-range values are clamped.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        let settings = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), "ignoring malformed settings: {}", e);
                Settings::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                warn!(path = %path.display(), "could not read settings: {}", e);
                Settings::default()
            }
        };
        Self {
            data_dir: data_dir.to_path_buf(),
            settings: settings.clamped(),
        }
    }
}
