// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Calendar month used as a filter key. `month` is zero-based (`0` = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthId {
    pub year: i32,
    pub month: u32,
}

impl MonthId {
    /// `None` unless `month` is in `0..=11`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (month < 12).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    pub fn previous(self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Short display label, e.g. `Mar 2024`.
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(d) => d.format("%b %Y").to_string(),
            None => format!("{}-{:02}", self.year, self.month + 1),
        }
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month + 1)
    }
}

pub fn current_month() -> MonthId {
    MonthId::of(Local::now().date_naive())
}

pub fn previous_month() -> MonthId {
    current_month().previous()
}

/// The `n` months ending at the current month, oldest first.
pub fn trailing_months(n: usize) -> Vec<(MonthId, String)> {
    trailing_months_from(current_month(), n)
}

/// The `n` months ending at `anchor`, oldest first, with display labels.
pub fn trailing_months_from(anchor: MonthId, n: usize) -> Vec<(MonthId, String)> {
    let mut out = Vec::with_capacity(n);
    let mut m = anchor;
    for _ in 0..n {
        out.push((m, m.label()));
        m = m.previous();
    }
    out.reverse();
    out
}
