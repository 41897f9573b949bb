// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{coerce_amount, parse_record_date};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// `$1,234.56`; negatives as `-$1,234.56`. Rounds half away from zero.
pub fn format_currency(v: Decimal) -> String {
    let rounded = v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Formats any JSON value as currency; non-numeric input formats as zero.
pub fn format_currency_value(v: &Value) -> String {
    format_currency(coerce_amount(v))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Escapes `& < > " '` for interpolation into markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Like [`escape_html`] for optional text: absent maps to the empty string.
pub fn escape_opt(s: Option<&str>) -> String {
    s.map(escape_html).unwrap_or_default()
}

/// Signed percentage, e.g. `+50%`, `-33%`, `+0%`.
pub fn format_signed_percent(pct: i64) -> String {
    if pct >= 0 {
        format!("+{}%", pct)
    } else {
        format!("{}%", pct)
    }
}

/// Short numeric date (`3/5/2024`), or `None` if the stored text does not parse.
pub fn format_short_date(raw: &str) -> Option<String> {
    parse_record_date(raw).map(|d| d.format("%-m/%-d/%Y").to_string())
}
