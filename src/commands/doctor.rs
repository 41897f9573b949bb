// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::models::{Collection, Goal, Transaction, TransactionKind};
use crate::store::{CollectionHealth, RecordStore};
use crate::utils::{parse_record_date, pretty_table};
use anyhow::Result;

/// `(issue, detail)` pairs for everything that would be silently dropped or
/// ignored when the collections are read.
pub fn diagnose<S: KeyValueStore>(store: &RecordStore<S>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Collections that fail to decode or hold rejected records
    for c in Collection::ALL {
        let health = match c {
            Collection::Goals => store.inspect::<Goal>(c),
            _ => store.inspect::<Transaction>(c),
        };
        match health {
            CollectionHealth::Corrupt { reason } => {
                rows.push(vec!["corrupt_collection".into(), format!("{}: {}", c.key(), reason)])
            }
            CollectionHealth::Healthy { rejected, .. } if rejected > 0 => rows.push(vec![
                "rejected_records".into(),
                format!("{}: {}", c.key(), rejected),
            ]),
            _ => {}
        }
    }

    // 2) Entries left out of monthly totals
    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        for t in store.transactions(kind) {
            match t.date.as_deref() {
                None => rows.push(vec![
                    "undated_entry".into(),
                    format!("{} #{} '{}'", kind.collection().key(), t.id, t.description),
                ]),
                Some(d) if parse_record_date(d).is_none() => rows.push(vec![
                    "unparseable_date".into(),
                    format!("{} #{} '{}'", kind.collection().key(), t.id, d),
                ]),
                _ => {}
            }
        }
    }
    rows
}

pub fn handle<S: KeyValueStore>(store: &RecordStore<S>) -> Result<()> {
    let rows = diagnose(store);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
