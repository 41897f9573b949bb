// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tallybook::db::{FileStore, KeyValueStore, MemoryStore};
use tallybook::models::{
    Collection, Goal, GoalDraft, GoalPatch, Transaction, TransactionDraft, TransactionPatch,
};
use tallybook::store::{CollectionHealth, RecordStore};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn draft(desc: &str, amount: &str, date: Option<&str>) -> TransactionDraft {
    TransactionDraft {
        date: date.map(str::to_string),
        description: desc.to_string(),
        amount: dec(amount),
        category: None,
    }
}

fn setup() -> RecordStore<MemoryStore> {
    RecordStore::new(MemoryStore::new())
}

#[test]
fn create_then_get_by_id_round_trips() {
    let mut store = setup();
    let created: Transaction = store.create(
        Collection::Income,
        TransactionDraft {
            date: Some("2024-03-05".into()),
            description: "Salary".into(),
            amount: dec("2500.75"),
            category: Some("Work".into()),
        },
    );
    let fetched: Transaction = store.get_by_id(Collection::Income, created.id).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.description, "Salary");
    assert_eq!(fetched.amount, dec("2500.75"));
    assert_eq!(fetched.category.as_deref(), Some("Work"));
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut store = setup();
    let ids: Vec<i64> = (0..5)
        .map(|i| {
            store
                .create::<Transaction>(Collection::Expenses, draft(&format!("e{}", i), "1", None))
                .id
        })
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn update_merges_only_supplied_fields() {
    let mut store = setup();
    let g: Goal = store.create(
        Collection::Goals,
        GoalDraft {
            title: "Trip".into(),
            target: dec("1000"),
            current: Decimal::ZERO,
            deadline: Some("2025-12-31".into()),
        },
    );
    let patch = GoalPatch {
        current: Some(dec("250")),
        ..GoalPatch::default()
    };
    let updated = store.update::<Goal>(Collection::Goals, g.id, patch).unwrap();
    assert_eq!(updated.current, dec("250"));
    assert_eq!(updated.title, "Trip");
    assert_eq!(updated.target, dec("1000"));
    assert_eq!(updated.deadline.as_deref(), Some("2025-12-31"));
    assert_eq!(store.get_by_id::<Goal>(Collection::Goals, g.id), Some(updated));
}

#[test]
fn update_can_clear_optional_field() {
    let mut store = setup();
    let t: Transaction = store.create(Collection::Income, draft("Gift", "20", Some("2024-01-01")));
    let patch = TransactionPatch {
        date: Some(None),
        ..TransactionPatch::default()
    };
    let updated = store.update::<Transaction>(Collection::Income, t.id, patch).unwrap();
    assert_eq!(updated.date, None);
    assert_eq!(updated.description, "Gift");
}

#[test]
fn update_unknown_id_leaves_store_unchanged() {
    let mut store = setup();
    let _: Transaction = store.create(Collection::Income, draft("A", "10", None));
    let before = store.backend().get("income").unwrap();
    let res = store.update::<Transaction>(Collection::Income, 42, TransactionPatch::default());
    assert!(res.is_none());
    assert_eq!(store.backend().get("income").unwrap(), before);
}

#[test]
fn delete_removes_only_target_and_keeps_order() {
    let mut store = setup();
    let a: Transaction = store.create(Collection::Expenses, draft("A", "1", None));
    let b: Transaction = store.create(Collection::Expenses, draft("B", "2", None));
    let c: Transaction = store.create(Collection::Expenses, draft("C", "3", None));
    store.delete::<Transaction>(Collection::Expenses, b.id);
    let left: Vec<Transaction> = store.list(Collection::Expenses);
    assert_eq!(left, vec![a, c]);
}

#[test]
fn delete_unknown_id_does_not_write() {
    let mut store = setup();
    store
        .backend_mut()
        .set("goals", r#"[{"id":1,"title":"Bike","target":300}]"#)
        .unwrap();
    store.delete::<Goal>(Collection::Goals, 99);
    assert_eq!(
        store.backend().get("goals").unwrap().as_deref(),
        Some(r#"[{"id":1,"title":"Bike","target":300}]"#)
    );
}

#[test]
fn list_is_idempotent() {
    let mut store = setup();
    let _: Transaction = store.create(Collection::Income, draft("A", "1", None));
    let _: Transaction = store.create(Collection::Income, draft("B", "2", None));
    let first: Vec<Transaction> = store.list(Collection::Income);
    let second: Vec<Transaction> = store.list(Collection::Income);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn absent_and_corrupt_collections_read_as_empty() {
    let mut store = setup();
    assert!(store.list::<Transaction>(Collection::Income).is_empty());
    store.backend_mut().set("income", "{not json").unwrap();
    assert!(store.list::<Transaction>(Collection::Income).is_empty());
    store.backend_mut().set("income", "null").unwrap();
    assert!(store.list::<Transaction>(Collection::Income).is_empty());
}

#[test]
fn malformed_entries_are_skipped_and_amounts_coerced() {
    let mut store = setup();
    store
        .backend_mut()
        .set(
            "expenses",
            r#"[
                {"id": 1, "description": "Lunch", "amount": "12,5", "date": "2024-03-01", "category": ""},
                {"description": "no id", "amount": 3},
                {"id": 2, "description": "Odd", "amount": "abc", "date": ""}
            ]"#,
        )
        .unwrap();
    let items: Vec<Transaction> = store.list(Collection::Expenses);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].amount, dec("12.5"));
    assert_eq!(items[0].category, None);
    assert_eq!(items[0].category_or_default(), "Other");
    assert_eq!(items[1].amount, Decimal::ZERO);
    assert_eq!(items[1].date, None);
    assert_eq!(
        store.inspect::<Transaction>(Collection::Expenses),
        CollectionHealth::Healthy {
            records: 2,
            rejected: 1
        }
    );
}

#[test]
fn inspect_reports_missing_and_corrupt() {
    let mut store = setup();
    assert_eq!(
        store.inspect::<Goal>(Collection::Goals),
        CollectionHealth::Missing
    );
    store.backend_mut().set("goals", "[1,").unwrap();
    assert!(matches!(
        store.inspect::<Goal>(Collection::Goals),
        CollectionHealth::Corrupt { .. }
    ));
}

#[test]
fn failed_write_is_swallowed() {
    let mut store = RecordStore::new(MemoryStore::with_quota(16));
    let t: Transaction = store.create(
        Collection::Income,
        draft("A description long enough to blow the quota", "10", None),
    );
    assert_eq!(t.description, "A description long enough to blow the quota");
    assert!(store.list::<Transaction>(Collection::Income).is_empty());
}

#[test]
fn amounts_persist_as_json_numbers() {
    let mut store = setup();
    let _: Transaction = store.create(Collection::Income, draft("A", "100", None));
    let _: Transaction = store.create(Collection::Income, draft("B", "12.5", None));
    let raw = store.backend().get("income").unwrap().unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v[0]["amount"], serde_json::json!(100));
    assert_eq!(v[1]["amount"], serde_json::json!(12.5));
    assert!(v[0].get("date").is_none());
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let mut store = RecordStore::new(FileStore::open(dir.path()).unwrap());
        let t: Transaction = store.create(
            Collection::Income,
            draft("Salary", "3000", Some("2024-02-01")),
        );
        t.id
    };
    assert!(dir.path().join("income.json").exists());
    let store = RecordStore::new(FileStore::open(dir.path()).unwrap());
    let t: Transaction = store.get_by_id(Collection::Income, id).unwrap();
    assert_eq!(t.description, "Salary");
    assert_eq!(t.amount, dec("3000"));
}

#[test]
fn file_store_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut fs = FileStore::open(dir.path()).unwrap();
    fs.set("profile", "{}").unwrap();
    fs.remove("profile").unwrap();
    fs.remove("profile").unwrap();
    assert_eq!(fs.get("profile").unwrap(), None);
}

#[test]
fn create_after_largest_possible_id_uses_lowest_free_id() {
    let mut store = setup();
    store
        .backend_mut()
        .set("income", r#"[{"id":9223372036854775807,"description":"max","amount":1}]"#)
        .unwrap();
    let t: Transaction = store.create(Collection::Income, draft("next", "2", None));
    assert_eq!(t.id, 1);
    let ids: Vec<i64> = store
        .list::<Transaction>(Collection::Income)
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![i64::MAX, 1]);
}

fn raw_entries(store: &RecordStore<MemoryStore>, key: &str) -> Vec<serde_json::Value> {
    let raw = store.backend().get(key).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn mutations_keep_undecodable_entries() {
    let mut store = setup();
    store
        .backend_mut()
        .set(
            "expenses",
            r#"[{"id":"7","description":"legacy","amount":3},{"id":1,"description":"ok","amount":2}]"#,
        )
        .unwrap();

    store.delete::<Transaction>(Collection::Expenses, 1);
    let raw = raw_entries(&store, "expenses");
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0]["description"], "legacy");
    assert_eq!(raw[0]["id"], "7");

    let t: Transaction = store.create(Collection::Expenses, draft("new", "4", None));
    let patch = TransactionPatch {
        description: Some("renamed".into()),
        ..TransactionPatch::default()
    };
    store.update::<Transaction>(Collection::Expenses, t.id, patch).unwrap();
    let raw = raw_entries(&store, "expenses");
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["description"], "legacy");
    assert_eq!(raw[1]["description"], "renamed");
    assert_eq!(store.list::<Transaction>(Collection::Expenses).len(), 1);
}

#[test]
fn delete_matches_numeric_string_ids() {
    let mut store = setup();
    store
        .backend_mut()
        .set(
            "expenses",
            r#"[{"id":"7","description":"legacy","amount":3},{"id":1,"description":"ok","amount":2}]"#,
        )
        .unwrap();
    store.delete::<Transaction>(Collection::Expenses, 7);
    let raw = raw_entries(&store, "expenses");
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0]["id"], 1);
}

#[test]
fn amounts_beyond_float_precision_round_trip() {
    let mut store = setup();
    let digits = "0.1234567890123456789";
    let long: Transaction = store.create(Collection::Income, draft("long", digits, None));
    let huge: Transaction = store.create(
        Collection::Income,
        TransactionDraft {
            amount: Decimal::MAX,
            ..draft("huge", "1", None)
        },
    );
    let stored: Vec<Transaction> = store.list(Collection::Income);
    assert_eq!(stored[0].amount, long.amount);
    assert_eq!(stored[1].amount, huge.amount);
    let raw = raw_entries(&store, "income");
    assert_eq!(raw[0]["amount"], digits);
}
