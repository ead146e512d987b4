mod common;

use chrono::Duration;
use networth::{domain::EntryKind, NetworthError, ValidationError};

use common::session_at;

#[test]
fn recording_an_expense_updates_total_and_stamps() {
    let (session, _clock) = session_at(2024, 5, 10, 1000.0);
    let ledger = session.ledger();

    let recorded = ledger
        .record_transaction(EntryKind::Expense, "lunch", 250.0)
        .expect("record lunch");

    assert_eq!(recorded.net_worth, 750.0);
    assert_eq!(recorded.entry.amount, 250.0);
    assert_eq!(recorded.entry.date, "5/10/2024");
    assert_eq!(recorded.entry.month, "May 2024");
    assert_eq!(ledger.entries_for_today().unwrap(), vec![recorded.entry]);
}

#[test]
fn income_raises_total() {
    let (session, _clock) = session_at(2024, 5, 10, 0.0);
    let ledger = session.ledger();
    ledger
        .record_transaction(EntryKind::Income, "salary", 3000.0)
        .unwrap();
    let recorded = ledger
        .record_transaction(EntryKind::Income, "bonus", 500.0)
        .unwrap();
    assert_eq!(recorded.delta, 500.0);
    assert_eq!(recorded.net_worth, 3500.0);
    assert_eq!(ledger.net_worth().unwrap(), 3500.0);
}

#[test]
fn invalid_input_changes_nothing() {
    let (session, _clock) = session_at(2024, 5, 10, 1000.0);
    let ledger = session.ledger();

    let empty = ledger.record_transaction(EntryKind::Expense, "", 10.0);
    assert!(matches!(
        empty,
        Err(NetworthError::Validation(ValidationError::EmptyReason))
    ));
    let nan = ledger.record_transaction(EntryKind::Expense, "snack", f64::NAN);
    assert!(matches!(
        nan,
        Err(NetworthError::Validation(ValidationError::InvalidAmount(_)))
    ));
    assert!(ledger.record_raw("expense", "snack", "ten").is_err());

    assert!(ledger.entries_for_today().unwrap().is_empty());
    assert_eq!(ledger.net_worth().unwrap(), 1000.0);
}

#[test]
fn today_view_excludes_other_days() {
    let (session, clock) = session_at(2024, 5, 9, 0.0);
    let ledger = session.ledger();
    ledger
        .record_transaction(EntryKind::Expense, "yesterday", 5.0)
        .unwrap();

    clock.advance(Duration::days(1));
    assert!(ledger.entries_for_today().unwrap().is_empty());

    let today = ledger
        .record_transaction(EntryKind::Expense, "today", 7.0)
        .unwrap();
    let view = ledger.entries_for_today().unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, today.entry.id);
}

#[test]
fn delete_removes_exactly_one_entry() {
    let (session, _clock) = session_at(2024, 5, 10, 0.0);
    let ledger = session.ledger();
    let a = ledger.record_transaction(EntryKind::Expense, "a", 1.0).unwrap();
    let b = ledger.record_transaction(EntryKind::Expense, "b", 2.0).unwrap();
    let c = ledger.record_transaction(EntryKind::Income, "c", 3.0).unwrap();

    assert!(ledger.delete_entry(b.entry.id).unwrap());
    let ids: Vec<u64> = ledger
        .entries_for_today()
        .unwrap()
        .iter()
        .map(|entry| entry.id)
        .collect();
    assert_eq!(ids, vec![a.entry.id, c.entry.id]);
    assert_eq!(ledger.net_worth().unwrap(), 2.0);
}

#[test]
fn deleting_unknown_id_is_silent() {
    let (session, _clock) = session_at(2024, 5, 10, 0.0);
    let ledger = session.ledger();
    ledger.record_transaction(EntryKind::Expense, "a", 1.0).unwrap();
    assert!(!ledger.delete_entry(404).unwrap());
    assert_eq!(ledger.entries_for_today().unwrap().len(), 1);
}

#[test]
fn last_month_stats_split_spending_and_matches() {
    let (session, clock) = session_at(2024, 4, 15, 0.0);
    let ledger = session.ledger();
    ledger
        .record_transaction(EntryKind::Expense, "rent", 1200.0)
        .unwrap();
    ledger
        .record_transaction(EntryKind::Expense, "coffee", 4.0)
        .unwrap();
    ledger
        .record_transaction(EntryKind::Income, "salary", 3000.0)
        .unwrap();

    clock.advance(Duration::days(30));
    ledger
        .record_transaction(EntryKind::Expense, "may groceries", 800.0)
        .unwrap();

    let stats = ledger.stats_for_last_month(100.0).unwrap();
    assert_eq!(stats.month, "April 2024");
    assert_eq!(stats.total_spent, 1204.0);
    let reasons: Vec<&str> = stats
        .matching_entries
        .iter()
        .map(|entry| entry.reason.as_str())
        .collect();
    assert_eq!(reasons, vec!["rent", "salary"]);
}

#[test]
fn last_month_stats_are_empty_without_entries() {
    let (session, _clock) = session_at(2024, 1, 3, 0.0);
    let stats = session.ledger().stats_for_last_month(0.0).unwrap();
    assert_eq!(stats.month, "December 2023");
    assert_eq!(stats.total_spent, 0.0);
    assert!(stats.matching_entries.is_empty());
}

#[test]
fn month_view_filters_by_label() {
    let (session, clock) = session_at(2024, 3, 31, 0.0);
    let ledger = session.ledger();
    ledger.record_transaction(EntryKind::Expense, "march", 1.0).unwrap();
    clock.advance(Duration::days(1));
    ledger.record_transaction(EntryKind::Expense, "april", 1.0).unwrap();

    let march = ledger.entries_for_month("March 2024").unwrap();
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].reason, "march");
    assert_eq!(ledger.last_month_label(), "March 2024");
}

#[test]
fn concurrent_recordings_each_report_their_own_total() {
    let (session, _clock) = session_at(2024, 5, 10, 0.0);
    let shared = &session;

    let mut totals: Vec<f64> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(move || {
                    let ledger = shared.ledger();
                    (0..20)
                        .map(|_| {
                            ledger
                                .record_transaction(EntryKind::Income, "tip", 1.0)
                                .expect("record tip")
                                .net_worth
                        })
                        .collect::<Vec<f64>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|worker| worker.join().expect("worker thread"))
            .collect()
    });

    totals.sort_by(|a, b| a.total_cmp(b));
    let expected: Vec<f64> = (1..=40).map(f64::from).collect();
    assert_eq!(totals, expected);
    assert_eq!(session.ledger().net_worth().unwrap(), 40.0);
}

#[test]
fn unknown_kind_error_echoes_the_raw_text() {
    let (session, _clock) = session_at(2024, 5, 10, 0.0);
    let err = session
        .ledger()
        .record_raw("  Transfer", "move", "5")
        .expect_err("unknown kind");
    assert!(matches!(
        err,
        NetworthError::Validation(ValidationError::UnknownKind(ref text)) if text == "  Transfer"
    ));
}
