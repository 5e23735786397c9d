use super::*;
use chrono::NaiveDate;

use crate::value::{neg_infinity, pos_infinity};

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

#[test]
fn join_string_qualifies_with_aliases() {
    let d = DialectKind::Generic.dialect();
    let join = d.generate_join_string(
        "FARERULE",
        "r",
        "LEFT OUTER JOIN",
        "FARECLASS",
        "c",
        &["CARRIER", "RULE"],
    );
    assert_eq!(
        join,
        "FARERULE r LEFT OUTER JOIN FARECLASS c ON r.CARRIER = c.CARRIER AND r.RULE = c.RULE "
    );
}

#[test]
fn join_string_falls_back_to_table_names_without_aliases() {
    let d = DialectKind::Generic.dialect();
    let join = d.generate_join_string("A", "", "JOIN", "B", "", &["ID"]);
    assert_eq!(join, "A JOIN B ON A.ID = B.ID ");
}

#[test]
fn limit_fragments_differ_per_dialect() {
    assert_eq!(
        DialectKind::Generic.dialect().generate_limit_string(25),
        " LIMIT 25"
    );
    assert_eq!(
        DialectKind::Oracle.dialect().generate_limit_string(25),
        " ROWNUM <= 25"
    );
}

#[test]
fn generic_date_literals() {
    let d = DialectKind::Generic.dialect();
    assert_eq!(d.format_date_string(&dt(2024, 5, 1, 0, 0, 0)), "'2024-05-01'");
    assert_eq!(
        d.format_datetime_string(&dt(2024, 5, 1, 12, 30, 45)),
        "'2024-05-01 12:30:45'"
    );
}

#[test]
fn oracle_date_literals_use_nls_session_format() {
    let d = DialectKind::Oracle.dialect();
    assert_eq!(
        d.format_date_string(&dt(2024, 5, 1, 12, 30, 45)),
        "'2024-05-01:00:00:00'"
    );
    assert_eq!(
        d.format_datetime_string(&dt(2024, 5, 1, 12, 30, 45)),
        "'2024-05-01:12:30:45.000000'"
    );
}

#[test]
fn each_dialect_keeps_its_own_infinity_literals() {
    let generic = DialectKind::Generic.dialect();
    let oracle = DialectKind::Oracle.dialect();

    assert_eq!(
        generic.format_datetime_string(&pos_infinity()),
        "'9999-12-31 23:59:59'"
    );
    assert_eq!(
        oracle.format_datetime_string(&pos_infinity()),
        "'9999-12-31:23:59:59.999000'"
    );
    assert_eq!(
        generic.format_datetime_string(&neg_infinity()),
        "'0001-01-01 00:00:00'"
    );
    assert_eq!(
        oracle.format_datetime_string(&neg_infinity()),
        "'0001-01-01:00:00:00'"
    );
    assert_eq!(generic.format_date_string(&pos_infinity()), "'9999-12-31'");
    assert_eq!(
        oracle.format_date_string(&neg_infinity()),
        "'0001-01-01:00:00:00'"
    );
}

#[test]
fn oracle_disables_table_def_remapping() {
    let generic = DialectKind::Generic.dialect();
    let oracle = DialectKind::Oracle.dialect();
    assert!(!generic.ignore_table_def_missing());
    assert!(!generic.ignore_table_def_replacement());
    assert!(oracle.ignore_table_def_missing());
    assert!(oracle.ignore_table_def_replacement());
}

#[test]
fn clause_state_bits_toggle_independently() {
    let mut state = ClauseState::default();
    assert!(!state.has_where());
    state.set_where(true);
    state.set_order_by(true);
    assert!(state.has_where());
    assert!(state.has_order_by());
    assert!(!state.has_limit());
    state.set_where(false);
    assert!(!state.has_where());
    assert!(state.has_order_by());
}
