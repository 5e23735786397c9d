//! Template substitution example
//!
//! Run with: cargo run --example substitution -p faresql
//!
//! Shows the path from a dialect-neutral template to an executable
//! statement: clause assembly, placeholder substitution, list expansion
//! and the audit rendering used in query logs.

use chrono::NaiveDate;
use faresql::{AccessConfig, AccessResult, ParameterSubstitutor, SqlStatement};

fn main() -> AccessResult<()> {
    // ============================================
    // Example 1: scalar placeholders on the generic dialect
    // ============================================
    let cfg = AccessConfig::default();

    let mut stmt = SqlStatement::new();
    stmt.command("select CARRIER, RULE, SEQNO")
        .from("FARERULE")
        .where_clause("CARRIER = %1 and RULE = %2")
        .order_by("SEQNO");
    let mut sql = stmt.construct_sql(cfg.dialect())?;

    let mut sub = ParameterSubstitutor::new(cfg.dialect());
    sub.substitute(&mut sql, "AA", 1, false)?;
    sub.substitute(&mut sql, "F001", 2, false)?;

    println!("=== Scalar substitution ===");
    println!("statement:  {sql}");
    println!("audit:      {}", sub.sql_string(&sql));
    println!("parameters: {}", sub.parameter_string());

    // ============================================
    // Example 2: carrier-list expansion
    // ============================================
    let mut sql = "select * from FARECLASS where CARRIER %1".to_string();
    let mut sub = ParameterSubstitutor::new(cfg.dialect());
    sub.substitute_carrier_list(&mut sql, &["AA", "BA", "LH"], 1)?;

    println!("\n=== Carrier list ===");
    println!("statement:  {sql}");
    println!("audit:      {}", sub.sql_string(&sql));

    // ============================================
    // Example 3: quoted and raw literal modes
    // ============================================
    let mut sql = "select * from TAXCODE where NATION = %1q and SEQNO > %2".to_string();
    let mut sub = ParameterSubstitutor::new(cfg.dialect());
    sub.substitute(&mut sql, "US", 1, true)?;
    sub.substitute(&mut sql, 1000i64, 2, true)?;

    println!("\n=== Literal mode ===");
    println!("statement:  {sql}");

    // ============================================
    // Example 4: Oracle dialect differences
    // ============================================
    let oracle = AccessConfig::oracle();

    let mut stmt = SqlStatement::new();
    stmt.command("select CARRIER, RULE")
        .from("FARERULE")
        .where_clause("CARRIER = %1 and CREATEDATE <= %2q")
        .limit(50);
    let mut sql = stmt.construct_sql(oracle.dialect())?;

    let travel_date = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut sub = ParameterSubstitutor::new(oracle.dialect());
    sub.substitute(&mut sql, "AA", 1, false)?;
    sub.substitute(&mut sql, travel_date.date(), 2, true)?;

    println!("\n=== Oracle ===");
    println!("statement:  {sql}");
    println!("audit:      {}", sub.sql_string(&sql));

    Ok(())
}
