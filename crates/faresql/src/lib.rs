//! # faresql
//!
//! The data-access substrate of a fare/ticketing engine: dialect-neutral
//! SQL templates rendered into dialect-correct statements with safely
//! bound parameters, plus a compressed, single-flight cache for the
//! expensive query results behind them.
//!
//! ## Features
//!
//! - **Placeholder substitution**: `%1` / `%1q` positional templates and
//!   free-form named placeholders rewritten into bind markers, never
//!   string-spliced user data
//! - **Dialect strategy**: one [`SqlDialect`] per database family; Oracle
//!   gets `ROWNUM` limits, packed bind dates and its own literal syntax
//!   without any of it leaking into call sites
//! - **Deferred bind indices**: final 1-based indices are assigned in text
//!   position order at bind time, independent of substitution order
//! - **Single-flight caching**: at most one `create()` per key under
//!   concurrency, non-blocking hits, compressed secondary tier
//!
//! ## Example
//!
//! ```
//! use faresql::{AccessConfig, ParameterSubstitutor, SqlStatement};
//!
//! let cfg = AccessConfig::default();
//! let mut stmt = SqlStatement::new();
//! stmt.command("select CARRIER, RULE")
//!     .from("FARERULE")
//!     .where_clause("CARRIER = %1");
//! let mut sql = stmt.construct_sql(cfg.dialect()).unwrap();
//!
//! let mut sub = ParameterSubstitutor::new(cfg.dialect());
//! sub.substitute(&mut sql, "AA", 1, false).unwrap();
//! assert_eq!(sql, "select CARRIER,RULE from FARERULE where CARRIER = :1");
//! ```

pub mod cache;
pub mod dialect;
pub mod error;
pub mod param;
pub mod statement;
pub mod substitutor;
pub mod value;

pub use cache::{CompressedCache, QuerySource, VectorPool};
pub use dialect::{
    AccessConfig, ClauseState, DialectKind, GenericDialect, OracleDialect, SqlDialect,
};
pub use dialect::oracle_date::OracleDate;
pub use error::{AccessError, AccessResult};
pub use param::{BoundParameter, ParameterBinder, UNBOUND_INDEX};
pub use statement::{SqlStatement, trim_all};
pub use substitutor::ParameterSubstitutor;
pub use value::{Value, is_neg_infinity, is_pos_infinity, neg_infinity, pos_infinity};
