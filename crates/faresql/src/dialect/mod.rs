//! SQL dialect strategy.
//!
//! One implementation per supported database family. The active dialect is
//! an explicitly constructed configuration value ([`AccessConfig`]) passed
//! by reference into statements and substitutors; there is no process-wide
//! singleton to resolve.

mod generic;
mod oracle;
pub mod oracle_date;

pub use generic::GenericDialect;
pub use oracle::OracleDialect;

use chrono::NaiveDateTime;

use crate::error::AccessResult;
use crate::statement::SqlStatement;

/// Bitset recording which clauses a statement carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClauseState(u8);

impl ClauseState {
    const COMMAND: u8 = 1 << 0;
    const FROM: u8 = 1 << 1;
    const WHERE: u8 = 1 << 2;
    const GROUP_BY: u8 = 1 << 3;
    const ORDER_BY: u8 = 1 << 4;
    const LIMIT: u8 = 1 << 5;

    fn set(&mut self, bit: u8, present: bool) {
        if present {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    pub(crate) fn set_command(&mut self, present: bool) {
        self.set(Self::COMMAND, present);
    }
    pub(crate) fn set_from(&mut self, present: bool) {
        self.set(Self::FROM, present);
    }
    pub(crate) fn set_where(&mut self, present: bool) {
        self.set(Self::WHERE, present);
    }
    pub(crate) fn set_group_by(&mut self, present: bool) {
        self.set(Self::GROUP_BY, present);
    }
    pub(crate) fn set_order_by(&mut self, present: bool) {
        self.set(Self::ORDER_BY, present);
    }
    pub(crate) fn set_limit(&mut self, present: bool) {
        self.set(Self::LIMIT, present);
    }

    pub fn has_command(&self) -> bool {
        self.0 & Self::COMMAND != 0
    }
    pub fn has_from(&self) -> bool {
        self.0 & Self::FROM != 0
    }
    pub fn has_where(&self) -> bool {
        self.0 & Self::WHERE != 0
    }
    pub fn has_group_by(&self) -> bool {
        self.0 & Self::GROUP_BY != 0
    }
    pub fn has_order_by(&self) -> bool {
        self.0 & Self::ORDER_BY != 0
    }
    pub fn has_limit(&self) -> bool {
        self.0 & Self::LIMIT != 0
    }
}

/// One database family's SQL syntax and type-encoding quirks.
///
/// Implementations are stateless and shared; a statement never mutates its
/// dialect.
pub trait SqlDialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Emit `"table1 alias1 joinType table2 alias2 ON a.f = b.f [AND ...] "`.
    ///
    /// Each join field is qualified with the alias, or with the full table
    /// name when the alias is empty.
    fn generate_join_string(
        &self,
        table1: &str,
        alias1: &str,
        join_type: &str,
        table2: &str,
        alias2: &str,
        join_fields: &[&str],
    ) -> String {
        let left = if alias1.is_empty() { table1 } else { alias1 };
        let right = if alias2.is_empty() { table2 } else { alias2 };

        let mut out = String::new();
        out.push_str(table1);
        if !alias1.is_empty() {
            out.push(' ');
            out.push_str(alias1);
        }
        out.push(' ');
        out.push_str(join_type);
        out.push(' ');
        out.push_str(table2);
        if !alias2.is_empty() {
            out.push(' ');
            out.push_str(alias2);
        }
        out.push_str(" ON ");
        for (i, field) in join_fields.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            out.push_str(left);
            out.push('.');
            out.push_str(field);
            out.push_str(" = ");
            out.push_str(right);
            out.push('.');
            out.push_str(field);
        }
        out.push(' ');
        out
    }

    /// Dialect-specific row-limiting fragment.
    fn generate_limit_string(&self, limit: u64) -> String;

    /// Render a date literal (time of day ignored or zeroed per dialect),
    /// with fixed literals for the ±infinity sentinels.
    fn format_date_string(&self, dt: &NaiveDateTime) -> String;

    /// Render a timestamp literal, with fixed literals for the ±infinity
    /// sentinels.
    fn format_datetime_string(&self, dt: &NaiveDateTime) -> String;

    /// Reject clause combinations the dialect cannot execute correctly.
    fn check_state_validity(&self, state: ClauseState) -> AccessResult<()>;

    /// Assemble the final statement text from a validated clause set.
    fn construct_statement(&self, stmt: &SqlStatement) -> String;

    /// Capability flag: skip the table-definition-missing remapping step.
    fn ignore_table_def_missing(&self) -> bool {
        false
    }

    /// Capability flag: skip table-definition replacement.
    fn ignore_table_def_replacement(&self) -> bool {
        false
    }
}

/// Which dialect implementation is active. Resolved once at process start
/// from external configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialectKind {
    #[default]
    Generic,
    Oracle,
}

static GENERIC: GenericDialect = GenericDialect;
static ORACLE: OracleDialect = OracleDialect;

impl DialectKind {
    pub fn dialect(self) -> &'static dyn SqlDialect {
        match self {
            DialectKind::Generic => &GENERIC,
            DialectKind::Oracle => &ORACLE,
        }
    }
}

/// Process-level configuration for the data-access layer.
///
/// Constructed once at startup and passed by reference wherever a dialect
/// decision is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessConfig {
    pub dialect: DialectKind,
}

impl AccessConfig {
    pub fn new(dialect: DialectKind) -> Self {
        Self { dialect }
    }

    pub fn oracle() -> Self {
        Self::new(DialectKind::Oracle)
    }

    pub fn dialect(&self) -> &'static dyn SqlDialect {
        self.dialect.dialect()
    }
}

#[cfg(test)]
mod tests;
