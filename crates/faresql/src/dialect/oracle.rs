use chrono::NaiveDateTime;

use super::{ClauseState, SqlDialect};
use crate::error::{AccessError, AccessResult};
use crate::statement::SqlStatement;
use crate::value::{is_neg_infinity, is_pos_infinity};

/// Oracle dialect.
///
/// Oracle has no `LIMIT` keyword; the row ceiling is a `ROWNUM` predicate
/// spliced into the WHERE clause. Literal date syntax follows the session
/// NLS formats (`YYYY-MM-DD:HH24:MI:SS`, timestamps with `.FF6`).
#[derive(Debug, Default)]
pub struct OracleDialect;

impl SqlDialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn generate_limit_string(&self, limit: u64) -> String {
        format!(" ROWNUM <= {limit}")
    }

    fn format_date_string(&self, dt: &NaiveDateTime) -> String {
        if is_pos_infinity(dt) {
            "'9999-12-31:23:59:59'".to_string()
        } else if is_neg_infinity(dt) {
            "'0001-01-01:00:00:00'".to_string()
        } else {
            format!("'{}:00:00:00'", dt.date().format("%Y-%m-%d"))
        }
    }

    fn format_datetime_string(&self, dt: &NaiveDateTime) -> String {
        if is_pos_infinity(dt) {
            "'9999-12-31:23:59:59.999000'".to_string()
        } else if is_neg_infinity(dt) {
            "'0001-01-01:00:00:00'".to_string()
        } else {
            format!("'{}'", dt.format("%Y-%m-%d:%H:%M:%S%.6f"))
        }
    }

    /// `ROWNUM` filtering runs before `ORDER BY`, so a limited ordered
    /// query would truncate the wrong (pre-sort) rows. Reject instead of
    /// mis-executing.
    fn check_state_validity(&self, state: ClauseState) -> AccessResult<()> {
        if state.has_order_by() && state.has_limit() {
            return Err(AccessError::dialect(
                "ORDER BY cannot be combined with a row limit: ROWNUM is applied before the sort",
            ));
        }
        Ok(())
    }

    fn construct_statement(&self, stmt: &SqlStatement) -> String {
        let state = stmt.state();
        let mut sql = stmt.command_text().to_string();
        if state.has_from() {
            sql.push_str(" from ");
            sql.push_str(stmt.from_text());
        }
        if state.has_where() {
            sql.push_str(" where ");
            sql.push_str(stmt.where_text());
            if state.has_limit() {
                sql.push_str(" AND");
                sql.push_str(&self.generate_limit_string(stmt.limit_value()));
            }
        } else if state.has_limit() {
            sql.push_str(" where");
            sql.push_str(&self.generate_limit_string(stmt.limit_value()));
        }
        if state.has_group_by() {
            sql.push_str(" group by ");
            sql.push_str(stmt.group_by_text());
        }
        if state.has_order_by() {
            sql.push_str(" order by ");
            sql.push_str(stmt.order_by_text());
        }
        sql
    }

    fn ignore_table_def_missing(&self) -> bool {
        true
    }

    fn ignore_table_def_replacement(&self) -> bool {
        true
    }
}
