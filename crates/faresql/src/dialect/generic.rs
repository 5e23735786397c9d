use chrono::NaiveDateTime;

use super::{ClauseState, SqlDialect};
use crate::error::AccessResult;
use crate::statement::SqlStatement;
use crate::value::{is_neg_infinity, is_pos_infinity};

/// Baseline dialect: `LIMIT n` row ceiling, no clause restrictions,
/// table-definition remapping honored.
#[derive(Debug, Default)]
pub struct GenericDialect;

impl SqlDialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn generate_limit_string(&self, limit: u64) -> String {
        format!(" LIMIT {limit}")
    }

    fn format_date_string(&self, dt: &NaiveDateTime) -> String {
        if is_pos_infinity(dt) {
            "'9999-12-31'".to_string()
        } else if is_neg_infinity(dt) {
            "'0001-01-01'".to_string()
        } else {
            format!("'{}'", dt.format("%Y-%m-%d"))
        }
    }

    fn format_datetime_string(&self, dt: &NaiveDateTime) -> String {
        if is_pos_infinity(dt) {
            "'9999-12-31 23:59:59'".to_string()
        } else if is_neg_infinity(dt) {
            "'0001-01-01 00:00:00'".to_string()
        } else {
            format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S"))
        }
    }

    fn check_state_validity(&self, _state: ClauseState) -> AccessResult<()> {
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
        }
        if state.has_group_by() {
            sql.push_str(" group by ");
            sql.push_str(stmt.group_by_text());
        }
        if state.has_order_by() {
            sql.push_str(" order by ");
            sql.push_str(stmt.order_by_text());
        }
        if state.has_limit() {
            sql.push_str(&self.generate_limit_string(stmt.limit_value()));
        }
        sql
    }
}
