//! Clause-at-a-time SQL statement builder.
//!
//! A statement is created per query, populated by the clause setters,
//! consumed once by [`SqlStatement::construct_sql`], and discarded after
//! execution. It is never shared across threads.

use crate::dialect::{ClauseState, SqlDialect};
use crate::error::AccessResult;

/// Collapse whitespace in a clause fragment.
///
/// Leading/trailing whitespace is dropped; any internal run of whitespace
/// becomes a single space, except that a run adjacent to a comma vanishes
/// entirely: `" ,"`, `", "` and `" , "` all normalize to `","`.
pub fn trim_all(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            let after_comma = out.ends_with(',');
            let before_comma = chars.peek() == Some(&',');
            let at_edge = out.is_empty() || chars.peek().is_none();
            if !(after_comma || before_comma || at_edge) {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Mutable builder accumulating Command/From/Where/GroupBy/OrderBy/Limit
/// fragments.
///
/// Clause text is stored without its keyword; the dialect emits the
/// keyword prefix only for non-empty clauses during assembly.
/// `construct_sql` is idempotent for a given clause set.
#[derive(Debug, Default, Clone)]
pub struct SqlStatement {
    command: String,
    from: String,
    where_: String,
    group_by: String,
    order_by: String,
    limit: u64,
    state: ClauseState,
}

impl SqlStatement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(&mut self, text: &str) -> &mut Self {
        self.command = trim_all(text);
        self.state.set_command(!self.command.is_empty());
        self
    }

    pub fn from(&mut self, text: &str) -> &mut Self {
        self.from = trim_all(text);
        self.state.set_from(!self.from.is_empty());
        self
    }

    pub fn where_clause(&mut self, text: &str) -> &mut Self {
        self.where_ = trim_all(text);
        self.state.set_where(!self.where_.is_empty());
        self
    }

    pub fn group_by(&mut self, text: &str) -> &mut Self {
        self.group_by = trim_all(text);
        self.state.set_group_by(!self.group_by.is_empty());
        self
    }

    pub fn order_by(&mut self, text: &str) -> &mut Self {
        self.order_by = trim_all(text);
        self.state.set_order_by(!self.order_by.is_empty());
        self
    }

    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = n;
        self.state.set_limit(n > 0);
        self
    }

    pub fn command_text(&self) -> &str {
        &self.command
    }
    pub fn from_text(&self) -> &str {
        &self.from
    }
    pub fn where_text(&self) -> &str {
        &self.where_
    }
    pub fn group_by_text(&self) -> &str {
        &self.group_by
    }
    pub fn order_by_text(&self) -> &str {
        &self.order_by
    }
    pub fn limit_value(&self) -> u64 {
        self.limit
    }
    pub fn state(&self) -> ClauseState {
        self.state
    }

    /// Validate the clause combination against the dialect, then assemble
    /// the final statement text.
    pub fn construct_sql(&self, dialect: &dyn SqlDialect) -> AccessResult<String> {
        dialect.check_state_validity(self.state)?;
        Ok(dialect.construct_statement(self))
    }
}
