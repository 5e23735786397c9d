//! Placeholder substitution over SQL templates.
//!
//! Templates carry positional placeholders `%<N>` (optionally suffixed `q`
//! for quoted-literal mode) and free-form named placeholders matched by
//! literal text. Substitution rewrites the template in place and records
//! one [`BoundParameter`] per generated bind marker; final bind indices are
//! assigned only in [`ParameterSubstitutor::bind_all_parameters`], in text
//! position order.

use chrono::NaiveDateTime;

use crate::dialect::SqlDialect;
use crate::error::{AccessError, AccessResult};
use crate::param::{BoundParameter, ParameterBinder};
use crate::value::Value;

/// Oracle caps `IN`-list expansion at 1000 items.
pub const MAX_LIST_ITEMS: usize = 1000;

/// Ceiling on generated expansion text, sized to the bind buffer.
pub const MAX_EXPANSION_BYTES: usize = 8 * 1024;

/// Named placeholders longer than this are rejected.
pub const MAX_PLACEHOLDER_LEN: usize = 16;

/// Owns the bound parameters for exactly one in-flight SQL statement.
///
/// Request-scoped: constructed, populated and consumed within a single
/// thread, then discarded (or [`clear`](Self::clear)ed) once the statement
/// completes.
pub struct ParameterSubstitutor<'d> {
    dialect: &'d dyn SqlDialect,
    params: Vec<BoundParameter>,
}

impl<'d> ParameterSubstitutor<'d> {
    pub fn new(dialect: &'d dyn SqlDialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    /// Bound parameters in text-position order.
    pub fn parameters(&self) -> &[BoundParameter] {
        &self.params
    }

    /// Drop all bound parameters once the statement has executed.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Substitute positional placeholder `%<index>`.
    ///
    /// Non-literal mode replaces the placeholder with the bind marker
    /// `:<index>` and records the value for later binding. Literal mode
    /// splices the rendered value into the text: quoted when the template
    /// carries the `q` suffix (an empty string renders as `' '`, the
    /// domain's NULL-vs-empty convention), raw otherwise.
    pub fn substitute(
        &mut self,
        sql: &mut String,
        value: impl Into<Value>,
        index: u32,
        force_literal: bool,
    ) -> AccessResult<()> {
        let value = value.into();
        let needle = format!("%{index}");
        let pos = find_placeholder(sql, &needle)
            .ok_or(AccessError::ParameterNotFound { index })?;
        let end = pos + needle.len();

        if !force_literal {
            let marker = format!(":{index}");
            self.splice(sql, pos..end, &marker);
            self.insert_param(BoundParameter::new(pos, value));
            return Ok(());
        }

        let quoted = sql[end..].starts_with('q');
        let literal = self.render_literal(&value, quoted);
        let end = if quoted { end + 1 } else { end };
        self.splice(sql, pos..end, &literal);
        Ok(())
    }

    /// Substitute `%<index>` with a carrier-code list.
    pub fn substitute_carrier_list(
        &mut self,
        sql: &mut String,
        carriers: &[&str],
        index: u32,
    ) -> AccessResult<()> {
        let values: Vec<Value> = carriers.iter().map(|c| Value::from(*c)).collect();
        self.substitute_list(sql, index, "cxr", values)
    }

    /// Substitute `%<index>` with a list of 64-bit integers.
    pub fn substitute_long_list(
        &mut self,
        sql: &mut String,
        items: &[i64],
        index: u32,
    ) -> AccessResult<()> {
        let values: Vec<Value> = items.iter().map(|v| Value::Int64(*v)).collect();
        self.substitute_list(sql, index, "l", values)
    }

    fn substitute_list(
        &mut self,
        sql: &mut String,
        index: u32,
        tag: &str,
        values: Vec<Value>,
    ) -> AccessResult<()> {
        if values.is_empty() {
            return Err(AccessError::overflow("cannot expand an empty list"));
        }
        if values.len() > MAX_LIST_ITEMS {
            return Err(AccessError::overflow(format!(
                "list expansion of {} items exceeds the {MAX_LIST_ITEMS}-item ceiling",
                values.len()
            )));
        }

        let needle = format!("%{index}");
        let pos = find_placeholder(sql, &needle)
            .ok_or(AccessError::ParameterNotFound { index })?;

        // Build the fragment while recording each marker's offset within it.
        let mut fragment = String::new();
        let mut marker_offsets = Vec::with_capacity(values.len());
        if values.len() == 1 {
            fragment.push_str("= ");
            marker_offsets.push(fragment.len());
            fragment.push_str(&format!(":{tag}1"));
        } else {
            fragment.push_str("IN ( ");
            for i in 1..=values.len() {
                if i > 1 {
                    fragment.push_str(", ");
                }
                marker_offsets.push(fragment.len());
                fragment.push_str(&format!(":{tag}{i}"));
            }
            fragment.push_str(" )");
        }

        if fragment.len() > MAX_EXPANSION_BYTES {
            return Err(AccessError::overflow(format!(
                "list expansion of {} bytes exceeds the {MAX_EXPANSION_BYTES}-byte ceiling",
                fragment.len()
            )));
        }

        self.splice(sql, pos..pos + needle.len(), &fragment);
        for (offset, value) in marker_offsets.into_iter().zip(values) {
            self.insert_param(BoundParameter::new(pos + offset, value));
        }
        Ok(())
    }

    /// Substitute every literal occurrence of `placeholder` (e.g. `%cd`)
    /// with a uniquely numbered bind variable derived from its own text
    /// (`:cd1`, `:cd2`, ...), one bound parameter per occurrence.
    pub fn substitute_named(
        &mut self,
        sql: &mut String,
        date: &NaiveDateTime,
        placeholder: &str,
        date_only: bool,
    ) -> AccessResult<()> {
        if placeholder.len() > MAX_PLACEHOLDER_LEN {
            return Err(AccessError::PlaceholderTooLong {
                placeholder: placeholder.to_string(),
                limit: MAX_PLACEHOLDER_LEN,
            });
        }

        let tag = placeholder.trim_start_matches('%');
        let mut search_from = 0;
        let mut n = 1;
        while let Some(rel) = sql[search_from..].find(placeholder) {
            let pos = search_from + rel;
            let marker = format!(":{tag}{n}");
            self.splice(sql, pos..pos + placeholder.len(), &marker);
            let value = if date_only {
                Value::Date(date.date())
            } else {
                Value::DateTime(*date)
            };
            self.insert_param(BoundParameter::new(pos, value));
            search_from = pos + marker.len();
            n += 1;
        }
        Ok(())
    }

    /// Assign final 1-based bind indices in text-position order and hand
    /// each parameter to the driver. This is the only place indices are
    /// finalized, decoupling them from substitution order.
    pub fn bind_all_parameters(&mut self, binder: &mut dyn ParameterBinder) -> AccessResult<()> {
        tracing::debug!(
            target: "faresql.sql",
            param_count = self.params.len(),
            "binding parameters"
        );
        for (i, param) in self.params.iter_mut().enumerate() {
            param.set_index(i as i32 + 1);
            param.bind(binder)?;
        }
        Ok(())
    }

    /// Reconstruct a human-readable form of the executed statement by
    /// splicing the stringified bound values over the bind markers at
    /// each parameter's recorded position. Colons elsewhere in the text
    /// (Oracle literal dates, say) are left alone. Audit/logging only;
    /// never mutates state and is safe to call repeatedly.
    pub fn sql_string(&self, orig_sql: &str) -> String {
        let mut out = String::with_capacity(orig_sql.len());
        let mut cursor = 0;
        for param in &self.params {
            let pos = param.position();
            let Some(rest) = orig_sql.get(pos..) else { break };
            if pos < cursor || !rest.starts_with(':') {
                continue;
            }
            out.push_str(&orig_sql[cursor..pos]);
            out.push_str(&param.value().display_string());
            let marker_len = rest[1..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .count();
            cursor = pos + 1 + marker_len;
        }
        out.push_str(&orig_sql[cursor..]);
        out
    }

    /// Render the bound values alone, for the `parameters:` line of query
    /// failure logs.
    pub fn parameter_string(&self) -> String {
        let mut out = String::new();
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&format!(
                "[{}]:{}={}",
                i + 1,
                param.value().type_name(),
                param.value().display_string()
            ));
        }
        out
    }

    fn render_literal(&self, value: &Value, quoted: bool) -> String {
        match value {
            Value::Text(v) if quoted => {
                if v.is_empty() {
                    "' '".to_string()
                } else {
                    format!("'{v}'")
                }
            }
            Value::Text(v) => v.clone(),
            Value::Int32(v) if quoted => format!("'{v}'"),
            Value::Int64(v) if quoted => format!("'{v}'"),
            Value::Float(v) if quoted => format!("'{v}'"),
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            // Dialect date literals are quoted by construction.
            Value::Date(d) => self
                .dialect
                .format_date_string(&d.and_hms_opt(0, 0, 0).unwrap()),
            Value::DateTime(dt) => self.dialect.format_datetime_string(dt),
        }
    }

    /// Replace `range` with `text`, shifting recorded positions of every
    /// parameter that sits beyond it so the position order stays true to
    /// the rewritten text.
    fn splice(&mut self, sql: &mut String, range: std::ops::Range<usize>, text: &str) {
        let removed = range.end - range.start;
        let delta = text.len() as isize - removed as isize;
        sql.replace_range(range.clone(), text);
        if delta != 0 {
            for param in &mut self.params {
                if param.position() >= range.start {
                    let shifted = (param.position() as isize + delta) as usize;
                    *param = BoundParameter::new(shifted, param.value().clone());
                }
            }
        }
    }

    fn insert_param(&mut self, param: BoundParameter) {
        let at = self
            .params
            .partition_point(|p| p.position() <= param.position());
        self.params.insert(at, param);
    }
}

/// Find `needle` (`%<N>`) not immediately followed by another digit, so
/// `%1` never matches inside `%10`.
fn find_placeholder(sql: &str, needle: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = sql[from..].find(needle) {
        let pos = from + rel;
        let after = pos + needle.len();
        if !sql[after..].chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Some(pos);
        }
        from = after;
    }
    None
}
