//! SQL dialect abstractions for rendering stub literals.
//!
//! Each dialect lives in its own file. The default trait methods produce the
//! PostgreSQL spelling; other dialects override only what differs.

use crate::value::{Value, DATETIME_FORMAT, DATE_FORMAT};

/// Dialects render column aliases and literal values.
/// Row assembly lives in the stub; the dialect only maps single values
/// to SQL fragments.
pub trait Dialect {
    fn quote_ident(&self, ident: &str) -> String;

    /// Plain lowercase identifiers are emitted bare, anything else (including
    /// reserved words) is quoted.
    fn render_alias(&self, column: &str) -> String {
        if is_plain_ident(column) && !is_reserved_word(column) {
            column.to_string()
        } else {
            self.quote_ident(column)
        }
    }

    fn quote_text(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    fn render_date(&self, date: &str) -> String {
        format!("'{date}'::date")
    }

    fn render_datetime(&self, datetime: &str) -> String {
        format!("'{datetime}'::timestamp")
    }

    /// NaN and the infinities have no bare numeric spelling.
    fn render_special_float(&self, name: &str) -> String {
        format!("'{name}'::float8")
    }

    fn render_literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::Int(i) => i.to_string(),
            Value::UInt(u) => u.to_string(),
            Value::Float(x) if x.is_nan() => self.render_special_float("NaN"),
            Value::Float(x) if x.is_infinite() => {
                let name = if x.is_sign_positive() {
                    "Infinity"
                } else {
                    "-Infinity"
                };
                self.render_special_float(name)
            }
            Value::Float(x) => format!("{x:?}"),
            Value::Text(s) => self.quote_text(s),
            Value::Date(d) => self.render_date(&d.format(DATE_FORMAT).to_string()),
            Value::DateTime(dt) => self.render_datetime(&dt.format(DATETIME_FORMAT).to_string()),
        }
    }
}

pub(crate) fn is_plain_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Keywords reserved in both PostgreSQL and GoogleSQL; these cannot be used as
/// bare column aliases.
const RESERVED_WORDS: &[&str] = &[
    "all", "and", "any", "array", "as", "asc", "between", "by", "case", "cast", "collate",
    "create", "cross", "default", "desc", "distinct", "else", "end", "except", "exists",
    "false", "fetch", "for", "from", "full", "group", "having", "in", "inner", "intersect",
    "interval", "into", "is", "join", "lateral", "left", "like", "limit", "not", "null", "on",
    "or", "order", "outer", "right", "select", "some", "table", "then", "to", "true", "union",
    "using", "when", "where", "window", "with",
];

pub(crate) fn is_reserved_word(ident: &str) -> bool {
    RESERVED_WORDS.contains(&ident)
}

/// Look up a dialect by its configuration name.
pub fn dialect_for_name(name: &str) -> Option<Box<dyn Dialect + Send + Sync>> {
    match name.to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" => Some(Box::new(PostgresDialect)),
        "bigquery" => Some(Box::new(BigQueryDialect)),
        _ => None,
    }
}

mod bigquery;
mod postgres;

pub use bigquery::BigQueryDialect;
pub use postgres::PostgresDialect;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers() {
        assert!(is_plain_ident("a"));
        assert!(is_plain_ident("_order_id2"));
        assert!(!is_plain_ident("Order"));
        assert!(!is_plain_ident("2nd"));
        assert!(!is_plain_ident("first name"));
        assert!(!is_plain_ident(""));
    }

    #[test]
    fn reserved_aliases_are_quoted() {
        assert_eq!(PostgresDialect.render_alias("select"), "\"select\"");
        assert_eq!(BigQueryDialect.render_alias("order"), "`order`");
        assert_eq!(BigQueryDialect.render_alias("orders"), "orders");
    }

    #[test]
    fn dialect_lookup_is_case_insensitive() {
        assert!(dialect_for_name("Postgres").is_some());
        assert!(dialect_for_name("BIGQUERY").is_some());
        assert!(dialect_for_name("oracle").is_none());
    }
}
