//! BigQuery dialect implementation.

use super::Dialect;

#[derive(Debug, Default, Clone, Copy)]
pub struct BigQueryDialect;

impl Dialect for BigQueryDialect {
    fn quote_ident(&self, ident: &str) -> String {
        // BigQuery uses backticks for identifiers
        format!("`{}`", ident.replace('`', "\\`"))
    }

    fn quote_text(&self, text: &str) -> String {
        // Backslash escapes, doubling a quote is not valid in GoogleSQL
        let escaped = text
            .replace('\\', "\\\\")
            .replace('\'', "\\'")
            .replace('\n', "\\n")
            .replace('\r', "\\r");
        format!("'{escaped}'")
    }

    fn render_date(&self, date: &str) -> String {
        format!("DATE '{date}'")
    }

    fn render_datetime(&self, datetime: &str) -> String {
        format!("TIMESTAMP '{datetime}'")
    }

    fn render_special_float(&self, name: &str) -> String {
        let name = match name {
            "Infinity" => "inf",
            "-Infinity" => "-inf",
            other => other,
        };
        format!("CAST('{name}' AS FLOAT64)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn uses_typed_literals() {
        let d = BigQueryDialect;
        let ts = Value::parse_datetime("2012-01-03 12:44:33").unwrap();
        let date = Value::parse_date("2012-01-01").unwrap();
        assert_eq!(d.render_literal(&ts), "TIMESTAMP '2012-01-03 12:44:33'");
        assert_eq!(d.render_literal(&date), "DATE '2012-01-01'");
    }

    #[test]
    fn escapes_text_with_backslashes() {
        let d = BigQueryDialect;
        assert_eq!(d.render_literal(&Value::from("it's")), "'it\\'s'");
        assert_eq!(d.render_literal(&Value::from("a\\b")), "'a\\\\b'");
    }

    #[test]
    fn escapes_line_breaks_in_text() {
        let rendered = BigQueryDialect.render_literal(&Value::from("a\nb\r\nc"));
        assert_eq!(rendered, "'a\\nb\\r\\nc'");
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn backticks_unusual_aliases() {
        assert_eq!(BigQueryDialect.render_alias("Order Date"), "`Order Date`");
        assert_eq!(
            BigQueryDialect.render_literal(&Value::Float(f64::INFINITY)),
            "CAST('inf' AS FLOAT64)"
        );
    }
}
