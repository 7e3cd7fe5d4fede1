//! Table rendering.
//!
//! Every render call builds its own `Table`; nothing is shared between calls.

use std::path::Path;

use anyhow::Result;
use mjolnir_kv::Entry;
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::{Cell, Row, Table};
use serde_json::Value;

/// Left and right borders, `|` between columns, a dashed rule under the titles.
fn table_format() -> TableFormat {
    FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separators(&[LinePosition::Title], LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(table_format());
    table.set_titles(Row::new(titles.iter().map(|t| Cell::new(t)).collect()));
    table
}

/// Raw bucket contents: key and stored bytes, both shown as text.
pub fn record_table(entries: &[Entry]) -> Table {
    let mut table = new_table(&["KEY", "VALUE"]);
    for (key, value) in entries {
        table.add_row(Row::new(vec![
            Cell::new(&String::from_utf8_lossy(key)),
            Cell::new(&String::from_utf8_lossy(value)),
        ]));
    }
    table
}

/// A single decoded record, re-encoded as compact JSON.
pub fn value_table(key: &str, value: &Value) -> Result<Table> {
    let encoded = serde_json::to_string(value)
        .map_err(|e| anyhow::anyhow!("encoding JSON failed: {}", e))?;
    let mut table = new_table(&["KEY", "VALUE"]);
    table.add_row(Row::new(vec![Cell::new(key), Cell::new(&encoded)]));
    Ok(table)
}

pub fn bucket_table(names: &[String]) -> Table {
    let mut table = new_table(&["BUCKET NAME"]);
    for name in names {
        table.add_row(Row::new(vec![Cell::new(name)]));
    }
    table
}

pub fn records_summary(db: &Path, bucket: &str, count: usize) -> String {
    format!(
        " database: {} | bucket: {} | total records: {}",
        db.display(),
        bucket,
        count
    )
}

pub fn buckets_summary(count: usize) -> String {
    format!(" total buckets: {}", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| (format!("key{i}").into_bytes(), format!("{{\"n\":{i}}}").into_bytes()))
            .collect()
    }

    #[test]
    fn test_record_table_rows() {
        let table = record_table(&entries(3));
        assert_eq!(table.len(), 3);

        let text = table.to_string();
        assert!(text.contains("KEY"));
        assert!(text.contains("VALUE"));
        assert!(text.contains("key2"));
        assert!(text.contains("{\"n\":2}"));
        // Titles, the rule under them, then one line per row.
        assert_eq!(text.lines().filter(|l| !l.is_empty()).count(), 5);
        assert!(text.lines().all(|l| l.is_empty() || l.starts_with('|')));
    }

    #[test]
    fn test_tables_are_independent() {
        let first = record_table(&entries(2));
        let second = bucket_table(&["a".to_string()]);
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert!(!second.to_string().contains("KEY"));
    }

    #[test]
    fn test_value_table_reencodes() {
        let table = value_table("alice", &json!({"age": 30})).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.to_string().contains("{\"age\":30}"));
    }

    #[test]
    fn test_bucket_table() {
        let table = bucket_table(&["a".to_string(), "b".to_string()]);
        assert_eq!(table.len(), 2);
        assert!(table.to_string().contains("BUCKET NAME"));
        assert_eq!(buckets_summary(2), " total buckets: 2");
    }

    #[test]
    fn test_records_summary() {
        assert_eq!(
            records_summary(Path::new("/tmp/t.db"), "users", 4),
            " database: /tmp/t.db | bucket: users | total records: 4"
        );
    }
}
