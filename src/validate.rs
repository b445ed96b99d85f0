// Row validation: partition each table's rows by minimum arity.
// Rejected rows go into an explicit DiscardLog owned by the caller, so the
// report step can show what was dropped across all tables.

use crate::logger;
use crate::parser::{Row, TableDump};
use std::collections::BTreeMap;

/// The three tables this pipeline understands, in relationship order.
pub const TABLES: [&str; 3] = ["countries", "states", "cities"];

// countries carry (id, name); states and cities need a parent id as well.
pub fn min_columns(table: &str) -> usize {
    if table == "countries" {
        2
    } else {
        3
    }
}

/// Rows rejected for insufficient arity, keyed by table name.
#[derive(Debug, Default)]
pub struct DiscardLog {
    discards: BTreeMap<String, Vec<Row>>,
}

impl DiscardLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, table: &str, row: Row) {
        self.discards.entry(table.to_string()).or_default().push(row);
    }

    pub fn rows_for(&self, table: &str) -> &[Row] {
        self.discards.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.discards.values().map(Vec::len).sum()
    }
}

/// Drop rows below the table's minimum field count, preserving order within
/// both partitions. Discards are appended to `log` under the table name.
pub fn validate(dump: TableDump, log: &mut DiscardLog) -> TableDump {
    let min = min_columns(&dump.table_name);
    let mut kept: Vec<Row> = Vec::with_capacity(dump.rows.len());
    let mut dropped = 0usize;

    for row in dump.rows {
        if row.len() >= min {
            kept.push(row);
        } else {
            dropped += 1;
            log.record(&dump.table_name, row);
        }
    }

    if dropped > 0 {
        logger::warn(&format!(
            "validate: {} rows discarded from {} (fewer than {} fields)",
            dropped, dump.table_name, min
        ));
    }

    TableDump {
        table_name: dump.table_name,
        columns: dump.columns,
        rows: kept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states_dump(rows: Vec<Row>) -> TableDump {
        TableDump {
            table_name: "states".to_string(),
            columns: vec!["id".into(), "name".into(), "country_id".into()],
            rows,
        }
    }

    #[test]
    fn short_state_row_is_discarded_and_logged() {
        let mut log = DiscardLog::new();
        let dump = states_dump(vec![
            vec!["1".into(), "Kabul".into(), "1".into()],
            vec!["2".into(), "Herat".into()],
        ]);
        let kept = validate(dump, &mut log);
        assert_eq!(kept.rows.len(), 1);
        assert_eq!(log.rows_for("states"), &[vec!["2".to_string(), "Herat".to_string()]]);
        assert_eq!(log.total(), 1);
    }

    #[test]
    fn countries_keep_two_field_rows() {
        let mut log = DiscardLog::new();
        let dump = TableDump {
            table_name: "countries".to_string(),
            columns: vec!["id".into(), "name".into()],
            rows: vec![vec!["1".into(), "Afghanistan".into()]],
        };
        let kept = validate(dump, &mut log);
        assert_eq!(kept.rows.len(), 1);
        assert_eq!(log.total(), 0);
    }

    #[test]
    fn validation_is_idempotent() {
        let mut log = DiscardLog::new();
        let dump = states_dump(vec![
            vec!["1".into(), "Kabul".into(), "1".into()],
            vec!["2".into()],
            vec!["3".into(), "Herat".into(), "1".into()],
        ]);
        let once = validate(dump, &mut log);
        let rows_after_once = once.rows.clone();
        let mut second_log = DiscardLog::new();
        let twice = validate(once, &mut second_log);
        assert_eq!(twice.rows, rows_after_once);
        assert_eq!(second_log.total(), 0);
    }
}
