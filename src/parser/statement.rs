// Statement locator and row assembler: finds the CREATE TABLE declaration,
// collects every INSERT for that table, and expands the value blocks into
// rows via the tuple extractor and field splitter.

use crate::error::DumpError;
use crate::logger;
use crate::parser::values::{extract_tuples, split_fields, unquote};
use crate::parser::{Row, TableDump};
use regex::Regex;

pub struct DumpParser {
    create_table_re: Regex,
}

impl DumpParser {
    // Build the declaration regex once for reuse across files.
    pub fn new() -> Self {
        let create_table_re = Regex::new(
            r"(?is)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?`?(\w+)`?\s*\(",
        )
        .expect("valid create table regex");
        Self { create_table_re }
    }

    // Parse one dump file already read into memory. The table name comes from
    // the single CREATE TABLE declaration; the column list from the first
    // INSERT addressed to that table.
    pub fn parse(&self, path: &str, content: &str) -> Result<TableDump, DumpError> {
        let table_name = self
            .create_table_re
            .captures(content)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_lowercase())
            .ok_or_else(|| DumpError::MissingCreateTable {
                path: path.to_string(),
            })?;
        logger::debug(&format!("parse: {} declares table {}", path, table_name));

        let insert_re = Regex::new(&format!(
            r"(?is)INSERT\s+INTO\s+`?{}`?\s*\(([^)]*)\)\s*VALUES\s*(.*?);",
            regex::escape(&table_name)
        ))
        .expect("valid insert regex");

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Row> = Vec::new();

        for cap in insert_re.captures_iter(content) {
            let cols = parse_column_list(&cap[1]);
            if columns.is_empty() {
                columns = cols;
            } else if cols != columns {
                // Later inserts are assumed to share the first column order.
                // Skipping here beats silently misaligning fields.
                logger::warn(&format!(
                    "parse: INSERT for {} has a different column list; statement skipped",
                    table_name
                ));
                continue;
            }

            let values_block = &cap[2];
            for tuple in extract_tuples(values_block) {
                let row: Row = split_fields(&tuple).iter().map(|f| unquote(f)).collect();
                rows.push(row);
            }
        }

        logger::debug(&format!(
            "parse: {} yielded {} rows across {} columns",
            table_name,
            rows.len(),
            columns.len()
        ));

        Ok(TableDump {
            table_name,
            columns,
            rows,
        })
    }
}

// Split an INSERT column list on commas, trimming backticks and quotes.
fn parse_column_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().trim_matches(['`', '\'', '"'].as_ref()).to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_row_countries_insert() {
        let sql = "CREATE TABLE countries (id int, name varchar(100));\n\
                   INSERT INTO countries (id,name) VALUES (1,'Afghanistan'),(2,'Albania');";
        let dump = DumpParser::new().parse("countries.sql", sql).unwrap();
        assert_eq!(dump.table_name, "countries");
        assert_eq!(dump.columns, vec!["id", "name"]);
        assert_eq!(
            dump.rows,
            vec![vec!["1", "Afghanistan"], vec!["2", "Albania"]]
        );
    }

    #[test]
    fn accepts_backticks_and_if_not_exists() {
        let sql = "CREATE TABLE IF NOT EXISTS `States` (\n  `id` int\n);\n\
                   INSERT INTO `states` (`id`, `name`, `country_id`) VALUES (10, 'Kabul', 1);";
        let dump = DumpParser::new().parse("states.sql", sql).unwrap();
        assert_eq!(dump.table_name, "states");
        assert_eq!(dump.columns, vec!["id", "name", "country_id"]);
        assert_eq!(dump.rows, vec![vec!["10", "Kabul", "1"]]);
    }

    #[test]
    fn collects_multiple_inserts_in_order() {
        let sql = "CREATE TABLE cities (id int);\n\
                   INSERT INTO cities (id, name, state_id) VALUES (1, 'A', 1);\n\
                   INSERT INTO cities (id, name, state_id) VALUES (2, 'B', 1), (3, 'C', 2);";
        let dump = DumpParser::new().parse("cities.sql", sql).unwrap();
        assert_eq!(dump.rows.len(), 3);
        assert_eq!(dump.rows[2], vec!["3", "C", "2"]);
    }

    #[test]
    fn skips_insert_with_mismatched_columns() {
        let sql = "CREATE TABLE cities (id int);\n\
                   INSERT INTO cities (id, name, state_id) VALUES (1, 'A', 1);\n\
                   INSERT INTO cities (id, state_id, name) VALUES (2, 9, 'B');";
        let dump = DumpParser::new().parse("cities.sql", sql).unwrap();
        assert_eq!(dump.rows, vec![vec!["1", "A", "1"]]);
    }

    #[test]
    fn missing_declaration_is_fatal() {
        let err = DumpParser::new()
            .parse("broken.sql", "INSERT INTO x (a) VALUES (1);")
            .unwrap_err();
        assert!(matches!(err, DumpError::MissingCreateTable { .. }));
    }

    #[test]
    fn insert_with_no_tuples_yields_no_rows() {
        let sql = "CREATE TABLE countries (id int);\n\
                   INSERT INTO countries (id, name) VALUES ;";
        let dump = DumpParser::new().parse("countries.sql", sql).unwrap();
        assert!(dump.rows.is_empty());
    }

    #[test]
    fn quoted_parens_inside_values_survive() {
        let sql = "CREATE TABLE countries (id int);\n\
                   INSERT INTO countries (id, name, phonecode) \
                   VALUES (46, 'Cocos (Keeling) Islands', 672);";
        let dump = DumpParser::new().parse("countries.sql", sql).unwrap();
        assert_eq!(dump.rows, vec![vec!["46", "Cocos (Keeling) Islands", "672"]]);
    }
}
