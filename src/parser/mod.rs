// Parser module: escape-aware scanning, tuple/field splitting, and the
// statement locator that turns one dump file into a TableDump.

pub mod scan;
pub mod statement;
pub mod values;

pub use statement::DumpParser;

/// One row of raw field values, positionally aligned with `TableDump::columns`.
pub type Row = Vec<String>;

/// Parsed contents of one dump file: the table it declares, the column list
/// taken from the first INSERT, and every extracted row in source order.
#[derive(Debug, Clone)]
pub struct TableDump {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}
