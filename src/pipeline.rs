// Pipeline driver: read the dump files, locate each table, validate rows,
// and write every artifact. All three tables must parse before anything is
// written; fatal errors abort with nothing on disk.

use crate::emit::{self, NamingProfile};
use crate::error::DumpError;
use crate::logger;
use crate::parser::{DumpParser, TableDump};
use crate::report::{ExpectedCounts, TableReport};
use crate::validate::{self, DiscardLog, TABLES};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub struct PipelineOptions {
    pub naming: NamingProfile,
    pub emit_mutations: bool,
    pub out_dir: PathBuf,
    pub expected: ExpectedCounts,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub reports: Vec<TableReport>,
    pub discards: DiscardLog,
}

pub fn run(paths: &[String], opts: &PipelineOptions) -> Result<PipelineOutcome, DumpError> {
    let parser = DumpParser::new();
    let mut dumps: HashMap<String, TableDump> = HashMap::new();

    // Files may arrive in any order; the table is identified by content.
    for path in paths {
        let content = fs::read_to_string(path)?;
        let dump = parser.parse(path, &content)?;
        if !TABLES.contains(&dump.table_name.as_str()) {
            logger::warn(&format!(
                "pipeline: {} declares unsupported table `{}`, file skipped",
                path, dump.table_name
            ));
            continue;
        }
        dumps.insert(dump.table_name.clone(), dump);
    }

    // Validate everything before writing anything; a missing table aborts
    // with no output on disk.
    let mut discards = DiscardLog::new();
    let mut validated: Vec<TableDump> = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let dump = dumps
            .remove(table)
            .ok_or(DumpError::MissingTable { table })?;
        validated.push(validate::validate(dump, &mut discards));
    }

    emit::write_schema(&opts.out_dir, opts.naming)?;
    for dump in &validated {
        emit::write_csv(&opts.out_dir, dump)?;
    }
    if opts.emit_mutations {
        let refs: Vec<&TableDump> = validated.iter().collect();
        emit::write_mutations(&opts.out_dir, opts.naming, &refs)?;
    }

    let reports = validated
        .iter()
        .map(|dump| TableReport {
            table: dump.table_name.clone(),
            kept: dump.rows.len(),
            expected: opts.expected.for_table(&dump.table_name),
            discarded: discards.rows_for(&dump.table_name).len(),
        })
        .collect();

    Ok(PipelineOutcome { reports, discards })
}
