// Run diagnostics: kept-row counts vs. expected counts plus discard samples.
// Advisory only; a discrepancy never fails the run.

use crate::error::DumpError;
use crate::validate::DiscardLog;
use serde::Serialize;
use std::io::{self, Write};

const DISCARD_SAMPLE_LIMIT: usize = 3;

/// Externally configured expected row counts per table.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedCounts {
    pub countries: usize,
    pub states: usize,
    pub cities: usize,
}

impl ExpectedCounts {
    pub fn for_table(&self, table: &str) -> usize {
        match table {
            "countries" => self.countries,
            "states" => self.states,
            _ => self.cities,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TableReport {
    pub table: String,
    pub kept: usize,
    pub expected: usize,
    pub discarded: usize,
}

/// Print per-table counts and a sample of discarded rows to stdout.
pub fn print_summary(reports: &[TableReport], log: &DiscardLog) -> Result<(), DumpError> {
    let mut out = io::stdout();
    writeln!(out, "\nValidated rows per table:")?;
    for r in reports {
        let marker = if r.kept == r.expected { "" } else { "  <-- differs" };
        writeln!(
            out,
            " - {:<9} {:>6} kept (expected {}){}",
            r.table, r.kept, r.expected, marker
        )?;
    }

    if log.total() > 0 {
        writeln!(out, "\nDiscarded rows ({} total):", log.total())?;
        for r in reports {
            let rows = log.rows_for(&r.table);
            if rows.is_empty() {
                continue;
            }
            writeln!(out, " - {}: {} rows, first {}:", r.table, rows.len(),
                rows.len().min(DISCARD_SAMPLE_LIMIT))?;
            for row in rows.iter().take(DISCARD_SAMPLE_LIMIT) {
                writeln!(out, "     {:?}", row)?;
            }
        }
    }
    Ok(())
}

/// Write the same report as JSON for tooling.
pub fn write_json(path: &str, reports: &[TableReport]) -> Result<(), DumpError> {
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, json)?;
    Ok(())
}
