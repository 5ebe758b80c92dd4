//! Tabular export of search results.
//!
//! One row per (query, strand, factor), with the factor's descriptive fields
//! and its hit positions joined as `"start-end; start-end"`. Rows build into
//! a polars `DataFrame` for table display or CSV download; a batch of
//! queries aggregates into one table the way the original spreadsheet export
//! stacked sheets.

use polars::prelude::*;

use crate::db::{FactorDb, StoreError};
use crate::factor::{PositionRange, SearchResult, StrandMatches};

/// One export row: a factor's matches against one query, on one strand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRow {
    pub original_sequence: String,
    pub strand: &'static str,
    pub ac: String,
    pub dt: String,
    pub de: String,
    pub kw: String,
    pub os: String,
    pub ra: String,
    pub rt: String,
    pub rl: String,
    pub rd: String,
    pub sq: String,
    pub positions: String,
}

/// Join position ranges as `"start-end; start-end; ..."`.
pub fn format_positions(positions: &[PositionRange]) -> String {
    positions
        .iter()
        .map(|p| format!("{}-{}", p.start, p.end))
        .collect::<Vec<_>>()
        .join("; ")
}

fn strand_rows(
    rows: &mut Vec<ExportRow>,
    original_sequence: &str,
    strand: &'static str,
    matches: &StrandMatches,
    db: &FactorDb,
) -> Result<(), StoreError> {
    for hits in &matches.factors {
        let record = db
            .get(&hits.ac)
            .ok_or_else(|| StoreError::UnknownAccession(hits.ac.clone()))?;
        rows.push(ExportRow {
            original_sequence: original_sequence.to_string(),
            strand,
            ac: record.ac.clone(),
            dt: record.dt.clone(),
            de: record.de.clone(),
            kw: record.kw.clone(),
            os: record.os.clone(),
            ra: record.ra.clone(),
            rt: record.rt.clone(),
            rl: record.rl.clone(),
            rd: record.rd.clone(),
            sq: record.sq.clone(),
            positions: format_positions(&hits.positions),
        });
    }
    Ok(())
}

/// Flatten search results into export rows.
///
/// Forward rows come before reverse rows per query; the `original_sequence`
/// column carries the query on both strands, matching the spreadsheet
/// export's layout.
pub fn export_rows(results: &[SearchResult], db: &FactorDb) -> Result<Vec<ExportRow>, StoreError> {
    let mut rows = Vec::new();
    for result in results {
        strand_rows(&mut rows, &result.original_sequence, "forward", &result.forward, db)?;
        strand_rows(&mut rows, &result.original_sequence, "reverse", &result.reverse, db)?;
    }
    Ok(rows)
}

/// Build the export table.
pub fn rows_to_dataframe(rows: &[ExportRow]) -> PolarsResult<DataFrame> {
    df!(
        "original_sequence" => rows.iter().map(|r| r.original_sequence.clone()).collect::<Vec<_>>(),
        "strand"            => rows.iter().map(|r| r.strand.to_string()).collect::<Vec<_>>(),
        "ac"                => rows.iter().map(|r| r.ac.clone()).collect::<Vec<_>>(),
        "dt"                => rows.iter().map(|r| r.dt.clone()).collect::<Vec<_>>(),
        "de"                => rows.iter().map(|r| r.de.clone()).collect::<Vec<_>>(),
        "kw"                => rows.iter().map(|r| r.kw.clone()).collect::<Vec<_>>(),
        "os"                => rows.iter().map(|r| r.os.clone()).collect::<Vec<_>>(),
        "ra"                => rows.iter().map(|r| r.ra.clone()).collect::<Vec<_>>(),
        "rt"                => rows.iter().map(|r| r.rt.clone()).collect::<Vec<_>>(),
        "rl"                => rows.iter().map(|r| r.rl.clone()).collect::<Vec<_>>(),
        "rd"                => rows.iter().map(|r| r.rd.clone()).collect::<Vec<_>>(),
        "sq"                => rows.iter().map(|r| r.sq.clone()).collect::<Vec<_>>(),
        "positions"         => rows.iter().map(|r| r.positions.clone()).collect::<Vec<_>>(),
    )
}

/// Write the export table as CSV.
pub fn write_csv<W: std::io::Write>(rows: &[ExportRow], writer: W) -> PolarsResult<()> {
    let mut df = rows_to_dataframe(rows)?;
    CsvWriter::new(writer).include_header(true).finish(&mut df)
}
