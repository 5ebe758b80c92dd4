//! Query-sequence IO for **FASTA / FASTQ** (plain or gzipped).
//!
//! Records are parsed with `needletail` and normalised to owned
//! `(id, sequence)` pairs so the scanner and the batch exporter never touch
//! the parser. Sequences are kept as read; canonicalisation to uppercase
//! happens inside the search engine.
//!
//! # Errors
//! Parsing/IO errors bubble via `anyhow::Result` with the offending path in
//! the context.

use std::path::Path;

use anyhow::{Context, Result};
use needletail::parse_fastx_file;

/// A named query sequence read from a FASTA/FASTQ file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRecord {
    /// Record id, as needletail reports it.
    pub id: String,
    /// Nucleotide sequence.
    pub sequence: String,
}

/// Read every record of a FASTA/FASTQ file into memory.
///
/// Queries are short (kilobases at most), so slurping the file keeps the
/// downstream batch scan free of IO.
pub fn read_queries<P: AsRef<Path>>(path: P) -> Result<Vec<QueryRecord>> {
    let path = path.as_ref();
    let mut reader = parse_fastx_file(path)
        .with_context(|| format!("failed to open query file {}", path.display()))?;
    let mut records = Vec::new();
    while let Some(record) = reader.next() {
        let record =
            record.with_context(|| format!("malformed record in {}", path.display()))?;
        let id = String::from_utf8_lossy(record.id()).to_string();
        let sequence = String::from_utf8_lossy(&record.seq()).to_string();
        records.push(QueryRecord { id, sequence });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_multi_record_fasta() {
        let mut file = tempfile::Builder::new().suffix(".fasta").tempfile().unwrap();
        write!(file, ">q1 promoter fragment\nTTACGTTT\n>q2\nCACGTG\n").unwrap();
        file.flush().unwrap();
        let records = read_queries(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "q1 promoter fragment");
        assert_eq!(records[0].sequence, "TTACGTTT");
        assert_eq!(records[1].sequence, "CACGTG");
    }

    #[test]
    fn missing_file_carries_the_path_in_context() {
        let err = read_queries("/no/such/file.fasta").unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/file.fasta"));
    }
}
