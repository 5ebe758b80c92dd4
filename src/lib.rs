#![forbid(unsafe_code)]
//! # crescan
//!
//! Curated registry of **cis-regulatory element (CRE) factor motifs** with an
//! IUPAC-aware scanner that searches both DNA strands: the forward query and
//! its reverse complement.
//!
//! ## Highlights
//! - **Typed results**: explicit [`SearchResult`]/[`FactorHits`] structs, no
//!   stringly-typed maps.
//! - **Deterministic data**: the built-in registry is embedded as constants;
//!   scanning iterates it in stable store order.
//! - **Two directions**: scan a query for every stored pattern, or scan every
//!   stored sequence for one query pattern.
//!
//! ## Examples
//! ```rust
//! let db = crescan::FactorDb::builtin();
//! // The G-box (CARE0003, CACGTG) sits at offset 2 of this query:
//! let result = crescan::search_sequence("TTCACGTGAA", &db).unwrap();
//! let gbox = result.forward.factors.iter().find(|f| f.ac == "CARE0003").unwrap();
//! assert_eq!((gbox.positions[0].start, gbox.positions[0].end), (2, 8));
//! // CACGTG is palindromic, so the reverse strand reports it too:
//! assert!(result.reverse.factors.iter().any(|f| f.ac == "CARE0003"));
//! ```

pub mod data {
    pub mod factors;
}
pub mod db;
pub mod export;
pub mod factor;
pub mod history;
pub mod scan;
pub mod seqio;

use anyhow::Result;
use rayon::prelude::*;

pub use crate::db::{FactorDb, FactorFilter, FactorPage, StoreError, DEFAULT_RECORD_LIMIT};
pub use crate::factor::{
    AnnotatedMatch, AnnotatedSearchResult, FactorHits, FactorRecord, FunctionLabel, MatchHit,
    PositionRange, RecordedSearchResult, SearchResult, StrandMatches,
};
pub use crate::history::{HistoryEntry, HistoryId, HistoryStore, MemoryHistory};
pub use crate::scan::{compile_pattern, find_matches, group_by_factor, reverse_complement};

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan a query sequence against every pattern in the database, on both
/// strands.
///
/// The query is the haystack; each stored factor pattern is a needle. Hits
/// are grouped per factor in first-discovery order. An empty query or an
/// empty database yields empty strand results with the reverse complement
/// still computed.
pub fn search_sequence(query: &str, db: &FactorDb) -> Result<SearchResult> {
    let original = query.trim().to_ascii_uppercase();
    let revcomp = reverse_complement(&original);
    let forward = group_by_factor(&find_matches(&original, db.pattern_pairs())?);
    let reverse = group_by_factor(&find_matches(&revcomp, db.pattern_pairs())?);
    Ok(SearchResult {
        original_sequence: original,
        reverse_complement_sequence: revcomp,
        forward: StrandMatches { factors: forward },
        reverse: StrandMatches { factors: reverse },
    })
}

/// [`search_sequence`] plus a history record: the raw query and the caller
/// identity are handed to `history`, and the generated entry id is attached
/// to the result.
pub fn search_sequence_recorded(
    query: &str,
    db: &FactorDb,
    user: &str,
    history: &mut dyn HistoryStore,
) -> Result<RecordedSearchResult> {
    let result = search_sequence(query, db)?;
    let history_id = history.record(user, query)?;
    Ok(RecordedSearchResult { result, history_id })
}

/// The alternate search direction: treat the query as the needle and every
/// stored factor sequence as a haystack.
///
/// The forward strand scans each factor's sequence for the query pattern,
/// the reverse strand for the query's reverse complement. Hit offsets are
/// positions within the matched factor's own sequence. A palindromic query
/// reports the same hits on both strands.
pub fn search_factors(query: &str, db: &FactorDb) -> Result<SearchResult> {
    let pattern = query.trim().to_ascii_uppercase();
    let revcomp = reverse_complement(&pattern);
    let mut forward_hits = Vec::new();
    let mut reverse_hits = Vec::new();
    if !pattern.is_empty() {
        for record in db.records() {
            forward_hits
                .extend(find_matches(&record.sq, [(record.ac.as_str(), pattern.as_str())])?);
            reverse_hits
                .extend(find_matches(&record.sq, [(record.ac.as_str(), revcomp.as_str())])?);
        }
    }
    Ok(SearchResult {
        original_sequence: pattern,
        reverse_complement_sequence: revcomp,
        forward: StrandMatches {
            factors: group_by_factor(&forward_hits),
        },
        reverse: StrandMatches {
            factors: group_by_factor(&reverse_hits),
        },
    })
}

/// Scan many `(id, sequence)` queries against one database, in parallel.
///
/// Each query is independent, so the batch runs on a sized rayon pool
/// (`threads = None` uses all logical cores). Results come back in input
/// order regardless of scheduling.
pub fn search_many(
    queries: &[(String, String)],
    db: &FactorDb,
    threads: Option<usize>,
) -> Result<Vec<(String, SearchResult)>> {
    let n = threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
    pool.install(|| {
        queries
            .par_iter()
            .map(|(id, seq)| Ok((id.clone(), search_sequence(seq, db)?)))
            .collect()
    })
}

impl SearchResult {
    /// Join grouped hits with their factor records from `db`, producing the
    /// JSON-ready response shape.
    ///
    /// Fails with [`StoreError::UnknownAccession`] only if a hit references
    /// an accession the store no longer holds, which cannot happen when the
    /// result was produced from the same snapshot.
    pub fn annotate(&self, db: &FactorDb) -> Result<AnnotatedSearchResult, StoreError> {
        self.annotate_with(|ac| db.get(ac))
    }

    /// [`SearchResult::annotate`] with a pluggable record lookup, for callers
    /// that enrich from something other than a [`FactorDb`].
    pub fn annotate_with<'a, F>(&self, lookup: F) -> Result<AnnotatedSearchResult, StoreError>
    where
        F: Fn(&str) -> Option<&'a FactorRecord>,
    {
        let annotate_strand = |strand: &StrandMatches| {
            strand
                .factors
                .iter()
                .map(|hits| {
                    let record = lookup(&hits.ac)
                        .ok_or_else(|| StoreError::UnknownAccession(hits.ac.clone()))?;
                    Ok(AnnotatedMatch {
                        factor_id: record.ac.clone(),
                        sq: record.sq.clone(),
                        de: record.de.clone(),
                        function_label: record.function_label.clone(),
                        positions: hits.positions.clone(),
                        color: record.color.clone(),
                    })
                })
                .collect::<Result<Vec<_>, StoreError>>()
        };
        Ok(AnnotatedSearchResult {
            original_sequence: self.original_sequence.clone(),
            reverse_complement_sequence: self.reverse_complement_sequence.clone(),
            forward_strand_matches: annotate_strand(&self.forward)?,
            reverse_strand_matches: annotate_strand(&self.reverse)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ac: &str, sq: &str) -> FactorRecord {
        FactorRecord {
            ac: ac.to_string(),
            sq: sq.to_string(),
            color: "#000000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn forward_and_reverse_strands_are_scanned() {
        let db = FactorDb::from_records(vec![record("F1", "ACGT")]);
        let result = search_sequence("TTACGTTT", &db).unwrap();
        assert_eq!(result.reverse_complement_sequence, "AAACGTAA");
        assert_eq!(result.forward.factors.len(), 1);
        assert_eq!(
            result.forward.factors[0].positions,
            vec![PositionRange { start: 2, end: 6 }]
        );
        // ACGT also occurs in the reverse complement, at the same offset here.
        assert_eq!(
            result.reverse.factors[0].positions,
            vec![PositionRange { start: 2, end: 6 }]
        );
    }

    #[test]
    fn empty_database_still_reports_reverse_complement() {
        let db = FactorDb::from_records(Vec::new());
        let result = search_sequence("GATTACA", &db).unwrap();
        assert_eq!(result.reverse_complement_sequence, "TGTAATC");
        assert!(result.forward.factors.is_empty());
        assert!(result.reverse.factors.is_empty());
    }

    #[test]
    fn recorded_search_persists_the_raw_query() {
        let db = FactorDb::from_records(vec![record("F1", "ACGT")]);
        let mut history = MemoryHistory::new();
        let recorded = search_sequence_recorded("ttACGTtt", &db, "alice", &mut history).unwrap();
        assert_eq!(recorded.history_id, 1);
        let entries = history.entries();
        assert_eq!(entries[0].sequence, "ttACGTtt"); // raw, not canonicalised
        assert_eq!(entries[0].user, "alice");
        assert_eq!(recorded.result.forward.factors[0].ac, "F1");
    }

    #[test]
    fn factor_direction_scans_stored_sequences() {
        let db = FactorDb::builtin();
        let result = search_factors("TGACG", &db).unwrap();
        assert_eq!(result.reverse_complement_sequence, "CGTCA");
        let acs: Vec<&str> = result
            .forward
            .factors
            .iter()
            .map(|f| f.ac.as_str())
            .collect();
        // Only the TGACG-motif record contains the pattern verbatim.
        assert_eq!(acs, ["CARE0007"]);
        assert_eq!(
            result.forward.factors[0].positions,
            vec![PositionRange { start: 0, end: 5 }]
        );
    }

    #[test]
    fn batch_search_keeps_input_order() {
        let db = FactorDb::from_records(vec![record("F1", "ACGT")]);
        let queries = vec![
            ("q1".to_string(), "TTACGTTT".to_string()),
            ("q2".to_string(), "GGGG".to_string()),
            ("q3".to_string(), "ACGTACGT".to_string()),
        ];
        let results = search_many(&queries, &db, Some(2)).unwrap();
        let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["q1", "q2", "q3"]);
        assert!(results[1].1.forward.factors.is_empty());
        assert_eq!(results[2].1.forward.factors[0].positions.len(), 2);
    }

    #[test]
    fn annotation_joins_in_memory_records() {
        let db = FactorDb::builtin();
        let result = search_sequence("TTCACGTGAA", &db).unwrap();
        let annotated = result.annotate(&db).unwrap();
        let gbox = annotated
            .forward_strand_matches
            .iter()
            .find(|m| m.factor_id == "CARE0003")
            .unwrap();
        assert_eq!(gbox.sq, "CACGTG");
        assert!(gbox.de.contains("light"));
        assert_eq!(gbox.color, "#2e7d32");
        assert_eq!(
            gbox.function_label.as_ref().map(|l| l.label.as_str()),
            Some("light")
        );
    }

    #[test]
    fn annotation_surfaces_missing_records() {
        let db = FactorDb::from_records(vec![record("F1", "ACGT")]);
        let result = search_sequence("TTACGTTT", &db).unwrap();
        let err = result.annotate_with(|_| None).unwrap_err();
        assert!(matches!(err, StoreError::UnknownAccession(ac) if ac == "F1"));
    }
}
