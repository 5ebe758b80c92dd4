//! Core types for **factor records**, **match hits** and **search results**.
//!
//! This module holds the data model used across the crate. Factor records
//! follow the TRANSFAC-style flat-file layout of curated cis-regulatory
//! element databases: two-letter field tags (`AC`, `DT`, `DE`, `KW`, `OS`,
//! `RA`, `RT`, `RL`, `RC`, `RD`, `SQ`) flattened into one record per factor.
//!
//! Result assembly is done with explicit structs rather than ad hoc key/value
//! maps: [`MatchHit`] for raw scanner output, [`FactorHits`] for per-factor
//! grouping, [`SearchResult`] for a whole two-strand search.

use serde::{Deserialize, Serialize};

/// Functional classification attached to a factor (e.g. "light responsive").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionLabel {
    /// Short classification, e.g. `"light"`.
    pub label: String,
    /// Longer human-readable description of the classification.
    pub detail_label: String,
}

/// A curated factor record: one known transcription-factor binding element.
///
/// The `sq` field is the binding pattern in the IUPAC nucleotide alphabet
/// (`A`/`C`/`G`/`T` plus the eleven ambiguity codes). All other fields are
/// descriptive metadata carried through to annotated results and exports.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorRecord {
    /// Accession code, the stable identifier (e.g. `"CARE0007"`).
    pub ac: String,
    /// Date / curation stamp.
    pub dt: String,
    /// Description of the element.
    pub de: String,
    /// Keywords.
    pub kw: String,
    /// Organism of origin.
    pub os: String,
    /// Reference authors.
    pub ra: String,
    /// Reference title.
    pub rt: String,
    /// Reference link (journal citation or URL).
    pub rl: String,
    /// Reference comment.
    pub rc: String,
    /// Reference detail.
    pub rd: String,
    /// Binding pattern, IUPAC alphabet, uppercase.
    pub sq: String,
    /// Free-form curator note.
    #[serde(default)]
    pub note: Option<String>,
    /// Display colour used by result viewers (hex, e.g. `"#2e7d32"`).
    pub color: String,
    /// Functional classification, if curated.
    #[serde(default)]
    pub function_label: Option<FunctionLabel>,
}

/// Half-open position range of one match: `start..end` within the scanned
/// strand, with `end - start` equal to the pattern's literal length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRange {
    /// Start index (0-based) of the match within the haystack.
    pub start: usize,
    /// End index (exclusive); always `start + pattern.len()`.
    pub end: usize,
}

/// A single raw match of one factor's pattern within a haystack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchHit {
    /// Accession of the factor whose pattern matched.
    pub ac: String,
    /// Start index (0-based) within the haystack.
    pub start: usize,
    /// End index (exclusive), `start + pattern.len()`.
    pub end: usize,
}

/// All hit positions for one factor, in discovery order.
///
/// Produced by [`crate::scan::group_by_factor`]; overlapping or duplicate
/// ranges are kept as found, never deduplicated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FactorHits {
    /// Accession of the matched factor.
    pub ac: String,
    /// Match positions in the order the scanner reported them.
    pub positions: Vec<PositionRange>,
}

/// Grouped matches for one strand (forward or reverse complement).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StrandMatches {
    /// One entry per matched factor, in first-discovery order.
    pub factors: Vec<FactorHits>,
}

impl StrandMatches {
    /// Total number of raw hit positions across all factors.
    pub fn hit_count(&self) -> usize {
        self.factors.iter().map(|f| f.positions.len()).sum()
    }
}

/// Outcome of scanning one query against the factor database on both strands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// The query as scanned (uppercased).
    pub original_sequence: String,
    /// Reverse complement of the query.
    pub reverse_complement_sequence: String,
    /// Matches found on the forward strand.
    pub forward: StrandMatches,
    /// Matches found on the reverse-complement strand.
    pub reverse: StrandMatches,
}

/// A [`SearchResult`] whose query was also persisted to a history store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordedSearchResult {
    /// The search outcome.
    #[serde(flatten)]
    pub result: SearchResult,
    /// Identifier of the stored history entry.
    pub history_id: u64,
}

/// One factor's matches enriched with its descriptive metadata, mirroring
/// the per-strand rows a result viewer renders.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedMatch {
    /// Accession of the matched factor.
    pub factor_id: String,
    /// The factor's binding pattern.
    pub sq: String,
    /// Description of the element.
    pub de: String,
    /// Functional classification, if curated.
    pub function_label: Option<FunctionLabel>,
    /// Match positions in discovery order.
    pub positions: Vec<PositionRange>,
    /// Display colour of the factor.
    pub color: String,
}

/// A [`SearchResult`] joined against the in-memory factor records, suitable
/// for JSON serialization to result consumers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedSearchResult {
    /// The query as scanned.
    pub original_sequence: String,
    /// Reverse complement of the query.
    pub reverse_complement_sequence: String,
    /// Enriched matches on the forward strand.
    pub forward_strand_matches: Vec<AnnotatedMatch>,
    /// Enriched matches on the reverse-complement strand.
    pub reverse_strand_matches: Vec<AnnotatedMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strand_hit_count_sums_positions() {
        let strand = StrandMatches {
            factors: vec![
                FactorHits {
                    ac: "CARE0001".into(),
                    positions: vec![
                        PositionRange { start: 0, end: 4 },
                        PositionRange { start: 9, end: 13 },
                    ],
                },
                FactorHits {
                    ac: "CARE0002".into(),
                    positions: vec![PositionRange { start: 2, end: 8 }],
                },
            ],
        };
        assert_eq!(strand.hit_count(), 3);
    }

    #[test]
    fn recorded_result_serializes_flat() {
        let recorded = RecordedSearchResult {
            result: SearchResult {
                original_sequence: "ACGT".into(),
                reverse_complement_sequence: "ACGT".into(),
                forward: StrandMatches::default(),
                reverse: StrandMatches::default(),
            },
            history_id: 7,
        };
        let json = serde_json::to_value(&recorded).unwrap();
        assert_eq!(json["history_id"], 7);
        assert_eq!(json["original_sequence"], "ACGT");
    }
}
