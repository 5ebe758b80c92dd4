//! In-memory factor database: the snapshot the search engine scans against.
//!
//! A [`FactorDb`] is an ordered collection of [`FactorRecord`]s. Iteration
//! order is insertion order and is stable, which makes hit ordering across
//! factors deterministic. The full record stays in memory from the initial
//! read, so annotating a hit never re-queries anything.
//!
//! Sources: the built-in curated registry ([`FactorDb::builtin`]) or a
//! delimited snapshot file ([`FactorDb::from_snapshot`]).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::data::factors::FACTORS;
use crate::factor::{FactorRecord, FunctionLabel};

/// Default pagination limit for [`FactorDb::page`].
pub const DEFAULT_RECORD_LIMIT: usize = 100;

/// Colour assigned to snapshot rows that do not specify one.
const FALLBACK_COLOR: &str = "#546e7a";

/// Errors raised by the factor store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snapshot file could not be read or parsed.
    #[error("failed to read factor snapshot")]
    Snapshot(#[from] csv::Error),
    /// A snapshot row carried no accession.
    #[error("snapshot row {row} has an empty accession")]
    MissingAccession { row: usize },
    /// A snapshot row carried no binding pattern.
    #[error("factor {ac} has an empty pattern")]
    EmptyPattern { ac: String },
    /// A hit referenced an accession the store does not hold.
    #[error("factor with AC {0} not found")]
    UnknownAccession(String),
}

/// One row of a CSV snapshot. `label`/`detail_label` columns are optional
/// and fold into the record's function label.
#[derive(Debug, Deserialize)]
struct SnapshotRow {
    ac: String,
    dt: String,
    de: String,
    kw: String,
    os: String,
    ra: String,
    rt: String,
    rl: String,
    #[serde(default)]
    rc: String,
    rd: String,
    sq: String,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    detail_label: Option<String>,
}

/// Ordered, immutable-per-search collection of factor records.
#[derive(Clone, Debug, Default)]
pub struct FactorDb {
    records: Vec<FactorRecord>,
}

impl FactorDb {
    /// The built-in curated registry.
    pub fn builtin() -> Self {
        Self {
            records: FACTORS.iter().map(|f| f.to_record()).collect(),
        }
    }

    /// Wrap an already materialised record list, keeping its order.
    pub fn from_records(records: Vec<FactorRecord>) -> Self {
        Self { records }
    }

    /// Load a CSV snapshot (`ac,dt,de,kw,os,ra,rt,rl,rc,rd,sq,note,color,label,detail_label`).
    ///
    /// Accessions are trimmed, patterns uppercased. Rows without an accession
    /// or without a pattern are rejected rather than silently dropped.
    pub fn from_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;
        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<SnapshotRow>().enumerate() {
            let raw = result?;
            let ac = raw.ac.trim().to_string();
            if ac.is_empty() {
                return Err(StoreError::MissingAccession { row });
            }
            let sq = raw.sq.trim().to_ascii_uppercase();
            if sq.is_empty() {
                return Err(StoreError::EmptyPattern { ac });
            }
            let function_label = raw.label.filter(|l| !l.is_empty()).map(|label| FunctionLabel {
                label,
                detail_label: raw.detail_label.clone().unwrap_or_default(),
            });
            records.push(FactorRecord {
                ac,
                dt: raw.dt,
                de: raw.de,
                kw: raw.kw,
                os: raw.os,
                ra: raw.ra,
                rt: raw.rt,
                rl: raw.rl,
                rc: raw.rc,
                rd: raw.rd,
                sq,
                note: raw.note.filter(|n| !n.is_empty()),
                color: raw.color.filter(|c| !c.is_empty()).unwrap_or_else(|| FALLBACK_COLOR.to_string()),
                function_label,
            });
        }
        Ok(Self { records })
    }

    /// All records, in store order.
    pub fn records(&self) -> &[FactorRecord] {
        &self.records
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by accession (case-insensitive).
    pub fn get(&self, ac: &str) -> Option<&FactorRecord> {
        self.records.iter().find(|r| r.ac.eq_ignore_ascii_case(ac))
    }

    /// `(accession, pattern)` pairs in store order, as the scanner consumes them.
    pub fn pattern_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().map(|r| (r.ac.as_str(), r.sq.as_str()))
    }

    /// Filter and paginate the registry. `count` is the number of records
    /// matching the filter before `skip`/`limit` are applied.
    pub fn page(&self, filter: &FactorFilter, skip: usize, limit: usize) -> FactorPage<'_> {
        let matching: Vec<&FactorRecord> =
            self.records.iter().filter(|r| filter.accepts(r)).collect();
        let count = matching.len();
        let data = matching.into_iter().skip(skip).take(limit).collect();
        FactorPage { data, count }
    }
}

/// Case-insensitive substring filters over the descriptive fields; `None`
/// means "no constraint".
#[derive(Clone, Debug, Default)]
pub struct FactorFilter {
    pub ac: Option<String>,
    pub dt: Option<String>,
    pub de: Option<String>,
    pub kw: Option<String>,
    pub os: Option<String>,
    pub ra: Option<String>,
    pub rt: Option<String>,
    pub rl: Option<String>,
    pub rd: Option<String>,
    pub sq: Option<String>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl FactorFilter {
    fn accepts(&self, r: &FactorRecord) -> bool {
        let checks = [
            (&self.ac, &r.ac),
            (&self.dt, &r.dt),
            (&self.de, &r.de),
            (&self.kw, &r.kw),
            (&self.os, &r.os),
            (&self.ra, &r.ra),
            (&self.rt, &r.rt),
            (&self.rl, &r.rl),
            (&self.rd, &r.rd),
            (&self.sq, &r.sq),
        ];
        checks
            .iter()
            .all(|(needle, field)| needle.as_deref().map_or(true, |n| contains_ci(field, n)))
    }
}

/// One page of filtered records plus the pre-pagination match count.
#[derive(Clone, Debug)]
pub struct FactorPage<'a> {
    /// Records on this page, in store order.
    pub data: Vec<&'a FactorRecord>,
    /// Records matching the filter across all pages.
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_order_is_stable_and_lookup_case_insensitive() {
        let db = FactorDb::builtin();
        assert!(!db.is_empty());
        assert_eq!(db.records()[0].ac, "CARE0001");
        assert_eq!(db.get("care0003").map(|r| r.sq.as_str()), Some("CACGTG"));
        assert!(db.get("CARE9999").is_none());
    }

    #[test]
    fn pattern_pairs_follow_store_order() {
        let db = FactorDb::builtin();
        let first: Vec<&str> = db.pattern_pairs().take(2).map(|(ac, _)| ac).collect();
        assert_eq!(first, ["CARE0001", "CARE0002"]);
    }

    #[test]
    fn snapshot_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ac,dt,de,kw,os,ra,rt,rl,rc,rd,sq,note,color,label,detail_label"
        )
        .unwrap();
        writeln!(
            file,
            "X0001,01.01.2024,Test box,test,Zea mays,Doe J.,A title,J. 1:1 (2024),,detail,tgacg,,#ff0000,hormone,hormone responsiveness"
        )
        .unwrap();
        writeln!(
            file,
            "X0002,01.01.2024,Other box,test,Zea mays,Doe J.,A title,J. 1:1 (2024),,detail,ccaat,some note,,,"
        )
        .unwrap();
        let db = FactorDb::from_snapshot(file.path()).unwrap();
        assert_eq!(db.len(), 2);
        let first = db.get("X0001").unwrap();
        assert_eq!(first.sq, "TGACG"); // uppercased on load
        assert_eq!(
            first.function_label.as_ref().map(|l| l.label.as_str()),
            Some("hormone")
        );
        let second = db.get("X0002").unwrap();
        assert_eq!(second.color, FALLBACK_COLOR);
        assert_eq!(second.note.as_deref(), Some("some note"));
        assert!(second.function_label.is_none());
    }

    #[test]
    fn snapshot_rejects_empty_pattern() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ac,dt,de,kw,os,ra,rt,rl,rc,rd,sq,note,color,label,detail_label"
        )
        .unwrap();
        writeln!(file, "X0001,d,d,d,d,d,d,d,,d,,,,,").unwrap();
        let err = FactorDb::from_snapshot(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::EmptyPattern { .. }));
    }

    #[test]
    fn paging_reports_full_count() {
        let db = FactorDb::builtin();
        let filter = FactorFilter {
            de: Some("cis-acting".into()),
            ..Default::default()
        };
        let page = db.page(&filter, 0, 2);
        assert_eq!(page.data.len(), 2);
        assert!(page.count > 2);
        let rest = db.page(&filter, 2, DEFAULT_RECORD_LIMIT);
        assert_eq!(rest.count, page.count);
        assert_eq!(rest.data.len(), page.count - 2);
    }

    #[test]
    fn filters_are_case_insensitive_substrings() {
        let db = FactorDb::builtin();
        let filter = FactorFilter {
            os: Some("arabidopsis".into()),
            ..Default::default()
        };
        let page = db.page(&filter, 0, DEFAULT_RECORD_LIMIT);
        assert!(page.count >= 2);
        assert!(page.data.iter().all(|r| r.os.contains("Arabidopsis")));
    }
}
