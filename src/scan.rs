//! The motif search engine: reverse-complement transform, IUPAC pattern
//! compilation and multi-pattern scanning.
//!
//! Ambiguity codes compile to regex character classes (`N` → `[ACGT]`,
//! `S` → `[GC]`, ...), so a stored pattern becomes an ordinary substring
//! regex over the uppercased haystack. Every pattern character consumes
//! exactly one haystack base, which is why a hit's span is always the
//! pattern's literal length.
//!
//! # Examples
//! ```
//! use crescan::scan::{reverse_complement, compile_pattern};
//! assert_eq!(reverse_complement("GATTACA"), "TGTAATC");
//! assert_eq!(compile_pattern("ASGT"), "A[GC]GT");
//! ```

use anyhow::{Context, Result};
use regex::Regex;

use crate::factor::{FactorHits, MatchHit, PositionRange};

/// Reverse complement of a nucleotide string.
///
/// The input is read right-to-left and uppercased; `A`/`T` and `C`/`G` are
/// swapped, any other character (ambiguity codes included) passes through
/// unchanged. Total over arbitrary input, pure, no error conditions.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| match c.to_ascii_uppercase() {
            'A' => 'T',
            'T' => 'A',
            'C' => 'G',
            'G' => 'C',
            other => other,
        })
        .collect()
}

/// Regex character class for one IUPAC ambiguity code, if it is one.
fn iupac_class(code: char) -> Option<&'static str> {
    match code {
        'R' => Some("[AG]"),
        'Y' => Some("[CT]"),
        'S' => Some("[GC]"),
        'W' => Some("[AT]"),
        'K' => Some("[GT]"),
        'M' => Some("[AC]"),
        'B' => Some("[CGT]"),
        'D' => Some("[AGT]"),
        'H' => Some("[ACT]"),
        'V' => Some("[ACG]"),
        'N' => Some("[ACGT]"),
        _ => None,
    }
}

/// Compile an IUPAC pattern into a regex source string.
///
/// `A`/`C`/`G`/`T` are emitted verbatim, the eleven ambiguity codes become
/// their character classes, and anything else is regex-escaped so stray
/// punctuation in a curated record can never act as a metacharacter. The
/// input is uppercased first; matching is always case-canonical.
pub fn compile_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for c in pattern.chars().map(|c| c.to_ascii_uppercase()) {
        if matches!(c, 'A' | 'C' | 'G' | 'T') {
            out.push(c);
        } else if let Some(class) = iupac_class(c) {
            out.push_str(class);
        } else {
            out.push_str(&regex::escape(&c.to_string()));
        }
    }
    out
}

/// Scan `haystack` for every `(accession, pattern)` pair, in pair order.
///
/// Standard find-all semantics per pattern: matches are non-overlapping and
/// reported left to right; after a match, scanning resumes at its end. Each
/// hit spans `start .. start + pattern.len()` — identical to the true regex
/// span because every IUPAC class consumes exactly one base.
///
/// An empty haystack or an empty pattern collection yields an empty vector.
pub fn find_matches<'a, I>(haystack: &str, patterns: I) -> Result<Vec<MatchHit>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let haystack = haystack.to_ascii_uppercase();
    let mut hits = Vec::new();
    for (ac, pattern) in patterns {
        if pattern.is_empty() {
            continue;
        }
        let re = Regex::new(&compile_pattern(pattern))
            .with_context(|| format!("pattern for {ac} did not compile: {pattern:?}"))?;
        for m in re.find_iter(&haystack) {
            debug_assert_eq!(
                m.end() - m.start(),
                pattern.len(),
                "IUPAC classes must consume exactly one base each"
            );
            hits.push(MatchHit {
                ac: ac.to_string(),
                start: m.start(),
                end: m.start() + pattern.len(),
            });
        }
    }
    Ok(hits)
}

/// Group raw hits per factor, keeping first-discovery order of factors and
/// discovery order of positions within each factor. Overlapping or duplicate
/// ranges are kept as-is.
pub fn group_by_factor(hits: &[MatchHit]) -> Vec<FactorHits> {
    let mut grouped: Vec<FactorHits> = Vec::new();
    for hit in hits {
        let range = PositionRange {
            start: hit.start,
            end: hit.end,
        };
        match grouped.iter_mut().find(|g| g.ac == hit.ac) {
            Some(group) => group.positions.push(range),
            None => grouped.push(FactorHits {
                ac: hit.ac.clone(),
                positions: vec![range],
            }),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revcomp_of_gattaca() {
        assert_eq!(reverse_complement("GATTACA"), "TGTAATC");
    }

    #[test]
    fn revcomp_is_an_involution_over_acgt() {
        for s in ["ACGT", "GGGCCCAATT", "A", "", "TTTTACGGTA"] {
            assert_eq!(reverse_complement(&reverse_complement(s)), s);
        }
    }

    #[test]
    fn revcomp_uppercases_and_complements_lowercase_input() {
        assert_eq!(reverse_complement("gattaca"), "TGTAATC");
    }

    #[test]
    fn revcomp_passes_ambiguity_codes_through() {
        // N is not complemented, only carried; stable under repetition.
        assert_eq!(reverse_complement("N"), "N");
        assert_eq!(reverse_complement("ANT"), "ANT");
    }

    #[test]
    fn literal_pattern_compiles_to_itself() {
        assert_eq!(compile_pattern("ACGT"), "ACGT");
    }

    #[test]
    fn ambiguity_codes_compile_to_classes() {
        assert_eq!(compile_pattern("N"), "[ACGT]");
        assert_eq!(compile_pattern("TATAWAW"), "TATA[AT]A[AT]");
    }

    #[test]
    fn non_iupac_characters_are_escaped() {
        // A stray metacharacter in a curated record must match literally.
        assert_eq!(compile_pattern("AC.T"), r"AC\.T");
        let hits = find_matches("ACGT", [("F1", "AC.T")]).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn literal_match_reported_at_offset() {
        let hits = find_matches("TTACGTTT", [("F1", "ACGT")]).unwrap();
        assert_eq!(
            hits,
            vec![MatchHit {
                ac: "F1".into(),
                start: 2,
                end: 6
            }]
        );
    }

    #[test]
    fn n_matches_every_base_once() {
        for base in ["A", "C", "G", "T"] {
            let hits = find_matches(base, [("F1", "N")]).unwrap();
            assert_eq!(hits.len(), 1, "N should match {base}");
            assert_eq!((hits[0].start, hits[0].end), (0, 1));
        }
        // N is any *base*, not any character.
        assert!(find_matches("-", [("F1", "N")]).unwrap().is_empty());
    }

    #[test]
    fn s_class_restricts_to_g_or_c() {
        let hit = find_matches("ACGT", [("F1", "ASGT")]).unwrap();
        assert_eq!((hit[0].start, hit[0].end), (0, 4));
        let miss = find_matches("AAGT", [("F1", "ASGT")]).unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_on_the_haystack() {
        let hits = find_matches("ttacgttt", [("F1", "ACGT")]).unwrap();
        assert_eq!((hits[0].start, hits[0].end), (2, 6));
    }

    #[test]
    fn matches_do_not_overlap_within_one_pattern() {
        // "AAA" in "AAAAA": find-all resumes after each match -> one hit.
        let hits = find_matches("AAAAA", [("F1", "AAA")]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].start, hits[0].end), (0, 3));
    }

    #[test]
    fn hits_follow_pattern_collection_order() {
        let hits = find_matches("ACGTACGT", [("F2", "CGT"), ("F1", "ACG")]).unwrap();
        let acs: Vec<&str> = hits.iter().map(|h| h.ac.as_str()).collect();
        assert_eq!(acs, ["F2", "F2", "F1", "F1"]);
    }

    #[test]
    fn grouping_preserves_order_and_keeps_duplicates() {
        let hits = vec![
            MatchHit {
                ac: "F1".into(),
                start: 2,
                end: 6,
            },
            MatchHit {
                ac: "F2".into(),
                start: 0,
                end: 3,
            },
            MatchHit {
                ac: "F1".into(),
                start: 8,
                end: 12,
            },
            MatchHit {
                ac: "F1".into(),
                start: 8,
                end: 12,
            },
        ];
        let grouped = group_by_factor(&hits);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].ac, "F1");
        assert_eq!(
            grouped[0].positions,
            vec![
                PositionRange { start: 2, end: 6 },
                PositionRange { start: 8, end: 12 },
                PositionRange { start: 8, end: 12 },
            ]
        );
        assert_eq!(grouped[1].ac, "F2");
    }

    #[test]
    fn empty_inputs_yield_no_hits() {
        assert!(find_matches("", [("F1", "ACGT")]).unwrap().is_empty());
        assert!(find_matches("ACGT", std::iter::empty::<(&str, &str)>())
            .unwrap()
            .is_empty());
        assert!(find_matches("ACGT", [("F1", "")]).unwrap().is_empty());
    }
}
