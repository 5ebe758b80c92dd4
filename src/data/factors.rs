//! Built-in curated factor registry.
//!
//! A starter set of well-characterised plant cis-regulatory elements in the
//! TRANSFAC flat-file field layout, embedded as constants so the CLI and the
//! library work without an external snapshot. User databases loaded from a
//! snapshot file replace this set entirely.
//!
//! Patterns are uppercase IUPAC; several entries carry ambiguity codes on
//! purpose so class matching is exercised out of the box.

use crate::factor::{FactorRecord, FunctionLabel};

/// A factor record with `'static` fields, convertible to [`FactorRecord`].
#[derive(Clone, Copy, Debug)]
pub struct BuiltinFactor {
    pub ac: &'static str,
    pub dt: &'static str,
    pub de: &'static str,
    pub kw: &'static str,
    pub os: &'static str,
    pub ra: &'static str,
    pub rt: &'static str,
    pub rl: &'static str,
    pub rc: &'static str,
    pub rd: &'static str,
    pub sq: &'static str,
    pub note: Option<&'static str>,
    pub color: &'static str,
    /// `(label, detail_label)` functional classification, if curated.
    pub label: Option<(&'static str, &'static str)>,
}

impl BuiltinFactor {
    /// Materialise the owned record used throughout the crate.
    pub fn to_record(&self) -> FactorRecord {
        FactorRecord {
            ac: self.ac.to_string(),
            dt: self.dt.to_string(),
            de: self.de.to_string(),
            kw: self.kw.to_string(),
            os: self.os.to_string(),
            ra: self.ra.to_string(),
            rt: self.rt.to_string(),
            rl: self.rl.to_string(),
            rc: self.rc.to_string(),
            rd: self.rd.to_string(),
            sq: self.sq.to_string(),
            note: self.note.map(str::to_string),
            color: self.color.to_string(),
            function_label: self.label.map(|(label, detail)| FunctionLabel {
                label: label.to_string(),
                detail_label: detail.to_string(),
            }),
        }
    }
}

/// The built-in registry, in stable curation order.
pub const FACTORS: &[BuiltinFactor] = &[
    BuiltinFactor {
        ac: "CARE0001",
        dt: "12.04.1999 (created); 03.09.2002 (updated)",
        de: "TATA-box; core promoter element around -30 of transcription start",
        kw: "core promoter; transcription initiation",
        os: "Arabidopsis thaliana",
        ra: "Joshi C.P.",
        rt: "An inspection of the domain between putative TATA box and translation start site in 79 plant genes",
        rl: "Nucleic Acids Res. 15:6643-6653 (1987)",
        rc: "consensus from 79 aligned promoters",
        rd: "positional consensus, -32 to -26",
        sq: "TATAWAW",
        note: None,
        color: "#8d6e63",
        label: Some(("promoter", "core promoter element")),
    },
    BuiltinFactor {
        ac: "CARE0002",
        dt: "12.04.1999 (created)",
        de: "CAAT-box; common cis-acting element in promoter and enhancer regions",
        kw: "core promoter; enhancer",
        os: "Pisum sativum",
        ra: "Shirsat A., Wilford N., Croy R., Boulter D.",
        rt: "Sequences responsible for the tissue specific promoter activity of a pea legumin gene in tobacco",
        rl: "Mol. Gen. Genet. 215:326-331 (1989)",
        rc: "legA promoter dissection",
        rd: "distal promoter module",
        sq: "CCAAT",
        note: None,
        color: "#a1887f",
        label: Some(("promoter", "core promoter element")),
    },
    BuiltinFactor {
        ac: "CARE0003",
        dt: "17.06.1999 (created); 21.01.2003 (updated)",
        de: "G-box; cis-acting regulatory element involved in light responsiveness",
        kw: "light; bZIP; palindrome",
        os: "Arabidopsis thaliana",
        ra: "Giuliano G., Pichersky E., Malik V.S., Timko M.P., Scolnik P.A., Cashmore A.R.",
        rt: "An evolutionarily conserved protein binding sequence upstream of a plant light-regulated gene",
        rl: "Proc. Natl. Acad. Sci. USA 85:7089-7093 (1988)",
        rc: "rbcS and chs promoters",
        rd: "palindromic core, binds bZIP factors",
        sq: "CACGTG",
        note: Some("palindromic; matches both strands at the same offset"),
        color: "#2e7d32",
        label: Some(("light", "light responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0004",
        dt: "17.06.1999 (created)",
        de: "ABRE; cis-acting element involved in abscisic acid responsiveness",
        kw: "ABA; hormone; stress",
        os: "Oryza sativa",
        ra: "Hattori T., Terada T., Hamasuna S.",
        rt: "Regulation of the Osem gene by abscisic acid and the transcriptional activator VP1",
        rl: "Plant J. 7:913-925 (1995)",
        rc: "Osem promoter",
        rd: "ACGT-core element",
        sq: "YACGTGGC",
        note: None,
        color: "#1565c0",
        label: Some(("hormone", "hormone responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0005",
        dt: "05.11.1999 (created)",
        de: "W box; WRKY binding site involved in defence and elicitor response",
        kw: "defence; elicitor; WRKY",
        os: "Nicotiana tabacum",
        ra: "Rushton P.J., Torres J.T., Parniske M., Wernert P., Hahlbrock K., Somssich I.E.",
        rt: "Interaction of elicitor-induced DNA-binding proteins with elicitor response elements in the promoters of parsley PR1 genes",
        rl: "EMBO J. 15:5690-5700 (1996)",
        rc: "PR1 promoter",
        rd: "invariant TGAC core",
        sq: "TTGACC",
        note: None,
        color: "#c62828",
        label: Some(("stress", "stress responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0006",
        dt: "05.11.1999 (created)",
        de: "GC-motif; enhancer-like element involved in anoxic specific inducibility",
        kw: "anaerobic; enhancer",
        os: "Zea mays",
        ra: "Olive M.R., Walker J.C., Singh K., Dennis E.S., Peacock W.J.",
        rt: "Functional properties of the anaerobic responsive element of the maize Adh1 gene",
        rl: "Plant Mol. Biol. 15:593-604 (1990)",
        rc: "Adh1 promoter",
        rd: "GC-rich module",
        sq: "CCCCCG",
        note: None,
        color: "#6a1b9a",
        label: Some(("stress", "stress responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0007",
        dt: "22.03.2000 (created)",
        de: "TGACG-motif; cis-acting regulatory element involved in MeJA responsiveness",
        kw: "methyl jasmonate; as-1; TGA",
        os: "Hordeum vulgare",
        ra: "Rouster J., Leah R., Mundy J., Cameron-Mills V.",
        rt: "Identification of a methyl jasmonate-responsive region in the promoter of a lipoxygenase 1 gene expressed in barley grain",
        rl: "Plant J. 11:513-523 (1997)",
        rc: "lox1 promoter",
        rd: "as-1 like half site",
        sq: "TGACG",
        note: None,
        color: "#ef6c00",
        label: Some(("hormone", "hormone responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0008",
        dt: "22.03.2000 (created)",
        de: "HSE; cis-acting element involved in heat stress responsiveness",
        kw: "heat shock; HSF",
        os: "Glycine max",
        ra: "Schoeffl F., Raschke E., Nagao R.T.",
        rt: "The DNA sequence analysis of soybean heat-shock genes and identification of possible regulatory promoter elements",
        rl: "EMBO J. 3:2491-2497 (1984)",
        rc: "Gmhsp17 promoters",
        rd: "inverted nGAAn repeats",
        sq: "AAAAAATTTC",
        note: None,
        color: "#d84315",
        label: Some(("stress", "stress responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0009",
        dt: "09.08.2000 (created)",
        de: "MBS; MYB binding site involved in drought-inducibility",
        kw: "drought; MYB",
        os: "Arabidopsis thaliana",
        ra: "Urao T., Yamaguchi-Shinozaki K., Urao S., Shinozaki K.",
        rt: "An Arabidopsis myb homolog is induced by dehydration stress and its gene product binds to the conserved MYB recognition sequence",
        rl: "Plant Cell 5:1529-1539 (1993)",
        rc: "rd22 promoter",
        rd: "MYB recognition core",
        sq: "CAACTG",
        note: None,
        color: "#00838f",
        label: Some(("stress", "stress responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0010",
        dt: "09.08.2000 (created)",
        de: "ERE; ethylene-responsive element",
        kw: "ethylene; senescence; ripening",
        os: "Dianthus caryophyllus",
        ra: "Itzhaki H., Maxson J.M., Woodson W.R.",
        rt: "An ethylene-responsive enhancer element is involved in the senescence-related expression of the carnation glutathione-S-transferase (GST1) gene",
        rl: "Proc. Natl. Acad. Sci. USA 91:8925-8929 (1994)",
        rc: "GST1 promoter",
        rd: "enhancer element",
        sq: "ATTTCAAA",
        note: None,
        color: "#558b2f",
        label: Some(("hormone", "hormone responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0011",
        dt: "14.02.2001 (created)",
        de: "LTR; cis-acting element involved in low-temperature responsiveness",
        kw: "cold; low temperature",
        os: "Hordeum vulgare",
        ra: "Dunn M.A., White A.J., Vural S., Hughes M.A.",
        rt: "Identification of promoter elements in a low-temperature-responsive gene (blt4.9) from barley",
        rl: "Plant Mol. Biol. 38:551-564 (1998)",
        rc: "blt4.9 promoter",
        rd: "LTR box",
        sq: "CCGAAA",
        note: None,
        color: "#283593",
        label: Some(("stress", "stress responsiveness")),
    },
    BuiltinFactor {
        ac: "CARE0012",
        dt: "14.02.2001 (created)",
        de: "circadian; cis-acting regulatory element involved in circadian control",
        kw: "circadian; clock",
        os: "Lycopersicon esculentum",
        ra: "Piechulla B., Merforth N., Rudolph B.",
        rt: "Identification of tomato Lhc promoter regions necessary for circadian expression",
        rl: "Plant Mol. Biol. 38:655-662 (1998)",
        rc: "Lhc promoters",
        rd: "spacer tolerated between anchors",
        sq: "CAANNNNATC",
        note: Some("four N positions; every base accepted in the spacer"),
        color: "#4527a0",
        label: Some(("light", "light responsiveness")),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessions_are_unique_and_patterns_uppercase_iupac() {
        let mut seen = std::collections::HashSet::new();
        for f in FACTORS {
            assert!(seen.insert(f.ac), "duplicate accession {}", f.ac);
            assert!(
                f.sq.chars().all(|c| "ACGTRYSWKMBDHVN".contains(c)),
                "{} pattern {} strays outside the IUPAC alphabet",
                f.ac,
                f.sq
            );
        }
    }

    #[test]
    fn builtin_converts_to_owned_record() {
        let rec = FACTORS[0].to_record();
        assert_eq!(rec.ac, "CARE0001");
        assert_eq!(rec.sq, "TATAWAW");
        assert_eq!(
            rec.function_label.as_ref().map(|l| l.label.as_str()),
            Some("promoter")
        );
    }
}
