use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;

use crescan::export::{export_rows, write_csv, ExportRow};
use crescan::{search_factors, search_many, search_sequence, FactorDb, FactorFilter};

/// crescan CLI
#[derive(Parser)]
#[command(name = "crescan")]
#[command(version)]
#[command(about = "CRE factor registry and IUPAC motif scanner", long_about = None)]
struct Cli {
    /// Factor snapshot CSV replacing the built-in registry
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the factor registry
    ListFactors,

    /// Describe a factor by accession (e.g. "CARE0003")
    Describe {
        /// Accession to describe
        ac: String,
    },

    /// Scan a query sequence against the registry on both strands
    Scan {
        /// Query nucleotide sequence (omit when using --fasta)
        sequence: Option<String>,
        /// Read queries from a FASTA/FASTQ file instead
        #[arg(long, conflicts_with = "sequence")]
        fasta: Option<PathBuf>,
        /// Emit annotated results as JSON
        #[arg(long)]
        json: bool,
        /// Write the export table to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Threads for FASTA batches (default: all logical cores)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Find a query pattern within the stored factor sequences
    FindPattern {
        /// IUPAC pattern to look for
        pattern: String,
        /// Emit annotated results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter the registry by field substrings
    Query {
        #[arg(long)]
        ac: Option<String>,
        #[arg(long)]
        dt: Option<String>,
        #[arg(long)]
        de: Option<String>,
        #[arg(long)]
        kw: Option<String>,
        #[arg(long)]
        os: Option<String>,
        #[arg(long)]
        ra: Option<String>,
        #[arg(long)]
        rt: Option<String>,
        #[arg(long)]
        rl: Option<String>,
        #[arg(long)]
        rd: Option<String>,
        #[arg(long)]
        sq: Option<String>,
        /// Records to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,
        /// Maximum records to show
        #[arg(long, default_value_t = crescan::DEFAULT_RECORD_LIMIT)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let db = match &cli.db {
        Some(path) => FactorDb::from_snapshot(path)
            .with_context(|| format!("failed to load factor snapshot {}", path.display()))?,
        None => FactorDb::builtin(),
    };

    match cli.command {
        Commands::ListFactors => cmd_list_factors(&db)?,
        Commands::Describe { ac } => cmd_describe(&db, &ac)?,
        Commands::Scan {
            sequence,
            fasta,
            json,
            csv,
            threads,
        } => cmd_scan(&db, sequence, fasta, json, csv, threads)?,
        Commands::FindPattern { pattern, json } => cmd_find_pattern(&db, &pattern, json)?,
        Commands::Query {
            ac,
            dt,
            de,
            kw,
            os,
            ra,
            rt,
            rl,
            rd,
            sq,
            skip,
            limit,
        } => {
            let filter = FactorFilter {
                ac,
                dt,
                de,
                kw,
                os,
                ra,
                rt,
                rl,
                rd,
                sq,
            };
            cmd_query(&db, &filter, skip, limit)?;
        }
    }

    Ok(())
}

fn print_table(df: &DataFrame) {
    // Polars' pretty-printer reads these (fmt feature); show full cells.
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "120");
    println!("{df}");
}

fn registry_table(records: &[&crescan::FactorRecord]) -> PolarsResult<DataFrame> {
    df!(
        "ac"    => records.iter().map(|r| r.ac.clone()).collect::<Vec<_>>(),
        "de"    => records.iter().map(|r| r.de.clone()).collect::<Vec<_>>(),
        "os"    => records.iter().map(|r| r.os.clone()).collect::<Vec<_>>(),
        "sq"    => records.iter().map(|r| r.sq.clone()).collect::<Vec<_>>(),
        "label" => records
            .iter()
            .map(|r| {
                r.function_label
                    .as_ref()
                    .map(|l| l.label.clone())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>(),
    )
}

fn hits_table(rows: &[ExportRow]) -> PolarsResult<DataFrame> {
    df!(
        "strand"    => rows.iter().map(|r| r.strand.to_string()).collect::<Vec<_>>(),
        "ac"        => rows.iter().map(|r| r.ac.clone()).collect::<Vec<_>>(),
        "de"        => rows.iter().map(|r| r.de.clone()).collect::<Vec<_>>(),
        "sq"        => rows.iter().map(|r| r.sq.clone()).collect::<Vec<_>>(),
        "positions" => rows.iter().map(|r| r.positions.clone()).collect::<Vec<_>>(),
    )
}

fn cmd_list_factors(db: &FactorDb) -> Result<()> {
    let records: Vec<&crescan::FactorRecord> = db.records().iter().collect();
    let df = registry_table(&records).context("building registry table")?;
    print_table(&df);
    Ok(())
}

fn cmd_describe(db: &FactorDb, ac: &str) -> Result<()> {
    let Some(record) = db.get(ac) else {
        bail!("Unknown accession: {ac}. Use `crescan list-factors` to see valid accessions.");
    };
    println!("ac: {}", record.ac);
    println!("dt: {}", record.dt);
    println!("de: {}", record.de);
    println!("kw: {}", record.kw);
    println!("os: {}", record.os);
    println!("ra: {}", record.ra);
    println!("rt: {}", record.rt);
    println!("rl: {}", record.rl);
    println!("rc: {}", record.rc);
    println!("rd: {}", record.rd);
    println!("sq: {}", record.sq);
    println!("color: {}", record.color);
    if let Some(label) = &record.function_label {
        println!("function: {} ({})", label.label, label.detail_label);
    }
    if let Some(note) = &record.note {
        println!("note: {note}");
    }
    Ok(())
}

fn cmd_scan(
    db: &FactorDb,
    sequence: Option<String>,
    fasta: Option<PathBuf>,
    json: bool,
    csv: Option<PathBuf>,
    threads: Option<usize>,
) -> Result<()> {
    let results = match (sequence, fasta) {
        (Some(seq), None) => vec![("query".to_string(), search_sequence(&seq, db)?)],
        (None, Some(path)) => {
            let queries: Vec<(String, String)> = crescan::seqio::read_queries(&path)?
                .into_iter()
                .map(|r| (r.id, r.sequence))
                .collect();
            search_many(&queries, db, threads)?
        }
        _ => bail!("provide a sequence argument or --fasta <file>"),
    };

    if let Some(path) = &csv {
        let plain: Vec<_> = results.iter().map(|(_, r)| r.clone()).collect();
        let rows = export_rows(&plain, db)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_csv(&rows, file).context("writing export CSV")?;
        eprintln!("wrote {} rows to {}", rows.len(), path.display());
    }

    if json {
        let annotated = results
            .iter()
            .map(|(_, r)| r.annotate(db))
            .collect::<Result<Vec<_>, _>>()?;
        println!("{}", serde_json::to_string_pretty(&annotated)?);
        return Ok(());
    }

    for (id, result) in &results {
        println!("## {id}");
        println!("query:   {}", result.original_sequence);
        println!("revcomp: {}", result.reverse_complement_sequence);
        println!(
            "hits:    {} forward, {} reverse",
            result.forward.hit_count(),
            result.reverse.hit_count()
        );
        let rows = export_rows(std::slice::from_ref(result), db)?;
        if rows.is_empty() {
            println!("no matches");
            continue;
        }
        let df = hits_table(&rows).context("building result table")?;
        print_table(&df);
    }
    Ok(())
}

fn cmd_find_pattern(db: &FactorDb, pattern: &str, json: bool) -> Result<()> {
    let result = search_factors(pattern, db)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.annotate(db)?)?);
        return Ok(());
    }
    println!("pattern: {}", result.original_sequence);
    println!("revcomp: {}", result.reverse_complement_sequence);
    println!(
        "hits:    {} forward, {} reverse",
        result.forward.hit_count(),
        result.reverse.hit_count()
    );
    let rows = export_rows(&[result], db)?;
    if rows.is_empty() {
        println!("no factor sequence contains the pattern");
        return Ok(());
    }
    let df = hits_table(&rows).context("building result table")?;
    print_table(&df);
    Ok(())
}

fn cmd_query(db: &FactorDb, filter: &FactorFilter, skip: usize, limit: usize) -> Result<()> {
    let page = db.page(filter, skip, limit);
    let df = registry_table(&page.data).context("building registry table")?;
    print_table(&df);
    println!("{} of {} matching records", page.data.len(), page.count);
    Ok(())
}
