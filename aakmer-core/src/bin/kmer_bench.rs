//! FASTA Throughput Benchmark
//!
//! Measures how fast protein sequences are cut into translated k-mers, using a
//! real FASTA file (for example a UniProt/Swiss-Prot dump) as input.
//!
//! ## What It Benchmarks
//!
//! 1. **Translate**: the residue lookup alone, over every sequence byte
//! 2. **Window**: streaming k-mers through a counting closure
//! 3. **Parse**: the full host path, parser + `Vec<Token>` sink per record
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/kmer_bench /path/to/uniprot_sprot.fasta
//!
//! # Different window width
//! ./target/release/kmer_bench /path/to/uniprot_sprot.fasta 6
//!
//! # Show per-record parse logs
//! RUST_LOG=aakmer_core=debug ./target/release/kmer_bench small.fasta
//! ```
//!
//! Header lines (`>`) are skipped and sequence lines of a record are joined,
//! so each record is parsed as one document.

use std::env;
use std::fs;
use std::time::{Duration, Instant};

use aakmer_core::analyzer::{KmerWindower, ResidueTranslator};
use aakmer_core::config::ParserConfig;
use aakmer_core::parser::{KmerParser, ParserParam};
use aakmer_core::{ParseMode, Token};
use memchr::memchr_iter;
use tracing_subscriber::EnvFilter;

const MEASURE_RUNS: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: kmer_bench <fasta> [k]");
        std::process::exit(1);
    }

    let k = match args.get(2) {
        Some(s) => s.parse::<usize>()?,
        None => ParserConfig::default().k,
    };
    let config = ParserConfig { k };

    println!("Loading file...");
    let bytes = fs::read(&args[1])?;
    let records = split_fasta(&bytes);
    let residues: usize = records.iter().map(Vec::len).sum();

    println!("File:      {:.1} MiB", bytes.len() as f64 / (1024.0 * 1024.0));
    println!("Records:   {}", records.len());
    println!("Residues:  {}", per_unit(residues as f64, "residues"));
    println!("K:         {}\n", k);

    bench_translate(&records, residues);
    bench_window(&records, residues, config.windower()?);
    bench_parse(&records, residues, KmerParser::new(&config)?);

    Ok(())
}

/// Splits a FASTA file into one residue buffer per record.
fn split_fasta(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut records = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let mut start = 0usize;

    let mut handle_line = |line: &[u8], records: &mut Vec<Vec<u8>>| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.first() == Some(&b'>') {
            if let Some(done) = current.take() {
                records.push(done);
            }
            current = Some(Vec::new());
        } else if let Some(seq) = current.as_mut() {
            seq.extend_from_slice(line);
        }
    };

    for i in memchr_iter(b'\n', bytes) {
        handle_line(&bytes[start..i], &mut records);
        start = i + 1;
    }
    if start < bytes.len() {
        handle_line(&bytes[start..], &mut records);
    }
    if let Some(done) = current {
        records.push(done);
    }
    records
}

fn bench_translate(records: &[Vec<u8>], residues: usize) {
    let t = ResidueTranslator::new();
    let mut out = Vec::new();

    let mut run = || {
        for rec in records {
            out.resize(rec.len(), 0);
            t.translate_into(rec, &mut out);
            std::hint::black_box(&out);
        }
    };
    let timings = Timings::collect(&mut run);

    report("translate", residues, &timings, 0);
}

fn bench_window(records: &[Vec<u8>], residues: usize, windower: KmerWindower) {
    let mut tokens = 0u64;
    let mut run = || {
        let mut local = 0u64;
        for rec in records {
            windower.for_each(rec, |_t, _off| local += 1);
        }
        tokens = local;
        std::hint::black_box(tokens);
    };
    let timings = Timings::collect(&mut run);

    report("window", residues, &timings, tokens);
}

fn bench_parse(records: &[Vec<u8>], residues: usize, parser: KmerParser<'static>) {
    let mut tokens = 0u64;
    let mut failures = 0u64;
    let mut sink: Vec<Token> = Vec::new();
    let mut run = || {
        let mut local = 0u64;
        for rec in records {
            sink.clear();
            match parser.parse(&ParserParam::new(rec, ParseMode::Simple), &mut sink) {
                Ok(n) => local += n as u64,
                Err(_) => failures += 1,
            }
        }
        tokens = local;
        std::hint::black_box(&sink);
    };
    let timings = Timings::collect(&mut run);

    report("parse", residues, &timings, tokens);
    if failures > 0 {
        println!("rejected records: {}", failures);
    }
    println!("parse calls: {}\n", parser.calls());
}

/// Wall time of each measured run of one benchmark.
struct Timings {
    runs: Vec<Duration>,
}

impl Timings {
    /// Runs `f` once untimed to fault in the records, then `MEASURE_RUNS` times.
    fn collect<F: FnMut()>(f: &mut F) -> Self {
        f();
        let runs = (0..MEASURE_RUNS)
            .map(|_| {
                let start = Instant::now();
                f();
                start.elapsed()
            })
            .collect();
        Self { runs }
    }

    fn best(&self) -> Duration {
        self.runs.iter().copied().min().unwrap_or_default()
    }

    fn median(&self) -> Duration {
        let mut sorted = self.runs.clone();
        sorted.sort_unstable();
        sorted.get(sorted.len() / 2).copied().unwrap_or_default()
    }
}

fn report(label: &str, residues: usize, timings: &Timings, kmers: u64) {
    let best = timings.best().as_secs_f64();

    println!("{:<12} best {:.3} s, median {:.3} s", label, best, timings.median().as_secs_f64());
    if best > 0.0 {
        println!("{:<12} {}/s", "", per_unit(residues as f64 / best, "residues"));
        if kmers > 0 {
            println!("{:<12} {}/s", "", per_unit(kmers as f64 / best, "k-mers"));
        }
    }
    println!();
}

/// Scales a residue or k-mer count to K/M/G with its unit.
fn per_unit(n: f64, unit: &str) -> String {
    match n {
        n if n >= 1e9 => format!("{:.2} G {}", n / 1e9, unit),
        n if n >= 1e6 => format!("{:.2} M {}", n / 1e6, unit),
        n if n >= 1e3 => format!("{:.2} K {}", n / 1e3, unit),
        n => format!("{:.0} {}", n, unit),
    }
}
