use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use serde::Serialize;

use huffman_rust::{compress_with_plan, decompress, huffman::Symbol, preprocess, LogViewer, Properties};

#[derive(Parser, Debug)]
#[command(about = "Huffman compression of a single file")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file, writing <dest> and <dest>.properties
    Compress {
        /// Source filename
        source_name: PathBuf,
        /// Destination filename
        dest_name: PathBuf,
        /// Write the stream even when it is larger than the input
        #[arg(short, long, default_value_t = false)]
        force: bool,
        /// Properties file providing defaults (force=true|false)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the stream properties as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Decompress a file produced by `compress`
    Decompress {
        /// The compressed filename
        source_name: PathBuf,
        /// Destination filename
        dest_name: PathBuf,
    },
    /// Show the code table and the size estimate without writing anything
    Inspect {
        /// Source filename
        source_name: PathBuf,
        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct CodeEntry {
    symbol: Symbol,
    weight: u64,
    code: String,
}

#[derive(Serialize)]
struct Report {
    properties: Properties,
    codes: Vec<CodeEntry>,
}

fn run(command: Command) -> huffman_rust::Result<()> {
    match command {
        Command::Compress { source_name, dest_name, force, config, json } => {
            let force = match config {
                Some(path) => force || Properties::load(path)?.force,
                None => force,
            };

            let comp_time = Instant::now();
            let mut input = BufReader::new(File::open(&source_name)?);
            let output = BufWriter::new(File::create(&dest_name)?);

            let plan = match compress_with_plan(&mut input, output, force, &mut LogViewer) {
                Ok(plan) => plan,
                Err(e) => {
                    let _ = fs::remove_file(&dest_name);
                    return Err(e);
                }
            };

            let props = plan.properties(force);
            props.store(Properties::sidecar(&dest_name))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&props).unwrap_or_default());
            }
            info!("compressed {} in {}ns", source_name.display(), comp_time.elapsed().as_nanos());
        }
        Command::Decompress { source_name, dest_name } => {
            let comp_time = Instant::now();
            let input = BufReader::new(File::open(&source_name)?);
            let output = BufWriter::new(File::create(&dest_name)?);

            let decoded = match decompress(input, output, &mut LogViewer) {
                Ok(decoded) => decoded,
                Err(e) if e.is_format() => {
                    let _ = fs::remove_file(&dest_name);
                    return Err(e);
                }
                Err(e) => return Err(e),
            };

            let sidecar = Properties::sidecar(&source_name);
            if sidecar.exists() {
                let props = Properties::load(&sidecar)?;
                if props.original_bytes != decoded {
                    warn!(
                        "{} records {} bytes but {} were decoded",
                        sidecar.display(),
                        props.original_bytes,
                        decoded
                    );
                }
            }
            info!("decompressed {} in {}ns", source_name.display(), comp_time.elapsed().as_nanos());
        }
        Command::Inspect { source_name, json } => {
            let plan = preprocess(BufReader::new(File::open(&source_name)?))?;
            let codes = plan
                .codes
                .iter()
                .map(|(symbol, code)| CodeEntry {
                    symbol,
                    weight: plan.frequencies.count(symbol),
                    code: code.iter().map(|b| if *b { '1' } else { '0' }).collect(),
                })
                .collect();
            let report = Report { properties: plan.properties(false), codes };

            if json {
                println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
            } else {
                for entry in report.codes.iter() {
                    println!("{:>4} {:>10} {}", entry.symbol, entry.weight, entry.code);
                }
                println!(
                    "{} bytes, {} distinct, tree {} bits, payload {} bits, saves {} bits",
                    report.properties.original_bytes,
                    report.properties.distinct_bytes,
                    report.properties.tree_bits,
                    report.properties.compressed_bits,
                    report.properties.bits_saved
                );
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    log_init::init();

    let args = Args::parse();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
