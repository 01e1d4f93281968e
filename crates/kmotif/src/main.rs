use std::{
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use graph_rs::input::ParseMode;
use kmotif::{
    LoadedGraph, remove_hubs,
    timing::{Stopwatch, hms},
};
use log::info;

#[derive(Parser)]
#[command(version, about = "Count k-motifs and bound k-stars in large sparse graphs")]
struct Cli {
    /// Number of worker threads for parallel counting. Defaults to one per core.
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct InputArgs {
    /// Stop at the first malformed line instead of failing.
    #[arg(short, long)]
    lenient: bool,

    /// Drop edges touching nodes of this degree or more before counting.
    #[arg(short = 'm', long, value_name = "DEGREE")]
    max_degree: Option<usize>,

    /// Print the result as JSON.
    #[arg(short, long)]
    json: bool,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Count the k-motifs (k-cliques) of a graph.
    Count {
        /// Motif size.
        #[arg(value_parser = clap::value_parser!(u8).range(2..))]
        k: u8,

        /// Edge list, one `source target` pair per line.
        edgelist: PathBuf,

        /// Spread the roots over all worker threads.
        #[arg(short, long, conflicts_with = "enumerate")]
        parallel: bool,

        /// Print every motif in input ids.
        #[arg(short, long, conflicts_with = "json")]
        enumerate: bool,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Lower and upper bound on the number of k-stars.
    Stars {
        /// Star size.
        #[arg(value_parser = clap::value_parser!(u8).range(2..))]
        k: u8,

        /// Edge list, one `source target` pair per line.
        edgelist: PathBuf,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Remove every edge touching a node of degree <MAX_DEGREE> or more.
    Rmhub {
        max_degree: usize,

        in_file: PathBuf,

        out_file: PathBuf,

        /// Stop at the first malformed line instead of failing.
        #[arg(short, long)]
        lenient: bool,
    },
}

fn parse_mode(lenient: bool) -> ParseMode {
    if lenient {
        ParseMode::Truncate
    } else {
        ParseMode::Strict
    }
}

fn load(edgelist: &Path, input: &InputArgs, stopwatch: &mut Stopwatch) -> Result<LoadedGraph> {
    if !input.json {
        println!("Reading edgelist from file {}", edgelist.display());
    }

    let graph = LoadedGraph::from_path(edgelist, parse_mode(input.lenient), input.max_degree)
        .with_context(|| format!("failed to load graph from '{}'", edgelist.display()))?;

    if !input.json {
        println!("{}", graph.summary());
        println!("- Time = {}", hms(stopwatch.lap()));
    }

    Ok(graph)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to set up the thread pool")?;
    }

    let mut stopwatch = Stopwatch::start();

    match cli.command {
        Commands::Count {
            k,
            edgelist,
            parallel,
            enumerate,
            input,
        } => {
            let graph = load(&edgelist, &input, &mut stopwatch)?;
            let k = usize::from(k);

            let report = if enumerate {
                let stdout = io::stdout();
                graph.enumerate_motifs(k, BufWriter::new(stdout.lock()))?
            } else {
                graph.count_motifs(k, parallel)?
            };

            if input.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
                println!("- Time = {}", hms(stopwatch.lap()));
                println!("- Overall time = {}", hms(stopwatch.total()));
            }
        }
        Commands::Stars { k, edgelist, input } => {
            let graph = load(&edgelist, &input, &mut stopwatch)?;

            let report = graph.star_bounds(usize::from(k))?;

            if input.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
                println!("- Time = {}", hms(stopwatch.lap()));
                println!("- Overall time = {}", hms(stopwatch.total()));
            }
        }
        Commands::Rmhub {
            max_degree,
            in_file,
            out_file,
            lenient,
        } => {
            info!("Maximum degree allowed = {}", max_degree);
            let report = remove_hubs(&in_file, &out_file, max_degree, parse_mode(lenient))
                .with_context(|| {
                    format!(
                        "failed to filter '{}' into '{}'",
                        in_file.display(),
                        out_file.display()
                    )
                })?;
            println!("{}", report);
            println!("- Overall time = {}", hms(stopwatch.total()));
        }
    }

    Ok(())
}
