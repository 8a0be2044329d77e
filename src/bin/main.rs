use clap::{Parser, Subcommand};
use kg_relpred::prelude::*;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kg-relpred")]
#[command(about = "Triple sampling and negative generation for relation prediction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a training subset of triples
    Sample {
        #[arg(short, long)]
        triples: PathBuf,
        #[arg(short, long, default_value = "uniform")]
        method: String,
        #[arg(short, long, default_value_t = kg_relpred::algorithms::DEFAULT_SAMPLE_SIZE)]
        size: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate tail-corrupted negatives for every triple
    Negatives {
        #[arg(short, long)]
        triples: PathBuf,
        #[arg(short, long, default_value_t = 1)]
        rate: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print dataset statistics as JSON
    Stats {
        #[arg(short, long)]
        triples: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Sample { triples, method, size, seed } => {
            let dataset = KnowledgeGraphDataset::from_tsv(&triples)?;
            let sampler = select_sampling(&method)?;
            let mut rng = seeded_rng(seed);

            let sampled = sampler.sample(&dataset.triples, size, dataset.num_entities(), &mut rng)?;
            log::info!("Sampled {} of {} triples with {}", sampled.len(), dataset.triples.len(), sampler.name());

            dataset.write_tsv(&sampled, &mut out)?;
        }
        Commands::Negatives { triples, rate, seed } => {
            let dataset = KnowledgeGraphDataset::from_tsv(&triples)?;
            let mut rng = seeded_rng(seed);

            let negatives = negative_sampling(&dataset.triples, dataset.num_entities(), rate, &mut rng)?;
            dataset.write_tsv(&negatives, &mut out)?;
        }
        Commands::Stats { triples } => {
            let dataset = KnowledgeGraphDataset::from_tsv(&triples)?;
            serde_json::to_writer_pretty(&mut out, &dataset.get_statistics())?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
