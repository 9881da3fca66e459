//! Command line front end: evaluate, list or generate genomes.

mod telemetry;

use anyhow::{anyhow, bail, Context, Result};
use genevo_core::{children_from_fitness, Config};
use genevo_genome::{Alphabet, Genome};
use genevo_vm::{Candidate, Evaluator, Individual, TracingObserver};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, PartialEq)]
enum Command {
    Evaluate(String),
    Parse(String),
    Random { length: Option<usize>, seed: Option<u64> },
}

#[derive(Debug, PartialEq)]
struct Invocation {
    config_path: Option<PathBuf>,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut config_path = None;
    let mut rest = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().ok_or_else(|| anyhow!("--config needs a path"))?;
            config_path = Some(PathBuf::from(path));
        } else {
            rest.push(arg.as_str());
        }
    }

    let command = match rest.as_slice() {
        ["parse", genome] => Command::Parse(genome.to_string()),
        ["random"] => Command::Random { length: None, seed: None },
        ["random", length] => Command::Random {
            length: Some(length.parse().context("invalid genome length")?),
            seed: None,
        },
        ["random", length, seed] => Command::Random {
            length: Some(length.parse().context("invalid genome length")?),
            seed: Some(seed.parse().context("invalid seed")?),
        },
        [genome] if *genome != "parse" && *genome != "random" => {
            Command::Evaluate(genome.to_string())
        }
        _ => bail!("unrecognised arguments"),
    };

    Ok(Invocation {
        config_path,
        command,
    })
}

fn usage() {
    println!("Usage:");
    println!("\tgenevo [--config <file>] parse <genome> - Lists the instructions of the genome");
    println!("\tgenevo [--config <file>] random [length] [seed] - Builds and scores a random genome");
    println!("\tgenevo [--config <file>] <genome> - Evaluates the fitness of the given genome");
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}", e);
            usage();
            std::process::exit(1);
        }
    };

    // Single evaluations trace every step
    let default_filter = match invocation.command {
        Command::Evaluate(_) => "info,genevo_vm=debug",
        _ => "info",
    };
    telemetry::init_telemetry(default_filter)?;

    let config = match &invocation.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match invocation.command {
        Command::Evaluate(text) => evaluate(&config, &text),
        Command::Parse(text) => describe(&config, &text),
        Command::Random { length, seed } => random(&config, length, seed),
    }
}

#[instrument(skip(config))]
fn evaluate(config: &Config, text: &str) -> Result<()> {
    let evaluator = Evaluator::new(config.evaluator.clone());
    let alphabet = Alphabet::from_symbols(&config.evolution.alphabet)?;

    let evaluation = match Genome::parse(text, &alphabet) {
        Ok(genome) => evaluator.run_observed(&genome, &mut TracingObserver),
        Err(e) => {
            warn!("{}; evaluating leniently", e);
            evaluator.run_symbols(text, &mut TracingObserver)
        }
    };

    info!(
        steps = evaluation.steps,
        children = evaluation.state.children,
        survived = evaluation.survived(),
        "Evaluation finished"
    );
    println!("{}", evaluation.fitness);
    Ok(())
}

fn describe(config: &Config, text: &str) -> Result<()> {
    let alphabet = Alphabet::from_symbols(&config.evolution.alphabet)?;
    let genome = Genome::parse(text, &alphabet)?;
    for name in genome.describe() {
        println!("{}", name);
    }
    Ok(())
}

#[instrument(skip(config))]
fn random(config: &Config, length: Option<usize>, seed: Option<u64>) -> Result<()> {
    let mut evolution = config.evolution.clone();
    if let Some(length) = length {
        evolution.genome_length = length;
    }

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let evaluator = Arc::new(Evaluator::new(config.evaluator.clone()));
    let candidate = Candidate::random(evaluator, &evolution, &mut rng)?;
    let fitness = candidate.fitness();
    let children = children_from_fitness(fitness, config.evaluator.execution.step_budget);

    println!("{} -> {} ({} children)", candidate.genome(), fitness, children);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_evaluate() {
        let invocation = parse_args(&args(&["CDCDB"])).unwrap();
        assert_eq!(invocation.command, Command::Evaluate("CDCDB".to_string()));
        assert_eq!(invocation.config_path, None);
    }

    #[test]
    fn test_parse_listing_with_config() {
        let invocation = parse_args(&args(&["--config", "genevo.json", "parse", "AB"])).unwrap();
        assert_eq!(invocation.command, Command::Parse("AB".to_string()));
        assert_eq!(invocation.config_path, Some(PathBuf::from("genevo.json")));
    }

    #[test]
    fn test_parse_random() {
        let invocation = parse_args(&args(&["random", "20", "7"])).unwrap();
        assert_eq!(
            invocation.command,
            Command::Random {
                length: Some(20),
                seed: Some(7)
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["parse"])).is_err());
        assert!(parse_args(&args(&["random", "ten"])).is_err());
        assert!(parse_args(&args(&["--config"])).is_err());
    }
}
