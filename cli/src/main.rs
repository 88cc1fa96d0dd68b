//! `preflow`: maximum flow of an edge-list network from a file or stdin

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use preflow_core::io::{read_network, write_flow};
use preflow_core::{MaxFlowResult, MaxFlowSolver, SolverConfig};

#[derive(Parser, Debug)]
#[command(name = "preflow")]
#[command(about = "Highest-label push-relabel maximum flow", long_about = None)]
struct Cli {
    /// Edge-list input (`vertices edges source target` header, 1-based ids); stdin when absent
    input: Option<PathBuf>,
    /// Solver settings as JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
    /// Also print the source side of a minimum cut
    #[arg(long)]
    min_cut: bool,
    /// Check flow invariants after every step
    #[arg(long)]
    validate: bool,
    /// Abort after this many push and relabel operations
    #[arg(long)]
    step_limit: Option<usize>,
    /// Log progress (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Config file settings with flag overrides applied
    fn solver_config(&self) -> Result<SolverConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path).with_context(|| format!("cannot open config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => SolverConfig::default(),
        };
        if self.validate {
            config.validate_invariants = true;
        }
        if self.step_limit.is_some() {
            config.step_limit = self.step_limit;
        }
        Ok(config)
    }

    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn print_result<W: Write>(mut out: W, result: &MaxFlowResult, json: bool, min_cut: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut out, result)?;
        writeln!(out)?;
        return Ok(());
    }
    write_flow(&mut out, result.max_flow, &result.flow_edges)?;
    if min_cut {
        let side: Vec<String> = result.min_cut.iter().map(|vertex| (vertex + 1).to_string()).collect();
        writeln!(out, "cut {}", side.join(" "))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter())).init();

    let config = cli.solver_config()?;
    debug!("solver config: {:?}", config);

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut network = read_network(reader).context("failed to read network")?;
    info!(
        "read network with {} vertices and {} edges",
        network.vertex_count(),
        network.edge_count()
    );

    let result = MaxFlowSolver::with_config(config)
        .solve(&mut network)
        .context("maximum flow computation failed")?;

    let stdout = io::stdout();
    print_result(stdout.lock(), &result, cli.json, cli.min_cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflow_core::FlowAssignment;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["preflow"]).unwrap();
        assert!(cli.input.is_none());
        assert!(!cli.json && !cli.min_cut && !cli.validate);
        assert_eq!(cli.log_filter(), "warn");
        assert_eq!(cli.solver_config().unwrap(), SolverConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "preflow",
            "network.txt",
            "--validate",
            "--step-limit",
            "500",
            "--min-cut",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("network.txt")));
        assert_eq!(cli.log_filter(), "debug");

        let config = cli.solver_config().unwrap();
        assert!(config.validate_invariants);
        assert_eq!(config.step_limit, Some(500));
        assert!(config.skip_unreachable);
    }

    #[test]
    fn test_rejects_bad_step_limit() {
        assert!(Cli::try_parse_from(["preflow", "--step-limit", "many"]).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::try_parse_from(["preflow", "--config", "/nonexistent/preflow.json"]).unwrap();
        assert!(cli.solver_config().is_err());
    }

    #[test]
    fn test_print_text_with_cut() {
        let result = MaxFlowResult {
            max_flow: 2,
            flow_edges: vec![
                FlowAssignment { from: 0, to: 1, flow: 2 },
                FlowAssignment { from: 1, to: 2, flow: 2 },
            ],
            min_cut: vec![0],
            metrics: Default::default(),
        };
        let mut out = Vec::new();
        print_result(&mut out, &result, false, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2\n1 2 2\n2 3 2\ncut 1\n");

        let mut out = Vec::new();
        print_result(&mut out, &result, true, false).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["max_flow"], 2);
    }
}
