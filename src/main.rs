use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use zkml_gkr::field::element_width;
use zkml_gkr::{Circuit, CircuitBuilder, DefaultField, GKRProof, GKRProtocol, GkrConfig, Verdict};

#[derive(Parser, Debug)]
#[command(version, about = "GKR prover and verifier for layered arithmetic circuits", long_about = None)]
struct Cli {
    /// JSON file with a `GkrConfig`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a circuit and write the proof
    Prove {
        /// Circuit description (JSON)
        #[arg(long)]
        circuit: PathBuf,
        /// Comma separated input values
        #[arg(long, value_delimiter = ',')]
        inputs: Vec<u64>,
        /// Where the canonical proof bytes go
        #[arg(long, default_value = "proof.bin")]
        out: PathBuf,
    },
    /// Check a proof against a circuit
    Verify {
        #[arg(long)]
        circuit: PathBuf,
        #[arg(long)]
        proof: PathBuf,
        /// Claimed outputs; the proof's own outputs if omitted
        #[arg(long, value_delimiter = ',')]
        output: Option<Vec<u64>>,
    },
    /// Print the contents of a proof
    Inspect {
        #[arg(long)]
        proof: PathBuf,
    },
    /// Prove and verify an inner product of length `n` on the inputs 1, 2, 3, ...
    Demo {
        #[arg(short, long, default_value_t = 16)]
        n: usize,
    },
}

fn load_protocol(config: Option<&Path>) -> anyhow::Result<GKRProtocol> {
    let config = match config {
        Some(path) => GkrConfig::from_json_file(path)?,
        None => GkrConfig::default(),
    };

    Ok(GKRProtocol::new(config))
}

fn load_circuit(path: &Path) -> anyhow::Result<Circuit> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Circuit::from_json(&json)?)
}

fn load_proof(path: &Path) -> anyhow::Result<GKRProof<DefaultField>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(GKRProof::from_bytes(&bytes)?)
}

fn to_field(values: &[u64]) -> Vec<DefaultField> {
    values.iter().copied().map(DefaultField::from).collect()
}

fn join(values: &[DefaultField]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

fn report(verdict: Verdict) -> anyhow::Result<()> {
    println!("{verdict}");
    match verdict {
        Verdict::Accept => Ok(()),
        Verdict::Reject(_) => bail!("proof rejected"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let protocol = load_protocol(cli.config.as_deref())?;

    match cli.command {
        Command::Prove { circuit, inputs, out } => {
            let circuit = load_circuit(&circuit)?;
            let inputs = circuit.pad_inputs(&to_field(&inputs));

            let start = Instant::now();
            let proof = protocol.prove(&circuit, &inputs)?;
            info!(elapsed = ?start.elapsed(), depth = circuit.depth(), "proof generated");

            fs::write(&out, proof.to_bytes()?).with_context(|| format!("writing {}", out.display()))?;
            println!("outputs: {}", join(&proof.outputs));
            println!("digest:  {}", proof.digest_hex()?);
        }
        Command::Verify { circuit, proof, output } => {
            let circuit = load_circuit(&circuit)?;
            let proof = load_proof(&proof)?;
            let claimed_output = output.map_or_else(|| proof.outputs.clone(), |o| to_field(&o));

            let start = Instant::now();
            let verdict = protocol.verify(&circuit, &claimed_output, &proof)?;
            info!(elapsed = ?start.elapsed(), "proof checked");

            report(verdict)?;
        }
        Command::Inspect { proof } => {
            let proof = load_proof(&proof)?;

            println!("digest:  {}", proof.digest_hex()?);
            println!("inputs:  {}", join(&proof.inputs));
            println!("outputs: {}", join(&proof.outputs));
            for (i, layer) in proof.layers.iter().enumerate() {
                println!(
                    "layer {}: {} rounds, claims ({}, {})",
                    proof.layers.len() - i,
                    layer.sumcheck_proof.num_rounds(),
                    layer.claimed_left,
                    layer.claimed_right,
                );
            }
            println!(
                "reduction: {} field elements, {} bytes",
                proof.reduction_size(),
                proof.reduction_size() * element_width::<DefaultField>(),
            );
        }
        Command::Demo { n } => {
            let circuit = CircuitBuilder::inner_product(n)?;
            let inputs = to_field(&(1..=circuit.input_size() as u64).collect::<Vec<_>>());

            let start = Instant::now();
            let proof = protocol.prove(&circuit, &inputs)?;
            info!(elapsed = ?start.elapsed(), depth = circuit.depth(), "proof generated");

            let start = Instant::now();
            let verdict = protocol.verify(&circuit, &proof.outputs, &proof)?;
            info!(elapsed = ?start.elapsed(), "proof checked");

            println!("inner product of length {}: {}", circuit.input_size() / 2, join(&proof.outputs));
            println!("proof: {} bytes, digest {}", proof.to_bytes()?.len(), proof.digest_hex()?);
            report(verdict)?;
        }
    }

    Ok(())
}
