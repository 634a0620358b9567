//! `shamir` command line: split a secret into shares, or combine shares back.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use num_bigint::BigUint;

use shamir_sss::{
    parse_shares, reconstruct_secret, render_shares, split_secret, Parameters, ShamirResult,
    Share, DEFAULT_PARAMETERS,
};

#[derive(Parser)]
#[command(name = "shamir")]
#[command(about = "Shamir's Secret Sharing over GF(p)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a secret into shares
    Split(SplitArgs),
    /// Reconstruct a secret from shares
    Combine(CombineArgs),
}

#[derive(Args)]
struct FieldArgs {
    /// Number of shares to which the secret will be split
    #[arg(long)]
    number: Option<usize>,

    /// Minimum number of shares needed to reconstruct the secret
    #[arg(long)]
    threshold: Option<usize>,

    /// Prime used as the basis of the Galois field [default: built-in 8192-bit prime]
    #[arg(long)]
    prime: Option<BigUint>,

    /// JSON parameter file; explicit flags take precedence over it
    #[arg(long)]
    params: Option<PathBuf>,
}

impl FieldArgs {
    fn resolve(&self) -> ShamirResult<Parameters> {
        let mut params = match &self.params {
            Some(path) => Parameters::from_json_file(path)?,
            None => DEFAULT_PARAMETERS.clone(),
        };
        if let Some(number) = self.number {
            params.num_shares = number;
        }
        if let Some(threshold) = self.threshold {
            params.threshold = threshold;
        }
        if let Some(prime) = &self.prime {
            params.prime = prime.clone();
        }
        Ok(params)
    }
}

#[derive(Args)]
struct SplitArgs {
    #[command(flatten)]
    field: FieldArgs,

    /// The secret to be split, in decimal
    #[arg(long)]
    secret: BigUint,

    /// Bits per share [default: 256]
    #[arg(long)]
    bits_per_share: Option<u64>,

    /// Draw coefficients and x-coordinates from the whole field instead
    #[arg(long, conflicts_with = "bits_per_share")]
    full_field: bool,

    /// Print shares as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CombineArgs {
    #[command(flatten)]
    field: FieldArgs,

    /// File holding the shares; stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Read shares as JSON instead of the rendered listing
    #[arg(long)]
    json: bool,
}

fn split(args: &SplitArgs) -> ShamirResult<String> {
    let mut params = args.field.resolve()?;
    if let Some(bits) = args.bits_per_share {
        params.bits_per_share = Some(bits);
    }
    if args.full_field {
        params.bits_per_share = None;
    }

    let shares = split_secret(&args.secret, &params)?;
    if args.json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&shares)?))
    } else {
        Ok(render_shares(&shares))
    }
}

fn combine(args: &CombineArgs) -> ShamirResult<String> {
    let params = args.field.resolve()?;
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let shares: Vec<Share> = if args.json {
        serde_json::from_str(&text)?
    } else {
        parse_shares(&text)?
    };
    let secret = reconstruct_secret(&shares, &params)?;
    Ok(format!("{}\n", secret))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (result, failure) = match &cli.command {
        Commands::Split(args) => (split(args), "Error: Unable to split secret!"),
        Commands::Combine(args) => (combine(args), "Error: Unable to reconstruct secret!"),
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", failure);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
