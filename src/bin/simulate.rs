//! Command-line simulator
//!
//! - `simulate run` - simulate one issuance from flags or a JSON submission
//! - `simulate batch --input <csv> --output <csv>` - simulate many rows in parallel

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cp_simulator::batch::run_batch;
use cp_simulator::report::{write_breakdown_csv, Report};
use cp_simulator::{FeeSchedule, IssuanceEngine, SimulationSubmission};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Commercial paper issuance simulator
#[derive(Parser)]
#[command(name = "simulate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON fee schedule overriding the built-in table
    #[arg(long, global = true)]
    fees: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single issuance
    Run {
        /// JSON submission file; flags override its fields
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Profile (inversionista, empresa)
        #[arg(short, long)]
        profile: Option<String>,

        /// Nominal value in USD
        #[arg(short, long)]
        nominal: Option<f64>,

        /// Term in days
        #[arg(short, long, allow_negative_numbers = true)]
        term: Option<f64>,

        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: Option<f64>,

        /// Payment frequency (mensual, trimestral, semestral, anual)
        #[arg(long)]
        payment_frequency: Option<String>,

        /// Amortization (anual, vencimiento)
        #[arg(long)]
        amortization: Option<String>,

        /// Company type (pyme, no_pyme)
        #[arg(long)]
        company_type: Option<String>,

        /// Currency (dolares, bolivares)
        #[arg(long)]
        currency: Option<String>,

        /// Coupon type (con_cupon, cero_cupon)
        #[arg(long)]
        coupon: Option<String>,

        /// Exchange rate at issuance (Bs per USD)
        #[arg(long)]
        initial_rate: Option<f64>,

        /// Exchange rate at maturity (Bs per USD)
        #[arg(long)]
        maturity_rate: Option<f64>,

        /// Issuer name
        #[arg(long)]
        company: Option<String>,

        /// Print results as JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Also write the cost breakdown to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Simulate every row of a CSV file
    Batch {
        /// Input CSV with one submission per row
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long, default_value = "simulation_results.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let engine = IssuanceEngine::new(load_fees(cli.fees.as_deref())?);

    match cli.command {
        Commands::Run {
            input,
            profile,
            nominal,
            term,
            rate,
            payment_frequency,
            amortization,
            company_type,
            currency,
            coupon,
            initial_rate,
            maturity_rate,
            company,
            json,
            csv,
        } => {
            let mut submission = match &input {
                Some(path) => read_submission(path)?,
                None => SimulationSubmission::default(),
            };
            // Flags take precedence over the file
            submission.profile = profile.or(submission.profile);
            submission.nominal_value = nominal.or(submission.nominal_value);
            submission.term_days = term.or(submission.term_days);
            submission.interest_rate = rate.or(submission.interest_rate);
            submission.payment_frequency = payment_frequency.or(submission.payment_frequency);
            submission.amortization = amortization.or(submission.amortization);
            submission.company_type = company_type.or(submission.company_type);
            submission.currency = currency.or(submission.currency);
            submission.coupon = coupon.or(submission.coupon);
            submission.initial_exchange_rate = initial_rate.or(submission.initial_exchange_rate);
            submission.maturity_exchange_rate = maturity_rate.or(submission.maturity_exchange_rate);
            submission.company_name = company.or(submission.company_name);

            run_single(&engine, &submission, json, csv.as_deref())
        }
        Commands::Batch { input, output } => run_batch_files(&engine, &input, &output),
    }
}

fn load_fees(path: Option<&Path>) -> Result<FeeSchedule> {
    match path {
        Some(path) => FeeSchedule::from_json_file(path)
            .with_context(|| format!("Failed to load fee schedule {}", path.display())),
        None => Ok(FeeSchedule::default()),
    }
}

fn read_submission(path: &Path) -> Result<SimulationSubmission> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse submission {}", path.display()))
}

fn run_single(
    engine: &IssuanceEngine,
    submission: &SimulationSubmission,
    json: bool,
    csv_path: Option<&Path>,
) -> Result<()> {
    let request = match submission.validate() {
        Ok(request) => request,
        Err(e) => {
            for issue in &e.issues {
                eprintln!("  {issue}");
            }
            bail!("submission rejected ({} issues)", e.issues.len());
        }
    };

    let data = request.to_simulation_data();
    let results = engine.calculate(&data);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        let today = chrono::Local::now().date_naive();
        print!("{}", Report::new(&data, &results, today));
    }

    if let Some(path) = csv_path {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_breakdown_csv(BufWriter::new(file), &results)?;
        println!("Breakdown written to {}", path.display());
    }
    Ok(())
}

fn run_batch_files(engine: &IssuanceEngine, input: &Path, output: &Path) -> Result<()> {
    let start = Instant::now();
    println!("Loading submissions from {}...", input.display());

    let reader = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let writer = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let summary = run_batch(engine, BufReader::new(reader), BufWriter::new(writer))?;

    println!("Output written to {}", output.display());
    println!("\nBatch Summary:");
    println!("  Submissions: {}", summary.total);
    println!("  Succeeded:   {}", summary.succeeded);
    println!("  Failed:      {}", summary.failed);
    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
