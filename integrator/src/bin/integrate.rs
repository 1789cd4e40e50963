//! Command-line definite integral calculator
//!
//! Approximates the integral of a single-variable expression over `[lower, upper]`
//! with the trapezoid or Simpson 1/3 rule.
//!
//! ```text
//! integrate "x^2 + 3x" --lower 0 --upper 2 --segments 1000
//! integrate "sin(x)" --upper 3.14159 --method simpson --segments 11
//! integrate "exp(x)" --compare
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use expr_math::normalize;
use integrator::{
    Calculator, IntegratorConfig, QuadratureMethod, DEFAULT_EXPRESSION, EXAMPLE_FUNCTIONS,
};

#[derive(Parser, Debug)]
#[command(
    name = "integrate",
    about = "Approximates a definite integral with the trapezoid or Simpson 1/3 rule",
    long_about = None
)]
struct Args {
    /// Expression in x, e.g. "x^2 + 3x", "sin(x)", "sqrt(x)"
    #[arg(default_value = DEFAULT_EXPRESSION, allow_hyphen_values = true)]
    expression: String,

    /// Lower integration bound
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    lower: String,

    /// Upper integration bound
    #[arg(long, default_value = "2", allow_hyphen_values = true)]
    upper: String,

    /// Number of segments (defaults to the configured value)
    #[arg(long, allow_hyphen_values = true)]
    segments: Option<String>,

    /// Integration method (defaults to the configured value)
    #[arg(long, value_enum)]
    method: Option<QuadratureMethod>,

    /// JSON configuration file with limits and defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run every method and print the results side by side
    #[arg(long)]
    compare: bool,

    /// Print the normalized form of the expression
    #[arg(long)]
    show_canonical: bool,

    /// List the example functions and exit
    #[arg(long)]
    list_examples: bool,
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.list_examples {
        for (label, expression) in EXAMPLE_FUNCTIONS {
            println!("{label:<12} {expression}");
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => IntegratorConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => IntegratorConfig::default(),
    };
    let segments = args
        .segments
        .clone()
        .unwrap_or_else(|| config.default_segments.to_string());
    let chosen = args.method.unwrap_or(config.default_method);
    let calculator = Calculator::new(config);

    if args.show_canonical {
        println!("Canonical: {}", normalize(&args.expression));
    }

    let methods: Vec<QuadratureMethod> = if args.compare {
        QuadratureMethod::ALL.to_vec()
    } else {
        vec![chosen]
    };

    for method in methods {
        let report = calculator.calculate_with(
            &args.expression,
            &args.lower,
            &args.upper,
            &segments,
            method,
        )?;
        println!("{report}");
        if report.segments_adjusted() {
            println!(
                "  note: {} needs an even segment count, used {} instead of {}",
                method.name(),
                report.segments,
                report.requested_segments
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
