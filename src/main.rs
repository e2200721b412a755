//! charnn CLI
//!
//! # Usage
//!
//! ```bash
//! # Train from config
//! charnn train config.yaml
//!
//! # Train with overrides
//! charnn train config.yaml --epochs 10 --lr 0.05
//!
//! # Gradient check on the initial weights
//! charnn check config.yaml --elementwise --format json
//!
//! # Validate config
//! charnn validate config.yaml
//!
//! # Show config info
//! charnn info config.yaml
//! ```

use charnn::config::{
    apply_check_overrides, apply_overrides, check_from_spec, load_config, load_corpus,
    train_from_spec, CheckArgs, CheckOutcome, Cli, Command, InfoArgs, OutputFormat, TrainArgs,
    ValidateArgs,
};
use charnn::model::Sizes;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };
    init_tracing(log_level);

    let result = match cli.command {
        Command::Train(args) => run_train(args, log_level),
        Command::Check(args) => run_check(args, log_level),
        Command::Validate(args) => run_validate(args, log_level),
        Command::Info(args) => run_info(args, log_level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

fn init_tracing(level: LogLevel) {
    let filter = match level {
        LogLevel::Quiet => EnvFilter::new("error"),
        LogLevel::Verbose => EnvFilter::new("debug"),
        LogLevel::Normal => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("charnn: training from {}", args.config.display()),
    );

    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args).map_err(|e| format!("Config error: {e}"))?;

    if args.dry_run {
        let corpus = load_corpus(&spec).map_err(|e| format!("Data error: {e}"))?;
        let sizes = Sizes::new(corpus.vocab_size(), spec.model.hidden_size);
        log(
            level,
            LogLevel::Normal,
            "Dry run - config and corpus validated successfully",
        );
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  Corpus: {} sequences, {} symbols",
                corpus.len(),
                corpus.vocab_size()
            ),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  Network: hidden={} params={}",
                sizes.hidden_size,
                sizes.param_count()
            ),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  SGD lr={} epochs={}", spec.optimizer.lr, spec.training.epochs),
        );
        return Ok(());
    }

    let outcome = train_from_spec(&spec).map_err(|e| format!("Training error: {e}"))?;
    let result = &outcome.result;

    log(level, LogLevel::Normal, "Training complete!");
    if let Some(loss) = result.final_loss {
        log(level, LogLevel::Normal, &format!("  Final loss: {loss:.6}"));
    }
    if let Some(loss) = result.best_loss {
        log(level, LogLevel::Verbose, &format!("  Best loss: {loss:.6}"));
    }
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  {} epochs, {} sequences in {:.2}s",
            result.epochs, result.steps, result.elapsed_secs
        ),
    );
    Ok(())
}

fn run_check(args: CheckArgs, level: LogLevel) -> Result<(), String> {
    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_check_overrides(&mut spec, &args).map_err(|e| format!("Config error: {e}"))?;

    let outcome =
        check_from_spec(&spec, args.elementwise).map_err(|e| format!("Check error: {e}"))?;

    match args.format {
        OutputFormat::Text => print_check(&outcome, level),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&outcome)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    if outcome.passed {
        Ok(())
    } else {
        Err(format!(
            "gradient check failed: max error {:.3e} exceeds tolerance {:.1e}",
            outcome.report.max_abs(),
            outcome.tolerance
        ))
    }
}

fn print_check(outcome: &CheckOutcome, level: LogLevel) {
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Gradient check: sequence {} ({} chars), h={:e}",
            outcome.sequence, outcome.length, outcome.step
        ),
    );
    println!("{}", outcome.report);

    if let Some(comparisons) = &outcome.elementwise {
        println!();
        println!("{:>4}  {:>11}  {:>11}", "", "max |a-n|", "max rel");
        for cmp in comparisons {
            println!(
                "{:>4}  {:>11.3e}  {:>11.3e}",
                cmp.kind.name(),
                cmp.max_abs_error,
                cmp.max_rel_error
            );
        }
    }

    let verdict = if outcome.passed { "PASS" } else { "FAIL" };
    log(
        level,
        LogLevel::Normal,
        &format!("{verdict} (tolerance {:.1e})", outcome.tolerance),
    );
}

fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        println!();
        println!("Configuration Summary:");
        println!("  Corpus: {}", spec.data.path.display());
        println!("  End of sequence: {:?}", spec.data.eos);
        println!();
        println!("  Hidden size: {}", spec.model.hidden_size);
        println!("  Seed: {}", spec.model.seed);
        println!(
            "  Init: weights={:?} biases={:?}",
            spec.model.init.weights, spec.model.init.biases
        );
        println!();
        println!("  Learning rate: {}", spec.optimizer.lr);
        println!("  Epochs: {}", spec.training.epochs);
        println!("  Log every: {}", spec.training.log_every);
        println!();
        println!("  Check step: {:e}", spec.check.step);
        println!("  Check tolerance: {:e}", spec.check.tolerance);
    }

    Ok(())
}

fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            let corpus = load_corpus(&spec).map_err(|e| format!("Data error: {e}"))?;
            let sizes = Sizes::new(corpus.vocab_size(), spec.model.hidden_size);

            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            println!("Corpus: {} ({} sequences)", spec.data.path.display(), corpus.len());
            println!("Vocabulary: {:?}", corpus.vocabulary.chars());
            println!(
                "Network: vocab={} hidden={} params={}",
                sizes.vocab_size,
                sizes.hidden_size,
                sizes.param_count()
            );
            println!("Optimizer: sgd (lr={})", spec.optimizer.lr);
            println!("Epochs: {}", spec.training.epochs);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&spec)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&spec)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
