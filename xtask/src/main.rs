use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the interference experiments workspace",
    long_about = "A unified CLI for running experiments, demos, benchmarks,\n\
                  and CI checks in the interference experiments workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one experiment and print naive vs ground-truth effects
    Run {
        /// Simulator name
        #[arg(long, default_value = "contagion")]
        simulator: String,
        /// Seed for the run
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Run repeated trials in parallel (release build)
    Trials {
        /// Simulator name
        #[arg(long, default_value = "contagion")]
        simulator: String,
        /// Number of trials
        #[arg(long, default_value_t = 40)]
        trials: usize,
        /// Worker threads
        #[arg(long, env = "INTERFERENCE_WORKERS")]
        workers: Option<usize>,
    },
    /// Run the end-to-end demo example
    Demo,
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run examples
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    match Command::new(program).args(args).status() {
        Ok(status) => status,
        Err(error) => {
            eprintln!("failed to execute {program}: {error}");
            exit(1);
        }
    }
}

fn run_cargo(args: &[&str]) {
    let status = spawn("cargo", args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = spawn("git", args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_benches(extra: &[&str]) {
    for (package, bench) in [
        ("interference_core", "performance"),
        ("interference_experiments", "trials"),
    ] {
        let mut args = vec!["bench", "--package", package, "--bench", bench];
        if !extra.is_empty() {
            args.push("--");
            args.extend_from_slice(extra);
        }
        run_cargo(&args);
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test interference_core");
    run_cargo(&["test", "-p", "interference_core"]);

    step("Test interference_experiments");
    run_cargo(&["test", "-p", "interference_experiments"]);
}

fn ci_examples() {
    step("Run single_run");
    run_cargo(&["run", "-p", "interference_core", "--example", "single_run", "--release"]);

    step("Run interference_demo");
    run_cargo(&[
        "run",
        "-p",
        "interference_experiments",
        "--example",
        "interference_demo",
        "--release",
    ]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_benches(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { simulator, seed } => {
            let seed = seed.to_string();
            run_cargo(&[
                "run",
                "-p",
                "interference_experiments",
                "--bin",
                "interference",
                "--",
                "run",
                "--simulator",
                &simulator,
                "--seed",
                &seed,
            ]);
        }
        Commands::Trials {
            simulator,
            trials,
            workers,
        } => {
            let trials = trials.to_string();
            let workers = workers.map(|w| w.to_string());
            let mut args = vec![
                "run",
                "-p",
                "interference_experiments",
                "--bin",
                "interference",
                "--release",
                "--",
                "trials",
                "--simulator",
                &simulator,
                "--trials",
                &trials,
            ];
            if let Some(workers) = workers.as_deref() {
                args.extend_from_slice(&["--workers", workers]);
            }
            run_cargo(&args);
        }
        Commands::Demo => {
            run_cargo(&[
                "run",
                "-p",
                "interference_experiments",
                "--example",
                "interference_demo",
                "--release",
            ]);
        }
        Commands::Bench => run_benches(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                if let Err(error) = std::fs::remove_dir_all(baseline_dir) {
                    eprintln!("failed to remove target/criterion: {error}");
                    exit(1);
                }
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_benches(&["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_benches(&["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
