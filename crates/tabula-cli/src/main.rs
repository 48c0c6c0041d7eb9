use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tabula_solver::{Problem, Solution, SolveError, Solver, Status};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Step-by-step simplex solver for canonical-form linear programs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Disable logging
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem and print the final answer
    Solve {
        #[command(flatten)]
        input: ProblemInput,
        /// Maximum number of pivots
        #[arg(long, default_value_t = 500)]
        max_iterations: usize,
        /// Tolerance for floating point comparisons
        #[arg(long, default_value_t = 1e-9, value_parser = parse_tolerance, allow_negative_numbers = true)]
        tolerance: f64,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
        /// Print every tableau along the way
        #[arg(short, long)]
        steps: bool,
    },
    /// Check that a problem is well formed
    Check {
        #[command(flatten)]
        input: ProblemInput,
    },
}

#[derive(Args)]
struct ProblemInput {
    /// JSON problem file ({"objective", "constraints", "rhs"}), `-` for stdin
    file: Option<PathBuf>,
    /// Objective coefficients to maximize, comma separated
    #[arg(long, allow_hyphen_values = true, conflicts_with = "file")]
    objective: Option<Row>,
    /// Constraint coefficients, comma separated (repeat per constraint)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "file")]
    constraint: Vec<Row>,
    /// Constraint bounds, comma separated
    #[arg(long, allow_hyphen_values = true, conflicts_with = "file")]
    rhs: Option<Row>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

/// Comma separated list of numbers
#[derive(Clone, Debug)]
struct Row(Vec<f64>);

impl FromStr for Row {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(|v| v.trim().parse::<f64>().map_err(|e| format!("invalid number '{}': {}", v.trim(), e)))
            .collect::<Result<Vec<_>, _>>()
            .map(Row)
    }
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let tol: f64 = s.parse().map_err(|e| format!("invalid number '{}': {}", s, e))?;
    if tol.is_finite() && tol >= 0.0 {
        Ok(tol)
    } else {
        Err(format!("tolerance must be a finite non-negative number, got {}", s))
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Error reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid problem file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No problem given: pass a FILE or --objective, --constraint and --rhs")]
    MissingProblem,
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Solve(_) => 1,
            _ => 2,
        }
    }
}

/// JSON output: the solution, the rendered step log and the error message if any
#[derive(Serialize)]
struct Report<'a> {
    solution: &'a Solution,
    steps_log: String,
    error: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn run(command: Commands) -> Result<i32, CliError> {
    match command {
        Commands::Solve {
            input,
            max_iterations,
            tolerance,
            format,
            steps,
        } => {
            let problem = input.load()?;
            let solver = Solver::new()
                .with_max_iterations(max_iterations)
                .with_tolerance(tolerance)
                .with_trace(steps || format == Format::Json);
            let solution = solver.solve(&problem)?;

            match format {
                Format::Json => {
                    let report = Report {
                        solution: &solution,
                        steps_log: solution.trace.render(),
                        error: solution.error().map(|e| e.to_string()),
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                Format::Pretty => print_pretty(&solution, steps),
            }

            Ok(if solution.is_optimal() { 0 } else { 1 })
        }
        Commands::Check { input } => {
            let problem = input.load()?;
            problem.validate().map_err(SolveError::from)?;

            println!("✓ problem is valid");
            println!("  {} variables", problem.num_variables());
            println!("  {} constraints", problem.num_constraints());
            Ok(0)
        }
    }
}

fn print_pretty(solution: &Solution, steps: bool) {
    if steps {
        print!("{}", solution.trace.render());
        println!();
    }

    match solution.status {
        Status::Optimal => println!("Status: OPTIMAL"),
        Status::Unbounded => println!("Status: UNBOUNDED"),
        Status::IterationLimit => println!("Status: ITERATION LIMIT"),
    }
    println!("{}", solution.summary());
    println!("Pivots: {}", solution.iterations);
}

impl ProblemInput {
    fn load(self) -> Result<Problem, CliError> {
        if let Some(path) = self.file {
            let source = read_source(&path)?;
            return Ok(serde_json::from_str(&source)?);
        }

        let Some(Row(objective)) = self.objective else {
            return Err(CliError::MissingProblem);
        };
        let constraints = self.constraint.into_iter().map(|Row(r)| r).collect();
        let rhs = self.rhs.map(|Row(r)| r).unwrap_or_default();
        Ok(Problem::new(objective, constraints, rhs))
    }
}

fn read_source(path: &Path) -> Result<String, CliError> {
    let result = if path == Path::new("-") {
        io::read_to_string(io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row() {
        let Row(values) = "5, -2,0.5".parse::<Row>().unwrap();
        assert_eq!(values, vec![5.0, -2.0, 0.5]);
        assert!("1,x".parse::<Row>().is_err());
    }

    #[test]
    fn test_inline_problem() {
        let cli = Cli::try_parse_from([
            "tabula",
            "solve",
            "--objective",
            "5,2",
            "--constraint",
            "2,1",
            "--constraint",
            "10,12",
            "--rhs",
            "6,60",
        ])
        .unwrap();

        let Commands::Solve { input, max_iterations, .. } = cli.command else {
            panic!("Expected solve");
        };
        assert_eq!(max_iterations, 500);
        let problem = input.load().unwrap();
        assert_eq!(problem.constraints, vec![vec![2.0, 1.0], vec![10.0, 12.0]]);
        assert_eq!(problem.rhs, vec![6.0, 60.0]);
    }

    #[test]
    fn test_negative_coefficients() {
        let cli = Cli::try_parse_from(["tabula", "check", "--objective", "1", "--constraint", "-1", "--rhs", "5"]).unwrap();
        let Commands::Check { input } = cli.command else {
            panic!("Expected check");
        };
        assert_eq!(input.load().unwrap().constraints, vec![vec![-1.0]]);
    }

    #[test]
    fn test_tolerance_must_be_non_negative() {
        let base = ["tabula", "solve", "--objective", "1", "--constraint", "1", "--rhs", "4", "--tolerance"];
        for bad in ["-1", "NaN", "inf"] {
            let args = base.iter().copied().chain([bad]);
            assert!(Cli::try_parse_from(args).is_err(), "accepted {}", bad);
        }

        let cli = Cli::try_parse_from(base.iter().copied().chain(["0"])).unwrap();
        let Commands::Solve { tolerance, .. } = cli.command else {
            panic!("Expected solve");
        };
        assert_eq!(tolerance, 0.0);
    }

    #[test]
    fn test_missing_problem() {
        let cli = Cli::try_parse_from(["tabula", "check"]).unwrap();
        let Commands::Check { input } = cli.command else {
            panic!("Expected check");
        };
        let err = input.load().unwrap_err();
        assert!(matches!(err, CliError::MissingProblem));
        assert_eq!(err.exit_code(), 2);
    }
}
