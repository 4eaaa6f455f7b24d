use clap::{Parser, Subcommand, ValueEnum};
use slackform_solver::{LpProblem, SolveError, Solution, Solver};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "slackform")]
#[command(about = "Solve standard-form linear programs with the simplex method", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem stored as JSON
    Solve {
        /// The file containing the problem
        file: PathBuf,
        #[command(flatten)]
        options: SolveOptions,
    },
    /// Check a problem file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
    /// Solve the built-in example: max 2x + 3y, x + 2y <= 8, 2x + y <= 6
    Demo {
        #[command(flatten)]
        options: SolveOptions,
    },
}

#[derive(clap::Args)]
struct SolveOptions {
    /// Show detailed analysis
    #[arg(short, long)]
    analysis: bool,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    format: Format,
    /// Maximum number of pivots
    #[arg(long, default_value_t = 10000)]
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    #[arg(long, default_value_t = 1e-9, value_parser = parse_tolerance)]
    tolerance: f64,
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let tol: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if tol.is_finite() && tol >= 0.0 {
        Ok(tol)
    } else {
        Err(format!("{} is not a finite, non-negative number", s))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Solve { file, options } => {
            let problem = match load_problem(&file) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };
            run_solve(&problem, &options);
        }
        Commands::Check { file } => match load_problem(&file) {
            Ok(problem) => match problem.validate() {
                Ok(()) => {
                    println!("✓ {} is valid", file.display());
                    println!("  {} variables", problem.num_variables());
                    println!("  {} constraints", problem.num_constraints());
                    if let Some(c) = problem.constraints.iter().find(|c| c.rhs < 0.0) {
                        println!(
                            "  warning: {} has a negative right-hand side and cannot be solved",
                            c.name
                        );
                    }
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("✗ {} has errors:", file.display());
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        },
        Commands::Demo { options } => run_solve(&demo_problem(), &options),
    }
}

fn load_problem(file: &Path) -> Result<LpProblem, String> {
    let source = std::fs::read_to_string(file).map_err(|e| format!("Error reading file: {}", e))?;
    parse_problem(&source)
}

fn parse_problem(source: &str) -> Result<LpProblem, String> {
    serde_json::from_str(source).map_err(|e| format!("Parse error: {}", e))
}

fn demo_problem() -> LpProblem {
    let mut problem = LpProblem::new(vec!["x".to_string(), "y".to_string()]);
    problem.set_objective(vec![2.0, 3.0]);
    problem.add_constraint("c1", vec![1.0, 2.0], 8.0);
    problem.add_constraint("c2", vec![2.0, 1.0], 6.0);
    problem
}

fn run_solve(problem: &LpProblem, options: &SolveOptions) {
    let solver = Solver::new()
        .with_max_iterations(options.max_iterations)
        .with_tolerance(options.tolerance);
    log::debug!(
        "solver configured with max_iterations={} tolerance={}",
        solver.max_iterations(),
        solver.tolerance()
    );

    match solver.solve(problem) {
        Ok(solution) => match options.format {
            Format::Json => match serde_json::to_string_pretty(&solution) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing solution: {}", e);
                    std::process::exit(1);
                }
            },
            Format::Pretty => print_solution(problem, &solution, options.analysis),
        },
        Err(e) => {
            println!("No optimal solution found.");
            eprintln!("{}", failure_reason(&e));
            std::process::exit(1);
        }
    }
}

fn failure_reason(err: &SolveError) -> String {
    match err {
        SolveError::Unbounded { column } => {
            format!("Status: UNBOUNDED (column {} can grow without limit)", column)
        }
        SolveError::DidNotConverge { iterations } => {
            format!("Status: NOT CONVERGED after {} iterations", iterations)
        }
        SolveError::InfeasibleStart { .. }
        | SolveError::InvalidTolerance(_)
        | SolveError::InvalidProblem(_) => format!("Error: {}", err),
    }
}

fn print_solution(problem: &LpProblem, solution: &Solution, analysis: bool) {
    println!("Status: OPTIMAL");
    println!("Objective value z = {:.6}", solution.objective_value);
    println!();
    println!("Variables:");
    for (name, value) in problem.variables.iter().zip(&solution.values) {
        println!("  {:20} {:14.6}", name, value);
    }

    if analysis {
        println!();
        println!("Analysis ({} pivots):", solution.iterations);
        println!();

        if !solution.analysis.binding_constraints.is_empty() {
            println!("Binding constraints:");
            for name in &solution.analysis.binding_constraints {
                println!("  - {}", name);
            }
            println!();
        }

        println!("Shadow prices:");
        for (sp, slack) in solution.analysis.shadow_prices.iter().zip(&solution.analysis.slacks) {
            println!("  {:20} {:10.4}   slack {:10.4}", sp.constraint, sp.value, slack);
        }
        println!();

        println!("Reduced costs (variables not in solution):");
        for rc in &solution.analysis.reduced_costs {
            if !rc.is_basic && rc.reduced_cost.abs() > 0.001 {
                println!(
                    "  {:20} objective coefficient must increase by {:.4} to enter solution",
                    rc.variable, rc.reduced_cost
                );
            }
        }
        println!();
        println!("Max constraint violation: {:.3e}", problem.max_violation(&solution.values));
    }
}
