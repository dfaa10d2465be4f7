//! Minimizes the Rosenbrock function, with and without bounds.
//!
//! # Usage
//!
//! ```text
//! cargo run --example rosenbrock
//! RUST_LOG=twine_solvers=debug cargo run --example rosenbrock
//! ```
//!
//! Each run prints a progress table to stdout followed by the exit status,
//! the final point, and the work done. The bounded run confines `x₀` to
//! `[-2, 0.5]`, which excludes the unconstrained minimum at `(1, 1)`.

use std::{error::Error, io};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use twine_core::{Bounds, Functions};
use twine_observers::ProgressTable;
use twine_solvers::lbfgsb::{Minimizer, Parameters, Solution};

fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

fn rosenbrock_gradient(x: &[f64]) -> Vec<f64> {
    let mut g = vec![0.0; x.len()];
    for i in 0..x.len().saturating_sub(1) {
        let t = x[i + 1] - x[i] * x[i];
        g[i] += -400.0 * x[i] * t - 2.0 * (1.0 - x[i]);
        g[i + 1] += 200.0 * t;
    }
    g
}

fn report(title: &str, solution: &Solution) {
    println!("\n{title}");
    println!("{}", solution.status);
    println!("x = {:?}", solution.minimum.x);
    println!("f = {:e}", solution.minimum.f);
    println!(
        "iterations: {}, evaluations: {}",
        solution.stats.iterations, solution.stats.function_evaluations
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let objective = Functions::new(rosenbrock, rosenbrock_gradient);
    let initial = [-1.2, 1.0];
    let parameters = Parameters::new()
        .with_history_size(10)
        .with_f_tolerance(1e-12)
        .with_g_tolerance(1e-8);

    let unbounded = Minimizer::new();
    let mut table = ProgressTable::new(io::stdout());
    let solution = unbounded.minimize(&objective, &initial, &parameters, &mut table);
    report("Unbounded", &solution);

    let bounded =
        Minimizer::new().with_bounds(Bounds::from_intervals([(-2.0, 0.5), (-2.0, 2.0)])?);
    let mut table = ProgressTable::new(io::stdout());
    let solution = bounded.minimize(&objective, &initial, &parameters, &mut table);
    report("Bounded", &solution);

    Ok(())
}
