#![allow(non_snake_case)]
/// # Intersection solver
/// finds all real x where two parsed expressions agree, scanning a fixed
/// search window and refining every bracket by bisection with a Newton polish
pub mod intersection;

/// # Sampling planner
/// derives a plotting domain from the intersection points and samples both
/// curves over it, marking non-real values as undefined
pub mod sampling;

/// # Solve-and-plot API
/// struct-based front door for the whole pipeline: validate input strings,
/// parse, solve, sample, render
///# Example
/// ```
/// use crossplot::numerical::intersect_api::IntersectionPlotter;
/// let mut plotter = IntersectionPlotter::new();
/// plotter.set_inputs("x^2", "x");
/// plotter.loglevel = Some("off".to_string());
/// let data = plotter.solve().unwrap();
/// assert_eq!(data.roots.len(), 2);
/// ```
pub mod intersect_api;

#[cfg(test)]
mod intersection_tests;
