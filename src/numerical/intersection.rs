//! Real-intersection solver.
//!
//! Given two parsed expressions e1 and e2, forms the residual g = e1 - e2 and
//! finds the real x where g vanishes inside a fixed search window. The scan
//! detects three kinds of roots:
//! - grid points where g is (numerically) exactly zero;
//! - sign changes between adjacent defined samples, refined by bisection and
//!   polished with a Newton step using the analytic derivative g';
//! - tangency points, located as stationary points of g where |g| is tiny.
//!
//! Points where g is not real (NaN or infinite) are skipped; a bracket never
//! spans an undefined sample. Roots are emitted in ascending x as the scan
//! walks the window.
//!
//! A solved-but-empty answer and a solver that gave up are different things:
//! `SolveOutcome::Solved(vec![])` means "no real intersection", while
//! `SolveOutcome::Degenerate(reason)` means the equation has no meaningful
//! finite root set (identical expressions, or more roots than the sanity cap).

use crate::symbolic::symbolic_engine::Expr;
use log::{info, warn};

/// left edge of the root search window
pub const SEARCH_MIN: f64 = -100.0;
/// right edge of the root search window
pub const SEARCH_MAX: f64 = 100.0;
/// number of scan intervals across the window
pub const SCAN_POINTS: usize = 20_000;
/// residuals below this at a grid point count as an exact hit
const ZERO_EXACT: f64 = 1e-12;
/// residual band for the identically-zero check
const ZERO_BAND: f64 = 1e-9;
/// residual tolerance for accepting a tangency root
const TANGENCY_TOL: f64 = 1e-8;
/// bisection stops when the bracket is this narrow
const BRACKET_TOL: f64 = 1e-13;
/// refined roots closer than this (scaled by |x|) are the same intersection
const ROOT_SEP: f64 = 1e-9;
/// more real roots than this and the equation is treated as degenerate
const MAX_ROOTS: usize = 64;

/// An x where both expressions produce the same real value, paired with that
/// value. y is always computed from the first expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealRoot {
    pub x: f64,
    pub y: f64,
}

/// Result of a solve: a finite (possibly empty) root list, or a reason the
/// equation has no meaningful finite answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Solved(Vec<RealRoot>),
    Degenerate(String),
}

/// Solves e1(x) = e2(x) for all real x in the search window.
pub fn solve_intersections(e1: &Expr, e2: &Expr) -> SolveOutcome {
    let g = e1.clone() - e2.clone();
    let g_fn = g.lambdify1D();
    let dg = g.diff("x");
    let dg_fn = dg.lambdify1D();
    let y_fn = e1.lambdify1D();

    let step = (SEARCH_MAX - SEARCH_MIN) / SCAN_POINTS as f64;
    let xs: Vec<f64> = (0..=SCAN_POINTS)
        .map(|i| SEARCH_MIN + i as f64 * step)
        .collect();
    let gs: Vec<f64> = xs.iter().map(|&x| g_fn(x)).collect();

    // identical expressions: the residual vanishes everywhere it is defined
    let defined: Vec<f64> = gs.iter().copied().filter(|v| v.is_finite()).collect();
    if !defined.is_empty() && defined.iter().all(|v| v.abs() <= ZERO_BAND) {
        info!("residual is identically zero on the search window");
        return SolveOutcome::Degenerate(
            "the two functions coincide everywhere, every x is an intersection".to_string(),
        );
    }

    let mut roots: Vec<RealRoot> = Vec::new();
    let push_root = |roots: &mut Vec<RealRoot>, x: f64| {
        if let Some(last) = roots.last() {
            // a bracket refinement and an exact grid hit can land on the same
            // root; the suppression radius stays at refinement scale so that
            // distinct roots inside one scan step are both kept
            if (x - last.x).abs() <= ROOT_SEP * (1.0 + x.abs()) {
                return;
            }
        }
        let y = y_fn(x);
        if !y.is_finite() {
            warn!("root x = {} evaluates to a non-real y, skipped", x);
            return;
        }
        roots.push(RealRoot { x, y });
    };

    for i in 0..SCAN_POINTS {
        let (xa, xb) = (xs[i], xs[i + 1]);
        let (ga, gb) = (gs[i], gs[i + 1]);
        if !ga.is_finite() || !gb.is_finite() {
            continue;
        }
        if ga.abs() <= ZERO_EXACT {
            push_root(&mut roots, xa);
        } else if gb.abs() > ZERO_EXACT && ga * gb < 0.0 {
            let x = refine_bracket(&g_fn, &dg_fn, xa, xb);
            push_root(&mut roots, x);
        } else if ga.signum() == gb.signum() {
            // tangency: stationary point of g with a vanishing residual
            let (da, db) = (dg_fn(xa), dg_fn(xb));
            if da.is_finite() && db.is_finite() && da * db < 0.0 {
                let x_stat = refine_bracket(&dg_fn, &|_| f64::NAN, xa, xb);
                if g_fn(x_stat).abs() <= TANGENCY_TOL {
                    push_root(&mut roots, x_stat);
                }
            }
        }
        if roots.len() > MAX_ROOTS {
            return SolveOutcome::Degenerate(format!(
                "more than {} intersections in the search window",
                MAX_ROOTS
            ));
        }
    }
    // right edge of the window is not the left end of any interval
    if let (Some(&x_last), Some(&g_last)) = (xs.last(), gs.last()) {
        if g_last.is_finite() && g_last.abs() <= ZERO_EXACT {
            push_root(&mut roots, x_last);
        }
    }

    info!("found {} real intersection(s)", roots.len());
    SolveOutcome::Solved(roots)
}

/// Shrinks a sign-change bracket [xa, xb] of f by bisection, then polishes the
/// midpoint with Newton steps while the analytic derivative cooperates.
fn refine_bracket(
    f: &dyn Fn(f64) -> f64,
    df: &dyn Fn(f64) -> f64,
    mut xa: f64,
    mut xb: f64,
) -> f64 {
    let mut fa = f(xa);
    for _ in 0..200 {
        if (xb - xa).abs() <= BRACKET_TOL * (1.0 + xa.abs()) {
            break;
        }
        let xm = 0.5 * (xa + xb);
        let fm = f(xm);
        if !fm.is_finite() {
            break;
        }
        if fm == 0.0 {
            return xm;
        }
        if fa * fm < 0.0 {
            xb = xm;
        } else {
            xa = xm;
            fa = fm;
        }
    }
    let mut x = 0.5 * (xa + xb);
    for _ in 0..3 {
        let fx = f(x);
        let dfx = df(x);
        if !fx.is_finite() || !dfx.is_finite() || dfx == 0.0 {
            break;
        }
        let x_next = x - fx / dfx;
        // Newton must stay inside the bracket and must actually improve
        if x_next < xa || x_next > xb || f(x_next).abs() >= fx.abs() {
            break;
        }
        x = x_next;
    }
    x
}
