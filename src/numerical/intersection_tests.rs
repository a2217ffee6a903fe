use crate::numerical::intersection::{SolveOutcome, solve_intersections};
use crate::numerical::sampling::{
    DEFAULT_DOMAIN, N_SAMPLES, RANGE_PAD, SampleDomain, plan, sample_curve,
};
use crate::symbolic::symbolic_engine::Expr;
//___________________________________TESTS____________________________________

use approx::assert_relative_eq;

fn parse(s: &str) -> Expr {
    Expr::parse_expression(s).unwrap()
}

fn solved(e1: &str, e2: &str) -> Vec<crate::numerical::intersection::RealRoot> {
    match solve_intersections(&parse(e1), &parse(e2)) {
        SolveOutcome::Solved(roots) => roots,
        SolveOutcome::Degenerate(reason) => panic!("unexpected degenerate solve: {}", reason),
    }
}

#[test]
fn test_single_linear_intersection_at_origin() {
    let roots = solved("x", "x/2");
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0].x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(roots[0].y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_parabola_crosses_line_twice() {
    let roots = solved("x^2", "x");
    assert_eq!(roots.len(), 2);
    // ascending in x
    assert_relative_eq!(roots[0].x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(roots[0].y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(roots[1].x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(roots[1].y, 1.0, epsilon = 1e-9);
}

#[test]
fn test_close_roots_inside_one_scan_step_stay_separate() {
    // x^2 = 0.000001 at x = +-0.001; the pair is closer together than the
    // scan resolution but each crossing still gets its own bracket
    let roots = solved("x^2", "0.000001");
    assert_eq!(roots.len(), 2);
    assert_relative_eq!(roots[0].x, -0.001, epsilon = 1e-9);
    assert_relative_eq!(roots[1].x, 0.001, epsilon = 1e-9);
    assert_relative_eq!(roots[0].y, 0.000001, epsilon = 1e-9);
}

#[test]
fn test_root_on_domain_boundary_of_sqrt() {
    // sqrt(x) = x/2 at x = 0 (edge of where sqrt is real) and x = 4
    let roots = solved("sqrt(x)", "x/2");
    assert_eq!(roots.len(), 2);
    assert_relative_eq!(roots[0].x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(roots[1].x, 4.0, epsilon = 1e-9);
    assert_relative_eq!(roots[1].y, 2.0, epsilon = 1e-9);
}

#[test]
fn test_sqrt_never_reaches_minus_one() {
    let roots = solved("sqrt(x)", "-1");
    assert!(roots.is_empty());
}

#[test]
fn test_lines_with_offset_intersection() {
    // 5x + 3 = 2x  =>  x = -1
    let roots = solved("5x + 3", "2x");
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0].x, -1.0, epsilon = 1e-9);
    assert_relative_eq!(roots[0].y, -2.0, epsilon = 1e-9);
}

#[test]
fn test_tangency_counts_as_intersection() {
    // x^2 touches 2x - 1 at x = 1 without crossing it
    let roots = solved("x^2", "2x - 1");
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0].x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(roots[0].y, 1.0, epsilon = 1e-6);
}

#[test]
fn test_root_y_comes_from_first_expression() {
    let roots = solved("log10(x)", "0");
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0].x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(roots[0].y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_identical_expressions_are_degenerate() {
    match solve_intersections(&parse("x"), &parse("x")) {
        SolveOutcome::Degenerate(reason) => assert!(reason.contains("coincide")),
        SolveOutcome::Solved(roots) => panic!("expected degenerate, got {} roots", roots.len()),
    }
}

#[test]
fn test_parallel_lines_never_meet() {
    let roots = solved("x + 1", "x - 1");
    assert!(roots.is_empty());
}

#[test]
fn test_domain_padding_exact() {
    let roots = solved("x^2", "x");
    let domain = SampleDomain::from_roots(&roots);
    let min_x = roots.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
    let max_x = roots.iter().map(|r| r.x).fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(domain.x_min, min_x - RANGE_PAD, epsilon = 1e-12);
    assert_relative_eq!(domain.x_max, max_x + RANGE_PAD, epsilon = 1e-12);
}

#[test]
fn test_default_domain_without_roots() {
    let domain = SampleDomain::from_roots(&[]);
    assert_eq!(domain.x_min, DEFAULT_DOMAIN.0);
    assert_eq!(domain.x_max, DEFAULT_DOMAIN.1);
    assert_eq!(domain.n, N_SAMPLES);
}

#[test]
fn test_grid_is_inclusive_and_even() {
    let domain = SampleDomain {
        x_min: -10.0,
        x_max: 10.0,
        n: N_SAMPLES,
    };
    let grid = domain.grid();
    assert_eq!(grid.len(), N_SAMPLES);
    assert_relative_eq!(grid[0], -10.0, epsilon = 1e-12);
    assert_relative_eq!(*grid.last().unwrap(), 10.0, epsilon = 1e-9);
    let h0 = grid[1] - grid[0];
    let h_mid = grid[200] - grid[199];
    assert_relative_eq!(h0, h_mid, epsilon = 1e-12);
}

#[test]
fn test_log10_sampled_with_gaps_on_negative_side() {
    let expr = parse("log10(x)");
    let domain = SampleDomain::from_roots(&[]);
    let curve = sample_curve(&expr, &domain);
    assert_eq!(curve.len(), N_SAMPLES);
    let at_minus_one = curve
        .iter()
        .min_by(|a, b| {
            (a.x + 1.0).abs().partial_cmp(&(b.x + 1.0).abs()).unwrap()
        })
        .unwrap();
    assert!(at_minus_one.y.is_none());
    // and defined on the positive side
    assert!(curve.iter().any(|p| p.x > 1.0 && p.y.is_some()));
}

#[test]
fn test_plan_returns_paired_curves() {
    let e1 = parse("sqrt(x)");
    let e2 = parse("x/2");
    let roots = solved("sqrt(x)", "x/2");
    let (domain, curve1, curve2) = plan(&e1, &e2, &roots);
    assert_eq!(curve1.len(), domain.n);
    assert_eq!(curve2.len(), domain.n);
    for (p1, p2) in curve1.iter().zip(curve2.iter()) {
        assert_relative_eq!(p1.x, p2.x, epsilon = 1e-12);
    }
    // sqrt is undefined left of zero, the line is defined everywhere
    assert!(curve1.iter().any(|p| p.y.is_none()));
    assert!(curve2.iter().all(|p| p.y.is_some()));
}

#[test]
fn test_sampled_values_match_evaluation() {
    let expr = parse("x^2 - 1");
    let domain = SampleDomain::from_roots(&[]);
    let curve = sample_curve(&expr, &domain);
    for p in curve.iter().step_by(37) {
        assert_relative_eq!(p.y.unwrap(), expr.eval_at(p.x), epsilon = 1e-12);
    }
}
