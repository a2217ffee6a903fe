//! Sampling planner: turns a root list into a plotting domain and samples both
//! expressions over it.
//!
//! The domain hugs the intersections with a fixed padding on both sides and
//! falls back to [-10, 10] when there are none. Every sample where an
//! expression is not real-valued is recorded as `y: None`; a renderer must
//! draw a gap there, never a point and never a zero.

use crate::numerical::intersection::RealRoot;
use crate::symbolic::symbolic_engine::Expr;

/// padding added on both sides of the outermost intersections
pub const RANGE_PAD: f64 = 5.0;
/// domain used when no intersection exists
pub const DEFAULT_DOMAIN: (f64, f64) = (-10.0, 10.0);
/// number of evenly spaced samples per curve, endpoints inclusive
pub const N_SAMPLES: usize = 400;

/// Closed plotting interval plus its sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleDomain {
    pub x_min: f64,
    pub x_max: f64,
    pub n: usize,
}

impl SampleDomain {
    /// Derives the domain from the intersection list: [min - pad, max + pad],
    /// or the default interval when the list is empty.
    pub fn from_roots(roots: &[RealRoot]) -> SampleDomain {
        if roots.is_empty() {
            return SampleDomain {
                x_min: DEFAULT_DOMAIN.0,
                x_max: DEFAULT_DOMAIN.1,
                n: N_SAMPLES,
            };
        }
        let min_x = roots.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
        let max_x = roots.iter().map(|r| r.x).fold(f64::NEG_INFINITY, f64::max);
        SampleDomain {
            x_min: min_x - RANGE_PAD,
            x_max: max_x + RANGE_PAD,
            n: N_SAMPLES,
        }
    }

    /// Evenly spaced grid over the domain, both endpoints included.
    pub fn grid(&self) -> Vec<f64> {
        let h = (self.x_max - self.x_min) / (self.n - 1) as f64;
        (0..self.n).map(|i| self.x_min + i as f64 * h).collect()
    }
}

/// One plot sample: `y` is None where the expression is not real at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: Option<f64>,
}

/// Ordered samples of one expression over a domain; always exactly `domain.n` long.
pub type CurveSample = Vec<CurvePoint>;

/// Samples a single expression over the domain.
pub fn sample_curve(expr: &Expr, domain: &SampleDomain) -> CurveSample {
    let f = expr.lambdify1D();
    domain
        .grid()
        .into_iter()
        .map(|x| {
            let y = f(x);
            CurvePoint {
                x,
                y: if y.is_finite() { Some(y) } else { None },
            }
        })
        .collect()
}

/// Plans the plot: domain from the roots, then one curve per expression.
pub fn plan(
    e1: &Expr,
    e2: &Expr,
    roots: &[RealRoot],
) -> (SampleDomain, CurveSample, CurveSample) {
    let domain = SampleDomain::from_roots(roots);
    let curve1 = sample_curve(e1, &domain);
    let curve2 = sample_curve(e2, &domain);
    (domain, curve1, curve2)
}
