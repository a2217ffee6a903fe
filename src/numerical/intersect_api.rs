//! Front door of the crate: one struct walks the whole request from raw input
//! strings to a renderable result.
//!
//!  Example#1
//! ```
//! use crossplot::numerical::intersect_api::IntersectionPlotter;
//! // the shortest way to solve a pair of functions
//! let mut plotter = IntersectionPlotter::new();
//! plotter.set_inputs("x^2", "x");
//! plotter.loglevel = Some("off".to_string());
//! let data = plotter.solve().unwrap();
//! println!("roots = {:?} \n", data.roots);
//! ```
//! Example#2
//! ```
//! // or keep the instance around and inspect the last result
//! use crossplot::numerical::intersect_api::IntersectionPlotter;
//! let mut plotter = IntersectionPlotter::new();
//! plotter.set_inputs("sqrt(x)", "-1");
//! plotter.loglevel = Some("off".to_string());
//! plotter.solve().unwrap();
//! let data = plotter.get_result().unwrap();
//! assert!(data.roots.is_empty());
//! assert!(data.notice.is_some());
//! ```

use crate::Utils::plots::plot_intersections;
use crate::numerical::intersection::{RealRoot, SolveOutcome, solve_intersections};
use crate::numerical::sampling::{CurveSample, SampleDomain, plan};
use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use log::{info, warn};
use simplelog::*;
use std::error::Error;
use std::fmt;
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

/// Everything a renderer needs: the plotting domain, both sampled curves, the
/// intersection markers and an optional informational notice.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub domain: SampleDomain,
    pub roots: Vec<RealRoot>,
    pub curve1: CurveSample,
    pub curve2: CurveSample,
    /// non-error condition worth telling the user about, e.g. "no real
    /// intersection found"
    pub notice: Option<String>,
}

/// Errors that abort a request before any plot data is produced. Solver
/// degeneracy is not here: it degrades to an empty root list plus a notice.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// one or both function fields are empty
    EmptyInput { f1_empty: bool, f2_empty: bool },
    /// parse failure of either input, propagated verbatim
    Parse(ParseError),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlotError::EmptyInput { f1_empty, f2_empty } => {
                let which = match (*f1_empty, *f2_empty) {
                    (true, true) => "f1(x) and f2(x)",
                    (true, false) => "f1(x)",
                    _ => "f2(x)",
                };
                write!(f, "Both function fields must be filled, {} is empty", which)
            }
            PlotError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl Error for PlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlotError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for PlotError {
    fn from(e: ParseError) -> Self {
        PlotError::Parse(e)
    }
}

/// One solve-and-plot request. Each instance owns its two input strings and
/// its last result end to end; nothing is shared between instances.
pub struct IntersectionPlotter {
    pub f1_text: String,
    pub f2_text: String,
    pub loglevel: Option<String>,
    pub result: Option<PlotData>,
}

impl IntersectionPlotter {
    pub fn new() -> IntersectionPlotter {
        IntersectionPlotter {
            f1_text: String::new(),
            f2_text: String::new(),
            loglevel: Some("info".to_string()),
            result: None,
        }
    }

    ////////////////////////////SETTERS///////////////////////////////////////

    pub fn set_inputs(&mut self, f1: &str, f2: &str) {
        self.f1_text = f1.to_string();
        self.f2_text = f2.to_string();
    }

    //////////////////////////////////////////////////////////////////////////

    /// Runs the pipeline: validate, parse, solve, plan sampling.
    pub fn solver(&mut self) -> Result<PlotData, PlotError> {
        let f1_str = self.f1_text.trim().to_string();
        let f2_str = self.f2_text.trim().to_string();
        if f1_str.is_empty() || f2_str.is_empty() {
            return Err(PlotError::EmptyInput {
                f1_empty: f1_str.is_empty(),
                f2_empty: f2_str.is_empty(),
            });
        }

        let expr_f1 = Expr::parse_expression(&f1_str)?;
        let expr_f2 = Expr::parse_expression(&f2_str)?;
        info!("parsed f1(x) = {}, f2(x) = {}", expr_f1, expr_f2);

        let (roots, notice) = match solve_intersections(&expr_f1, &expr_f2) {
            SolveOutcome::Solved(roots) if roots.is_empty() => (
                Vec::new(),
                Some(
                    "No real intersection found. Plotting both functions anyway.".to_string(),
                ),
            ),
            SolveOutcome::Solved(roots) => (roots, None),
            SolveOutcome::Degenerate(reason) => {
                warn!("solver gave up: {}", reason);
                (
                    Vec::new(),
                    Some(format!(
                        "No plottable intersection set: {}. Plotting both functions anyway.",
                        reason
                    )),
                )
            }
        };

        let (domain, curve1, curve2) = plan(&expr_f1, &expr_f2, &roots);
        self.root_statistics(&roots, &domain);

        let data = PlotData {
            domain,
            roots,
            curve1,
            curve2,
            notice,
        };
        self.result = Some(data.clone());
        Ok(data)
    }

    // wrapper around solver function to implement logging
    pub fn solve(&mut self) -> Result<PlotData, PlotError> {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if is_logging_disabled {
            self.solver()
        } else {
            let log_option = match self.loglevel.as_deref() {
                Some("debug") | Some("info") | None => LevelFilter::Info,
                Some("warn") => LevelFilter::Warn,
                Some("error") => LevelFilter::Error,
                _ => panic!("loglevel must be debug, info, warn, error or off"),
            };
            let logger_instance = CombinedLogger::init(vec![TermLogger::new(
                log_option,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]);
            match logger_instance {
                Ok(()) => {
                    let res = self.solver();
                    info!("request ended");
                    res
                }
                // a logger is already installed, just run
                Err(_) => self.solver(),
            }
        }
    }

    pub fn get_result(&self) -> Option<PlotData> {
        self.result.clone()
    }

    /// Renders the last result to a PNG file.
    pub fn render_png(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let data = self
            .result
            .as_ref()
            .ok_or("no result to render, call solve() first")?;
        plot_intersections(data, path)
    }

    fn root_statistics(&self, roots: &[RealRoot], domain: &SampleDomain) {
        let mut builder = Builder::default();
        builder.push_record(["solution", "x", "y"]);
        for (i, root) in roots.iter().enumerate() {
            builder.push_record([
                format!("{}", i + 1),
                format!("{:.4}", root.x),
                format!("{:.4}", root.y),
            ]);
        }
        builder.push_record([
            "domain".to_string(),
            format!("{:.4}", domain.x_min),
            format!("{:.4}", domain.x_max),
        ]);
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        info!("\n \n SOLUTIONS \n \n {}", table);
    }
}

impl Default for IntersectionPlotter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> IntersectionPlotter {
        let mut p = IntersectionPlotter::new();
        p.loglevel = Some("off".to_string());
        p
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let mut p = quiet();
        p.set_inputs("", "x");
        match p.solver() {
            Err(PlotError::EmptyInput { f1_empty, f2_empty }) => {
                assert!(f1_empty);
                assert!(!f2_empty);
            }
            other => panic!("expected EmptyInput, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_both_empty_named() {
        let mut p = quiet();
        p.set_inputs("  ", "");
        let err = p.solver().unwrap_err();
        assert_eq!(
            err,
            PlotError::EmptyInput {
                f1_empty: true,
                f2_empty: true
            }
        );
        assert!(err.to_string().contains("f1(x) and f2(x)"));
    }

    #[test]
    fn test_parse_error_propagates() {
        let mut p = quiet();
        p.set_inputs("2y", "x");
        match p.solver() {
            Err(PlotError::Parse(ParseError::InvalidCharacter { ch, .. })) => {
                assert_eq!(ch, 'y')
            }
            other => panic!("expected Parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_happy_path() {
        let mut p = quiet();
        p.set_inputs("x", "x/2");
        let data = p.solve().unwrap();
        assert_eq!(data.roots.len(), 1);
        assert!(data.notice.is_none());
        assert_eq!(data.curve1.len(), data.domain.n);
        assert_eq!(data.curve2.len(), data.domain.n);
        assert_eq!(p.get_result().unwrap(), data);
    }

    #[test]
    fn test_no_intersection_is_a_notice_not_an_error() {
        let mut p = quiet();
        p.set_inputs("sqrt(x)", "-1");
        let data = p.solver().unwrap();
        assert!(data.roots.is_empty());
        assert_eq!(data.domain.x_min, -10.0);
        assert_eq!(data.domain.x_max, 10.0);
        assert!(data.notice.unwrap().contains("No real intersection"));
    }

    #[test]
    fn test_degenerate_degrades_to_notice() {
        let mut p = quiet();
        p.set_inputs("x", "x");
        let data = p.solver().unwrap();
        assert!(data.roots.is_empty());
        assert!(data.notice.is_some());
        // both curves still fully sampled
        assert_eq!(data.curve1.len(), data.domain.n);
    }
}
