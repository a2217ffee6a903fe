//! # Symbolic Engine Module
//!
//! Core symbolic representation for a single-variable real function. Expressions
//! are built by the parser (see `parse_expr`) from user-typed strings and are
//! immutable afterwards: every manipulation below returns a new tree.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! The core symbolic expression type supporting:
//! - **Variables**: `Var(String)` - the free variable, "x" for everything the parser emits
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `log10`, `sqrt` - the two named functions of the input grammar
//!
//! ### Key Methods
//! - `parse_expression(input)` - build an expression from a string
//! - `diff(var)` - analytical differentiation
//! - `lambdify1D()` - convert to an executable closure
//! - `eval_at(x)` - direct recursive evaluation
//! - `set_variable()` - substitute a variable with a value
//!
//! Evaluation is plain IEEE arithmetic: `log10` of a negative number, `sqrt`
//! of a negative number and similar out-of-domain points come back as NaN.
//! Callers decide what a non-finite value means (the sampling planner records
//! it as an undefined point, the solver skips it).

#![allow(non_camel_case_types)]

use crate::symbolic::parse_expr::{self, ParseError};
use std::f64::consts::LN_10;
use std::fmt;

/// Core symbolic expression enum representing mathematical expressions as an
/// abstract syntax tree. Uses Box<Expr> for recursive structures, allowing
/// arbitrarily deep expression trees.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (the parser only ever emits "x")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Base-10 logarithm: log10(x)
    log10(Box<Expr>),
    /// Principal square root: sqrt(x)
    sqrt(Box<Expr>),
}

/// Display implementation for pretty printing symbolic expressions.
///
/// Converts expressions to human-readable mathematical notation with
/// parentheses for proper precedence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::log10(expr) => write!(f, "log10({})", expr),
            Expr::sqrt(expr) => write!(f, "sqrt({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Parses a raw input string into a symbolic expression.
    ///
    /// Thin wrapper over the parser module; see `parse_expr::parse` for the
    /// accepted grammar and the error taxonomy.
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        parse_expr::parse(input)
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// Recursively traverses the expression tree and replaces all occurrences
    /// of the specified variable with the given constant value.
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Pow(base, exp) => Expr::Pow(
                Box::new(base.set_variable(var, value)),
                Box::new(exp.set_variable(var, value)),
            ),
            Expr::log10(expr) => Expr::log10(Box::new(expr.set_variable(var, value))),
            Expr::sqrt(expr) => Expr::sqrt(Box::new(expr.set_variable(var, value))),
            _ => self.clone(),
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::log10(expr) => expr.contains_variable(var_name),
            Expr::sqrt(expr) => expr.contains_variable(var_name),
        }
    }

    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements the standard rules:
    /// - Power rule: d/dx(x^n) = n*x^(n-1)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
    /// - Chain rule for log10 and sqrt
    ///
    /// For a power with a non-constant exponent the identity
    /// d/dx(u^v) = u^v * (v' * ln(u) + v * u'/u) is used, with ln expressed
    /// through log10.
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => lhs.diff(var) + rhs.diff(var),
            Expr::Sub(lhs, rhs) => lhs.diff(var) - rhs.diff(var),
            Expr::Mul(lhs, rhs) => {
                lhs.diff(var) * (*rhs.clone()) + (*lhs.clone()) * rhs.diff(var)
            }
            Expr::Div(lhs, rhs) => {
                (lhs.diff(var) * (*rhs.clone()) - (*lhs.clone()) * rhs.diff(var))
                    / ((*rhs.clone()) * (*rhs.clone()))
            }
            Expr::Pow(base, exp) => match **exp {
                Expr::Const(c) => {
                    Expr::Const(c)
                        * (*base.clone()).pow(Expr::Const(c - 1.0))
                        * base.diff(var)
                }
                _ => {
                    let ln_base =
                        Expr::log10(base.clone()) * Expr::Const(LN_10);
                    (*base.clone()).pow(*exp.clone())
                        * (exp.diff(var) * ln_base
                            + (*exp.clone()) * base.diff(var) / (*base.clone()))
                }
            },
            Expr::log10(expr) => {
                expr.diff(var) / ((*expr.clone()) * Expr::Const(LN_10))
            }
            Expr::sqrt(expr) => {
                expr.diff(var) / (Expr::Const(2.0) * Expr::sqrt(expr.clone()))
            }
        }
    }

    /// EVALUATION

    /// Evaluates the expression at a given value of the free variable.
    ///
    /// Out-of-domain points (log10 or sqrt of a negative number, division by
    /// zero, a negative base raised to a fractional power) come back as NaN
    /// or an infinity; no error is raised here.
    pub fn eval_at(&self, x: f64) -> f64 {
        match self {
            Expr::Var(_) => x,
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval_at(x) + rhs.eval_at(x),
            Expr::Sub(lhs, rhs) => lhs.eval_at(x) - rhs.eval_at(x),
            Expr::Mul(lhs, rhs) => lhs.eval_at(x) * rhs.eval_at(x),
            Expr::Div(lhs, rhs) => lhs.eval_at(x) / rhs.eval_at(x),
            Expr::Pow(base, exp) => base.eval_at(x).powf(exp.eval_at(x)),
            Expr::log10(expr) => expr.eval_at(x).log10(),
            Expr::sqrt(expr) => expr.eval_at(x).sqrt(),
        }
    }

    /// Converts a single-variable symbolic expression into an executable Rust closure.
    ///
    /// The resulting closure can be called repeatedly with different input
    /// values; the recursive structure mirrors the expression tree, so no
    /// runtime parsing or interpretation happens per call.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify1D();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64> {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) + rhs_fn(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) - rhs_fn(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) * rhs_fn(x))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) / rhs_fn(x))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D();
                let exp_fn = exp.lambdify1D();
                Box::new(move |x| base_fn(x).powf(exp_fn(x)))
            }
            Expr::log10(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).log10())
            }
            Expr::sqrt(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).sqrt())
            }
        }
    }
}
