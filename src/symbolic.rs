#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use crossplot::symbolic::symbolic_engine::Expr;
/// let input = "5x + 3";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let f = parsed_expression.lambdify1D();
/// println!("{}, at x = 1: {}  \n", input, f(1.0));
/// ```
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the symbolic expression tree of one real variable x
/// 2) turns a symbolic expression into a Rust function
/// 3) differentiates a symbolic expression analytically
///# Example#
/// ```
/// use crossplot::symbolic::symbolic_engine::Expr;
/// let input = "x^2 - 3x";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// // differentiate with respect to x
/// let df_dx = parsed_expression.diff("x");
/// println!("df_dx = {}", df_dx);
/// // convert symbolic expression to a Rust function and evaluate it
/// let f = parsed_expression.lambdify1D();
/// println!("f(2) = {}", f(2.0));
/// ```
pub mod symbolic_engine;
