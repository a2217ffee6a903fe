#![allow(non_snake_case)]
/// plotting of curve pairs and their intersection points with plotters crate
pub mod plots;
