//! Engine modules: the formulas and the stage dispatcher built on them.
//!
//! The engine layer sits between form input (what the user typed) and
//! presentation (rows in a tab or a report). It never renders anything.

pub mod calculator;
pub mod formulas;

pub use calculator::{Calculator, StageRequest, StageResult};
