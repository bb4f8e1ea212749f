//! # calc_core - Everyday Calculator Engine
//!
//! `calc_core` is the computational heart of Calcfolio: a catalog of small,
//! independent calculators (unit conversion, finance, health, math, everyday
//! arithmetic) behind one uniform interface. All inputs and outputs are
//! JSON-serializable so the same engine serves the CLI and the GUI.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All result types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, one message per failure
//! - **Table-Driven**: Units, currencies and grade points are static tables
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::catalog;
//! use calc_core::config::Settings;
//! use calc_core::inputs::RawInputs;
//!
//! let (_, calculator) = catalog::lookup("conversion", "length").unwrap();
//! let raw = RawInputs::new().with("value", "1").with("from", "in").with("to", "cm");
//! let eval = calculator.evaluate(&raw, &Settings::default()).unwrap();
//! assert_eq!(eval.summary, "1 in = 2.54 cm");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Every calculator and the [`CalculatorId`] registry
//! - [`catalog`] - Categories, page metadata and route resolution
//! - [`form`] - Form interaction state (edit, compute, reset, copy)
//! - [`inputs`] - Field descriptions, keystroke sanitizing and raw inputs
//! - [`units`] - Unit tables and the pivot conversion engine
//! - [`currency`] - Static sample exchange rates
//! - [`format`] - Display formatting
//! - [`config`] - Display settings
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod config;
pub mod currency;
pub mod errors;
pub mod form;
pub mod format;
pub mod inputs;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculatorId, Evaluation, ResultLine};
pub use catalog::{Category, PageMeta, Route};
pub use config::Settings;
pub use errors::{CalcError, CalcResult};
pub use form::{Clipboard, FormState};
pub use inputs::{FieldKind, FieldSpec, RawInputs};
pub use units::Quantity;
