//! UI module for the Calcfolio GUI
//!
//! # Panel Structure
//! - `toolbar` - Header, Calculate / Reset / Copy, settings dropdown
//! - `catalog_panel` - Left sidebar: categories and their calculators
//! - `input_panel` - Center panel: overview, calculator form or coming-soon page
//! - `results_panel` - Right panel: result card, error, or coming-soon links
//! - `status_bar` - Current page path and status messages

pub mod catalog_panel;
pub mod input_panel;
pub mod results_panel;
pub mod status_bar;
pub mod toolbar;
