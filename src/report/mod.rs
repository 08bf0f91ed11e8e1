//! Report rendering
//!
//! Turns datasets and diff reports into text for the console (summary, full
//! table, bar chart) or JSON. Renderers return `String`s; the command handlers
//! decide which stream each goes to.

pub mod chart;
pub mod json;
pub mod text;

pub use chart::{render_chart, DEFAULT_BAR_WIDTH};
pub use json::{compare_json, dataset_json, DatasetSummary};
pub use text::{render_dataset, render_summary, render_table};
