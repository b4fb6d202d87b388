//! Core library for the hppd-recon command line application.
//!
//! The crate reconciles budgeted nurse-staffing targets ("templates")
//! against actual worked-hour reports, per facility and date, and classifies
//! each facility's Hours Per Patient Day (HPPD) performance into three
//! priority-ordered tiers rendered as a styled spreadsheet. The modules are
//! structured to keep responsibilities narrow and composable: spreadsheet
//! adapters live under [`io`], data representations inside [`model`], name
//! canonicalization and fuzzy matching in [`normalize`] and [`matcher`],
//! ratio derivation and tiering in [`metrics`] and [`classify`], and the
//! orchestration entry point under [`pipeline`].

pub mod classify;
pub mod error;
pub mod io;
pub mod matcher;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod pipeline;

pub use error::{ReconError, Result};
pub use pipeline::{RunConfig, RunSummary, run};
