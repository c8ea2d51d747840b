//! Per-frame pipeline glue and run-level result types.
//!
//! Stage order within a frame:
//! candidate filter -> wave updates -> reap -> dedup -> admission.
//!
//! Algorithmic pieces live in `crate::detection`, `crate::wave` and
//! `crate::tracking`; this layer fixes call order and data flow.

mod result;
mod run;

pub use result::{FrameSummary, RecognizedWave, TrackingReport};

pub(crate) use run::{run_frame, TrackingState};
