//! Population-level phases of a frame step: update, reap, dedup, admit.

mod config;
mod dedup;
mod engine;

pub use config::{FrameSize, SearchRegionConfig, TrackerConfig};
pub use dedup::dedup_waves;
pub use engine::{admit, reap, track_all};
