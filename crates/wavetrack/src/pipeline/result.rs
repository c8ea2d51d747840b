use crate::geometry::BoundingPolygon;
use crate::tracking::FrameSize;
use crate::wave::{Wave, WaveId};

/// Phase counts of one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct FrameSummary {
    pub frame_number: usize,
    /// Contours that passed the candidate gates.
    pub candidates: usize,
    /// Waves that died this frame and were archived.
    pub archived: usize,
    /// Waves that died this frame unrecognized.
    pub discarded: usize,
    /// Waves removed as duplicates of an older wave.
    pub duplicates: usize,
    /// Candidates promoted to new waves.
    pub admitted: usize,
    /// Live waves after the frame.
    pub live: usize,
}

/// Archived record of a recognized wave.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecognizedWave {
    pub id: WaveId,
    pub birth_frame: usize,
    pub death_frame: usize,
    /// First frame at which the wave was recognized.
    pub recognized_frame: usize,
    pub max_mass: usize,
    pub max_displacement: f64,
    /// Oldest first; `None` marks a frame without representation.
    pub centroid_history: Vec<Option<[i32; 2]>>,
    pub displacement_history: Vec<f64>,
    /// Last bounding polygon, if the wave ever had a representation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_polygon: Option<BoundingPolygon>,
}

impl RecognizedWave {
    /// Snapshot an archived wave. `None` if the wave is alive or unrecognized.
    pub fn from_wave(wave: &Wave) -> Option<Self> {
        Some(Self {
            id: wave.id(),
            birth_frame: wave.birth_frame(),
            death_frame: wave.death_frame()?,
            recognized_frame: wave.recognized_frame()?,
            max_mass: wave.max_mass(),
            max_displacement: wave.max_displacement(),
            centroid_history: wave
                .centroid_history()
                .iter()
                .map(|c| c.map(|p| [p.x, p.y]))
                .collect(),
            displacement_history: wave.displacement_history().to_vec(),
            bounding_polygon: wave.bounding_polygon().copied(),
        })
    }
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackingReport {
    pub frame_size: FrameSize,
    pub total_frames: usize,
    pub frames_processed: usize,
    /// Recognized waves in archive order.
    pub recognized: Vec<RecognizedWave>,
    /// Number of waves that died unrecognized.
    pub discarded: usize,
}
