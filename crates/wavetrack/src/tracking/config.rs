use std::path::Path;

use crate::detection::CandidateFilterConfig;
use crate::geometry::tan_deg;
use crate::wave::RecognitionThresholds;
use crate::TrackError;

/// Largest row offset the axis may accumulate across the frame width.
const MAX_AXIS_OFFSET_PX: f64 = (i32::MAX / 4) as f64;

/// Analysis resolution every mask must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 320,
            height: 180,
        }
    }
}

/// Geometry of the per-wave search band.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchRegionConfig {
    /// Half-height of the band on each side of the wave axis (pixels).
    pub buffer_px: i32,
    /// Expected direction of the wave crest, degrees from horizontal.
    pub axis_angle_deg: f64,
}

impl Default for SearchRegionConfig {
    fn default() -> Self {
        Self {
            buffer_px: 15,
            axis_angle_deg: 5.0,
        }
    }
}

/// Full tracker configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub frame_size: FrameSize,
    pub candidate: CandidateFilterConfig,
    pub search: SearchRegionConfig,
    pub recognition: RecognitionThresholds,
    /// Capacity of the centroid and displacement histories.
    pub history_len: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            frame_size: FrameSize::default(),
            candidate: CandidateFilterConfig::default(),
            search: SearchRegionConfig::default(),
            recognition: RecognitionThresholds::default(),
            history_len: 20,
        }
    }
}

impl TrackerConfig {
    /// Load a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every parameter against its admissible range.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.frame_size.width == 0 || self.frame_size.height == 0 {
            return Err(TrackError::invalid("frame_size", "dimensions must be > 0"));
        }
        if self.history_len == 0 {
            return Err(TrackError::invalid("history_len", "must be > 0"));
        }

        let angle = self.search.axis_angle_deg;
        if !angle.is_finite() || angle.abs() >= 90.0 {
            return Err(TrackError::invalid(
                "search.axis_angle_deg",
                format!("must be finite and inside (-90, 90), got {angle}"),
            ));
        }
        let offset = tan_deg(angle).abs() * f64::from(self.frame_size.width);
        if offset > MAX_AXIS_OFFSET_PX {
            return Err(TrackError::invalid(
                "search.axis_angle_deg",
                format!("too steep for frame width {}, got {angle}", self.frame_size.width),
            ));
        }
        // A zero buffer collapses the band onto a line.
        let buffer = self.search.buffer_px;
        if buffer <= 0 || i64::from(buffer) > i64::from(self.frame_size.height) {
            return Err(TrackError::invalid(
                "search.buffer_px",
                format!(
                    "must be inside 1..={}, got {buffer}",
                    self.frame_size.height
                ),
            ));
        }

        let c = &self.candidate;
        if !c.min_area.is_finite() || c.min_area < 0.0 {
            return Err(TrackError::invalid(
                "candidate.min_area",
                "must be finite and >= 0",
            ));
        }
        if !c.min_inertia_ratio.is_finite()
            || !c.max_inertia_ratio.is_finite()
            || c.min_inertia_ratio > c.max_inertia_ratio
        {
            return Err(TrackError::invalid(
                "candidate.max_inertia_ratio",
                format!(
                    "bounds must be finite with min <= max, got [{}, {})",
                    c.min_inertia_ratio, c.max_inertia_ratio
                ),
            ));
        }
        if !c.degenerate_eps.is_finite() || c.degenerate_eps < 0.0 {
            return Err(TrackError::invalid(
                "candidate.degenerate_eps",
                "must be finite and >= 0",
            ));
        }

        let d = self.recognition.displacement_threshold;
        if !d.is_finite() || d < 0.0 {
            return Err(TrackError::invalid(
                "recognition.displacement_threshold",
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.history_len, 20);
        assert_eq!(cfg.frame_size, FrameSize { width: 320, height: 180 });
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: TrackerConfig =
            serde_json::from_str(r#"{"search": {"buffer_px": 9}}"#).unwrap();
        assert_eq!(cfg.search.buffer_px, 9);
        assert_eq!(cfg.search.axis_angle_deg, 5.0);
        assert_eq!(cfg.recognition.mass_threshold, 1000);
        assert_eq!(cfg.history_len, 20);
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        let mut cfg = TrackerConfig::default();
        cfg.search.axis_angle_deg = 90.0;
        assert!(matches!(
            cfg.validate(),
            Err(TrackError::InvalidConfig { field: "search.axis_angle_deg", .. })
        ));

        let mut cfg = TrackerConfig::default();
        cfg.history_len = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = TrackerConfig::default();
        cfg.candidate.min_inertia_ratio = 0.5;
        assert!(cfg.validate().is_err());

        let mut cfg = TrackerConfig::default();
        cfg.search.buffer_px = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn buffer_is_bounded_by_frame_height() {
        let mut cfg = TrackerConfig::default();
        cfg.search.buffer_px = 180;
        assert!(cfg.validate().is_ok());

        cfg.search.buffer_px = 181;
        assert!(matches!(
            cfg.validate(),
            Err(TrackError::InvalidConfig { field: "search.buffer_px", .. })
        ));

        cfg.search.buffer_px = i32::MAX;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn near_vertical_axis_is_rejected() {
        let mut cfg = TrackerConfig::default();
        cfg.search.axis_angle_deg = 89.0;
        assert!(cfg.validate().is_ok());

        for angle in [89.999_999_9, -89.999_999_9] {
            cfg.search.axis_angle_deg = angle;
            assert!(matches!(
                cfg.validate(),
                Err(TrackError::InvalidConfig { field: "search.axis_angle_deg", .. })
            ));
        }
    }
}
