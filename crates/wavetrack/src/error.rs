//! Boundary errors for configuration and per-frame inputs.

/// Errors returned when the tracker is misconfigured or fed inputs that
/// violate the frame-sequence contract.
///
/// Per-frame arithmetic never produces an error; these are raised at the
/// entry points before any tracking state is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    /// A configuration parameter is out of its valid range.
    InvalidConfig {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
    /// The mask does not have the configured analysis resolution.
    MaskSizeMismatch {
        /// Configured `[width, height]`.
        expected: [u32; 2],
        /// Dimensions of the submitted mask.
        got: [u32; 2],
    },
    /// The sequence length must be at least one frame.
    ZeroTotalFrames,
    /// Frame number is 0 or larger than the sequence length.
    FrameOutOfRange {
        /// Submitted frame number.
        frame: usize,
        /// Sequence length given at construction.
        total_frames: usize,
    },
    /// Frame numbers must increase strictly.
    FrameOutOfOrder {
        /// Last processed frame number.
        previous: usize,
        /// Submitted frame number.
        got: usize,
    },
    /// The final frame has already been processed.
    SequenceFinished,
}

impl std::fmt::Display for TrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config `{}`: {}", field, reason)
            }
            Self::MaskSizeMismatch { expected, got } => write!(
                f,
                "mask is {}x{}, expected {}x{}",
                got[0], got[1], expected[0], expected[1]
            ),
            Self::ZeroTotalFrames => write!(f, "sequence must contain at least one frame"),
            Self::FrameOutOfRange {
                frame,
                total_frames,
            } => write!(f, "frame {} outside 1..={}", frame, total_frames),
            Self::FrameOutOfOrder { previous, got } => {
                write!(f, "frame {} submitted after frame {}", got, previous)
            }
            Self::SequenceFinished => write!(f, "final frame already processed"),
        }
    }
}

impl std::error::Error for TrackError {}

impl TrackError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
