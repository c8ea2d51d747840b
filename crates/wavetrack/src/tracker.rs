use image::GrayImage;

use crate::geometry::PixelPoint;
use crate::pipeline::{run_frame, FrameSummary, RecognizedWave, TrackingReport, TrackingState};
use crate::tracking::TrackerConfig;
use crate::wave::{RecognitionPolicy, Wave};
use crate::TrackError;

/// Multi-wave tracker over one frame sequence.
///
/// Owns the live waves, the archive of recognized waves and the id counter.
/// Frames are fed in strictly increasing order through
/// [`process_frame`](Self::process_frame); every input is checked before any
/// state changes.
pub struct WaveTracker {
    config: TrackerConfig,
    policy: Box<dyn RecognitionPolicy>,
    total_frames: usize,
    last_frame: Option<usize>,
    frames_processed: usize,
    state: TrackingState,
}

impl WaveTracker {
    /// Tracker using the configured mass/displacement thresholds.
    pub fn new(config: TrackerConfig, total_frames: usize) -> Result<Self, TrackError> {
        let policy = config.recognition.clone();
        Self::with_policy(config, total_frames, policy)
    }

    /// Tracker with a custom recognition rule.
    ///
    /// `config.recognition` is ignored by the tracker in this case.
    pub fn with_policy(
        config: TrackerConfig,
        total_frames: usize,
        policy: impl RecognitionPolicy + 'static,
    ) -> Result<Self, TrackError> {
        config.validate()?;
        if total_frames == 0 {
            return Err(TrackError::ZeroTotalFrames);
        }
        Ok(Self {
            config,
            policy: Box::new(policy),
            total_frames,
            last_frame: None,
            frames_processed: 0,
            state: TrackingState::default(),
        })
    }

    /// Process frame `frame_number` (1-based) given its mask and raw contours.
    pub fn process_frame<C: AsRef<[PixelPoint]>>(
        &mut self,
        mask: &GrayImage,
        raw_contours: &[C],
        frame_number: usize,
    ) -> Result<FrameSummary, TrackError> {
        self.check_frame(mask, frame_number)?;

        let summary = run_frame(
            &mut self.state,
            mask,
            raw_contours,
            frame_number,
            self.total_frames,
            &self.config,
            self.policy.as_ref(),
        );
        self.last_frame = Some(frame_number);
        self.frames_processed += 1;
        Ok(summary)
    }

    fn check_frame(&self, mask: &GrayImage, frame_number: usize) -> Result<(), TrackError> {
        if self.is_finished() {
            return Err(TrackError::SequenceFinished);
        }
        if frame_number == 0 || frame_number > self.total_frames {
            return Err(TrackError::FrameOutOfRange {
                frame: frame_number,
                total_frames: self.total_frames,
            });
        }
        if let Some(previous) = self.last_frame {
            if frame_number <= previous {
                return Err(TrackError::FrameOutOfOrder {
                    previous,
                    got: frame_number,
                });
            }
        }
        let expected = [self.config.frame_size.width, self.config.frame_size.height];
        let got = [mask.width(), mask.height()];
        if expected != got {
            return Err(TrackError::MaskSizeMismatch { expected, got });
        }
        Ok(())
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    /// Whether the final frame has been processed.
    pub fn is_finished(&self) -> bool {
        self.last_frame == Some(self.total_frames)
    }

    /// Live waves, oldest first.
    pub fn waves(&self) -> &[Wave] {
        &self.state.waves
    }

    /// Dead recognized waves in archive order.
    pub fn recognized(&self) -> &[Wave] {
        &self.state.archive
    }

    /// Number of waves that died unrecognized so far.
    pub fn discarded_count(&self) -> usize {
        self.state.discarded
    }

    /// Snapshot of the run so far.
    pub fn report(&self) -> TrackingReport {
        TrackingReport {
            frame_size: self.config.frame_size,
            total_frames: self.total_frames,
            frames_processed: self.frames_processed,
            recognized: self
                .state
                .archive
                .iter()
                .filter_map(RecognizedWave::from_wave)
                .collect(),
            discarded: self.state.discarded,
        }
    }

    /// Consume the tracker and produce the final report.
    pub fn finish(self) -> TrackingReport {
        if !self.state.waves.is_empty() {
            tracing::warn!(
                live = self.state.waves.len(),
                frames_processed = self.frames_processed,
                total_frames = self.total_frames,
                "sequence ended early; live waves are not reported"
            );
        }
        self.report()
    }
}
