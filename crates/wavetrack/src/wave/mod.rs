//! A single tracked wave and its per-frame update cycle.
//!
//! A wave is seeded from a candidate contour and from then on re-derives its
//! representation every frame from the mask pixels inside its search band.
//! Each update runs, in order:
//!
//! 1. search band from the previous centroid
//! 2. representation (mask pixels inside the band)
//! 3. death check
//! 4. centroid and centroid history
//! 5. display bounding polygon
//! 6. displacement from the birth axis and its history
//! 7. mass
//! 8. recognition latch

mod history;
mod recognition;

pub use history::BoundedHistory;
pub use recognition::{RecognitionPolicy, RecognitionThresholds, WaveDynamics};

use image::GrayImage;

use crate::detection::Candidate;
use crate::geometry::{
    left_edge_projection, mean_point, trimmed_min_area_rect, AxisLine, BoundingPolygon,
    PixelPoint, SearchRoi,
};
use crate::tracking::SearchRegionConfig;

/// Unique wave identifier, assigned in creation order.
pub type WaveId = u64;

/// Hands out wave ids starting at 1; ids are never reused.
#[derive(Debug, Clone)]
pub struct WaveIdGenerator {
    next: WaveId,
}

impl Default for WaveIdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl WaveIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> WaveId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> WaveId {
        self.next
    }
}

/// Per-frame inputs shared by every wave update.
#[derive(Clone, Copy)]
pub struct UpdateContext<'a> {
    pub mask: &'a GrayImage,
    pub frame_number: usize,
    pub total_frames: usize,
    pub search: &'a SearchRegionConfig,
    pub policy: &'a dyn RecognitionPolicy,
}

/// State of one tracked wave.
#[derive(Debug, Clone)]
pub struct Wave {
    id: WaveId,
    birth_frame: usize,
    axis_angle_deg: f64,
    original_axis: AxisLine,
    centroid: Option<PixelPoint>,
    centroid_history: BoundedHistory<Option<PixelPoint>>,
    search_roi: SearchRoi,
    points: Vec<PixelPoint>,
    bounding_polygon: Option<BoundingPolygon>,
    displacement: f64,
    max_displacement: f64,
    displacement_history: BoundedHistory<f64>,
    mass: usize,
    max_mass: usize,
    recognized: bool,
    recognized_frame: Option<usize>,
    death_frame: Option<usize>,
}

impl Wave {
    /// Seed a wave from an admitted candidate.
    ///
    /// The contour vertices serve as the initial representation. The birth
    /// axis is drawn through `centroid` at the negated axis angle.
    pub(crate) fn spawn(
        candidate: Candidate,
        centroid: PixelPoint,
        id: WaveId,
        search: &SearchRegionConfig,
        frame_width: u32,
        history_len: usize,
    ) -> Self {
        let angle = search.axis_angle_deg;
        let points = candidate.contour;
        let mass = points.len();
        let mut centroid_history = BoundedHistory::new(history_len);
        centroid_history.push(Some(centroid));

        Self {
            id,
            birth_frame: candidate.frame_number,
            axis_angle_deg: angle,
            original_axis: AxisLine::through(centroid, -angle),
            centroid: Some(centroid),
            centroid_history,
            search_roi: SearchRoi::around(centroid, angle, search.buffer_px, frame_width),
            bounding_polygon: trimmed_min_area_rect(&points),
            points,
            displacement: 0.0,
            max_displacement: 0.0,
            displacement_history: BoundedHistory::new(history_len),
            mass,
            max_mass: mass,
            recognized: false,
            recognized_frame: None,
            death_frame: None,
        }
    }

    /// Run the full per-frame update cycle against `ctx.mask`.
    pub(crate) fn update(&mut self, ctx: &UpdateContext<'_>) {
        let frame_number = ctx.frame_number;

        if let Some(c) = self.centroid {
            self.search_roi =
                SearchRoi::around(c, self.axis_angle_deg, ctx.search.buffer_px, ctx.mask.width());
        }

        self.points = self.search_roi.select(ctx.mask);

        if self.death_frame.is_none()
            && (self.points.is_empty() || frame_number == ctx.total_frames)
        {
            self.death_frame = Some(frame_number);
        }

        self.centroid = mean_point(&self.points);
        self.centroid_history.push(self.centroid);

        if !self.points.is_empty() {
            self.bounding_polygon = trimmed_min_area_rect(&self.points);
        }

        if let Some(c) = self.centroid {
            self.displacement = self.original_axis.distance_to(c);
        }
        self.max_displacement = self.max_displacement.max(self.displacement);
        self.displacement_history.push(self.displacement);

        self.mass = self.points.len();
        self.max_mass = self.max_mass.max(self.mass);

        if !self.recognized && ctx.policy.is_recognized(&self.dynamics()) {
            self.recognized = true;
            self.recognized_frame = Some(frame_number);
            tracing::info!(
                id = self.id,
                frame = frame_number,
                max_mass = self.max_mass,
                max_displacement = self.max_displacement,
                "wave recognized"
            );
        }
    }

    /// Row where this wave's axis meets the left frame edge.
    pub fn left_edge_y(&self) -> Option<i32> {
        self.centroid
            .map(|c| left_edge_projection(c, self.axis_angle_deg))
    }

    pub fn dynamics(&self) -> WaveDynamics {
        WaveDynamics {
            mass: self.mass,
            max_mass: self.max_mass,
            displacement: self.displacement,
            max_displacement: self.max_displacement,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.death_frame.is_some()
    }

    pub fn id(&self) -> WaveId {
        self.id
    }

    pub fn birth_frame(&self) -> usize {
        self.birth_frame
    }

    pub fn axis_angle_deg(&self) -> f64 {
        self.axis_angle_deg
    }

    pub fn original_axis(&self) -> AxisLine {
        self.original_axis
    }

    /// `None` when the last update found no representation.
    pub fn centroid(&self) -> Option<PixelPoint> {
        self.centroid
    }

    pub fn centroid_history(&self) -> &BoundedHistory<Option<PixelPoint>> {
        &self.centroid_history
    }

    pub fn search_roi(&self) -> &SearchRoi {
        &self.search_roi
    }

    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn bounding_polygon(&self) -> Option<&BoundingPolygon> {
        self.bounding_polygon.as_ref()
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    pub fn max_displacement(&self) -> f64 {
        self.max_displacement
    }

    pub fn displacement_history(&self) -> &BoundedHistory<f64> {
        &self.displacement_history
    }

    pub fn mass(&self) -> usize {
        self.mass
    }

    pub fn max_mass(&self) -> usize {
        self.max_mass
    }

    pub fn is_recognized(&self) -> bool {
        self.recognized
    }

    /// First frame at which recognition latched.
    pub fn recognized_frame(&self) -> Option<usize> {
        self.recognized_frame
    }

    pub fn death_frame(&self) -> Option<usize> {
        self.death_frame
    }
}
