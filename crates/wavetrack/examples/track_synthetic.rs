//! Track a generated sequence: one band drifts across its axis, one stays put.
//!
//! Run with `cargo run -p wavetrack --example track_synthetic`.

use image::{GrayImage, Luma};
use imageproc::contours::find_contours;
use wavetrack::{PixelPoint, TrackerConfig, WaveTracker};

const FRAMES: usize = 60;

fn frame_mask(frame: usize) -> GrayImage {
    let mut img = GrayImage::new(320, 180);
    let drift = (frame.min(30) as u32) / 2;
    for y in (20 + drift)..(30 + drift) {
        for x in 80..240 {
            img.put_pixel(x, y, Luma([255]));
        }
    }
    for y in 140..148 {
        for x in 60..260 {
            img.put_pixel(x, y, Luma([255]));
        }
    }
    img
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = WaveTracker::new(TrackerConfig::default(), FRAMES)?;

    for frame in 1..=FRAMES {
        let mask = frame_mask(frame);
        let contours: Vec<Vec<PixelPoint>> = find_contours::<i32>(&mask)
            .into_iter()
            .map(|c| c.points)
            .collect();
        let summary = tracker.process_frame(&mask, &contours, frame)?;
        if summary.admitted > 0 || summary.archived > 0 {
            println!(
                "frame {:>3}: +{} admitted, {} archived, {} live",
                frame, summary.admitted, summary.archived, summary.live
            );
        }
    }

    let report = tracker.finish();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
