// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Simulated recognition backend.
//!
//! Stand-in for the external layout-recognition service: it produces a
//! plausible column of candidate regions from the sheet dimensions and
//! the taxonomy hints, with artificial latency. The editor only depends
//! on the request/response contract, so swapping in a real service
//! touches nothing else.

use crate::editor::suggest::{Candidate, RecognitionRequest, RecognitionResponse};
use anyhow::{bail, Result};
use std::time::Duration;

/// Run a recognition request and block until the result is ready.
/// Callers put this on a background thread; see the app's channel wiring.
pub fn detect_regions(request: &RecognitionRequest) -> Result<RecognitionResponse> {
    // Simulated network/inference latency.
    std::thread::sleep(Duration::from_millis(400));

    if request.image_width == 0 || request.image_height == 0 {
        bail!("sheet image has no dimensions");
    }
    if request.hints.kinds.is_empty() {
        bail!("no region types to detect");
    }

    let w = request.image_width as f64;
    let h = request.image_height as f64;
    let margin = w * 0.06;
    let row_width = w - 2.0 * margin;

    // Sensitivity scales how much of the sheet gets carved into rows.
    let rows = (2.0 + request.hints.sensitivity.clamp(0.0, 1.0) * 6.0) as usize;
    let row_gap = h * 0.02;
    let row_height = (h * 0.8 - row_gap * rows as f64) / rows as f64;

    let mut candidates = Vec::with_capacity(rows);
    for i in 0..rows {
        let kind = &request.hints.kinds[i % request.hints.kinds.len()];
        let y = h * 0.1 + i as f64 * (row_height + row_gap);
        // Confidence decays down the sheet; headers detect best.
        let confidence = (0.95 - i as f32 * 0.07).max(0.55);
        candidates.push(Candidate {
            kind: kind.clone(),
            x: margin,
            y,
            width: row_width,
            height: row_height,
            confidence,
        });
    }

    Ok(RecognitionResponse {
        generation: request.generation,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::suggest::RecognitionHints;

    fn request(sensitivity: f32) -> RecognitionRequest {
        RecognitionRequest {
            generation: 3,
            image_file: "sheet.jpg".to_string(),
            image_width: 800,
            image_height: 1200,
            hints: RecognitionHints {
                sensitivity,
                kinds: vec!["choice".to_string(), "essay".to_string()],
            },
        }
    }

    #[test]
    fn test_echoes_generation_and_stays_in_bounds() {
        let response = detect_regions(&request(0.5)).unwrap();
        assert_eq!(response.generation, 3);
        assert!(!response.candidates.is_empty());
        for c in &response.candidates {
            assert!(c.x >= 0.0 && c.y >= 0.0);
            assert!(c.x + c.width <= 800.0);
            assert!(c.y + c.height <= 1200.0);
            assert!((0.0..=1.0).contains(&c.confidence));
        }
    }

    #[test]
    fn test_sensitivity_increases_candidates() {
        let low = detect_regions(&request(0.0)).unwrap();
        let high = detect_regions(&request(1.0)).unwrap();
        assert!(high.candidates.len() > low.candidates.len());
    }

    #[test]
    fn test_rejects_empty_hints() {
        let mut req = request(0.5);
        req.hints.kinds.clear();
        assert!(detect_regions(&req).is_err());
    }
}
