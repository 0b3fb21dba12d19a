// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Recognition suggestion contract.
//!
//! Types exchanged with the external recognition collaborator. Responses
//! echo a generation token; the session discards any response whose
//! generation no longer matches, so a slow result can never clobber newer
//! state. Supersession replaces cancellation: requests are never
//! explicitly aborted.

use serde::{Deserialize, Serialize};

/// Taxonomy-specific knobs forwarded to the recognizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionHints {
    /// Detection sensitivity in [0, 1]; higher finds more candidates.
    pub sensitivity: f32,
    /// Region type ids the recognizer should look for.
    pub kinds: Vec<String>,
}

impl Default for RecognitionHints {
    fn default() -> Self {
        Self {
            sensitivity: 0.5,
            kinds: Vec::new(),
        }
    }
}

/// One request to the recognition collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionRequest {
    /// Monotonically increasing token; echoed back in the response.
    pub generation: u64,
    pub image_file: String,
    pub image_width: u32,
    pub image_height: u32,
    pub hints: RecognitionHints,
}

/// A candidate region produced by recognition, in image space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f32,
}

/// Recognition result with the echoed generation token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionResponse {
    pub generation: u64,
    pub candidates: Vec<Candidate>,
}

/// How an accepted candidate batch is merged into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Keep existing regions, append candidates after them.
    Append,
    /// Discard existing regions (host-confirmed overwrite).
    Replace,
}

/// Result of feeding a response into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Batch merged; `added` counts candidates that passed validation.
    Applied { added: usize },
    /// The generation token no longer matches: a newer request was issued
    /// or the operator edited manually. Store unchanged.
    Stale,
}
