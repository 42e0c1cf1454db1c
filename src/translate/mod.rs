//! The text-generation collaborator seam.
//!
//! Translation is nondeterministic generative work and lives outside this
//! crate. What lives here is the data contract: structured request payloads
//! built from a caption track, and response parsing back into the track. Any
//! model-backed implementation plugs in behind [`Translator`].

use crate::caption::{CaptionInterval, CaptionTrack};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Cues per request batch. One batched call instead of a call per cue.
pub const DEFAULT_BATCH_SIZE: usize = 20;

const DEFAULT_INSTRUCTIONS: &str = "Translate each cue's text to the target language. \
Keep technical terms accurate, use conversational phrasing suited to short videos, \
stay concise, and do not add or drop content.";

/// One cue as it crosses the collaborator boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuePayload {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// A batch of cues awaiting translation.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationRequest {
    pub target_lang: String,
    pub instructions: String,
    pub cues: Vec<CuePayload>,
}

/// One translated cue as returned by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedCue {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub translation: String,
}

/// The collaborator's answer for one request batch.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationResponse {
    pub cues: Vec<TranslatedCue>,
}

/// External translation collaborator.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse>;
    fn name(&self) -> &'static str;
}

/// Split a track into request batches for the collaborator.
pub fn build_requests(
    track: &CaptionTrack,
    target_lang: &str,
    batch_size: usize,
) -> Vec<TranslationRequest> {
    let batch_size = batch_size.max(1);
    track
        .cues
        .chunks(batch_size)
        .map(|chunk| TranslationRequest {
            target_lang: target_lang.to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            cues: chunk
                .iter()
                .map(|cue| CuePayload {
                    start: cue.start().as_secs_f64(),
                    end: cue.end().as_secs_f64(),
                    text: cue.text.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Attach translations to a track, positionally.
///
/// A short response leaves trailing cues untranslated and logs a warning;
/// like the bilingual merge, no time-based realignment is attempted.
pub fn apply_translations(track: &CaptionTrack, translated: &[TranslatedCue]) -> CaptionTrack {
    if translated.len() != track.len() {
        warn!(
            "Translation response has {} cues for a track of {}",
            translated.len(),
            track.len()
        );
    }

    let cues: Vec<CaptionInterval> = track
        .iter()
        .enumerate()
        .map(|(i, cue)| match translated.get(i) {
            Some(t) => cue.clone().with_translation(t.translation.clone()),
            None => cue.clone(),
        })
        .collect();

    CaptionTrack::new(cues)
}

/// Run a whole track through a translator in batches and attach the results.
pub async fn translate_track(
    translator: &dyn Translator,
    track: &CaptionTrack,
    target_lang: &str,
    batch_size: usize,
) -> Result<CaptionTrack> {
    let requests = build_requests(track, target_lang, batch_size);
    debug!(
        "Translating {} cues to {} in {} batch(es) via {}",
        track.len(),
        target_lang,
        requests.len(),
        translator.name()
    );

    let mut translated = Vec::with_capacity(track.len());
    for request in &requests {
        let response = translator.translate(request).await?;
        translated.extend(response.cues);
    }

    Ok(apply_translations(track, &translated))
}
