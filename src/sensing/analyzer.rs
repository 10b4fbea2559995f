use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;

use crate::models::EmotionScores;

/// Capability boundary to the external face-analysis collaborator. The
/// recorder only ever sees this trait, never a concrete detection engine.
pub trait ExpressionAnalyzer: Send + Sync {
    /// Classify the current frame. `Ok(None)` means no face was visible;
    /// errors mean the analyzer itself failed. Expected to return quickly:
    /// the sampling loop calls it once per tick.
    fn analyze(&self) -> Result<Option<EmotionScores>>;
}

/// Analyzer that replays a fixed frame sequence, then reports no face.
/// Intended for tests and host integration without a camera.
pub struct ScriptedAnalyzer {
    frames: Mutex<VecDeque<Option<EmotionScores>>>,
}

impl ScriptedAnalyzer {
    pub fn new(frames: Vec<Option<EmotionScores>>) -> Self {
        Self {
            frames: Mutex::new(frames.into()),
        }
    }
}

impl ExpressionAnalyzer for ScriptedAnalyzer {
    fn analyze(&self) -> Result<Option<EmotionScores>> {
        let mut frames = self.frames.lock().expect("analyzer script poisoned");
        Ok(frames.pop_front().flatten())
    }
}

/// Analyzer that reports the same classification on every tick.
pub struct RepeatingAnalyzer {
    scores: EmotionScores,
}

impl RepeatingAnalyzer {
    pub fn new(scores: EmotionScores) -> Self {
        Self { scores }
    }
}

impl ExpressionAnalyzer for RepeatingAnalyzer {
    fn analyze(&self) -> Result<Option<EmotionScores>> {
        Ok(Some(self.scores))
    }
}
