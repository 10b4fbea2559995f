use serde::{Deserialize, Serialize};

/// The seven expression categories reported by the face analyzer.
///
/// `ALL` fixes the canonical enumeration order; every argmax and tie-break in
/// the crate walks that slice, so a tie always resolves to the earliest
/// category listed there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Emotion {
    Angry,
    Disgusted,
    Fearful,
    Happy,
    Neutral,
    Sad,
    Surprised,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgusted,
        Emotion::Fearful,
        Emotion::Happy,
        Emotion::Neutral,
        Emotion::Sad,
        Emotion::Surprised,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgusted => "disgusted",
            Emotion::Fearful => "fearful",
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Sad => "sad",
            Emotion::Surprised => "surprised",
        }
    }

    /// Label used in rendered reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Emotion::Angry => "Angry",
            Emotion::Disgusted => "Disgusted",
            Emotion::Fearful => "Fearful",
            Emotion::Happy => "Happy",
            Emotion::Neutral => "Neutral",
            Emotion::Sad => "Sad",
            Emotion::Surprised => "Surprised",
        }
    }
}

/// One confidence value in [0,1] per category. A full vector is guaranteed by
/// construction; the scores need not sum to 1.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionScores {
    pub angry: f64,
    pub disgusted: f64,
    pub fearful: f64,
    pub happy: f64,
    pub neutral: f64,
    pub sad: f64,
    pub surprised: f64,
}

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Angry => self.angry,
            Emotion::Disgusted => self.disgusted,
            Emotion::Fearful => self.fearful,
            Emotion::Happy => self.happy,
            Emotion::Neutral => self.neutral,
            Emotion::Sad => self.sad,
            Emotion::Surprised => self.surprised,
        }
    }

    pub fn set(&mut self, emotion: Emotion, value: f64) {
        match emotion {
            Emotion::Angry => self.angry = value,
            Emotion::Disgusted => self.disgusted = value,
            Emotion::Fearful => self.fearful = value,
            Emotion::Happy => self.happy = value,
            Emotion::Neutral => self.neutral = value,
            Emotion::Sad => self.sad = value,
            Emotion::Surprised => self.surprised = value,
        }
    }

    /// Highest-scoring category and its confidence. Ties resolve to the
    /// earliest category in `Emotion::ALL`.
    pub fn dominant(&self) -> (Emotion, f64) {
        let mut best = Emotion::ALL[0];
        let mut best_score = self.get(best);
        for &emotion in &Emotion::ALL[1..] {
            let score = self.get(emotion);
            if score > best_score {
                best = emotion;
                best_score = score;
            }
        }
        (best, best_score)
    }
}
