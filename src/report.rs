//! Human-readable rendering of an [`EmotionProfile`].

use std::fmt;

use crate::classify::EmotionProfile;
use crate::error::N3Error;

/// The seven emotions the emotion model scores: Ekman's six plus neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Anger,
    Disgust,
    Joy,
    Fear,
    Sadness,
    Surprise,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Joy,
        Emotion::Fear,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Parse a model label in any letter case.
    pub fn from_label(label: &str) -> Result<Self, N3Error> {
        let name = capitalize(label);
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.display_name() == name)
            .ok_or_else(|| N3Error::UnknownEmotionLabel(label.to_string()))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Emotion::Anger => "Anger",
            Emotion::Disgust => "Disgust",
            Emotion::Joy => "Joy",
            Emotion::Fear => "Fear",
            Emotion::Sadness => "Sadness",
            Emotion::Surprise => "Surprise",
            Emotion::Neutral => "Neutral",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Emotion::Anger => "😡",
            Emotion::Disgust => "🤢",
            Emotion::Joy => "😁",
            Emotion::Fear => "😨",
            Emotion::Sadness => "😭",
            Emotion::Surprise => "😯",
            Emotion::Neutral => "😐",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Upper-case the first character and lower-case the rest.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A score as a whole percentage, halves rounding to even.
pub fn percentage(score: f32) -> i64 {
    (f64::from(score) * 100.0).round_ties_even() as i64
}

/// One line per emotion, in profile order: `<emoji><Emotion> contributes <n>%`.
///
/// Fails on the first label that is not one of the seven known emotions.
pub fn format_profile(profile: &EmotionProfile) -> Result<Vec<String>, N3Error> {
    profile
        .iter()
        .map(|entry| {
            let emotion = Emotion::from_label(&entry.label)?;
            Ok(format!(
                "{}{} contributes {}%",
                emotion.emoji(),
                emotion,
                percentage(entry.score)
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::EmotionScore;

    fn profile(entries: &[(&str, f32)]) -> EmotionProfile {
        EmotionProfile::new(
            entries
                .iter()
                .map(|(label, score)| EmotionScore {
                    label: label.to_string(),
                    score: *score,
                })
                .collect(),
        )
    }

    #[test]
    fn formats_reference_profile() {
        let profile = profile(&[
            ("neutral", 0.893_356_8),
            ("disgust", 0.031_303_98),
            ("anger", 0.022_359_306),
            ("fear", 0.022_121_353),
            ("surprise", 0.020_261_215),
            ("sadness", 0.005_417_15),
            ("joy", 0.005_180_109),
        ]);

        assert_eq!(
            format_profile(&profile).unwrap(),
            vec![
                "😐Neutral contributes 89%",
                "🤢Disgust contributes 3%",
                "😡Anger contributes 2%",
                "😨Fear contributes 2%",
                "😯Surprise contributes 2%",
                "😭Sadness contributes 1%",
                "😁Joy contributes 1%",
            ]
        );
    }

    #[test]
    fn unknown_label_is_rejected() {
        let profile = profile(&[("joy", 0.6), ("boredom", 0.4)]);
        match format_profile(&profile) {
            Err(N3Error::UnknownEmotionLabel(label)) => assert_eq!(label, "boredom"),
            other => panic!("expected UnknownEmotionLabel, got {other:?}"),
        }
    }

    #[test]
    fn labels_parse_in_any_case() {
        assert_eq!(Emotion::from_label("SADNESS").unwrap(), Emotion::Sadness);
        assert_eq!(Emotion::from_label("sUrPrIsE").unwrap(), Emotion::Surprise);
        assert!(Emotion::from_label("").is_err());
    }

    #[test]
    fn every_emotion_has_a_distinct_emoji() {
        let mut emojis: Vec<_> = Emotion::ALL.iter().map(|e| e.emoji()).collect();
        emojis.sort_unstable();
        emojis.dedup();
        assert_eq!(emojis.len(), Emotion::ALL.len());
    }

    #[test]
    fn percentages_round_half_to_even() {
        assert_eq!(percentage(0.0), 0);
        assert_eq!(percentage(1.0), 100);
        assert_eq!(percentage(0.125), 12);
        assert_eq!(percentage(0.375), 38);
        assert_eq!(percentage(0.0054), 1);
    }

    #[test]
    fn capitalize_matches_title_style() {
        assert_eq!(capitalize("neutral"), "Neutral");
        assert_eq!(capitalize("jOY"), "Joy");
        assert_eq!(capitalize(""), "");
    }
}
