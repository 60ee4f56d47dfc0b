use std::fmt;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::summary::format_hba1c;
use crate::error::{ChartError, ChartResult};

/// Diagnosis label a quiz profile carries and a player guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlucoseLabel {
    Normal,
    Prediabetic,
    Diabetic,
}

impl GlucoseLabel {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Prediabetic, Self::Diabetic];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Prediabetic => "prediabetic",
            Self::Diabetic => "diabetic",
        }
    }

    /// Case-insensitive parse of a quiz button's answer value.
    pub fn parse(raw: &str) -> ChartResult<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown glucose label `{raw}`")))
    }
}

impl fmt::Display for GlucoseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizProfile {
    pub id: String,
    pub label: GlucoseLabel,
    #[serde(default)]
    pub hba1c: Option<Decimal>,
}

impl QuizProfile {
    #[must_use]
    pub fn new(id: impl Into<String>, label: GlucoseLabel, hba1c: Option<Decimal>) -> Self {
        Self {
            id: id.into(),
            label,
            hba1c,
        }
    }
}

#[must_use]
pub fn default_quiz_profiles() -> Vec<QuizProfile> {
    vec![
        QuizProfile::new("01", GlucoseLabel::Normal, Some(Decimal::new(53, 1))),
        QuizProfile::new("10", GlucoseLabel::Prediabetic, Some(Decimal::new(62, 1))),
        QuizProfile::new("04", GlucoseLabel::Diabetic, Some(Decimal::new(75, 1))),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizGuess {
    pub id: String,
    pub guess: GlucoseLabel,
    pub correct: GlucoseLabel,
}

impl QuizGuess {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.guess == self.correct
    }
}

/// What the quiz shows after [`QuizState::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Presenting(QuizProfile),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResultEntry {
    pub id: String,
    pub guess: GlucoseLabel,
    pub correct: GlucoseLabel,
    pub is_correct: bool,
    pub hba1c_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResults {
    pub entries: Vec<QuizResultEntry>,
    pub score: usize,
    pub total: usize,
}

/// Guess-the-profile quiz progression.
///
/// Each profile is shown exactly once, in random order. A guess can only
/// be submitted once an answer is selected for the profile on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    profiles: Vec<QuizProfile>,
    guesses: Vec<QuizGuess>,
    current: Option<usize>,
    selected: Option<GlucoseLabel>,
}

impl QuizState {
    #[must_use]
    pub fn new(profiles: Vec<QuizProfile>) -> Self {
        Self {
            profiles,
            guesses: Vec::new(),
            current: None,
            selected: None,
        }
    }

    #[must_use]
    pub fn profiles(&self) -> &[QuizProfile] {
        &self.profiles
    }

    #[must_use]
    pub fn guesses(&self) -> &[QuizGuess] {
        &self.guesses
    }

    #[must_use]
    pub fn current(&self) -> Option<&QuizProfile> {
        self.current.map(|index| &self.profiles[index])
    }

    #[must_use]
    pub fn selected(&self) -> Option<GlucoseLabel> {
        self.selected
    }

    /// The "next" button is enabled only with a selected answer.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && self.current.is_some()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.guesses.len() == self.profiles.len()
    }

    /// `"{shown}/{total}"`, where the profile on screen counts as shown.
    #[must_use]
    pub fn progress_label(&self) -> String {
        let shown = (self.guesses.len() + 1).min(self.profiles.len());
        format!("{shown}/{}", self.profiles.len())
    }

    pub fn select(&mut self, label: GlucoseLabel) {
        if self.current.is_some() {
            self.selected = Some(label);
        }
    }

    /// Records the selected answer for the current profile.
    ///
    /// Returns `false` and changes nothing when no answer is selected.
    pub fn submit(&mut self) -> bool {
        let (Some(index), Some(guess)) = (self.current, self.selected) else {
            return false;
        };
        let profile = &self.profiles[index];
        self.guesses.push(QuizGuess {
            id: profile.id.clone(),
            guess,
            correct: profile.label,
        });
        self.current = None;
        self.selected = None;
        true
    }

    /// Picks a random not-yet-guessed profile, or finishes the quiz.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> QuizStep {
        self.selected = None;
        let remaining: Vec<usize> = (0..self.profiles.len())
            .filter(|&index| {
                let id = &self.profiles[index].id;
                !self.guesses.iter().any(|guess| &guess.id == id)
            })
            .collect();

        if remaining.is_empty() {
            self.current = None;
            debug!(guesses = self.guesses.len(), "quiz finished");
            return QuizStep::Finished;
        }

        let index = remaining[rng.gen_range(0..remaining.len())];
        self.current = Some(index);
        debug!(
            profile = %self.profiles[index].id,
            remaining = remaining.len(),
            "quiz presenting profile"
        );
        QuizStep::Presenting(self.profiles[index].clone())
    }

    #[must_use]
    pub fn results(&self) -> QuizResults {
        let entries: Vec<QuizResultEntry> = self
            .guesses
            .iter()
            .map(|guess| {
                let hba1c = self
                    .profiles
                    .iter()
                    .find(|profile| profile.id == guess.id)
                    .and_then(|profile| profile.hba1c);
                QuizResultEntry {
                    id: guess.id.clone(),
                    guess: guess.guess,
                    correct: guess.correct,
                    is_correct: guess.is_correct(),
                    hba1c_label: format_hba1c(hba1c),
                }
            })
            .collect();
        let score = entries.iter().filter(|entry| entry.is_correct).count();
        QuizResults {
            total: entries.len(),
            entries,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(
            GlucoseLabel::parse("Prediabetic").expect("parse"),
            GlucoseLabel::Prediabetic
        );
        assert!(GlucoseLabel::parse("borderline").is_err());
    }

    #[test]
    fn submit_requires_selection() {
        let mut quiz = QuizState::new(default_quiz_profiles());
        let mut rng = StdRng::seed_from_u64(7);
        quiz.advance(&mut rng);
        assert!(!quiz.submit());
        assert!(quiz.guesses().is_empty());

        quiz.select(GlucoseLabel::Diabetic);
        assert!(quiz.submit());
        assert_eq!(quiz.guesses().len(), 1);
    }

    #[test]
    fn progress_counts_profile_on_screen() {
        let mut quiz = QuizState::new(default_quiz_profiles());
        let mut rng = StdRng::seed_from_u64(1);
        quiz.advance(&mut rng);
        assert_eq!(quiz.progress_label(), "1/3");
        quiz.select(GlucoseLabel::Normal);
        quiz.submit();
        quiz.advance(&mut rng);
        assert_eq!(quiz.progress_label(), "2/3");
    }
}
