use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_GLUCOSE_DOMAIN, Margin, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DEFAULT_SELECTION, MAX_SELECTION};

use super::quiz::{QuizProfile, default_quiz_profiles};

/// Surface size and margin inset for one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub margin: Margin,
}

impl ChartLayout {
    #[must_use]
    pub fn new(viewport: Viewport, margin: Margin) -> Self {
        Self { viewport, margin }
    }

    pub fn plot_area(self) -> ChartResult<PlotArea> {
        PlotArea::inset(self.viewport, self.margin)
    }
}

/// Page bootstrap configuration.
///
/// Serializable so a host can ship it next to the data files; every field
/// has a default matching the published site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryConfig {
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
    #[serde(default = "default_summary_file")]
    pub summary_file: PathBuf,
    /// `{id}` is replaced by the participant id.
    #[serde(default = "default_full_day_template")]
    pub full_day_template: String,
    #[serde(default = "default_breakfast_template")]
    pub breakfast_template: String,
    #[serde(default = "default_glucose_domain")]
    pub glucose_domain: (f64, f64),
    #[serde(default = "default_selection")]
    pub default_selection: Vec<String>,
    #[serde(default = "default_max_selection")]
    pub max_selection: usize,
    #[serde(default = "default_quiz_layout")]
    pub quiz_layout: ChartLayout,
    #[serde(default = "default_result_layout")]
    pub result_layout: ChartLayout,
    #[serde(default = "default_trend_layout")]
    pub trend_layout: ChartLayout,
    #[serde(default = "default_scatter_layout")]
    pub scatter_layout: ChartLayout,
    #[serde(default = "default_quiz_profiles")]
    pub quiz_profiles: Vec<QuizProfile>,
    /// Fixed seed for the quiz order; `None` draws from OS entropy.
    #[serde(default)]
    pub quiz_seed: Option<u64>,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            summary_file: default_summary_file(),
            full_day_template: default_full_day_template(),
            breakfast_template: default_breakfast_template(),
            glucose_domain: default_glucose_domain(),
            default_selection: default_selection(),
            max_selection: default_max_selection(),
            quiz_layout: default_quiz_layout(),
            result_layout: default_result_layout(),
            trend_layout: default_trend_layout(),
            scatter_layout: default_scatter_layout(),
            quiz_profiles: default_quiz_profiles(),
            quiz_seed: None,
        }
    }
}

impl StoryConfig {
    #[must_use]
    pub fn with_data_root(mut self, data_root: impl Into<PathBuf>) -> Self {
        self.data_root = data_root.into();
        self
    }

    #[must_use]
    pub fn with_quiz_seed(mut self, seed: u64) -> Self {
        self.quiz_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_default_selection<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_selection = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_quiz_profiles(mut self, profiles: Vec<QuizProfile>) -> Self {
        self.quiz_profiles = profiles;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let (min, max) = self.glucose_domain;
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ChartError::InvalidData(
                "glucose domain must be finite with min < max".to_owned(),
            ));
        }
        if self.max_selection == 0 || self.max_selection > MAX_SELECTION {
            return Err(ChartError::InvalidData(format!(
                "max selection must be within 1..={MAX_SELECTION}"
            )));
        }
        for (template, name) in [
            (&self.full_day_template, "full_day_template"),
            (&self.breakfast_template, "breakfast_template"),
        ] {
            if !template.contains("{id}") {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must contain an `{{id}}` placeholder"
                )));
            }
        }
        let mut profile_ids = HashSet::with_capacity(self.quiz_profiles.len());
        for profile in &self.quiz_profiles {
            let id = profile.id.trim();
            if id.is_empty() {
                return Err(ChartError::InvalidData(
                    "quiz profile ids must not be empty".to_owned(),
                ));
            }
            if !profile_ids.insert(id) {
                return Err(ChartError::InvalidData(format!(
                    "quiz profile `{id}` is listed more than once"
                )));
            }
        }
        for layout in [
            self.quiz_layout,
            self.result_layout,
            self.trend_layout,
            self.scatter_layout,
        ] {
            layout.plot_area()?;
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.data_root.join(&self.summary_file)
    }

    #[must_use]
    pub fn full_day_path(&self, participant: &str) -> PathBuf {
        expand(&self.data_root, &self.full_day_template, participant)
    }

    #[must_use]
    pub fn breakfast_path(&self, participant: &str) -> PathBuf {
        expand(&self.data_root, &self.breakfast_template, participant)
    }
}

fn expand(root: &Path, template: &str, participant: &str) -> PathBuf {
    root.join(template.replace("{id}", participant))
}

fn default_data_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_summary_file() -> PathBuf {
    PathBuf::from("glucose_summary.csv")
}

fn default_full_day_template() -> String {
    "data/{id}_full_day.json".to_owned()
}

fn default_breakfast_template() -> String {
    "data_breakfast/{id}_breakfast.json".to_owned()
}

fn default_glucose_domain() -> (f64, f64) {
    DEFAULT_GLUCOSE_DOMAIN
}

fn default_selection() -> Vec<String> {
    DEFAULT_SELECTION.iter().map(|id| (*id).to_owned()).collect()
}

fn default_max_selection() -> usize {
    MAX_SELECTION
}

fn default_quiz_layout() -> ChartLayout {
    ChartLayout::new(Viewport::new(1000, 500), Margin::new(60.0, 0.0, 40.0, 60.0))
}

fn default_result_layout() -> ChartLayout {
    ChartLayout::new(Viewport::new(975, 410), Margin::new(0.0, 20.0, 30.0, 50.0))
}

fn default_trend_layout() -> ChartLayout {
    ChartLayout::new(Viewport::new(900, 450), Margin::new(20.0, 40.0, 60.0, 90.0))
}

fn default_scatter_layout() -> ChartLayout {
    ChartLayout::new(Viewport::new(600, 400), Margin::new(30.0, 30.0, 50.0, 60.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_object_yields_defaults() {
        let config = StoryConfig::from_json_str("{}").expect("defaults");
        assert_eq!(config, StoryConfig::default());
    }

    #[test]
    fn paths_expand_participant_placeholder() {
        let config = StoryConfig::default().with_data_root("/srv/site");
        assert_eq!(
            config.full_day_path("04"),
            PathBuf::from("/srv/site/data/04_full_day.json")
        );
        assert_eq!(
            config.breakfast_path("14"),
            PathBuf::from("/srv/site/data_breakfast/14_breakfast.json")
        );
    }

    #[test]
    fn rejects_blank_or_repeated_quiz_profiles() {
        let mut profiles = default_quiz_profiles();
        profiles.push(profiles[0].clone());
        let err = StoryConfig::default()
            .with_quiz_profiles(profiles)
            .validate()
            .expect_err("duplicate id");
        assert!(err.to_string().contains("`01`"));

        let mut profiles = default_quiz_profiles();
        profiles[1].id = "  ".to_owned();
        assert!(
            StoryConfig::default()
                .with_quiz_profiles(profiles)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let err = StoryConfig::from_json_str(r#"{"full_day_template": "day.json"}"#)
            .expect_err("must fail");
        assert!(err.to_string().contains("full_day_template"));
    }
}
