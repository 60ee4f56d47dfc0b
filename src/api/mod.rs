//! Page state for the storytelling site.
//!
//! [`StoryState`] holds what the scripted pages kept in page-level globals
//! (the scatter selection, quiz progress, hover state) and is driven by one
//! entry point, [`StoryState::update`]. Loads are never performed here: the
//! reducer returns [`Command`]s, the host fetches, and completions come back
//! as [`Message`]s carrying the [`LoadTicket`] they were issued with.

mod chart_frame;
mod config;
mod loads;
mod quiz;
mod scatter;

use std::path::PathBuf;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::core::{SampleSeries, TrendComparison};
use crate::error::ChartResult;
use crate::interaction::{HoverState, SelectionSet};

pub use chart_frame::{ChartFrame, ScatterFrame, TrendFrame};
pub use config::{ChartLayout, StoryConfig};
pub use loads::{ChartSlot, LoadTicket, LoadTracker};
pub use quiz::{
    GlucoseLabel, QuizGuess, QuizProfile, QuizResultEntry, QuizResults, QuizState, QuizStep,
    default_quiz_profiles,
};
pub use scatter::{ScatterPoint, ScatterState};

/// Host event fed to [`StoryState::update`].
#[derive(Debug)]
pub enum Message {
    SummaryLoaded(ChartResult<Vec<crate::core::ParticipantSummary>>),
    ScatterClicked(String),
    TrendsLoaded {
        ticket: LoadTicket,
        result: ChartResult<Vec<(String, SampleSeries)>>,
    },
    DayLoaded {
        ticket: LoadTicket,
        result: ChartResult<SampleSeries>,
    },
    PointerMoved {
        chart: ChartSlot,
        x: f64,
        y: f64,
    },
    PointerLeft {
        chart: ChartSlot,
    },
    GuessSelected(GlucoseLabel),
    NextProfile,
}

/// One series file the host should fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub participant: String,
    pub path: PathBuf,
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadSummary {
        path: PathBuf,
    },
    /// Fetch all files, then reply with one `TrendsLoaded` in the same order.
    LoadTrends {
        ticket: LoadTicket,
        requests: Vec<SeriesRequest>,
    },
    LoadDay {
        ticket: LoadTicket,
        request: SeriesRequest,
    },
    ShowResults(QuizResults),
}

/// A loaded full-day chart with its own hover state.
#[derive(Debug, Clone, PartialEq)]
pub struct DayChart {
    pub participant: String,
    pub series: SampleSeries,
    pub frame: ChartFrame,
    pub hover: HoverState,
}

impl DayChart {
    pub fn new(
        participant: impl Into<String>,
        series: SampleSeries,
        layout: ChartLayout,
        glucose_domain: (f64, f64),
    ) -> ChartResult<Self> {
        let frame = ChartFrame::for_series(layout, &series, glucose_domain)?;
        Ok(Self {
            participant: participant.into(),
            series,
            frame,
            hover: HoverState::default(),
        })
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.hover.on_pointer_move(x, y);
        match self.frame.snap_at_pixel(&self.series, x) {
            Ok(snap) => self.hover.set_snap(Some(snap)),
            Err(err) => {
                debug!(error = %err, "no hover snap");
                self.hover.set_snap(None);
            }
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hover.on_pointer_leave();
    }
}

/// Whole-page state; see the module docs for the update protocol.
#[derive(Debug, Clone)]
pub struct StoryState {
    config: StoryConfig,
    scatter: ScatterState,
    scatter_frame: Option<ScatterFrame>,
    trends: Option<TrendComparison>,
    trend_frame: Option<TrendFrame>,
    quiz: QuizState,
    quiz_day: Option<DayChart>,
    results: IndexMap<String, DayChart>,
    loads: LoadTracker,
    rng: StdRng,
}

impl StoryState {
    /// Builds the initial state and the loads the first render needs.
    pub fn new(config: StoryConfig) -> ChartResult<(Self, Vec<Command>)> {
        config.validate()?;

        let mut selection = SelectionSet::with_capacity(config.max_selection);
        for id in &config.default_selection {
            selection.toggle(id);
        }
        let rng = match config.quiz_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut state = Self {
            scatter: ScatterState::new(selection),
            scatter_frame: None,
            trends: None,
            trend_frame: None,
            quiz: QuizState::new(config.quiz_profiles.clone()),
            quiz_day: None,
            results: IndexMap::new(),
            loads: LoadTracker::default(),
            rng,
            config,
        };

        let mut commands = vec![Command::LoadSummary {
            path: state.config.summary_path(),
        }];
        commands.extend(state.request_trends());
        commands.extend(state.advance_quiz());
        Ok((state, commands))
    }

    pub fn update(&mut self, message: Message) -> Vec<Command> {
        match message {
            Message::SummaryLoaded(result) => {
                match result {
                    Ok(summaries) => {
                        debug!(count = summaries.len(), "summary loaded");
                        self.scatter.set_summaries(summaries);
                        self.install_scatter_frame();
                    }
                    Err(err) => warn!(error = %err, "summary load failed; scatter stays empty"),
                }
                Vec::new()
            }
            Message::ScatterClicked(participant) => {
                let outcome = self.scatter.toggle(&participant);
                debug!(%participant, ?outcome, "scatter click");
                if outcome.changed() {
                    self.request_trends().into_iter().collect()
                } else {
                    Vec::new()
                }
            }
            Message::TrendsLoaded { ticket, result } => {
                if self.accept(&ticket) {
                    self.install_trends(result);
                }
                Vec::new()
            }
            Message::DayLoaded { ticket, result } => {
                if self.accept(&ticket) {
                    self.install_day(ticket.slot, result);
                }
                Vec::new()
            }
            Message::PointerMoved { chart, x, y } => {
                if let Some(day) = self.day_chart_mut(&chart) {
                    day.pointer_move(x, y);
                }
                Vec::new()
            }
            Message::PointerLeft { chart } => {
                if let Some(day) = self.day_chart_mut(&chart) {
                    day.pointer_leave();
                }
                Vec::new()
            }
            Message::GuessSelected(label) => {
                self.quiz.select(label);
                Vec::new()
            }
            Message::NextProfile => {
                if self.quiz.submit() {
                    self.advance_quiz()
                } else {
                    Vec::new()
                }
            }
        }
    }

    #[must_use]
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    #[must_use]
    pub fn scatter(&self) -> &ScatterState {
        &self.scatter
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        self.scatter.selection()
    }

    /// Pixel mapping of the scatter; `None` until summaries are loaded.
    #[must_use]
    pub fn scatter_frame(&self) -> Option<&ScatterFrame> {
        self.scatter_frame.as_ref()
    }

    #[must_use]
    pub fn trends(&self) -> Option<&TrendComparison> {
        self.trends.as_ref()
    }

    /// Pixel mapping of the trend overlay, present whenever [`Self::trends`] is.
    #[must_use]
    pub fn trend_frame(&self) -> Option<&TrendFrame> {
        self.trend_frame.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizState {
        &self.quiz
    }

    #[must_use]
    pub fn quiz_day(&self) -> Option<&DayChart> {
        self.quiz_day.as_ref()
    }

    #[must_use]
    pub fn result_chart(&self, participant: &str) -> Option<&DayChart> {
        self.results.get(participant)
    }

    #[must_use]
    pub fn day_chart(&self, slot: &ChartSlot) -> Option<&DayChart> {
        match slot {
            ChartSlot::QuizDay => self.quiz_day.as_ref(),
            ChartSlot::Result(participant) => self.results.get(participant),
            ChartSlot::Trends => None,
        }
    }

    #[must_use]
    pub fn loads(&self) -> &LoadTracker {
        &self.loads
    }

    fn day_chart_mut(&mut self, slot: &ChartSlot) -> Option<&mut DayChart> {
        match slot {
            ChartSlot::QuizDay => self.quiz_day.as_mut(),
            ChartSlot::Result(participant) => self.results.get_mut(participant),
            ChartSlot::Trends => None,
        }
    }

    fn accept(&self, ticket: &LoadTicket) -> bool {
        let current = self.loads.is_current(ticket);
        if !current {
            debug!(
                slot = ?ticket.slot,
                generation = ticket.generation,
                latest = self.loads.generation(&ticket.slot),
                "discarding stale load"
            );
        }
        current
    }

    /// Supersedes any in-flight trend load; `None` when nothing is selected.
    fn request_trends(&mut self) -> Option<Command> {
        let selected = self.scatter.selection().to_vec();
        if selected.is_empty() {
            self.loads.cancel(ChartSlot::Trends);
            self.trends = None;
            self.trend_frame = None;
            return None;
        }

        let ticket = self.loads.begin(ChartSlot::Trends);
        let requests = selected
            .into_iter()
            .map(|participant| SeriesRequest {
                path: self.config.breakfast_path(&participant),
                participant,
            })
            .collect();
        Some(Command::LoadTrends { ticket, requests })
    }

    fn install_trends(&mut self, result: ChartResult<Vec<(String, SampleSeries)>>) {
        let layout = self.config.trend_layout;
        let built = result.and_then(|loaded| {
            let comparison =
                TrendComparison::build(loaded.iter().map(|(id, series)| (id.as_str(), series)))?;
            let frame = TrendFrame::for_comparison(layout, &comparison)?;
            Ok((comparison, frame))
        });
        match built {
            Ok((comparison, frame)) => {
                debug!(
                    trends = comparison.trends.len(),
                    max_difference = ?comparison.max_difference,
                    "trend comparison ready"
                );
                self.trends = Some(comparison);
                self.trend_frame = Some(frame);
            }
            Err(err) => {
                warn!(error = %err, "trend load failed; comparison not rendered");
                self.trends = None;
                self.trend_frame = None;
            }
        }
    }

    fn install_scatter_frame(&mut self) {
        self.scatter_frame = match self.scatter.domains() {
            Some(domains) => match ScatterFrame::for_domains(self.config.scatter_layout, domains) {
                Ok(frame) => Some(frame),
                Err(err) => {
                    warn!(error = %err, "scatter axes not built");
                    None
                }
            },
            None => None,
        };
    }

    fn install_day(&mut self, slot: ChartSlot, result: ChartResult<SampleSeries>) {
        let (participant, layout) = match &slot {
            ChartSlot::QuizDay => match self.quiz.current() {
                Some(profile) => (profile.id.clone(), self.config.quiz_layout),
                None => return,
            },
            ChartSlot::Result(participant) => (participant.clone(), self.config.result_layout),
            ChartSlot::Trends => return,
        };

        let chart = result.and_then(|series| {
            DayChart::new(
                participant.as_str(),
                series,
                layout,
                self.config.glucose_domain,
            )
        });
        let chart = match chart {
            Ok(chart) => Some(chart),
            Err(err) => {
                warn!(%participant, error = %err, "day chart not rendered");
                None
            }
        };

        match slot {
            ChartSlot::QuizDay => self.quiz_day = chart,
            ChartSlot::Result(participant) => match chart {
                Some(chart) => {
                    self.results.insert(participant, chart);
                }
                None => {
                    self.results.shift_remove(&participant);
                }
            },
            ChartSlot::Trends => {}
        }
    }

    fn advance_quiz(&mut self) -> Vec<Command> {
        match self.quiz.advance(&mut self.rng) {
            QuizStep::Presenting(profile) => {
                self.quiz_day = None;
                let ticket = self.loads.begin(ChartSlot::QuizDay);
                vec![Command::LoadDay {
                    ticket,
                    request: SeriesRequest {
                        path: self.config.full_day_path(&profile.id),
                        participant: profile.id,
                    },
                }]
            }
            QuizStep::Finished => {
                self.quiz_day = None;
                self.loads.cancel(ChartSlot::QuizDay);
                let results = self.quiz.results();
                let mut commands: Vec<Command> = results
                    .entries
                    .iter()
                    .map(|entry| Command::LoadDay {
                        ticket: self.loads.begin(ChartSlot::Result(entry.id.clone())),
                        request: SeriesRequest {
                            participant: entry.id.clone(),
                            path: self.config.full_day_path(&entry.id),
                        },
                    })
                    .collect();
                commands.insert(0, Command::ShowResults(results));
                commands
            }
        }
    }
}
