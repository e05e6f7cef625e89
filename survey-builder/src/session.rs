//! The three-step builder flow around one open survey.
//!
//! A session ties a [`SurveyStore`] to a [`SnapshotRepository`]: it opens a
//! survey by id, saves on every navigation, gates forward moves between
//! steps and runs the (simulated) submission.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use survey_builder_store::{KeyValueStore, SnapshotRepository, StoreError, export_to};
use survey_builder_types::{
    Clock, IdGenerator, RandomIds, SurveyAction, SurveyState, SystemClock,
};

use crate::SurveyStore;

/// Base path of every builder route.
pub const ROUTE_BASE: &str = "/app/survey-builder";

/// Delay of the simulated submission round-trip.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_secs(1);

/// A screen of the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Details,
    Questions,
    Preview,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Details, Step::Questions, Step::Preview];

    /// 1-based position used in routes.
    pub fn number(self) -> u8 {
        match self {
            Step::Details => 1,
            Step::Questions => 2,
            Step::Preview => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Details => "Survey Details",
            Step::Questions => "Survey Questions and Answers",
            Step::Preview => "Survey Preview",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Details => Some(Step::Questions),
            Step::Questions => Some(Step::Preview),
            Step::Preview => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Details => None,
            Step::Questions => Some(Step::Details),
            Step::Preview => Some(Step::Questions),
        }
    }

    /// Route of this step for survey `id`: `/app/survey-builder/step-N/{id}`.
    pub fn route(self, id: &str) -> String {
        format!("{ROUTE_BASE}/step-{}/{id}", self.number())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Details => "details",
            Step::Questions => "questions",
            Step::Preview => "preview",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown step name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown step '{0}', expected details, questions, preview or 1-3")]
pub struct ParseStepError(String);

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "details" | "step-1" => Ok(Step::Details),
            "2" | "questions" | "step-2" => Ok(Step::Questions),
            "3" | "preview" | "step-3" => Ok(Step::Preview),
            _ => Err(ParseStepError(s.to_string())),
        }
    }
}

/// Why a forward move between steps was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("Survey needs a title and a description before moving on")]
    MissingDetails,

    #[error("Survey needs at least one question before it can be previewed")]
    NoQuestions,
}

/// How [`BuilderSession::open`] arrived at the current survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    /// No id was given; a fresh survey was started and the caller should
    /// continue at `redirect`.
    Created { redirect: String },
    /// A stored snapshot was loaded.
    Restored,
    /// Nothing usable was stored; an empty survey was started under the id.
    Reset,
    /// The survey was already open.
    Resumed,
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub success: bool,
    /// The submitted survey as compact JSON.
    pub data: String,
}

/// An open survey together with its persistence and current step.
#[derive(Debug)]
pub struct BuilderSession<S, G = RandomIds, C = SystemClock> {
    store: SurveyStore<G, C>,
    repository: SnapshotRepository<S>,
    step: Step,
    submit_delay: Duration,
}

impl<S: KeyValueStore> BuilderSession<S> {
    /// Create a new session over `store` with random ids and the system clock.
    pub fn new(store: S) -> Self {
        Self::with_store(SurveyStore::new(), store)
    }
}

impl<S: KeyValueStore, G: IdGenerator, C: Clock> BuilderSession<S, G, C> {
    /// Create a new session around an existing survey store.
    pub fn with_store(survey: SurveyStore<G, C>, store: S) -> Self {
        Self {
            store: survey,
            repository: SnapshotRepository::new(store),
            step: Step::Details,
            submit_delay: DEFAULT_SUBMIT_DELAY,
        }
    }

    /// Set the delay of the simulated submission.
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    /// Start on `step` instead of [`Step::Details`].
    pub fn with_step(mut self, step: Step) -> Self {
        self.step = step;
        self
    }

    /// Open the survey with `id`, or start a new one when `id` is `None`.
    ///
    /// A stored snapshot wins over whatever is in memory. Without one, the
    /// in-memory survey is kept if it already has this id and replaced by an
    /// empty survey otherwise.
    pub fn open(&mut self, id: Option<&str>) -> Result<Opened, StoreError> {
        let Some(id) = id else {
            let id = self.store.next_id();
            self.store.dispatch(SurveyAction::ResetWithId { id: id.into() });
            let redirect = self.route();
            tracing::info!(survey = %self.store.state().id, %redirect, "started new survey");
            return Ok(Opened::Created { redirect });
        };

        if let Some(snapshot) = self.repository.load(id)? {
            self.store.dispatch(SurveyAction::RestoreSurvey(snapshot));
            tracing::info!(survey = id, "restored survey");
            return Ok(Opened::Restored);
        }
        if self.store.state().id != id {
            self.store.dispatch(SurveyAction::ResetWithId { id: id.into() });
            tracing::info!(survey = id, "no stored survey, started empty");
            return Ok(Opened::Reset);
        }
        Ok(Opened::Resumed)
    }

    /// Apply `action` to the open survey. Returns whether it changed anything.
    pub fn dispatch(&mut self, action: SurveyAction) -> bool {
        self.store.dispatch(action)
    }

    /// Persist the survey stamped with the current time.
    pub fn try_save(&mut self) -> Result<SurveyState, StoreError> {
        let now = self.store.clock().now();
        self.repository.save(self.store.state(), now)
    }

    /// Like [`try_save`](Self::try_save), but failures are logged and
    /// otherwise ignored; the return value says whether the snapshot was
    /// written.
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(
                    survey = %self.store.state().id,
                    error = %err,
                    "could not save survey"
                );
                false
            }
        }
    }

    /// Move to `target`, saving first.
    ///
    /// Moving forward out of [`Step::Details`] needs a title and description;
    /// moving forward into [`Step::Preview`] needs at least one question.
    /// Moving back is always allowed. Returns the route of the new step.
    pub fn navigate(&mut self, target: Step) -> Result<String, NavigationError> {
        self.save();

        if target > self.step {
            let survey = self.store.state();
            if self.step == Step::Details && !survey.has_metadata() {
                return Err(NavigationError::MissingDetails);
            }
            if target == Step::Preview && survey.is_empty() {
                return Err(NavigationError::NoQuestions);
            }
        }

        let from = self.step;
        self.step = target;
        let route = self.route();
        tracing::info!(survey = %self.store.state().id, %from, to = %target, "navigated");
        Ok(route)
    }

    /// Move to the following step, if there is one.
    pub fn next(&mut self) -> Option<Result<String, NavigationError>> {
        self.step.next().map(|step| self.navigate(step))
    }

    /// Move to the preceding step, if there is one.
    pub fn back(&mut self) -> Option<Result<String, NavigationError>> {
        self.step.previous().map(|step| self.navigate(step))
    }

    /// Save, then submit the survey.
    ///
    /// Submission is simulated: it waits for the configured delay and always
    /// succeeds, echoing the survey as JSON.
    pub async fn submit(&mut self) -> Result<Submission, serde_json::Error> {
        self.save();
        let survey = self.store.snapshot();
        tracing::info!(survey = %survey.id, delay = ?self.submit_delay, "submitting survey");

        tokio::time::sleep(self.submit_delay).await;

        let data = serde_json::to_string(&*survey)?;
        tracing::info!(survey = %survey.id, bytes = data.len(), "survey submitted");
        Ok(Submission {
            success: true,
            data,
        })
    }

    /// Write the survey as a JSON document into `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        export_to(dir, self.store.state())
    }

    /// Route of the current step for the open survey.
    pub fn route(&self) -> String {
        self.step.route(self.store.state().id.as_str())
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay
    }

    /// The open survey.
    pub fn state(&self) -> &SurveyState {
        self.store.state()
    }

    pub fn store(&self) -> &SurveyStore<G, C> {
        &self.store
    }

    pub fn repository(&self) -> &SnapshotRepository<S> {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut SnapshotRepository<S> {
        &mut self.repository
    }
}
