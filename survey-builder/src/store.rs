use std::sync::Arc;

use survey_builder_types::{
    Clock, IdGenerator, RandomIds, SurveyAction, SurveyState, SystemClock, reduce,
};

/// Holds the survey being edited and applies actions to it.
///
/// The store is an ordinary value: whoever needs to read or edit the survey
/// gets it passed in. Reading returns a shared snapshot that stays valid no
/// matter what is dispatched afterwards.
#[derive(Debug, Clone)]
pub struct SurveyStore<G = RandomIds, C = SystemClock> {
    state: Arc<SurveyState>,
    ids: G,
    clock: C,
}

impl SurveyStore {
    /// Create a new store with random ids and the system clock.
    ///
    /// The initial survey has a freshly generated id and no content.
    pub fn new() -> Self {
        Self::with_parts(RandomIds::new(), SystemClock)
    }
}

impl Default for SurveyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator, C: Clock> SurveyStore<G, C> {
    /// Create a new store drawing ids from `ids` and timestamps from `clock`.
    pub fn with_parts(mut ids: G, clock: C) -> Self {
        let state = Arc::new(SurveyState::new(ids.next_id(), clock.now()));
        Self { state, ids, clock }
    }

    /// Apply `action` to the current survey.
    ///
    /// Returns `true` if the survey changed. Actions pointing at missing
    /// questions or options leave the current snapshot in place.
    pub fn dispatch(&mut self, action: SurveyAction) -> bool {
        let name = action.name();
        let next = reduce(&self.state, action, &mut self.ids, &self.clock);
        if Arc::ptr_eq(&next, &self.state) {
            tracing::trace!(action = name, survey = %self.state.id, "action had no effect");
            return false;
        }
        self.state = next;
        tracing::debug!(
            action = name,
            survey = %self.state.id,
            questions = self.state.question_count(),
            "dispatched action"
        );
        true
    }

    /// Apply several actions in order. Returns how many changed the survey.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = SurveyAction>) -> usize {
        actions
            .into_iter()
            .map(|action| self.dispatch(action))
            .filter(|changed| *changed)
            .count()
    }

    /// The current survey.
    pub fn state(&self) -> &SurveyState {
        &self.state
    }

    /// A shared handle to the current survey snapshot.
    pub fn snapshot(&self) -> Arc<SurveyState> {
        Arc::clone(&self.state)
    }

    /// Generate a fresh id from the store's generator.
    pub fn next_id(&mut self) -> String {
        self.ids.next_id()
    }

    /// The store's clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
