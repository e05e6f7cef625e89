use chrono::{DateTime, Utc};
use survey_builder_types::{SurveyId, SurveyState};

use crate::{KeyValueStore, StoreError};

/// Prefix of every key holding a survey snapshot.
pub const KEY_PREFIX: &str = "survey-";

/// Storage key for a survey id: `survey-<id>`.
pub fn snapshot_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// One line of a stored-survey listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub id: SurveyId,
    pub title: String,
    pub question_count: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&SurveyState> for SnapshotSummary {
    fn from(survey: &SurveyState) -> Self {
        Self {
            id: survey.id.clone(),
            title: survey.title.clone(),
            question_count: survey.question_count(),
            updated_at: survey.updated_at,
        }
    }
}

/// Saves and restores survey snapshots in a [`KeyValueStore`].
///
/// A snapshot is the survey serialized as JSON under `survey-<id>`, with
/// `updatedAt` set to the time of the save.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SnapshotRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a mutable reference to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the repository, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Store `survey` stamped with `updatedAt = now`. Returns the stamped snapshot.
    pub fn save(
        &mut self,
        survey: &SurveyState,
        now: DateTime<Utc>,
    ) -> Result<SurveyState, StoreError> {
        let snapshot = survey.stamped(now);
        let json = serde_json::to_string(&snapshot)?;
        self.store.set(&snapshot_key(snapshot.id.as_str()), &json)?;
        tracing::debug!(
            survey = %snapshot.id,
            questions = snapshot.question_count(),
            bytes = json.len(),
            "saved snapshot"
        );
        Ok(snapshot)
    }

    /// Load the snapshot for `id`.
    ///
    /// Returns `Ok(None)` when nothing is stored or the stored text is not a
    /// valid survey; only failures of the store itself are errors.
    pub fn load(&self, id: &str) -> Result<Option<SurveyState>, StoreError> {
        let Some(text) = self.store.get(&snapshot_key(id))? else {
            tracing::debug!(survey = id, "no snapshot stored");
            return Ok(None);
        };
        match serde_json::from_str::<SurveyState>(&text) {
            Ok(survey) => {
                tracing::debug!(survey = id, "loaded snapshot");
                Ok(Some(survey))
            }
            Err(err) => {
                tracing::warn!(survey = id, error = %err, "ignoring unreadable snapshot");
                Ok(None)
            }
        }
    }

    /// Delete the snapshot for `id`. Returns whether one existed.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.store.remove(&snapshot_key(id))?;
        tracing::debug!(survey = id, removed, "removed snapshot");
        Ok(removed)
    }

    /// Summaries of every readable snapshot, most recently saved first.
    pub fn list(&self) -> Result<Vec<SnapshotSummary>, StoreError> {
        let mut summaries = Vec::new();
        for key in self.store.keys()? {
            let Some(id) = key.strip_prefix(KEY_PREFIX) else {
                continue;
            };
            if let Some(survey) = self.load(id)? {
                summaries.push(SnapshotSummary::from(&survey));
            }
        }
        summaries.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use survey_builder_types::{Question, QuestionType};

    use super::*;
    use crate::MemoryStore;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, hour, 0, 0).unwrap()
    }

    fn survey(id: &str) -> SurveyState {
        let mut survey = SurveyState::new(id, at(8));
        survey.title = format!("Survey {id}");
        survey.questions.push(Question::new(
            "q1",
            QuestionType::TextInput,
            "Comments",
            Vec::new(),
        ));
        survey
    }

    #[test]
    fn save_stamps_updated_at_under_prefixed_key() {
        let mut repo = SnapshotRepository::new(MemoryStore::new());
        let saved = repo.save(&survey("abc"), at(9)).unwrap();
        assert_eq!(saved.updated_at, Some(at(9)));

        let raw = repo.store().get("survey-abc").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["updatedAt"], "2024-02-01T09:00:00Z");
        assert_eq!(json["createdAt"], "2024-02-01T08:00:00Z");
    }

    #[test]
    fn load_round_trips_saved_snapshot() {
        let mut repo = SnapshotRepository::new(MemoryStore::new());
        let saved = repo.save(&survey("abc"), at(9)).unwrap();
        assert_eq!(repo.load("abc").unwrap(), Some(saved));
        assert_eq!(repo.load("other").unwrap(), None);
    }

    #[test]
    fn malformed_snapshot_loads_as_nothing() {
        let mut store = MemoryStore::new();
        store.set("survey-broken", "{not json").unwrap();
        store.set("survey-wrong-shape", "{\"title\": 3}").unwrap();
        let repo = SnapshotRepository::new(store);

        assert_eq!(repo.load("broken").unwrap(), None);
        assert_eq!(repo.load("wrong-shape").unwrap(), None);
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn remove_deletes_snapshot() {
        let mut repo = SnapshotRepository::new(MemoryStore::new());
        repo.save(&survey("abc"), at(9)).unwrap();
        assert!(repo.remove("abc").unwrap());
        assert!(!repo.remove("abc").unwrap());
        assert_eq!(repo.load("abc").unwrap(), None);
    }

    #[test]
    fn list_orders_by_latest_save_and_skips_foreign_keys() {
        let mut repo = SnapshotRepository::new(MemoryStore::new());
        repo.save(&survey("old"), at(9)).unwrap();
        repo.save(&survey("new"), at(11)).unwrap();
        repo.store_mut().set("token", "secret").unwrap();

        let listed = repo.list().unwrap();
        let ids: Vec<_> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
        assert_eq!(listed[0].title, "Survey new");
        assert_eq!(listed[0].question_count, 1);
        assert_eq!(listed[0].updated_at, Some(at(11)));
    }
}
