//! The survey reducer: `(state, action) -> state`.
//!
//! The reducer never fails. Actions that point at a missing question or
//! option, or at an index outside the question list, return the incoming
//! `Arc` untouched, so callers can detect a no-op with [`Arc::ptr_eq`].
//! Everything else produces a new state; the previous one is never mutated
//! while someone else still holds it.

use std::sync::Arc;

use crate::{Clock, IdGenerator, Question, QuestionOption, SurveyAction, SurveyState};

/// Apply `action` to `state`.
///
/// `ids` supplies identifiers for new surveys, questions and options;
/// `clock` supplies `createdAt` for `reset` and `resetWithId`.
pub fn reduce(
    state: &Arc<SurveyState>,
    action: SurveyAction,
    ids: &mut impl IdGenerator,
    clock: &impl Clock,
) -> Arc<SurveyState> {
    match action {
        SurveyAction::UpdateMetadata { title, description } => {
            if title.is_none() && description.is_none() {
                return Arc::clone(state);
            }
            edit(state, |survey| {
                if let Some(title) = title {
                    survey.title = title;
                }
                if let Some(description) = description {
                    survey.description = description;
                }
            })
        }

        SurveyAction::AddQuestion { kind, text } => {
            let question = Question::seeded(kind, text.unwrap_or_default(), ids);
            edit(state, |survey| survey.questions.push(question))
        }

        SurveyAction::DeleteQuestion { question_id } => {
            let Some(index) = state.question_index(question_id.as_str()) else {
                return Arc::clone(state);
            };
            edit(state, |survey| {
                survey.questions.remove(index);
            })
        }

        SurveyAction::UpdateQuestion {
            question_id,
            text,
            kind,
        } => {
            let Some(index) = state.question_index(question_id.as_str()) else {
                return Arc::clone(state);
            };
            edit(state, |survey| {
                let question = &mut survey.questions[index];
                question.set_text(text);
                if let Some(kind) = kind
                    && kind != question.kind()
                {
                    question.change_kind(kind, ids);
                }
            })
        }

        SurveyAction::DuplicateQuestion { question_id } => {
            let Some(index) = state.question_index(question_id.as_str()) else {
                return Arc::clone(state);
            };
            let copy = state.questions[index].duplicate(ids);
            edit(state, |survey| survey.questions.insert(index + 1, copy))
        }

        SurveyAction::ReorderQuestions {
            from_index,
            to_index,
        } => {
            let len = state.questions.len();
            if from_index >= len || to_index >= len {
                return Arc::clone(state);
            }
            edit(state, |survey| {
                move_item(&mut survey.questions, from_index, to_index)
            })
        }

        SurveyAction::AddOption { question_id } => {
            let Some(index) = state.question_index(question_id.as_str()) else {
                return Arc::clone(state);
            };
            let option = QuestionOption::blank(ids);
            edit(state, |survey| {
                survey.questions[index].options_mut().push(option)
            })
        }

        SurveyAction::UpdateOption {
            question_id,
            option_id,
            text,
        } => {
            let Some((q, o)) = locate_option(state, question_id.as_str(), option_id.as_str())
            else {
                return Arc::clone(state);
            };
            edit(state, |survey| {
                survey.questions[q].options_mut()[o].set_text(text)
            })
        }

        SurveyAction::DeleteOption {
            question_id,
            option_id,
        } => {
            let Some((q, o)) = locate_option(state, question_id.as_str(), option_id.as_str())
            else {
                return Arc::clone(state);
            };
            edit(state, |survey| {
                survey.questions[q].options_mut().remove(o);
            })
        }

        SurveyAction::ReorderOptions {
            question_id,
            from_index,
            to_index,
        } => {
            let Some(index) = state.question_index(question_id.as_str()) else {
                return Arc::clone(state);
            };
            // Only the source index must exist; the target is clamped to the end.
            if from_index >= state.questions[index].options().len() {
                return Arc::clone(state);
            }
            edit(state, |survey| {
                let options = survey.questions[index].options_mut();
                let to_index = to_index.min(options.len() - 1);
                move_item(options, from_index, to_index)
            })
        }

        SurveyAction::Reset => Arc::new(SurveyState::new(ids.next_id(), clock.now())),

        SurveyAction::ResetWithId { id } => Arc::new(SurveyState::new(id, clock.now())),

        SurveyAction::RestoreSurvey(snapshot) => Arc::new(snapshot),
    }
}

/// Copy-on-write edit: clones the survey only if the old state is still shared.
fn edit(state: &Arc<SurveyState>, f: impl FnOnce(&mut SurveyState)) -> Arc<SurveyState> {
    let mut next = Arc::clone(state);
    f(Arc::make_mut(&mut next));
    next
}

fn locate_option(
    state: &SurveyState,
    question_id: &str,
    option_id: &str,
) -> Option<(usize, usize)> {
    let q = state.question_index(question_id)?;
    let o = state.questions[q].option_index(option_id)?;
    Some((q, o))
}

/// Remove the element at `from`, then insert it at `to` in the shortened list.
///
/// Both indices must be in bounds for the original list.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{FixedClock, QuestionType, SequentialIds};

    struct Harness {
        ids: SequentialIds,
        clock: FixedClock,
        state: Arc<SurveyState>,
    }

    impl Harness {
        fn new() -> Self {
            let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
            Self {
                ids: SequentialIds::new("id"),
                clock,
                state: Arc::new(SurveyState::new("survey", clock.now())),
            }
        }

        fn apply(&mut self, action: SurveyAction) -> &SurveyState {
            self.state = reduce(&self.state, action, &mut self.ids, &self.clock);
            &self.state
        }

        fn apply_unchanged(&mut self, action: SurveyAction) {
            let next = reduce(&self.state, action, &mut self.ids, &self.clock);
            assert!(Arc::ptr_eq(&next, &self.state), "expected a no-op");
        }

        fn question(&self, index: usize) -> &Question {
            &self.state.questions[index]
        }

        fn option_texts(&self, index: usize) -> Vec<&str> {
            self.question(index)
                .options()
                .iter()
                .map(|o| o.text())
                .collect()
        }

        fn name_options(&mut self, index: usize, names: &[&str]) {
            let qid = self.question(index).id().clone();
            let oids: Vec<_> = self
                .question(index)
                .options()
                .iter()
                .map(|o| o.id().clone())
                .collect();
            for (oid, name) in oids.into_iter().zip(names) {
                self.apply(SurveyAction::update_option(qid.clone(), oid, *name));
            }
        }
    }

    #[test]
    fn update_metadata_merges_fields() {
        let mut h = Harness::new();
        h.apply(SurveyAction::set_title("Lunch"));
        h.apply(SurveyAction::set_description("Where do we eat?"));
        assert_eq!(h.state.title, "Lunch");
        assert_eq!(h.state.description, "Where do we eat?");

        h.apply(SurveyAction::UpdateMetadata {
            title: Some(String::new()),
            description: None,
        });
        assert_eq!(h.state.title, "");
        assert_eq!(h.state.description, "Where do we eat?");
    }

    #[test]
    fn add_question_seeds_options_by_type() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::SingleChoice, "A"));
        h.apply(SurveyAction::add_question(QuestionType::MultipleChoice, "B"));
        h.apply(SurveyAction::AddQuestion {
            kind: QuestionType::TextInput,
            text: None,
        });

        assert_eq!(h.question(0).options().len(), 1);
        assert_eq!(h.question(1).options().len(), 1);
        assert!(h.question(2).options().is_empty());
        assert_eq!(h.question(2).text(), "");
    }

    #[test]
    fn delete_question_removes_only_the_match() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::TextInput, "A"));
        h.apply(SurveyAction::add_question(QuestionType::TextInput, "B"));
        let first = h.question(0).id().clone();

        h.apply(SurveyAction::delete_question(first.clone()));
        assert_eq!(h.state.question_count(), 1);
        assert_eq!(h.question(0).text(), "B");

        h.apply_unchanged(SurveyAction::delete_question(first));
    }

    #[test]
    fn update_question_text_only_keeps_options() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::SingleChoice, "A"));
        let qid = h.question(0).id().clone();
        let before = h.question(0).options().to_vec();

        h.apply(SurveyAction::UpdateQuestion {
            question_id: qid.clone(),
            text: "Renamed".into(),
            kind: Some(QuestionType::SingleChoice),
        });
        assert_eq!(h.question(0).text(), "Renamed");
        assert_eq!(h.question(0).options(), before.as_slice());
    }

    #[test]
    fn update_question_type_transitions() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::SingleChoice, "A"));
        let qid = h.question(0).id().clone();
        h.apply(SurveyAction::add_option(qid.clone()));
        h.name_options(0, &["x", "y"]);

        // Choice to choice keeps the options.
        h.apply(SurveyAction::UpdateQuestion {
            question_id: qid.clone(),
            text: "A".into(),
            kind: Some(QuestionType::MultipleChoice),
        });
        assert_eq!(h.option_texts(0), ["x", "y"]);

        // Choice to text clears them.
        h.apply(SurveyAction::UpdateQuestion {
            question_id: qid.clone(),
            text: "A".into(),
            kind: Some(QuestionType::TextInput),
        });
        assert_eq!(h.question(0).kind(), QuestionType::TextInput);
        assert!(h.question(0).options().is_empty());

        // Text to choice seeds one blank option.
        h.apply(SurveyAction::UpdateQuestion {
            question_id: qid,
            text: "A".into(),
            kind: Some(QuestionType::SingleChoice),
        });
        assert_eq!(h.option_texts(0), [""]);
    }

    #[test]
    fn update_question_on_missing_id_is_a_no_op() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::SingleChoice, "A"));
        h.apply_unchanged(SurveyAction::UpdateQuestion {
            question_id: "missing".into(),
            text: "B".into(),
            kind: Some(QuestionType::TextInput),
        });
    }

    #[test]
    fn duplicate_question_inserts_fresh_copy_after_source() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::MultipleChoice, "A"));
        h.apply(SurveyAction::add_question(QuestionType::TextInput, "B"));
        let qid = h.question(0).id().clone();
        h.apply(SurveyAction::add_option(qid.clone()));
        h.name_options(0, &["x", "y"]);

        h.apply(SurveyAction::duplicate_question(qid));
        assert_eq!(h.state.question_count(), 3);

        let (source, copy) = (h.question(0), h.question(1));
        assert_ne!(source.id(), copy.id());
        assert_eq!(source.text(), copy.text());
        assert_eq!(source.kind(), copy.kind());
        for (a, b) in source.options().iter().zip(copy.options()) {
            assert_ne!(a.id(), b.id());
            assert_eq!(a.text(), b.text());
        }
        assert_eq!(h.question(2).text(), "B");

        h.apply_unchanged(SurveyAction::duplicate_question("missing"));
    }

    #[test]
    fn reorder_questions_moves_and_validates_bounds() {
        let mut h = Harness::new();
        for text in ["A", "B", "C"] {
            h.apply(SurveyAction::add_question(QuestionType::TextInput, text));
        }

        h.apply(SurveyAction::ReorderQuestions {
            from_index: 0,
            to_index: 2,
        });
        let texts: Vec<_> = h.state.questions.iter().map(|q| q.text()).collect();
        assert_eq!(texts, ["B", "C", "A"]);

        h.apply_unchanged(SurveyAction::ReorderQuestions {
            from_index: 3,
            to_index: 0,
        });
        h.apply_unchanged(SurveyAction::ReorderQuestions {
            from_index: 0,
            to_index: 3,
        });
    }

    #[test]
    fn option_actions_on_missing_ids_are_no_ops() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::SingleChoice, "A"));
        let qid = h.question(0).id().clone();

        h.apply_unchanged(SurveyAction::add_option("missing"));
        h.apply_unchanged(SurveyAction::update_option(qid.clone(), "missing", "x"));
        h.apply_unchanged(SurveyAction::update_option("missing", "missing", "x"));
        h.apply_unchanged(SurveyAction::delete_option(qid.clone(), "missing"));
        h.apply_unchanged(SurveyAction::reorder_options("missing", 0, 0));
        h.apply_unchanged(SurveyAction::reorder_options(qid, 5, 0));
    }

    #[test]
    fn delete_option_can_empty_a_choice_question() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::SingleChoice, "A"));
        let qid = h.question(0).id().clone();
        let oid = h.question(0).options()[0].id().clone();

        h.apply(SurveyAction::delete_option(qid.clone(), oid.clone()));
        assert!(h.question(0).options().is_empty());
        assert_eq!(h.question(0).kind(), QuestionType::SingleChoice);

        h.apply_unchanged(SurveyAction::delete_option(qid, oid));
    }

    #[test]
    fn reorder_options_clamps_target_to_end() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::SingleChoice, "A"));
        let qid = h.question(0).id().clone();
        h.apply(SurveyAction::add_option(qid.clone()));
        h.apply(SurveyAction::add_option(qid.clone()));
        h.name_options(0, &["x", "y", "z"]);

        h.apply(SurveyAction::reorder_options(qid.clone(), 0, 99));
        assert_eq!(h.option_texts(0), ["y", "z", "x"]);

        h.apply(SurveyAction::reorder_options(qid, 2, 0));
        assert_eq!(h.option_texts(0), ["x", "y", "z"]);
    }

    #[test]
    fn reset_variants_start_fresh() {
        let mut h = Harness::new();
        h.apply(SurveyAction::set_title("Old"));
        h.apply(SurveyAction::add_question(QuestionType::TextInput, "A"));

        h.apply(SurveyAction::Reset);
        assert_ne!(h.state.id, "survey");
        assert!(h.state.title.is_empty());
        assert!(h.state.is_empty());
        assert_eq!(h.state.created_at, Some(h.clock.now()));

        h.apply(SurveyAction::ResetWithId { id: "chosen".into() });
        assert_eq!(h.state.id, "chosen");
        assert!(h.state.updated_at.is_none());
    }

    #[test]
    fn restore_replaces_everything() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::TextInput, "A"));
        let mut snapshot = SurveyState::new("other", h.clock.now());
        snapshot.title = "Restored".into();

        h.apply(SurveyAction::RestoreSurvey(snapshot.clone()));
        assert_eq!(*h.state, snapshot);
    }

    #[test]
    fn previous_state_is_left_untouched() {
        let mut h = Harness::new();
        h.apply(SurveyAction::add_question(QuestionType::SingleChoice, "A"));
        let before = Arc::clone(&h.state);
        let qid = h.question(0).id().clone();

        h.apply(SurveyAction::add_option(qid));
        assert_eq!(before.questions[0].options().len(), 1);
        assert_eq!(h.question(0).options().len(), 2);
    }
}
