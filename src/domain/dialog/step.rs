//! Dialog steps and their transition graph.
//!
//! The machine's position is stored explicitly on the session, but it is
//! always a pure function of the collected slots: `derive` scans the slots
//! in precedence order and returns the first one still owed. The stored
//! step and the derived step must agree after every committed transition.

use serde::{Deserialize, Serialize};

use crate::domain::candidates::SlotNamespace;
use crate::domain::foundation::StateMachine;
use crate::domain::session::{ContinuationSlot, SessionState};

/// The slot the dialog machine is collecting, or the post-question flow
/// it is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogStep {
    /// Collect the question scope (general vs. program-specific).
    #[default]
    CollectScope,

    /// Collect the student's faculty.
    CollectFaculty,

    /// Collect the student's program.
    CollectProgram,

    /// Narrow the raw utterance against the catalog's specializations.
    ResolveSpecialization,

    /// Resolve among previously narrowed specialization candidates.
    ChooseSpecialization,

    /// Collect the student's year level.
    CollectYearLevel,

    /// Collect the question topic (free-form).
    CollectTopic,

    /// Accept the free-form question and submit it for answering.
    CaptureQuestion,

    /// Speak the stored answer (or the not-found message).
    CheckAnswer,

    /// Collect the yes/no answer to "ask another question?".
    AwaitContinuation,
}

impl DialogStep {
    /// Scans the session slots in precedence order and returns the single
    /// active step. First unmet condition wins; exactly one step is active
    /// for any reachable state.
    pub fn derive(state: &SessionState) -> Self {
        if state.scope.is_none() {
            Self::CollectScope
        } else if state.faculty.is_none() {
            Self::CollectFaculty
        } else if state.program.is_none() {
            Self::CollectProgram
        } else if state.is_specific() && state.specialization.is_unset() {
            Self::ResolveSpecialization
        } else if state.specialization.is_awaiting_choice() {
            Self::ChooseSpecialization
        } else if state.is_specific() && state.year_level.is_none() {
            Self::CollectYearLevel
        } else if state.topic.is_none() {
            Self::CollectTopic
        } else if state.continuation == ContinuationSlot::AwaitingYesNo {
            Self::AwaitContinuation
        } else if state.question.is_some() {
            Self::CheckAnswer
        } else {
            Self::CaptureQuestion
        }
    }

    /// The candidate namespace this step canonicalizes against, when the
    /// step requires recognition at all.
    pub fn namespace(&self) -> Option<SlotNamespace> {
        match self {
            Self::CollectScope => Some(SlotNamespace::QuestionScope),
            Self::CollectFaculty => Some(SlotNamespace::Faculty),
            Self::CollectProgram => Some(SlotNamespace::Program),
            Self::ChooseSpecialization => Some(SlotNamespace::Specialization),
            Self::CollectYearLevel => Some(SlotNamespace::YearLevel),
            Self::AwaitContinuation => Some(SlotNamespace::YesNo),
            Self::ResolveSpecialization
            | Self::CollectTopic
            | Self::CaptureQuestion
            | Self::CheckAnswer => None,
        }
    }

    /// Returns true if the step consumes the raw utterance without
    /// recognizer resolution.
    pub fn is_free_form(&self) -> bool {
        matches!(
            self,
            Self::ResolveSpecialization | Self::CollectTopic | Self::CaptureQuestion
        )
    }
}

impl StateMachine for DialogStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogStep::*;
        matches!(
            (self, target),
            // First question: scope leads into the faculty list
            (CollectScope, CollectFaculty) |
            // Follow-up specific question with no specialization on file
            (CollectScope, ResolveSpecialization) |
            // Follow-up question with the program context already known
            (CollectScope, CollectTopic) |
            (CollectFaculty, CollectProgram) |
            (CollectProgram, CollectTopic) |
            (CollectProgram, ResolveSpecialization) |
            // Unique match skips straight to year level
            (ResolveSpecialization, CollectYearLevel) |
            // Ambiguous match defers to a narrowed follow-up choice
            (ResolveSpecialization, ChooseSpecialization) |
            (ChooseSpecialization, CollectYearLevel) |
            (CollectYearLevel, CollectTopic) |
            (CollectTopic, CaptureQuestion) |
            (CaptureQuestion, CheckAnswer) |
            (CheckAnswer, AwaitContinuation) |
            // "Yes" loops back for another question
            (AwaitContinuation, CollectScope)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogStep::*;
        match self {
            CollectScope => vec![CollectFaculty, ResolveSpecialization, CollectTopic],
            CollectFaculty => vec![CollectProgram],
            CollectProgram => vec![CollectTopic, ResolveSpecialization],
            ResolveSpecialization => vec![CollectYearLevel, ChooseSpecialization],
            ChooseSpecialization => vec![CollectYearLevel],
            CollectYearLevel => vec![CollectTopic],
            CollectTopic => vec![CaptureQuestion],
            CaptureQuestion => vec![CheckAnswer],
            CheckAnswer => vec![AwaitContinuation],
            // "No" ends the session instead of transitioning
            AwaitContinuation => vec![CollectScope],
        }
    }
}
