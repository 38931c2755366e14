//! Dialog Service - the per-turn orchestrator.
//!
//! Each turn loads the session, dispatches on the stored dialog step,
//! canonicalizes the input, and either commits the transition (persisting
//! the mutated state and emitting candidate directives) or holds the slot
//! unchanged for a re-prompt. A turn commits all of its state changes or
//! none; the only exception is the question pipeline, which commits the
//! question before the long answer lookup so a failed lookup still leaves
//! a retryable "check answer" state behind.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::candidates::{builtin, canonicalize, RecognizedInput, SlotNamespace};
use crate::domain::dialog::{
    check_answer, continuation, faculty as faculty_prompts, failure, launch,
    program as program_prompts, question as question_prompts, scope as scope_prompts,
    narrow, specialization_prompts, topic as topic_prompts, year_level as year_prompts,
    AckDirective, DialogStep, MatchOutcome, TurnRequest, TurnResponse,
};
use crate::domain::foundation::{SessionId, StateMachine, ValidationError};
use crate::domain::session::{ContinuationSlot, QuestionScope, SessionState, SpecializationSlot};
use crate::ports::{
    AnswerQuery, CatalogClient, CatalogError, ProgressNotifier, SessionStore, StoreError,
};

/// Fatal engine failures.
///
/// User-recoverable situations (recognition misses, catalog outages) are
/// spoken back as prompts instead; these errors mean the turn itself could
/// not be served.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A turn arrived for a session that was never launched.
    #[error("session {0} was never launched")]
    SessionNotFound(SessionId),

    /// Session storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A slot the current step depends on was not initialized first.
    #[error("dialog contract violated: {0}")]
    Contract(String),

    /// A handler produced a step change the transition graph forbids.
    #[error(transparent)]
    Transition(#[from] ValidationError),
}

impl EngineError {
    fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }
}

/// How a handler's turn ended.
enum TurnOutcome {
    /// Persist the mutated state, then respond.
    Commit(TurnResponse),
    /// Discard the mutated state and re-prompt the same slot.
    Hold(TurnResponse),
    /// The handler persisted what it needed itself.
    Done(TurnResponse),
    /// Discard the session and say goodbye.
    End(TurnResponse),
}

/// The dialog engine's application service.
pub struct DialogService {
    catalog: Arc<dyn CatalogClient>,
    notifier: Arc<dyn ProgressNotifier>,
    store: Arc<dyn SessionStore>,
}

impl DialogService {
    /// Wires the service to its collaborators.
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        notifier: Arc<dyn ProgressNotifier>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            catalog,
            notifier,
            store,
        }
    }

    /// Launches a session: initializes every slot and installs the
    /// question-scope candidates.
    pub async fn launch(&self, session_id: &SessionId) -> Result<TurnResponse, EngineError> {
        let mut state = SessionState::new();
        let directives = state
            .candidates
            .replace(SlotNamespace::QuestionScope, builtin::question_scope());
        self.store.save(session_id, &state).await?;
        info!(%session_id, "session launched");

        Ok(TurnResponse::prompt(launch::SPEECH)
            .with_reprompt(launch::REPROMPT)
            .with_directives(directives))
    }

    /// Serves one turn.
    pub async fn handle_turn(
        &self,
        session_id: &SessionId,
        request: &TurnRequest,
    ) -> Result<TurnResponse, EngineError> {
        let Some(mut state) = self.store.load(session_id).await? else {
            return Err(EngineError::SessionNotFound(*session_id));
        };
        let step = state.step;
        debug!(%session_id, ?step, raw = %request.input.raw, "turn received");

        let outcome = match step {
            DialogStep::CollectScope => self.collect_scope(&mut state, request).await?,
            DialogStep::CollectFaculty => self.collect_faculty(&mut state, request).await?,
            DialogStep::CollectProgram => self.collect_program(&mut state, request)?,
            DialogStep::ResolveSpecialization => {
                self.resolve_specialization(&mut state, request).await?
            }
            DialogStep::ChooseSpecialization => self.choose_specialization(&mut state, request)?,
            DialogStep::CollectYearLevel => self.collect_year_level(&mut state, request)?,
            DialogStep::CollectTopic => self.collect_topic(&mut state, request)?,
            DialogStep::CaptureQuestion => {
                self.capture_question(session_id, &mut state, request).await?
            }
            DialogStep::CheckAnswer => self.check_answer(&mut state)?,
            DialogStep::AwaitContinuation => self.await_continuation(&mut state, request)?,
        };

        match outcome {
            TurnOutcome::Commit(response) => {
                debug_assert_eq!(
                    state.step,
                    DialogStep::derive(&state),
                    "stored step diverged from slot precedence"
                );
                state.touch();
                self.store.save(session_id, &state).await?;
                Ok(response)
            }
            TurnOutcome::Hold(response) | TurnOutcome::Done(response) => Ok(response),
            TurnOutcome::End(response) => {
                self.store.remove(session_id).await?;
                info!(%session_id, "session ended");
                Ok(response)
            }
        }
    }

    /// Canonicalizes recognition-step input against the step's active list.
    fn resolve(
        &self,
        state: &SessionState,
        step: DialogStep,
        input: &RecognizedInput,
    ) -> Option<String> {
        let namespace = step.namespace()?;
        let candidates = state.candidates.active(namespace)?;
        canonicalize(input, candidates)
    }

    /// Turns a catalog failure into the spoken apology for a held turn.
    fn catalog_apology(failure_context: &str, err: &CatalogError) -> TurnResponse {
        error!(context = failure_context, error = %err, "catalog request failed");
        TurnResponse::prompt(failure::SERVICE_UNAVAILABLE)
    }

    async fn collect_scope(
        &self,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let resolved = self
            .resolve(state, DialogStep::CollectScope, &request.input)
            .and_then(|canonical| canonical.parse::<QuestionScope>().ok());
        let Some(scope) = resolved else {
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(scope_prompts::ASK_AGAIN)));
        };
        state.scope = Some(scope);

        if state.is_first_question() {
            let faculties = match self.catalog.faculties().await {
                Ok(names) => names,
                Err(err) => return Ok(TurnOutcome::Hold(Self::catalog_apology("faculties", &err))),
            };
            if faculties.is_empty() {
                warn!("catalog returned no faculties");
                return Ok(TurnOutcome::Hold(TurnResponse::prompt(failure::NO_OPTIONS)));
            }

            let directives = state
                .candidates
                .swap(SlotNamespace::Faculty, builtin::faculty_candidates(&faculties));
            state.step = state.step.transition_to(DialogStep::CollectFaculty)?;
            return Ok(TurnOutcome::Commit(
                TurnResponse::prompt(scope_prompts::FIRST_QUESTION).with_directives(directives),
            ));
        }

        // Re-entry paths: the faculty and program are already on file from
        // an earlier question in this session.
        let directives = state.candidates.clear_all();
        if state.is_specific()
            && state.specialization.is_unset()
            && state.year_level.is_none()
            && state.topic.is_none()
        {
            state.step = state.step.transition_to(DialogStep::ResolveSpecialization)?;
            Ok(TurnOutcome::Commit(
                TurnResponse::prompt(scope_prompts::FIRST_SPECIFIC_QUESTION)
                    .with_directives(directives),
            ))
        } else {
            state.step = state.step.transition_to(DialogStep::CollectTopic)?;
            Ok(TurnOutcome::Commit(
                TurnResponse::prompt(scope_prompts::NEXT_TOPIC).with_directives(directives),
            ))
        }
    }

    async fn collect_faculty(
        &self,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let Some(faculty) = self.resolve(state, DialogStep::CollectFaculty, &request.input) else {
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(faculty_prompts::ASK_AGAIN)));
        };

        let programs = match self.catalog.programs(&faculty).await {
            Ok(names) => names,
            Err(err) => return Ok(TurnOutcome::Hold(Self::catalog_apology("programs", &err))),
        };
        if programs.is_empty() {
            warn!(%faculty, "catalog returned no programs");
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(failure::NO_OPTIONS)));
        }

        state.faculty = Some(faculty.clone());
        let directives = state
            .candidates
            .swap(SlotNamespace::Program, builtin::program_candidates(&programs));
        state.step = state.step.transition_to(DialogStep::CollectProgram)?;

        Ok(TurnOutcome::Commit(
            TurnResponse::prompt(faculty_prompts::confirmed(&faculty))
                .with_reprompt(faculty_prompts::REPROMPT)
                .with_directives(directives),
        ))
    }

    fn collect_program(
        &self,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let Some(program) = self.resolve(state, DialogStep::CollectProgram, &request.input) else {
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(program_prompts::ASK_AGAIN)));
        };

        state.program = Some(program.clone());
        let directives = state.candidates.clear_all();

        if state.is_specific() {
            state.step = state.step.transition_to(DialogStep::ResolveSpecialization)?;
            Ok(TurnOutcome::Commit(
                TurnResponse::prompt(program_prompts::confirmed_specific(&program))
                    .with_directives(directives),
            ))
        } else {
            state.step = state.step.transition_to(DialogStep::CollectTopic)?;
            Ok(TurnOutcome::Commit(
                TurnResponse::prompt(program_prompts::confirmed_general(&program))
                    .with_directives(directives),
            ))
        }
    }

    async fn resolve_specialization(
        &self,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let (Some(faculty), Some(program)) = (state.faculty.clone(), state.program.clone()) else {
            return Err(EngineError::contract(
                "specialization resolution requires faculty and program",
            ));
        };

        let names = match self.catalog.specializations(&faculty, &program).await {
            Ok(names) => names,
            Err(err) => {
                return Ok(TurnOutcome::Hold(Self::catalog_apology("specializations", &err)))
            }
        };

        match narrow(&names, &request.input.raw) {
            MatchOutcome::None => Ok(TurnOutcome::Hold(TurnResponse::prompt(
                specialization_prompts::ASK_AGAIN,
            ))),
            MatchOutcome::Unique(candidate) => {
                let value = candidate.canonical;
                state.specialization = SpecializationSlot::Loaded {
                    value: value.clone(),
                };
                let directives = state
                    .candidates
                    .swap(SlotNamespace::YearLevel, builtin::year_level());
                state.step = state.step.transition_to(DialogStep::CollectYearLevel)?;
                Ok(TurnOutcome::Commit(
                    TurnResponse::prompt(specialization_prompts::confirmed(&value))
                        .with_directives(directives),
                ))
            }
            MatchOutcome::Ambiguous(matches) => {
                debug!(count = matches.len(), "specialization narrowed to several candidates");
                let directives = state
                    .candidates
                    .swap(SlotNamespace::Specialization, matches.clone());
                state.specialization = SpecializationSlot::AwaitingChoice { candidates: matches };
                state.step = state.step.transition_to(DialogStep::ChooseSpecialization)?;
                Ok(TurnOutcome::Commit(
                    TurnResponse::prompt(specialization_prompts::CHOOSE)
                        .with_directives(directives),
                ))
            }
        }
    }

    fn choose_specialization(
        &self,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let Some(choice) = self.resolve(state, DialogStep::ChooseSpecialization, &request.input)
        else {
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(
                specialization_prompts::CHOICE_ASK_AGAIN,
            )));
        };

        state.specialization = SpecializationSlot::Loaded {
            value: choice.clone(),
        };
        let directives = state
            .candidates
            .swap(SlotNamespace::YearLevel, builtin::year_level());
        state.step = state.step.transition_to(DialogStep::CollectYearLevel)?;

        Ok(TurnOutcome::Commit(
            TurnResponse::prompt(specialization_prompts::choice_confirmed(&choice))
                .with_reprompt(year_prompts::REPROMPT)
                .with_directives(directives),
        ))
    }

    fn collect_year_level(
        &self,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let Some(year) = self.resolve(state, DialogStep::CollectYearLevel, &request.input) else {
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(year_prompts::ASK_AGAIN)));
        };

        state.year_level = Some(year.clone());
        let directives = state.candidates.clear_all();
        state.step = state.step.transition_to(DialogStep::CollectTopic)?;

        Ok(TurnOutcome::Commit(
            TurnResponse::prompt(year_prompts::confirmed(&year)).with_directives(directives),
        ))
    }

    fn collect_topic(
        &self,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let topic = request.input.raw.trim();
        if topic.is_empty() {
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(scope_prompts::NEXT_TOPIC)));
        }

        state.topic = Some(topic.to_string());
        state.step = state.step.transition_to(DialogStep::CaptureQuestion)?;

        Ok(TurnOutcome::Commit(TurnResponse::prompt(topic_prompts::confirmed(topic))))
    }

    async fn capture_question(
        &self,
        session_id: &SessionId,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let question = request.input.raw.trim();
        if question.is_empty() {
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(question_prompts::ASK)));
        }

        let (Some(faculty), Some(program), Some(topic)) = (
            state.faculty.clone(),
            state.program.clone(),
            state.topic.clone(),
        ) else {
            return Err(EngineError::contract(
                "question submission requires faculty, program, and topic",
            ));
        };

        // Phase 1: commit the question before the long lookup, so a failed
        // lookup still leaves a retryable check-answer state behind.
        state.question = Some(question.to_string());
        state.step = state.step.transition_to(DialogStep::CheckAnswer)?;
        state.touch();
        self.store.save(session_id, state).await?;

        let ack = AckDirective::new(request.request_id.clone(), question_prompts::ACKNOWLEDGMENT);
        if let Err(err) = self.notifier.notify(&ack).await {
            // Fire-and-forget: the turn proceeds without the acknowledgment.
            warn!(error = %err, "acknowledgment delivery failed");
        }

        let mut query = AnswerQuery::new(faculty, program, topic, question);
        if state.is_specific() {
            query = query
                .with_specialization(state.specialization.loaded().unwrap_or_default())
                .with_year(state.year_level.clone().unwrap_or_default());
        }

        match self.catalog.submit_question(&query).await {
            Ok(reply) => {
                state.answer = reply.answer().map(str::to_string);
                state.touch();
                self.store.save(session_id, state).await?;
                info!(answered = state.answer.is_some(), "answer lookup completed");
                Ok(TurnOutcome::Done(
                    TurnResponse::prompt(question_prompts::ANSWER_READY).with_acknowledgment(ack),
                ))
            }
            Err(err) if err.is_timeout() => {
                warn!(error = %err, "answer lookup hit its timeout bound");
                Ok(TurnOutcome::Done(
                    TurnResponse::prompt(failure::LOOKUP_FAILED).with_acknowledgment(ack),
                ))
            }
            Err(err) => {
                error!(error = %err, "answer lookup failed");
                Ok(TurnOutcome::Done(
                    TurnResponse::prompt(failure::LOOKUP_FAILED).with_acknowledgment(ack),
                ))
            }
        }
    }

    fn check_answer(&self, state: &mut SessionState) -> Result<TurnOutcome, EngineError> {
        let mut speech = state
            .answer
            .clone()
            .unwrap_or_else(|| check_answer::NOT_FOUND.to_string());
        speech.push(' ');
        speech.push_str(check_answer::FOLLOW_UP);

        let directives = state.candidates.swap(SlotNamespace::YesNo, builtin::yes_no());
        state.continuation = ContinuationSlot::AwaitingYesNo;
        state.step = state.step.transition_to(DialogStep::AwaitContinuation)?;

        Ok(TurnOutcome::Commit(
            TurnResponse::prompt(speech).with_directives(directives),
        ))
    }

    fn await_continuation(
        &self,
        state: &mut SessionState,
        request: &TurnRequest,
    ) -> Result<TurnOutcome, EngineError> {
        let Some(choice) = self.resolve(state, DialogStep::AwaitContinuation, &request.input)
        else {
            return Ok(TurnOutcome::Hold(TurnResponse::prompt(continuation::ASK_AGAIN)));
        };

        match choice.as_str() {
            builtin::ANSWER_NO => Ok(TurnOutcome::End(TurnResponse::farewell(
                continuation::FAREWELL,
            ))),
            builtin::ANSWER_YES => {
                state.reset_for_next_question();
                let directives = state
                    .candidates
                    .swap(SlotNamespace::QuestionScope, builtin::question_scope());
                Ok(TurnOutcome::Commit(
                    TurnResponse::prompt(continuation::NEXT_QUESTION).with_directives(directives),
                ))
            }
            _ => Ok(TurnOutcome::Hold(TurnResponse::prompt(continuation::ASK_AGAIN))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::MockCatalogClient;
    use crate::adapters::notifier::RecordingNotifier;
    use crate::adapters::session::InMemorySessionStore;
    use crate::domain::foundation::RequestId;

    struct Harness {
        service: DialogService,
        store: Arc<InMemorySessionStore>,
        notifier: Arc<RecordingNotifier>,
        session_id: SessionId,
    }

    fn harness(catalog: MockCatalogClient) -> Harness {
        let store = Arc::new(InMemorySessionStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let service = DialogService::new(
            Arc::new(catalog),
            notifier.clone(),
            store.clone(),
        );
        Harness {
            service,
            store,
            notifier,
            session_id: SessionId::new(),
        }
    }

    fn turn(raw: &str) -> TurnRequest {
        TurnRequest::free_form(RequestId::random(), raw)
    }

    #[tokio::test]
    async fn launch_installs_question_scope_candidates() {
        let h = harness(MockCatalogClient::new());
        let response = h.service.launch(&h.session_id).await.unwrap();

        assert!(response.speech.contains("general question"));
        assert_eq!(response.directives.len(), 1);
        assert_eq!(
            response.directives[0].namespace(),
            SlotNamespace::QuestionScope
        );

        let state = h.store.load(&h.session_id).await.unwrap().unwrap();
        assert_eq!(state.step, DialogStep::CollectScope);
    }

    #[tokio::test]
    async fn turn_without_launch_is_a_contract_violation() {
        let h = harness(MockCatalogClient::new());
        let result = h.service.handle_turn(&h.session_id, &turn("general")).await;
        assert!(matches!(result, Err(EngineError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn unrecognized_scope_holds_the_slot() {
        let h = harness(MockCatalogClient::new().with_faculties(["Engineering"]));
        h.service.launch(&h.session_id).await.unwrap();
        let before = h.store.load(&h.session_id).await.unwrap().unwrap();

        let request = TurnRequest::no_match(RequestId::random(), "banana");
        let response = h.service.handle_turn(&h.session_id, &request).await.unwrap();

        assert_eq!(response.speech, scope_prompts::ASK_AGAIN);
        assert!(response.directives.is_empty());
        let after = h.store.load(&h.session_id).await.unwrap().unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn scope_accepted_fetches_and_installs_faculties() {
        let h = harness(MockCatalogClient::new().with_faculties(["Engineering", "Science"]));
        h.service.launch(&h.session_id).await.unwrap();

        let response = h.service.handle_turn(&h.session_id, &turn("general")).await.unwrap();

        assert_eq!(response.speech, scope_prompts::FIRST_QUESTION);
        assert!(response
            .directives
            .iter()
            .any(|d| d.is_replace() && d.namespace() == SlotNamespace::Faculty));

        let state = h.store.load(&h.session_id).await.unwrap().unwrap();
        assert_eq!(state.scope, Some(QuestionScope::General));
        assert_eq!(state.step, DialogStep::CollectFaculty);
    }

    #[tokio::test]
    async fn empty_faculty_catalog_apologizes_without_advancing() {
        let h = harness(MockCatalogClient::new());
        h.service.launch(&h.session_id).await.unwrap();

        let response = h.service.handle_turn(&h.session_id, &turn("general")).await.unwrap();

        assert_eq!(response.speech, failure::NO_OPTIONS);
        let state = h.store.load(&h.session_id).await.unwrap().unwrap();
        assert!(state.scope.is_none());
        assert_eq!(state.step, DialogStep::CollectScope);
    }

    #[tokio::test]
    async fn failed_acknowledgment_does_not_fail_the_question_turn() {
        let catalog = MockCatalogClient::new()
            .with_faculties(["Engineering"])
            .with_programs("Engineering", ["Computer Science"])
            .with_answer("Eighteen credits.");
        let store = Arc::new(InMemorySessionStore::new());
        let service = DialogService::new(
            Arc::new(catalog),
            Arc::new(RecordingNotifier::failing()),
            store.clone(),
        );
        let session_id = SessionId::new();

        service.launch(&session_id).await.unwrap();
        service.handle_turn(&session_id, &turn("general")).await.unwrap();
        service.handle_turn(&session_id, &turn("Engineering")).await.unwrap();
        service.handle_turn(&session_id, &turn("Computer Science")).await.unwrap();
        service.handle_turn(&session_id, &turn("course load")).await.unwrap();

        let response = service
            .handle_turn(&session_id, &turn("How many credits can I take?"))
            .await
            .unwrap();

        assert_eq!(response.speech, question_prompts::ANSWER_READY);
        let state = store.load(&session_id).await.unwrap().unwrap();
        assert_eq!(state.answer.as_deref(), Some("Eighteen credits."));
    }

    #[tokio::test]
    async fn acknowledgment_is_recorded_and_echoed() {
        let catalog = MockCatalogClient::new()
            .with_faculties(["Engineering"])
            .with_programs("Engineering", ["Computer Science"])
            .with_answer("Eighteen credits.");
        let h = harness(catalog);

        h.service.launch(&h.session_id).await.unwrap();
        h.service.handle_turn(&h.session_id, &turn("general")).await.unwrap();
        h.service.handle_turn(&h.session_id, &turn("Engineering")).await.unwrap();
        h.service
            .handle_turn(&h.session_id, &turn("Computer Science"))
            .await
            .unwrap();
        h.service.handle_turn(&h.session_id, &turn("course load")).await.unwrap();

        let request = turn("How many credits can I take?");
        let response = h.service.handle_turn(&h.session_id, &request).await.unwrap();

        let delivered = h.notifier.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].request_id, request.request_id);
        assert_eq!(response.acknowledgment.as_ref(), Some(&delivered[0]));
    }
}
