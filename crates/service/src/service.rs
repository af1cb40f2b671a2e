//! The roadmap service - the one component the client layer talks to.

use std::sync::Arc;

use pathway_core::{
    AccountId, Answer, DomainError, Event, EventKind, GenerationSpec, NodeId, QuizAttempt,
    Roadmap, RoadmapId,
};
use pathway_generator::RoadmapGenerator;
use pathway_progress::{UnlockEngine, UnlockSignal};
use pathway_quiz::{QuizEvaluator, QuizPolicy};
use pathway_storage::Storage;
use tracing::{debug, info};

use crate::api::QuestionPublic;
use crate::assemble::assemble;
use crate::error::{Result, ServiceError};
use crate::guard::InFlightNodes;
use crate::ratelimit::RateLimiter;

/// Orchestrates generation, retrieval, start, and quiz-gated progression.
///
/// Every operation takes the authenticated caller and refuses to touch
/// roadmaps the caller does not own. Mutations read and write the whole
/// roadmap aggregate, so unlock recomputation never observes a partially
/// updated node set.
pub struct RoadmapService {
    storage: Arc<dyn Storage>,
    generator: Arc<dyn RoadmapGenerator>,
    evaluator: QuizEvaluator,
    unlock: UnlockEngine,
    limiter: RateLimiter,
    in_flight: InFlightNodes,
}

impl RoadmapService {
    /// Create a service with the default quiz policy and rate budget.
    pub fn new(storage: Arc<dyn Storage>, generator: Arc<dyn RoadmapGenerator>) -> Self {
        Self {
            storage,
            generator,
            evaluator: QuizEvaluator::default(),
            unlock: UnlockEngine::new(),
            limiter: RateLimiter::generation_default(),
            in_flight: InFlightNodes::new(),
        }
    }

    /// Override the quiz pass policy.
    pub fn with_quiz_policy(mut self, policy: QuizPolicy) -> Self {
        self.evaluator = QuizEvaluator::new(policy);
        self
    }

    /// Override the generation rate budget.
    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// Generate and persist a new roadmap. All nodes start Locked.
    pub async fn generate(&self, caller: AccountId, spec: &GenerationSpec) -> Result<Roadmap> {
        spec.validate()?;
        self.limiter.check(caller)?;

        let generated = self.generator.generate(spec).await?;
        let roadmap = assemble(caller, generated)?;
        self.storage.save_roadmap(&roadmap).await?;

        self.record(
            caller,
            roadmap.id,
            EventKind::RoadmapGenerated,
            format!("generated '{}' with {} nodes", roadmap.title, roadmap.nodes.len()),
        )
        .await?;

        info!(roadmap = %roadmap.id, nodes = roadmap.nodes.len(), "roadmap generated");
        Ok(roadmap)
    }

    /// Roadmaps owned by the caller, oldest first.
    pub async fn list(&self, caller: AccountId) -> Result<Vec<Roadmap>> {
        Ok(self.storage.list_roadmaps(caller).await?)
    }

    /// Fetch one roadmap. Absent and not-owned are both `NotFound`.
    pub async fn get(&self, caller: AccountId, id: RoadmapId) -> Result<Roadmap> {
        self.owned(caller, id).await
    }

    /// Start a roadmap: flips `started` once and unlocks the nodes with no
    /// prerequisites. Idempotent; a repeat call changes nothing.
    pub async fn start(&self, caller: AccountId, id: RoadmapId) -> Result<Roadmap> {
        let mut roadmap = self.owned(caller, id).await?;
        if roadmap.started {
            debug!(roadmap = %id, "start repeated, no-op");
            return Ok(roadmap);
        }

        roadmap.started = true;
        let unlocked = self.unlock.recompute(&mut roadmap, UnlockSignal::Started);
        self.storage.save_roadmap(&roadmap).await?;

        self.record(caller, id, EventKind::RoadmapStarted, "roadmap started")
            .await?;
        for node_id in unlocked {
            self.record(
                caller,
                id,
                EventKind::NodeUnlocked(node_id),
                "unlocked at start",
            )
            .await?;
        }

        Ok(roadmap)
    }

    /// The questions of a node, without correct-answer indices. Rejected
    /// with `InvalidState` while the node is still Locked.
    pub async fn questions(&self, caller: AccountId, node_id: NodeId) -> Result<Vec<QuestionPublic>> {
        let roadmap = self.owning_roadmap(caller, node_id).await?;
        let node = roadmap
            .node(node_id)
            .ok_or_else(|| DomainError::NotFound(format!("node {}", node_id)))?;

        if node.status == pathway_core::NodeStatus::Locked {
            return Err(DomainError::InvalidState {
                reason: "this lesson is locked".into(),
                status: node.status,
            }
            .into());
        }

        Ok(node.questions.iter().map(QuestionPublic::from).collect())
    }

    /// Evaluate a quiz submission for a node.
    ///
    /// Serialized per node: a second submission while one is in flight is
    /// rejected with `Conflict`. On a pass, the node completes and the
    /// unlock engine recomputes availability over the whole roadmap before
    /// a single aggregate save.
    pub async fn submit_quiz(
        &self,
        caller: AccountId,
        node_id: NodeId,
        answers: &[Answer],
    ) -> Result<QuizAttempt> {
        // Held until this function returns, on every path.
        let _lease = self.in_flight.acquire(node_id)?;

        let mut roadmap = self.owning_roadmap(caller, node_id).await?;
        let node = roadmap
            .node(node_id)
            .ok_or_else(|| DomainError::NotFound(format!("node {}", node_id)))?;

        if !node.can_take_quiz() {
            return Err(DomainError::InvalidState {
                reason: "quiz requires an available node".into(),
                status: node.status,
            }
            .into());
        }

        let attempt = self.evaluator.evaluate(node_id, &node.questions, answers);
        self.record(
            caller,
            roadmap.id,
            EventKind::QuizSubmitted { node_id, passed: attempt.passed },
            attempt.message.clone(),
        )
        .await?;

        if attempt.passed {
            let roadmap_id = roadmap.id;
            roadmap
                .node_mut(node_id)
                .ok_or_else(|| DomainError::NotFound(format!("node {}", node_id)))?
                .mark_completed()?;
            let unlocked = self
                .unlock
                .recompute(&mut roadmap, UnlockSignal::NodeCompleted(node_id));
            self.storage.save_roadmap(&roadmap).await?;

            self.record(
                caller,
                roadmap_id,
                EventKind::NodeCompleted(node_id),
                format!("completed with score {}%", attempt.score_percent),
            )
            .await?;
            for unlocked_id in unlocked {
                self.record(
                    caller,
                    roadmap_id,
                    EventKind::NodeUnlocked(unlocked_id),
                    "prerequisites completed",
                )
                .await?;
            }

            info!(roadmap = %roadmap_id, node = %node_id, score = attempt.score_percent, "node completed");
        }

        Ok(attempt)
    }

    /// Progression events for a roadmap, oldest first.
    pub async fn events(&self, caller: AccountId, id: RoadmapId) -> Result<Vec<Event>> {
        let roadmap = self.owned(caller, id).await?;
        Ok(self.storage.list_events(roadmap.id).await?)
    }

    async fn owned(&self, caller: AccountId, id: RoadmapId) -> Result<Roadmap> {
        match self.storage.load_roadmap(id).await? {
            Some(r) if r.owner == caller => Ok(r),
            // Not-owned reads as absent so ids cannot be probed.
            _ => Err(DomainError::NotFound(format!("roadmap {}", id)).into()),
        }
    }

    async fn owning_roadmap(&self, caller: AccountId, node_id: NodeId) -> Result<Roadmap> {
        match self.storage.find_by_node(node_id).await? {
            Some(r) if r.owner == caller => Ok(r),
            _ => Err(DomainError::NotFound(format!("node {}", node_id)).into()),
        }
    }

    async fn record(
        &self,
        caller: AccountId,
        roadmap_id: RoadmapId,
        kind: EventKind,
        detail: impl Into<String>,
    ) -> Result<()> {
        self.storage
            .save_event(&Event::new(caller, roadmap_id, kind, detail))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SubmitOutcome;
    use pathway_core::{Node, NodeStatus, Question, QuestionId};
    use pathway_generator::OutlineGenerator;
    use pathway_storage::MemoryStorage;

    fn service_with(storage: Arc<dyn Storage>) -> RoadmapService {
        RoadmapService::new(storage, Arc::new(OutlineGenerator::new()))
    }

    fn service() -> (RoadmapService, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (service_with(storage.clone()), storage)
    }

    fn spec() -> GenerationSpec {
        GenerationSpec {
            role: "Rust Developer".into(),
            current_stack: String::new(),
            goal: "get hired".into(),
            hours_per_week: 10,
            learning_style: "mixed".into(),
            focus: "job-ready".into(),
            constraints: String::new(),
        }
    }

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: QuestionId::new(),
                text: format!("q{}", i),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_index: 0,
                explanation: String::new(),
            })
            .collect()
    }

    fn answers(questions: &[Question], correct: usize) -> Vec<Answer> {
        questions
            .iter()
            .enumerate()
            .map(|(i, q)| Answer {
                question_id: q.id,
                selected_index: Some(if i < correct { q.correct_index } else { q.correct_index + 1 }),
            })
            .collect()
    }

    fn node(title: &str, status: NodeStatus, prereqs: Vec<NodeId>, qs: Vec<Question>) -> Node {
        Node {
            id: NodeId::new(),
            title: title.into(),
            description: String::new(),
            summary: String::new(),
            estimated_hours: 2,
            resources: Vec::new(),
            prerequisites: prereqs,
            questions: qs,
            status,
        }
    }

    /// Diamond: a and b available (with quizzes), c locked behind both.
    async fn seed_diamond(storage: &MemoryStorage, owner: AccountId) -> (RoadmapId, Node, Node, NodeId) {
        let a = node("a", NodeStatus::Available, vec![], questions(10));
        let b = node("b", NodeStatus::Available, vec![], questions(2));
        let c = node("c", NodeStatus::Locked, vec![a.id, b.id], questions(1));
        let c_id = c.id;
        let roadmap = Roadmap {
            id: RoadmapId::new(),
            title: "diamond".into(),
            description: String::new(),
            owner,
            difficulty: "Intermediate".into(),
            total_estimated_hours: 6,
            total_weeks: 1,
            focus: "job-ready".into(),
            milestones: Vec::new(),
            nodes: vec![a.clone(), b.clone(), c],
            started: true,
            created_at: chrono::Utc::now(),
        };
        storage.save_roadmap(&roadmap).await.unwrap();
        (roadmap.id, a, b, c_id)
    }

    fn domain(err: &ServiceError) -> &DomainError {
        err.domain().expect("expected a domain error")
    }

    #[tokio::test]
    async fn generate_persists_a_fully_locked_roadmap() {
        let (svc, _) = service();
        let caller = AccountId::new();

        let roadmap = svc.generate(caller, &spec()).await.unwrap();
        assert!(!roadmap.started);
        assert!(roadmap.nodes.iter().all(|n| n.status == NodeStatus::Locked));

        let listed = svc.list(caller).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, roadmap.id);
    }

    #[tokio::test]
    async fn invalid_spec_is_rejected_before_generation() {
        let (svc, _) = service();
        let mut bad = spec();
        bad.role = String::new();
        let err = svc.generate(AccountId::new(), &bad).await.unwrap_err();
        assert!(matches!(domain(&err), DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn generation_rate_limit_is_enforced() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let svc = RoadmapService::new(storage, Arc::new(OutlineGenerator::new()))
            .with_rate_limiter(RateLimiter::new(2, std::time::Duration::from_secs(60)));
        let caller = AccountId::new();

        svc.generate(caller, &spec()).await.unwrap();
        svc.generate(caller, &spec()).await.unwrap();
        let err = svc.generate(caller, &spec()).await.unwrap_err();
        let domain_err = domain(&err);
        assert!(matches!(domain_err, DomainError::RateLimited { .. }));
        assert!(domain_err.is_retryable());
    }

    #[tokio::test]
    async fn get_refuses_foreign_and_unknown_roadmaps() {
        let (svc, _) = service();
        let owner = AccountId::new();
        let roadmap = svc.generate(owner, &spec()).await.unwrap();

        let err = svc.get(AccountId::new(), roadmap.id).await.unwrap_err();
        assert!(matches!(domain(&err), DomainError::NotFound(_)));

        let err = svc.get(owner, RoadmapId::new()).await.unwrap_err();
        assert!(matches!(domain(&err), DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn start_unlocks_roots_and_repeats_as_a_noop() {
        let (svc, _) = service();
        let caller = AccountId::new();
        let roadmap = svc.generate(caller, &spec()).await.unwrap();

        let started = svc.start(caller, roadmap.id).await.unwrap();
        assert!(started.started);
        let statuses: Vec<NodeStatus> = started.nodes.iter().map(|n| n.status).collect();
        assert_eq!(
            statuses.iter().filter(|s| **s == NodeStatus::Available).count(),
            1
        );

        // Second start: no error, identical statuses, no extra events.
        let events_before = svc.events(caller, roadmap.id).await.unwrap().len();
        let again = svc.start(caller, roadmap.id).await.unwrap();
        let after: Vec<NodeStatus> = again.nodes.iter().map(|n| n.status).collect();
        assert_eq!(statuses, after);
        assert_eq!(svc.events(caller, roadmap.id).await.unwrap().len(), events_before);
    }

    #[tokio::test]
    async fn questions_are_rejected_on_locked_nodes_and_hide_answers() {
        let (svc, storage) = service();
        let caller = AccountId::new();
        let (_, a, _, c_id) = seed_diamond(&storage, caller).await;

        let err = svc.questions(caller, c_id).await.unwrap_err();
        assert!(matches!(
            domain(&err),
            DomainError::InvalidState { status: NodeStatus::Locked, .. }
        ));

        let visible = svc.questions(caller, a.id).await.unwrap();
        assert_eq!(visible.len(), 10);
        // Serialized form carries no correct index.
        let json = serde_json::to_string(&visible).unwrap();
        assert!(!json.contains("correct"));
    }

    #[tokio::test]
    async fn failing_attempt_leaves_the_node_available() {
        let (svc, storage) = service();
        let caller = AccountId::new();
        let (roadmap_id, a, _, _) = seed_diamond(&storage, caller).await;

        let attempt = svc
            .submit_quiz(caller, a.id, &answers(&a.questions, 6))
            .await
            .unwrap();
        assert!(!attempt.passed);
        assert_eq!(attempt.correct, 6);

        let outcome = SubmitOutcome::from(&attempt);
        assert!(!outcome.passed);
        assert!(outcome.message.contains("Need 70% to pass"));

        let roadmap = svc.get(caller, roadmap_id).await.unwrap();
        assert_eq!(roadmap.node(a.id).unwrap().status, NodeStatus::Available);
    }

    #[tokio::test]
    async fn passing_attempt_completes_and_unlocks_the_diamond() {
        let (svc, storage) = service();
        let caller = AccountId::new();
        let (roadmap_id, a, b, c_id) = seed_diamond(&storage, caller).await;

        let attempt = svc
            .submit_quiz(caller, a.id, &answers(&a.questions, 7))
            .await
            .unwrap();
        assert!(attempt.passed);

        // One prerequisite done: c stays locked.
        let roadmap = svc.get(caller, roadmap_id).await.unwrap();
        assert_eq!(roadmap.node(a.id).unwrap().status, NodeStatus::Completed);
        assert_eq!(roadmap.node(c_id).unwrap().status, NodeStatus::Locked);

        svc.submit_quiz(caller, b.id, &answers(&b.questions, 2))
            .await
            .unwrap();
        let roadmap = svc.get(caller, roadmap_id).await.unwrap();
        assert_eq!(roadmap.node(c_id).unwrap().status, NodeStatus::Available);

        // Completed implies all prerequisites completed.
        for node in &roadmap.nodes {
            if node.status == NodeStatus::Completed {
                assert!(roadmap.prerequisites_completed(node));
            }
        }
    }

    #[tokio::test]
    async fn zero_question_node_auto_passes_on_empty_submission() {
        let (svc, _) = service();
        let caller = AccountId::new();
        let roadmap = svc.generate(caller, &spec()).await.unwrap();
        let started = svc.start(caller, roadmap.id).await.unwrap();
        let first = started
            .nodes
            .iter()
            .find(|n| n.status == NodeStatus::Available)
            .unwrap();

        // Outline nodes carry no quiz.
        let attempt = svc.submit_quiz(caller, first.id, &[]).await.unwrap();
        assert!(attempt.passed);
        assert_eq!(attempt.score_percent, 100);

        let refreshed = svc.get(caller, roadmap.id).await.unwrap();
        assert_eq!(refreshed.node(first.id).unwrap().status, NodeStatus::Completed);
    }

    #[tokio::test]
    async fn quiz_on_locked_and_completed_nodes_is_invalid_state() {
        let (svc, storage) = service();
        let caller = AccountId::new();
        let (_, a, _, c_id) = seed_diamond(&storage, caller).await;

        let err = svc.submit_quiz(caller, c_id, &[]).await.unwrap_err();
        assert!(matches!(
            domain(&err),
            DomainError::InvalidState { status: NodeStatus::Locked, .. }
        ));

        svc.submit_quiz(caller, a.id, &answers(&a.questions, 10))
            .await
            .unwrap();
        let err = svc
            .submit_quiz(caller, a.id, &answers(&a.questions, 10))
            .await
            .unwrap_err();
        assert!(matches!(
            domain(&err),
            DomainError::InvalidState { status: NodeStatus::Completed, .. }
        ));
    }

    #[tokio::test]
    async fn foreign_callers_cannot_submit() {
        let (svc, storage) = service();
        let owner = AccountId::new();
        let (_, a, _, _) = seed_diamond(&storage, owner).await;

        let err = svc.submit_quiz(AccountId::new(), a.id, &[]).await.unwrap_err();
        assert!(matches!(domain(&err), DomainError::NotFound(_)));
    }

    /// Delegating storage that pauses in `find_by_node`, forcing two
    /// submissions to overlap deterministically.
    struct SlowStorage(MemoryStorage);

    #[async_trait::async_trait]
    impl Storage for SlowStorage {
        async fn save_roadmap(&self, roadmap: &Roadmap) -> pathway_storage::Result<()> {
            self.0.save_roadmap(roadmap).await
        }
        async fn load_roadmap(&self, id: RoadmapId) -> pathway_storage::Result<Option<Roadmap>> {
            self.0.load_roadmap(id).await
        }
        async fn list_roadmaps(&self, owner: AccountId) -> pathway_storage::Result<Vec<Roadmap>> {
            self.0.list_roadmaps(owner).await
        }
        async fn find_by_node(&self, node_id: NodeId) -> pathway_storage::Result<Option<Roadmap>> {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            self.0.find_by_node(node_id).await
        }
        async fn delete_roadmap(&self, id: RoadmapId) -> pathway_storage::Result<()> {
            self.0.delete_roadmap(id).await
        }
        async fn save_event(&self, event: &Event) -> pathway_storage::Result<()> {
            self.0.save_event(event).await
        }
        async fn list_events(&self, roadmap_id: RoadmapId) -> pathway_storage::Result<Vec<Event>> {
            self.0.list_events(roadmap_id).await
        }
    }

    #[tokio::test]
    async fn concurrent_submissions_yield_one_attempt_and_one_conflict() {
        let slow = SlowStorage(MemoryStorage::new());
        let caller = AccountId::new();
        let (_, a, _, _) = seed_diamond(&slow.0, caller).await;
        let svc = Arc::new(service_with(Arc::new(slow)));

        let submission = answers(&a.questions, 10);
        let (first, second) = tokio::join!(
            svc.submit_quiz(caller, a.id, &submission),
            svc.submit_quiz(caller, a.id, &submission),
        );

        let results = [first, second];
        let accepted = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| {
                matches!(
                    r.as_ref().err().and_then(|e| e.domain()),
                    Some(DomainError::Conflict(_))
                )
            })
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(conflicts, 1);
    }

    #[tokio::test]
    async fn events_trace_the_progression() {
        let (svc, storage) = service();
        let caller = AccountId::new();
        let (roadmap_id, a, _, _) = seed_diamond(&storage, caller).await;

        svc.submit_quiz(caller, a.id, &answers(&a.questions, 10))
            .await
            .unwrap();

        let events = svc.events(caller, roadmap_id).await.unwrap();
        let kinds: Vec<&EventKind> = events.iter().map(|e| &e.kind).collect();
        assert!(kinds.contains(&&EventKind::QuizSubmitted { node_id: a.id, passed: true }));
        assert!(kinds.contains(&&EventKind::NodeCompleted(a.id)));
    }
}
