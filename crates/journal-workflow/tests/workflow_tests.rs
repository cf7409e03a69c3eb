#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use journal_core::{
        Category, EntryState, JournalEntry, JournalError, RawInput, Result, Skill, schema_of,
        validate_value,
    };
    use journal_llm::{JournalAgent, MockProvider};
    use journal_workflow::{
        AgentRegistry, ClassifyStep, ExpandImpactStep, JOURNAL_AGENT_ID, Step, StepContext,
        Workflow,
    };

    const CYPRESS: &str = "Spent the afternoon writing Cypress tests for the new checkout flow";

    fn classified() -> serde_json::Value {
        json!({
            "category": "Productivity",
            "areaOfWork": "Testing Automation",
            "aiToolUsed": "GitHub Copilot",
            "taskTopic": "Cypress tests for checkout flow",
        })
    }

    fn expanded() -> serde_json::Value {
        json!({
            "whatIDid": "Wrote end-to-end Cypress tests covering the new checkout flow.",
            "outcomeImpact": "Regression coverage for checkout without manual QA passes.",
        })
    }

    fn skilled() -> serde_json::Value {
        json!({ "skillUpskilled": "Testing Automation" })
    }

    fn happy_mock() -> MockProvider {
        MockProvider::new("mock")
            .with_json(classified())
            .with_json(expanded())
            .with_json(skilled())
    }

    fn workflow(mock: MockProvider) -> (Workflow, Arc<MockProvider>) {
        let mock = Arc::new(mock);
        let agent = JournalAgent::new(JOURNAL_AGENT_ID, mock.clone(), "test-model");
        let registry = AgentRegistry::new().with_agent(agent);
        (Workflow::journal(registry), mock)
    }

    fn cypress_input() -> RawInput {
        RawInput::new(CYPRESS, "2024-01-15").unwrap()
    }

    // ── End to end ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_cypress_entry_end_to_end() {
        let (workflow, mock) = workflow(happy_mock());
        let run = workflow.run(cypress_input()).await.unwrap();

        let entry = &run.entry;
        assert_eq!(entry.date, "2024-01-15");
        assert_eq!(entry.raw_text, CYPRESS);
        assert_eq!(entry.category, Category::Productivity);
        assert_eq!(entry.area_of_work, "Testing Automation");
        assert_eq!(entry.ai_tool_used, "GitHub Copilot");
        assert_eq!(entry.task_topic, "Cypress tests for checkout flow");
        assert!(!entry.what_i_did.is_empty());
        assert!(!entry.outcome_impact.is_empty());
        assert_eq!(entry.skill_upskilled, Skill::TestingAutomation);

        let value = serde_json::to_value(entry).unwrap();
        assert!(validate_value(&schema_of::<JournalEntry>(), &value).is_ok());

        assert_eq!(run.workflow_id, "journal-workflow");
        assert_eq!(run.completed, vec!["classify-entry", "expand-impact", "map-skill"]);
        assert!(uuid::Uuid::parse_str(&run.run_id).is_ok());
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_deterministic_backend_gives_identical_entries() {
        let (first, _) = workflow(happy_mock());
        let (second, _) = workflow(happy_mock());

        let a = first.run(cypress_input()).await.unwrap();
        let b = second.run(cypress_input()).await.unwrap();

        assert_eq!(a.entry, b.entry);
        assert_eq!(
            serde_json::to_string(&a.entry).unwrap(),
            serde_json::to_string(&b.entry).unwrap()
        );
        assert_ne!(a.run_id, b.run_id);
    }

    // ── Input validation ───────────────────────────────────────

    #[tokio::test]
    async fn test_empty_text_fails_before_any_model_call() {
        let (workflow, mock) = workflow(happy_mock());
        let input = RawInput {
            raw_text: String::new(),
            date: "2024-01-15".into(),
        };

        let result = workflow.run(input).await;
        assert!(matches!(result, Err(JournalError::Validation(_))));
        assert_eq!(mock.request_count(), 0);
    }

    // ── Ordering and prompts ───────────────────────────────────

    #[tokio::test]
    async fn test_stages_prompt_in_order_with_accumulated_fields() {
        let (workflow, mock) = workflow(happy_mock());
        workflow.run(cypress_input()).await.unwrap();

        let recorded = mock.recorded_requests();
        let recorded = recorded.lock();
        let prompts: Vec<&str> = recorded
            .iter()
            .map(|r| r.messages[0].content.as_str())
            .collect();

        assert!(prompts[0].ends_with(&format!("Journal entry:\n\"{CYPRESS}\"")));
        assert!(prompts[1].contains("Area of Work: Testing Automation"));
        assert!(prompts[1].contains(&format!("Original Entry: \"{CYPRESS}\"")));
        assert!(prompts[2].contains("EXACTLY ONE skill"));
        assert!(prompts[2].contains("Outcome/Impact: Regression coverage"));

        let schemas: Vec<&str> = recorded
            .iter()
            .map(|r| r.response_schema.as_ref().unwrap().name.as_str())
            .collect();
        assert_eq!(schemas, vec!["classified_fields", "expanded_fields", "skill_mapping"]);
    }

    #[tokio::test]
    async fn test_classify_failure_stops_before_expand() {
        let (workflow, mock) = workflow(
            MockProvider::new("mock")
                .with_response("not json")
                .with_json(expanded())
                .with_json(skilled()),
        );

        let err = workflow.run(cypress_input()).await.unwrap_err();
        match err {
            JournalError::EmptyOrInvalidOutput { stage, .. } => assert_eq!(stage, "classify-entry"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_expand_failure_produces_no_entry() {
        let (workflow, mock) = workflow(
            MockProvider::new("mock")
                .with_json(classified())
                .with_error("HTTP 503: overloaded")
                .with_json(skilled()),
        );

        let result = workflow.run(cypress_input()).await;
        assert!(matches!(result, Err(JournalError::LlmProvider(_))));
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_expand_output_names_stage() {
        let (workflow, _) = workflow(
            MockProvider::new("mock")
                .with_json(classified())
                .with_response(""),
        );

        let err = workflow.run(cypress_input()).await.unwrap_err();
        assert!(err.to_string().contains("expand-impact"));
    }

    // ── Closed sets ────────────────────────────────────────────

    #[tokio::test]
    async fn test_invented_skill_is_rejected() {
        let (workflow, _) = workflow(
            MockProvider::new("mock")
                .with_json(classified())
                .with_json(expanded())
                .with_json(json!({ "skillUpskilled": "Cypress Mastery" })),
        );

        let err = workflow.run(cypress_input()).await.unwrap_err();
        match err {
            JournalError::EmptyOrInvalidOutput { stage, .. } => assert_eq!(stage, "map-skill"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let mut bad = classified();
        bad["category"] = json!("Research");
        let (workflow, mock) = workflow(MockProvider::new("mock").with_json(bad));

        assert!(workflow.run(cypress_input()).await.is_err());
        assert_eq!(mock.request_count(), 1);
    }

    // ── Misconfiguration ───────────────────────────────────────

    #[tokio::test]
    async fn test_unregistered_agent() {
        let workflow = Workflow::journal(AgentRegistry::new());
        let err = workflow.run(cypress_input()).await.unwrap_err();
        match err {
            JournalError::UnregisteredAgent(id) => assert_eq!(id, "journal-agent"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_out_of_order_chain_is_stage_order_error() {
        let mock = Arc::new(happy_mock());
        let agent = JournalAgent::new(JOURNAL_AGENT_ID, mock.clone(), "test-model");
        let workflow = Workflow::new("broken", AgentRegistry::new().with_agent(agent))
            .then(ExpandImpactStep)
            .then(ClassifyStep);

        let err = workflow.run(cypress_input()).await.unwrap_err();
        match err {
            JournalError::StageOrder { stage, expected, found } => {
                assert_eq!(stage, "expand-impact");
                assert_eq!(expected, "classified");
                assert_eq!(found, "raw");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_incomplete_chain_has_no_entry() {
        let agent = JournalAgent::new(JOURNAL_AGENT_ID, Arc::new(happy_mock()), "test-model");
        let workflow =
            Workflow::new("partial", AgentRegistry::new().with_agent(agent)).then(ClassifyStep);

        let err = workflow.run(cypress_input()).await.unwrap_err();
        assert!(matches!(
            err,
            JournalError::StageOrder { expected: "skilled", found: "classified", .. }
        ));
    }

    /// A stage that passes its record through but declares a stricter schema.
    struct StrictEcho;

    #[async_trait]
    impl Step for StrictEcho {
        fn id(&self) -> &'static str {
            "strict-echo"
        }

        fn description(&self) -> &'static str {
            "passes the record through"
        }

        fn consumes(&self) -> &'static str {
            "raw"
        }

        fn output_schema(&self) -> serde_json::Value {
            json!({
                "type": "object",
                "required": ["skillUpskilled"],
            })
        }

        async fn execute(&self, state: EntryState, _ctx: &StepContext) -> Result<EntryState> {
            Ok(state)
        }
    }

    #[tokio::test]
    async fn test_output_schema_mismatch_names_stage() {
        let workflow = Workflow::new("strict", AgentRegistry::new()).then(StrictEcho);
        let err = workflow.run(cypress_input()).await.unwrap_err();
        match err {
            JournalError::SchemaValidation { stage, errors } => {
                assert_eq!(stage, "strict-echo");
                assert!(!errors.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Passes a finished entry through and remembers the run id it was given.
    struct RunIdRecorder(Arc<std::sync::Mutex<Option<String>>>);

    #[async_trait]
    impl Step for RunIdRecorder {
        fn id(&self) -> &'static str {
            "record-run-id"
        }

        fn description(&self) -> &'static str {
            "records the run id"
        }

        fn consumes(&self) -> &'static str {
            "skilled"
        }

        fn output_schema(&self) -> serde_json::Value {
            schema_of::<JournalEntry>()
        }

        async fn execute(&self, state: EntryState, ctx: &StepContext) -> Result<EntryState> {
            *self.0.lock().unwrap() = Some(ctx.run_id.clone());
            Ok(state)
        }
    }

    #[tokio::test]
    async fn test_stages_see_the_run_id() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let agent = JournalAgent::new(JOURNAL_AGENT_ID, Arc::new(happy_mock()), "test-model");
        let workflow = Workflow::journal(AgentRegistry::new().with_agent(agent))
            .then(RunIdRecorder(seen.clone()));

        let run = workflow.run(cypress_input()).await.unwrap();
        assert_eq!(seen.lock().unwrap().as_deref(), Some(run.run_id.as_str()));
        assert_eq!(run.completed.last(), Some(&"record-run-id"));
    }
}
