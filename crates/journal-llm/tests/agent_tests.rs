#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use journal_core::{Category, ClassifiedFields, JournalError, Role, Skill, SkillMapping};
    use journal_llm::mock::{MockProvider, MockResponse};
    use journal_llm::provider::StopReason;
    use journal_llm::JournalAgent;

    fn agent(mock: MockProvider) -> (JournalAgent, Arc<MockProvider>) {
        let mock = Arc::new(mock);
        let agent = JournalAgent::new("journal-agent", mock.clone(), "test-model")
            .with_instructions("Return JSON only.")
            .with_sampling(0.0, 256);
        (agent, mock)
    }

    // ── Successful generation ──────────────────────────────────

    #[tokio::test]
    async fn test_generate_returns_typed_record() {
        let (agent, _) = agent(MockProvider::new("mock").with_json(serde_json::json!({
            "category": "Learning",
            "areaOfWork": "Agent Architecture",
            "aiToolUsed": "Claude",
            "taskTopic": "Read about tool use",
        })));

        let fields: ClassifiedFields = agent.generate("classify-entry", "classify").await.unwrap();
        assert_eq!(fields.category, Category::Learning);
        assert_eq!(fields.ai_tool_used, "Claude");
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_system_and_schema() {
        let (agent, mock) = agent(
            MockProvider::new("mock")
                .with_json(serde_json::json!({ "skillUpskilled": "Workflow Engineering" })),
        );

        let mapping: SkillMapping = agent.generate("map-skill", "map this entry").await.unwrap();
        assert_eq!(mapping.skill_upskilled, Skill::WorkflowEngineering);

        let recorded = mock.recorded_requests();
        let recorded = recorded.lock();
        assert_eq!(recorded.len(), 1);
        let req = &recorded[0];
        assert_eq!(req.model, "test-model");
        assert_eq!(req.system.as_deref(), Some("Return JSON only."));
        assert_eq!(req.temperature, 0.0);
        assert_eq!(req.max_tokens, 256);
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.messages[0].content, "map this entry");
        let schema = req.response_schema.as_ref().unwrap();
        assert_eq!(schema.name, "skill_mapping");
        assert!(schema.schema.to_string().contains("Developer Experience"));
    }

    // ── Failure modes ──────────────────────────────────────────

    #[tokio::test]
    async fn test_empty_prompt_makes_no_call() {
        let (agent, mock) = agent(MockProvider::new("mock"));
        let result = agent.generate::<SkillMapping>("map-skill", "   ").await;
        assert!(matches!(result, Err(JournalError::Validation(_))));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_output_names_stage() {
        let (agent, _) = agent(MockProvider::new("mock").with_response(""));
        let err = agent
            .generate::<SkillMapping>("map-skill", "map")
            .await
            .unwrap_err();
        match err {
            JournalError::EmptyOrInvalidOutput { stage, .. } => assert_eq!(stage, "map-skill"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invented_skill_is_invalid_output() {
        let (agent, _) = agent(
            MockProvider::new("mock")
                .with_json(serde_json::json!({ "skillUpskilled": "Team Leadership" })),
        );
        let err = agent
            .generate::<SkillMapping>("map-skill", "map")
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::EmptyOrInvalidOutput { .. }));
    }

    #[tokio::test]
    async fn test_truncated_output_is_invalid() {
        let (agent, _) = agent(MockProvider::new("mock").with_mock_response(MockResponse {
            text: "{\"skillUpskilled\": \"Prompt".into(),
            stop_reason: StopReason::MaxTokens,
            ..Default::default()
        }));
        let err = agent
            .generate::<SkillMapping>("map-skill", "map")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[tokio::test]
    async fn test_provider_error_propagates_without_retry() {
        let (agent, mock) = agent(
            MockProvider::new("mock")
                .with_error("HTTP 500: boom")
                .with_json(serde_json::json!({ "skillUpskilled": "Prompt Engineering" })),
        );
        let err = agent
            .generate::<SkillMapping>("map-skill", "map")
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::LlmProvider(_)));
        assert_eq!(mock.request_count(), 1);
    }
}
