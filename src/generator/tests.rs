use super::*;

fn passage(id: &str, text: &str) -> Passage {
    Passage::new(id, text).expect("valid passage")
}

#[test]
fn test_provider_kind_parse() {
    assert_eq!("mock".parse::<ProviderKind>(), Ok(ProviderKind::Mock));
    assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
    assert_eq!(" anthropic ".parse::<ProviderKind>(), Ok(ProviderKind::Anthropic));
    assert_eq!(
        "llama".parse::<ProviderKind>(),
        Err(UnknownProvider("llama".to_string()))
    );
}

#[test]
fn test_resolve_provider_falls_back_to_mock() {
    assert_eq!(resolve_provider("openai"), ProviderKind::OpenAi);
    assert_eq!(resolve_provider("does-not-exist"), ProviderKind::Mock);
    assert_eq!(resolve_provider(""), ProviderKind::Mock);
}

#[test]
fn test_build_generator_selects_provider() {
    let config = Config::default();
    assert_eq!(build_generator(&config).provider(), "mock");

    let config = Config {
        llm_provider: "anthropic".to_string(),
        ..Default::default()
    };
    assert_eq!(build_generator(&config).provider(), "anthropic");

    let config = Config {
        llm_provider: "unknown".to_string(),
        ..Default::default()
    };
    assert_eq!(build_generator(&config).provider(), "mock");
}

#[test]
fn test_genai_generator_keeps_model() {
    let generator = GenaiGenerator::new(ProviderKind::OpenAi, "gpt-4o-mini");
    assert_eq!(generator.model(), "gpt-4o-mini");
    assert_eq!(generator.provider(), "openai");
}

#[test]
fn test_provider_kind_resolves_its_own_adapter() {
    use genai::adapter::AdapterKind;

    assert_eq!(ProviderKind::Mock.adapter_kind(), None);
    assert_eq!(ProviderKind::OpenAi.adapter_kind(), Some(AdapterKind::OpenAI));
    assert_eq!(
        ProviderKind::Anthropic.adapter_kind(),
        Some(AdapterKind::Anthropic)
    );

    for kind in [ProviderKind::OpenAi, ProviderKind::Anthropic] {
        assert_eq!(resolve_adapter(kind.default_model()), kind.adapter_kind());
        assert!(kind.serves_model(kind.default_model()));
    }
}

#[test]
fn test_genai_generator_replaces_foreign_model() {
    use genai::adapter::AdapterKind;

    let generator = GenaiGenerator::new(ProviderKind::Anthropic, "gpt-4o-mini");
    assert_eq!(generator.model(), "claude-3-5-haiku-latest");
    assert_eq!(generator.adapter_kind(), Some(AdapterKind::Anthropic));

    let generator = GenaiGenerator::new(ProviderKind::Anthropic, "claude-3-haiku-20240307");
    assert_eq!(generator.model(), "claude-3-haiku-20240307");

    let generator = GenaiGenerator::new(ProviderKind::OpenAi, "claude-3-haiku-20240307");
    assert_eq!(generator.model(), "gpt-4o-mini");
    assert_eq!(generator.adapter_kind(), Some(AdapterKind::OpenAI));
}

#[test]
fn test_anthropic_config_with_default_model_routes_to_anthropic() {
    use genai::adapter::AdapterKind;

    let config = Config {
        llm_provider: "anthropic".to_string(),
        ..Default::default()
    };
    assert_eq!(config.llm_model, "gpt-4o-mini");

    let model = resolve_provider(&config.llm_provider).select_model(&config.llm_model);
    assert_eq!(resolve_adapter(&model), Some(AdapterKind::Anthropic));
    assert_eq!(build_generator(&config).provider(), "anthropic");
}

#[test]
fn test_mock_mfa_template() {
    let passages = vec![
        passage("HR-001", "Employees must complete security training annually."),
        passage("IT-101", "MFA is required for administrative access to all systems."),
    ];
    let draft = MockGenerator::new().draft("What are the MFA requirements?", &passages);

    assert_eq!(
        draft,
        "MFA is required for administrative access to all systems [IT-101]."
    );
}

#[test]
fn test_mock_secret_template_matches_vault_passages() {
    let passages = vec![passage(
        "SEC-007",
        "Store keys in a vault, never in source control.",
    )];
    let draft = MockGenerator::new().draft("where do credentials go?", &passages);

    assert!(draft.starts_with("Secrets must not be committed to git."));
    assert!(draft.ends_with("[SEC-007]."));
}

#[test]
fn test_mock_template_without_evidence_falls_through() {
    // The prompt mentions passwords but no passage does: echo the first passage.
    let passages = vec![passage("HR-002", "Remote work requires VPN.")];
    let draft = MockGenerator::new().draft("password rules?", &passages);

    assert_eq!(draft, "Remote work requires VPN. [HR-002].");
}

#[test]
fn test_mock_no_passages() {
    let draft = MockGenerator::new().draft("anything", &[]);
    assert_eq!(draft, NO_POLICY_FOUND);
}

#[tokio::test]
async fn test_mock_generate_is_infallible() {
    let passages = vec![passage("COMP-001", "PII must be masked in logs.")];
    let draft = MockGenerator::new()
        .generate("How is PII handled?", &passages)
        .await
        .expect("mock never fails");

    assert!(draft.contains("[COMP-001]"));
    assert!(draft.starts_with("PII should be masked"));
}

#[test]
fn test_scripted_generator_counts_calls() {
    let generator = ScriptedGenerator::replying("Answer [X-1].");

    let first = tokio_test::block_on(generator.generate("prompt one", &[]));
    let second = tokio_test::block_on(generator.generate("prompt two", &[]));

    assert_eq!(first.expect("scripted reply"), "Answer [X-1].");
    assert!(second.is_ok());
    assert_eq!(generator.calls(), 2);
    assert_eq!(generator.last_prompt().as_deref(), Some("prompt two"));
}

#[test]
fn test_scripted_generator_failure() {
    let generator = ScriptedGenerator::failing("provider down");
    let err = tokio_test::block_on(generator.generate("p", &[])).unwrap_err();

    assert!(matches!(err, GeneratorError::Failed(_)));
    assert!(err.to_string().contains("provider down"));
}

#[test]
fn test_generator_error_messages() {
    let err = GeneratorError::Provider {
        provider: "openai",
        reason: "timeout".to_string(),
    };
    assert_eq!(err.to_string(), "provider 'openai' request failed: timeout");

    let err = GeneratorError::EmptyCompletion {
        provider: "anthropic",
    };
    assert!(err.to_string().contains("empty completion"));
}
