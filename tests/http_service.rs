use promptflow::models::StrategyType;
use promptflow::services::api_client::{ANALYZE_FALLBACK, GENERATE_FALLBACK};
use promptflow::{ErrorKind, HttpPromptService, PromptService, WizardError};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn analysis_body() -> Value {
    json!({
        "query": "마케팅 이메일 작성법",
        "intent": {
            "primary_intent": "콘텐츠 생성",
            "keywords": ["마케팅", "이메일"],
            "target_audience": "마케터",
            "output_type": "가이드",
            "domain": "마케팅",
            "confidence": 0.87
        },
        "trends": {
            "trends": ["개인화", "AI 카피라이팅", "모바일 최적화"],
            "summary": "개인화가 핵심입니다.",
            "sources": ["https://example.com/a"]
        },
        "confirmation_message": "이 방향으로 진행할까요?"
    })
}

fn prompts_body() -> Value {
    json!({
        "prompts": {
            "prompts": [
                {"type": "cot", "name": "사고 연쇄 (CoT)", "icon": "🧠",
                 "description": "논리적 단계별 사고", "best_for": "복잡한 계획/분석",
                 "prompt": "단계별로 생각해 봅시다."},
                {"type": "few_shot", "name": "예시 학습 (Few-Shot)", "icon": "📝",
                 "description": "예시를 통한 스타일 모방", "best_for": "블로그/에세이",
                 "prompt": "다음 예시를 참고하세요."}
            ],
            "query": "마케팅 이메일 작성법",
            "intent": analysis_body()["intent"].clone(),
            "trends": analysis_body()["trends"].clone()
        },
        "selection_message": "원하는 전략을 선택하세요."
    })
}

#[tokio::test]
async fn analyze_posts_query_and_parses_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(body_json(json!({ "query": "마케팅 이메일 작성법" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpPromptService::new(server.uri()).unwrap();
    let result = service.analyze("마케팅 이메일 작성법").await.unwrap();

    assert_eq!(result.intent.confidence, 0.87);
    assert_eq!(result.trends.trends.len(), 3);
    assert_eq!(result.intent.keywords, vec!["마케팅", "이메일"]);
}

#[tokio::test]
async fn server_error_text_is_kept_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "쿼리가 너무 짧습니다" })),
        )
        .mount(&server)
        .await;

    let service = HttpPromptService::new(server.uri()).unwrap();
    let err = service.analyze("a").await.unwrap_err();

    assert!(matches!(err, WizardError::Server { status: 400, .. }));
    assert_eq!(err.to_string(), "쿼리가 너무 짧습니다");
}

#[tokio::test]
async fn fastapi_detail_is_recognized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "분석 실패: upstream timeout" })),
        )
        .mount(&server)
        .await;

    let service = HttpPromptService::new(server.uri()).unwrap();
    let err = service.analyze("query").await.unwrap_err();

    assert_eq!(err.to_string(), "분석 실패: upstream timeout");
}

#[tokio::test]
async fn missing_error_text_falls_back_per_operation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate-prompts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&server)
        .await;

    let service = HttpPromptService::new(server.uri()).unwrap();
    let err = service.analyze("query").await.unwrap_err();
    assert_eq!(err.to_string(), ANALYZE_FALLBACK);

    let analysis = serde_json::from_value(analysis_body()).unwrap();
    let err = service.generate_prompts(&analysis).await.unwrap_err();
    assert_eq!(err.to_string(), GENERATE_FALLBACK);
}

#[tokio::test]
async fn malformed_success_body_is_a_schema_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "query": "q" })))
        .mount(&server)
        .await;

    let service = HttpPromptService::new(server.uri()).unwrap();
    let err = service.analyze("q").await.unwrap_err();

    assert!(matches!(err, WizardError::Schema(_)));
    assert_eq!(err.kind(), ErrorKind::Remote);
}

#[tokio::test]
async fn out_of_range_confidence_is_rejected() {
    let server = MockServer::start().await;
    let mut body = analysis_body();
    body["intent"]["confidence"] = json!(1.7);
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let service = HttpPromptService::new(server.uri()).unwrap();
    let err = service.analyze("q").await.unwrap_err();

    assert!(matches!(err, WizardError::Schema(_)));
}

#[tokio::test]
async fn generation_sends_analysis_back_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-prompts"))
        .and(body_json(analysis_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(prompts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpPromptService::new(server.uri()).unwrap();
    let analysis = serde_json::from_value(analysis_body()).unwrap();
    let response = service.generate_prompts(&analysis).await.unwrap();

    let names: Vec<&str> = response.prompts.prompts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["사고 연쇄 (CoT)", "예시 학습 (Few-Shot)"]);
    assert_eq!(response.prompts.prompts[1].strategy_type, Some(StrategyType::FewShot));
    assert_eq!(response.selection_message.as_deref(), Some("원하는 전략을 선택하세요."));
}

#[tokio::test]
async fn empty_prompt_set_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-prompts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "prompts": { "prompts": [] } })),
        )
        .mount(&server)
        .await;

    let service = HttpPromptService::new(server.uri()).unwrap();
    let analysis = serde_json::from_value(analysis_body()).unwrap();
    let err = service.generate_prompts(&analysis).await.unwrap_err();

    assert!(matches!(err, WizardError::Schema(_)));
}

#[tokio::test]
async fn strategies_and_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/strategies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "strategies": [
                {"type": "meta", "name": "전문가 모드 (Meta-Prompting)", "icon": "👨‍🏫",
                 "description": "전문가 페르소나", "best_for": "객관적 분석"},
                {"type": "structured", "name": "구조화 분석 (Structured)", "icon": "📊",
                 "description": "체계적 보고서", "best_for": "데이터 분석/리서치"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;

    let service = HttpPromptService::new(format!("{}/", server.uri())).unwrap();
    let strategies = service.list_strategies().await.unwrap();
    assert_eq!(strategies.len(), 2);
    assert_eq!(strategies[0].strategy_type, StrategyType::Meta);
    assert_eq!(service.health().await.unwrap(), "healthy");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let service = HttpPromptService::new("http://127.0.0.1:1").unwrap();
    let err = service.analyze("query").await.unwrap_err();

    assert!(matches!(err, WizardError::Transport(_)));
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert!(err.to_string().starts_with("백엔드 서버에 연결할 수 없습니다"));
}
