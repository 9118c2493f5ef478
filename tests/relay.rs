use pretty_assertions::assert_eq;
use prompt_relay::models::{KeywordResponse, ModelsResponse, PromptResponse, ServerConfig};
use prompt_relay::server::{self, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{body_string_contains, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEMINI_PATH: &str = r"^/v1beta/models/[^/]+:generateContent$";

/// Starts the relay on an ephemeral port with both providers pointed at `upstream`.
async fn spawn_relay(upstream: &MockServer) -> String {
    let config = ServerConfig {
        gemini_base_url: Some(upstream.uri()),
        openrouter_base_url: Some(upstream.uri()),
        prompt_delay: Duration::ZERO,
        ..ServerConfig::default()
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve_on(listener, AppState::from_config(&config)));

    format!("http://{}", addr)
}

fn gemini_text(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    }))
}

fn openrouter_text(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": text }, "finish_reason": "stop" }]
    }))
}

async fn message_of(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_gemini_keywords_returns_first_count_lines() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(GEMINI_PATH))
        .and(header("x-goog-api-key", "g-key"))
        .respond_with(gemini_text("tree\nriver\nriver\nmountain\nsky\nstone"))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/keywords/generate", base))
        .header("X-Provider", "gemini")
        .header("X-API-Key", "g-key")
        .json(&json!({ "input": "nature", "count": 5 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: KeywordResponse = response.json().await.unwrap();
    assert_eq!(body.keywords, vec!["tree", "river", "river", "mountain", "sky"]);
}

#[tokio::test]
async fn test_vector_prompt_falls_back_on_empty_completion() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(GEMINI_PATH))
        .respond_with(gemini_text(""))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/prompts/generate", base))
        .header("X-Provider", "gemini")
        .header("X-API-Key", "g-key")
        .json(&json!({ "keywords": ["owl"], "type": "vector", "count": 1 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: PromptResponse = response.json().await.unwrap();
    assert_eq!(
        body.prompts,
        vec!["A clean vector illustration of owl with modern design elements and vibrant colors."]
    );
}

#[tokio::test]
async fn test_openrouter_prompts_one_call_per_keyword_in_order() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-or"))
        .and(body_string_contains("keyword \\\"owl\\\""))
        .respond_with(openrouter_text("A snowy owl on a fence post, backlit by winter sun."))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(body_string_contains("keyword \\\"fox\\\""))
        .respond_with(openrouter_text("fox"))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/prompts/generate", base))
        .header("X-Provider", "openrouter")
        .header("Authorization", "Bearer sk-or")
        .header("X-Model", "openai/gpt-4o-mini")
        .json(&json!({ "keywords": ["owl", "fox", "elk"], "type": "photography", "count": 2 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: PromptResponse = response.json().await.unwrap();
    assert_eq!(
        body.prompts,
        vec![
            "A snowy owl on a fence post, backlit by winter sun.",
            "A professional photograph featuring fox with dramatic lighting and artistic composition.",
        ]
    );
}

#[tokio::test]
async fn test_unknown_provider_is_rejected_before_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(gemini_text("never"))
        .expect(0)
        .mount(&upstream)
        .await;
    let base = spawn_relay(&upstream).await;
    let client = reqwest::Client::new();

    for provider in [None, Some("openai")] {
        let mut request = client
            .post(format!("{}/api/keywords/generate", base))
            .header("X-API-Key", "g-key")
            .json(&json!({ "input": "nature", "count": 5 }));
        if let Some(provider) = provider {
            request = request.header("X-Provider", provider);
        }

        let response = request.send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(message_of(response).await.contains("API provider must be specified"));
    }
}

#[tokio::test]
async fn test_missing_credentials_are_rejected_before_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(gemini_text("never"))
        .expect(0)
        .mount(&upstream)
        .await;
    let base = spawn_relay(&upstream).await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/prompts/generate", base);
    let body = json!({ "keywords": ["owl"], "type": "vector", "count": 1 });

    let gemini_without_key = client
        .post(&url)
        .header("X-Provider", "gemini")
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(gemini_without_key.status(), StatusCode::BAD_REQUEST);
    assert!(message_of(gemini_without_key).await.contains("Gemini API key required"));

    let openrouter_without_bearer = client
        .post(&url)
        .header("X-Provider", "openrouter")
        .header("X-Model", "m")
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(openrouter_without_bearer.status(), StatusCode::UNAUTHORIZED);

    let openrouter_without_model = client
        .post(&url)
        .header("X-Provider", "openrouter")
        .header("Authorization", "Bearer sk-or")
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(openrouter_without_model.status(), StatusCode::BAD_REQUEST);
    assert!(message_of(openrouter_without_model)
        .await
        .contains("model selection required"));
}

#[tokio::test]
async fn test_schema_violations_are_bad_requests() {
    let upstream = MockServer::start().await;
    let base = spawn_relay(&upstream).await;
    let client = reqwest::Client::new();

    let cases = [
        ("/api/keywords/generate", json!({ "input": "nature", "count": 0 })),
        ("/api/keywords/generate", json!({ "input": "nature", "count": 201 })),
        ("/api/keywords/generate", json!({ "input": "", "count": 5 })),
        ("/api/keywords/generate", json!({ "count": 5 })),
        ("/api/prompts/generate", json!({ "keywords": [], "type": "vector", "count": 1 })),
        ("/api/prompts/generate", json!({ "keywords": ["owl"], "type": "watercolor", "count": 1 })),
        ("/api/openrouter/models", json!({ "apiKey": "" })),
    ];

    for (route, body) in cases {
        let response = client
            .post(format!("{}{}", base, route))
            .header("X-Provider", "gemini")
            .header("X-API-Key", "g-key")
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{} {}",
            route,
            body
        );
        assert!(!message_of(response).await.is_empty());
    }

    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_500_with_status_in_message() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&upstream)
        .await;
    let base = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/keywords/generate", base))
        .header("X-Provider", "gemini")
        .header("X-API-Key", "g-key")
        .json(&json!({ "input": "nature", "count": 5 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message_of(response).await, "Gemini API error: 503 overloaded");
}

#[tokio::test]
async fn test_models_endpoint_lists_catalog() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models"))
        .and(header("Authorization", "Bearer sk-or"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "openai/gpt-4o", "name": "GPT-4o", "description": "Flagship" },
                { "id": "meta/llama-3" }
            ]
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/openrouter/models", base))
        .json(&json!({ "apiKey": "sk-or" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ModelsResponse = response.json().await.unwrap();
    assert_eq!(body.models.len(), 2);
    assert_eq!(body.models[1].name, "meta/llama-3");
    assert_eq!(body.models[0].description.as_deref(), Some("Flagship"));
}

#[tokio::test]
async fn test_cors_preflight_and_response_headers() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(GEMINI_PATH))
        .respond_with(gemini_text("tree"))
        .mount(&upstream)
        .await;
    let base = spawn_relay(&upstream).await;
    let client = reqwest::Client::new();

    let preflight = client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/keywords/generate", base),
        )
        .header("Origin", "https://app.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "x-provider,x-api-key")
        .send()
        .await
        .unwrap();

    assert_eq!(preflight.status(), StatusCode::OK);
    let headers = preflight.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let allowed = headers["access-control-allow-headers"]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    for name in ["content-type", "authorization", "x-provider", "x-api-key", "x-model"] {
        assert!(allowed.contains(name), "missing {} in {}", name, allowed);
    }
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));

    let response = client
        .post(format!("{}/api/keywords/generate", base))
        .header("Origin", "https://app.example")
        .header("X-Provider", "gemini")
        .header("X-API-Key", "g-key")
        .json(&json!({ "input": "nature", "count": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
