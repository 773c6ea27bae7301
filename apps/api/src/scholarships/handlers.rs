//! Axum route handlers for the scholarship search API.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::completion_client::prompts::SCHOLARSHIP_SYSTEM;
use crate::errors::AppError;
use crate::scholarships::models::ScholarshipRecord;
use crate::scholarships::parser::parse_scholarships;
use crate::scholarships::profile::{build_search_query, StudentProfile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub scholarships: Vec<ScholarshipRecord>,
    pub total: usize,
}

/// POST /api/scholarships/search
///
/// Validates the profile, asks the completion API, and parses the answer into
/// 1–8 scholarships. Upstream failures map to distinct status codes; a
/// successful answer with nothing usable still returns the fallback catalog.
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<StudentProfile>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let include_details = !state.config.is_production();

    match search(&state, payload)
        .instrument(info_span!("scholarship_search", %request_id))
        .await
    {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.to_response(include_details),
    }
}

async fn search(
    state: &AppState,
    payload: Result<Json<StudentProfile>, JsonRejection>,
) -> Result<SearchResponse, AppError> {
    let Json(profile) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    profile.validate()?;

    info!(
        "Searching scholarships for '{}' at '{}'",
        profile.course.trim(),
        profile.institution.trim()
    );

    let query = build_search_query(&profile);
    let answer = state.completion.complete(SCHOLARSHIP_SYSTEM, &query).await?;

    let span = Span::current();
    let outcome = tokio::task::spawn_blocking(move || span.in_scope(|| parse_scholarships(&answer)))
        .await
        .map_err(anyhow::Error::from)?;

    info!(
        count = outcome.scholarships.len(),
        source = ?outcome.source,
        "Scholarship search complete"
    );

    Ok(SearchResponse {
        success: true,
        total: outcome.scholarships.len(),
        scholarships: outcome.scholarships,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::completion_client::{CompletionError, CompletionProvider};
    use crate::config::Config;
    use crate::routes::build_router;
    use crate::scholarships::catalog::fallback_catalog;
    use crate::state::AppState;

    enum Canned {
        Answer(&'static str),
        Unauthorized,
        Timeout,
        MissingKey,
    }

    struct StubProvider(Canned);

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, CompletionError> {
            assert!(prompt.contains("Institution:"));
            match &self.0 {
                Canned::Answer(text) => Ok(text.to_string()),
                Canned::Unauthorized => Err(CompletionError::Unauthorized),
                Canned::Timeout => Err(CompletionError::Timeout),
                Canned::MissingKey => Err(CompletionError::MissingApiKey),
            }
        }
    }

    const ANSWER: &str = "Here are some options for you:\n\n\
        1. **Central Sector Scholarship Scheme**\n\
        - Amount: ₹12,000 per year\n\
        - Eligibility: for students above 80th percentile in class XII\n\
        - Deadline: October 31, 2025\n\
        - Website: scholarships.gov.in\n\n\
        2. **AICTE Pragati Scholarship for Girls**\n\
        - Amount: ₹50,000 annually\n\
        - Eligibility: for girl students admitted to AICTE approved technical institutions\n\
        - Deadline: December 31, 2025\n\
        - Website: https://www.aicte-india.org/schemes\n";

    fn app(canned: Canned, config: Config) -> axum::Router {
        build_router(AppState::new(Arc::new(StubProvider(canned)), config))
    }

    fn search_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/scholarships/search")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn profile_body() -> Value {
        json!({"institution": "Anna University", "course": "B.E. Mechanical", "category": "General"})
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_search_returns_parsed_scholarships() {
        let (status, body) = send(
            app(Canned::Answer(ANSWER), Config::for_tests()),
            search_request(profile_body()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 2);
        assert_eq!(body["scholarships"][0]["name"], "Central Sector Scholarship Scheme");
        assert_eq!(body["scholarships"][0]["link"], "https://scholarships.gov.in");
        assert_eq!(
            body["scholarships"][1]["link"],
            "https://www.aicte-india.org/schemes"
        );
        assert_eq!(body["scholarships"][1]["amount"], "₹50,000 annually");
    }

    #[tokio::test]
    async fn test_unusable_answer_returns_fallback_catalog() {
        let (status, body) = send(
            app(
                Canned::Answer("I'm sorry, I can't help with that request right now."),
                Config::for_tests(),
            ),
            search_request(profile_body()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let catalog = fallback_catalog();
        assert_eq!(body["total"], catalog.len());
        assert_eq!(body["scholarships"][0]["name"], catalog[0].name.as_str());
    }

    #[tokio::test]
    async fn test_missing_course_is_bad_request() {
        let (status, body) = send(
            app(Canned::Answer(ANSWER), Config::for_tests()),
            search_request(json!({"institution": "Anna University"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Institution and course are required");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/scholarships/search")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(Canned::Answer(ANSWER), Config::for_tests()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_upstream_failures_map_to_status_codes() {
        let cases = [
            (Canned::Unauthorized, StatusCode::UNAUTHORIZED),
            (Canned::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (Canned::MissingKey, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (canned, expected) in cases {
            let (status, body) =
                send(app(canned, Config::for_tests()), search_request(profile_body())).await;
            assert_eq!(status, expected);
            assert_eq!(body["success"], false);
            assert!(body.get("details").is_some());
        }
    }

    #[tokio::test]
    async fn test_production_hides_details() {
        let mut config = Config::for_tests();
        config.app_env = "production".to_string();
        let (status, body) =
            send(app(Canned::Timeout, config), search_request(profile_body())).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_rejects_excess_requests() {
        let mut config = Config::for_tests();
        config.rate_limit_max_requests = 2;
        let app = app(Canned::Answer(ANSWER), config);

        for _ in 0..2 {
            let (status, _) = send(app.clone(), search_request(profile_body())).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = send(app, search_request(profile_body())).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_rate_limit_ignores_rotating_forwarded_for() {
        let mut config = Config::for_tests();
        config.rate_limit_max_requests = 2;
        let app = app(Canned::Answer(ANSWER), config);

        let mut statuses = Vec::new();
        for i in 0..5 {
            let mut request = search_request(profile_body());
            request
                .headers_mut()
                .insert("x-forwarded-for", format!("10.0.0.{i}").parse().unwrap());
            let (status, _) = send(app.clone(), request).await;
            statuses.push(status);
        }
        assert_eq!(&statuses[..2], &[StatusCode::OK, StatusCode::OK]);
        assert!(statuses[2..].iter().all(|s| *s == StatusCode::TOO_MANY_REQUESTS));
    }

    #[tokio::test]
    async fn test_rate_limit_keys_on_forwarded_for_when_trusted() {
        let mut config = Config::for_tests();
        config.rate_limit_max_requests = 1;
        config.trust_proxy_headers = true;
        let app = app(Canned::Answer(ANSWER), config);

        for ip in ["10.0.0.1", "10.0.0.2"] {
            let mut request = search_request(profile_body());
            request
                .headers_mut()
                .insert("x-forwarded-for", ip.parse().unwrap());
            let (status, _) = send(app.clone(), request).await;
            assert_eq!(status, StatusCode::OK);
        }
    }
}
