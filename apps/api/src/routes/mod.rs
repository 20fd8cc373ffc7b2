pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    response::Html,
    routing::{get, post},
    Router,
};

use crate::outreach::handlers;
use crate::state::AppState;

/// Two-panel page: URL input, email preview with rich-text copy, resume advice.
const INDEX_HTML: &str = include_str!("../../static/index.html");

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs/extract", post(handlers::handle_extract_job))
        .route("/api/v1/outreach/generate", post(handlers::handle_generate))
        .route(
            "/api/v1/outreach/generate/upload",
            post(handlers::handle_generate_upload)
                .layer(DefaultBodyLimit::max(handlers::MAX_RESUME_UPLOAD_BYTES)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::outreach::pipeline::Pipeline;
    use crate::outreach::presenter::Presenter;
    use crate::testing::{ScriptedModel, StaticFetcher, StaticReader};

    const EXTRACTION_REPLY: &str = r#"{"company_name": "Acme Corp", "position": "Backend Engineer", "tech_stack": ["Go", "Postgres"]}"#;
    const GENERATION_REPLY: &str =
        r#"{"email_content": "Hi **Acme Corp**", "resume_advice": "- Lead with Go"}"#;

    fn app(fetcher: StaticFetcher, model: ScriptedModel) -> Router {
        let pipeline = Pipeline::new(
            Arc::new(fetcher),
            Arc::new(StaticReader::text("Jane Doe, Go developer")),
            Arc::new(model),
        );
        build_router(AppState {
            pipeline,
            presenter: Presenter,
            default_resume: PathBuf::from("resume.txt"),
        })
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload_request(mode: &str, resume: &str) -> Request<Body> {
        let boundary = "X-BOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"job_url\"\r\n\r\nhttps://example.com/jobs/1\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"mode\"\r\n\r\n{mode}\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"resume.txt\"\r\nContent-Type: text/plain\r\n\r\n{resume}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/outreach/generate/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(StaticFetcher::page("x"), ScriptedModel::new())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let response = app(StaticFetcher::page("x"), ScriptedModel::new())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_returns_output_and_presentation() {
        let response = app(
            StaticFetcher::page("Backend Engineer at Acme Corp, Go and Postgres"),
            ScriptedModel::replying(&[EXTRACTION_REPLY, GENERATION_REPLY]),
        )
        .oneshot(json_post(
            "/api/v1/outreach/generate",
            serde_json::json!({"job_url": "https://example.com/jobs/1"}),
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["job_record"]["company_name"], "Acme Corp");
        assert_eq!(body["output"]["kind"], "email_with_advice");
        assert_eq!(body["output"]["email_markdown"], "Hi **Acme Corp**");
        assert_eq!(body["presentation"]["panels"].as_array().unwrap().len(), 2);
        assert!(body["presentation"]["copy"]["html"]
            .as_str()
            .unwrap()
            .contains("<strong>Acme Corp</strong>"));
        assert!(body["run_id"].is_string());
    }

    #[tokio::test]
    async fn test_generate_fetch_failure_has_error_body() {
        let response = app(StaticFetcher::failing(404), ScriptedModel::new())
            .oneshot(json_post(
                "/api/v1/outreach/generate",
                serde_json::json!({"job_url": "https://example.com/gone"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "FETCH_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to fetch content"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_url() {
        let response = app(StaticFetcher::page("x"), ScriptedModel::new())
            .oneshot(json_post(
                "/api/v1/outreach/generate",
                serde_json::json!({"job_url": "  "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_degraded_record() {
        let response = app(
            StaticFetcher::page("unused"),
            ScriptedModel::replying(&["No job found here."]),
        )
        .oneshot(json_post(
            "/api/v1/jobs/extract",
            serde_json::json!({"raw_text": "Sign in to view this job"}),
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["job_record"]["raw_response"],
            "No job found here."
        );
    }

    #[tokio::test]
    async fn test_upload_with_simple_mode() {
        let response = app(
            StaticFetcher::page("Backend Engineer at Acme Corp"),
            ScriptedModel::replying(&[EXTRACTION_REPLY, "Dear Acme team"]),
        )
        .oneshot(upload_request("simple", "Jane Doe, Rust"))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["output"]["kind"], "email");
        assert_eq!(body["output"]["email_markdown"], "Dear Acme team");
    }

    #[tokio::test]
    async fn test_upload_larger_than_axum_default_is_accepted() {
        let resume = "x".repeat(3 * 1024 * 1024);

        let response = app(
            StaticFetcher::page("Backend Engineer at Acme Corp"),
            ScriptedModel::replying(&[EXTRACTION_REPLY, GENERATION_REPLY]),
        )
        .oneshot(upload_request("extended", &resume))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_over_limit_names_the_limit() {
        let resume = "x".repeat(handlers::MAX_RESUME_UPLOAD_BYTES + 1);

        let response = app(StaticFetcher::page("x"), ScriptedModel::new())
            .oneshot(upload_request("extended", &resume))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(
            body["error"]["message"],
            "Resume upload exceeds the 10 MB limit"
        );
    }
}
