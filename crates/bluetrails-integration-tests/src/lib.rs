//! End-to-end integration tests for the BlueTrails gateway
//!
//! These tests wire the full router to a real store client pointed at a
//! wiremock PostgREST double, then drive HTTP requests through the stack.

#[cfg(test)]
mod e2e_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use bluetrails_gateway::{AppState, CorsConfig, api_router};
    use bluetrails_store::{StoreClient, StoreConfig};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn test_app(mock_server: &MockServer) -> Router {
        let store =
            StoreClient::new(StoreConfig::new(mock_server.uri(), "test-key")).unwrap();
        let cors = CorsConfig::from_comma_separated(
            "http://localhost:5173,https://bluetrails.pages.dev",
        );
        api_router(AppState::new(Arc::new(store), cors))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn pgrst_no_rows() -> ResponseTemplate {
        ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "details": "The result contains 0 rows",
            "hint": null,
            "message": "JSON object requested, multiple (or no) rows returned"
        }))
    }

    #[tokio::test]
    async fn test_e2e_health() {
        let mock_server = MockServer::start().await;
        let response = test_app(&mock_server).oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_e2e_animals_list_with_english_fallback() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_animals"))
            .and(query_param("locale", "eq.id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_animals"))
            .and(query_param("locale", "eq.en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"slug": "dolphin", "locale": "en", "display_order": 1}
            ])))
            .mount(&mock_server)
            .await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/animals?locale=id"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][0]["slug"], "dolphin");
        assert_eq!(
            json["message"],
            "Animals retrieved successfully (fallback to English, 'id' not available)"
        );
    }

    #[tokio::test]
    async fn test_e2e_invalid_locale_never_reaches_store() {
        // No mocks mounted: a store call would fail the test with a 500.
        let mock_server = MockServer::start().await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/animals?locale=xx"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_LOCALE");
        assert_eq!(
            json["error"]["message"],
            "Invalid locale. Supported locales: en, id, hi, zh"
        );
    }

    #[tokio::test]
    async fn test_e2e_animal_detail_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_animal_complete"))
            .and(query_param("slug", "eq.green-sea-turtle"))
            .and(query_param("locale", "eq.en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"slug": "green-sea-turtle", "locale": "en", "name": "Green Sea Turtle"}
            )))
            .mount(&mock_server)
            .await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/animals/green-sea-turtle"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["name"], "Green Sea Turtle");
        assert_eq!(
            json["message"],
            "Animal 'green-sea-turtle' retrieved successfully"
        );
    }

    #[tokio::test]
    async fn test_e2e_animal_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_animal_complete"))
            .respond_with(pgrst_no_rows())
            .mount(&mock_server)
            .await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/animals/nonexistent-slug"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "ANIMAL_NOT_FOUND");
        assert_eq!(json["error"]["status"], 404);
    }

    #[tokio::test]
    async fn test_e2e_invalid_slug_rejected() {
        let mock_server = MockServer::start().await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/animals/Bad_Slug!"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_SLUG");
    }

    #[tokio::test]
    async fn test_e2e_sites_empty_list_is_200() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_animal_sites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/animals/dolphin/sites"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn test_e2e_sites_upstream_failure_is_502() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_animal_sites"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"message": "db connection lost"})),
            )
            .mount(&mock_server)
            .await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/animals/dolphin/sites"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "SUPABASE_ERROR");
        assert!(
            json["error"]["message"]
                .as_str()
                .unwrap()
                .contains("db connection lost")
        );
    }

    #[tokio::test]
    async fn test_e2e_quiz_questions_store_failure_is_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_quiz_questions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/quiz/questions"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "DATABASE_ERROR");
        assert_eq!(json["error"]["message"], "Failed to fetch quiz questions");
    }

    #[tokio::test]
    async fn test_e2e_epa_parameter_validation() {
        let mock_server = MockServer::start().await;
        let app = test_app(&mock_server);

        let response = app
            .clone()
            .oneshot(get("/api/epa/prediction?site_id=12"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "MISSING_PARAMETER");
        assert_eq!(json["error"]["message"], "Missing required parameter: date");

        let response = app
            .oneshot(get("/api/epa/prediction?site_id=12&date=2024-13-45x"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_DATE_FORMAT");
    }

    #[tokio::test]
    async fn test_e2e_epa_prediction_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_epa_predictions"))
            .and(query_param("site_id", "eq.12"))
            .and(query_param("date", "eq.2024-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"site_id": 12, "date": "2024-06-01", "prediction": "good"}
            )))
            .mount(&mock_server)
            .await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/epa/prediction?site_id=12&date=2024-06-01"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["prediction"], "good");
    }

    #[tokio::test]
    async fn test_e2e_epa_prediction_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_epa_predictions"))
            .respond_with(pgrst_no_rows())
            .mount(&mock_server)
            .await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/epa/prediction?site_id=99&date=2024-06-01"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "PREDICTION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_e2e_options_preflight() {
        let mock_server = MockServer::start().await;

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/quiz/questions")
            .header(header::ORIGIN, "https://bluetrails.pages.dev")
            .body(Body::empty())
            .unwrap();

        let response = test_app(&mock_server).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "https://bluetrails.pages.dev"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                .unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_e2e_unmatched_route() {
        let mock_server = MockServer::start().await;

        let response = test_app(&mock_server)
            .oneshot(get("/api/stories"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_e2e_repeated_get_is_idempotent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/v_home_speeches"))
            .and(query_param("locale", "eq.en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"speech_order": 1, "text": "Welcome to BlueTrails"}
            ])))
            .mount(&mock_server)
            .await;

        let app = test_app(&mock_server);

        let first = body_json(app.clone().oneshot(get("/api/speeches")).await.unwrap()).await;
        let second = body_json(app.oneshot(get("/api/speeches")).await.unwrap()).await;

        assert_eq!(first, second);
    }
}
