use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::middleware;
use crate::routes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Records scoped to a user, and directory edits, need the bearer subject.
    let protected = Router::new()
        .route("/assessments/dass21", post(routes::assessments::submit_dass21))
        .route("/assessments/history", get(routes::assessments::history))
        .route("/therapists", post(routes::therapists::register))
        .route_layer(axum_mw::from_fn(middleware::auth::require_auth));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Instruments (no auth, public schema data)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        // Stateless decisions
        .route("/triage/evaluate", post(routes::triage::evaluate))
        .route("/crisis/respond", post(routes::crisis::respond))
        .route("/companion/reply", post(routes::companion::reply))
        .route("/ads/slot", get(routes::ads::slot))
        .route("/sos/trigger", post(routes::sos::trigger))
        // Session flows
        .route(
            "/flows/first-contact/start",
            post(routes::flows::start_first_contact),
        )
        .route("/flows/dass21/question", get(routes::flows::dass21_question))
        .route("/flows/dass21/answer", post(routes::flows::dass21_answer))
        .route(
            "/flows/negotiation/message",
            post(routes::flows::negotiation_message),
        )
        .route("/flows/eea/step", post(routes::flows::eea_step))
        // Therapist directory (public search)
        .route("/therapists/search", get(routes::therapists::search))
        .route("/directory/search", get(routes::therapists::search))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use amparo_flows::{FlowContext, Policy};
    use amparo_storage::memory::MemoryStore;

    use super::*;

    fn app() -> Router {
        let state = AppState {
            flows: FlowContext::new(Arc::new(MemoryStore::new()), Policy::default()),
        };
        build_router(state)
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn bearer(mut req: Request<Body>, token: &str) -> Request<Body> {
        req.headers_mut()
            .insert("authorization", format!("Bearer {token}").parse().unwrap());
        req
    }

    fn jwt(claims: Value) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#),
            URL_SAFE_NO_PAD.encode(claims.to_string())
        )
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(&app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn instrument_detail_lists_three_domains() {
        let app = app();
        let (status, body) = send(&app, get("/instruments/dass21")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["domains"].as_array().unwrap().len(), 3);
        assert_eq!(body["items"].as_array().unwrap().len(), 21);

        let (status, _) = send(&app, get("/instruments/phq9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn explicit_ideation_escalates_to_critical() {
        let (status, body) = send(
            &app(),
            post_json("/triage/evaluate", json!({ "dass_level": 0, "text": "Me quiero morir" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk_level"], 3);
        assert_eq!(body["flags"], json!(["explicit_ideation"]));
        assert_eq!(
            body["actions"],
            json!([
                "hide_ads",
                "show_sos",
                "notify_therapist_if_consented",
                "force_crisis_screen",
                "offer_emergency_call"
            ])
        );
    }

    #[tokio::test]
    async fn triage_rejects_out_of_range_level() {
        let (status, _) = send(
            &app(),
            post_json("/triage/evaluate", json!({ "dass_level": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn assessments_require_bearer_token() {
        let (status, _) = send(
            &app(),
            post_json("/assessments/dass21", json!({ "answers": vec![0; 21] })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn twenty_answers_are_a_bad_request() {
        let app = app();
        let mut req = post_json("/assessments/dass21", json!({ "answers": vec![1; 20] }));
        req.headers_mut()
            .insert("authorization", "Bearer user-1".parse().unwrap());

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("21"));

        let mut req = get("/assessments/history");
        req.headers_mut()
            .insert("authorization", "Bearer user-1".parse().unwrap());
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn first_contact_through_negotiation() {
        let app = app();
        let (status, started) = send(
            &app,
            post_json("/flows/first-contact/start", json!({ "channel": "whatsapp" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let session_id = started["session_id"].as_str().unwrap().to_string();

        let mut last = Value::Null;
        for index in 0..21 {
            let (status, body) = send(
                &app,
                post_json(
                    "/flows/dass21/answer",
                    json!({ "session_id": session_id, "index": index, "value": 2 }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            last = body;
        }
        assert_eq!(last["status"], "completed");
        assert_eq!(last["next_stage"], "negotiation");
        assert_eq!(last["scores"]["total"], 84);

        let (status, _) = send(
            &app,
            post_json(
                "/flows/dass21/answer",
                json!({ "session_id": session_id, "index": 0, "value": 0 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, reply) = send(
            &app,
            post_json(
                "/flows/negotiation/message",
                json!({ "session_id": session_id, "message": "no quiero vivir" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["ask_commitment"], true);
        assert_eq!(reply["crisis_detected"], true);
        assert_eq!(reply["state"], "commitment_requested");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (status, _) = send(
            &app(),
            post_json(
                "/flows/negotiation/message",
                json!({ "session_id": Uuid::new_v4(), "message": "hola" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ads_are_hidden_from_at_risk_users() {
        let app = app();
        let (_, body) = send(&app, get("/ads/slot?screen=home&risk_level=0")).await;
        assert_eq!(body["show"], true);
        let (_, body) = send(&app, get("/ads/slot?screen=home&risk_level=1")).await;
        assert_eq!(body["show"], false);
        let (_, body) = send(&app, get("/ads/slot?screen=chat&risk_level=0")).await;
        assert_eq!(body["show"], false);
        let (_, body) = send(&app, get("/ads/slot?screen=nowhere&risk_level=0")).await;
        assert_eq!(body["show"], false);
    }

    #[tokio::test]
    async fn sos_returns_emergency_directory() {
        let (status, body) = send(&app(), post_json("/sos/trigger", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["emergency_numbers"], json!(["911", "8009112000"]));
    }

    #[tokio::test]
    async fn crisis_reply_offers_four_options() {
        let (status, body) = send(
            &app(),
            post_json("/crisis/respond", json!({ "text": "ya no aguanto" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["options"].as_array().unwrap().len(), 4);
        assert!(!body["message"].as_str().unwrap().contains("ya no aguanto"));
    }

    #[tokio::test]
    async fn history_never_exposes_the_bearer_token() {
        let app = app();
        let token = "secret-token-xyz";
        let req = bearer(
            post_json("/assessments/dass21", json!({ "answers": vec![1; 21] })),
            token,
        );
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);

        let response = app
            .clone()
            .oneshot(bearer(get("/assessments/history"), token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains(token));

        let body: Value = serde_json::from_str(&text).unwrap();
        let user_id = body[0]["user_id"].as_str().unwrap();
        assert_eq!(user_id.len(), 64);
        assert!(user_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn jwt_subject_with_path_segments_is_unauthorized() {
        let token = jwt(json!({ "sub": "../u2" }));
        let (status, _) = send(&app(), bearer(get("/assessments/history"), &token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn directory_lists_registered_therapists() {
        let app = app();
        let therapist = json!({
            "name": "Dra. Ana",
            "license": "CED-12345",
            "specialties": ["ansiedad", "depresion"],
            "regions": ["CDMX"],
            "convenio": true,
        });

        let (status, _) = send(&app, post_json("/therapists", therapist.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let patient = jwt(json!({ "sub": "p-1", "cognito:groups": ["paciente"] }));
        let (status, _) = send(&app, bearer(post_json("/therapists", therapist.clone()), &patient)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let editor = jwt(json!({ "sub": "t-1", "cognito:groups": ["terapeuta"] }));
        let (status, created) = send(&app, bearer(post_json("/therapists", therapist), &editor)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["license"], "CED-12345");

        let (status, body) = send(&app, get("/directory/search?q=ansiedad")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Dra. Ana");

        let (_, body) = send(&app, get("/therapists/search?region=cdmx&convenio=false")).await;
        assert_eq!(body, json!([]));
    }
}
