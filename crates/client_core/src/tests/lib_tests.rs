use std::sync::Arc;

use super::*;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct StubState {
    predict_bodies: Arc<Mutex<Vec<Value>>>,
    contact_bodies: Arc<Mutex<Vec<Value>>>,
    exported_ids: Arc<Mutex<Vec<String>>>,
}

async fn handle_predict(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.predict_bodies.lock().await.push(body);
    Json(json!({ "prediction": 1, "probability": 0.87 }))
}

async fn handle_contact(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.contact_bodies.lock().await.push(body);
    Json(json!({ "message": "Contact information submitted successfully" }))
}

async fn handle_history() -> Json<Value> {
    Json(json!([
        {
            "_id": "66ff00aa",
            "timestamp": "Tue, 15 Oct 2024 10:00:00 GMT",
            "input": {
                "age": "30", "gender": "1", "educationLevel": "2", "experienceYears": "5",
                "previousCompanies": "1", "distanceFromCompany": "10", "interviewScore": "80",
                "skillScore": "75", "personalityScore": "70", "recruitmentStrategy": "2"
            },
            "prediction": 0,
            "probability": 0.125
        },
        {
            "_id": "66ff00bb",
            "timestamp": "2024-10-16T08:30:00Z",
            "input": {
                "age": 41, "gender": 0, "educationLevel": 3, "experienceYears": 12,
                "previousCompanies": 4, "distanceFromCompany": 3, "interviewScore": 90,
                "skillScore": 88, "personalityScore": 91, "recruitmentStrategy": 1
            },
            "prediction": 1,
            "probability": 0.9
        }
    ]))
}

async fn handle_export(
    State(state): State<StubState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.exported_ids.lock().await.push(id);
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        b"%PDF-1.4 report".to_vec(),
    )
}

async fn spawn_stub(app: Router) -> Url {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}/")).expect("stub url")
}

async fn spawn_backend() -> (HireClient, StubState) {
    let state = StubState::default();
    let app = Router::new()
        .route("/api/predict", post(handle_predict))
        .route("/api/contact", post(handle_contact))
        .route("/api/history", get(handle_history))
        .route("/api/generate_pdf/:id", get(handle_export))
        .with_state(state.clone());
    (HireClient::new(spawn_stub(app).await), state)
}

async fn spawn_fixed_backend(status: StatusCode, body: &'static str) -> HireClient {
    let app = Router::new().fallback(move || async move { (status, body) });
    HireClient::new(spawn_stub(app).await)
}

fn attributes() -> CandidateAttributes {
    CandidateAttributes {
        age: 30,
        gender: 1,
        education_level: 2,
        experience_years: 5,
        previous_companies: 1,
        distance_from_company: 10,
        interview_score: 80,
        skill_score: 75,
        personality_score: 70,
        recruitment_strategy: 2,
    }
}

#[tokio::test]
async fn predict_posts_camel_case_attributes() {
    let (client, state) = spawn_backend().await;

    let outcome = client.predict(&attributes()).await.expect("predict");

    assert!(outcome.prediction);
    assert_eq!(outcome.probability_percent(), "87.00%");
    let bodies = state.predict_bodies.lock().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["educationLevel"], json!(2));
    assert_eq!(bodies[0]["recruitmentStrategy"], json!(2));
    assert!(bodies[0].get("education_level").is_none());
}

#[tokio::test]
async fn contact_posts_message_fields() {
    let (client, state) = spawn_backend().await;
    let message = ContactMessage {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        message: "Hello".to_string(),
    };

    let ack = client.submit_contact(&message).await.expect("contact");

    assert_eq!(ack.message, "Contact information submitted successfully");
    let bodies = state.contact_bodies.lock().await;
    assert_eq!(
        bodies[0],
        json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" })
    );
}

#[tokio::test]
async fn history_decodes_stringly_inputs_and_http_dates() {
    let (client, _state) = spawn_backend().await;

    let records = client.list_history().await.expect("history");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_str(), "66ff00aa");
    assert_eq!(records[0].input.skill_score, 75.0);
    assert!(!records[0].predicted);
    assert_eq!(records[0].verdict_label(), "Not Hired");
    assert_eq!(records[0].timestamp.to_rfc3339(), "2024-10-15T10:00:00+00:00");
    assert_eq!(records[1].id.as_str(), "66ff00bb");
    assert!(records[1].predicted);
}

#[tokio::test]
async fn export_returns_bytes_and_content_type() {
    let (client, state) = spawn_backend().await;

    let document = client
        .export_record(&RecordId::new("abc123"))
        .await
        .expect("export");

    assert_eq!(document.bytes, b"%PDF-1.4 report".to_vec());
    assert_eq!(document.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(*state.exported_ids.lock().await, vec!["abc123".to_string()]);
}

#[tokio::test]
async fn export_id_is_sent_as_a_single_path_segment() {
    let (client, state) = spawn_backend().await;

    client
        .export_record(&RecordId::new("rec 7"))
        .await
        .expect("export");

    assert_eq!(*state.exported_ids.lock().await, vec!["rec 7".to_string()]);
}

#[tokio::test]
async fn error_field_from_failed_response_is_kept() {
    let client = spawn_fixed_backend(
        StatusCode::BAD_REQUEST,
        r#"{"error": "could not convert string to float: 'abc'"}"#,
    )
    .await;

    let err = client.predict(&attributes()).await.expect_err("must fail");

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.user_message("An error occurred"),
        "could not convert string to float: 'abc'"
    );
}

#[tokio::test]
async fn non_json_failure_falls_back_to_generic_message() {
    let client =
        spawn_fixed_backend(StatusCode::INTERNAL_SERVER_ERROR, "<h1>Internal Error</h1>").await;

    let err = client.list_history().await.expect_err("must fail");

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message("An error occurred"), "An error occurred");
}

#[tokio::test]
async fn unexpected_success_body_is_a_decode_error() {
    let client = spawn_fixed_backend(StatusCode::OK, r#"{"unexpected": true}"#).await;

    let err = client.predict(&attributes()).await.expect_err("must fail");

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn history_with_fractional_inputs_still_loads() {
    let client = spawn_fixed_backend(
        StatusCode::OK,
        r#"[{"_id": "r1", "timestamp": "2024-10-15T10:00:00Z",
            "input": {"age": "30", "gender": "1", "educationLevel": "2", "experienceYears": "5.5",
                "previousCompanies": "1", "distanceFromCompany": "12.5", "interviewScore": "80",
                "skillScore": "75", "personalityScore": "70", "recruitmentStrategy": "2"},
            "prediction": 1, "probability": 0.6}]"#,
    )
    .await;

    let records = client.list_history().await.expect("history");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].input.experience_years, 5.5);
    assert_eq!(records[0].input.distance_from_company, 12.5);
}

#[tokio::test]
async fn out_of_range_probability_is_a_decode_error() {
    let client =
        spawn_fixed_backend(StatusCode::OK, r#"{"prediction": true, "probability": 1.7}"#).await;

    let err = client.predict(&attributes()).await.expect_err("must fail");

    assert!(matches!(err, ClientError::Decode(_)));
    assert_eq!(err.user_message("An error occurred"), "An error occurred");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let client = HireClient::new(Url::parse(&format!("http://{addr}/")).expect("url"));

    let err = client.list_history().await.expect_err("must fail");

    assert!(matches!(err, ClientError::Transport { status: None, .. }));
}

#[test]
fn endpoints_join_beneath_base_path() {
    let client = HireClient::new(Url::parse("http://backend.local/smart-hire/").expect("url"));

    assert_eq!(
        client.endpoint(PREDICT_PATH).expect("endpoint").as_str(),
        "http://backend.local/smart-hire/api/predict"
    );
    assert_eq!(
        client
            .export_endpoint(&RecordId::new("abc123"))
            .expect("endpoint")
            .as_str(),
        "http://backend.local/smart-hire/api/generate_pdf/abc123"
    );
}
