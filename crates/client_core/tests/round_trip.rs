use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use axum::{
    extract::Path as UrlPath,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use client_core::{
    DirectorySink, DocumentSink, ExportError, ExportOutcome, FormController, FormStatus,
    HireClient, HistoryPipeline, HistoryStatus, PredictForm,
};
use serde_json::{json, Value};
use shared::domain::RecordId;
use tokio::net::TcpListener;
use url::Url;

async fn predict(Json(body): Json<Value>) -> impl IntoResponse {
    if body["age"].as_i64().is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "age missing" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "prediction": 1, "probability": 0.87 })),
    )
}

async fn history() -> Json<Value> {
    Json(json!([{
        "_id": "abc123",
        "timestamp": "Tue, 15 Oct 2024 10:00:00 GMT",
        "input": {
            "age": 30, "gender": 1, "educationLevel": 2, "experienceYears": 5,
            "previousCompanies": 1, "distanceFromCompany": 10, "interviewScore": 80,
            "skillScore": 75, "personalityScore": 70, "recruitmentStrategy": 2
        },
        "prediction": 1,
        "probability": 0.87
    }]))
}

async fn generate_pdf(UrlPath(id): UrlPath<String>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        format!("%PDF-1.4 {id}").into_bytes(),
    )
}

async fn spawn_backend() -> HireClient {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/api/predict", post(predict))
        .route("/api/history", get(history))
        .route("/api/generate_pdf/:id", get(generate_pdf));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    HireClient::new(Url::parse(&format!("http://{addr}/")).expect("url"))
}

#[derive(Clone, Default)]
struct RecordingSink {
    saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    released: Arc<Mutex<usize>>,
}

impl DocumentSink for RecordingSink {
    type Handle = Vec<u8>;

    fn materialize(&mut self, bytes: &[u8]) -> Result<Vec<u8>, ExportError> {
        Ok(bytes.to_vec())
    }

    fn save_as(&mut self, handle: &Vec<u8>, file_name: &str) -> Result<PathBuf, ExportError> {
        self.saved
            .lock()
            .expect("saved lock")
            .push((file_name.to_string(), handle.clone()));
        Ok(Path::new("/downloads").join(file_name))
    }

    fn release(&mut self, _handle: Vec<u8>) {
        *self.released.lock().expect("released lock") += 1;
    }
}

#[tokio::test]
async fn prediction_round_trip_renders_result() {
    let client = spawn_backend().await;
    let mut form = FormController::<PredictForm>::new();
    for (name, value) in [
        ("age", "30"),
        ("gender", "1"),
        ("educationLevel", "2"),
        ("experienceYears", "5"),
        ("previousCompanies", "1"),
        ("distanceFromCompany", "10"),
        ("interviewScore", "80"),
        ("skillScore", "75"),
        ("personalityScore", "70"),
        ("recruitmentStrategy", "2"),
    ] {
        form.set_value(name, value).expect("field");
    }

    form.submit(&client).await.expect("valid form");

    let FormStatus::Succeeded(outcome) = form.status() else {
        panic!("unexpected status: {:?}", form.status());
    };
    assert!(outcome.headline().contains("likely to be hired"));
    assert_eq!(outcome.probability_percent(), "87.00%");
}

#[tokio::test]
async fn history_export_saves_one_named_document() {
    let client = spawn_backend().await;
    let mut history = HistoryPipeline::new();
    assert!(history.load(&client).await);
    assert_eq!(history.status(), HistoryStatus::Loaded);
    let record = history.records()[0].clone();
    assert_eq!(record.verdict_label(), "Hired");

    let mut sink = RecordingSink::default();
    let outcome = history.export(&client, record.id.clone(), &mut sink).await;

    assert_eq!(
        outcome,
        ExportOutcome::Saved(PathBuf::from("/downloads/prediction_abc123.pdf"))
    );
    let saved = sink.saved.lock().expect("saved lock");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "prediction_abc123.pdf");
    assert_eq!(saved[0].1, b"%PDF-1.4 abc123".to_vec());
    assert_eq!(*sink.released.lock().expect("released lock"), 1);
}

#[tokio::test]
async fn export_lands_in_target_directory() {
    let client = spawn_backend().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let mut history = HistoryPipeline::new();
    let mut sink = DirectorySink::new(dir.path());

    let outcome = history
        .export(&client, RecordId::new("xyz789"), &mut sink)
        .await;

    let expected = dir.path().join("prediction_xyz789.pdf");
    assert_eq!(outcome, ExportOutcome::Saved(expected.clone()));
    assert_eq!(
        std::fs::read(expected).expect("read export"),
        b"%PDF-1.4 xyz789".to_vec()
    );
}
