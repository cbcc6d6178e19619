#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// In-process stand-in for the spreadsheet-backed record store.
#[derive(Clone)]
pub struct FakeStore {
    pub base_url: String,
    tables: Arc<Mutex<Tables>>,
}

struct Tables {
    teachers: Vec<Value>,
    centres: Vec<Value>,
    updates: usize,
}

type Shared = Arc<Mutex<Tables>>;

impl FakeStore {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn centre_of(&self, code: &str) -> Option<String> {
        let tables = self.tables.lock().unwrap();
        tables
            .teachers
            .iter()
            .find(|row| cell_text(&row["hrmsCode"]) == code)
            .map(|row| cell_text(&row["examinationCentre"]))
    }

    pub fn update_count(&self) -> usize {
        self.tables.lock().unwrap().updates
    }
}

pub fn seed_teachers() -> Vec<Value> {
    vec![
        json!({ "hrmsCode": 419255, "name": "MANZOOLRUL HAQ NAVAZ KHAN", "gender": "M",
                "schoolName": "RATANPURA (Composite)", "mobileNumber": 9997067514u64,
                "examinationCentre": "" }),
        json!({ "hrmsCode": "2166936", "name": "PANKAJ KUMAR", "gender": "M",
                "schoolName": "RATANPURA (Composite)", "mobileNumber": "8279856228",
                "examinationCentre": "ABC" }),
        json!({ "hrmsCode": "419144", "name": "SUNIL SINGH", "gender": "M",
                "schoolName": "RATANPURA (Composite)", "mobileNumber": "9457019542",
                "examinationCentre": "XYZ" }),
        json!({ "hrmsCode": "508812", "name": "REKHA DEVI", "gender": "F",
                "schoolName": "KHANPUR (Primary)", "mobileNumber": "9411000000",
                "examinationCentre": "ABC" }),
    ]
}

pub fn seed_centres() -> Vec<Value> {
    vec![
        json!({ "name": "ABC", "male": 2, "female": 1 }),
        json!({ "name": "XYZ", "male": 0, "female": 0 }),
        json!({ "name": "PQR" }),
    ]
}

pub fn spawn_store() -> FakeStore {
    let tables = Arc::new(Mutex::new(Tables {
        teachers: seed_teachers(),
        centres: seed_centres(),
        updates: 0,
    }));

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fake store");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let port = listener.local_addr().unwrap().port();
    let app = store_router(Arc::clone(&tables));

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("fake store runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("serve fake store");
        });
    });

    FakeStore {
        base_url: format!("http://127.0.0.1:{port}"),
        tables,
    }
}

fn store_router(tables: Shared) -> Router {
    Router::new()
        .route("/exec", get(fetch_all).post(update))
        .route(
            "/broken",
            get(|| async { "<html>maintenance</html>" }).post(|| async { "<html>maintenance</html>" }),
        )
        .route(
            "/failing",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR })
                .post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/sheetless",
            get(|| async {
                Json(json!({
                    "status": "error",
                    "message": "Sheets \"TeacherList\" or \"AvailableDuty\" not found."
                }))
            })
            .post(|| async { Json(json!({ "status": "error" })) }),
        )
        .route("/hollow", get(|| async { Json(json!({ "status": "success" })) }))
        .with_state(tables)
}

async fn fetch_all(State(tables): State<Shared>) -> Json<Value> {
    let tables = tables.lock().unwrap();
    Json(json!({
        "status": "success",
        "data": { "teachers": tables.teachers, "centres": tables.centres }
    }))
}

async fn update(State(tables): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    if body["action"] != "update" {
        return Json(json!({ "status": "error", "message": "Unknown action." }));
    }
    let code = cell_text(&body["hrmsCode"]);
    let centre = cell_text(&body["centre"]);

    let mut tables = tables.lock().unwrap();
    let found = tables
        .teachers
        .iter_mut()
        .find(|row| cell_text(&row["hrmsCode"]) == code);
    match found {
        Some(row) => {
            row["examinationCentre"] = Value::String(centre);
            tables.updates += 1;
            Json(json!({ "status": "success", "message": "Record updated." }))
        }
        None => Json(json!({ "status": "error", "message": format!("{code} not found") })),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
