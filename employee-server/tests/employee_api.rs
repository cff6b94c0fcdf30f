//! End-to-end tests against the full router (RocksDB in a temp dir)
//! Run: cargo test -p employee-server --test employee_api

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use employee_server::db::repository::{RepoError, RepoResult};
use employee_server::{Config, IdAllocator, SequenceStore, ServerState, build_app};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const BOUNDARY: &str = "ems-test-boundary";

struct TestApp {
    _tmp: tempfile::TempDir,
    router: Router,
    state: ServerState,
}

async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    config.employee_id.prefix = "BWEB".into();
    config.employee_id.width = 3;
    let state = ServerState::initialize(&config).await.unwrap();
    TestApp {
        _tmp: tmp,
        router: build_app(state.clone()),
        state,
    }
}

/// Counter store whose backend is always down
struct UnavailableSequenceStore;

#[async_trait]
impl SequenceStore for UnavailableSequenceStore {
    async fn increment_and_get(&self, _series: &str) -> RepoResult<u64> {
        Err(RepoError::StorageUnavailable("counter store offline".to_string()))
    }
}

impl TestApp {
    /// Same app, with every id allocation failing
    fn with_unavailable_counters(mut self) -> Self {
        self.state.ids = IdAllocator::new(Arc::new(UnavailableSequenceStore));
        self.router = build_app(self.state.clone());
        self
    }

    fn uploaded_file_count(&self) -> usize {
        std::fs::read_dir(self.state.uploads.dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::put(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap()).await
    }
}

fn employee_json(first: &str, email: &str, city: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": "Rao",
        "email": email,
        "phone": "9876543210",
        "country": "India",
        "state": "Gujarat",
        "city": city,
        "gender": "Female",
        "department": "Engineering",
        "salary": 52000,
        "dateOfJoining": "2024-01-15"
    })
}

fn jpeg_bytes() -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let img = image::RgbImage::new(8, 8);
        let encoder = image::codecs::jpeg::JpegEncoder::new(&mut cursor);
        img.write_with_encoder(encoder).unwrap();
    }
    buffer
}

/// multipart/form-data body: text fields then (field, filename, bytes) files
fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, filename, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

const TEXT_FIELDS: &[(&str, &str)] = &[
    ("firstName", "Asha"),
    ("lastName", "Rao"),
    ("email", "asha@example.com"),
    ("phone", "9876543210"),
    ("country", "India"),
    ("state", "Gujarat"),
    ("city", "Surat"),
    ("gender", "Female"),
];

#[tokio::test]
async fn create_assigns_sequential_custom_ids() {
    let app = spawn_app().await;

    let (status, body) = app
        .post_json("/api/employees/create", employee_json("Asha", "asha@example.com", "Surat"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isOk"], true);
    assert_eq!(body["message"], "Employee created successfully");
    assert_eq!(body["data"]["customId"], "BWEB001");
    assert_eq!(body["data"]["status"], "Active");

    let (_, body) = app
        .post_json("/api/employees/create", employee_json("Ravi", "ravi@example.com", "Pune"))
        .await;
    assert_eq!(body["data"]["customId"], "BWEB002");
}

#[tokio::test]
async fn create_reports_missing_fields() {
    let app = spawn_app().await;
    let (status, body) = app
        .post_json("/api/employees/create", json!({ "firstName": "A" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["isOk"], false);
    assert_eq!(body["errors"]["firstName"], "First name must be at least 2 characters");
    assert_eq!(body["errors"]["email"], "Email is required");

    // nothing was allocated for the rejected request
    let (_, body) = app
        .post_json("/api/employees/create", employee_json("Asha", "asha@example.com", "Surat"))
        .await;
    assert_eq!(body["data"]["customId"], "BWEB001");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_and_burns_the_number() {
    let app = spawn_app().await;
    app.post_json("/api/employees/create", employee_json("Asha", "asha@example.com", "Surat"))
        .await;

    let (status, body) = app
        .post_json("/api/employees/create", employee_json("Asha", "ASHA@example.com", "Surat"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");

    let (_, body) = app
        .post_json("/api/employees/create", employee_json("Ravi", "ravi@example.com", "Pune"))
        .await;
    assert_eq!(body["data"]["customId"], "BWEB003");
}

#[tokio::test]
async fn list_searches_and_sorts() {
    let app = spawn_app().await;
    for (first, email, city) in [
        ("Meera", "meera@example.com", "Surat"),
        ("Asha", "asha@example.com", "Pune"),
        ("Ravi", "ravi@example.com", "Surat"),
    ] {
        app.post_json("/api/employees/create", employee_json(first, email, city))
            .await;
    }

    let (status, body) = app.get("/api/employees/get").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let (_, body) = app
        .get("/api/employees/get?search=surat&sorton=firstName&sortdir=asc")
        .await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Meera", "Ravi"]);

    let (_, body) = app
        .get("/api/employees/get?search=bweb&sorton=firstName&sortdir=xyz")
        .await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ravi", "Meera", "Asha"]);

    let (_, body) = app.get("/api/employees/get?search=nobody").await;
    assert_eq!(body["count"], 0);

    let (status, _) = app.get("/api/employees/get?sorton=bad%20field").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn emails(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["email"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn list_without_search_sorts_by_email() {
    let app = spawn_app().await;
    for (first, email) in [
        ("Meera", "meera@example.com"),
        ("Asha", "asha@example.com"),
        ("Ravi", "ravi@example.com"),
    ] {
        app.post_json("/api/employees/create", employee_json(first, email, "Surat"))
            .await;
    }

    let (status, body) = app.get("/api/employees/get?sorton=email&sortdir=asc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(
        emails(&body),
        ["asha@example.com", "meera@example.com", "ravi@example.com"]
    );

    // anything but "asc" sorts descending
    let (_, body) = app.get("/api/employees/get?search=&sorton=email&sortdir=xyz").await;
    assert_eq!(body["count"], 3);
    assert_eq!(
        emails(&body),
        ["ravi@example.com", "meera@example.com", "asha@example.com"]
    );
}

#[tokio::test]
async fn create_fails_cleanly_when_counters_are_unavailable() {
    let app = spawn_app().await.with_unavailable_counters();

    let (status, body) = app
        .post_json("/api/employees/create", employee_json("Asha", "asha@example.com", "Surat"))
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["isOk"], false);

    let jpeg = jpeg_bytes();
    let body = multipart_body(TEXT_FIELDS, &[("image", "me.jpg", &jpeg)]);
    let (status, body) = app
        .send(multipart_request("POST", "/api/employees/create", body))
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["isOk"], false);
    assert_eq!(app.uploaded_file_count(), 0);

    let (status, body) = app.get("/api/employees/get").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn get_update_delete_lifecycle() {
    let app = spawn_app().await;
    app.post_json("/api/employees/create", employee_json("Asha", "asha@example.com", "Surat"))
        .await;

    let (status, body) = app.get("/api/employees/get/BWEB001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "asha@example.com");

    let (status, body) = app
        .put_json(
            "/api/employees/update/BWEB001",
            json!({ "city": "Pune", "customId": "HACK999" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee updated successfully");
    assert_eq!(body["data"]["city"], "Pune");
    assert_eq!(body["data"]["customId"], "BWEB001");
    assert_eq!(body["data"]["firstName"], "Asha");

    let (status, body) = app.delete("/api/employees/delete/BWEB001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");

    let (status, body) = app.get("/api/employees/get/BWEB001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["isOk"], false);

    let (status, _) = app.delete("/api/employees/delete/BWEB001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .put_json("/api/employees/update/BWEB001", json!({ "city": "Pune" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rejects_taken_email() {
    let app = spawn_app().await;
    app.post_json("/api/employees/create", employee_json("Asha", "asha@example.com", "Surat"))
        .await;
    app.post_json("/api/employees/create", employee_json("Ravi", "ravi@example.com", "Pune"))
        .await;

    let (status, body) = app
        .put_json(
            "/api/employees/update/BWEB002",
            json!({ "email": "asha@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errors"]["email"], "Email already exists");
}

#[tokio::test]
async fn multipart_create_stores_and_serves_files() {
    let app = spawn_app().await;
    let jpeg = jpeg_bytes();
    let body = multipart_body(
        TEXT_FIELDS,
        &[("image", "me.jpg", &jpeg), ("resume", "cv.pdf", b"%PDF-1.4 test")],
    );

    let (status, body) = app
        .send(multipart_request("POST", "/api/employees/create", body))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let image = body["data"]["image"].as_str().unwrap().to_string();
    let resume = body["data"]["resume"].as_str().unwrap().to_string();
    assert!(image.starts_with("image-") && image.ends_with(".jpg"));
    assert!(resume.starts_with("resume-") && resume.ends_with(".pdf"));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::get(format!("/uploads/{image}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");

    // replacing the image removes the old file
    let body = multipart_body(&[("city", "Pune")], &[("image", "new.jpeg", &jpeg)]);
    let (status, body) = app
        .send(multipart_request("PUT", "/api/employees/update/BWEB001", body))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["data"]["image"], image.as_str());
    assert!(!app.state.uploads.path_of(&image).unwrap().exists());

    // deleting the employee removes its files
    let new_image = body["data"]["image"].as_str().unwrap().to_string();
    app.delete("/api/employees/delete/BWEB001").await;
    assert!(!app.state.uploads.path_of(&new_image).unwrap().exists());
    assert!(!app.state.uploads.path_of(&resume).unwrap().exists());
}

#[tokio::test]
async fn delete_succeeds_when_stored_file_is_already_gone() {
    let app = spawn_app().await;
    let jpeg = jpeg_bytes();
    let body = multipart_body(TEXT_FIELDS, &[("image", "me.jpg", &jpeg)]);
    let (status, body) = app
        .send(multipart_request("POST", "/api/employees/create", body))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let image = body["data"]["image"].as_str().unwrap();
    std::fs::remove_file(app.state.uploads.path_of(image).unwrap()).unwrap();

    let (status, body) = app.delete("/api/employees/delete/BWEB001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");

    let (status, _) = app.get("/api/employees/get/BWEB001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn multipart_file_without_name_is_rejected() {
    let app = spawn_app().await;
    let body = multipart_body(TEXT_FIELDS, &[("resume", "", b"%PDF-1.4 test")]);
    let (status, body) = app
        .send(multipart_request("POST", "/api/employees/create", body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["resume"], "No filename provided");
    assert_eq!(app.uploaded_file_count(), 0);
}

#[tokio::test]
async fn multipart_rejects_bad_files_without_allocating() {
    let app = spawn_app().await;

    let body = multipart_body(TEXT_FIELDS, &[("image", "me.png", b"\x89PNG....")]);
    let (status, body) = app
        .send(multipart_request("POST", "/api/employees/create", body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["image"], "Only .jpg and .jpeg format allowed!");

    let body = multipart_body(TEXT_FIELDS, &[("resume", "cv.exe", b"MZ")]);
    let (status, _) = app
        .send(multipart_request("POST", "/api/employees/create", body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .post_json("/api/employees/create", employee_json("Asha", "asha@example.com", "Surat"))
        .await;
    assert_eq!(body["data"]["customId"], "BWEB001");
}

#[tokio::test]
async fn uploads_reject_traversal_and_missing_files() {
    let app = spawn_app().await;
    let (status, _) = app.get("/uploads/..secret").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app.get("/uploads/image-1-missing.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_database() {
    let app = spawn_app().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}
