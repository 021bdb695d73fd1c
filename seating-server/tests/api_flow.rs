//! End-to-end HTTP flow over an in-memory database

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use seating_server::api::build_app;
use seating_server::{Config, ServerState};

struct TestApp {
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let state = ServerState::initialize(&Config::for_tests()).await.unwrap();
        Self {
            router: build_app(state),
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> http::Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.send(method, uri, token, body).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(&self, username: &str, role: &str) -> Value {
        let (status, body) = self
            .json(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@college.edu"),
                    "password": "secret123",
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }

    async fn login(&self, username: &str) -> String {
        let (status, body) = self
            .json(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": username, "password": "secret123"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["token_type"], "bearer");
        body["access_token"].as_str().unwrap().to_string()
    }
}

fn scenario_students() -> Value {
    json!([
        {"roll_number": "3", "name": "C", "department": "CSE", "subjects": ["DBMS"]},
        {"roll_number": "1", "name": "A", "department": "CSE", "subjects": ["DBMS"]},
        {"roll_number": "5", "name": "E", "department": "IT", "subjects": ["Networks"]},
        {"roll_number": "2", "name": "B", "department": "CSE", "subjects": ["DBMS"]},
        {"roll_number": "4", "name": "D", "department": "IT", "subjects": ["Networks"]},
        {"roll_number": "9", "name": "X", "department": "ECE", "subjects": ["Circuits"]},
    ])
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.json("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_protected_routes_need_token() {
    let app = TestApp::new().await;

    let (status, body) = app.json("GET", "/api/students", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = app
        .json("GET", "/api/students", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_bad_login() {
    let app = TestApp::new().await;
    app.register("admin", "admin").await;

    let (status, body) = app
        .json(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "admin",
                "email": "other@college.edu",
                "password": "secret123",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1010);

    let (status, body) = app
        .json(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "admin", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let token = app.login("admin").await;
    let (status, me) = app.json("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "admin");
    assert_eq!(me["role"], "admin");
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_full_seating_flow() {
    let app = TestApp::new().await;
    let admin = app.register("admin", "admin").await;
    let token = app.login("admin").await;
    let auth = Some(token.as_str());

    let (status, _) = app
        .json(
            "POST",
            "/api/departments",
            auth,
            Some(json!({"name": "Computer Science", "code": "CSE", "subjects": ["DBMS"]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app
        .json(
            "POST",
            "/api/departments",
            auth,
            Some(json!({"name": "Duplicate", "code": "CSE"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3102);

    let (status, import) = app
        .json("POST", "/api/students/bulk", auth, Some(scenario_students()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(import["created"], 6);

    let (_, import) = app
        .json(
            "POST",
            "/api/students/bulk",
            auth,
            Some(json!([{"roll_number": "1", "name": "A", "department": "CSE", "subjects": ["DBMS"]}])),
        )
        .await;
    assert_eq!(import["created"], 0);
    assert_eq!(import["skipped"], 1);
    assert_eq!(import["errors"][0], "Roll number 1 already exists");

    let (status, room) = app
        .json(
            "POST",
            "/api/rooms",
            auth,
            Some(json!({"name": "Hall A", "capacity": 6, "desk_count": 3, "rows": 2, "columns": 2})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let room_id = room["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .json(
            "POST",
            "/api/rooms",
            auth,
            Some(json!({"name": "Broken", "capacity": 6, "desk_count": 3, "rows": 0, "columns": 2})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    let (status, exam) = app
        .json(
            "POST",
            "/api/exams",
            auth,
            Some(json!({
                "exam_name": "CAT 1",
                "exam_type": "CAT",
                "date": "2025-03-10",
                "time": "09:30",
                "departments": ["CSE", "IT"],
                "subjects": ["DBMS", "Networks"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exam["created_by"], admin["id"]);
    let exam_id = exam["id"].as_str().unwrap().to_string();

    let (status, summary) = app
        .json(
            "POST",
            "/api/seating/generate",
            auth,
            Some(json!({
                "exam_id": exam_id,
                "room_ids": [room_id, "unknown-room"],
                "seating_mode": "two_per_desk",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{summary}");
    assert_eq!(
        summary,
        json!({
            "message": "Seating plans generated successfully",
            "plans_created": 1,
            "total_students_assigned": 5,
            "total_eligible_students": 5,
        })
    );

    let (status, plans) = app
        .json("GET", &format!("/api/seating/exam/{exam_id}"), auth, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let plan = &plans[0];
    assert_eq!(plan["room_details"]["name"], "Hall A");
    assert_eq!(plan["total_students"], 5);
    let desks = plan["desk_assignments"].as_array().unwrap();
    let pairs: Vec<(Value, Value)> = desks
        .iter()
        .map(|d| (d["left_student"].clone(), d["right_student"].clone()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (json!("1"), json!("4")),
            (json!("2"), json!("5")),
            (json!("3"), Value::Null),
        ]
    );
    assert_eq!(desks[2]["row"], 1);
    assert_eq!(desks[2]["col"], 0);

    let response = app
        .send("GET", &format!("/api/seating/export/{exam_id}"), auth, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"seating_plan_CAT 1.xlsx\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..2], b"PK");

    let (status, stats) = app.json("GET", "/api/dashboard/stats", auth, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_students"], 6);
    assert_eq!(stats["total_exams"], 1);
    assert_eq!(stats["total_rooms"], 1);
    assert_eq!(stats["total_departments"], 1);
    assert_eq!(stats["recent_exams"][0]["id"], exam_id.as_str());

    let (status, deleted) = app
        .json("DELETE", &format!("/api/exams/{exam_id}"), auth, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!(true));
    let (_, plans) = app
        .json("GET", &format!("/api/seating/exam/{exam_id}"), auth, None)
        .await;
    assert_eq!(plans, json!([]));
}

#[tokio::test]
async fn test_generate_errors_map_to_status() {
    let app = TestApp::new().await;
    app.register("admin", "admin").await;
    let token = app.login("admin").await;
    let auth = Some(token.as_str());

    let (status, body) = app
        .json(
            "POST",
            "/api/seating/generate",
            auth,
            Some(json!({"exam_id": "missing", "room_ids": [], "seating_mode": "one_per_desk"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5001);

    let (_, exam) = app
        .json(
            "POST",
            "/api/exams",
            auth,
            Some(json!({
                "exam_name": "Semester",
                "exam_type": "Semester",
                "date": "2025-05-01",
                "time": "14:00",
                "departments": ["CSE"],
                "subjects": ["DBMS"],
            })),
        )
        .await;
    let (status, body) = app
        .json(
            "POST",
            "/api/seating/generate",
            auth,
            Some(json!({
                "exam_id": exam["id"],
                "room_ids": ["r1"],
                "seating_mode": "one_per_desk",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6001);

    let (status, body) = app
        .json(
            "GET",
            &format!("/api/seating/export/{}", exam["id"].as_str().unwrap()),
            auth,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6002);
}

#[tokio::test]
async fn test_invigilator_reads_but_cannot_manage() {
    let app = TestApp::new().await;
    app.register("proctor", "invigilator").await;
    let token = app.login("proctor").await;
    let auth = Some(token.as_str());

    let (status, students) = app.json("GET", "/api/students", auth, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(students, json!([]));

    let (status, body) = app
        .json(
            "POST",
            "/api/seating/generate",
            auth,
            Some(json!({"exam_id": "e", "room_ids": ["r"], "seating_mode": "two_per_desk"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, _) = app
        .json(
            "POST",
            "/api/rooms",
            auth,
            Some(json!({"name": "Hall", "capacity": 2, "desk_count": 1, "rows": 1, "columns": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
