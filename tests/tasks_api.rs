mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::{bearer, init_app, signed_in_user, test_state, MemoryStore};

#[actix_web::test]
async fn test_tasks_for_boat_newest_first() {
    let app = init_app(test_state(MemoryStore::new())).await;
    let (owner, access) = signed_in_user(&app, "crew@example.com").await;

    let response = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer(&access))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 204);

    let response = test::TestRequest::post()
        .uri("/boat")
        .insert_header(bearer(&access))
        .set_json(json!({ "user_id": owner, "name": "Kestrel", "model": "Laser" }))
        .send_request(&app)
        .await;
    let boat: Value = test::read_body_json(response).await;
    let boat_id = boat["id"].as_i64().unwrap();

    let response = test::TestRequest::get()
        .uri(&format!("/tasks/boat/{}/tasks", boat_id))
        .insert_header(bearer(&access))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 404);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["message"], "No tasks found for this boat");

    for (description, created_on) in [
        ("Replace halyard", "2024-05-01T09:00:00Z"),
        ("Antifoul hull", "2024-06-01T09:00:00Z"),
    ] {
        let response = test::TestRequest::post()
            .uri(&format!("/tasks/{}", boat_id))
            .insert_header(bearer(&access))
            .set_json(json!({ "description": description, "status": "open", "created_on": created_on }))
            .send_request(&app)
            .await;
        assert_eq!(response.status(), 201);
    }

    let response = test::TestRequest::get()
        .uri(&format!("/tasks/boat/{}/tasks", boat_id))
        .insert_header(bearer(&access))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 200);
    let tasks: Value = test::read_body_json(response).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks[0]["description"], "Antifoul hull");
    assert_eq!(tasks[1]["description"], "Replace halyard");

    let task_id = tasks[1]["id"].as_i64().unwrap();
    let response = test::TestRequest::put()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&access))
        .set_json(json!({ "status": "done" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 200);
    let task: Value = test::read_body_json(response).await;
    assert_eq!(task["status"], "done");
    assert_eq!(task["description"], "Replace halyard");

    let response = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&access))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 204);

    let response = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&access))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 404);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["message"], "Task not found");
}

#[actix_web::test]
async fn test_task_requires_existing_boat_and_fields() {
    let app = init_app(test_state(MemoryStore::new())).await;
    let (owner, access) = signed_in_user(&app, "crew@example.com").await;

    let response = test::TestRequest::post()
        .uri("/tasks/555")
        .insert_header(bearer(&access))
        .set_json(json!({ "description": "Check bilge", "status": "open" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);

    let response = test::TestRequest::post()
        .uri("/boat")
        .insert_header(bearer(&access))
        .set_json(json!({ "user_id": owner, "name": "Kestrel", "model": "Laser" }))
        .send_request(&app)
        .await;
    let boat: Value = test::read_body_json(response).await;

    let response = test::TestRequest::post()
        .uri(&format!("/tasks/{}", boat["id"]))
        .insert_header(bearer(&access))
        .set_json(json!({ "description": "", "status": "open" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);
}
