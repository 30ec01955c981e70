mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::json;
use taskforge::models::Task;

use common::{bearer, register_and_login, spawn_app};

#[test_log::test(actix_web::test)]
async fn test_task_round_trip() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "crud_user", "PasswordCrud123!").await;

    // Create
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header(bearer(&token))
        .set_json(json!({ "title": "X" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Task = test::read_body_json(resp).await;
    assert_eq!(created.title, "X");
    assert!(!created.completed);
    assert_eq!(created.description, "");

    // Get
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", created.id))
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Task = test::read_body_json(resp).await;
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, "X");
    assert!(!fetched.completed);

    // Update completion only
    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", created.id))
        .append_header(bearer(&token))
        .set_json(json!({ "completed": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.title, "X");
    assert!(updated.completed);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", created.id))
        .append_header(bearer(&token))
        .to_request();
    let fetched: Task = test::call_and_read_body_json(&app, req).await;
    assert!(fetched.completed);

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", created.id))
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", created.id))
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_empty_list_is_an_empty_array() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "empty_user", "Password123!").await;

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_list_returns_own_tasks_in_creation_order() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "list_user", "Password123!").await;

    for title in ["first", "second", "third"] {
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .append_header(bearer(&token))
            .set_json(json!({ "title": title, "description": format!("{} task", title) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(bearer(&token))
        .to_request();
    let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert_eq!(tasks[1].description, "second task");
}

#[actix_rt::test]
async fn test_task_ownership_and_authorization() {
    let app = spawn_app().await;
    let token_a = register_and_login(&app, "owner_user_a", "PasswordOwnerA123!").await;
    let token_b = register_and_login(&app, "other_user_b", "PasswordOtherB123!").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header(bearer(&token_a))
        .set_json(json!({ "title": "User A's Task" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "User A failed to create task");
    let task_a: Task = test::read_body_json(resp).await;

    // User B lists tasks: should not see User A's task
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(bearer(&token_b))
        .to_request();
    let tasks_for_b: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert!(tasks_for_b.is_empty(), "User B should not see User A's task");

    // User B fetches, updates and deletes User A's task: all 404
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_a.id))
        .append_header(bearer(&token_b))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task_a.id))
        .append_header(bearer(&token_b))
        .set_json(json!({ "title": "Attempted Update by B", "completed": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task_a.id))
        .append_header(bearer(&token_b))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The 404 for someone else's task looks exactly like the 404 for a missing one.
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_a.id))
        .append_header(bearer(&token_b))
        .to_request();
    let foreign_body = test::call_and_read_body(&app, req).await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_a.id + 1000))
        .append_header(bearer(&token_b))
        .to_request();
    let missing_body = test::call_and_read_body(&app, req).await;
    assert_eq!(foreign_body, missing_body);

    // User A's task is untouched
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_a.id))
        .append_header(bearer(&token_a))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "User A should be able to fetch their own task");
    let unchanged: Task = test::read_body_json(resp).await;
    assert_eq!(unchanged.title, "User A's Task");
    assert!(!unchanged.completed);
}

#[actix_rt::test]
async fn test_task_validation_errors() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "validation_user", "Password123!").await;

    let invalid_creates = vec![
        (json!({ "description": "no title" }), "missing title"),
        (json!({ "title": "" }), "empty title"),
        (json!({ "title": "a".repeat(201) }), "title too long"),
        (json!({ "title": "ok", "completed": "yes" }), "completed not a bool"),
    ];
    for (payload, description) in invalid_creates {
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .append_header(bearer(&token))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "Test case failed: {}",
            description
        );
    }

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header(bearer(&token))
        .set_json(json!({ "title": "valid" }))
        .to_request();
    let task: Task = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task.id))
        .append_header(bearer(&token))
        .set_json(json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_non_numeric_task_id_is_not_found() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "path_user", "Password123!").await;

    let req = test::TestRequest::get()
        .uri("/api/tasks/not-a-number")
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
