//! HTTP tests for the `/api/v1/checks` resource.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin, body_json, check_body, create_check, delete, get, manager, post_json, put_json, send,
    technician, token, viewer,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = common::build_test_app();
    let response = send(&app.router, Method::GET, "/api/v1/checks", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn token_with_unknown_role_is_unauthorized() {
    let app = common::build_test_app();
    let response = get(&app.router, "/api/v1/checks", &token(9, "janitor", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_derives_status_and_assigns_item_ids() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-06-05", &["Pressure", "Seal"]).await;

    assert_eq!(check["status"], "WARNING_WEEK");
    assert_eq!(check["trade"], "fire_safety");
    assert_eq!(check["checklist"].as_array().unwrap().len(), 2);
    assert!(check["checklist"][0]["id"].is_string());
    assert_eq!(check["checklist"][0]["checked"], false);
    assert_eq!(check["history"], json!([]));
}

#[tokio::test]
async fn create_with_empty_title_is_validation_error() {
    let app = common::build_test_app();
    let mut body = check_body(1, "2026-07-01", &["Pressure"]);
    body["title"] = json!("");

    let response = post_json(&app.router, "/api/v1/checks", &manager(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn technician_cannot_create() {
    let app = common::build_test_app();
    let response = post_json(
        &app.router,
        "/api/v1/checks",
        &technician(),
        check_body(1, "2026-07-01", &[]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn manager_cannot_create_outside_club_scope() {
    let app = common::build_test_app();
    let scoped = token(5, "manager", Some(vec![1]));
    let response = post_json(
        &app.router,
        "/api/v1/checks",
        &scoped,
        check_body(2, "2026-07-01", &[]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_is_sorted_by_due_date_and_filters_by_club() {
    let app = common::build_test_app();
    let later = create_check(&app.router, 1, "2026-09-01", &[]).await;
    let sooner = create_check(&app.router, 1, "2026-05-20", &["A"]).await;
    create_check(&app.router, 2, "2026-06-10", &["A"]).await;

    let response = get(&app.router, "/api/v1/checks?club_id=1", &viewer()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    let ids: Vec<_> = data.as_array().unwrap().iter().map(|c| c["id"].clone()).collect();
    assert_eq!(ids, vec![sooner["id"].clone(), later["id"].clone()]);
    assert_eq!(data[0]["status"], "LATE");

    let all = body_json(get(&app.router, "/api/v1/checks", &viewer()).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn club_scoped_viewer_gets_404_for_other_club() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 2, "2026-07-01", &[]).await;
    let scoped = token(6, "viewer", Some(vec![1]));

    let uri = format!("/api/v1/checks/{}", check["id"]);
    let response = get(&app.router, &uri, &scoped).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = body_json(get(&app.router, "/api/v1/checks", &scoped).await).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn get_unknown_check_is_not_found() {
    let app = common::build_test_app();
    let response = get(&app.router, "/api/v1/checks/999", &viewer()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "PeriodicCheck with id 999 not found");
}

#[tokio::test]
async fn summary_counts_statuses_and_alerts() {
    let app = common::build_test_app();
    let late = create_check(&app.router, 1, "2026-05-01", &["A"]).await;
    let week = create_check(&app.router, 1, "2026-06-03", &["A"]).await;
    create_check(&app.router, 1, "2026-06-20", &["A"]).await;
    create_check(&app.router, 1, "2026-12-01", &["A"]).await;

    let response = get(&app.router, "/api/v1/checks/summary", &viewer()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await["data"].clone();
    assert_eq!(summary["total"], 4);
    assert_eq!(summary["late"], 1);
    assert_eq!(summary["warning_week"], 1);
    assert_eq!(summary["warning_month"], 1);
    assert_eq!(summary["upcoming"], 1);
    assert_eq!(summary["alert_ids"], json!([late["id"], week["id"]]));
}

#[tokio::test]
async fn next_due_adds_one_period() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-06-15", &[]).await;

    let uri = format!("/api/v1/checks/{}/next-due", check["id"]);
    let data = body_json(get(&app.router, &uri, &viewer()).await).await["data"].clone();
    assert_eq!(data["current_due_date"], "2026-06-15");
    assert_eq!(data["suggested_due_date"], "2027-06-15");
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_replaces_fields_and_recomputes_status() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-06-05", &["Pressure"]).await;
    let uri = format!("/api/v1/checks/{}", check["id"]);

    let mut body = check_body(1, "2026-05-25", &["Pressure", "Hose"]);
    body["title"] = json!("Extinguishers and hoses");
    let response = put_json(&app.router, &uri, &manager(), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let edited = body_json(response).await["data"].clone();
    assert_eq!(edited["title"], "Extinguishers and hoses");
    assert_eq!(edited["status"], "LATE");
    assert_eq!(edited["checklist"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn viewer_cannot_edit() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-06-05", &[]).await;
    let uri = format!("/api/v1/checks/{}", check["id"]);

    let response = put_json(&app.router, &uri, &viewer(), check_body(1, "2026-06-05", &[])).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Checklist and inspections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggling_every_item_completes_and_untoggling_reverts() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-06-05", &["Pressure", "Seal"]).await;
    let id = &check["id"];
    let toggle = |item: &serde_json::Value| {
        format!(
            "/api/v1/checks/{id}/checklist/{}/toggle",
            item["id"].as_str().unwrap()
        )
    };

    let first = post_json(&app.router, &toggle(&check["checklist"][0]), &technician(), json!({})).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["data"]["status"], "WARNING_WEEK");

    let second = post_json(&app.router, &toggle(&check["checklist"][1]), &technician(), json!({})).await;
    assert_eq!(body_json(second).await["data"]["status"], "COMPLETED");

    let undo = post_json(&app.router, &toggle(&check["checklist"][1]), &technician(), json!({})).await;
    let reverted = body_json(undo).await["data"].clone();
    assert_eq!(reverted["status"], "UPCOMING");
    assert_eq!(reverted["checklist"][1]["checked"], false);
}

#[tokio::test]
async fn toggle_by_label_hits_first_match() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-07-01", &["Seal", "Seal"]).await;
    let uri = format!("/api/v1/checks/{}/checklist/toggle", check["id"]);

    let response = post_json(&app.router, &uri, &technician(), json!({ "label": "Seal" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["checklist"][0]["checked"], true);
    assert_eq!(data["checklist"][1]["checked"], false);
}

#[tokio::test]
async fn toggle_unknown_label_is_validation_error() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-07-01", &["Seal"]).await;
    let uri = format!("/api/v1/checks/{}/checklist/toggle", check["id"]);

    let response = post_json(&app.router, &uri, &technician(), json!({ "label": "Hose" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn toggle_blank_label_is_bad_request() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-07-01", &["Seal"]).await;
    let uri = format!("/api/v1/checks/{}/checklist/toggle", check["id"]);

    let response = post_json(&app.router, &uri, &technician(), json!({ "label": "  " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn viewer_cannot_toggle() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-07-01", &["Seal"]).await;
    let uri = format!("/api/v1/checks/{}/checklist/toggle", check["id"]);

    let response = post_json(&app.router, &uri, &viewer(), json!({ "label": "Seal" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn log_inspection_appends_history() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-06-05", &["Seal"]).await;
    let uri = format!("/api/v1/checks/{}/inspections", check["id"]);

    let response = post_json(&app.router, &uri, &technician(), json!({ "notes": "All good" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["last_checked"], "2026-06-01");
    assert_eq!(data["history"][0]["technician_id"], 3);
    assert_eq!(data["history"][0]["technician_name"], "technician 3");
    assert_eq!(data["history"][0]["notes"], "All good");
    assert_eq!(data["history"][0]["status"], "WARNING_WEEK");
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_is_503_and_leaves_check_unchanged() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-06-05", &["Seal"]).await;
    let uri = format!("/api/v1/checks/{}/checklist/toggle", check["id"]);

    app.store.fail_writes(true);
    let response = post_json(&app.router, &uri, &technician(), json!({ "label": "Seal" })).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORE_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("memory store"));

    app.store.fail_writes(false);
    let current = body_json(get(&app.router, &format!("/api/v1/checks/{}", check["id"]), &admin()).await).await;
    assert_eq!(current["data"]["checklist"][0]["checked"], false);
    assert_eq!(current["data"]["status"], "WARNING_WEEK");
}

#[tokio::test]
async fn offline_store_fails_reads_with_503() {
    let app = common::build_test_app();
    app.store.set_offline(true);
    let response = get(&app.router, "/api/v1/checks", &viewer()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn soft_deleted_check_disappears_from_reads() {
    let app = common::build_test_app();
    let check = create_check(&app.router, 1, "2026-06-05", &[]).await;
    let uri = format!("/api/v1/checks/{}", check["id"]);

    let response = delete(&app.router, &uri, &manager()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(&app.router, &uri, &viewer()).await.status(), StatusCode::NOT_FOUND);
    let list = body_json(get(&app.router, "/api/v1/checks", &viewer()).await).await;
    assert_eq!(list["data"], json!([]));
}
