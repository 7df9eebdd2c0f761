mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{roles, TestContext};

#[tokio::test]
async fn priorities_and_statuses_use_their_own_keys() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let project = ctx.create_project(&alice, "Needle", false).await;

    let priority = ctx
        .post(
            &format!("/projects/{project}/priorities"),
            &alice,
            json!({ "name": "High", "color": "#ff0000", "transparent": true }),
        )
        .await;
    let body = priority.expect_ok();
    assert_eq!(body["message"], "priority has been successfully created");
    assert_eq!(body["priority"]["name"], "High");
    assert_eq!(body["priority"]["color"], "#ff0000");
    assert_eq!(body["priority"]["transparent"], true);
    assert_eq!(body["priority"]["project"]["name"], "Needle");

    let status = ctx
        .post(
            &format!("/projects/{project}/status"),
            &alice,
            json!({ "name": "Done" }),
        )
        .await;
    let body = status.expect_ok();
    assert_eq!(body["message"], "status has been successfully created");
    assert_eq!(body["status"]["name"], "Done");
    assert!(body["status"]["color"].is_null());

    let priorities = ctx
        .get(&format!("/projects/{project}/priorities"), &alice)
        .await;
    let body = priorities.expect_ok();
    assert_eq!(body["message"], "priorities list has been successfully retrieved");
    assert_eq!(body["priorities"].as_array().unwrap().len(), 1);
    assert_eq!(body["project"]["id"], project.as_str());

    let statuses = ctx
        .get(&format!("/projects/{project}/status/all"), &alice)
        .await;
    let body = statuses.expect_ok();
    assert_eq!(body["message"], "status names have been successfully retrieved");
    assert_eq!(body["status"], json!(["Done"]));
}

#[tokio::test]
async fn names_are_unique_per_kind_ignoring_case() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let project = ctx.create_project(&alice, "Needle", false).await;
    let high = ctx
        .create_label(&alice, &project, "priorities", "High")
        .await;

    let duplicate = ctx
        .post(
            &format!("/projects/{project}/priorities"),
            &alice,
            json!({ "name": "HIGH" }),
        )
        .await;
    assert_eq!(
        duplicate.expect_error(StatusCode::BAD_REQUEST),
        "name is already taken"
    );

    // Same name under the other kind is fine
    ctx.create_label(&alice, &project, "status", "High").await;

    // Renaming to its own name is not a collision
    let renamed = ctx
        .post(
            &format!("/projects/{project}/priorities/{high}"),
            &alice,
            json!({ "name": "high" }),
        )
        .await;
    assert_eq!(renamed.expect_ok()["priority"]["name"], "high");

    ctx.create_label(&alice, &project, "priorities", "Low").await;
    let clash = ctx
        .post(
            &format!("/projects/{project}/priorities/{high}"),
            &alice,
            json!({ "name": "low" }),
        )
        .await;
    assert_eq!(
        clash.expect_error(StatusCode::BAD_REQUEST),
        "name is already taken"
    );
}

#[tokio::test]
async fn input_and_lookup_errors() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let project = ctx.create_project(&alice, "Needle", false).await;
    let base = format!("/projects/{project}/priorities");

    let color = ctx
        .post(&base, &alice, json!({ "name": "High", "color": "red" }))
        .await;
    assert_eq!(
        color.expect_error(StatusCode::BAD_REQUEST),
        "color has invalid format. example #000000"
    );

    let long = ctx
        .post(&base, &alice, json!({ "name": "x".repeat(27) }))
        .await;
    assert_eq!(
        long.expect_error(StatusCode::BAD_REQUEST),
        "name must be 1 - 26 characters in length"
    );

    let invalid = ctx.get(&format!("{base}/abc"), &alice).await;
    assert_eq!(
        invalid.expect_error(StatusCode::BAD_REQUEST),
        "priority id is not valid"
    );

    let unknown = ctx
        .get(&format!("/projects/{project}/status/{}", uuid::Uuid::new_v4()), &alice)
        .await;
    assert_eq!(
        unknown.expect_error(StatusCode::NOT_FOUND),
        "requested status not found"
    );

    // A priority id is not found under /status
    let high = ctx.create_label(&alice, &project, "priorities", "High").await;
    ctx.get(&format!("/projects/{project}/status/{high}"), &alice)
        .await
        .expect_error(StatusCode::NOT_FOUND);

    let empty = ctx.post(&format!("{base}/{high}"), &alice, json!({})).await;
    assert_eq!(
        empty.expect_error(StatusCode::BAD_REQUEST),
        "request contains no update input"
    );

    let cleared = ctx
        .post(&format!("{base}/{high}"), &alice, json!({ "color": "" }))
        .await;
    assert!(cleared.expect_ok()["priority"]["color"].is_null());
}

#[tokio::test]
async fn writes_need_a_manager() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let bob = ctx.create_user("bob").await;
    let project = ctx.create_project(&alice, "Needle", false).await;
    ctx.add_member(&alice, &project, &bob, roles("isDeveloper"))
        .await;

    let denied = ctx
        .post(
            &format!("/projects/{project}/status"),
            &bob,
            json!({ "name": "Done" }),
        )
        .await;
    assert_eq!(
        denied.expect_error(StatusCode::UNAUTHORIZED),
        "you must have manager permissions to perform this action"
    );

    // Developers may still read the name list for story forms
    ctx.get(&format!("/projects/{project}/status/all"), &bob)
        .await
        .expect_ok();
}

#[tokio::test]
async fn deleting_a_label_clears_it_from_stories() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let project = ctx.create_project(&alice, "Needle", false).await;
    let high = ctx.create_label(&alice, &project, "priorities", "High").await;
    ctx.create_label(&alice, &project, "status", "Open").await;

    let story = ctx
        .create_story(
            &alice,
            &project,
            json!({ "name": "First", "priority": "high", "status": "Open" }),
        )
        .await;
    assert_eq!(story["priority"]["name"], "High");
    let story_id = story["id"].as_str().unwrap();

    let unconfirmed = ctx
        .delete(
            &format!("/projects/{project}/priorities/{high}"),
            &alice,
            json!({}),
        )
        .await;
    assert_eq!(
        unconfirmed.expect_error(StatusCode::BAD_REQUEST),
        "confirm is missing from input"
    );

    let removed = ctx
        .delete(
            &format!("/projects/{project}/priorities/{high}"),
            &alice,
            json!({ "confirm": true }),
        )
        .await;
    assert_eq!(
        removed.expect_ok()["message"],
        "priority has been successfully deleted"
    );

    let reloaded = ctx
        .get(&format!("/projects/{project}/stories/{story_id}"), &alice)
        .await;
    let body = reloaded.expect_ok();
    assert!(body["story"]["priority"].is_null());
    assert_eq!(body["story"]["status"]["name"], "Open");
}
