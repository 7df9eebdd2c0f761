mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{roles, TestContext};

#[tokio::test]
async fn creator_becomes_admin() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;

    let response = ctx
        .post(
            "/projects",
            &alice,
            json!({ "name": "Needle", "description": "tracking", "isPrivate": true }),
        )
        .await;
    let body = response.expect_ok();
    assert_eq!(body["message"], "project has been successfully created");
    assert_eq!(body["project"]["name"], "Needle");
    assert_eq!(body["project"]["isPrivate"], true);
    let project_id = body["project"]["id"].as_str().unwrap();

    let members = ctx
        .get(&format!("/projects/{project_id}/memberships"), &alice)
        .await;
    let body = members.expect_ok();
    assert_eq!(body["memberships"].as_array().unwrap().len(), 1);
    assert_eq!(body["memberships"][0]["user"]["username"], "alice");
    assert_eq!(body["memberships"][0]["roles"]["isAdmin"], true);
    assert_eq!(body["memberships"][0]["roles"]["isViewer"], true);
}

#[tokio::test]
async fn creation_validates_input() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;

    let cases = [
        (json!({}), "name is missing from input"),
        (json!({ "name": "ab" }), "name must be 3 - 50 characters in length"),
        (json!({ "name": "Needle", "isPrivate": "yes" }), "isPrivate must be a boolean"),
        (
            json!({ "name": "Needle", "description": "x".repeat(351) }),
            "description must be 350 characters or less",
        ),
    ];

    for (body, expected) in cases {
        let response = ctx.post("/projects", &alice, body).await;
        assert_eq!(response.expect_error(StatusCode::BAD_REQUEST), expected);
    }
}

#[tokio::test]
async fn private_projects_are_hidden_from_outsiders() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let bob = ctx.create_user("bob").await;

    let private = ctx.create_project(&alice, "Secret", true).await;
    let public = ctx.create_project(&alice, "Open", false).await;

    let denied = ctx.get(&format!("/projects/{private}"), &bob).await;
    assert_eq!(
        denied.expect_error(StatusCode::UNAUTHORIZED),
        "you must be a project member to perform this action"
    );

    let allowed = ctx.get(&format!("/projects/{public}"), &bob).await;
    assert_eq!(allowed.expect_ok()["project"]["name"], "Open");

    // Reading is open, writing is not
    let update = ctx
        .post(&format!("/projects/{public}"), &bob, json!({ "name": "Mine" }))
        .await;
    assert_eq!(
        update.expect_error(StatusCode::UNAUTHORIZED),
        "you must be a project member to perform this action"
    );
}

#[tokio::test]
async fn private_reads_need_a_role_flag() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let bob = ctx.create_user("bob").await;
    let private = ctx.create_project(&alice, "Secret", true).await;
    let membership = ctx
        .add_member(&alice, &private, &bob, json!({ "isViewer": false }))
        .await;

    let stored = ctx
        .get(&format!("/projects/{private}/memberships/{membership}"), &alice)
        .await;
    let body = stored.expect_ok();
    for flag in ["isAdmin", "isManager", "isDeveloper", "isViewer"] {
        assert_eq!(body["membership"]["roles"][flag], false, "{flag}");
    }

    let denied = ctx.get(&format!("/projects/{private}"), &bob).await;
    assert_eq!(
        denied.expect_error(StatusCode::UNAUTHORIZED),
        "you must have viewer permissions to perform this action"
    );
}

#[tokio::test]
async fn bad_and_unknown_ids() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;

    let invalid = ctx.get("/projects/not-an-id", &alice).await;
    assert_eq!(
        invalid.expect_error(StatusCode::BAD_REQUEST),
        "project id is not valid"
    );

    let unknown = ctx
        .get(&format!("/projects/{}", uuid::Uuid::new_v4()), &alice)
        .await;
    assert_eq!(
        unknown.expect_error(StatusCode::NOT_FOUND),
        "requested project not found"
    );
}

#[tokio::test]
async fn statistics_are_opt_in() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let bob = ctx.create_user("bob").await;
    let project = ctx.create_project(&alice, "Needle", false).await;
    ctx.add_member(&alice, &project, &bob, roles("isDeveloper"))
        .await;
    ctx.create_story(&bob, &project, json!({ "name": "First" }))
        .await;

    let plain = ctx.get(&format!("/projects/{project}"), &alice).await;
    assert!(plain.expect_ok()["project"].get("statistics").is_none());

    let detailed = ctx
        .get(&format!("/projects/{project}?includeStatistics=true"), &alice)
        .await;
    let stats = &detailed.expect_ok()["project"]["statistics"];
    assert_eq!(stats["memberships"], 2);
    assert_eq!(stats["stories"], 1);
}

#[tokio::test]
async fn updates_need_a_manager_and_some_input() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let bob = ctx.create_user("bob").await;
    let project = ctx.create_project(&alice, "Needle", false).await;
    ctx.add_member(&alice, &project, &bob, roles("isDeveloper"))
        .await;
    let uri = format!("/projects/{project}");

    let developer = ctx.post(&uri, &bob, json!({ "name": "Thread" })).await;
    assert_eq!(
        developer.expect_error(StatusCode::UNAUTHORIZED),
        "you must have manager permissions to perform this action"
    );

    let empty = ctx.post(&uri, &alice, json!({})).await;
    assert_eq!(
        empty.expect_error(StatusCode::BAD_REQUEST),
        "request contains no update input"
    );

    let updated = ctx
        .post(
            &uri,
            &alice,
            json!({ "name": "Thread", "description": "spun", "isPrivate": true }),
        )
        .await;
    let body = updated.expect_ok();
    assert_eq!(body["message"], "project has been successfully updated");
    assert_eq!(body["project"]["name"], "Thread");
    assert_eq!(body["project"]["description"], "spun");
    assert!(body["project"]["updatedOn"].is_string());

    let cleared = ctx.post(&uri, &alice, json!({ "description": "" })).await;
    assert!(cleared.expect_ok()["project"]["description"].is_null());
}

#[tokio::test]
async fn deletion_needs_admin_and_matching_name() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let bob = ctx.create_user("bob").await;
    let project = ctx.create_project(&alice, "Needle", false).await;
    ctx.add_member(&alice, &project, &bob, roles("isManager"))
        .await;
    let uri = format!("/projects/{project}");

    let manager = ctx.delete(&uri, &bob, json!({ "confirm": "Needle" })).await;
    assert_eq!(
        manager.expect_error(StatusCode::UNAUTHORIZED),
        "you must have admin permissions to perform this action"
    );

    let mismatch = ctx.delete(&uri, &alice, json!({ "confirm": "needle" })).await;
    assert_eq!(
        mismatch.expect_error(StatusCode::BAD_REQUEST),
        "confirm input must match name: Needle"
    );

    let removed = ctx.delete(&uri, &alice, json!({ "confirm": "Needle" })).await;
    assert_eq!(
        removed.expect_ok()["message"],
        "project has been successfully deleted"
    );

    ctx.get(&uri, &alice)
        .await
        .expect_error(StatusCode::NOT_FOUND);
    let listed = ctx.get("/projects", &alice).await;
    assert!(listed.expect_ok()["projects"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn listing_filters_by_name() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    ctx.create_project(&alice, "Needle", false).await;
    ctx.create_project(&alice, "Thread", true).await;
    assert_eq!(ctx.projects().len(), 2);

    let response = ctx.get("/projects?filterName=nee", &alice).await;
    let body = response.expect_ok();
    assert_eq!(body["message"], "project list has been successfully retrieved");
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);
    assert_eq!(body["projects"][0]["name"], "Needle");
}
