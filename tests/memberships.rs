mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{roles, TestContext, TestUser};

struct Team {
    ctx: TestContext,
    admin: TestUser,
    manager: TestUser,
    project: String,
    manager_membership: String,
}

async fn team() -> Team {
    let ctx = TestContext::new().await;
    let admin = ctx.create_user("alice").await;
    let manager = ctx.create_user("bob").await;
    let project = ctx.create_project(&admin, "Needle", true).await;
    let manager_membership = ctx
        .add_member(&admin, &project, &manager, roles("isManager"))
        .await;
    Team {
        ctx,
        admin,
        manager,
        project,
        manager_membership,
    }
}

#[tokio::test]
async fn new_members_default_to_viewer() {
    let t = team().await;
    let carol = t.ctx.create_user("carol").await;

    let response = t
        .ctx
        .post(
            &format!("/projects/{}/memberships", t.project),
            &t.manager,
            json!({ "username": "CAROL" }),
        )
        .await;
    let body = response.expect_ok();
    assert_eq!(body["message"], "membership has been successfully created");
    assert_eq!(body["membership"]["user"]["username"], "carol");
    assert_eq!(
        body["membership"]["roles"],
        json!({ "isAdmin": false, "isManager": false, "isDeveloper": false, "isViewer": true })
    );

    // Viewers can read the private project now
    t.ctx
        .get(&format!("/projects/{}", t.project), &carol)
        .await
        .expect_ok();
}

#[tokio::test]
async fn duplicates_and_unknown_users_are_rejected() {
    let t = team().await;
    let uri = format!("/projects/{}/memberships", t.project);

    let duplicate = t
        .ctx
        .post(&uri, &t.admin, json!({ "username": "bob" }))
        .await;
    assert_eq!(
        duplicate.expect_error(StatusCode::BAD_REQUEST),
        "membership already exists"
    );

    let unknown = t
        .ctx
        .post(&uri, &t.admin, json!({ "username": "nobody" }))
        .await;
    assert_eq!(
        unknown.expect_error(StatusCode::BAD_REQUEST),
        "requested user does not exist"
    );
}

#[tokio::test]
async fn managers_cannot_grant_or_revoke_admin() {
    let t = team().await;
    t.ctx.create_user("carol").await;
    let uri = format!("/projects/{}/memberships", t.project);

    let grant = t
        .ctx
        .post(
            &uri,
            &t.manager,
            json!({ "username": "carol", "roles": { "isAdmin": true } }),
        )
        .await;
    assert_eq!(
        grant.expect_error(StatusCode::UNAUTHORIZED),
        "you must have admin permissions to perform this action"
    );

    // Touching the flag at all needs admin, even when setting it false
    let own = t
        .ctx
        .post(
            &format!("{uri}/{}", t.manager_membership),
            &t.manager,
            json!({ "roles": { "isAdmin": false } }),
        )
        .await;
    assert_eq!(
        own.expect_error(StatusCode::UNAUTHORIZED),
        "you must have admin permissions to perform this action"
    );

    let admin_grant = t
        .ctx
        .post(
            &uri,
            &t.admin,
            json!({ "username": "carol", "roles": { "isAdmin": true } }),
        )
        .await;
    let body = admin_grant.expect_ok();
    assert_eq!(body["membership"]["roles"]["isAdmin"], true);
    let carol_membership = body["membership"]["id"].as_str().unwrap().to_string();

    let remove_admin = t
        .ctx
        .delete(
            &format!("{uri}/{carol_membership}"),
            &t.manager,
            json!({ "confirm": true }),
        )
        .await;
    assert_eq!(
        remove_admin.expect_error(StatusCode::UNAUTHORIZED),
        "you must have admin permissions to perform this action"
    );
}

#[tokio::test]
async fn role_updates_apply_on_top_of_the_current_role() {
    let t = team().await;
    let uri = format!(
        "/projects/{}/memberships/{}",
        t.project, t.manager_membership
    );

    let missing = t.ctx.post(&uri, &t.admin, json!({})).await;
    assert_eq!(
        missing.expect_error(StatusCode::BAD_REQUEST),
        "roles is missing from input"
    );

    let shape = t
        .ctx
        .post(&uri, &t.admin, json!({ "roles": { "isManager": "no" } }))
        .await;
    assert_eq!(
        shape.expect_error(StatusCode::BAD_REQUEST),
        "roles must be an object with boolean key-values"
    );

    let demoted = t
        .ctx
        .post(&uri, &t.admin, json!({ "roles": { "isManager": false } }))
        .await;
    let body = demoted.expect_ok();
    assert_eq!(body["message"], "membership has been successfully updated");
    assert_eq!(body["membership"]["roles"]["isManager"], false);
    assert_eq!(body["membership"]["roles"]["isDeveloper"], true);
    assert!(body["membership"]["updatedOn"].is_string());

    // A developer no longer passes the manager gate
    let listing = t
        .ctx
        .get(
            &format!("/projects/{}/memberships/all", t.project),
            &t.manager,
        )
        .await;
    assert_eq!(
        listing.expect_error(StatusCode::UNAUTHORIZED),
        "you must have manager permissions to perform this action"
    );
}

#[tokio::test]
async fn membership_lookup_errors() {
    let t = team().await;
    let base = format!("/projects/{}/memberships", t.project);

    let invalid = t.ctx.get(&format!("{base}/nope"), &t.admin).await;
    assert_eq!(
        invalid.expect_error(StatusCode::BAD_REQUEST),
        "membership id is not valid"
    );

    let unknown = t
        .ctx
        .get(&format!("{base}/{}", uuid::Uuid::new_v4()), &t.admin)
        .await;
    assert_eq!(
        unknown.expect_error(StatusCode::NOT_FOUND),
        "requested membership not found"
    );

    let found = t
        .ctx
        .get(&format!("{base}/{}", t.manager_membership), &t.admin)
        .await;
    assert_eq!(found.expect_ok()["membership"]["user"]["username"], "bob");
}

#[tokio::test]
async fn available_and_member_names() {
    let t = team().await;
    t.ctx.create_user("Carol").await;
    t.ctx.create_user("dave").await;
    let base = format!("/projects/{}/memberships", t.project);

    let available = t.ctx.get(&format!("{base}/available"), &t.manager).await;
    let mut names: Vec<String> = serde_json::from_value(available.expect_ok()["users"].clone()).unwrap();
    names.sort();
    assert_eq!(names, ["Carol", "dave"]);

    let filtered = t
        .ctx
        .get(&format!("{base}/available?filterName=car"), &t.manager)
        .await;
    assert_eq!(filtered.expect_ok()["users"], json!(["Carol"]));

    let members = t.ctx.get(&format!("{base}/all"), &t.manager).await;
    let body = members.expect_ok();
    assert_eq!(body["message"], "member names successfully retrieved");
    let mut names: Vec<String> = serde_json::from_value(body["users"].clone()).unwrap();
    names.sort();
    assert_eq!(names, ["alice", "bob"]);
}

#[tokio::test]
async fn deletion_requires_confirmation() {
    let t = team().await;
    let uri = format!(
        "/projects/{}/memberships/{}",
        t.project, t.manager_membership
    );

    let unconfirmed = t
        .ctx
        .delete(&uri, &t.admin, json!({ "confirm": false }))
        .await;
    assert_eq!(
        unconfirmed.expect_error(StatusCode::BAD_REQUEST),
        "confirm must be set to true to remove this record"
    );

    let removed = t
        .ctx
        .delete(&uri, &t.admin, json!({ "confirm": true }))
        .await;
    assert_eq!(
        removed.expect_ok()["message"],
        "membership has been successfully deleted"
    );

    let outsider = t
        .ctx
        .get(&format!("/projects/{}", t.project), &t.manager)
        .await;
    assert_eq!(
        outsider.expect_error(StatusCode::UNAUTHORIZED),
        "you must be a project member to perform this action"
    );
}
