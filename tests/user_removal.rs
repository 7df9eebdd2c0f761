mod common;

use serde_json::json;

use common::{roles, TestContext, PASSWORD};
use needle::config::UserRemovalPolicy;

async fn remove_member_account(policy: UserRemovalPolicy) -> (TestContext, String) {
    let ctx = TestContext::with_removal_policy(policy).await;
    let alice = ctx.create_user("alice").await;
    let bob = ctx.create_user("bob").await;
    let project = ctx.create_project(&alice, "Needle", false).await;
    ctx.add_member(&alice, &project, &bob, roles("isDeveloper"))
        .await;
    ctx.create_story(&bob, &project, json!({ "name": "Left behind" }))
        .await;

    ctx.delete("/users/bob", &bob, json!({ "confirm": "bob" }))
        .await
        .expect_ok();
    (ctx, project)
}

async fn assert_member_gone(ctx: &TestContext, project: &str) {
    let alice = ctx.user("alice");

    let members = ctx
        .get(&format!("/projects/{project}/memberships"), &alice)
        .await;
    let body = members.expect_ok();
    assert_eq!(body["memberships"].as_array().unwrap().len(), 1);
    assert_eq!(body["memberships"][0]["user"]["username"], "alice");

    let stats = ctx
        .get(&format!("/projects/{project}?includeStatistics=true"), &alice)
        .await;
    let body = stats.expect_ok();
    assert_eq!(body["project"]["statistics"]["memberships"], 1);
    assert_eq!(body["project"]["statistics"]["stories"], 1);

    let available = ctx
        .get(&format!("/projects/{project}/memberships/available"), &alice)
        .await;
    assert_eq!(available.expect_ok()["users"], json!([]));
}

#[tokio::test]
async fn retained_memberships_are_hidden() {
    let (ctx, project) = remove_member_account(UserRemovalPolicy::Retain).await;
    assert_member_gone(&ctx, &project).await;
}

#[tokio::test]
async fn purged_memberships_are_removed() {
    let (ctx, project) = remove_member_account(UserRemovalPolicy::Purge).await;
    assert_member_gone(&ctx, &project).await;
}

#[tokio::test]
async fn a_new_account_under_the_old_name_starts_clean() {
    let (ctx, project) = remove_member_account(UserRemovalPolicy::Retain).await;

    let bob = ctx.create_user("bob").await;
    ctx.login("bob", PASSWORD).await.expect_ok();

    let denied = ctx
        .post(
            &format!("/projects/{project}/stories"),
            &bob,
            json!({ "name": "Back again" }),
        )
        .await;
    assert_eq!(
        denied.expect_error(axum::http::StatusCode::UNAUTHORIZED),
        "you must be a project member to perform this action"
    );

    let dashboard = ctx.get("/dashboard", &bob).await;
    assert!(dashboard.expect_ok()["projects"]
        .as_array()
        .unwrap()
        .is_empty());
}
