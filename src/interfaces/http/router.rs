//! API router with Swagger UI

use axum::{
    http::HeaderName,
    middleware,
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ErrorBody, FatalErrorBody};
use super::middleware::auth_middleware;
use super::modules::health::{self, HealthState};
use super::modules::metrics::{self, http_metrics_middleware, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, dashboard, labels, memberships, projects, stories, users};
use super::state::AppState;
use crate::application::identity::TOKEN_HEADER;
use crate::domain::LabelKind;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                TOKEN_HEADER,
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    TOKEN_HEADER,
                    "Session token returned by GET /auth",
                ))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Operations
        health::health_check,
        metrics::prometheus_metrics,
        // Auth
        auth::login,
        auth::refresh_token,
        // Users
        users::create_user,
        users::list_users,
        users::get_user,
        users::change_password,
        users::delete_user,
        // Projects
        projects::create_project,
        projects::list_projects,
        projects::get_project,
        projects::update_project,
        projects::delete_project,
        // Memberships
        memberships::create_membership,
        memberships::list_memberships,
        memberships::available_users,
        memberships::member_names,
        memberships::get_membership,
        memberships::update_membership,
        memberships::delete_membership,
        // Priorities and statuses
        labels::create_label,
        labels::list_labels,
        labels::label_names,
        labels::get_label,
        labels::update_label,
        labels::delete_label,
        // Stories
        stories::create_story,
        stories::list_stories,
        stories::get_story,
        stories::update_story,
        stories::delete_story,
        // Dashboard
        dashboard::overview,
        dashboard::projects,
        dashboard::stories,
    ),
    components(schemas(ErrorBody, FatalErrorBody)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and session tokens"),
        (name = "Users", description = "Accounts"),
        (name = "Projects", description = "Projects"),
        (name = "Memberships", description = "Project members and their roles"),
        (name = "Priorities and statuses", description = "Story labels"),
        (name = "Stories", description = "Work items"),
        (name = "Dashboard", description = "The caller's own projects and stories"),
        (name = "Operations", description = "Health and metrics")
    ),
    info(
        title = "Needle API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Project tracking: projects, members, priorities, statuses and stories"
    )
)]
pub struct ApiDoc;

/// `/projects/{project_id}/priorities[...]` or `/projects/{project_id}/status[...]`
fn label_routes(kind: LabelKind) -> Router<AppState> {
    let base = format!("/projects/{{project_id}}/{}", kind.collection());
    Router::new()
        .route(&base, get(labels::list_labels).post(labels::create_label))
        .route(&format!("{base}/all"), get(labels::label_names))
        .route(
            &format!("{base}/{{label_id}}"),
            get(labels::get_label)
                .post(labels::update_label)
                .delete(labels::delete_label),
        )
        .route_layer(Extension(kind))
}

/// Build the API router.
///
/// `metrics` is optional so tests can run without installing a global
/// recorder.
pub fn create_api_router(
    state: AppState,
    health_state: HealthState,
    metrics_state: Option<MetricsState>,
) -> Router {
    let public_routes = Router::new()
        .route("/auth", get(auth::login))
        .route("/users", post(users::create_user));

    let protected_routes = Router::new()
        .route("/auth/token", get(auth::refresh_token))
        // Users
        .route("/users", get(users::list_users))
        .route(
            "/users/{username}",
            get(users::get_user)
                .post(users::change_password)
                .delete(users::delete_user),
        )
        // Projects
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{project_id}",
            get(projects::get_project)
                .post(projects::update_project)
                .delete(projects::delete_project),
        )
        // Memberships
        .route(
            "/projects/{project_id}/memberships",
            get(memberships::list_memberships).post(memberships::create_membership),
        )
        .route(
            "/projects/{project_id}/memberships/available",
            get(memberships::available_users),
        )
        .route(
            "/projects/{project_id}/memberships/all",
            get(memberships::member_names),
        )
        .route(
            "/projects/{project_id}/memberships/{membership_id}",
            get(memberships::get_membership)
                .post(memberships::update_membership)
                .delete(memberships::delete_membership),
        )
        // Priorities and statuses
        .merge(label_routes(LabelKind::Priority))
        .merge(label_routes(LabelKind::Status))
        // Stories
        .route(
            "/projects/{project_id}/stories",
            get(stories::list_stories).post(stories::create_story),
        )
        .route(
            "/projects/{project_id}/stories/{story_id}",
            get(stories::get_story)
                .post(stories::update_story)
                .delete(stories::delete_story),
        )
        // Dashboard
        .route("/dashboard", get(dashboard::overview))
        .route("/dashboard/projects", get(dashboard::projects))
        .route("/dashboard/stories", get(dashboard::stories))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = public_routes.merge(protected_routes).with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(api_routes);

    if let Some(metrics_state) = metrics_state {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics_state),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(TOKEN_HEADER)]);

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
