//! Shared handler state

use std::sync::Arc;

use crate::application::{
    AccessService, AuthService, DashboardService, LabelService, MembershipService,
    ProjectService, StoryService, UserService,
};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::shared::PageRequest;

use super::common::ListQuery;

/// Services behind every API route
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub access: Arc<AccessService>,
    pub users: Arc<UserService>,
    pub projects: Arc<ProjectService>,
    pub memberships: Arc<MembershipService>,
    pub labels: Arc<LabelService>,
    pub stories: Arc<StoryService>,
    pub dashboard: Arc<DashboardService>,
    /// Page size when a request does not choose one
    pub items_per_page: u64,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, config: &AppConfig) -> Self {
        let jwt = JwtConfig::new(
            config.security.jwt_secret.clone(),
            config.security.jwt_expiration_hours,
        );

        Self {
            auth: Arc::new(AuthService::new(repos.clone(), jwt)),
            access: Arc::new(AccessService::new(repos.clone())),
            users: Arc::new(UserService::new(
                repos.clone(),
                config.security.bcrypt_cost,
                config.policy.user_removal,
            )),
            projects: Arc::new(ProjectService::new(repos.clone())),
            memberships: Arc::new(MembershipService::new(repos.clone())),
            labels: Arc::new(LabelService::new(repos.clone())),
            stories: Arc::new(StoryService::new(repos.clone())),
            dashboard: Arc::new(DashboardService::new(repos)),
            items_per_page: config.pagination.items_per_page,
        }
    }

    pub fn page(&self, query: &ListQuery) -> PageRequest {
        query.page_request(self.items_per_page)
    }
}
