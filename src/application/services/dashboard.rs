//! Dashboard service: the caller's projects and stories at a glance

use std::sync::Arc;

use crate::domain::{DomainResult, MemberProject, RepositoryProvider, StoryDetails, User};
use crate::shared::{PageRequest, PaginatedResult};

/// Landing view for one user
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Active projects the user belongs to, with the user's role in each
    pub projects: Vec<MemberProject>,
    /// Stories the user owns in those projects
    pub stories: Vec<StoryDetails>,
}

pub struct DashboardService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DashboardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn overview(&self, user: &User) -> DomainResult<Dashboard> {
        let projects = self.repos.memberships().member_projects(&user.id).await?;
        let project_ids: Vec<String> = projects.iter().map(|p| p.project.id.clone()).collect();
        let stories = self.repos.stories().owned_by(&user.id, &project_ids).await?;
        Ok(Dashboard { projects, stories })
    }

    pub async fn projects(
        &self,
        user: &User,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<MemberProject>> {
        self.repos
            .memberships()
            .member_projects_page(&user.id, filter, page)
            .await
    }

    /// Stories the user created or owns, limited to active projects the
    /// user is still a member of.
    pub async fn stories(
        &self,
        user: &User,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<StoryDetails>> {
        let project_ids = self.repos.memberships().active_project_ids(&user.id).await?;
        self.repos
            .stories()
            .involving_user(&user.id, &project_ids, filter, page)
            .await
    }
}
