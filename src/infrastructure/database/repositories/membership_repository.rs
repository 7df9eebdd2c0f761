//! SeaORM implementation of MembershipRepository
//!
//! Memberships of deactivated users stay in the table under the `retain`
//! removal policy; every read here joins the user and skips them.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::project_repository::project_model_to_domain;
use super::{db_err, is_unique_violation};
use crate::domain::membership::{
    MemberProject, Membership, MembershipDetails, MembershipRepository, ProjectRole,
};
use crate::domain::{DomainError, DomainResult, ProjectRef, UserSummary};
use crate::infrastructure::database::entities::{membership, project, user};
use crate::shared::search::starts_with_ignore_case;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmMembershipRepository {
    db: DatabaseConnection,
}

impl SeaOrmMembershipRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn project_ref(&self, project_id: &str) -> DomainResult<ProjectRef> {
        project::Entity::find_by_id(project_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(|p| ProjectRef {
                id: p.id,
                name: p.name,
            })
            .ok_or_else(|| DomainError::not_found("requested project not found"))
    }

    async fn load_details(&self, membership_id: &str) -> DomainResult<MembershipDetails> {
        let (model, user) = membership::Entity::find_by_id(membership_id.to_string())
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("requested membership not found"))?;
        let user = user.ok_or_else(|| orphaned(&model))?;
        let project = self.project_ref(&model.project_id).await?;
        Ok(details(model, user, project))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_to_domain(role: membership::MembershipRole) -> ProjectRole {
    match role {
        membership::MembershipRole::Viewer => ProjectRole::Viewer,
        membership::MembershipRole::Developer => ProjectRole::Developer,
        membership::MembershipRole::Manager => ProjectRole::Manager,
        membership::MembershipRole::Admin => ProjectRole::Admin,
    }
}

fn role_to_entity(role: ProjectRole) -> membership::MembershipRole {
    match role {
        ProjectRole::Viewer => membership::MembershipRole::Viewer,
        ProjectRole::Developer => membership::MembershipRole::Developer,
        ProjectRole::Manager => membership::MembershipRole::Manager,
        ProjectRole::Admin => membership::MembershipRole::Admin,
    }
}

fn membership_model_to_domain(model: membership::Model) -> Membership {
    Membership {
        id: model.id,
        project_id: model.project_id,
        user_id: model.user_id,
        role: model.role.map(role_to_domain),
        created_on: model.created_on,
        updated_on: model.updated_on,
    }
}

fn details(model: membership::Model, user: user::Model, project: ProjectRef) -> MembershipDetails {
    MembershipDetails {
        id: model.id,
        project,
        user: UserSummary {
            username: user.username,
            display_name: user.display_name,
        },
        role: model.role.map(role_to_domain),
        created_on: model.created_on,
        updated_on: model.updated_on,
    }
}

fn orphaned(model: &membership::Model) -> DomainError {
    DomainError::Internal(format!(
        "membership {} references missing user {}",
        model.id, model.user_id
    ))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl MembershipRepository for SeaOrmMembershipRepository {
    async fn create(
        &self,
        project_id: &str,
        user_id: &str,
        role: Option<ProjectRole>,
    ) -> DomainResult<MembershipDetails> {
        let id = uuid::Uuid::new_v4().to_string();

        membership::ActiveModel {
            id: Set(id.clone()),
            project_id: Set(project_id.to_string()),
            user_id: Set(user_id.to_string()),
            role: Set(role.map(role_to_entity)),
            created_on: Set(Utc::now()),
            updated_on: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("membership already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        self.load_details(&id).await
    }

    async fn find_for_user(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> DomainResult<Option<Membership>> {
        let model = membership::Entity::find()
            .filter(membership::Column::ProjectId.eq(project_id))
            .filter(membership::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(membership_model_to_domain))
    }

    async fn find_in_project(
        &self,
        project_id: &str,
        membership_id: &str,
    ) -> DomainResult<Option<MembershipDetails>> {
        let found = membership::Entity::find_by_id(membership_id.to_string())
            .filter(membership::Column::ProjectId.eq(project_id))
            .inner_join(user::Entity)
            .filter(user::Column::IsActive.eq(true))
            .select_also(user::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some((model, user)) = found else {
            return Ok(None);
        };
        let user = user.ok_or_else(|| orphaned(&model))?;
        let project = self.project_ref(project_id).await?;
        Ok(Some(details(model, user, project)))
    }

    async fn list(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<MembershipDetails>> {
        let project = self.project_ref(project_id).await?;

        let query = membership::Entity::find()
            .filter(membership::Column::ProjectId.eq(project_id))
            .inner_join(user::Entity)
            .filter(user::Column::IsActive.eq(true));

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let window = page.window(total);

        let rows = query
            .order_by_asc(membership::Column::CreatedOn)
            .order_by_asc(membership::Column::Id)
            .offset(window.offset)
            .limit(window.items_per_page)
            .select_also(user::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut items = Vec::with_capacity(rows.len());
        for (model, user) in rows {
            let user = user.ok_or_else(|| orphaned(&model))?;
            items.push(details(model, user, project.clone()));
        }

        Ok(PaginatedResult::new(items, total, window))
    }

    async fn member_names(&self, project_id: &str) -> DomainResult<Vec<String>> {
        let rows = membership::Entity::find()
            .filter(membership::Column::ProjectId.eq(project_id))
            .inner_join(user::Entity)
            .filter(user::Column::IsActive.eq(true))
            .order_by_asc(membership::Column::CreatedOn)
            .select_also(user::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, user)| user.map(|u| u.display_name))
            .collect())
    }

    async fn available_names(
        &self,
        project_id: &str,
        filter: Option<&str>,
    ) -> DomainResult<Vec<String>> {
        let members = Query::select()
            .column(membership::Column::UserId)
            .from(membership::Entity)
            .and_where(membership::Column::ProjectId.eq(project_id))
            .to_owned();

        let mut query = user::Entity::find()
            .filter(user::Column::IsActive.eq(true))
            .filter(user::Column::Id.not_in_subquery(members));
        if let Some(term) = filter {
            query = query.filter(starts_with_ignore_case(user::Column::Username, term));
        }

        let users = query
            .order_by_asc(user::Column::CreatedOn)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(users.into_iter().map(|u| u.display_name).collect())
    }

    async fn update_role(
        &self,
        membership_id: &str,
        role: Option<ProjectRole>,
    ) -> DomainResult<MembershipDetails> {
        let model = membership::Entity::find_by_id(membership_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("requested membership not found"))?;

        let mut active = model.into_active_model();
        active.role = Set(role.map(role_to_entity));
        active.updated_on = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;

        self.load_details(membership_id).await
    }

    async fn delete(&self, membership_id: &str) -> DomainResult<()> {
        let result = membership::Entity::delete_by_id(membership_id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("requested membership not found"));
        }
        Ok(())
    }

    async fn member_projects(&self, user_id: &str) -> DomainResult<Vec<MemberProject>> {
        let rows = membership::Entity::find()
            .filter(membership::Column::UserId.eq(user_id))
            .inner_join(project::Entity)
            .filter(project::Column::IsActive.eq(true))
            .order_by_asc(project::Column::CreatedOn)
            .order_by_asc(project::Column::Id)
            .select_also(project::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().filter_map(member_project).collect())
    }

    async fn member_projects_page(
        &self,
        user_id: &str,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<MemberProject>> {
        let mut query = membership::Entity::find()
            .filter(membership::Column::UserId.eq(user_id))
            .inner_join(project::Entity)
            .filter(project::Column::IsActive.eq(true));
        if let Some(term) = filter {
            query = query.filter(starts_with_ignore_case(
                (project::Entity, project::Column::Name),
                term,
            ));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let window = page.window(total);

        let rows = query
            .order_by_asc(project::Column::CreatedOn)
            .order_by_asc(project::Column::Id)
            .offset(window.offset)
            .limit(window.items_per_page)
            .select_also(project::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            rows.into_iter().filter_map(member_project).collect(),
            total,
            window,
        ))
    }

    async fn active_project_ids(&self, user_id: &str) -> DomainResult<Vec<String>> {
        membership::Entity::find()
            .select_only()
            .column(membership::Column::ProjectId)
            .filter(membership::Column::UserId.eq(user_id))
            .inner_join(project::Entity)
            .filter(project::Column::IsActive.eq(true))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

fn member_project(
    (model, project): (membership::Model, Option<project::Model>),
) -> Option<MemberProject> {
    project.map(|p| MemberProject {
        project: project_model_to_domain(p),
        role: model.role.map(role_to_domain),
    })
}
