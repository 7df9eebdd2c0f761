//! SeaORM implementation of StoryRepository
//!
//! Stories are read as plain rows, then their users, labels and projects
//! are batch-loaded and stitched into [`StoryDetails`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::db_err;
use crate::domain::story::{CreateStoryDto, StoryRepository, UpdateStoryDto};
use crate::domain::{
    DomainError, DomainResult, LabelSummary, ProjectRef, StoryDetails, UserSummary,
};
use crate::infrastructure::database::entities::{label, project, story, user};
use crate::shared::search::starts_with_ignore_case;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmStoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmStoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn paginate(
        &self,
        query: Select<story::Entity>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<StoryDetails>> {
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let window = page.window(total);

        let models = query
            .order_by_asc(story::Column::CreatedOn)
            .order_by_asc(story::Column::Id)
            .offset(window.offset)
            .limit(window.items_per_page)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = hydrate(&self.db, models).await?;
        Ok(PaginatedResult::new(items, total, window))
    }

    async fn load(&self, id: &str) -> DomainResult<StoryDetails> {
        let model = story::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(story_not_found)?;
        one(&self.db, model).await
    }
}

fn story_not_found() -> DomainError {
    DomainError::not_found("requested story not found")
}

fn user_summary(model: &user::Model) -> UserSummary {
    UserSummary {
        username: model.username.clone(),
        display_name: model.display_name.clone(),
    }
}

fn label_summary(model: &label::Model) -> LabelSummary {
    LabelSummary {
        name: model.name.clone(),
        color: model.color.clone(),
        transparent: model.transparent,
    }
}

async fn one<C: ConnectionTrait>(db: &C, model: story::Model) -> DomainResult<StoryDetails> {
    hydrate(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| DomainError::Internal("story vanished during hydration".to_string()))
}

/// Resolve every reference of `models` with one query per referenced table.
async fn hydrate<C: ConnectionTrait>(
    db: &C,
    models: Vec<story::Model>,
) -> DomainResult<Vec<StoryDetails>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let mut user_ids: Vec<String> = Vec::new();
    let mut label_ids: Vec<String> = Vec::new();
    let mut project_ids: Vec<String> = Vec::new();
    for m in &models {
        user_ids.push(m.creator_id.clone());
        user_ids.extend(m.owner_id.clone());
        label_ids.extend(m.priority_id.clone());
        label_ids.extend(m.status_id.clone());
        project_ids.push(m.project_id.clone());
    }
    for ids in [&mut user_ids, &mut label_ids, &mut project_ids] {
        ids.sort();
        ids.dedup();
    }

    let users: HashMap<String, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|u| (u.id.clone(), u))
        .collect();

    let labels: HashMap<String, label::Model> = if label_ids.is_empty() {
        HashMap::new()
    } else {
        label::Entity::find()
            .filter(label::Column::Id.is_in(label_ids))
            .all(db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|l| (l.id.clone(), l))
            .collect()
    };

    let projects: HashMap<String, project::Model> = project::Entity::find()
        .filter(project::Column::Id.is_in(project_ids))
        .all(db)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    models
        .into_iter()
        .map(|m| {
            let creator = users.get(&m.creator_id).map(user_summary).ok_or_else(|| {
                DomainError::Internal(format!("story {} has no creator {}", m.id, m.creator_id))
            })?;
            let project = projects
                .get(&m.project_id)
                .map(|p| ProjectRef {
                    id: p.id.clone(),
                    name: p.name.clone(),
                })
                .ok_or_else(|| {
                    DomainError::Internal(format!("story {} has no project {}", m.id, m.project_id))
                })?;

            Ok(StoryDetails {
                owner: m.owner_id.as_ref().and_then(|id| users.get(id)).map(user_summary),
                priority: m.priority_id.as_ref().and_then(|id| labels.get(id)).map(label_summary),
                status: m.status_id.as_ref().and_then(|id| labels.get(id)).map(label_summary),
                id: m.id,
                name: m.name,
                details: m.details,
                points: m.points,
                project,
                creator,
                created_on: m.created_on,
                updated_on: m.updated_on,
            })
        })
        .collect()
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl StoryRepository for SeaOrmStoryRepository {
    async fn create(&self, project_id: &str, dto: CreateStoryDto) -> DomainResult<StoryDetails> {
        let model = story::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            project_id: Set(project_id.to_string()),
            creator_id: Set(dto.creator_id),
            owner_id: Set(dto.owner_id),
            priority_id: Set(dto.priority_id),
            status_id: Set(dto.status_id),
            name: Set(dto.name),
            details: Set(dto.details),
            points: Set(dto.points),
            created_on: Set(Utc::now()),
            updated_on: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        one(&self.db, model).await
    }

    async fn find(&self, project_id: &str, id: &str) -> DomainResult<Option<StoryDetails>> {
        let model = story::Entity::find_by_id(id.to_string())
            .filter(story::Column::ProjectId.eq(project_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match model {
            Some(model) => Ok(Some(one(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        project_id: &str,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<StoryDetails>> {
        let mut query = story::Entity::find().filter(story::Column::ProjectId.eq(project_id));
        if let Some(term) = filter {
            query = query.filter(starts_with_ignore_case(story::Column::Name, term));
        }
        self.paginate(query, page).await
    }

    async fn update(&self, id: &str, dto: UpdateStoryDto) -> DomainResult<StoryDetails> {
        let model = story::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(story_not_found)?;

        let mut active = model.into_active_model();
        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(details) = dto.details {
            active.details = Set(details);
        }
        if let Some(points) = dto.points {
            active.points = Set(Some(points));
        }
        if let Some(owner_id) = dto.owner_id {
            active.owner_id = Set(owner_id);
        }
        if let Some(priority_id) = dto.priority_id {
            active.priority_id = Set(priority_id);
        }
        if let Some(status_id) = dto.status_id {
            active.status_id = Set(status_id);
        }
        active.updated_on = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;

        self.load(id).await
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = story::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(story_not_found());
        }
        Ok(())
    }

    async fn owned_by(
        &self,
        user_id: &str,
        project_ids: &[String],
    ) -> DomainResult<Vec<StoryDetails>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = story::Entity::find()
            .filter(story::Column::OwnerId.eq(user_id))
            .filter(story::Column::ProjectId.is_in(project_ids.iter().cloned()))
            .order_by_asc(story::Column::CreatedOn)
            .order_by_asc(story::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        hydrate(&self.db, models).await
    }

    async fn involving_user(
        &self,
        user_id: &str,
        project_ids: &[String],
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<StoryDetails>> {
        if project_ids.is_empty() {
            return Ok(PaginatedResult::new(Vec::new(), 0, page.window(0)));
        }

        let mut query = story::Entity::find()
            .filter(
                Condition::any()
                    .add(story::Column::CreatorId.eq(user_id))
                    .add(story::Column::OwnerId.eq(user_id)),
            )
            .filter(story::Column::ProjectId.is_in(project_ids.iter().cloned()));
        if let Some(term) = filter {
            query = query.filter(starts_with_ignore_case(story::Column::Name, term));
        }
        self.paginate(query, page).await
    }
}
