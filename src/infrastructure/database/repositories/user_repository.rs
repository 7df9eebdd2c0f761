use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::{db_err, is_unique_violation};
use crate::domain::user::{CreateUserDto, UserRepositoryInterface};
use crate::domain::{DomainError, DomainResult, User};
use crate::infrastructure::database::entities::{membership, user};
use crate::shared::search::{equals_ignore_case, starts_with_ignore_case};
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        display_name: model.display_name,
        password_hash: model.password_hash,
        api_key: model.api_key,
        is_active: model.is_active,
        created_on: model.created_on,
        updated_on: model.updated_on,
        deleted_on: model.deleted_on,
    }
}

fn user_not_found() -> DomainError {
    DomainError::not_found("requested user not found")
}

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(dto.username.to_lowercase()),
            display_name: Set(dto.display_name),
            password_hash: Set(dto.password_hash),
            api_key: Set(dto.api_key),
            is_active: Set(true),
            created_on: Set(Utc::now()),
            updated_on: Set(None),
            deleted_on: Set(None),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::validation("username is already taken")
            } else {
                db_err(e)
            }
        })?;
        Ok(user_model_to_domain(model))
    }

    async fn list_active(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>> {
        let mut query = user::Entity::find().filter(user::Column::IsActive.eq(true));
        if let Some(term) = filter {
            query = query.filter(starts_with_ignore_case(user::Column::Username, term));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let window = page.window(total);

        let models = query
            .order_by_asc(user::Column::CreatedOn)
            .order_by_asc(user::Column::Id)
            .offset(window.offset)
            .limit(window.items_per_page)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(user_model_to_domain).collect(),
            total,
            window,
        ))
    }

    async fn get_active_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::IsActive.eq(true))
            .filter(equals_ignore_case(user::Column::Username, username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_active_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<User> {
        let model = user::Entity::find_by_id(id.to_string())
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(user_not_found)?;

        let mut active = model.into_active_model();
        active.password_hash = Set(password_hash.to_string());
        active.updated_on = Set(Some(Utc::now()));

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(user_model_to_domain(updated))
    }

    async fn deactivate(&self, id: &str, purge_memberships: bool) -> DomainResult<User> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = user::Entity::find_by_id(id.to_string())
            .filter(user::Column::IsActive.eq(true))
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(user_not_found)?;

        let now = Utc::now();
        let mut active = model.into_active_model();
        active.is_active = Set(false);
        active.updated_on = Set(Some(now));
        active.deleted_on = Set(Some(now));
        let updated = active.update(&txn).await.map_err(db_err)?;

        if purge_memberships {
            let purged = membership::Entity::delete_many()
                .filter(membership::Column::UserId.eq(id))
                .exec(&txn)
                .await
                .map_err(db_err)?;
            tracing::debug!(user_id = %id, memberships = purged.rows_affected, "Purged memberships");
        }

        txn.commit().await.map_err(db_err)?;
        Ok(user_model_to_domain(updated))
    }

    async fn count_active(&self) -> DomainResult<u64> {
        user::Entity::find()
            .filter(user::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
