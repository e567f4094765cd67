use std::str::FromStr;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use codeforge_core::domain::UserId;
use judge_orchestrator::{UserDirectory, UserRecord as DirectoryRecord};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::entity::user;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub external_id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub external_id: String,
    pub username: String,
    pub email: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord>;
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: user::Model) -> Result<UserRecord> {
        let id = UserId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid user.id '{}' from database: {e}", model.id))?;

        Ok(UserRecord {
            id,
            external_id: model.external_id,
            username: model.username,
            email: model.email,
        })
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord> {
        let id = UserId::new();
        let now = Utc::now().naive_utc();

        let active_model = user::ActiveModel {
            id: Set(id.to_string()),
            external_id: Set(new_user.external_id),
            username: Set(new_user.username),
            email: Set(new_user.email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        let model = user::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }
}

#[async_trait]
impl UserDirectory for SeaOrmUserRepository {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<DirectoryRecord>> {
        let model = user::Entity::find()
            .filter(user::Column::ExternalId.eq(external_id))
            .one(&self.db)
            .await?;

        model
            .map(|model| {
                let record = Self::map_model(model)?;
                Ok(DirectoryRecord {
                    id: record.id,
                    external_id: record.external_id,
                    username: record.username,
                })
            })
            .transpose()
    }
}
