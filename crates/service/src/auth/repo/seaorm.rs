use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials, Role};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_domain(u: models::user::Model) -> Result<AuthUser, AuthError> {
    let role = u.role.parse::<Role>().map_err(AuthError::Repository)?;
    Ok(AuthUser { id: u.id, email: u.email, full_name: u.full_name, phone: u.phone, role })
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        models::user::find_by_email(&self.db, email).await?.map(to_domain).transpose()
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        res.map(to_domain).transpose()
    }

    async fn create_user(&self, email: &str, full_name: &str, phone: Option<&str>, role: Role) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, email, full_name, phone, role.as_str()).await?;
        to_domain(created)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), AuthError> {
        models::user::hard_delete(&self.db, id).await?;
        Ok(())
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm).await?;
        Ok(Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm })
    }
}
