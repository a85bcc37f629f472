use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials, Role};
use super::errors::AuthError;

/// Repository abstraction for accounts and their credentials.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, email: &str, full_name: &str, phone: Option<&str>, role: Role) -> Result<AuthUser, AuthError>;
    /// Remove an account together with its credentials.
    async fn delete_user(&self, id: Uuid) -> Result<(), AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: RwLock<HashMap<Uuid, AuthUser>>,
        creds: RwLock<HashMap<Uuid, Credentials>>, // key: user_id
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let email = email.trim().to_lowercase();
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.users.read().await.get(&id).cloned())
        }

        async fn create_user(&self, email: &str, full_name: &str, phone: Option<&str>, role: Role) -> Result<AuthUser, AuthError> {
            let email = email.trim().to_lowercase();
            let mut users = self.users.write().await;
            if users.values().any(|u| u.email == email) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                email,
                full_name: full_name.trim().to_string(),
                phone: phone.map(str::to_string),
                role,
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn delete_user(&self, id: Uuid) -> Result<(), AuthError> {
            self.users.write().await.remove(&id);
            self.creds.write().await.remove(&id);
            Ok(())
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            Ok(self.creds.read().await.get(&user_id).cloned())
        }

        async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let c = Credentials { user_id, password_hash, password_algorithm };
            self.creds.write().await.insert(user_id, c.clone());
            Ok(c)
        }
    }
}
