use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use common::sms::{self, SmsSender};
use rand::rngs::OsRng;
use tracing::{debug, error, info, instrument};

use super::domain::{AuthContext, AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token;
use crate::directory::domain::NewBusiness;
use crate::directory::repository::BusinessRepository;
use crate::errors::ServiceError;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub password_algorithm: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl_hours, password_algorithm: "argon2".into() }
    }
}

/// Signup and login, independent of the web framework.
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    businesses: Arc<dyn BusinessRepository>,
    sms: Arc<dyn SmsSender>,
    cfg: AuthConfig,
}

fn required(value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::Validation("Please fill all fields".into()));
    }
    Ok(())
}

fn check_input(input: &RegisterInput) -> Result<(), AuthError> {
    required(input.email())?;
    required(input.password())?;
    match input {
        RegisterInput::Customer { full_name, .. } => required(full_name)?,
        RegisterInput::BusinessOwner { business_name, location, .. } => {
            required(business_name)?;
            required(location)?;
            models::business::validate_business_name(business_name)?;
            models::business::validate_location(location)?;
        }
    }
    models::user::validate_email(input.email())?;
    models::user::validate_full_name(input.display_name())?;
    if let Some(phone) = input.phone().filter(|p| !p.trim().is_empty()) {
        models::user::validate_phone(phone.trim())?;
    }
    if input.password().len() < 8 {
        return Err(AuthError::Validation("password too short (>=8)".into()));
    }
    Ok(())
}

impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => AuthError::Validation(msg),
            ServiceError::Model(m) => m.into(),
            other => AuthError::Repository(other.to_string()),
        }
    }
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, businesses: Arc<dyn BusinessRepository>, sms: Arc<dyn SmsSender>, cfg: AuthConfig) -> Self {
        Self { repo, businesses, sms, cfg }
    }

    /// Create an account, its hashed credentials and, for owners, the
    /// business profile.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use service::directory::repository::mock::MockBusinessRepository;
    /// use common::sms::NoopSmsSender;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(
    ///     Arc::new(MockAuthRepository::default()),
    ///     Arc::new(MockBusinessRepository::default()),
    ///     Arc::new(NoopSmsSender),
    ///     AuthConfig::new("0123456789abcdef", 12),
    /// );
    /// let input = RegisterInput::Customer { email: "Ama@Example.com".into(), password: "Secret123".into(), full_name: "Ama".into(), phone: None };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "ama@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email(), role = %input.role()))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        check_input(&input)?;
        if let Some(existing) = self.repo.find_user_by_email(input.email()).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password().as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let phone = input.phone().map(str::trim).filter(|p| !p.is_empty());
        let user = self.repo.create_user(input.email(), input.display_name(), phone, input.role()).await?;
        if let Err(e) = self.complete_account(&user, &input, hash).await {
            // Undo the user row; credentials go with it.
            if let Err(cleanup) = self.repo.delete_user(user.id).await {
                error!(user_id = %user.id, error = %cleanup, "failed to remove partially created account");
            }
            return Err(e);
        }

        if let Some(phone) = &user.phone {
            sms::send_detached(self.sms.clone(), phone.clone(), sms::welcome_message(&user.full_name));
        }
        info!(user_id = %user.id, email = %user.email, role = %user.role, "user_registered");
        Ok(user)
    }

    async fn complete_account(&self, user: &AuthUser, input: &RegisterInput, hash: String) -> Result<(), AuthError> {
        self.repo.upsert_password(user.id, hash, self.cfg.password_algorithm.clone()).await?;
        if let RegisterInput::BusinessOwner { business_name, business_type, location, .. } = input {
            self.businesses
                .create(NewBusiness {
                    owner_id: user.id,
                    business_name: business_name.trim().to_string(),
                    business_type: *business_type,
                    location: location.trim().to_string(),
                })
                .await?;
        }
        Ok(())
    }

    /// Check the password and issue a token carrying the stored role.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{LoginInput, RegisterInput, Role};
    /// use service::directory::{domain::BusinessType, repository::mock::MockBusinessRepository};
    /// use common::sms::NoopSmsSender;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(
    ///     Arc::new(MockAuthRepository::default()),
    ///     Arc::new(MockBusinessRepository::default()),
    ///     Arc::new(NoopSmsSender),
    ///     AuthConfig::new("0123456789abcdef", 12),
    /// );
    /// let _ = tokio_test::block_on(svc.register(RegisterInput::BusinessOwner {
    ///     email: "o@wash.com".into(), password: "Passw0rd".into(), business_name: "Sparkle".into(),
    ///     business_type: BusinessType::CarWash, location: "Accra".into(), phone: None,
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "o@wash.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.role, Role::BusinessOwner);
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let token = token::issue(&user, &self.cfg.jwt_secret, self.cfg.token_ttl_hours)?;
        info!(user_id = %user.id, role = %user.role, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Resolve a token into the caller's context.
    pub fn authenticate(&self, bearer: &str) -> Result<AuthContext, AuthError> {
        token::verify(bearer, &self.cfg.jwt_secret).map_err(|_| AuthError::Unauthorized)
    }

    /// Profile of the signed-in caller.
    pub async fn me(&self, ctx: &AuthContext) -> Result<AuthUser, AuthError> {
        self.repo.get_user(ctx.user_id).await?.ok_or(AuthError::NotFound)
    }
}
