use std::path::PathBuf;
use std::sync::Arc;

use common::sms::SmsSender;
use configs::AppConfig;
use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::{mock::MockAuthRepository, AuthRepository};
use service::auth::service::AuthConfig;
use service::auth::AuthService;
use service::booking::repo::seaorm::SeaOrmBookingRepository;
use service::booking::repository::{mock::MockBookingRepository, BookingRepository};
use service::booking::{BookingPolicy, BookingService};
use service::catalog::repo::seaorm::SeaOrmServiceRepository;
use service::catalog::repository::{mock::MockServiceRepository, ServiceRepository};
use service::catalog::CatalogService;
use service::directory::repo::seaorm::SeaOrmBusinessRepository;
use service::directory::repository::{mock::MockBusinessRepository, BusinessRepository};
use service::directory::DirectoryService;
use service::media::{LocalObjectStore, MediaService, ObjectStore};

/// Storage backends behind every domain service.
pub struct Repositories {
    pub users: Arc<dyn AuthRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub requests: Arc<dyn BookingRepository>,
    pub objects: Arc<dyn ObjectStore>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        Self {
            users: Arc::new(SeaOrmAuthRepository { db: db.clone() }),
            businesses: Arc::new(SeaOrmBusinessRepository { db: db.clone() }),
            services: Arc::new(SeaOrmServiceRepository { db: db.clone() }),
            requests: Arc::new(SeaOrmBookingRepository { db }),
            objects: Arc::new(LocalObjectStore::new(&cfg.media.dir, &cfg.media.public_base_url)),
        }
    }

    /// Mock repositories, for tests and local demos without Postgres.
    pub fn in_memory(cfg: &AppConfig) -> Self {
        Self {
            users: Arc::new(MockAuthRepository::default()),
            businesses: Arc::new(MockBusinessRepository::default()),
            services: Arc::new(MockServiceRepository::default()),
            requests: Arc::new(MockBookingRepository::default()),
            objects: Arc::new(LocalObjectStore::new(&cfg.media.dir, &cfg.media.public_base_url)),
        }
    }
}

/// Shared handler state; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub directory: Arc<DirectoryService>,
    pub catalog: Arc<CatalogService>,
    pub bookings: Arc<BookingService<dyn BookingRepository>>,
    pub media: Arc<MediaService>,
    pub media_dir: PathBuf,
}

impl AppState {
    pub fn new(repos: Repositories, sms: Arc<dyn SmsSender>, cfg: &AppConfig) -> Self {
        let policy = BookingPolicy {
            reset_paid_on_status_change: cfg.booking.reset_paid_on_status_change,
            require_accepted_for_payment: cfg.booking.require_accepted_for_payment,
        };
        let auth = AuthService::new(
            repos.users.clone(),
            repos.businesses.clone(),
            sms,
            AuthConfig::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_hours),
        );
        Self {
            auth: Arc::new(auth),
            directory: Arc::new(DirectoryService::new(repos.businesses.clone())),
            catalog: Arc::new(CatalogService::new(repos.services.clone(), repos.businesses)),
            bookings: Arc::new(BookingService::new(repos.requests, repos.services, repos.users, policy)),
            media: Arc::new(MediaService::new(repos.objects, cfg.media.max_upload_bytes)),
            media_dir: PathBuf::from(&cfg.media.dir),
        }
    }
}
