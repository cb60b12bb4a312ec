use quire::auth::{
    defaults::ensure_default_admin, AuthService, MokaSessionRepository, SessionRepository,
    SledUserRepository, UserRepository, UserService,
};
use quire::cart::{CartRepository, CartUseCase};
use quire::catalog::{BookService, CategoryService, SledBookRepository, SledCategoryRepository};
use shared::config::Config;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub book_service: Arc<BookService>,
    pub category_service: Arc<CategoryService>,
    pub cart: Arc<CartUseCase>,
    pub session_ttl_secs: u64,
}

impl AppState {
    /// Wire every service on top of one sled database and seed the admin account
    pub async fn open(config: &Config, db: sled::Db) -> shared::Result<Self> {
        let user_repo: Arc<dyn UserRepository> = Arc::new(SledUserRepository::from_db(db.clone()));
        let sessions: Arc<dyn SessionRepository> = Arc::new(MokaSessionRepository::new(
            None,
            Some(Duration::from_secs(config.session_ttl_secs)),
        ));

        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            sessions.clone(),
            config.session_ttl_ms(),
        ));
        let user_service = Arc::new(UserService::new(user_repo.clone(), sessions));

        let books = Arc::new(SledBookRepository::from_db(db.clone()));
        let categories = Arc::new(SledCategoryRepository::from_db(db.clone()));
        let book_service = Arc::new(BookService::new(books.clone(), categories.clone()));
        let category_service = Arc::new(CategoryService::new(categories, books));

        let cart_store = storage_engine::build_cart_store(config.cart_backend, &db)?;
        let cart = Arc::new(CartUseCase::new(
            CartRepository::new(cart_store),
            book_service.clone(),
        ));

        let seeded = ensure_default_admin(
            user_repo.as_ref(),
            &config.admin_name,
            &config.admin_email,
            &config.admin_password,
        )
        .await
        .map_err(|e| shared::Error::Internal(format!("Failed to seed admin user: {}", e)))?;

        match seeded {
            Some(admin) => info!("Default admin user created: {}", admin.email),
            None => info!("Admin user already exists: {}", config.admin_email),
        }

        Ok(Self {
            auth_service,
            user_service,
            book_service,
            category_service,
            cart,
            session_ttl_secs: config.session_ttl_secs,
        })
    }
}
