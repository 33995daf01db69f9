use wanderstay_backend::{
    api::router::create_router,
    config::Config,
    domain::models::auth::Claims,
    domain::models::booking::Booking,
    domain::models::property::{Property, RoomCategory},
    domain::ports::{NotificationService, PropertyRepository},
    domain::services::booking_service::BookingService,
    error::AppError,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo, sqlite_property_repo::SqlitePropertyRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PAYMENT_SECRET: &str = "test-payment-secret";

/// Records confirmation sends instead of talking to the mail relay. Can be
/// switched into failure mode to exercise the absorb-after-persist policy.
pub struct MockNotifier {
    pub sent: AtomicUsize,
    pub fail: AtomicBool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl NotificationService for MockNotifier {
    async fn send_confirmation(&self, _booking: &Booking) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::InternalWithMsg("mail relay unavailable".to_string()));
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub notifier: Arc<MockNotifier>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let pub_key_pem = include_str!("keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            payment_key_secret: TEST_PAYMENT_SECRET.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
        };

        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let property_repo = Arc::new(SqlitePropertyRepo::new(pool.clone()));
        let notifier = Arc::new(MockNotifier::new());

        let booking_service = Arc::new(BookingService::new(
            booking_repo.clone(),
            property_repo.clone(),
            notifier.clone(),
            config.payment_key_secret.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            booking_repo,
            property_repo,
            notifier: notifier.clone(),
            booking_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            notifier,
        }
    }

    /// Mints an access token the way the external identity provider would.
    pub fn token_for(&self, user_id: &str, role: &str) -> String {
        let priv_key_pem = include_str!("keys/test_private.pem");
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        encode(
            &Header::new(Algorithm::EdDSA),
            &claims,
            &EncodingKey::from_ed_pem(priv_key_pem.as_bytes()).unwrap(),
        )
        .unwrap()
    }

    /// Seeds a property with one room category and returns their ids.
    pub async fn seed_property(&self, owner_id: &str) -> (String, String) {
        let property = Property::new(
            owner_id.to_string(),
            "Seaside Villa".to_string(),
            "Goa".to_string(),
        );
        let property = self.state.property_repo.create(&property).await.unwrap();

        let category = RoomCategory::new(property.id.clone(), "Deluxe Double".to_string(), 4);
        let category = self.state.property_repo.add_category(&category).await.unwrap();

        (property.id, category.id)
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
