use member_registry::{
    adapters::{memory::InMemoryMemberStore, postgres::PostgresMemberStore},
    api::{handlers::AppState, router::create_router},
    application::member::MemberRegistry,
    config::Config,
    ports::MemberStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "member_registry=debug,tower_http=debug,axum=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    // Initialize the member store
    let store: Arc<dyn MemberStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Using PostgreSQL member store");

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
                .expect("Failed to connect to database");

            let store = PostgresMemberStore::new(pool);
            store.migrate().await.expect("Failed to run migrations");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory member store");
            Arc::new(InMemoryMemberStore::new())
        }
    };

    // Create application state
    let app_state = Arc::new(AppState {
        registry: MemberRegistry::new(store),
    });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
