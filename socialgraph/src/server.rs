//! HTTP server
//!
//! `POST /` executes GraphQL requests, `GET /` serves GraphiQL and
//! `GET /health` pings the database.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use sea_orm::{Database, DatabaseConnection};
use socialgraph_migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::graphql::{AppSchema, build_schema};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub schema: AppSchema,
    pub db: DatabaseConnection,
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let response = state.schema.execute(req.into_inner()).await;
    if response.is_err() {
        tracing::debug!(errors = ?response.errors, "graphql request returned errors");
    }
    response.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Connect, migrate, and serve until Ctrl-C
pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(config.connect_options()).await?;
    tracing::info!("Database connected!");

    if config.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        tracing::info!("Running migrations...");
        Migrator::up(&db, None).await?;
        tracing::info!("Migrations applied!");
    }

    let schema = build_schema(db.clone(), config.limits());
    let app = router(AppState { schema, db });

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!("GraphQL server listening on http://{}", config.listen);
    tracing::info!(max_depth = config.max_depth, "query depth limit");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
