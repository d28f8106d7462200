use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use storage::Store;
use storage::alerts::LogAlertSink;
use storage::clock::SystemClock;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::matches::handlers::list_matches,
        features::matches::handlers::get_match,
        features::matches::handlers::create_match,
        features::matches::handlers::update_match,
        features::matches::handlers::delete_match,
        features::participants::handlers::list_participants,
        features::participants::handlers::enroll_participant,
        features::participants::handlers::withdraw_participant,
        features::teams::handlers::generate_teams,
        features::teams::handlers::get_teams,
        features::teams::handlers::delete_teams,
        features::reservations::handlers::create_reservation,
        features::reservations::handlers::get_reservation,
        features::reservations::handlers::update_reservation_status,
        features::reservations::handlers::cancel_reservation,
        features::reservations::handlers::evaluate_reservations,
        features::users::handlers::create_user,
        features::users::handlers::list_users,
        features::users::handlers::get_user,
        features::users::handlers::get_cart,
        features::users::handlers::replace_cart,
        features::users::handlers::total_spent,
    ),
    components(
        schemas(
            storage::dto::matches::CreateMatchRequest,
            storage::dto::matches::UpdateMatchRequest,
            storage::dto::matches::MatchResponse,
            storage::dto::participant::EnrollParticipantRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::team::TeamResponse,
            storage::dto::reservation::CheckoutRequest,
            storage::dto::reservation::UpdateReservationStatusRequest,
            storage::dto::reservation::ReservationLineResponse,
            storage::dto::reservation::ReservationResponse,
            storage::dto::reservation::TotalSpentResponse,
            storage::dto::cart::CartLineRequest,
            storage::dto::cart::ReplaceCartRequest,
            storage::dto::cart::CartLineResponse,
            storage::dto::cart::CartResponse,
            storage::dto::user::CreateUserRequest,
            storage::dto::user::UserResponse,
            storage::models::MatchStatus,
            storage::models::PlayerPosition,
            storage::models::ReservationStatus,
        )
    ),
    tags(
        (name = "matches", description = "Match scheduling and capacity endpoints"),
        (name = "participants", description = "Enrollment and withdrawal endpoints"),
        (name = "teams", description = "Balanced team generation endpoints"),
        (name = "reservations", description = "Cart checkout and reservation lifecycle endpoints"),
        (name = "users", description = "User, cart and spending endpoints"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Pitchbook API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let state = AppState::new(
        Store::new(),
        Arc::new(LogAlertSink),
        Arc::new(SystemClock),
    );

    spawn_status_scan(state.clone(), config.status_scan_interval_secs);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let app = features::api_router()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically applies the automatic reservation status rules so that
/// imminent and completed matches move reservations forward even when no
/// request touches them.
fn spawn_status_scan(state: AppState, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            match storage::services::reservation_status::evaluate_all(&state.store, state.clock())
            {
                Ok(0) => {}
                Ok(updated) => tracing::info!("Automatic status scan updated {updated} reservations"),
                Err(err) => tracing::error!("Automatic status scan failed: {err}"),
            }
        }
    });
}
