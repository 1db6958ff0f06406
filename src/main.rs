//! Trainbook server binary.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trainbook::adapters::access::StubAccessChecker;
use trainbook::adapters::http::{
    self, AvailabilityHandlers, BookingHandlers, PaymentHandlers, SessionHandlers,
};
use trainbook::adapters::postgres::{
    PostgresAvailabilityRepository, PostgresPaymentLedger, PostgresReservationStore,
    PostgresSessionStore,
};
use trainbook::application::handlers::booking::{
    CancelReservationHandler, ClientLocks, ConfirmReservationHandler, CreateReservationHandler,
    ListReservationsHandler, UpdateReservationStatusHandler,
};
use trainbook::application::handlers::payment::RecordPaymentHandler;
use trainbook::application::handlers::schedule::{
    CloseSessionHandler, CreateTemplateHandler, DeleteTemplateHandler, MaterializeSessionHandler,
    PublishSessionHandler, SessionQueryHandler, UpdateCapacityHandler, UpdateTemplateHandler,
};
use trainbook::config::AppConfig;
use trainbook::ports::{
    AccessChecker, AvailabilityRepository, CapacityLedger, PaymentLedger, ReservationRepository,
    SessionRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Adapters
    let session_store = Arc::new(PostgresSessionStore::new(pool.clone()));
    let sessions: Arc<dyn SessionRepository> = session_store.clone();
    let ledger: Arc<dyn CapacityLedger> = session_store;
    let reservations: Arc<dyn ReservationRepository> =
        Arc::new(PostgresReservationStore::new(pool.clone()));
    let templates: Arc<dyn AvailabilityRepository> =
        Arc::new(PostgresAvailabilityRepository::new(pool.clone()));
    let payments: Arc<dyn PaymentLedger> = Arc::new(PostgresPaymentLedger::new(pool));
    let access_checker: Arc<dyn AccessChecker> = Arc::new(StubAccessChecker::new());

    // Booking handlers
    let create_reservation = Arc::new(CreateReservationHandler::new(
        Arc::clone(&reservations),
        Arc::clone(&sessions),
        Arc::clone(&ledger),
        Arc::clone(&access_checker),
        ClientLocks::new(),
        config.booking.default_reservation_status(),
    ));
    let confirm_reservation = Arc::new(ConfirmReservationHandler::new(Arc::clone(&reservations)));
    let cancel_reservation = Arc::new(CancelReservationHandler::new(
        Arc::clone(&reservations),
        Arc::clone(&ledger),
    ));
    let update_status = Arc::new(UpdateReservationStatusHandler::new(
        Arc::clone(&reservations),
        confirm_reservation,
        Arc::clone(&cancel_reservation),
    ));
    let list_reservations = Arc::new(ListReservationsHandler::new(Arc::clone(&reservations)));

    // Schedule handlers
    let create_template = Arc::new(CreateTemplateHandler::new(
        Arc::clone(&templates),
        Arc::clone(&access_checker),
    ));
    let update_template = Arc::new(UpdateTemplateHandler::new(Arc::clone(&templates)));
    let delete_template = Arc::new(DeleteTemplateHandler::new(Arc::clone(&templates)));
    let materialize = Arc::new(MaterializeSessionHandler::new(
        Arc::clone(&templates),
        Arc::clone(&sessions),
        Arc::clone(&access_checker),
        config.booking.default_session_capacity,
    ));
    let publish = Arc::new(PublishSessionHandler::new(
        Arc::clone(&sessions),
        Arc::clone(&access_checker),
        config.booking.default_session_capacity,
    ));
    let update_capacity = Arc::new(UpdateCapacityHandler::new(Arc::clone(&sessions)));
    let close_session = Arc::new(CloseSessionHandler::new(Arc::clone(&sessions)));
    let session_queries = Arc::new(SessionQueryHandler::new(Arc::clone(&sessions)));

    // Payment handlers
    let record_payment = Arc::new(RecordPaymentHandler::new(
        Arc::clone(&payments),
        Arc::clone(&reservations),
    ));

    let router = http::api_router(
        AvailabilityHandlers::new(create_template, update_template, delete_template),
        SessionHandlers::new(
            publish,
            materialize,
            update_capacity,
            close_session,
            session_queries,
        ),
        BookingHandlers::new(
            create_reservation,
            update_status,
            cancel_reservation,
            list_reservations,
        ),
        PaymentHandlers::new(record_payment),
    );

    let addr = config.server.socket_addr()?;
    info!(%addr, "trainbook listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
