//! End-to-end booking engine tests over the in-memory adapters.
//!
//! These exercise the full wiring - handlers, ports, capacity ledger -
//! the way the server binary assembles it.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use futures::future::join_all;

use trainbook::adapters::access::StubAccessChecker;
use trainbook::adapters::memory::{
    InMemoryAvailabilityRepository, InMemoryPaymentLedger, InMemoryReservationStore,
    InMemorySessionStore,
};
use trainbook::application::handlers::booking::{
    CancelReservationCommand, CancelReservationHandler, ClientLocks, ConfirmReservationCommand,
    ConfirmReservationHandler, CreateReservationCommand, CreateReservationHandler,
    UpdateReservationStatusCommand, UpdateReservationStatusHandler,
};
use trainbook::application::handlers::payment::{RecordPaymentCommand, RecordPaymentHandler};
use trainbook::application::handlers::schedule::{
    CreateTemplateCommand, CreateTemplateHandler, MaterializeSessionCommand,
    MaterializeSessionHandler, PublishSessionCommand, PublishSessionHandler,
};
use trainbook::domain::foundation::{ClientId, DayOfWeek, SessionId, TrainerId};
use trainbook::domain::payment::PaymentError;
use trainbook::domain::reservation::{BookingError, ReservationStatus};
use trainbook::domain::session::Session;
use trainbook::ports::{
    AccessChecker, AvailabilityRepository, CapacityLedger, PaymentLedger, ReservationRepository,
    SessionRepository,
};

const DEFAULT_CAPACITY: u32 = 8;

/// Full engine wired over in-memory adapters.
struct Engine {
    sessions: Arc<InMemorySessionStore>,
    create_reservation: Arc<CreateReservationHandler>,
    confirm_reservation: ConfirmReservationHandler,
    cancel_reservation: Arc<CancelReservationHandler>,
    update_status: UpdateReservationStatusHandler,
    create_template: CreateTemplateHandler,
    materialize: MaterializeSessionHandler,
    publish: PublishSessionHandler,
    record_payment: RecordPaymentHandler,
}

fn engine() -> Engine {
    let sessions = Arc::new(InMemorySessionStore::new());
    let reservations = Arc::new(InMemoryReservationStore::new(Arc::clone(&sessions)));
    let templates = Arc::new(InMemoryAvailabilityRepository::new());
    let payments = Arc::new(InMemoryPaymentLedger::new());
    let access: Arc<dyn AccessChecker> = Arc::new(StubAccessChecker::new());

    let reservations_port: Arc<dyn ReservationRepository> = Arc::clone(&reservations) as _;
    let sessions_port: Arc<dyn SessionRepository> = Arc::clone(&sessions) as _;
    let ledger: Arc<dyn CapacityLedger> = Arc::clone(&sessions) as _;
    let templates_port: Arc<dyn AvailabilityRepository> = Arc::clone(&templates) as _;
    let payments_port: Arc<dyn PaymentLedger> = Arc::clone(&payments) as _;

    let create_reservation = Arc::new(CreateReservationHandler::new(
        Arc::clone(&reservations_port),
        Arc::clone(&sessions_port),
        Arc::clone(&ledger),
        Arc::clone(&access),
        ClientLocks::new(),
        ReservationStatus::Pendiente,
    ));
    let confirm = Arc::new(ConfirmReservationHandler::new(Arc::clone(&reservations_port)));
    let cancel = Arc::new(CancelReservationHandler::new(
        Arc::clone(&reservations_port),
        Arc::clone(&ledger),
    ));

    Engine {
        sessions,
        create_reservation,
        confirm_reservation: ConfirmReservationHandler::new(Arc::clone(&reservations_port)),
        cancel_reservation: Arc::clone(&cancel),
        update_status: UpdateReservationStatusHandler::new(
            Arc::clone(&reservations_port),
            confirm,
            cancel,
        ),
        create_template: CreateTemplateHandler::new(
            Arc::clone(&templates_port),
            Arc::clone(&access),
        ),
        materialize: MaterializeSessionHandler::new(
            templates_port,
            Arc::clone(&sessions_port),
            Arc::clone(&access),
            DEFAULT_CAPACITY,
        ),
        publish: PublishSessionHandler::new(
            Arc::clone(&sessions_port),
            Arc::clone(&access),
            DEFAULT_CAPACITY,
        ),
        record_payment: RecordPaymentHandler::new(payments_port, reservations_port),
    }
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// 2024-01-15 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

async fn published(engine: &Engine, sh: u32, sm: u32, eh: u32, em: u32, capacity: u32) -> Session {
    engine
        .publish
        .handle(PublishSessionCommand {
            trainer_id: TrainerId::new(),
            date: monday(),
            start_time: t(sh, sm),
            end_time: t(eh, em),
            capacity: Some(capacity),
        })
        .await
        .unwrap()
}

fn booking(client_id: ClientId, session_id: SessionId) -> CreateReservationCommand {
    CreateReservationCommand {
        client_id,
        session_id,
        initial_status: None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Capacity invariant
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn concurrent_creates_never_exceed_capacity() {
    let engine = engine();
    let session = published(&engine, 10, 0, 11, 0, 3).await;

    // capacity + k concurrent requests from distinct clients
    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let handler = Arc::clone(&engine.create_reservation);
            let session_id = *session.id();
            tokio::spawn(
                async move { handler.handle(booking(ClientId::new(), session_id)).await },
            )
        })
        .collect();

    let outcomes: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let admitted = outcomes.iter().filter(|r| r.is_ok()).count();
    let rejected = outcomes
        .iter()
        .filter(|r| matches!(r, Err(BookingError::CapacityExceeded(_))))
        .count();

    assert_eq!(admitted, 3);
    assert_eq!(rejected, 7);
    assert_eq!(engine.sessions.confirmed_count(session.id()).await, Some(3));
}

// ════════════════════════════════════════════════════════════════════════════
// No self-overlap
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn client_cannot_hold_overlapping_windows() {
    let engine = engine();
    let ten_to_eleven = published(&engine, 10, 0, 11, 0, 5).await;
    let half_past = published(&engine, 10, 30, 11, 30, 5).await;
    let eleven_to_noon = published(&engine, 11, 0, 12, 0, 5).await;
    let client_id = ClientId::new();

    engine
        .create_reservation
        .handle(booking(client_id, *ten_to_eleven.id()))
        .await
        .unwrap();

    let overlap = engine
        .create_reservation
        .handle(booking(client_id, *half_past.id()))
        .await;
    assert!(matches!(overlap, Err(BookingError::ScheduleConflict { .. })));

    // touching endpoints do not conflict
    engine
        .create_reservation
        .handle(booking(client_id, *eleven_to_noon.id()))
        .await
        .unwrap();
}

#[tokio::test]
async fn overlap_rejection_does_not_consume_capacity() {
    let engine = engine();
    let first = published(&engine, 9, 0, 10, 0, 2).await;
    let second = published(&engine, 9, 30, 10, 30, 2).await;
    let client_id = ClientId::new();

    engine
        .create_reservation
        .handle(booking(client_id, *first.id()))
        .await
        .unwrap();
    let rejected = engine
        .create_reservation
        .handle(booking(client_id, *second.id()))
        .await;
    assert!(rejected.is_err());

    // a different client still fits into both units of the second slot
    assert_eq!(engine.sessions.confirmed_count(second.id()).await, Some(0));
    engine
        .create_reservation
        .handle(booking(ClientId::new(), *second.id()))
        .await
        .unwrap();
}

// ════════════════════════════════════════════════════════════════════════════
// Idempotent materialization
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn materialization_is_idempotent() {
    let engine = engine();
    let trainer_id = TrainerId::new();
    let template = engine
        .create_template
        .handle(CreateTemplateCommand {
            trainer_id,
            day_of_week: DayOfWeek::Mon,
            start_time: t(9, 0),
            end_time: t(10, 0),
        })
        .await
        .unwrap();

    let cmd = MaterializeSessionCommand {
        trainer_id,
        template_id: *template.id(),
        date: monday(),
    };
    let first = engine.materialize.handle(cmd.clone()).await.unwrap();
    let second = engine.materialize.handle(cmd).await.unwrap();

    assert_eq!(first.id(), second.id());
    assert_eq!(first.capacity(), DEFAULT_CAPACITY);
    assert_eq!(first.window(), template.window());
}

// ════════════════════════════════════════════════════════════════════════════
// Release correctness
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn cancelling_frees_exactly_one_unit_for_the_next_client() {
    let engine = engine();
    let session = published(&engine, 18, 0, 19, 0, 1).await;

    let held = engine
        .create_reservation
        .handle(booking(ClientId::new(), *session.id()))
        .await
        .unwrap();
    engine
        .confirm_reservation
        .handle(ConfirmReservationCommand {
            reservation_id: *held.id(),
        })
        .await
        .unwrap();

    // session full; another client bounces
    let bounced = engine
        .create_reservation
        .handle(booking(ClientId::new(), *session.id()))
        .await;
    assert!(matches!(bounced, Err(BookingError::CapacityExceeded(_))));

    // cancel, then the freed unit is bookable again
    let cancel_cmd = CancelReservationCommand {
        reservation_id: *held.id(),
    };
    engine.cancel_reservation.handle(cancel_cmd.clone()).await.unwrap();
    assert_eq!(engine.sessions.confirmed_count(session.id()).await, Some(0));

    // repeated cancel is a no-op, not a second release
    engine.cancel_reservation.handle(cancel_cmd).await.unwrap();
    assert_eq!(engine.sessions.confirmed_count(session.id()).await, Some(0));

    engine
        .create_reservation
        .handle(booking(ClientId::new(), *session.id()))
        .await
        .unwrap();
    assert_eq!(engine.sessions.confirmed_count(session.id()).await, Some(1));
}

#[tokio::test]
async fn concurrent_cancels_release_once() {
    let engine = engine();
    let session = published(&engine, 7, 0, 8, 0, 4).await;
    let held = engine
        .create_reservation
        .handle(booking(ClientId::new(), *session.id()))
        .await
        .unwrap();

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let handler = Arc::clone(&engine.cancel_reservation);
            let reservation_id = *held.id();
            tokio::spawn(async move {
                handler
                    .handle(CancelReservationCommand { reservation_id })
                    .await
            })
        })
        .collect();
    for joined in join_all(tasks).await {
        joined.unwrap().unwrap();
    }

    assert_eq!(engine.sessions.confirmed_count(session.id()).await, Some(0));
}

// ════════════════════════════════════════════════════════════════════════════
// Transition legality
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn illegal_transitions_are_rejected() {
    let engine = engine();
    let session = published(&engine, 12, 0, 13, 0, 5).await;
    let held = engine
        .create_reservation
        .handle(booking(ClientId::new(), *session.id()))
        .await
        .unwrap();

    engine
        .update_status
        .handle(UpdateReservationStatusCommand {
            reservation_id: *held.id(),
            status: ReservationStatus::Cancelada,
        })
        .await
        .unwrap();

    // CANCELADA -> PENDIENTE
    let back_to_pending = engine
        .update_status
        .handle(UpdateReservationStatusCommand {
            reservation_id: *held.id(),
            status: ReservationStatus::Pendiente,
        })
        .await;
    assert!(matches!(
        back_to_pending,
        Err(BookingError::InvalidTransition { .. })
    ));

    // CANCELADA -> CONFIRMADA
    let resurrect = engine
        .update_status
        .handle(UpdateReservationStatusCommand {
            reservation_id: *held.id(),
            status: ReservationStatus::Confirmada,
        })
        .await;
    assert!(matches!(
        resurrect,
        Err(BookingError::InvalidTransition { .. })
    ));

    // confirm twice
    let confirmed = engine
        .create_reservation
        .handle(CreateReservationCommand {
            client_id: ClientId::new(),
            session_id: *session.id(),
            initial_status: Some(ReservationStatus::Confirmada),
        })
        .await
        .unwrap();
    let reconfirm = engine
        .confirm_reservation
        .handle(ConfirmReservationCommand {
            reservation_id: *confirmed.id(),
        })
        .await;
    assert!(matches!(
        reconfirm,
        Err(BookingError::InvalidTransition { .. })
    ));
}

// ════════════════════════════════════════════════════════════════════════════
// Payment attachment
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn payments_attach_only_to_active_reservations() {
    let engine = engine();
    let session = published(&engine, 15, 0, 16, 0, 2).await;
    let held = engine
        .create_reservation
        .handle(booking(ClientId::new(), *session.id()))
        .await
        .unwrap();

    let payment = engine
        .record_payment
        .handle(RecordPaymentCommand {
            reservation_id: *held.id(),
            amount_cents: 4500,
            method: "card".into(),
            completed: true,
        })
        .await
        .unwrap();
    assert_eq!(payment.reservation_id(), held.id());

    engine
        .cancel_reservation
        .handle(CancelReservationCommand {
            reservation_id: *held.id(),
        })
        .await
        .unwrap();

    let refused = engine
        .record_payment
        .handle(RecordPaymentCommand {
            reservation_id: *held.id(),
            amount_cents: 4500,
            method: "card".into(),
            completed: false,
        })
        .await;
    assert!(matches!(refused, Err(PaymentError::NotPayable(_))));
}
