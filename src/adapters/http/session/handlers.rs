//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, error_response};
use crate::application::handlers::schedule::{
    CloseSessionCommand, CloseSessionHandler, MaterializeSessionCommand,
    MaterializeSessionHandler, PublishSessionCommand, PublishSessionHandler, SessionQueryHandler,
    UpdateCapacityCommand, UpdateCapacityHandler,
};
use crate::domain::foundation::{SessionId, TrainerId};
use crate::domain::session::ScheduleError;

use super::dto::{
    CloseSessionRequest, MaterializeSessionRequest, PublishSessionRequest, SessionResponse,
    UpdateCapacityRequest,
};

/// Shared state for the session routes.
#[derive(Clone)]
pub struct SessionHandlers {
    publish_handler: Arc<PublishSessionHandler>,
    materialize_handler: Arc<MaterializeSessionHandler>,
    update_capacity_handler: Arc<UpdateCapacityHandler>,
    close_handler: Arc<CloseSessionHandler>,
    query_handler: Arc<SessionQueryHandler>,
}

impl SessionHandlers {
    pub fn new(
        publish_handler: Arc<PublishSessionHandler>,
        materialize_handler: Arc<MaterializeSessionHandler>,
        update_capacity_handler: Arc<UpdateCapacityHandler>,
        close_handler: Arc<CloseSessionHandler>,
        query_handler: Arc<SessionQueryHandler>,
    ) -> Self {
        Self {
            publish_handler,
            materialize_handler,
            update_capacity_handler,
            close_handler,
            query_handler,
        }
    }
}

/// POST /api/sessions - Publish an ad hoc session
pub async fn publish_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<PublishSessionRequest>,
) -> Response {
    let cmd = PublishSessionCommand {
        trainer_id: req.trainer_id,
        date: req.date,
        start_time: req.start_time,
        end_time: req.end_time,
        capacity: req.capacity,
    };

    match handlers.publish_handler.handle(cmd).await {
        Ok(session) => {
            (StatusCode::CREATED, Json(SessionResponse::from(session))).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// POST /api/sessions/materialize - Expand a template for a date
pub async fn materialize_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<MaterializeSessionRequest>,
) -> Response {
    let cmd = MaterializeSessionCommand {
        trainer_id: req.trainer_id,
        template_id: req.template_id,
        date: req.date,
    };

    match handlers.materialize_handler.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

/// GET /api/sessions/:id - Session details with remaining slots
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return bad_request("Invalid session ID");
    };

    match handlers.query_handler.get(&session_id).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

/// GET /api/sessions/trainer/:id - A trainer's open sessions
pub async fn list_by_trainer(
    State(handlers): State<SessionHandlers>,
    Path(trainer_id): Path<String>,
) -> Response {
    let Ok(trainer_id) = trainer_id.parse::<TrainerId>() else {
        return bad_request("Invalid trainer ID");
    };

    match handlers.query_handler.list_open_by_trainer(&trainer_id).await {
        Ok(sessions) => {
            let response: Vec<SessionResponse> = sessions.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// PATCH /api/sessions/:id/capacity - Change capacity
pub async fn update_capacity(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateCapacityRequest>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return bad_request("Invalid session ID");
    };

    let cmd = UpdateCapacityCommand {
        session_id,
        trainer_id: req.trainer_id,
        capacity: req.capacity,
    };

    match handlers.update_capacity_handler.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

/// POST /api/sessions/:id/close - Withdraw a session
pub async fn close_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<CloseSessionRequest>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return bad_request("Invalid session ID");
    };

    let cmd = CloseSessionCommand {
        session_id,
        trainer_id: req.trainer_id,
    };

    match handlers.close_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

fn handle_schedule_error(error: ScheduleError) -> Response {
    error_response(error.code(), error.to_string())
}
