//! HTTP handlers for availability template endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, error_response};
use crate::application::handlers::schedule::{
    CreateTemplateCommand, CreateTemplateHandler, DeleteTemplateCommand, DeleteTemplateHandler,
    UpdateTemplateCommand, UpdateTemplateHandler,
};
use crate::domain::availability::AvailabilityError;
use crate::domain::foundation::TemplateId;

use super::dto::{
    CreateTemplateRequest, DeleteTemplateRequest, TemplateResponse, UpdateTemplateRequest,
};

/// Shared state for the availability routes.
#[derive(Clone)]
pub struct AvailabilityHandlers {
    create_handler: Arc<CreateTemplateHandler>,
    update_handler: Arc<UpdateTemplateHandler>,
    delete_handler: Arc<DeleteTemplateHandler>,
}

impl AvailabilityHandlers {
    pub fn new(
        create_handler: Arc<CreateTemplateHandler>,
        update_handler: Arc<UpdateTemplateHandler>,
        delete_handler: Arc<DeleteTemplateHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            delete_handler,
        }
    }
}

/// POST /api/availability - Declare a weekly window
pub async fn create_template(
    State(handlers): State<AvailabilityHandlers>,
    Json(req): Json<CreateTemplateRequest>,
) -> Response {
    let cmd = CreateTemplateCommand {
        trainer_id: req.trainer_id,
        day_of_week: req.day_of_week,
        start_time: req.start_time,
        end_time: req.end_time,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(template) => {
            (StatusCode::CREATED, Json(TemplateResponse::from(template))).into_response()
        }
        Err(e) => handle_availability_error(e),
    }
}

/// PATCH /api/availability/:id - Move a weekly window
pub async fn update_template(
    State(handlers): State<AvailabilityHandlers>,
    Path(template_id): Path<String>,
    Json(req): Json<UpdateTemplateRequest>,
) -> Response {
    let Ok(template_id) = template_id.parse::<TemplateId>() else {
        return bad_request("Invalid template ID");
    };

    let cmd = UpdateTemplateCommand {
        template_id,
        trainer_id: req.trainer_id,
        day_of_week: req.day_of_week,
        start_time: req.start_time,
        end_time: req.end_time,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(template) => (StatusCode::OK, Json(TemplateResponse::from(template))).into_response(),
        Err(e) => handle_availability_error(e),
    }
}

/// DELETE /api/availability/:id - Remove a weekly window
pub async fn delete_template(
    State(handlers): State<AvailabilityHandlers>,
    Path(template_id): Path<String>,
    Json(req): Json<DeleteTemplateRequest>,
) -> Response {
    let Ok(template_id) = template_id.parse::<TemplateId>() else {
        return bad_request("Invalid template ID");
    };

    let cmd = DeleteTemplateCommand {
        template_id,
        trainer_id: req.trainer_id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_availability_error(e),
    }
}

fn handle_availability_error(error: AvailabilityError) -> Response {
    error_response(error.code(), error.to_string())
}
