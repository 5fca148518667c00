use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::model::{Education, Experience, Message, Profile, Project, Skill};
use crate::server::AppState;
use crate::validation::{self, ValidationIssue};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Failure outcomes of the API handlers
#[derive(Debug)]
pub enum ApiError {
    /// Client input failed validation (400)
    Validation(ValidationIssue),
    /// Expected absence of a resource (404)
    NotFound(&'static str),
    /// Anything the store reports (500)
    Internal(crate::Error),
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(issue) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse { message: issue.message, field: Some(issue.field) },
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse { message: message.to_string(), field: None },
            ),
            ApiError::Internal(err) => {
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse { message: "Internal Server Error".to_string(), field: None },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

pub async fn get_profile(State(state): State<Arc<AppState>>) -> Result<Json<Profile>, ApiError> {
    state
        .store
        .profile()?
        .map(Json)
        .ok_or(ApiError::NotFound("Profile not found"))
}

pub async fn list_skills(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Skill>>, ApiError> {
    Ok(Json(state.store.skills()?))
}

pub async fn list_projects(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.store.projects()?))
}

pub async fn list_experience(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Experience>>, ApiError> {
    Ok(Json(state.store.experience()?))
}

pub async fn list_education(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Education>>, ApiError> {
    Ok(Json(state.store.education()?))
}

pub async fn create_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        ApiError::Validation(ValidationIssue::new("", rejection.body_text()))
    })?;

    let input = validation::validate_message(&body).map_err(|issue| {
        tracing::debug!("Rejected message: {}", issue);
        ApiError::Validation(issue)
    })?;

    let message = state.store.create_message(input)?;
    tracing::info!("Stored contact message {}", message.id);
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn api_not_found() -> ApiError {
    ApiError::NotFound("Not found")
}
