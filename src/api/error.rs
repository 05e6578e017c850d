use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::{management::WorkflowError, spotify::SpotifyError};

use super::views;

/// Everything a web handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("{0}")]
    Login(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Spotify(#[from] SpotifyError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/").into_response(),
            AppError::Login(message) => {
                log::warn!("login failed: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    Html(views::message_page("Login failed", &message)),
                )
                    .into_response()
            }
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Html(views::message_page("Not found", &message)),
            )
                .into_response(),
            AppError::Workflow(WorkflowError::Shuffle(e)) => {
                log::error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::message_page("Something went wrong", &e.to_string())),
                )
                    .into_response()
            }
            AppError::Spotify(e) | AppError::Workflow(WorkflowError::Spotify(e))
                if e.is_unauthorized() =>
            {
                // token revoked on Spotify's side
                log::warn!("{}", e);
                Redirect::to("/logout").into_response()
            }
            AppError::Spotify(e) | AppError::Workflow(WorkflowError::Spotify(e)) => {
                log::error!("{}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Html(views::message_page("Spotify request failed", &e.to_string())),
                )
                    .into_response()
            }
        }
    }
}
