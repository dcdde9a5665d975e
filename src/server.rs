//! Long-running HTTP server publishing the filtered calendar.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use ics_filter_core::{Feed, IcsFilterError};
use tracing::{error, info};

/// Any failure to produce a calendar is answered with a bare 500.
pub struct AppError(IcsFilterError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "no calendar available to serve");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl From<IcsFilterError> for AppError {
    fn from(err: IcsFilterError) -> Self {
        Self(err)
    }
}

/// GET on any path returns the filtered calendar; other methods get 405.
pub fn router(feed: Arc<Feed>) -> Router {
    Router::new()
        .route("/", get(filtered_calendar))
        .route("/{*path}", get(filtered_calendar))
        .with_state(feed)
}

async fn filtered_calendar(State(feed): State<Arc<Feed>>) -> Result<Response, AppError> {
    let body = feed.render().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar".to_string()),
            (header::CONTENT_LENGTH, body.len().to_string()),
        ],
        body,
    )
        .into_response())
}

pub async fn serve(feed: Arc<Feed>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "serving filtered calendar");
    println!("serving at {}", addr);

    axum::serve(listener, router(feed)).await?;

    Ok(())
}
