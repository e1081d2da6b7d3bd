// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP interface serving rendered carousels.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /api/lang-carousel/{username}` - Compact HTML-wrapped carousel
//! - `GET /api/lang-carousel/large/{username}` - Large standalone SVG
//! - `GET /api/lang-carousel/full/{username}` - Full-width standalone SVG
//!
//! Every request is computed from scratch; nothing is cached between calls
//! and no caching headers are emitted.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    carousel::render_carousel,
    config::{ServerSettings, ServiceSettings},
    error::Error,
    github::GitHubClient,
    icons::IconRegistry,
    profile::Profile,
};

/// Immutable state shared by all handlers.
#[derive(Clone, Debug,)]
pub struct AppState
{
    client:   GitHubClient,
    registry: Arc<IconRegistry,>,
}

impl AppState
{
    /// Creates state from an existing client and registry.
    pub fn new(client: GitHubClient, registry: IconRegistry,) -> Self
    {
        Self {
            client,
            registry: Arc::new(registry,),
        }
    }

    /// Builds the client and loads the registry described by `settings`.
    ///
    /// # Errors
    ///
    /// Propagates client construction and registry loading errors.
    pub fn from_settings(settings: &ServiceSettings,) -> Result<Self, Error,>
    {
        Ok(Self::new(settings.github_client()?, settings.icon_registry()?,),)
    }

    async fn respond(&self, username: &str, profile: Profile,) -> Response
    {
        match render_carousel(&self.client, &self.registry, username, profile,).await {
            Ok(rendered,) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, rendered.content_type,)],
                rendered.body,
            )
                .into_response(),
            Err(error,) => error.into_response(),
        }
    }
}

async fn health_check() -> &'static str
{
    "ok"
}

async fn compact_carousel(State(state,): State<AppState,>, Path(username,): Path<String,>,) -> Response
{
    state.respond(&username, Profile::Compact,).await
}

async fn large_carousel(State(state,): State<AppState,>, Path(username,): Path<String,>,) -> Response
{
    state.respond(&username, Profile::Large,).await
}

async fn full_width_carousel(
    State(state,): State<AppState,>,
    Path(username,): Path<String,>,
) -> Response
{
    state.respond(&username, Profile::FullWidth,).await
}

/// Creates the router with all endpoints.
pub fn create_router(state: AppState,) -> Router
{
    Router::new()
        .route("/health", get(health_check,),)
        .route("/api/lang-carousel/{username}", get(compact_carousel,),)
        .route("/api/lang-carousel/large/{username}", get(large_carousel,),)
        .route("/api/lang-carousel/full/{username}", get(full_width_carousel,),)
        .layer(TraceLayer::new_for_http(),)
        .with_state(state,)
}

/// Binds the listener described by `settings` and serves until the process
/// exits.
///
/// # Errors
///
/// Returns [`Error::Server`] if the listener cannot bind or serving fails,
/// and propagates state construction errors.
pub async fn run_server(settings: ServerSettings,) -> Result<(), Error,>
{
    let state = AppState::from_settings(&settings.service,)?;
    let app = create_router(state,);
    let addr = settings.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr,).await.map_err(|source| Error::Server {
        source,
    },)?;

    info!(
        %addr,
        authenticated = settings.service.is_authenticated(),
        "starting language carousel server"
    );

    axum::serve(listener, app,).await.map_err(|source| Error::Server {
        source,
    },)
}
