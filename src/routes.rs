//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves the Leptos SSR app for every client route, the compiled WASM/CSS
//! bundle under `/pkg`, and a `/healthz` probe. All API traffic goes from the
//! browser straight to the course API, so the host has no API routes.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{HostConfig, HostError};

/// Build the full router and the address it should bind.
///
/// # Errors
///
/// Returns [`HostError::Leptos`] if the Leptos configuration cannot be loaded
/// (missing or malformed `[package.metadata.leptos]` section).
pub fn app(config: &HostConfig) -> Result<(Router, SocketAddr), HostError> {
    let conf = get_configuration(None).map_err(|e| HostError::Leptos(e.to_string()))?;
    let mut leptos_options = conf.leptos_options;
    config.apply(&mut leptos_options);
    let addr = leptos_options.site_addr;
    Ok((leptos_app(leptos_options), addr))
}

/// Leptos SSR routes plus static assets and the health probe.
pub fn leptos_app(leptos_options: LeptosOptions) -> Router {
    let routes = generate_route_list(client::app::App);
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options);

    Router::new()
        .route("/healthz", get(healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
