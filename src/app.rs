use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{self, dto::MessageResponse};
use crate::rate_limit::{bucket, ClientIpKeyExtractor};
use crate::state::AppState;

pub fn build_app(state: AppState) -> anyhow::Result<Router> {
    let limits = &state.config.rate_limit;
    let window = Duration::from_secs(limits.window_secs);
    let key = ClientIpKeyExtractor::new(state.config.trust_proxy);
    let limiter = |max_requests: usize| -> anyhow::Result<_> {
        let (replenish_ms, burst) = bucket(max_requests, window);
        let config = GovernorConfigBuilder::default()
            .key_extractor(key)
            .per_millisecond(replenish_ms)
            .burst_size(burst)
            .finish()
            .context("invalid rate limiter configuration")?;
        Ok(Arc::new(config))
    };
    let global = limiter(limits.max_requests)?;
    let login = limiter(limits.login_max_requests)?;

    let app = Router::new()
        .merge(auth::router())
        .merge(
            auth::handlers::login_routes()
                .route_layer(GovernorLayer { config: login }),
        )
        .route("/health", get(|| async { Json(MessageResponse::new("ok")) }))
        .layer(GovernorLayer { config: global })
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "response");
                        } else {
                            tracing::info!(%status, ?latency, "response");
                        }
                    },
                ),
        );
    Ok(app)
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
