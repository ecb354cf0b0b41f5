use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post},
    serve, Form, Json, Router,
};
use log::info;
use tokio::net::TcpListener;

use crate::slack::{
    handler::{handle_slack_request, PlaneSlackHandler, PlaneSlackRequest},
    message::SlackSendMessage,
};

use super::{
    server_environment::ServerEnvironment,
    signature::{check_slack_signature_middleware, SlackSigningSecret},
};

/// Runs this tool as an http server using the specified `ServerEnvironment`.
pub async fn run_http_server(environment: Arc<ServerEnvironment>) -> anyhow::Result<()> {
    let server = plane_server(
        environment.ticket_handler(),
        environment.slack_messenger(),
        environment.signing_secret().clone(),
    );
    let listener = TcpListener::bind(environment.address()).await?;
    info!("Listening for slack requests on {}.", environment.address());
    Ok(serve(listener, server).await?)
}

fn plane_server(
    handler: Arc<impl PlaneSlackHandler + Send + Sync>,
    messenger: Arc<impl SlackSendMessage + Send + Sync + 'static>,
    secret: SlackSigningSecret,
) -> Router<()> {
    let signature_verification =
        from_fn(move |req, next| check_slack_signature_middleware(req, next, secret.clone()));
    Router::new()
        .route(
            "/slack",
            post(move |body| post_slack_request(body, handler, messenger)),
        )
        .route_layer(signature_verification)
        .route("/health", get(|| async { StatusCode::NO_CONTENT }))
}

async fn post_slack_request(
    Form(request): Form<PlaneSlackRequest>,
    slack_handler: Arc<impl PlaneSlackHandler + Send + Sync>,
    messenger: Arc<impl SlackSendMessage + Send + Sync + 'static>,
) -> impl IntoResponse {
    Json(handle_slack_request(slack_handler, request, messenger).await)
}
