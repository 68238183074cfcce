//! Minimal server showing the middleware in action.
//!
//! Run it, then visit `/?ref=abc` once; later plain requests to `/` still
//! see the referral code.

use std::collections::HashMap;

use axum::{Extension, Router, middleware, routing::get};
use param_to_cookie::{
    ParamToCookie, TrackedParamConfig, TrackedValues, param_to_cookie_middleware,
};

async fn index(Extension(values): Extension<TrackedValues>) -> String {
    match values.get("ref") {
        Some(code) => format!("referral code: {code}\n"),
        None => "no referral code yet; try /?ref=abc\n".to_string(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let state = ParamToCookie::new(HashMap::from([(
        "ref".to_string(),
        TrackedParamConfig::default(),
    )]));

    let app = Router::new()
        .route("/", get(index))
        .layer(middleware::from_fn_with_state(
            state,
            param_to_cookie_middleware,
        ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();
    tracing::info!(address = %listener.local_addr().unwrap(), "demo server starting");
    axum::serve(listener, app).await.unwrap();
}
