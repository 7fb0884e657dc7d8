use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, ApiState};
use crate::error::Result;

pub async fn run(state: ApiState, port: u16) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(state))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Report API running at http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
