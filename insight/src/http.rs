use std::net::SocketAddr;

use tracing::info;

use crate::api::router::ApiRoutes;
use crate::app_state::SharedAppState;

/// Bind the listener and serve the API on a background task. The returned
/// handle completes after a graceful shutdown.
pub async fn setup_http_server(
    app_state: SharedAppState,
    bind_address: &str,
) -> anyhow::Result<tokio::task::JoinHandle<anyhow::Result<()>>> {
    let app = ApiRoutes::create(app_state.clone());

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("API server listening on {}", bind_address);

    let stop_flag = app_state.stop_flag.clone();
    let handle = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown({
            let stop_flag = stop_flag.clone();
            async move {
                stop_flag.wait().await;
                info!("Stop flag was set, shutting down HTTP server gracefully");
            }
        })
        .await?;
        info!("HTTP server is down");
        Ok(())
    });

    Ok(handle)
}
