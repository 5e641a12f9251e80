use std::net::SocketAddr;

use beacon_server::{ServerConfig, server};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Binds a full server on an ephemeral port. Cancelling the returned token
/// shuts it down, closing every connected client.
pub async fn spawn_server(allowed_origins: Vec<String>) -> (SocketAddr, CancellationToken) {
    let config = ServerConfig {
        addr: "127.0.0.1:0".parse().expect("loopback addr"),
        allowed_origins,
    };
    let shutdown = CancellationToken::new();
    let app = server::router(&config, shutdown.clone());

    let listener = TcpListener::bind(config.addr).await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let token = shutdown.clone();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
            .expect("server error");
    });

    (addr, shutdown)
}
