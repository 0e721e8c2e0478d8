use axum::{routing::get, Router};
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve `app` on a random local port and return its base URL
pub async fn snapshot_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Route that answers far later than any test timeout
pub fn slow_route(path: &str) -> Router {
    Router::new().route(
        path,
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            "{}"
        }),
    )
}
