//! Shared fixtures for in-crate tests.

use axum::Router;

use crate::config::Config;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
}

pub fn test_config(upstream: impl Into<String>, api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        listings_api_url: upstream.into(),
        province: "ON".to_string(),
        results_per_page: 100,
        image_base_url: "https://cdn.test".to_string(),
        listing_link_base: "https://listing.test".to_string(),
        api_port: 0,
        log_level: "debug".to_string(),
    }
}
