use std::sync::Arc;

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use toxigraph::error::{Result, ToxigraphError};
use toxigraph::graph::Iri;
use toxigraph::server;
use toxigraph::transport::InMemoryService;

#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(default = "default_bind")]
    bind: String,
    #[serde(default = "default_base")]
    base: String,
    token: Option<String>,
}

fn default_bind() -> String {
    "127.0.0.1:8642".into()
}

fn default_base() -> String {
    "http://127.0.0.1:8642".into()
}

// layered: optional toxigraph.* file, then TOXIGRAPH_* environment
fn settings() -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name("toxigraph").required(false))
        .add_source(Environment::with_prefix("TOXIGRAPH"))
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let settings = settings()?;
    let base = Iri::parse(&settings.base).ok_or_else(|| {
        ToxigraphError::Config(format!("'{}' is not an absolute locator", settings.base))
    })?;
    let mut service = InMemoryService::new(base);
    if let Some(token) = settings.token {
        service = service.with_token(token);
    }
    let app = server::router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind(&settings.bind)
        .await
        .expect("bind loopback service");
    info!(bind = %settings.bind, "loopback service listening");
    axum::serve(listener, app).await.expect("serve loopback service");
    Ok(())
}
