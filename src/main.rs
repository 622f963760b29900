use khanadotcom_backend::{
    app::App,
    types::{Config, Context, ToContext},
};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_tracing();

    let ctx: Arc<Context> = Arc::new(Config::default().to_context().await);

    if let Err(err) = App::new(ctx).serve().await {
        tracing::error!("Server stopped unexpectedly: {}", err);
    }
}
