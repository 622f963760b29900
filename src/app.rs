use crate::{
    modules,
    types::{AppContext, AppEnvironment, Context},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors, trace};

/// Development accepts any origin; production only the app's own url.
fn allowed_origin(app: &AppContext) -> cors::AllowOrigin {
    match app.environment {
        AppEnvironment::Development => cors::AllowOrigin::any(),
        AppEnvironment::Production => match HeaderValue::from_str(app.url.trim_end_matches('/')) {
            Ok(origin) => cors::AllowOrigin::exact(origin),
            Err(err) => {
                tracing::error!("URL {} is not a valid origin: {}", app.url, err);
                cors::AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        },
    }
}

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        let router = Router::new()
            .nest("/api", modules::get_router())
            .with_state(ctx.clone())
            .layer(Extension(ctx.clone()))
            .layer(DefaultBodyLimit::max(1024 * 1024 * 10))
            .layer(trace::TraceLayer::new_for_http())
            .layer(
                cors::CorsLayer::new()
                    .allow_methods([
                        Method::OPTIONS,
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::PATCH,
                        Method::DELETE,
                    ])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                    .allow_origin(allowed_origin(&ctx.app)),
            );

        Self { ctx, router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let listener =
            TcpListener::bind(format!("{}:{}", self.ctx.app.host, self.ctx.app.port)).await?;

        tracing::info!(
            "App is running on {}:{}",
            self.ctx.app.host,
            self.ctx.app.port
        );

        axum::serve(listener, self.router).await
    }
}
