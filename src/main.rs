use std::future::IntoFuture;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authsvc::{config::Config, grpc::GrpcAuth, routes::app_router, state::AppState};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authsvc=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env();
    let state = Arc::new(AppState::new(&cfg).await.expect("init state"));

    let app = app_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&cfg.http_addr).await.expect("bind http");
    let http = axum::serve(listener, app).into_future();

    let grpc_addr = cfg.grpc_addr.parse().expect("parse grpc addr");
    let grpc = tonic::transport::Server::builder()
        .add_service(GrpcAuth::new(state).into_server())
        .serve(grpc_addr);

    tracing::info!(http = %cfg.http_addr, grpc = %cfg.grpc_addr, "listening");

    tokio::select! {
        res = http => {
            if let Err(e) = res {
                tracing::error!("http server: {e}");
            }
        }
        res = grpc => {
            if let Err(e) = res {
                tracing::error!("grpc server: {e}");
            }
        }
    }
}
