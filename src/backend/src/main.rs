use actix_cors::Cors;
use actix_server::ServerHandle;
use actix_web::{
    App, HttpServer,
    web::{self, Data},
};
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::{debug, error, info, warn};
use smart_fan::{api::Api, config::AppConfig, controller_client::Esp32Client};
use std::io::Write;
use tokio::signal::unix::{SignalKind, signal};

type CoordinatorApi = Api<Esp32Client>;

#[actix_web::main]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    initialize()?;

    let mut sigterm =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;

    let controller_client = Esp32Client::new().context("failed to create controller client")?;
    info!("forwarding reports to {}", controller_client.endpoint());

    let (server_handle, server_task) = run_server(controller_client)?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            debug!("ctrl-c received");
        },
        _ = sigterm.recv() => {
            debug!("SIGTERM received");
        },
        result = server_task => {
            match result {
                Ok(Ok(())) => debug!("server stopped normally"),
                Ok(Err(e)) => error!("server stopped with error: {e}"),
                Err(e) => error!("server task panicked: {e}"),
            }
        },
    };

    info!("shutting down");
    server_handle.stop(true).await;
    info!("shutdown complete");

    Ok(())
}

fn initialize() -> Result<()> {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    builder.format(|f, record| match record.level() {
        log::Level::Error => {
            eprintln!("{}", record.args());
            Ok(())
        }
        _ => {
            writeln!(f, "{}", record.args())
        }
    });

    builder.target(Target::Stdout).init();

    info!(
        "module version: {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_SHORT_REV")
    );

    AppConfig::load().context("failed to load configuration")?;

    Ok(())
}

fn run_server(
    controller_client: Esp32Client,
) -> Result<(
    ServerHandle,
    tokio::task::JoinHandle<Result<(), std::io::Error>>,
)> {
    let config = AppConfig::get();
    let ui_port = config.ui.port;
    let dist_dir = config.ui.dist_dir.clone();
    let api = Data::new(CoordinatorApi::new(controller_client));

    if !dist_dir.is_dir() {
        warn!("ui directory {dist_dir:?} not found, serving api only");
    }

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allowed_methods(vec!["GET", "POST"])
                    .max_age(3600),
            )
            .app_data(api.clone())
            .route("/coordinates", web::get().to(CoordinatorApi::coordinates))
            .route("/reset", web::get().to(CoordinatorApi::reset))
            .route("/detections", web::post().to(CoordinatorApi::detections))
            .route("/version", web::get().to(CoordinatorApi::version));

        if dist_dir.is_dir() {
            app.service(actix_files::Files::new("/", &dist_dir).index_file("index.html"))
        } else {
            app
        }
    })
    .bind(("0.0.0.0", ui_port))
    .context("failed to bind server")?
    .disable_signals()
    .run();

    info!("listening on 0.0.0.0:{ui_port}");

    Ok((server.handle(), tokio::spawn(server)))
}
