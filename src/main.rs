#[macro_use]
extern crate diesel;

use actix_web::{middleware, App, HttpServer};
use std::sync::Arc;

mod admin;
mod appdata;
mod auth;
mod config;
mod db;
mod directory;
mod prelude;
mod utils;

use crate::directory::Directory;
use crate::prelude::*;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();

    env_logger::from_env(
            env_logger::Env::default().default_filter_or("actix_web=debug,subdesk=trace")
        )
        .init();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let directory: Arc<dyn Directory> = match &cfg.directory_url {
        Some(url) => match directory::http::Snapshot::fetch(url).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                log::error!("Could not fetch the site directory from {}: {}", url, e);
                std::process::exit(1);
            }
        },
        None => Arc::new(directory::FixedDirectory),
    };

    let bind_addr = format!("{}:{}", cfg.http_host, cfg.http_port);

    let data = match AppData::new(cfg, directory) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Could not open the database: {}", e);
            std::process::exit(1);
        }
    };

    // Start the HTTP server
    let server = HttpServer::new(move || {
            App::new()
                .data(data.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(auth::service())
                .service(admin::service())
                .default_service(actix_web::web::route().to(|req: actix_web::HttpRequest, body: actix_web::web::Bytes| async move {
                    #[cfg(debug_assertions)]
                    utils::dump_request_and_body(&req, &body);

                    actix_web::HttpResponse::NotFound()
                }))
        })
        .bind(&bind_addr)?;

    log::info!("Started http server: http://{}", bind_addr);

    server.run().await
}
