use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::io;
use std::path::Path;

use notes_backend::config::Config;
use notes_backend::{AppState, controllers, open_repository};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Notes backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let notes = open_repository(&config).map_err(io::Error::other)?;

    let static_dir = config.static_dir.clone();
    let serve_static = Path::new(&static_dir).is_dir();
    if serve_static {
        log::info!("Serving static files from {}", static_dir);
    } else {
        log::warn!("Static directory {} not found, /static is disabled", static_dir);
    }

    let host = config.host.clone();
    let port = config.port;
    let state = web::Data::new(AppState::new(notes, config));

    log::info!("Listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config);

        if serve_static {
            app = app.service(Files::new("/static", static_dir.clone()));
        }

        app
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
