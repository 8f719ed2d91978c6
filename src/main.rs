use actix_web::{web, App, HttpServer};
use log::{error, info};

use bingod::config::Config;
use bingod::handlers::{bingo, validation};
use bingod::logging::init_logging;
use bingod::models::AppState;
use bingod::services::dispatcher::BingoEngine;
use bingod::services::word_loader::Lexicon;

fn fatal(message: String) -> std::io::Error {
    error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_args();
    init_logging(config.log_file.as_deref())?;

    info!("Loading word lists from {}", config.share_dir.display());
    let lexicon = Lexicon::load(&config.share_dir)
        .map_err(|e| fatal(format!("Cannot start without the word lists: {}", e)))?;
    let spoil_text = config.spoil_text().map_err(|e| fatal(e.to_string()))?;
    let seed = config.seed().map_err(|e| fatal(e.to_string()))?;
    info!("Seeded {} team records", seed.len());

    let state = AppState::new(BingoEngine::new(lexicon, spoil_text), seed);
    let shared_state = web::Data::new(state);

    info!("Listening on {}", config.listen_host);
    HttpServer::new(move || {
        App::new()
            .app_data(shared_state.clone())
            .service(bingo::submit)
            .service(bingo::view)
            .service(validation::validate_word)
    })
    .bind(&config.listen_host)?
    .run()
    .await
}
