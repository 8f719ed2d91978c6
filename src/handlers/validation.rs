use actix_web::{get, web, HttpResponse, Responder};
use log::info;

use crate::models::AppState;
use crate::utils::clear_word;

fn validate_word_logic(data: &web::Data<AppState>, raw: &str) -> HttpResponse {
    let word = clear_word(raw);

    if data.engine.lexicon().is_word(&word) {
        info!("Valid word queried: {}", word);
        HttpResponse::Ok().finish()
    } else {
        info!("Invalid word queried: {}", word);
        HttpResponse::NotFound().finish()
    }
}

/// Dictionary pre-check for the guess box: 200 if the word could be guessed
#[get("/validate/{word}")]
pub async fn validate_word(data: web::Data<AppState>, word: web::Path<String>) -> impl Responder {
    validate_word_logic(&data, &word.into_inner())
}
