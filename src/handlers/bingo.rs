use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{AppState, BingoRequest, BingoResponse, Mode, StateView};
use crate::services::dispatcher::UNKNOWN_ERROR;
use crate::services::game::GameState;

/// A 500 that still carries the last known balance and spoiler
fn internal_error(mode: Mode, last_known: &GameState) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(BingoResponse::new(mode, last_known).with_error(UNKNOWN_ERROR))
}

fn request_mode(body: &Value) -> Mode {
    BingoRequest::deserialize(body)
        .map(|request| request.mode())
        .unwrap_or(Mode::Unknown)
}

/// Play one move for `team`. The whole load -> dispatch -> save sequence
/// runs under the team store lock.
#[post("/bingo/{team}")]
pub async fn submit(
    data: web::Data<AppState>,
    team: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    let team = team.into_inner();
    // A body that is not JSON is handled like an unknown mode
    let body: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        warn!("Unparseable bingo body from {}: {}", team, e);
        Value::Null
    });

    let mode = request_mode(&body);

    let mut teams = data.teams.lock().await;
    let state = match data.engine.load_state(teams.get(&team).cloned()) {
        Ok(state) => state,
        Err(e) => {
            error!("Cannot load game state for {}: {}", team, e);
            return internal_error(mode, &data.engine.salvage_state(teams.get(&team)));
        }
    };

    info!("Bingo move from {}", team);
    let (next, response) = data.engine.dispatch(state.clone(), body, &mut rand::thread_rng());

    match serde_json::to_value(&next) {
        Ok(stored) => {
            teams.insert(team, stored);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            error!("Cannot store game state for {}: {}", team, e);
            internal_error(mode, &state)
        }
    }
}

/// Current progress for `team`, creating a fresh record on first access
#[get("/bingo/{team}")]
pub async fn view(data: web::Data<AppState>, team: web::Path<String>) -> impl Responder {
    let team = team.into_inner();

    let mut teams = data.teams.lock().await;
    let state = match data.engine.load_state(teams.get(&team).cloned()) {
        Ok(state) => state,
        Err(e) => {
            error!("Cannot load game state for {}: {}", team, e);
            return internal_error(Mode::Unknown, &data.engine.salvage_state(teams.get(&team)));
        }
    };

    match serde_json::to_value(&state) {
        Ok(stored) => {
            teams.insert(team, stored);
            HttpResponse::Ok().json(StateView::from(&state))
        }
        Err(e) => {
            error!("Cannot store game state for {}: {}", team, e);
            internal_error(Mode::Unknown, &state)
        }
    }
}
