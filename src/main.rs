//! Danmaku headless runner
//!
//! Loads settings and the stored high score, plays one autopilot session at
//! the fixed tick rate and records the result.
//!
//! Usage: `danmaku [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use danmaku::consts::*;
    use danmaku::sim::{GameState, GameStatus, autopilot, tick};
    use danmaku::{HighScoreStore, JsonFileStore, Settings, highscores};

    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("danmaku_settings.json"));
    let settings = Settings::load(&settings_path);

    let mut store = JsonFileStore::new(&settings.high_score_path);
    let best = store.load();

    let mut state = GameState::from_settings(&settings, best);
    state.reset_game(best);
    log::info!(
        "Danmaku starting: seed {}, {} difficulty, {} ticks",
        state.seed,
        state.difficulty.as_str(),
        settings.autopilot_ticks
    );

    let report_every = u64::from(TICKS_PER_SECOND) * 10;
    for _ in 0..settings.autopilot_ticks {
        let input = autopilot(&state);
        tick(&mut state, &input, TICK_MS);

        if state.time_ticks % report_every == 0 {
            log::info!(
                "t={}s stage {} score {} lives {} bombs {} power {} bullets {}",
                state.time_ticks / u64::from(TICKS_PER_SECOND),
                state.stage,
                state.player.score,
                state.player.lives,
                state.player.bombs,
                state.player.power,
                state.enemy_bullets.len()
            );
        }
        if state.status != GameStatus::Playing {
            break;
        }
    }

    let outcome = match state.status {
        GameStatus::Victory => "victory",
        GameStatus::GameOver => "game over",
        _ => "time up",
    };
    log::info!(
        "Session ended ({outcome}) at stage {} after {} ticks: score {}, graze {}",
        state.stage,
        state.time_ticks,
        state.player.score,
        state.player.graze
    );

    if highscores::record_final_score(&mut store, &state) {
        log::info!("New high score: {}", state.player.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on the web; the host page drives `tick`
}
