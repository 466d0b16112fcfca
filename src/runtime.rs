//! Single-threaded driver: drain input, tick, report, render, wait.

use std::io;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::GameError;
use crate::food::RandomSource;
use crate::game::{Game, GameEvent};
use crate::input::GameInput;
use crate::scene::Scene;

/// Produces the commands received since the previous drain.
pub trait InputSource {
    fn drain(&mut self) -> io::Result<Vec<GameInput>>;
}

/// Consumes one draw-list per frame.
pub trait Renderer {
    fn draw(&mut self, scene: &Scene) -> io::Result<()>;
}

/// Receives the final score of every finished game.
pub trait Scoreboard {
    fn report_final_score(&mut self, score: u32);
}

/// Why the driver loop returned.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunEnd {
    /// The player quit.
    Quit,
    /// The game ended and the session is not configured to restart.
    GameOver { final_score: u32 },
}

/// Runs the session until the player quits or a non-restarting game ends.
///
/// Each iteration drains input, advances one tick, forwards game-over
/// scores, draws, then waits for the next tick boundary.
pub fn run<R, I, D, S, C>(
    game: &mut Game<R>,
    input: &mut I,
    renderer: &mut D,
    scoreboard: &mut S,
    clock: &mut C,
) -> Result<RunEnd, GameError>
where
    R: RandomSource,
    I: InputSource + ?Sized,
    D: Renderer + ?Sized,
    S: Scoreboard + ?Sized,
    C: Clock + ?Sized,
{
    let interval = game.config().tick_interval();
    renderer.draw(&game.scene())?;

    loop {
        for command in input.drain()? {
            game.apply_input(command)?;
            if command == GameInput::Quit {
                info!(score = game.state().score, "quit requested");
                forward_events(game, scoreboard);
                return Ok(RunEnd::Quit);
            }
        }

        game.tick(clock.now())?;
        forward_events(game, scoreboard);

        renderer.draw(&game.scene())?;

        if game.is_finished() {
            return Ok(RunEnd::GameOver {
                final_score: game.state().score,
            });
        }

        clock.sleep_until_next_tick(interval);
    }
}

/// Drains recorded events, handing final scores to the scoreboard.
fn forward_events<R, S>(game: &mut Game<R>, scoreboard: &mut S)
where
    R: RandomSource,
    S: Scoreboard + ?Sized,
{
    for event in game.drain_events() {
        debug!(?event, "game event");
        if let GameEvent::GameOver { final_score, .. } = event {
            scoreboard.report_final_score(final_score);
        }
    }
}
