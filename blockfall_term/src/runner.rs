use std::time::Duration;

use blockfall::{GameSession, GameSnapshot};
use tokio::time::{Instant, MissedTickBehavior};

use crate::input::Input;

/// ~60 redraws per second
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Drive the session until quit.
///
/// Each frame feeds the real elapsed time to the session's gravity and
/// redraws through `draw`. Key commands are applied as they arrive. The
/// session is handed back so the caller can inspect the final state.
pub async fn run<F>(
    mut session: GameSession,
    commands: flume::Receiver<Input>,
    mut draw: F,
) -> anyhow::Result<GameSession>
where
    F: FnMut(&GameSnapshot) -> anyhow::Result<()>,
{
    let mut frame = tokio::time::interval(FRAME_INTERVAL);
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    loop {
        tokio::select! {
            _ = frame.tick() => {
                let now = Instant::now();
                let ticks = session.advance(now - last_frame);
                last_frame = now;
                if ticks > 1 {
                    tracing::debug!("Frame ran {} gravity ticks", ticks);
                }
                draw(&session.snapshot())?;
            }
            input = commands.recv_async() => {
                match input {
                    Ok(Input::Game(command)) => {
                        let result = session.apply(command);
                        tracing::trace!("{:?} -> {:?}", command, result);
                    }
                    Ok(Input::Quit) => {
                        tracing::info!("Quit requested");
                        break;
                    }
                    Err(_) => {
                        tracing::info!("Keyboard channel closed");
                        break;
                    }
                }
            }
        }
    }

    Ok(session)
}
