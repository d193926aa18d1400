use blockfall::Command;
use console::{Key, Term};
use tokio::task::JoinHandle;

/// What a key press asks the runner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Game(Command),
    Quit,
}

pub fn map_key_to_input(key: &Key) -> Option<Input> {
    let command = match key {
        Key::ArrowLeft => Command::MoveLeft,
        Key::ArrowRight => Command::MoveRight,
        Key::ArrowUp => Command::Rotate,
        Key::ArrowDown => Command::SoftDrop,
        Key::Char(' ') => Command::HardDrop,
        Key::Enter | Key::Char('s') | Key::Char('S') => Command::Start,
        Key::Char('p') | Key::Char('P') => Command::TogglePause,
        Key::Char('r') | Key::Char('R') => Command::Reset,
        Key::Char('+') | Key::Char('=') => Command::SpeedUp,
        Key::Char('-') | Key::Char('_') => Command::SpeedDown,
        // 1..9 pick a level directly, 0 is level 10
        Key::Char(c @ '0'..='9') => {
            let digit = c.to_digit(10).unwrap_or(0) as u8;
            Command::SetSpeed(if digit == 0 { 10 } else { digit })
        }
        Key::Char('q') | Key::Char('Q') | Key::Escape => return Some(Input::Quit),
        _ => return None,
    };
    Some(Input::Game(command))
}

/// Read keys on a blocking thread and forward them until quit or until the
/// receiver goes away
pub fn spawn_keyboard(sender: flume::Sender<Input>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let input_term = Term::stdout();
        loop {
            let key = match input_term.read_key() {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!("Keyboard read failed: {}", e);
                    let _ = sender.send(Input::Quit);
                    break;
                }
            };
            let Some(input) = map_key_to_input(&key) else {
                continue;
            };
            if sender.send(input).is_err() || input == Input::Quit {
                break;
            }
        }
    })
}
