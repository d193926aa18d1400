mod input;
mod runner;
mod term_render;

use anyhow::Context;
use blockfall::{GameConfig, GameSession, PieceRule, SpeedLevel};
use clap::Parser;
use console::Term;
use term_render::{AnsiTermStyle, PlainTermStyle};

/// blockfall_term - falling-block puzzle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board columns
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Board rows
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Initial speed level (1-10)
    #[arg(short, long, default_value_t = 5, value_parser = parse_speed)]
    speed: u8,

    /// Seed for a reproducible piece sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Deal pieces from shuffled bags of all seven
    #[arg(long)]
    bag7: bool,

    /// ASCII drawing without colors
    #[arg(long)]
    plain: bool,

    /// Print the final game state as JSON on exit
    #[arg(long)]
    dump_state: bool,

    /// Maximum log level written to stderr
    #[arg(long, default_value_t = tracing::Level::WARN)]
    log_level: tracing::Level,
}

fn parse_speed(s: &str) -> Result<u8, String> {
    let level: u8 = s.parse().map_err(|e| format!("{}", e))?;
    SpeedLevel::try_from(level)
        .map(SpeedLevel::get)
        .map_err(|e| e.to_string())
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::new()
            .with_size(self.width, self.height)
            .with_speed(self.speed)
            .with_piece_rule(if self.bag7 {
                PieceRule::Bag7
            } else {
                PieceRule::Uniform
            });
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[tokio::main(flavor = "multi_thread", worker_threads = 1)]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Logs go to stderr so they never land inside the board
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .init();

    let session = GameSession::new(args.game_config()).context("Invalid game configuration")?;
    let config = session.config();
    tracing::info!(
        "Starting {}x{} game at speed {} ({:?} pieces)",
        config.width,
        config.height,
        session.speed(),
        config.piece_rule
    );

    let (sender, receiver) = flume::unbounded();
    // Exits by itself after a quit key or once the receiver is gone
    let _keyboard_task = input::spawn_keyboard(sender);

    // Rendering terminal, separate from the one reading keys
    let render_term = Term::stdout();
    render_term.clear_screen()?;
    render_term.hide_cursor()?;

    let result = if args.plain {
        runner::run(session, receiver, |snapshot| {
            term_render::draw(&render_term, snapshot, &PlainTermStyle)?;
            Ok(())
        })
        .await
    } else {
        runner::run(session, receiver, |snapshot| {
            term_render::draw(&render_term, snapshot, &AnsiTermStyle)?;
            Ok(())
        })
        .await
    };

    render_term.show_cursor()?;
    let session = match result {
        Ok(session) => session,
        Err(e) => {
            // The reader thread stays blocked in read_key and the runtime
            // waits for it on shutdown; its next send fails and it returns.
            eprintln!("Drawing failed, press any key to exit");
            return Err(e);
        }
    };

    println!(
        "Final score: {} ({} lines)",
        session.score(),
        session.lines_cleared()
    );
    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    }
    Ok(())
}
