//! Closer - Main entry point.
//!
//! A line-oriented driver for the turn orchestrator. Reads one command per
//! line from stdin and prints what the players should see.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use closer_domain::{Category, Player};
use closer_engine::use_cases::{
    IgnoreReason, RequestOutcome, TurnError, TurnOrchestrator, TurnPhase,
};
use closer_engine::App;

const HELP: &str = "\
Commands:
  romantic | couple | friendship   choose a category
  a | b                            request a question for player A or B
  ok                               done with the current question, pass the turn
  reset                            new round, same category
  full-reset                       forget everything
  status                           show the session
  check                            test the connection to the question service
  help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (falls back to the working directory).
    load_dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "closer_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Closer");

    let app = App::from_env();
    print_status(&app.turns);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim().to_lowercase();
        if command.is_empty() {
            continue;
        }

        match command.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "status" => print_status(&app.turns),
            "check" => {
                if app.turns.check_availability().await {
                    println!("Question service is reachable.");
                } else {
                    println!("Question service is not reachable. Check CLOSER_API_TOKEN and your connection.");
                }
            }
            "reset" => {
                app.turns.reset_round();
                print_status(&app.turns);
            }
            "full-reset" => {
                app.turns.full_reset();
                print_status(&app.turns);
            }
            "ok" => match app.turns.acknowledge_question() {
                Ok(()) => print_status(&app.turns),
                Err(e) => println!("{e}"),
            },
            "a" | "b" => {
                let player: Player = match command.parse() {
                    Ok(player) => player,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                if app.turns.phase() == TurnPhase::AwaitingTurn {
                    println!("Thinking of a question for player {player}...");
                }
                match app.turns.request_question(player).await {
                    Ok(RequestOutcome::Displayed(question)) => {
                        println!();
                        println!("  {}", question.content);
                        println!();
                        println!("(type `ok` when you have answered)");
                    }
                    Ok(RequestOutcome::Ignored(IgnoreReason::NotYourTurn { active, .. })) => {
                        println!("It is player {active}'s turn.");
                    }
                    Ok(RequestOutcome::Ignored(IgnoreReason::WrongPhase(phase))) => {
                        println!("Can't ask for a question while {phase}.");
                    }
                    Ok(RequestOutcome::Ignored(IgnoreReason::Superseded)) => {
                        println!("The session was reset; that question was dropped.");
                    }
                    Err(TurnError::Generation { failure, .. }) => println!("{}", failure.message),
                    Err(e) => println!("{e}"),
                }
            }
            other => match other.parse::<Category>() {
                Ok(category) => match app.turns.select_category(category) {
                    Ok(()) => print_status(&app.turns),
                    Err(e) => println!("{e} (use `full-reset` to pick another category)"),
                },
                Err(_) => println!("Unknown command `{other}`. Type `help`."),
            },
        }
    }

    tracing::info!("Closer stopped");
    Ok(())
}

fn print_status(turns: &TurnOrchestrator) {
    let session = turns.session();
    match turns.theme() {
        Some(theme) => {
            println!("{} {} - {}", theme.icon, theme.title, theme.description);
            println!(
                "Player {}'s turn. {} question(s) asked this round.",
                session.active_player,
                session.history.len()
            );
        }
        None if session.is_first_session => {
            println!("Welcome! Pick a category to start: romantic or friendship.");
        }
        None => println!("Pick a category: romantic or friendship."),
    }
}

fn load_dotenv() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
