//! wayfarer - interactive terminal client for journey servers
//!
//! Connects to a journey server, prints what it says, and forwards typed
//! answers. Commands: `start <filter>` begins a journey, `quit` exits,
//! anything else answers the outstanding prompt.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer::{Interaction, Output, SessionConfig, SessionEvent, SessionHandle};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let address = std::env::var("WAYFARER_SERVER").unwrap_or_else(|_| "localhost:9876".to_string());
    let secure = std::env::var("WAYFARER_SECURE")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

    let config = SessionConfig { address, secure };
    tracing::info!(address = %config.address, secure = config.secure, "connecting");

    let session = SessionHandle::connect(config).await?;
    let mut updates = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Ok(update) = update else { break };
                match update {
                    SessionEvent::Connected { greeting } => {
                        println!("{greeting}");
                        println!("(type `start <filter>` to begin a journey)");
                    }
                    SessionEvent::InteractionAdded { interaction } => {
                        if let Interaction::Received(Output::KnowThat { message }) = interaction {
                            println!("{message}");
                        }
                    }
                    SessionEvent::PromptPending { prompt } => {
                        println!("{}? ({})", prompt.name, prompt.data_type.kind);
                    }
                    SessionEvent::JourneySealed { message } => {
                        println!("{message}");
                    }
                    SessionEvent::Closed => {
                        println!("connection closed");
                        break;
                    }
                    SessionEvent::Error { message } => {
                        eprintln!("error: {message}");
                    }
                }
            }
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" {
                    break;
                }
                if let Some(filter) = line.strip_prefix("start ") {
                    session.start_with(filter);
                } else {
                    session.answer(line);
                }
            }
        }
    }

    session.close();
    Ok(())
}
