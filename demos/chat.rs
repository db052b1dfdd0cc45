//! Minimal terminal chat loop against the real services.
//!
//! Requires CAL_API_KEY and OPENAI_API_KEY (env or .env), plus
//! CALCHAT_USER_EMAIL and optionally CALCHAT_TIMEZONE.

use std::io::{BufRead, Write};

use calchat::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AssistantConfig::from_env()?;
    let orchestrator = ConversationOrchestrator::from_config(&config);

    let user_email = std::env::var("CALCHAT_USER_EMAIL")
        .map_err(|_| CalChatError::Configuration("CALCHAT_USER_EMAIL is not set".into()))?;
    let timezone =
        std::env::var("CALCHAT_TIMEZONE").unwrap_or_else(|_| "America/New_York".to_string());
    let mut session = Session::new(SessionConfig::new(user_email, timezone)?);

    println!("calchat — type a message, or 'quit' to exit");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }
        if utterance == "quit" {
            break;
        }

        let reply = orchestrator.handle_user_message(&mut session, utterance).await;
        println!("{reply}");
    }

    Ok(())
}
