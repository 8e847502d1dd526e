//! Terminal walkthrough of the verification screen
//!
//! ```text
//! cargo run -p otp_infra --example verify_demo -- user@example.com
//! ```
//!
//! Type a 6-digit code to verify it, `resend` to request a new one, or
//! `quit` to leave.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use otp_core::{Navigator, NoFocus};
use otp_infra::{build_flow, init_tracing, load_config};
use tokio::io::{AsyncBufReadExt, BufReader};

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, destination: &str) {
        println!("-> navigating to {}", destination);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();
    init_tracing(&config.logging).context("initialising tracing")?;

    let flow = build_flow(&config, Arc::new(TerminalNavigator), Arc::new(NoFocus))
        .await
        .context("building verification flow")?;

    let handoff = std::env::args().nth(1);
    match flow.activate(handoff.as_deref()).await {
        Some(identity) => println!("Verifying {}", identity.email),
        None => {
            let notice = flow.snapshot().inline_notice.unwrap_or_default();
            println!("{}", notice);
            return Ok(());
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "quit" => break,
            "resend" => match flow.resend().await {
                Ok(outcome) => println!("resend: {:?}", outcome),
                Err(e) => println!("resend refused: {}", e),
            },
            code => {
                if !flow.paste(code)? {
                    println!("enter exactly 6 digits");
                    continue;
                }
                match flow.submit().await {
                    Ok(state) if state.is_succeeded() => {
                        println!("verified");
                        let settle = config.verification.timing.redirect_delay() + Duration::from_millis(100);
                        tokio::time::sleep(settle).await;
                        break;
                    }
                    Ok(state) => println!("{}", state.failure_message().unwrap_or("failed")),
                    Err(e) => println!("not sent: {}", e),
                }
            }
        }

        if let Some(alert) = flow.alert() {
            println!("[{:?}] {}", alert.kind, alert.message);
        }
    }

    flow.teardown();
    Ok(())
}
