//! Winnow assistant binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the chat client, speech channels and session controller
//! 4. Drive the controller from a line-oriented REPL on stdin

mod cli;
mod commands;

use std::future::Future;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use winnow_assistant::controller::FAILURE_MARKER;
use winnow_assistant::{
    AssistantController, AssistantError, AssistantSettings, ExchangeOutcome, HttpChatClient,
    MicState, SpeechUpdate,
};
use winnow_core::config::WinnowConfig;
use winnow_core::events::{AssistantEvent, NotificationLevel};
use winnow_speech::{
    CommandSynthesizer, SpeechInputSession, SpeechOutputChannel, SpeechSynthesizer, VoiceParams,
};

use cli::CliArgs;
use commands::{Command, HELP};

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn print_outcome(outcome: &ExchangeOutcome) {
    match outcome {
        ExchangeOutcome::Replied { reply, .. } => println!("assistant> {}", reply),
        ExchangeOutcome::Failed { diagnostic, .. } => {
            println!("assistant> {} {}", FAILURE_MARKER, diagnostic)
        }
    }
}

fn report(err: &AssistantError) {
    match err {
        AssistantError::EmptyInput => println!("Type something or use mic"),
        AssistantError::AlreadyInFlight => println!("Still waiting for the previous reply"),
        // Already announced through a notification event.
        AssistantError::UnsupportedCapability(_) | AssistantError::Speech(_) => {}
        other => println!("error: {}", other),
    }
}

fn print_event(event: &AssistantEvent) {
    match event {
        AssistantEvent::Notification { level, message, .. } => match level {
            NotificationLevel::Error => println!("! {}", message),
            NotificationLevel::Info => println!("i {}", message),
        },
        other => tracing::trace!(event_type = other.event_type(), "Assistant event"),
    }
}

fn print_speech_update(update: &SpeechUpdate) {
    match update {
        SpeechUpdate::Transcript(text) => println!("mic> {}", text),
        SpeechUpdate::Ended { transcript } if transcript.trim().is_empty() => {
            println!("Mic off, nothing heard")
        }
        SpeechUpdate::Ended { transcript } => {
            println!("Mic off. Staged: \"{}\" (/send to ask, /edit to change)", transcript)
        }
        SpeechUpdate::Failed { .. } => {}
    }
}

async fn run_command(controller: &AssistantController, command: Command) -> Flow {
    match command {
        Command::Nothing => {}
        Command::Submit(text) => match controller.submit(&text).await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => report(&e),
        },
        Command::SendStaged => match controller.submit_staged().await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => report(&e),
        },
        Command::QuickPrompt(index) => {
            if let Some(prompt) = controller.quick_prompts().get(index) {
                println!("you> {}", prompt);
            }
            match controller.submit_quick_prompt(index).await {
                Ok(outcome) => print_outcome(&outcome),
                Err(e) => report(&e),
            }
        }
        Command::EditStaged(text) => {
            controller.set_staging(&text);
            println!("Staged: \"{}\"", controller.staging());
        }
        Command::ToggleMic => match controller.toggle_mic() {
            Ok(MicState::On) => println!("Listening in {}... (/mic to stop)", controller.language()),
            Ok(MicState::Off) => println!("Mic off"),
            Err(e) => report(&e),
        },
        Command::SetLanguage(code) => match controller.set_language(&code) {
            Ok(()) => println!("Language: {}", code),
            Err(e) => report(&e),
        },
        Command::ListLanguages => {
            let current = controller.language();
            for language in controller.languages() {
                let marker = if language.code == current { '*' } else { ' ' };
                println!("{} {:<6} {}", marker, language.code, language.display_name);
            }
        }
        Command::Mute => {
            controller.set_muted(true);
            println!("Spoken replies off");
        }
        Command::Unmute => {
            controller.set_muted(false);
            println!("Spoken replies on");
        }
        Command::ListQuickPrompts => {
            for (i, prompt) in controller.quick_prompts().iter().enumerate() {
                println!("{}. {}", i + 1, prompt);
            }
        }
        Command::ShowLog => {
            println!("{}", controller.greeting());
            for turn in controller.snapshot() {
                println!("[{}] {}", turn.role, turn.text);
            }
        }
        Command::ShowStatus => println!(
            "status={} language={} muted={} staged=\"{}\"",
            controller.status(),
            controller.language(),
            controller.is_muted(),
            controller.staging()
        ),
        Command::Help => println!("{}", HELP),
        Command::Invalid(hint) => println!("{}", hint),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Run `command` unless `interrupt` fires first.
///
/// Dropping an in-flight submission closes its exchange as cancelled.
async fn interruptible<C, I>(command: C, interrupt: I) -> Flow
where
    C: Future<Output = Flow>,
    I: Future,
{
    tokio::select! {
        flow = command => flow,
        _ = interrupt => {
            tracing::info!("Interrupted");
            Flow::Quit
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = WinnowConfig::load_or_default(&config_file);
    args.apply(&mut config);

    // Tracing. Logs go to stderr so they stay out of the conversation.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Winnow assistant v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Chat backend.
    let client = HttpChatClient::new(&config.backend)?;
    tracing::info!(endpoint = client.endpoint(), authenticated = client.has_token(), "Chat backend configured");

    // Speech. No recognizer is available on a terminal.
    let input = SpeechInputSession::unsupported();
    let synthesizer = CommandSynthesizer::from_config(&config.speech)
        .map(|s| Arc::new(s) as Arc<dyn SpeechSynthesizer>);
    if synthesizer.is_none() {
        tracing::info!("No synthesis command configured, replies will not be spoken");
    }
    let output = SpeechOutputChannel::new(synthesizer, VoiceParams::from(&config.speech));

    let controller = AssistantController::new(
        AssistantSettings::from_config(&config),
        Arc::new(client),
        input,
        output,
    )?;

    let mut events = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", controller.greeting());
    println!("Type /help for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = run_command(&controller, Command::parse(&line));
                if let Flow::Quit = interruptible(command, tokio::signal::ctrl_c()).await {
                    break;
                }
            }
            update = controller.next_speech_update() => print_speech_update(&update),
            event = events.recv() => match event {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Assistant events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!(turns = controller.snapshot().len(), "Winnow assistant stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_interrupt_ends_a_stalled_command() {
        let flow = interruptible(std::future::pending::<Flow>(), async {}).await;
        assert_eq!(flow, Flow::Quit);
    }

    #[tokio::test]
    async fn test_finished_command_is_not_interrupted() {
        let flow = interruptible(async { Flow::Continue }, std::future::pending::<()>()).await;
        assert_eq!(flow, Flow::Continue);
    }
}
