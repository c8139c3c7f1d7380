//! Jarvis: a voice-driven personal assistant
//!
//! Listens (or reads typed text), matches the utterance against a fixed set
//! of keyword routes, and acts: tells the time, opens sites, plays videos,
//! reads encyclopedia summaries, tells jokes, or falls back to a web search.

mod assistant;
mod config;
mod input;

use action_providers::{default_providers, SystemClock};
use anyhow::Result;
use assistant::{Assistant, UtteranceSource};
use clap::Parser;
use command_router::CommandRouter;
use config::{Config, InputMode};
use input::{TypedInput, VoiceInput};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use voice_io::plugin::{new_audio_source, new_recognizer, new_speech_engine};
use voice_io::{Listener, Speak, Speaker};

const VOICE_FALLBACK_MESSAGE: &str = "Voice input isn't available. You can type commands instead.";

#[derive(Parser)]
#[command(name = "jarvis")]
#[command(about = "Voice-driven personal assistant")]
struct Args {
    /// JSON config file layered over the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Type commands instead of speaking them
    #[arg(long)]
    text: bool,

    /// Route a single command and exit
    #[arg(long)]
    command: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    // Must run while the process is still single-threaded
    let local = SystemClock::try_local();

    let args = Args::parse();
    setup_tracing(args.verbose);
    let clock = resolve_clock(local);

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_env();
    if args.text {
        config.input = InputMode::Text;
    }
    info!(input = ?config.input, name = %config.name, "starting assistant");

    let providers = default_providers(&config.providers, clock)?;
    let router = CommandRouter::new(config.router_config(), providers);
    let engine = new_speech_engine(config.tts_backend, config.tts.clone())?;
    let mut speaker = Speaker::new(config.name.clone(), engine);

    if let Some(command) = args.command {
        let flow = router.route(&mut speaker, &command)?;
        info!(?flow, "one-shot command done");
        return Ok(());
    }

    let interrupt = Arc::new(AtomicBool::new(false));
    let mut input = build_input(&config, &mut speaker, Arc::clone(&interrupt));
    let mut assistant = Assistant::new(config.name.clone(), speaker, router, Arc::clone(&interrupt));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = runtime.block_on(async move {
        let watcher = tokio::spawn(watch_interrupt(interrupt));
        let summary = tokio::task::spawn_blocking(move || assistant.run(input.as_mut())).await;
        watcher.abort();
        summary
    })?;

    info!(
        commands = summary.commands,
        errors = summary.errors,
        ended_by = ?summary.ended_by,
        "goodbye"
    );
    Ok(())
}

fn setup_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Falls back to UTC, logging why. Runs after tracing is installed so the
/// warning is not lost.
fn resolve_clock<E: std::fmt::Display>(local: Result<SystemClock, E>) -> SystemClock {
    local.unwrap_or_else(|e| {
        warn!(error = %e, "local UTC offset unavailable, using UTC");
        SystemClock::utc()
    })
}

/// First Ctrl-C asks the loop to stop; a second one exits immediately.
async fn watch_interrupt(flag: Arc<AtomicBool>) {
    loop {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            return;
        }
        if flag.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        info!("interrupt received");
    }
}

fn build_input(
    config: &Config,
    speaker: &mut dyn Speak,
    interrupt: Arc<AtomicBool>,
) -> Box<dyn UtteranceSource> {
    if config.input == InputMode::Voice {
        match voice_listener(config, Arc::clone(&interrupt)) {
            Ok(listener) => {
                return Box::new(VoiceInput::new(
                    listener,
                    config.listen.timeout(),
                    config.listen.phrase_limit(),
                    interrupt,
                ));
            }
            Err(e) => {
                warn!(error = %e, "voice input unavailable, reading typed commands");
                speaker.speak(VOICE_FALLBACK_MESSAGE);
            }
        }
    }
    Box::new(TypedInput::stdin(interrupt))
}

fn voice_listener(config: &Config, interrupt: Arc<AtomicBool>) -> voice_io::Result<Listener> {
    let source = new_audio_source(config.audio_backend, interrupt)?;
    let recognizer = new_recognizer(config.recognizer_backend, &config.recognizer)?;
    Ok(Listener::new(source, recognizer, config.listen.calibration()))
}
