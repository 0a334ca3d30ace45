pub mod audio;
pub mod cli;
pub mod config;
pub mod coord;
pub mod events;
pub mod handler;
pub mod message;
pub mod summarize;
pub mod system;
pub mod transcript;
pub mod tts;

use anyhow::{bail, Context};
use cli::{Cli, Commands, HookArgs, HookCommand, PreferencesCommand, Toggle};
use config::Config;
use events::{NotificationInput, Outcome, StopInput};
use handler::SystemCapabilities;
use std::io::{IsTerminal, Read};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const STDIN_TIMEOUT: Duration = Duration::from_secs(5);

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Hook(HookCommand::Stop(args)) => hook_stop(args),
        Commands::Hook(HookCommand::Notification(args)) => hook_notification(args),
        Commands::Style(args) => style_cmd(args.style),
        Commands::Preferences(command) => preferences_cmd(command),
        Commands::Enable => set_enabled(true),
        Commands::Disable => set_enabled(false),
        Commands::Config(args) => config_cmd(args),
        Commands::Providers(args) => providers(args),
        Commands::TestTts(args) => test_tts(args),
    }
}

fn setup_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // stdout belongs to the hook host; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn hook_stop(args: HookArgs) -> anyhow::Result<()> {
    if summarizer_child() {
        return Ok(());
    }
    let payload = args.payload.or_else(read_stdin_payload);
    let input = StopInput::from_payload(payload.as_deref());
    tracing::debug!(session_id = ?input.session_id, "stop hook triggered");

    let config = Config::load_or_default();
    let caps = SystemCapabilities::new(&config)?;
    let outcome = handler::handle_stop(&input, &config, &caps)?;
    report("stop", outcome, args.json)
}

fn hook_notification(args: HookArgs) -> anyhow::Result<()> {
    if summarizer_child() {
        return Ok(());
    }
    let payload = args.payload.or_else(read_stdin_payload);
    let input = NotificationInput::from_payload(payload.as_deref());
    tracing::debug!(notification_type = %input.notification_type, "notification hook triggered");

    let config = Config::load_or_default();
    let caps = SystemCapabilities::new(&config)?;
    let outcome = handler::handle_notification(&input, &config, &caps)?;
    report("notification", outcome, args.json)
}

fn summarizer_child() -> bool {
    let nested = std::env::var_os(summarize::SUMMARIZING_ENV).is_some();
    if nested {
        tracing::debug!("running inside summarizer; hook skipped");
    }
    nested
}

fn report(hook: &str, outcome: Outcome, json: bool) -> anyhow::Result<()> {
    tracing::info!(hook, handled = outcome.handled, reason = %outcome.reason, "hook finished");
    if json {
        println!("{}", serde_json::to_string(&outcome)?);
    }
    Ok(())
}

fn style_cmd(style: Option<config::Style>) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    match style {
        None => println!("Herald style: {}", config.style),
        Some(style) => {
            config.style = style;
            config.save()?;
            println!("Herald style set to: {style}");
        }
    }
    Ok(())
}

fn preferences_cmd(command: PreferencesCommand) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    match command {
        PreferencesCommand::Show => {
            let prefs = &config.preferences;
            println!("Herald TTS preferences:");
            println!("  max_words: {}", prefs.max_words);
            match &prefs.summary_prompt {
                Some(prompt) => println!("  summary: \"{prompt}\""),
                None => println!("  summary: (none - uses default TTS prompt)"),
            }
            println!(
                "  activate_editor: {}",
                if prefs.activate_editor { "on" } else { "off" }
            );
            return Ok(());
        }
        PreferencesCommand::MaxWords { count } => {
            if count < 1 {
                bail!("max_words requires a positive number");
            }
            config.preferences.max_words = count;
            config.save()?;
            println!("Max words set to: {count}");
        }
        PreferencesCommand::Summary { prompt } => {
            let prompt = strip_quotes(prompt.join(" ").trim()).to_string();
            if prompt.is_empty() {
                bail!("summary requires a prompt");
            }
            config.preferences.summary_prompt = Some(prompt.clone());
            config.save()?;
            println!("Summary prompt set to: \"{prompt}\"");
        }
        PreferencesCommand::SummaryClear => {
            config.preferences.summary_prompt = None;
            config.save()?;
            println!("Summary prompt cleared (using default)");
        }
        PreferencesCommand::ActivateEditor { state } => {
            config.preferences.activate_editor = state == Toggle::On;
            config.save()?;
            println!(
                "Editor activation {}",
                if state == Toggle::On { "enabled" } else { "disabled" }
            );
        }
    }
    Ok(())
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

fn set_enabled(enabled: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    config.enabled = enabled;
    config.save()?;
    println!("Herald {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

fn config_cmd(args: cli::ConfigArgs) -> anyhow::Result<()> {
    if args.init {
        let path = Config::init_default()?;
        println!("Initialized config at {}", path.display());
        return Ok(());
    }

    if args.show {
        let config = Config::load()?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.validate {
        let config = Config::load()?;
        config.validate()?;
        println!("Config OK");
        return Ok(());
    }

    let path = Config::default_path()?;
    println!("{}", path.display());
    Ok(())
}

fn providers(args: cli::ProvidersArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let info = tts::providers_info(&config.tts);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Speech providers:");
    for provider in info {
        let status = match (&provider.error, provider.available) {
            (Some(err), _) => err.clone(),
            (None, true) => "available".to_string(),
            (None, false) => "unavailable".to_string(),
        };
        let marker = if provider.selected { "*" } else { "-" };
        println!("{marker} {} ({status})", provider.name);
    }

    Ok(())
}

fn test_tts(args: cli::TestTtsArgs) -> anyhow::Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(name) = args.provider {
        config.tts.provider = name;
    }
    let text = args.text.unwrap_or_else(|| "Hello from Herald".to_string());

    let speaker = config.tts.build_provider()?;
    let media = audio::media::SystemMedia;
    audio::media::with_media_control(&media, || speaker.speak(&text));
    Ok(())
}

/// Reads the hook payload, giving up after [`STDIN_TIMEOUT`] if the host
/// never closes the pipe.
fn read_stdin_payload() -> Option<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return None;
    }

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut input = String::new();
        let _ = std::io::stdin().read_to_string(&mut input);
        let _ = tx.send(input);
    });

    let input = rx.recv_timeout(STDIN_TIMEOUT).ok()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
