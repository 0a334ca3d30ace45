use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Style;

#[derive(Parser, Debug)]
#[command(name = "herald", version, about = "Spoken and audible turn notifications for agentic CLI workflows")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Entry points wired into the assistant's hook configuration
    #[command(subcommand)]
    Hook(HookCommand),
    /// Show or set the announcement style
    Style(StyleArgs),
    /// Show or set TTS preferences
    #[command(subcommand)]
    Preferences(PreferencesCommand),
    /// Turn announcements on
    Enable,
    /// Turn announcements off
    Disable,
    Config(ConfigArgs),
    /// List speech providers and whether they can be used here
    Providers(ProvidersArgs),
    TestTts(TestTtsArgs),
}

#[derive(Subcommand, Debug)]
pub enum HookCommand {
    /// The assistant finished its turn
    Stop(HookArgs),
    /// The assistant needs user input
    Notification(HookArgs),
}

#[derive(Args, Debug)]
pub struct HookArgs {
    #[arg(long, help = "Print the outcome as JSON")]
    pub json: bool,

    #[arg(value_name = "JSON", help = "Hook payload JSON (read from stdin when omitted)")]
    pub payload: Option<String>,
}

#[derive(Args, Debug)]
pub struct StyleArgs {
    #[arg(value_enum, help = "New style; omit to show the current one")]
    pub style: Option<Style>,
}

#[derive(Subcommand, Debug)]
pub enum PreferencesCommand {
    Show,
    /// Longest message spoken before summarizing
    MaxWords { count: u32 },
    /// Custom summarization prompt
    Summary {
        #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Go back to the built-in summarization prompt
    SummaryClear,
    /// Bring the editor window forward when announcing
    ActivateEditor {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, help = "Show current config as JSON")]
    pub show: bool,

    #[arg(long, help = "Create default config file")]
    pub init: bool,

    #[arg(long, help = "Validate configuration")]
    pub validate: bool,
}

#[derive(Args, Debug)]
pub struct ProvidersArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TestTtsArgs {
    #[arg(long, help = "Text to speak")]
    pub text: Option<String>,

    #[arg(long, help = "Speech provider override")]
    pub provider: Option<String>,
}
