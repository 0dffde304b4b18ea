use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "serenity")]
#[command(about = "A calm companion for your mental wellness, in the terminal")]
#[command(long_about = "serenity - A mental wellness companion

Talk things through with an AI companion, log how you feel, keep a
reflective journal and follow a guided breathing exercise.

QUICK START:
  serenity                       Show the home screen
  serenity chat                  Talk to Serenity
  serenity mood add 4 -n \"rested\"  Log your mood
  serenity journal write \"...\"   Write a journal entry
  serenity breathe               One minute of guided breathing

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

Serenity is not a replacement for professional medical advice.
In a crisis? Call 988.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the home screen
    Home,

    /// Talk to Serenity
    ///
    /// Opens a conversation with the companion. Replies stream in as they
    /// are written. Type 'exit' or press Ctrl-D to leave.
    ///
    /// # Examples
    ///
    ///   serenity chat
    ///   serenity chat --once "I can't sleep"
    #[command(alias = "c")]
    Chat(ChatArgs),

    /// Track your mood
    #[command(alias = "m")]
    Mood(MoodArgs),

    /// Keep a reflective journal
    #[command(alias = "j")]
    Journal(JournalArgs),

    /// Guided breathing exercise
    ///
    /// A one-minute session alternating four seconds in and four seconds
    /// out. Space starts or pauses, r resets, q quits.
    #[command(alias = "b")]
    Breathe(BreatheArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions instead of the script
        #[arg(long)]
        install: bool,
    },
}

#[derive(Args)]
pub struct ChatArgs {
    /// Send a single message, print the reply and exit
    #[arg(long, value_name = "MESSAGE")]
    pub once: Option<String>,

    /// Opening message from Serenity
    #[arg(long)]
    pub greeting: Option<String>,
}

#[derive(Args)]
pub struct MoodArgs {
    #[command(subcommand)]
    pub command: MoodCommands,
}

#[derive(Subcommand)]
pub enum MoodCommands {
    /// Log how you feel right now
    ///
    /// # Examples
    ///
    ///   serenity mood add 4
    ///   serenity mood add 2 --note "long day" --tag work
    Add {
        /// Score from 1 (awful) to 5 (great)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        score: u8,

        /// A note about how you feel
        #[arg(short, long)]
        note: Option<String>,

        /// Tags for this entry (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List logged moods, newest first
    List {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Average mood and your week at a glance
    Stats,
}

#[derive(Args)]
pub struct JournalArgs {
    #[command(subcommand)]
    pub command: JournalCommands,
}

#[derive(Subcommand)]
pub enum JournalCommands {
    /// Write an entry
    ///
    /// Reads from stdin when no text is given. Serenity reflects on the
    /// entry before it is saved.
    Write {
        /// What's on your mind today?
        text: Option<String>,
    },

    /// Show entries, newest first
    List {
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Args)]
pub struct BreatheArgs {
    /// Print phase changes line by line instead of opening the full-screen view
    #[arg(long)]
    pub plain: bool,

    /// Session length in seconds
    #[arg(long, value_name = "SECONDS")]
    pub seconds: Option<u32>,
}
