//! Configuration and CLI argument handling

use clap::Parser;
use std::path::PathBuf;

use crate::{
    state::{default_preferences_path, Preferences},
    timer::MAX_REMINDER_INTERVAL,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "focus-bell")]
#[command(about = "A focus timer that rings a reminder every interval")]
#[command(version)]
pub struct Config {
    /// Port for the control API
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Reminder interval in seconds (at most 86400), overriding the saved preference
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=MAX_REMINDER_INTERVAL.as_secs()))]
    pub interval: Option<u64>,

    /// Sound file to play on each reminder, overriding the saved preference
    #[arg(short, long)]
    pub sound: Option<PathBuf>,

    /// Preferences file location
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Log reminders instead of playing sounds and showing banners
    #[arg(long)]
    pub no_notify: bool,

    /// Start the timer immediately
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Preferences file to load from and save to
    pub fn preferences_path(&self) -> PathBuf {
        self.prefs.clone().unwrap_or_else(default_preferences_path)
    }

    /// Apply CLI overrides on top of saved preferences
    pub fn resolve(&self, mut prefs: Preferences) -> Preferences {
        if let Some(interval) = self.interval {
            prefs.interval_seconds = interval;
        }
        if let Some(sound) = &self.sound {
            prefs.custom_sound_path = Some(sound.clone());
        }
        prefs
    }
}
