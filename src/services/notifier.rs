//! Reminder delivery: sound and banner

use chrono::{DateTime, Utc};
use std::{
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{info, warn};

use super::system::{check_tool_available, run_command};
use crate::{error::NotifyError, timer::format_hms};

const NOTIFICATION_TITLE: &str = "Focus Bell";

#[cfg(target_os = "macos")]
const DEFAULT_SOUND: &str = "/System/Library/Sounds/Glass.aiff";
#[cfg(not(target_os = "macos"))]
const DEFAULT_SOUND: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";

#[cfg(target_os = "macos")]
const SOUND_PLAYER: &str = "afplay";
#[cfg(not(target_os = "macos"))]
const SOUND_PLAYER: &str = "paplay";

#[cfg(target_os = "macos")]
const BANNER_TOOL: &str = "osascript";
#[cfg(not(target_os = "macos"))]
const BANNER_TOOL: &str = "notify-send";

/// A single reminder delivered when the interval elapses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// 1-based count since the timer was started
    pub sequence: u64,
    pub elapsed: Duration,
    pub fired_at: DateTime<Utc>,
}

impl Reminder {
    /// Banner body text
    pub fn message(&self) -> String {
        format!(
            "Time to check in! Focused for {} so far.",
            format_hms(self.elapsed)
        )
    }
}

/// Delivers reminders to the user
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, reminder: &Reminder)
        -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Plays a sound and shows a desktop banner
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    sound: PathBuf,
    sound_enabled: bool,
    banner_enabled: bool,
}

impl DesktopNotifier {
    /// Create a notifier, preferring `custom_sound` when it exists on disk
    pub fn new(custom_sound: Option<&Path>) -> Self {
        Self {
            sound: resolve_sound(custom_sound),
            sound_enabled: true,
            banner_enabled: true,
        }
    }

    /// Create a notifier with only the tools present on this machine enabled
    pub async fn detect(custom_sound: Option<&Path>) -> Self {
        let mut notifier = Self::new(custom_sound);
        notifier.sound_enabled = check_tool_available(SOUND_PLAYER).await;
        notifier.banner_enabled = check_tool_available(BANNER_TOOL).await;
        notifier
    }

    pub fn sound(&self) -> &Path {
        &self.sound
    }

    async fn play_sound(&self) -> Result<(), NotifyError> {
        let sound = self.sound.to_string_lossy();
        run_command(SOUND_PLAYER, &[&*sound]).await
    }

    async fn show_banner(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        let message = reminder.message();

        #[cfg(target_os = "macos")]
        {
            let script = format!(
                "display notification \"{}\" with title \"{}\"",
                escape_applescript(&message),
                NOTIFICATION_TITLE
            );
            run_command(BANNER_TOOL, &["-e", script.as_str()]).await
        }

        #[cfg(not(target_os = "macos"))]
        {
            run_command(BANNER_TOOL, &[NOTIFICATION_TITLE, message.as_str()]).await
        }
    }
}

impl Notifier for DesktopNotifier {
    async fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        info!("Delivering reminder #{}", reminder.sequence);

        // Run both even if one fails; report the first failure.
        let sound = if self.sound_enabled {
            self.play_sound().await
        } else {
            Ok(())
        };
        let banner = if self.banner_enabled {
            self.show_banner(reminder).await
        } else {
            Ok(())
        };

        sound.and(banner)
    }
}

/// Only logs reminders
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        info!(
            "Reminder #{} at {}: {}",
            reminder.sequence,
            reminder.fired_at.to_rfc3339(),
            reminder.message()
        );
        Ok(())
    }
}

fn resolve_sound(custom_sound: Option<&Path>) -> PathBuf {
    match custom_sound {
        Some(path) if path.is_file() => path.to_path_buf(),
        Some(path) => {
            warn!(
                "Custom sound {} not found, using {}",
                path.display(),
                DEFAULT_SOUND
            );
            PathBuf::from(DEFAULT_SOUND)
        }
        None => PathBuf::from(DEFAULT_SOUND),
    }
}

#[cfg(target_os = "macos")]
fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
