//! Application constants
//!
//! Centralized constants for timing, buffer sizes and user-facing strings
//! used throughout the session engine.

/// UI layout constants
pub mod ui {
    /// Below this size views render a "terminal too small" notice instead.
    pub const MIN_WIDTH: u16 = 30;
    pub const MIN_HEIGHT: u16 = 10;

    /// Client-reported sizes are clamped to this before a frame buffer is allocated.
    pub const MAX_WIDTH: u16 = 500;
    pub const MAX_HEIGHT: u16 = 200;
}

/// Timers (all one-shot, re-armed by the handler that consumes them)
pub mod timing {
    use std::time::Duration;

    /// Delay between a trigger word unlocking the arcade and the jump to it
    pub const UNLOCK_NAV_DELAY: Duration = Duration::from_millis(420);

    /// Arcade "booting" status is replaced after this long
    pub const ARCADE_BOOT_DELAY: Duration = Duration::from_millis(350);

    /// Secrets log status flash lifetime
    pub const SECRETS_BLINK_DELAY: Duration = Duration::from_millis(280);

    /// Home status line lifetime (cheat-code toggle notice)
    pub const HOME_STATUS_TTL: Duration = Duration::from_secs(3);

    /// Matrix rain frame interval
    pub const SCREENSAVER_FRAME: Duration = Duration::from_millis(50);

    /// Frames the matrix rain runs for when opened by its trigger word (~10s)
    pub const SCREENSAVER_TRIGGERED_FRAMES: u32 = 200;
}

/// Secret sequence detection
pub mod secrets {
    /// Trailing window of typed letters
    pub const WORD_BUFFER_CAP: usize = 16;
}

/// Contact form field limits (characters)
pub mod contact {
    pub const MESSAGE_LIMIT: usize = 2000;
    pub const NAME_LIMIT: usize = 100;
    pub const EMAIL_LIMIT: usize = 100;
    pub const DISCORD_LIMIT: usize = 100;
    pub const PHONE_LIMIT: usize = 50;

    /// Value of the `source` field sent with every submission
    pub const SOURCE_TAG: &str = "ssh";
}

/// User-facing message strings
pub mod messages {
    pub const MESSAGE_REQUIRED: &str = "Message is required!";
    pub const ARCADE_UNLOCKED: &str = "ok... arcade booted, good luck";
    pub const ALREADY_UNLOCKED: &str = "already unlocked, check the menu";
    pub const KONAMI_ON: &str = "KONAMI CODE ACTIVATED! hidden menu items visible";
    pub const KONAMI_OFF: &str = "konami code again... hidden items tucked away";
    pub const ARCADE_BOOTING: &str = "booting tiny arcade... one sec";
    pub const ARCADE_READY: &str = "ok arcade ready, let's go";
    pub const SNAKE_LOADED: &str = "snake loaded, try not to bite yourself";
    pub const SNAKE_PAUSED: &str = "snake paused, probably hungry";
    pub const SNAKE_RESPAWNED: &str = "respawned, good luck";
    pub const SNAKE_DEAD: &str = "rip snake, press r to respawn";
    pub const SCREENSAVER_ON: &str = "enjoy the rain";
    pub const SCREENSAVER_OFF: &str = "ok screensaver off, back to the menu";
}
