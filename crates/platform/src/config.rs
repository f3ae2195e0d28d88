//! Application identity constants
//!
//! Log banners and the emulator reference these rather than hardcoding names.

/// The application name
pub const APP_NAME: &str = "Badge";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Banner printed when the desktop emulator starts
pub const fn emulator_banner() -> &'static str {
    "Badge - Bring-up Emulator"
}
