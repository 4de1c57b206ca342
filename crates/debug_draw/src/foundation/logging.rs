//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// A logger that is already installed is kept; calling this twice is harmless.
pub fn init() {
    if !try_init() {
        debug!("Logger already installed");
    }
}

/// Initialize the logging system, reporting whether this call installed it
///
/// Useful from tests and hosts that may have set up their own backend first.
pub fn try_init() -> bool {
    env_logger::try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init();
        init();
        assert!(!try_init());
    }
}
