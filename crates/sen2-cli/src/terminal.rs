// Rust guideline compliant 2026-10-17

//! Terminal capability checks for the sen2cli CLI.

use std::env;

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
///
/// # Returns
/// `true` if colored output should be used, `false` otherwise
#[must_use]
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    atty::is(atty::Stream::Stdout)
}

/// True when stderr is attached to a terminal.
#[must_use]
pub fn stderr_is_terminal() -> bool {
    atty::is(atty::Stream::Stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_use_color_respects_no_color() {
        std::env::set_var("NO_COLOR", "1");
        assert!(!should_use_color());
        std::env::remove_var("NO_COLOR");
    }
}
