//! Subscriber setup for the `specmatch` binary and embedding tools.
//!
//! Library code only emits events. Nothing is printed until a caller picks a
//! [`Profile`] and calls [`init`].

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Where log events go and how they look.
///
/// The CLI maps `--log human` to [`Profile::Development`] and `--log json`
/// to [`Profile::Production`]. Without `--log` no subscriber is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Plain-text lines, `specmatch` targets at debug and above
    Development,
    /// One JSON object per event, `specmatch` targets at info and above
    Production,
    /// Leaves the global slot to [`init_test_capture`](super::init_test_capture)
    Test,
}

impl Profile {
    fn directive(self) -> &'static str {
        match self {
            Profile::Development => "specmatch=debug",
            Profile::Production | Profile::Test => "specmatch=info",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }
}

static INSTALLED: Once = Once::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call in a process has an effect. Events are written to
/// stderr, so flattened snapshots and comparison reports on stdout stay
/// machine-readable. A `RUST_LOG` value replaces the profile's directive.
///
/// ```
/// use specmatch_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INSTALLED.call_once(|| match profile {
        Profile::Development => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter())
            .init(),
        Profile::Production => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter())
            .init(),
        Profile::Test => {
            // the capture layer may already hold the global slot
            let _ = tracing_subscriber::registry().try_init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init(Profile::Test);
        init(Profile::Development);
        init(Profile::Production);
    }

    #[test]
    fn test_directive_targets_crate() {
        assert_eq!(Profile::Development.directive(), "specmatch=debug");
        assert_eq!(Profile::Production.directive(), "specmatch=info");
    }
}
