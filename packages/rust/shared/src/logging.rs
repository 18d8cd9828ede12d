//! Tracing setup shared by the binaries.
//!
//! Logs go to stderr; stdout is reserved for reports and generated documents.

use tracing_subscriber::{EnvFilter, fmt};

/// Target prefix shared by every library crate in the workspace.
const LIBRARY_TARGET: &str = "owners";

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Default filter for a `-v` count, covering the libraries and `bin_target`.
///
/// `bin_target` is the calling binary's crate name (`env!("CARGO_CRATE_NAME")`),
/// whose events would otherwise fall outside the library prefix.
pub fn default_directive(verbose: u8, bin_target: &str) -> String {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("{LIBRARY_TARGET}={level},{bin_target}={level}")
}

/// Initialize the global subscriber. `RUST_LOG` wins over the `-v` default.
pub fn init_tracing(verbose: u8, format: LogFormat, bin_target: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, bin_target)));

    match format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(directive: &str, emit: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn directive_levels() {
        assert_eq!(default_directive(0, "audit_owners"), "owners=info,audit_owners=info");
        assert_eq!(default_directive(1, "gen_owners"), "owners=debug,gen_owners=debug");
        assert_eq!(default_directive(5, "gen_owners"), "owners=trace,gen_owners=trace");
    }

    #[test]
    fn binary_and_library_events_pass_default_filter() {
        let out = capture(&default_directive(0, "audit_owners"), || {
            tracing::info!(target: "audit_owners::commands", "from binary");
            tracing::info!(target: "owners_core::audit", "from core");
            tracing::info!(target: "hyper::client", "from dependency");
            tracing::debug!(target: "audit_owners::commands", "too verbose");
        });

        assert!(out.contains("from binary"));
        assert!(out.contains("from core"));
        assert!(!out.contains("from dependency"));
        assert!(!out.contains("too verbose"));
    }
}
