use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "info,gallery_notes=debug";

/// Handle for replacing the filter once the settings are loaded
pub struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    /// `RUST_LOG` was set and wins over the settings file
    from_env: bool,
}

impl LogFilter {
    /// Switch to the settings file's `log_filter`, unless `RUST_LOG` is set
    pub fn apply_settings(&self, directive: Option<&str>) {
        let Some(directive) = directive else {
            return;
        };
        if self.from_env {
            return;
        }

        match EnvFilter::try_new(directive) {
            Ok(filter) => {
                if let Err(err) = self.handle.reload(filter) {
                    warn!(%err, "could not apply log filter");
                }
            }
            Err(err) => warn!(%err, directive, "invalid log_filter in settings"),
        }
    }
}

/// Install the global subscriber.
///
/// Returns `None` if a subscriber is already installed.
pub fn init() -> Option<LogFilter> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_FILTER), false),
    };
    let (filter_layer, handle) = reload::Layer::new(filter);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stdout_layer)
        .try_init()
        .ok()?;

    Some(LogFilter { handle, from_env })
}
