use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax (e.g. "info",
/// "cl_engine=debug,wgpu=warn"). When unset, `RUST_LOG` is consulted, then
/// `default_level` with `quiet_modules` capped at `warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    /// Module prefixes held at `warn` under the default level.
    pub quiet_modules: Vec<&'static str>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    /// wgpu and its shader front end log per-pipeline details at `info`.
    pub const GPU_MODULES: [&'static str; 3] = ["wgpu_core", "wgpu_hal", "naga"];
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            quiet_modules: Self::GPU_MODULES.to_vec(),
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Where the active filter came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterSource {
    Explicit(String),
    Env(String),
    Default(LevelFilter),
}

fn select_filter(
    explicit: Option<String>,
    env: Option<String>,
    default_level: LevelFilter,
) -> FilterSource {
    match (explicit, env) {
        (Some(f), _) => FilterSource::Explicit(f),
        (None, Some(f)) if !f.trim().is_empty() => FilterSource::Env(f),
        _ => FilterSource::Default(default_level),
    }
}

fn configure(
    builder: &mut env_logger::Builder,
    config: LoggingConfig,
    env: Option<String>,
) -> FilterSource {
    let source = select_filter(config.env_filter, env, config.default_level);

    match &source {
        FilterSource::Explicit(f) | FilterSource::Env(f) => {
            builder.parse_filters(f);
        }
        FilterSource::Default(level) => {
            builder.filter_level(*level);
            for module in config.quiet_modules {
                builder.filter_module(module, LevelFilter::Warn.min(*level));
            }
        }
    }

    builder.write_style(config.write_style);
    source
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        let source = configure(&mut builder, config, std::env::var("RUST_LOG").ok());

        // A second global logger (e.g. from a test harness) is not an error here.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized from {source:?}");
    });
}
