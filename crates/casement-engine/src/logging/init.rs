use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g.
/// `"casement_engine=debug,wgpu=warn"`. When unset, `RUST_LOG` is read, and
/// failing that everything at info and above is shown.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// wgpu and naga are chatty at info; cap them unless a filter names them.
    pub quiet_gpu: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            quiet_gpu: true,
        }
    }
}

static INIT: Once = Once::new();

const GPU_TARGETS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if config.quiet_gpu {
            for target in GPU_TARGETS {
                builder.filter_module(target, log::LevelFilter::Warn);
            }
        }

        let filter = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok());
        match filter {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed by the embedding application.
        if builder.try_init().is_err() {
            log::debug!("logger already installed, keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("debug".to_string()),
            ..LoggingConfig::default()
        });
        log::info!("still logging");
    }
}
