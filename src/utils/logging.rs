// Tue Jan 13 2026 - Alex

use log::LevelFilter;
use std::env;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the process logger. `RUST_LOG` refines the level picked by
    /// the debug toggle.
    pub fn init(debug: bool) {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(Self::level_for(debug))
            .format_target(false);

        if let Ok(filters) = env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        builder.try_init().ok();
    }

    pub fn level_for(debug: bool) -> LevelFilter {
        if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
