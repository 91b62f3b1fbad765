//! xtooltip - headless demo of the tooltip engine.
//!
//! Usage: `xtooltip [style.json]`

mod app;

use app::DemoApp;
use xtooltip_core::logging::{init_logging, log_dir, LogConfig};
use xtooltip_ui::TooltipStyle;

fn main() {
    let log_config = LogConfig::new(log_dir());
    let _logging_guard = init_logging(log_config);

    tracing::info!("Starting xtooltip demo");

    let style = match std::env::args().nth(1) {
        Some(path) => match TooltipStyle::load(&path) {
            Ok(style) => style,
            Err(e) => {
                tracing::error!(error = %e, hint = e.hint().unwrap_or_default(), "Failed to load style");
                TooltipStyle::default()
            }
        },
        None => TooltipStyle::default(),
    };

    let mut app = DemoApp::new(style);
    if let Err(e) = app.run() {
        tracing::error!(error = %e, category = e.category(), "Demo failed");
        std::process::exit(1);
    }

    tracing::info!("Demo finished");
}
