//! Subscriber installation for the command-line driver.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber if `HXC_LOG` (or `RUST_LOG`) is set.
///
/// `HXC_LOG_TREE=1` switches the flat `fmt` output for an indented span tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = match std::env::var("HXC_LOG").or_else(|_| std::env::var("RUST_LOG")) {
            Ok(directives) => directives,
            Err(_) => return,
        };
        let filter = EnvFilter::new(directives);
        let registry = tracing_subscriber::registry().with(filter);
        if std::env::var("HXC_LOG_TREE").is_ok_and(|v| v == "1") {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
