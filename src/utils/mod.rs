pub mod build_info;
pub mod paths;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "expense_core=info";

/// Installs the global `fmt` subscriber, honouring `RUST_LOG` when set.
///
/// Safe to call repeatedly; only the first call has an effect. Log lines go to
/// stderr so script-mode output on stdout stays machine readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A subscriber installed by an embedding application wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
