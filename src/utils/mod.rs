use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

const FALLBACK_DIRECTIVE: &str = "saver_tracker=info";

/// Initializes the global tracing subscriber from `RUST_LOG` plus `directive`.
///
/// An unparsable directive falls back to `saver_tracker=info`.
pub fn init_tracing(directive: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive(parse_directive(directive));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn parse_directive(directive: &str) -> Directive {
    directive
        .parse()
        .or_else(|_| FALLBACK_DIRECTIVE.parse())
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_directive_falls_back() {
        assert_eq!(
            parse_directive("saver_tracker=debug").to_string(),
            "saver_tracker=debug"
        );
        assert_eq!(parse_directive("saver_tracker=loudest").to_string(), FALLBACK_DIRECTIVE);
    }
}
