// /pos-dashboard/services/pos-service/src/utils/logger.rs

use tracing_subscriber::{filter::Directive, EnvFilter};

const DEFAULT_DIRECTIVES: &[&str] = &["pos_service=debug", "tower_http=debug"];

/// Logger initialization, RUST_LOG tetap bisa menambah directive lain
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();
}

fn build_filter() -> EnvFilter {
    DEFAULT_DIRECTIVES
        .iter()
        .filter_map(|raw| raw.parse::<Directive>().ok())
        .fold(EnvFilter::from_default_env(), |filter, directive| {
            filter.add_directive(directive)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for raw in DEFAULT_DIRECTIVES {
            assert!(raw.parse::<Directive>().is_ok(), "{} harus valid", raw);
        }
        assert!(build_filter().to_string().contains("pos_service=debug"));
    }
}
