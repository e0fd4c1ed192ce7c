use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use tracing::trace;

const DEFAULT_FILTER: &str = "repobot=info,tracing_unwrap";

/// `RUST_LOG` wins over `--log-filter`, which wins over the default.
pub fn init_tracing(filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|err| {
            eprintln!("invalid log filter ({err}), falling back to `{DEFAULT_FILTER}`");
            EnvFilter::new(DEFAULT_FILTER)
        });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    trace!("finished");
}
