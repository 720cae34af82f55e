use goodlink::config;
use goodlink::server;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber: `json` for structured output, anything
/// else for human-readable text.
fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if log_format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
