use tracing::Level;
use crate::core::domain::Configuration;

// JSON lines for CloudWatch, which adds its own ingestion time.
pub fn setup_tracing(config: &Configuration) {
    let level = if config.client_log { Level::DEBUG } else { Level::INFO };
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // ANSI color codes are noise in CloudWatch logs.
        .with_ansi(false)
        .without_time()
        .json()
        .try_init();
    if let Err(err) = installed {
        tracing::warn!(error = %err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;
    use crate::utils::logs::setup_tracing;

    #[tokio::test]
    async fn test_should_tolerate_repeated_setup() {
        let mut config = Configuration::memory();
        config.client_log = true;
        setup_tracing(&config);
        setup_tracing(&config);
    }
}
