use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber, `RUST_LOG` aware with an INFO
/// floor. Call once at startup.
pub fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .try_init()
        .map_err(|e| eyre::eyre!("tracing init failed: {e}"))
}
