const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::WARN;

/// Install a stderr subscriber. Each `-v` raises the maximum level by one step above WARN.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => DEFAULT_LOG_LEVEL,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
