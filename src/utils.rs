use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, `RUST_LOG` overrides the `info` default.
pub fn tracing_subscriber_init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn ort_init() -> anyhow::Result<()> {
    ort::init()
        .with_name("predict-cancer")
        .commit()
        .context("Failed to initialize the ONNX Runtime environment.")?;
    Ok(())
}
