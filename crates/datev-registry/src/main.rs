//! Binary entrypoint: prints the catalog report of the built-in versions.
use anyhow::{bail, Context, Result};
use datev_registry::{Manager, Registry};

fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays clean; RUST_LOG narrows or widens them
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let registry = Registry::builtin();
    let manager = Manager::new(&registry);

    let format = std::env::var("DATEV_SUMMARY_FORMAT").unwrap_or_else(|_| "text".to_string());
    match format.as_str() {
        "text" => print!("{}", manager.get_version_summary()),
        "json" => {
            let report = serde_json::to_string_pretty(&manager.summary_report())
                .context("serializing summary report")?;
            println!("{}", report);
        }
        other => bail!("unknown DATEV_SUMMARY_FORMAT '{}', expected text or json", other),
    }

    Ok(())
}
