use std::env;

use http_signatures_verify::{cavage, HeaderList};
use miette::{miette, IntoDiagnostic};
use tracing::info;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    Layer, Registry,
};

fn initialise_logging() -> miette::Result<()> {
    let env_filter = env::var("RUST_LOG")
        .ok()
        .and_then(|targets| targets.parse().ok())
        .unwrap_or_else(|| Targets::default().with_default(LevelFilter::INFO));

    let subscriber = Registry::default().with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(env_filter),
    );

    tracing::subscriber::set_global_default(subscriber).into_diagnostic()
}

fn main() -> miette::Result<()> {
    initialise_logging()?;

    let header = env::args()
        .nth(1)
        .ok_or_else(|| miette!("Missing argument! (┬┬﹏┬┬)"))?;
    let raw = header.strip_prefix("Signature ").unwrap_or(&header);

    let parameters = match cavage::parse(raw) {
        Ok(parameters) => parameters,
        Err(err) => return Err(miette::Error::new(err).with_source_code(raw.to_string())),
    };

    for (name, value) in parameters.iter() {
        info!(name, value, "parameter");
    }

    for name in [cavage::KEY_ID, cavage::ALGORITHM, cavage::SIGNATURE] {
        parameters.require(name)?;
    }

    let header_list: HeaderList = parameters.require(cavage::HEADERS)?.parse()?;
    info!(%header_list, "signed headers");

    println!("Header is valid! (^///^)");

    Ok(())
}
