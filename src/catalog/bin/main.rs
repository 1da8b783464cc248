use lambda_http::{run, Error};
use bookshelf::catalog::controller::{build_state, catalog_routes};
use bookshelf::core::domain::Configuration;
use bookshelf::utils::logs::setup_tracing;

// Serves every catalog route from one function, handy with `cargo lambda watch`.
// See https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::load()?;
    setup_tracing(&config);
    let state = build_state(&config).await?;
    run(catalog_routes(state)).await
}
