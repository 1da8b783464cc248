use axum::{routing::post, Router};
use lambda_http::{run, Error};
use bookshelf::catalog::controller::{add_book, build_state};
use bookshelf::core::domain::Configuration;
use bookshelf::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::load()?;
    setup_tracing(&config);
    let state = build_state(&config).await?;

    let app: Router<(), lambda_http::Body> = Router::new()
        .route("/books", post(add_book))
        .with_state(state);
    run(app).await
}
