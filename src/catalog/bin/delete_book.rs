use axum::{routing::delete, Router};
use lambda_http::{run, Error};
use bookshelf::catalog::controller::{build_state, remove_book};
use bookshelf::core::domain::Configuration;
use bookshelf::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::load()?;
    setup_tracing(&config);
    let state = build_state(&config).await?;

    let app: Router<(), lambda_http::Body> = Router::new()
        .route("/books/:id", delete(remove_book))
        .with_state(state);
    run(app).await
}
