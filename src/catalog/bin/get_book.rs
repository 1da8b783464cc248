use axum::{routing::get, Router};
use lambda_http::{run, Error};
use bookshelf::catalog::controller::{build_state, find_book_by_id};
use bookshelf::core::domain::Configuration;
use bookshelf::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::load()?;
    setup_tracing(&config);
    let state = build_state(&config).await?;

    let app: Router<(), lambda_http::Body> = Router::new()
        .route("/books/:id", get(find_book_by_id))
        .with_state(state);
    run(app).await
}
