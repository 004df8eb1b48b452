// src/main.rs
use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use dotenvy::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use charge_export::api::stripe_client::ChargeClient;
use charge_export::{api, docs, AppState};

async fn index() -> impl Responder {
    HttpResponse::Ok().body("Service ready!")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let api_key = env::var("STRIPE_API_KEY").expect("STRIPE_API_KEY required");
    let api_version = env::var("STRIPE_API_VERSION").ok();
    // Base URL override for self-hosted mocks (e.g. stripe-mock)
    let api_base = env::var("STRIPE_API_BASE").ok();

    let client = ChargeClient::new(api_key, api_version, api_base);
    let state = web::Data::new(AppState {
        charges: Arc::new(client),
    });

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("charge export service listening on 0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(index))
            .service(
                SwaggerUi::new("/docs/{_:.*}")
                    .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
            )
            .service(api::transactions::list_transactions)
            .service(api::transactions::export_transactions_to_csv)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
