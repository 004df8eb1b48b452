use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::transactions::list_transactions,
        crate::api::transactions::export_transactions_to_csv
    ),
    tags(
        (name = "transactions", description = "Succeeded-charge listing and CSV export")
    )
)]
pub struct ApiDoc;
