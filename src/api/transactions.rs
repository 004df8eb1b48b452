// src/api/transactions.rs

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::export::{self, ExportError};
use crate::flatten::{self, FlatRecord};
use crate::pagination::{self, PREVIEW_PAGE_LIMIT, STATUS_SUCCEEDED};
use crate::range::DateRange;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,

    #[serde(rename = "endDate")]
    pub end_date: Option<String>,

    /// Accepted for compatibility; cursor pagination has no random page
    /// access, so the value is not used.
    pub page: Option<u32>,
}

/// One page of succeeded charges in the date range, as raw processor JSON.
#[utoipa::path(
    get,
    path = "/v1/api/transactions",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "One page of succeeded charges"),
        (status = 400, description = "Missing, unparsable or inverted date range"),
        (status = 500, description = "Upstream fetch failed"),
    ),
    tag = "transactions"
)]
#[get("/v1/api/transactions")]
pub async fn list_transactions(
    query: web::Query<DateRangeQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let range = match DateRange::from_query(query.start_date.as_deref(), query.end_date.as_deref())
    {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };

    let page =
        match pagination::fetch_page(state.charges.as_ref(), &range, None, PREVIEW_PAGE_LIMIT)
            .await
        {
            Ok(p) => p,
            Err(e) => {
                log::error!("list transactions fetch error: {e}");
                return HttpResponse::InternalServerError()
                    .json(json!({"error": "failed to fetch transactions"}));
            }
        };

    let has_more = page.has_more;
    let succeeded: Vec<_> = page
        .data
        .into_iter()
        .filter(|c| c.status == STATUS_SUCCEEDED)
        .collect();

    HttpResponse::Ok().json(json!({"data": succeeded, "has_more": has_more}))
}

/// Every succeeded charge in the date range, flattened to the fixed 80-column
/// layout and returned as a CSV attachment.
#[utoipa::path(
    get,
    path = "/v1/api/exportTransactionsToCSV",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "CSV document, one row per charge", content_type = "text/csv"),
        (status = 400, description = "Invalid date range, or no charges in range"),
        (status = 500, description = "Upstream fetch or serialization failed"),
    ),
    tag = "transactions"
)]
#[get("/v1/api/exportTransactionsToCSV")]
pub async fn export_transactions_to_csv(
    query: web::Query<DateRangeQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let range = match DateRange::from_query(query.start_date.as_deref(), query.end_date.as_deref())
    {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };

    let charges = match pagination::collect_all(state.charges.as_ref(), &range).await {
        Ok(c) => c,
        Err(e) => {
            log::error!("export transactions fetch error: {e}");
            return HttpResponse::InternalServerError()
                .json(json!({"error": "failed to export transactions"}));
        }
    };

    let records: Vec<FlatRecord> = charges.iter().map(flatten::flatten).collect();

    match export::to_csv(&records) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"transactions.csv\"",
            ))
            .body(csv),
        Err(ExportError::EmptyInput) => HttpResponse::BadRequest()
            .json(json!({"error": "no transactions found for the given date range"})),
        Err(e) => {
            log::error!("csv export error: {e}");
            HttpResponse::InternalServerError()
                .json(json!({"error": "failed to export transactions"}))
        }
    }
}
