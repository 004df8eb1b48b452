// src/pagination.rs

use crate::api::stripe_client::{ChargeSource, ListChargesParams, StripeError};
use crate::models::{Charge, ChargeList};
use crate::range::DateRange;

/// Page size used by the full-range export loop.
pub const EXPORT_PAGE_LIMIT: u32 = 10;

/// Page size used by the single-page preview endpoint.
pub const PREVIEW_PAGE_LIMIT: u32 = 10_000;

pub const STATUS_SUCCEEDED: &str = "succeeded";

/// Fetches one page of succeeded charges created within `range` (inclusive),
/// resuming strictly after `after` when given. One upstream call, no retry.
pub async fn fetch_page(
    source: &dyn ChargeSource,
    range: &DateRange,
    after: Option<&str>,
    limit: u32,
) -> Result<ChargeList, StripeError> {
    source
        .list_charges(ListChargesParams {
            created_gte: range.start_epoch(),
            created_lte: range.end_epoch(),
            limit,
            status: STATUS_SUCCEEDED,
            starting_after: after.map(str::to_owned),
        })
        .await
}

/// Collects every succeeded charge in `range`, walking the upstream cursor
/// until exhaustion. Pages are concatenated in fetch order.
pub async fn collect_all(
    source: &dyn ChargeSource,
    range: &DateRange,
) -> Result<Vec<Charge>, StripeError> {
    let mut charges: Vec<Charge> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch_page(source, range, cursor.as_deref(), EXPORT_PAGE_LIMIT).await?;

        // An empty page terminates even when has_more claims otherwise;
        // without records the cursor can never advance again.
        if page.data.is_empty() {
            break;
        }

        cursor = page.data.last().map(|c| c.id.clone());
        let has_more = page.has_more;
        charges.extend(page.data);

        if !has_more {
            break;
        }
    }

    // The fetch already filters by status upstream; keep the local filter as
    // an invariant check on the upstream contract.
    charges.retain(|c| c.status == STATUS_SUCCEEDED);

    Ok(charges)
}
