use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use charge_export::api::stripe_client::{ChargeSource, ListChargesParams, StripeError};
use charge_export::models::{Charge, ChargeList};

/// Scripted upstream: hands out the queued pages in order and records the
/// params of every call. Once the queue is drained it answers with an empty
/// final page.
pub struct FakeChargeSource {
    pages: Mutex<Vec<ChargeList>>,
    pub calls: Mutex<Vec<ListChargesParams>>,
    fail: bool,
}

impl FakeChargeSource {
    pub fn new(pages: Vec<ChargeList>) -> Self {
        Self {
            pages: Mutex::new(pages),
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            pages: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call(&self, index: usize) -> ListChargesParams {
        self.calls.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl ChargeSource for FakeChargeSource {
    async fn list_charges(&self, params: ListChargesParams) -> Result<ChargeList, StripeError> {
        self.calls.lock().unwrap().push(params);

        if self.fail {
            return Err(StripeError::Api {
                status: 500,
                body: "upstream down".to_string(),
            });
        }

        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            return Ok(ChargeList {
                data: Vec::new(),
                has_more: false,
            });
        }
        Ok(pages.remove(0))
    }
}

pub fn page(data: Vec<Charge>, has_more: bool) -> ChargeList {
    ChargeList { data, has_more }
}

pub fn charge_from(value: Value) -> Charge {
    serde_json::from_value(value).expect("charge json")
}

/// A charge with only the required fields; every optional sub-object absent.
pub fn minimal_charge(id: &str, created: i64) -> Charge {
    charge_from(json!({
        "id": id,
        "amount": 1999,
        "created": created,
        "currency": "usd",
        "status": "succeeded",
    }))
}

pub fn pending_charge(id: &str, created: i64) -> Charge {
    charge_from(json!({
        "id": id,
        "amount": 1999,
        "created": created,
        "currency": "usd",
        "status": "pending",
    }))
}

/// A fully populated card charge carrying a dispute.
pub fn disputed_charge(id: &str, created: i64) -> Charge {
    charge_from(json!({
        "id": id,
        "amount": 25000,
        "amount_captured": 25000,
        "captured": true,
        "created": created,
        "currency": "eur",
        "customer": "cus_1",
        "description": "Annual plan, renewal",
        "disputed": true,
        "dispute": {
            "id": "dp_1",
            "amount": 25000,
            "created": created + 86400,
            "currency": "eur",
            "reason": "fraudulent",
            "status": "needs_response",
        },
        "billing_details": {
            "address": {
                "city": "Berlin",
                "country": "DE",
                "line1": "Unter den Linden 1",
                "postal_code": "10117",
            },
            "email": "buyer@example.com",
            "name": "Erika Mustermann",
        },
        "outcome": {
            "network_status": "approved_by_network",
            "risk_level": "normal",
            "risk_score": 17,
            "seller_message": "Payment complete.",
            "type": "authorized",
        },
        "payment_method": "pm_1",
        "payment_method_details": {
            "type": "card",
            "card": {
                "brand": "visa",
                "country": "DE",
                "exp_month": 4,
                "exp_year": 2027,
                "funding": "credit",
                "last4": "4242",
                "network": "visa",
                "checks": {
                    "cvc_check": "pass",
                },
            },
        },
        "metadata": { "order_id": "ord_77" },
        "paid": true,
        "status": "succeeded",
    }))
}

/// A charge that has been fully refunded.
pub fn refunded_charge(id: &str, created: i64) -> Charge {
    charge_from(json!({
        "id": id,
        "amount": 4500,
        "amount_refunded": 4500,
        "created": created,
        "currency": "usd",
        "paid": true,
        "refunded": true,
        "refunds": {
            "data": [
                {
                    "id": "re_1",
                    "amount": 4500,
                    "created": created + 3600,
                    "status": "succeeded",
                }
            ]
        },
        "status": "succeeded",
    }))
}

/// `count` minimal succeeded charges with ids ch_{offset}..ch_{offset+count-1}.
pub fn minimal_charges(offset: usize, count: usize, created: i64) -> Vec<Charge> {
    (offset..offset + count)
        .map(|i| minimal_charge(&format!("ch_{i}"), created))
        .collect()
}
