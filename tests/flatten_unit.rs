mod support;

use charge_export::flatten::flatten;
use rust_decimal::Decimal;

use support::{disputed_charge, minimal_charge, refunded_charge};

// 2024-01-01T00:00:00Z
const CREATED: i64 = 1_704_067_200;

#[test]
fn minimal_charge_gets_defaults_not_errors() {
    let record = flatten(&minimal_charge("ch_min", CREATED));

    assert_eq!(record.id, "ch_min");
    assert_eq!(record.amount, Decimal::new(1999, 2));
    assert_eq!(record.amount_captured, None);
    assert_eq!(record.amount_refunded, None);
    assert_eq!(record.currency, "USD");
    assert_eq!(record.created, "2024-01-01T00:00:00.000Z");
    assert_eq!(record.status, "succeeded");

    // booleans default to literal false, never empty
    assert!(!record.captured);
    assert!(!record.disputed);
    assert!(!record.paid);
    assert!(!record.refunded);

    // absent sub-objects flatten to empty strings
    assert_eq!(record.dispute_id, "");
    assert_eq!(record.dispute_amount, None);
    assert_eq!(record.refund_date, "");
    assert_eq!(record.card_brand, "");
    assert_eq!(record.card_exp_month, None);
    assert_eq!(record.billing_details_email, "");
    assert_eq!(record.shipping_name, "");
    assert_eq!(record.metadata, "");
    assert_eq!(record.outcome_risk_score, None);
}

#[test]
fn dispute_fields_populated_when_dispute_exists() {
    let record = flatten(&disputed_charge("ch_disp", CREATED));

    assert_eq!(record.dispute_id, "dp_1");
    assert_eq!(record.dispute_amount, Some(Decimal::new(250, 0)));
    assert_eq!(record.dispute_reason, "fraudulent");
    assert_eq!(record.dispute_status, "needs_response");
    assert_eq!(record.dispute_created, "2024-01-02T00:00:00.000Z");
    assert!(record.disputed);
}

#[test]
fn nested_card_billing_and_outcome_fields() {
    let record = flatten(&disputed_charge("ch_disp", CREATED));

    assert_eq!(record.amount, Decimal::new(250, 0));
    assert_eq!(record.currency, "EUR");
    assert_eq!(record.payment_method_type, "card");
    assert_eq!(record.card_brand, "visa");
    assert_eq!(record.card_last4, "4242");
    assert_eq!(record.card_exp_month, Some(4));
    assert_eq!(record.card_exp_year, Some(2027));
    assert_eq!(record.card_checks_cvc_check, "pass");
    assert_eq!(record.card_checks_address_line1_check, "");
    assert_eq!(record.billing_details_name, "Erika Mustermann");
    assert_eq!(record.billing_details_address_city, "Berlin");
    assert_eq!(record.billing_details_address_line2, "");
    assert_eq!(record.outcome_risk_score, Some(17));
    assert_eq!(record.outcome_type, "authorized");
    assert_eq!(record.metadata, r#"{"order_id":"ord_77"}"#);
}

#[test]
fn refund_date_from_first_refund_when_refunded() {
    let record = flatten(&refunded_charge("ch_ref", CREATED));

    assert!(record.refunded);
    assert_eq!(record.refund_date, "2024-01-01T01:00:00.000Z");
    assert_eq!(record.amount_refunded, Some(Decimal::new(45, 0)));
}

#[test]
fn refund_date_empty_when_refunded_flag_set_but_no_entries() {
    let charge = support::charge_from(serde_json::json!({
        "id": "ch_odd",
        "amount": 4500,
        "created": CREATED,
        "currency": "usd",
        "refunded": true,
        "refunds": { "data": [] },
        "status": "succeeded",
    }));

    let record = flatten(&charge);
    assert!(record.refunded);
    assert_eq!(record.refund_date, "");
}

#[test]
fn flatten_is_deterministic() {
    let charge = disputed_charge("ch_disp", CREATED);
    assert_eq!(flatten(&charge), flatten(&charge));
}
