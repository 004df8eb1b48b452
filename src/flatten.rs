// src/flatten.rs

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Charge;

/// One charge flattened to the 80 fixed export columns. Field declaration
/// order is the CSV column order.
///
/// Defaulting policy, applied field for field: amount columns are minor-unit
/// integers divided by 100 and left empty when the source value is absent
/// (never zero); boolean columns carry a literal boolean (absent reads as
/// false); every other column defaults to the empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRecord {
    pub id: String,
    pub amount: Decimal,
    pub amount_captured: Option<Decimal>,
    pub amount_refunded: Option<Decimal>,
    pub application: String,
    pub application_fee: String,
    pub application_fee_amount: Option<Decimal>,
    pub balance_transaction: String,
    pub billing_details_address_city: String,
    pub billing_details_address_country: String,
    pub billing_details_address_line1: String,
    pub billing_details_address_line2: String,
    pub billing_details_address_postal_code: String,
    pub billing_details_address_state: String,
    pub billing_details_email: String,
    pub billing_details_name: String,
    pub billing_details_phone: String,
    pub calculated_statement_descriptor: String,
    pub captured: bool,
    pub created: String,
    pub currency: String,
    pub customer: String,
    pub description: String,
    pub disputed: bool,
    pub dispute_id: String,
    pub dispute_amount: Option<Decimal>,
    pub dispute_reason: String,
    pub dispute_status: String,
    pub dispute_created: String,
    pub failure_code: String,
    pub failure_message: String,
    pub fraud_details_user_report: String,
    pub fraud_details_stripe_report: String,
    pub invoice: String,
    pub livemode: bool,
    pub metadata: String,
    pub outcome_network_status: String,
    pub outcome_reason: String,
    pub outcome_risk_level: String,
    pub outcome_risk_score: Option<i64>,
    pub outcome_seller_message: String,
    pub outcome_type: String,
    pub paid: bool,
    pub payment_intent: String,
    pub payment_method: String,
    pub payment_method_type: String,
    pub card_brand: String,
    pub card_country: String,
    pub card_exp_month: Option<i64>,
    pub card_exp_year: Option<i64>,
    pub card_fingerprint: String,
    pub card_funding: String,
    pub card_last4: String,
    pub card_network: String,
    pub card_wallet_type: String,
    pub card_checks_address_line1_check: String,
    pub card_checks_address_postal_code_check: String,
    pub card_checks_cvc_check: String,
    pub receipt_email: String,
    pub receipt_number: String,
    pub receipt_url: String,
    pub refunded: bool,
    pub refund_date: String,
    pub review: String,
    pub shipping_address_city: String,
    pub shipping_address_country: String,
    pub shipping_address_line1: String,
    pub shipping_address_line2: String,
    pub shipping_address_postal_code: String,
    pub shipping_address_state: String,
    pub shipping_carrier: String,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_tracking_number: String,
    pub source_transfer: String,
    pub statement_descriptor: String,
    pub statement_descriptor_suffix: String,
    pub status: String,
    pub transfer_data_destination: String,
    pub transfer_group: String,
}

/// Maps one nested charge onto the flat column set. Pure; the same charge
/// always yields the same record.
pub fn flatten(charge: &Charge) -> FlatRecord {
    let billing = charge.billing_details.as_ref();
    let billing_addr = billing.and_then(|b| b.address.as_ref());
    let card = charge
        .payment_method_details
        .as_ref()
        .and_then(|d| d.card.as_ref());
    let checks = card.and_then(|c| c.checks.as_ref());
    let outcome = charge.outcome.as_ref();
    let dispute = charge.dispute.as_ref();
    let fraud = charge.fraud_details.as_ref();
    let shipping = charge.shipping.as_ref();
    let shipping_addr = shipping.and_then(|s| s.address.as_ref());

    let refunded = charge.refunded.unwrap_or(false);
    // The refund date only exists while the refunded flag is set; the first
    // refund entry may still be missing, in which case the column stays empty.
    let refund_date = if refunded {
        charge
            .refunds
            .as_ref()
            .and_then(|r| r.data.first())
            .map(|r| iso_instant(r.created))
            .unwrap_or_default()
    } else {
        String::new()
    };

    let metadata = match &charge.metadata {
        Some(m) if !m.is_empty() => {
            // BTreeMap for a stable key order in the serialized column.
            let ordered: BTreeMap<&String, &String> = m.iter().collect();
            serde_json::to_string(&ordered).unwrap_or_default()
        }
        _ => String::new(),
    };

    FlatRecord {
        id: charge.id.clone(),
        amount: major_units(charge.amount),
        amount_captured: charge.amount_captured.map(major_units),
        amount_refunded: charge.amount_refunded.map(major_units),
        application: charge.application.clone().unwrap_or_default(),
        application_fee: charge.application_fee.clone().unwrap_or_default(),
        application_fee_amount: charge.application_fee_amount.map(major_units),
        balance_transaction: charge.balance_transaction.clone().unwrap_or_default(),
        billing_details_address_city: opt(billing_addr.and_then(|a| a.city.clone())),
        billing_details_address_country: opt(billing_addr.and_then(|a| a.country.clone())),
        billing_details_address_line1: opt(billing_addr.and_then(|a| a.line1.clone())),
        billing_details_address_line2: opt(billing_addr.and_then(|a| a.line2.clone())),
        billing_details_address_postal_code: opt(billing_addr.and_then(|a| a.postal_code.clone())),
        billing_details_address_state: opt(billing_addr.and_then(|a| a.state.clone())),
        billing_details_email: opt(billing.and_then(|b| b.email.clone())),
        billing_details_name: opt(billing.and_then(|b| b.name.clone())),
        billing_details_phone: opt(billing.and_then(|b| b.phone.clone())),
        calculated_statement_descriptor: charge
            .calculated_statement_descriptor
            .clone()
            .unwrap_or_default(),
        captured: charge.captured.unwrap_or(false),
        created: iso_instant(charge.created),
        currency: charge.currency.to_uppercase(),
        customer: charge.customer.clone().unwrap_or_default(),
        description: charge.description.clone().unwrap_or_default(),
        disputed: charge.disputed.unwrap_or(false),
        dispute_id: opt(dispute.map(|d| d.id.clone())),
        dispute_amount: dispute.map(|d| major_units(d.amount)),
        dispute_reason: opt(dispute.and_then(|d| d.reason.clone())),
        dispute_status: opt(dispute.and_then(|d| d.status.clone())),
        dispute_created: opt(dispute.map(|d| iso_instant(d.created))),
        failure_code: charge.failure_code.clone().unwrap_or_default(),
        failure_message: charge.failure_message.clone().unwrap_or_default(),
        fraud_details_user_report: opt(fraud.and_then(|d| d.user_report.clone())),
        fraud_details_stripe_report: opt(fraud.and_then(|d| d.stripe_report.clone())),
        invoice: charge.invoice.clone().unwrap_or_default(),
        livemode: charge.livemode.unwrap_or(false),
        metadata,
        outcome_network_status: opt(outcome.and_then(|o| o.network_status.clone())),
        outcome_reason: opt(outcome.and_then(|o| o.reason.clone())),
        outcome_risk_level: opt(outcome.and_then(|o| o.risk_level.clone())),
        outcome_risk_score: outcome.and_then(|o| o.risk_score),
        outcome_seller_message: opt(outcome.and_then(|o| o.seller_message.clone())),
        outcome_type: opt(outcome.and_then(|o| o.outcome_type.clone())),
        paid: charge.paid.unwrap_or(false),
        payment_intent: charge.payment_intent.clone().unwrap_or_default(),
        payment_method: charge.payment_method.clone().unwrap_or_default(),
        payment_method_type: opt(
            charge
                .payment_method_details
                .as_ref()
                .and_then(|d| d.method_type.clone()),
        ),
        card_brand: opt(card.and_then(|c| c.brand.clone())),
        card_country: opt(card.and_then(|c| c.country.clone())),
        card_exp_month: card.and_then(|c| c.exp_month),
        card_exp_year: card.and_then(|c| c.exp_year),
        card_fingerprint: opt(card.and_then(|c| c.fingerprint.clone())),
        card_funding: opt(card.and_then(|c| c.funding.clone())),
        card_last4: opt(card.and_then(|c| c.last4.clone())),
        card_network: opt(card.and_then(|c| c.network.clone())),
        card_wallet_type: opt(
            card.and_then(|c| c.wallet.as_ref())
                .and_then(|w| w.wallet_type.clone()),
        ),
        card_checks_address_line1_check: opt(checks.and_then(|c| c.address_line1_check.clone())),
        card_checks_address_postal_code_check: opt(
            checks.and_then(|c| c.address_postal_code_check.clone()),
        ),
        card_checks_cvc_check: opt(checks.and_then(|c| c.cvc_check.clone())),
        receipt_email: charge.receipt_email.clone().unwrap_or_default(),
        receipt_number: charge.receipt_number.clone().unwrap_or_default(),
        receipt_url: charge.receipt_url.clone().unwrap_or_default(),
        refunded,
        refund_date,
        review: charge.review.clone().unwrap_or_default(),
        shipping_address_city: opt(shipping_addr.and_then(|a| a.city.clone())),
        shipping_address_country: opt(shipping_addr.and_then(|a| a.country.clone())),
        shipping_address_line1: opt(shipping_addr.and_then(|a| a.line1.clone())),
        shipping_address_line2: opt(shipping_addr.and_then(|a| a.line2.clone())),
        shipping_address_postal_code: opt(shipping_addr.and_then(|a| a.postal_code.clone())),
        shipping_address_state: opt(shipping_addr.and_then(|a| a.state.clone())),
        shipping_carrier: opt(shipping.and_then(|s| s.carrier.clone())),
        shipping_name: opt(shipping.and_then(|s| s.name.clone())),
        shipping_phone: opt(shipping.and_then(|s| s.phone.clone())),
        shipping_tracking_number: opt(shipping.and_then(|s| s.tracking_number.clone())),
        source_transfer: charge.source_transfer.clone().unwrap_or_default(),
        statement_descriptor: charge.statement_descriptor.clone().unwrap_or_default(),
        statement_descriptor_suffix: charge
            .statement_descriptor_suffix
            .clone()
            .unwrap_or_default(),
        status: charge.status.clone(),
        transfer_data_destination: opt(
            charge
                .transfer_data
                .as_ref()
                .and_then(|t| t.destination.clone()),
        ),
        transfer_group: charge.transfer_group.clone().unwrap_or_default(),
    }
}

fn opt(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Minor units (cents) to major units; 1999 -> 19.99, 1000 -> 10.
fn major_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2).normalize()
}

/// Epoch seconds to an ISO-8601 instant, e.g. 2024-01-15T00:00:00.000Z.
fn iso_instant(epoch_secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
