// src/models.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One page of the upstream charge list: `{"data": [...], "has_more": bool}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeList {
    pub data: Vec<Charge>,
    pub has_more: bool,
}

/// A charge as returned by the payment processor. Amounts are in minor units
/// (cents), timestamps in epoch seconds. Everything the processor may omit is
/// optional; unknown fields are ignored on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,
    pub amount: i64,
    pub amount_captured: Option<i64>,
    pub amount_refunded: Option<i64>,
    pub application: Option<String>,
    pub application_fee: Option<String>,
    pub application_fee_amount: Option<i64>,
    pub balance_transaction: Option<String>,
    pub billing_details: Option<BillingDetails>,
    pub calculated_statement_descriptor: Option<String>,
    pub captured: Option<bool>,
    pub created: i64,
    pub currency: String,
    pub customer: Option<String>,
    pub description: Option<String>,
    pub dispute: Option<Dispute>,
    pub disputed: Option<bool>,
    pub failure_code: Option<String>,
    pub failure_message: Option<String>,
    pub fraud_details: Option<FraudDetails>,
    pub invoice: Option<String>,
    pub livemode: Option<bool>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    pub outcome: Option<Outcome>,
    pub paid: Option<bool>,
    pub payment_intent: Option<String>,
    pub payment_method: Option<String>,
    pub payment_method_details: Option<PaymentMethodDetails>,
    pub receipt_email: Option<String>,
    pub receipt_number: Option<String>,
    pub receipt_url: Option<String>,
    pub refunded: Option<bool>,
    pub refunds: Option<RefundList>,
    pub review: Option<String>,
    pub shipping: Option<Shipping>,
    pub source_transfer: Option<String>,
    pub statement_descriptor: Option<String>,
    pub statement_descriptor_suffix: Option<String>,
    pub status: String, // succeeded | pending | failed
    pub transfer_data: Option<TransferData>,
    pub transfer_group: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingDetails {
    pub address: Option<Address>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub country: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispute {
    pub id: String,
    pub amount: i64,
    pub created: i64,
    pub currency: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudDetails {
    pub user_report: Option<String>,
    pub stripe_report: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub network_status: Option<String>,
    pub reason: Option<String>,
    pub risk_level: Option<String>,
    pub risk_score: Option<i64>,
    pub seller_message: Option<String>,
    #[serde(rename = "type")]
    pub outcome_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodDetails {
    pub card: Option<CardDetails>,
    #[serde(rename = "type")]
    pub method_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub brand: Option<String>,
    pub checks: Option<CardChecks>,
    pub country: Option<String>,
    pub exp_month: Option<i64>,
    pub exp_year: Option<i64>,
    pub fingerprint: Option<String>,
    pub funding: Option<String>,
    pub last4: Option<String>,
    pub network: Option<String>,
    pub wallet: Option<CardWallet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardChecks {
    pub address_line1_check: Option<String>,
    pub address_postal_code_check: Option<String>,
    pub cvc_check: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardWallet {
    #[serde(rename = "type")]
    pub wallet_type: Option<String>,
}

/// Refunds come embedded in the charge as a sub-list; only `data` matters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundList {
    #[serde(default)]
    pub data: Vec<Refund>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refund {
    pub id: String,
    pub amount: i64,
    pub created: i64,
    pub reason: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipping {
    pub address: Option<Address>,
    pub carrier: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferData {
    pub destination: Option<String>,
}
