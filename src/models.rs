// SPDX-License-Identifier: MIT

//! Serde models for the Vault REST API payloads.
//!
//! These mirror what the backend serializes; the client performs no
//! financial computation of its own. Money fields are decimals, never
//! floats.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub account_type: String,
    pub currency: String,
    pub balance: Decimal,
}

/// Request body for opening a new account.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub account_type: String,
    pub currency: String,
}

/// A posted transaction (transfer or payment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub from_account: Uuid,
    pub to_account: Uuid,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for a transfer between accounts.
#[derive(Debug, Clone, Serialize)]
pub struct TransferRequest {
    pub from_account: Uuid,
    pub to_account: Uuid,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A holding in the user's stock portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub shares: Decimal,
    pub average_price: Decimal,
}

/// Request body for a stock buy or sell order.
#[derive(Debug, Clone, Serialize)]
pub struct StockOrderRequest {
    pub account: Uuid,
    pub symbol: String,
    pub shares: Decimal,
}

/// An outstanding loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: Uuid,
    pub account: Uuid,
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub balance: Decimal,
    pub term_months: u32,
}

/// Request body for taking out a loan.
#[derive(Debug, Clone, Serialize)]
pub struct LoanRequest {
    pub account: Uuid,
    pub amount: Decimal,
    pub term_months: u32,
}

/// Request body for a loan repayment.
#[derive(Debug, Clone, Serialize)]
pub struct LoanPaymentRequest {
    pub loan: Uuid,
    pub amount: Decimal,
}
