// SPDX-License-Identifier: MIT

//! Typed wrappers over the Vault REST endpoints.
//!
//! Thin by design: each wrapper names a path and a payload shape and defers
//! authentication, refresh, and error handling to the core request path in
//! [`VaultClient::request`](crate::client::VaultClient::request).

use uuid::Uuid;

use crate::client::VaultClient;
use crate::error::Result;
use crate::models::{
    Account, CreateAccountRequest, Loan, LoanPaymentRequest, LoanRequest, Position,
    StockOrderRequest, Transaction, TransferRequest,
};

impl VaultClient {
    // ─── Accounts ────────────────────────────────────────────────────────────

    /// List the signed-in user's accounts.
    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.get_json("api/users/accounts/").await
    }

    /// Fetch a single account.
    pub async fn account(&self, id: Uuid) -> Result<Account> {
        self.get_json(&format!("api/accounts/{id}/")).await
    }

    /// Open a new account.
    pub async fn create_account(&self, req: &CreateAccountRequest) -> Result<Account> {
        self.post_json("api/accounts/", req).await
    }

    // ─── Transactions ────────────────────────────────────────────────────────

    /// All transactions across the user's accounts.
    pub async fn user_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json("api/user-transactions/").await
    }

    /// Post a transfer or payment between accounts.
    pub async fn transfer(&self, req: &TransferRequest) -> Result<Transaction> {
        self.post_json("api/transactions/", req).await
    }

    // ─── Investments ─────────────────────────────────────────────────────────

    /// Current stock portfolio.
    pub async fn portfolio(&self) -> Result<Vec<Position>> {
        self.get_json("api/stocks/portfolio/").await
    }

    /// Place a buy order.
    pub async fn buy_stock(&self, req: &StockOrderRequest) -> Result<Position> {
        self.post_json("api/stocks/buy/", req).await
    }

    /// Place a sell order.
    pub async fn sell_stock(&self, req: &StockOrderRequest) -> Result<Position> {
        self.post_json("api/stocks/sell/", req).await
    }

    // ─── Loans ───────────────────────────────────────────────────────────────

    /// List outstanding loans.
    pub async fn loans(&self) -> Result<Vec<Loan>> {
        self.get_json("api/loans/").await
    }

    /// Apply for a loan. Eligibility is decided server-side.
    pub async fn request_loan(&self, req: &LoanRequest) -> Result<Loan> {
        self.post_json("api/loans/", req).await
    }

    /// Make a payment against a loan.
    pub async fn pay_loan(&self, req: &LoanPaymentRequest) -> Result<Loan> {
        self.post_json("api/loans/pay/", req).await
    }
}
