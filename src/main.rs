// SPDX-License-Identifier: MIT

//! Vault CLI
//!
//! Demo command-line surface over the Vault client library. Session tokens
//! persist in a JSON file between invocations; protected commands run the
//! route guard first, exactly like a protected view would before rendering.

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use vault_client::config::Config;
use vault_client::models::{
    CreateAccountRequest, LoanPaymentRequest, LoanRequest, StockOrderRequest, TransferRequest,
};
use vault_client::{Decision, FileTokenStore, RouteGuard, SessionEvents, VaultClient};

#[derive(Parser)]
#[command(name = "vault", version, about = "CLI client for the Vault retail-banking API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session tokens
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and drop the stored session
    Logout,
    /// Register a new user (does not sign in)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check whether the stored session is still valid
    Status,
    /// List your accounts
    Accounts,
    /// Open a new account
    OpenAccount {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "checking")]
        account_type: String,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Transfer money between accounts
    Transfer {
        #[arg(long)]
        from: Uuid,
        #[arg(long)]
        to: Uuid,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        description: Option<String>,
    },
    /// List transactions across your accounts
    Transactions,
    /// Show your stock portfolio
    Portfolio,
    /// Buy shares
    Buy {
        #[arg(long)]
        account: Uuid,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        shares: Decimal,
    },
    /// Sell shares
    Sell {
        #[arg(long)]
        account: Uuid,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        shares: Decimal,
    },
    /// List outstanding loans
    Loans,
    /// Apply for a loan
    Borrow {
        #[arg(long)]
        account: Uuid,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value_t = 12)]
        term_months: u32,
    },
    /// Pay down a loan
    Repay {
        #[arg(long)]
        loan: Uuid,
        #[arg(long)]
        amount: Decimal,
    },
}

/// Session hook for the CLI: there is no browsing context to redirect, so
/// just tell the user what to do next.
struct CliSessionEvents;

impl SessionEvents for CliSessionEvents {
    fn session_invalidated(&self) {
        eprintln!("Session expired. Run `vault login` to sign in again.");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vault_client=warn".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let store = Arc::new(FileTokenStore::open(&config.session_file));
    let client = VaultClient::with_events(&config.api_url, store, Arc::new(CliSessionEvents));
    let guard = RouteGuard::new(client.clone());

    match cli.command {
        Command::Login { email, password } => {
            client.login(&email, &password).await?;
            println!("Signed in as {email}");
        }
        Command::Logout => {
            client.logout().await?;
            println!("Signed out");
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            client.register(&name, &email, &password).await?;
            println!("Registered {email}; run `vault login` to sign in");
        }
        Command::Status => match guard.authorize().await {
            Decision::Allow => println!("Session valid"),
            Decision::RedirectToLogin => println!("No valid session; run `vault login`"),
        },
        Command::Accounts => {
            require_session(&guard).await?;
            print_json(&client.accounts().await?)?;
        }
        Command::OpenAccount {
            name,
            account_type,
            currency,
        } => {
            require_session(&guard).await?;
            let req = CreateAccountRequest {
                name,
                account_type,
                currency,
            };
            print_json(&client.create_account(&req).await?)?;
        }
        Command::Transfer {
            from,
            to,
            amount,
            description,
        } => {
            require_session(&guard).await?;
            let req = TransferRequest {
                from_account: from,
                to_account: to,
                amount,
                description,
            };
            print_json(&client.transfer(&req).await?)?;
        }
        Command::Transactions => {
            require_session(&guard).await?;
            print_json(&client.user_transactions().await?)?;
        }
        Command::Portfolio => {
            require_session(&guard).await?;
            print_json(&client.portfolio().await?)?;
        }
        Command::Buy {
            account,
            symbol,
            shares,
        } => {
            require_session(&guard).await?;
            let req = StockOrderRequest {
                account,
                symbol,
                shares,
            };
            print_json(&client.buy_stock(&req).await?)?;
        }
        Command::Sell {
            account,
            symbol,
            shares,
        } => {
            require_session(&guard).await?;
            let req = StockOrderRequest {
                account,
                symbol,
                shares,
            };
            print_json(&client.sell_stock(&req).await?)?;
        }
        Command::Loans => {
            require_session(&guard).await?;
            print_json(&client.loans().await?)?;
        }
        Command::Borrow {
            account,
            amount,
            term_months,
        } => {
            require_session(&guard).await?;
            let req = LoanRequest {
                account,
                amount,
                term_months,
            };
            print_json(&client.request_loan(&req).await?)?;
        }
        Command::Repay { loan, amount } => {
            require_session(&guard).await?;
            let req = LoanPaymentRequest { loan, amount };
            print_json(&client.pay_loan(&req).await?)?;
        }
    }

    Ok(())
}

/// Guard check shared by all protected commands.
async fn require_session(guard: &RouteGuard) -> anyhow::Result<()> {
    match guard.authorize().await {
        Decision::Allow => Ok(()),
        Decision::RedirectToLogin => {
            anyhow::bail!("No valid session; run `vault login` first")
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
