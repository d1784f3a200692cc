//! Ledger demo
//!
//! Inserts sample accounts, lists them, runs one transfer and lists again.
//! A failing step is logged and the run carries on.
//!
//! Run with: cargo run --bin ledger_demo -- --seed --from 1 --to 2 --amount 50.00

use std::str::FromStr;

use account_ledger::{
    db, telemetry, AccountStore, Balance, DatabaseConfig, NewAccount, TransferCommand,
    TransferHandler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let from_id: i64 = arg_value(&args, "--from")?.unwrap_or(1);
    let to_id: i64 = arg_value(&args, "--to")?.unwrap_or(2);
    let amount: String = arg_value(&args, "--amount")?.unwrap_or_else(|| "50.00".to_string());
    let seed = args.iter().any(|a| a == "--seed");

    let config = DatabaseConfig::from_env()?;
    tracing::debug!(?config, "Database configuration");

    let pool = db::connect(&config).await?;
    db::ensure_schema(&pool).await?;
    println!("Connected to PostgreSQL!");

    let store = AccountStore::new(pool.clone());
    let transfers = TransferHandler::new(store.clone());

    if seed {
        for account in sample_accounts()? {
            match store.insert(&account).await {
                Ok(id) => tracing::info!(account_id = id, name = %account.name, "Inserted account"),
                Err(e) => tracing::error!(error = %e, name = %account.name, "Insert error"),
            }
        }
    }

    print_accounts(&store, "Accounts in database:").await;

    println!("\n--- Simulating Transfer ---");
    match transfers
        .execute(TransferCommand::new(from_id, to_id, amount))
        .await
    {
        Ok(result) => println!(
            "Transfer successful: {} from {} to {} (balances now {:.2} / {:.2})",
            result.amount, result.from_id, result.to_id, result.from_balance, result.to_balance
        ),
        Err(e) => println!("Transfer failed: {}", e),
    }

    print_accounts(&store, "\nUpdated account balances:").await;

    pool.close().await;

    Ok(())
}

/// Value following `flag`, if the flag is present. A value that does not
/// parse is an error rather than a silent fallback to the default.
fn arg_value<T>(args: &[String], flag: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = args
        .iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
    else {
        return Ok(None);
    };

    raw.parse()
        .map(Some)
        .map_err(|e| anyhow::anyhow!("Invalid value {:?} for {}: {}", raw, flag, e))
}

fn sample_accounts() -> Result<Vec<NewAccount>, account_ledger::AmountError> {
    Ok(vec![
        NewAccount::new("Alice", "alice@example.com", Balance::from_str("200.00")?),
        NewAccount::new("Bob", "bob@example.com", Balance::from_str("150.00")?),
    ])
}

async fn print_accounts(store: &AccountStore, heading: &str) {
    match store.list_all().await {
        Ok(accounts) => {
            println!("{}", heading);
            for account in accounts {
                println!("{}", account);
            }
        }
        Err(e) => tracing::error!(error = %e, "Error fetching accounts"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arg_value_parses_flag() {
        let args = args(&["ledger_demo", "--from", "3", "--to", "4"]);
        assert_eq!(arg_value::<i64>(&args, "--from").unwrap(), Some(3));
        assert_eq!(arg_value::<i64>(&args, "--to").unwrap(), Some(4));
    }

    #[test]
    fn test_arg_value_missing_flag() {
        let args = args(&["ledger_demo", "--seed"]);
        assert_eq!(arg_value::<i64>(&args, "--from").unwrap(), None);
        assert_eq!(arg_value::<i64>(&args, "--to").unwrap(), None);
    }

    #[test]
    fn test_arg_value_rejects_unparsable_value() {
        let args = args(&["ledger_demo", "--from", "x"]);
        let err = arg_value::<i64>(&args, "--from").unwrap_err();
        assert!(err.to_string().contains("--from"));
    }
}
