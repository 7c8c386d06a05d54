//! ethnode CLI - Command-line interface for querying a node

use anyhow::Result;
use ethnode_client::{ClientConfig, NodeClient};
use ethnode_rpc::SyncStatus;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ethnode=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "help" | "--help" | "-h" => print_help(),
        "client-version" => println!("{}", connect()?.client_version().await?),
        "net-version" => println!("{}", connect()?.net_version().await?),
        "listening" => println!("{}", connect()?.net_listening().await?),
        "peer-count" => println!("{}", connect()?.net_peer_count().await?),
        "block-number" => println!("{}", connect()?.block_number().await?),
        "accounts" => accounts().await?,
        "syncing" => syncing().await?,
        "balance" => {
            if args.len() < 3 {
                eprintln!("Usage: ethnode-cli balance <address> [block]");
                return Ok(());
            }
            balance(&args[2], args.get(3).map(String::as_str)).await?;
        }
        "sha3" => {
            if args.len() < 3 {
                eprintln!("Usage: ethnode-cli sha3 <hex-data>");
                return Ok(());
            }
            println!("{}", connect()?.sha3(&args[2]).await?);
        }
        "call" => {
            if args.len() < 3 {
                eprintln!("Usage: ethnode-cli call <method> [param...]");
                return Ok(());
            }
            call(&args[2], &args[3..]).await?;
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"ethnode CLI - Query an Ethereum-style JSON-RPC node

USAGE:
    ethnode-cli <COMMAND> [OPTIONS]

COMMANDS:
    help              Show this help message
    client-version    Print the node's client version
    net-version       Print the network id
    listening         Print whether the node accepts peers
    peer-count        Print the number of connected peers
    block-number      Print the most recent block number
    accounts          List accounts owned by the node
    syncing           Print sync progress
    balance           Print the balance of an address in wei
    sha3              Keccak-256 of hex data
    call              Invoke any method with JSON params

ENVIRONMENT:
    ETHNODE_CONNECTION    http (default) or ipc
    ETHNODE_ADDRESS       node URL or socket path (default http://127.0.0.1:8545)
    ETHNODE_TIMEOUT_SECS  request timeout in seconds (default 30)

EXAMPLES:
    ethnode-cli client-version
    ethnode-cli balance 0x407d73d8a49eeb85d32cf465507dd71d507100c1 latest
    ETHNODE_CONNECTION=ipc ETHNODE_ADDRESS=~/.ethereum/geth.ipc ethnode-cli block-number
    ethnode-cli call eth_getBlockByNumber '"0x1b4"' true
"#
    );
}

async fn accounts() -> Result<()> {
    let accounts = connect()?.accounts().await?;

    if accounts.is_empty() {
        println!("No accounts");
    } else {
        for account in accounts {
            println!("{}", account);
        }
    }
    Ok(())
}

async fn syncing() -> Result<()> {
    match connect()?.syncing().await? {
        SyncStatus::Syncing(progress) => {
            println!("Syncing");
            println!("  Starting block: {}", progress.starting_block);
            println!("  Current block:  {}", progress.current_block);
            println!("  Highest block:  {}", progress.highest_block);
        }
        SyncStatus::NotSyncing(_) => println!("Not syncing"),
    }
    Ok(())
}

async fn balance(address: &str, block: Option<&str>) -> Result<()> {
    let balance = connect()?
        .get_balance_at(address, block.unwrap_or("latest"))
        .await?;
    println!("{}", balance);
    Ok(())
}

async fn call(method: &str, params: &[String]) -> Result<()> {
    let params = params.iter().map(|p| parse_param(p)).collect();
    let result = connect()?.rpc().invoke_raw(method, params).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// JSON if it parses as JSON, otherwise a plain string
fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn connect() -> Result<NodeClient> {
    let config = ClientConfig::from_env()?;

    debug!(
        "Connecting to {} node at {}",
        config.connection.kind, config.connection.address
    );

    Ok(NodeClient::connect(&config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("true"), json!(true));
        assert_eq!(parse_param("\"0x1b4\""), json!("0x1b4"));
        assert_eq!(parse_param("{\"to\":\"0x1\"}"), json!({"to": "0x1"}));
        assert_eq!(parse_param("latest"), json!("latest"));
        assert_eq!(parse_param("0xabc"), json!("0xabc"));
    }
}
