use std::{fs, path::PathBuf};

use alloy_primitives::Address;
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use contract_write::{
    types::AbiFragment, utils::value::parse_native_value, AbiMode, CallInput, ContractWriter,
    WriteRequest, WriterConfig,
};
use tracing_subscriber::EnvFilter;

mod explorer;
mod input;
mod record;
mod wallet;

use explorer::ExplorerAbiSource;
use input::{parse_arg, parse_method};
use record::{append_record, SubmissionRecord};
use wallet::EthersWallet;

/// Invoke a write method of a verified contract, the way the explorer's "Write contract" tab
/// does: resolve the ABI, pick the exact overload, move to the right chain, submit.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Explorer API base URL (Blockscout v2 layout), used as the ABI source.
    #[arg(long, env = "EXPLORER_API_URL")]
    explorer_url: String,

    /// Chain id the explorer serves; submissions on any other chain are refused.
    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,

    /// RPC URL of the wallet connection.
    #[arg(long, env = "RPC_URL", required_unless_present = "dry_run")]
    rpc_url: Option<String>,

    /// Path to a file containing the sender private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<PathBuf>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,

    /// Contract address to call.
    #[arg(long)]
    address: Address,

    /// ABI mode: write_contract (default), write_proxy or write_custom_methods.
    #[arg(long)]
    mode: Option<AbiMode>,

    /// JSON ABI file used instead of the explorer's ABI (implies write_custom_methods).
    #[arg(long)]
    abi_file: Option<PathBuf>,

    /// Method to call, eg `transfer(address,uint256)`, `receive` or `fallback`.
    #[arg(long)]
    method: String,

    /// Native amount in the smallest unit. Without it, one argument past the method's
    /// inputs is taken as the amount.
    #[arg(long)]
    value: Option<String>,

    /// Print the prepared call instead of submitting it.
    #[arg(long)]
    dry_run: bool,

    /// JSON file to append accepted submissions to.
    #[arg(long)]
    record_path: Option<PathBuf>,

    /// Method arguments (after `--`). Lists may be given as JSON, eg `[1,2]`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let request = build_request(&cli)?;
    let config = WriterConfig {
        chain_id: cli.chain_id,
    };
    let source = ExplorerAbiSource::new(&cli.explorer_url);

    if cli.dry_run {
        let writer = ContractWriter::new(source, (), config);
        let call = writer.prepare(&request).await?;
        println!("to:       {}", call.address());
        println!("method:   {}", call.fragment().signature());
        println!("value:    {}", call.value());
        println!("calldata: 0x{}", hex::encode(call.calldata()));
        return Ok(());
    }

    let rpc_url = cli
        .rpc_url
        .as_deref()
        .ok_or_else(|| anyhow!("missing --rpc-url (or set RPC_URL)"))?;
    let private_key = load_private_key(&cli)?;
    let wallet = EthersWallet::connect(rpc_url, &private_key).await?;

    let writer = ContractWriter::new(source, wallet, config);
    let handle = writer.submit_method_call(&request).await?;
    let label = request.descriptor.label();

    match handle {
        Some(tx) => println!("Submitted `{label}` to {}: {tx}", cli.address),
        None => println!("Wallet returned no transaction for `{label}`"),
    }

    if let Some(ref path) = cli.record_path {
        let (_, raw_value) = request.input.split(request.descriptor.inputs.len());
        let value = parse_native_value(raw_value).unwrap_or_default();
        append_record(
            path,
            &SubmissionRecord {
                chain_id: cli.chain_id,
                address: cli.address.to_string(),
                mode: request.mode.to_string(),
                method: label,
                value: value.to_string(),
                tx_hash: handle.map(|tx| tx.to_string()),
            },
        )?;
    }
    Ok(())
}

fn build_request(cli: &Cli) -> Result<WriteRequest> {
    let descriptor = parse_method(&cli.method)?;
    let args = cli.args.iter().map(|a| parse_arg(a)).collect();
    let input = match cli.value {
        Some(ref value) => CallInput::explicit(args, Some(parse_arg(value))),
        None => CallInput::positional(args),
    };

    let mut request = WriteRequest::new(cli.address, descriptor, input);
    request.mode = cli.mode.unwrap_or_default();
    if let Some(ref path) = cli.abi_file {
        if let Some(mode) = cli.mode.filter(|m| *m != AbiMode::Custom) {
            bail!("--abi-file supplies a custom ABI and cannot be used with --mode {mode}");
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        let abi: Vec<AbiFragment> = serde_json::from_str(&raw)
            .with_context(|| format!("failed parsing ABI JSON in {}", path.display()))?;
        request = request.with_custom_abi(abi);
    }
    Ok(request)
}

fn load_private_key(cli: &Cli) -> Result<String> {
    if let Some(ref path) = cli.private_key_path {
        let key = fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        Ok(key.trim().to_string())
    } else if let Some(ref key) = cli.private_key {
        Ok(key.trim().to_string())
    } else {
        Err(anyhow!(
            "missing sender key: provide --private-key-path or --private-key (or set PRIV_KEY_PATH/PKEY)"
        ))
    }
}
