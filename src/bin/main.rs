//! mina-connect CLI - address helpers and the persisted connection record
//!
//!   mina-connect validate <address>   → {"address": "...", "valid": true}
//!   mina-connect format <address>     → {"formatted": "B62qjV...PZ9s"}
//!   mina-connect status               → persisted snapshot
//!   mina-connect reset                → forget the connection (alias: disconnect)
//!   mina-connect networks             → known network tags
//!
//! Storage:
//!   --data-dir <path>   (env: MINA_CONNECT_ROOT, default <data_dir>/mina-connect)
//!   --key <name>        (env: MINA_CONNECT_STORAGE_KEY, default mina-wallet-storage)
//!
//! Output format:
//!   --json     Output raw JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use anyhow::{anyhow, Context};
use mina_connect::logging::init_logging;
use mina_connect::{
    format_address, validate_address, ConnectionStore, ConnectorConfig, FileStorage, Network,
    NoProvider, WalletConnector,
};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use std::rc::Rc;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("mina-connect {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("validate") => cmd_validate(&opts),
        Some("format") => cmd_format(&opts),
        Some("status") => cmd_status(&opts).await,
        Some("reset") | Some("disconnect") => cmd_reset(&opts),
        Some("networks") => Ok(cmd_networks()),
        Some(cmd) => Err(anyhow!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = !opts.json && (opts.pretty || std::io::stdout().is_terminal());
    match result {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": format!("{:#}", e)}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.unwrap_or_else(|_| value.to_string())
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    address: Option<String>,
    data_dir: Option<String>,
    key: Option<String>,
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--data-dir" | "-d" => {
                    if i + 1 < args.len() {
                        opts.data_dir = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--key" | "-k" => {
                    if i + 1 < args.len() {
                        opts.key = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        let mut positional = positional.into_iter();
        opts.command = positional.next();
        opts.address = positional.next();
        opts
    }

    fn address(&self) -> anyhow::Result<&str> {
        self.address.as_deref().ok_or_else(|| anyhow!("missing <address>"))
    }

    /// Environment config with `--key` applied, so store and connector agree.
    fn config(&self) -> ConnectorConfig {
        let config = ConnectorConfig::from_env();
        match &self.key {
            Some(key) => config.with_storage_key(key.clone()),
            None => config,
        }
    }

    fn store(&self) -> anyhow::Result<ConnectionStore> {
        let storage = match &self.data_dir {
            Some(dir) => FileStorage::new(dir),
            None => FileStorage::open_default().context("resolving data directory")?,
        };
        debug!(root = %storage.root().display(), "using file storage");

        let store = ConnectionStore::new(Rc::new(storage)).with_key(self.config().storage_key);
        store.load();
        Ok(store)
    }
}

fn cmd_validate(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let address = opts.address()?;
    Ok(json!({"address": address, "valid": validate_address(address)}))
}

fn cmd_format(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let formatted = format_address(opts.address()?)?;
    Ok(json!({"formatted": formatted}))
}

/// No browser here, so the connector always observes an absent wallet.
async fn cmd_status(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let store = opts.store()?;
    let connector = WalletConnector::new(Rc::new(NoProvider), store, opts.config());
    let phase = connector.check().await;

    let snapshot = connector.snapshot();
    let mut output = serde_json::to_value(&snapshot)?;
    output["availability"] = json!(phase.as_str());
    output["network"] = json!(snapshot.network().map(|n| n.label()));
    output["formatted"] = json!(snapshot.address.as_deref().and_then(|a| format_address(a).ok()));
    Ok(output)
}

fn cmd_reset(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let store = opts.store()?;
    let connector = WalletConnector::new(Rc::new(NoProvider), store, opts.config());
    connector.disconnect();
    Ok(json!({"success": true, "key": connector.store().key()}))
}

fn cmd_networks() -> Value {
    Value::Array(
        Network::ALL
            .iter()
            .map(|n| json!({"id": n.as_str(), "label": n.label()}))
            .collect(),
    )
}

fn print_usage() {
    println!(
        r#"mina-connect - Mina wallet connection helper

USAGE:
    mina-connect <command> [address] [options]

COMMANDS:
    validate <address>      Check prefix, length and base-58 alphabet
    format <address>        Shorten a valid address (B62qjV...PZ9s)
    status                  Show the persisted connection snapshot
    reset                   Forget the persisted connection (alias: disconnect)
    networks                List known network identifiers

STORAGE OPTIONS:
    --data-dir, -d <path>   Storage directory (env: MINA_CONNECT_ROOT)
    --key, -k <name>        Record key (env: MINA_CONNECT_STORAGE_KEY)

OUTPUT OPTIONS:
    --json                  Raw JSON output
    --pretty                Pretty-print JSON
    --version, -V           Print version

LOGGING:
    RUST_LOG=debug          Verbose diagnostics on stderr
    MINA_CONNECT_LOG_JSON=1 JSON log lines

EXAMPLES:
    mina-connect validate B62qjVL9RjmmaD4yh9V3fGFkJ5VDWkjAkqF3W3F7t8FU2jTT6wxPZ9s
    mina-connect status --data-dir ./state
"#
    );
}
