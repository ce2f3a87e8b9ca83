//! Trading Bot Binary
//!
//! Command-line front end for the order dispatcher. Every command prints the
//! exchange's JSON response on stdout; logs go to stderr and `logs/`.
//!
//! # Usage
//!
//! ```bash
//! trading-bot account
//! trading-bot symbol BTCUSDT
//! trading-bot order limit --symbol BTCUSDT --side BUY --quantity 0.01 --price 30000
//! trading-bot order oco --symbol BTCUSDT --side SELL --quantity 0.01 \
//!     --take-profit-price 32000 --stop-price 29000 --stop-limit-price 28900
//! trading-bot status BTCUSDT 123456
//! trading-bot cancel BTCUSDT 123456
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `BINANCE_API_KEY`: Exchange API key
//! - `BINANCE_API_SECRET`: Exchange API secret
//!
//! ## Optional
//! - `BINANCE_ENVIRONMENT`: TESTNET | LIVE, read by the shipped `config.yaml` (default: TESTNET)
//! - `TRADING_BOT_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use trading_bot::config::{DEFAULT_CONFIG_PATH, load_config, validate_startup_environment};
use trading_bot::domain::order_execution::parse_decimal;
use trading_bot::telemetry::init_logging;
use trading_bot::{
    BinanceExchangeAdapter, Dispatcher, ExchangePort, OrderId, OrderKind, OrderParams,
    OrderSide, TimeInForce, TradingBotError, ValidationError,
};

#[derive(Debug, Parser)]
#[command(
    name = "trading-bot",
    version,
    about = "Place and manage Binance futures orders"
)]
struct Cli {
    /// Path to the YAML config file.
    #[arg(
        long,
        short,
        global = true,
        env = "TRADING_BOT_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the futures account snapshot.
    Account,
    /// Show exchange metadata for one symbol.
    Symbol {
        /// Trading pair, e.g. BTCUSDT.
        symbol: String,
    },
    /// Place an order.
    Order(OrderArgs),
    /// Show an order's current status.
    Status {
        /// Trading pair the order belongs to.
        symbol: String,
        /// Exchange order id.
        order_id: String,
    },
    /// Cancel an open order.
    Cancel {
        /// Trading pair the order belongs to.
        symbol: String,
        /// Exchange order id.
        order_id: String,
    },
}

#[derive(Debug, clap::Args)]
struct OrderArgs {
    /// Order type: market, limit, stop_limit or oco.
    order_type: String,

    /// Trading pair, e.g. BTCUSDT.
    #[arg(long)]
    symbol: String,

    /// BUY or SELL.
    #[arg(long)]
    side: String,

    /// Quantity in base asset units.
    #[arg(long)]
    quantity: String,

    /// Limit price (limit, stop_limit).
    #[arg(long)]
    price: Option<String>,

    /// Stop trigger price (stop_limit, oco).
    #[arg(long)]
    stop_price: Option<String>,

    /// Take-profit price (oco).
    #[arg(long)]
    take_profit_price: Option<String>,

    /// Limit price of the stop-loss leg once triggered (oco).
    #[arg(long)]
    stop_limit_price: Option<String>,

    /// GTC, IOC, FOK or GTX (limit, stop_limit). Defaults to GTC.
    #[arg(long)]
    time_in_force: Option<String>,
}

impl OrderArgs {
    /// Resolve the order kind, then the flags. An unknown kind is reported
    /// before any malformed flag.
    fn parse(&self) -> Result<(OrderKind, OrderParams), TradingBotError> {
        let kind: OrderKind = self.order_type.parse()?;
        let params = self.to_params()?;
        Ok((kind, params))
    }

    /// Parse the raw flags. Numeric range checks are left to the strategy.
    fn to_params(&self) -> Result<OrderParams, ValidationError> {
        let side: OrderSide = self.side.parse()?;
        let quantity = parse_decimal("quantity", &self.quantity)?;
        let mut params = OrderParams::new(self.symbol.clone(), side, quantity);

        if let Some(raw) = &self.price {
            params = params.with_price(parse_decimal("price", raw)?);
        }
        if let Some(raw) = &self.stop_price {
            params = params.with_stop_price(parse_decimal("stop_price", raw)?);
        }
        if let Some(raw) = &self.take_profit_price {
            params = params.with_take_profit_price(parse_decimal("take_profit_price", raw)?);
        }
        if let Some(raw) = &self.stop_limit_price {
            params = params.with_stop_limit_price(parse_decimal("stop_limit_price", raw)?);
        }
        if let Some(raw) = &self.time_in_force {
            params = params.with_time_in_force(raw.parse::<TimeInForce>()?);
        }

        Ok(params)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<TradingBotError>() {
                Some(trading_err) => eprintln!("{}: {trading_err}", trading_err.code()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(Some(&cli.config))
        .with_context(|| format!("loading configuration from {}", cli.config))?;

    let _logging = init_logging(&config.observability.logging).context("initializing logging")?;

    tracing::info!(
        environment = %config.exchange.environment,
        futures_url = %config.exchange.environment.futures_base_url(),
        max_attempts = config.retry.max_attempts,
        "Configuration loaded"
    );

    let startup = validate_startup_environment(&config)?;
    for warning in &startup.warnings {
        tracing::warn!("{warning}");
    }

    let adapter = BinanceExchangeAdapter::new(&config.exchange.to_binance_config())
        .context("creating exchange client")?;
    let exchange: Arc<dyn ExchangePort> = Arc::new(adapter);
    let dispatcher = Dispatcher::new(exchange, config.retry.to_policy());

    let output = match cli.command {
        Commands::Account => dispatcher.get_account_info().await?.into_inner(),
        Commands::Symbol { symbol } => dispatcher.get_symbol_info(&symbol).await?.into_inner(),
        Commands::Order(args) => {
            let (kind, params) = args.parse().inspect_err(|err| {
                tracing::warn!(order_type = %args.order_type, error = %err, "Order rejected");
            })?;
            let result = dispatcher.execute(kind, &params).await?;
            tracing::info!(
                order_type = %kind,
                order_id = result.order_id().as_deref().unwrap_or("unknown"),
                status = result.status().unwrap_or("unknown"),
                "Order accepted"
            );
            result.into_inner()
        }
        Commands::Status { symbol, order_id } => dispatcher
            .get_order_status(&symbol, &OrderId::new(order_id))
            .await?
            .into_inner(),
        Commands::Cancel { symbol, order_id } => dispatcher
            .cancel_order(&symbol, &OrderId::new(order_id))
            .await?
            .into_inner(),
    };

    print_json(&output)
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("rendering response")?;
    println!("{rendered}");
    Ok(())
}

/// Load `.env` from the working directory or the nearest ancestor that has one.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
