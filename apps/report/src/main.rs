//! stockroom-report - monthly stock summary and day-to-day bookkeeping for a
//! Stockroom database. Every command prints JSON on stdout.

mod config;
mod main_lib;

use std::io::{self, Write};
use std::str::FromStr;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use stockroom_core::catalog::{NewItem, NewPartner};
use stockroom_core::reports::stock_summary::{MonthFilter, MonthName};
use stockroom_core::transactions::{
    NewTransaction, NewTransactionItem, TransactionDirection, TransactionFilter,
};
use stockroom_core::users::NewUser;
use stockroom_core::{AuthContext, Role};

use config::Config;
use main_lib::{build_state, init_tracing, AppState};

/// User id recorded for the local operator running commands.
const LOCAL_OPERATOR: &str = "local-operator";

#[derive(Parser, Debug)]
#[command(name = "stockroom-report")]
#[command(about = "Monthly opening/in/out/closing stock and valuation per item")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Only report this month (full or three-letter English name); needs --year
    #[arg(long, value_parser = parse_month)]
    month: Option<MonthName>,

    /// Only report this year; needs --month
    #[arg(long)]
    year: Option<i32>,

    /// Report through the month of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_name = "DATE")]
    as_of: Option<NaiveDate>,

    /// Print per-month totals across all items instead of per-item rows
    #[arg(long)]
    totals: bool,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog items
    Items,

    /// Add an item to the catalog
    AddItem {
        #[arg(long)]
        name: String,

        /// Current unit price; every reported month is valued at it
        #[arg(long, value_parser = parse_price)]
        price: Decimal,

        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        sku: Option<String>,

        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Add a supplier or an outlet
    AddPartner {
        #[arg(value_enum)]
        kind: PartnerKind,

        #[arg(long)]
        name: String,

        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Record stock received from a supplier or issued to an outlet
    #[command(after_help = "\
Examples:
  stockroom-report record receiving --supplier sup-1 --line item-laptop=10
  stockroom-report record issuing --outlet out-1 --line item-laptop=2 --date 2024-02-03")]
    Record {
        #[arg(value_parser = parse_direction)]
        direction: TransactionDirection,

        /// One ITEM_ID=QUANTITY pair per line; repeat for more lines
        #[arg(long = "line", value_parser = parse_line, required = true)]
        lines: Vec<NewTransactionItem>,

        #[arg(long)]
        supplier: Option<String>,

        #[arg(long)]
        outlet: Option<String>,

        /// Day the movement happened (YYYY-MM-DD); defaults to now
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,

        #[arg(long)]
        reference: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List recorded transactions
    Transactions {
        #[arg(long, value_parser = parse_direction)]
        direction: Option<TransactionDirection>,
    },

    /// Show the change history of one entity, newest first
    History {
        /// ITEM, CATEGORY, SUPPLIER, OUTLET or USER
        entity_type: String,

        entity_id: String,
    },

    /// List user accounts
    Users,

    /// Create a user account
    AddUser {
        #[arg(long)]
        username: String,

        #[arg(long, value_parser = parse_role)]
        role: Role,

        #[arg(long)]
        display_name: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PartnerKind {
    Supplier,
    Outlet,
}

fn parse_month(value: &str) -> Result<MonthName, String> {
    value.parse()
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::from_str(value)
}

fn parse_price(value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim()).map_err(|e| format!("invalid price '{}': {}", value, e))
}

fn parse_direction(value: &str) -> Result<TransactionDirection, String> {
    match TransactionDirection::from_str(&value.trim().to_ascii_uppercase())? {
        TransactionDirection::Unknown => Err("direction must be RECEIVING or ISSUING".to_string()),
        direction => Ok(direction),
    }
}

fn parse_line(value: &str) -> Result<NewTransactionItem, String> {
    let (item_id, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM_ID=QUANTITY, got '{}'", value))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid quantity in '{}': {}", value, e))?;
    Ok(NewTransactionItem {
        item_id: item_id.trim().to_string(),
        quantity,
    })
}

impl Cli {
    fn filter(&self) -> MonthFilter {
        MonthFilter::new(self.month, self.year)
    }
}

fn local_instant(naive: chrono::NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .latest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// Last second of `date` in the reporting timezone, as a UTC instant.
fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_instant(date.and_hms_opt(23, 59, 59).unwrap_or_default(), tz)
}

/// Midday of `date` in the reporting timezone, so the movement lands in that
/// local month whatever the offset.
fn midday(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_instant(date.and_hms_opt(12, 0, 0).unwrap_or_default(), tz)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run_summary(
    cli: &Cli,
    config: &Config,
    state: &AppState,
    ctx: &AuthContext,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let filter = cli.filter();
    if filter.target().is_none() && (cli.month.is_some() || cli.year.is_some()) {
        tracing::warn!("--month and --year only filter when given together; reporting all months");
    }

    let as_of = cli
        .as_of
        .map(|date| end_of_day(date, config.reporting_tz))
        .unwrap_or_else(Utc::now);
    tracing::info!(
        "Building stock summary as of {} ({})",
        as_of,
        config.reporting_tz
    );

    if cli.totals {
        let totals = state
            .stock_summary_service
            .get_monthly_totals(ctx, as_of, &filter)?;
        write_json(out, &totals, cli.pretty)
    } else {
        let buckets = state
            .stock_summary_service
            .get_stock_summary_as_of(ctx, as_of, &filter)?;
        write_json(out, &buckets, cli.pretty)
    }
}

async fn run(
    cli: &Cli,
    config: &Config,
    state: &AppState,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let ctx = AuthContext::new(LOCAL_OPERATOR, Role::Admin);
    let Some(command) = &cli.command else {
        return run_summary(cli, config, state, &ctx, out);
    };

    match command {
        Command::Items => {
            let items = state.catalog_service.get_items(&ctx)?;
            write_json(out, &items, cli.pretty)
        }
        Command::AddItem {
            name,
            price,
            id,
            sku,
            unit,
            category,
        } => {
            let item = state
                .catalog_service
                .create_item(
                    &ctx,
                    NewItem {
                        id: id.clone(),
                        category_id: category.clone(),
                        name: name.clone(),
                        sku: sku.clone(),
                        unit: unit.clone(),
                        unit_price: *price,
                        is_active: true,
                    },
                )
                .await?;
            write_json(out, &item, cli.pretty)
        }
        Command::AddPartner {
            kind,
            name,
            id,
            contact,
            phone,
        } => {
            let partner = NewPartner {
                id: id.clone(),
                name: name.clone(),
                contact_name: contact.clone(),
                phone: phone.clone(),
                address: None,
            };
            match kind {
                PartnerKind::Supplier => {
                    let supplier = state.catalog_service.create_supplier(&ctx, partner).await?;
                    write_json(out, &supplier, cli.pretty)
                }
                PartnerKind::Outlet => {
                    let outlet = state.catalog_service.create_outlet(&ctx, partner).await?;
                    write_json(out, &outlet, cli.pretty)
                }
            }
        }
        Command::Record {
            direction,
            lines,
            supplier,
            outlet,
            date,
            reference,
            notes,
        } => {
            let occurred_at = date
                .map(|date| midday(date, config.reporting_tz))
                .unwrap_or_else(Utc::now);
            let transaction = state
                .transaction_service
                .create_transaction(
                    &ctx,
                    NewTransaction {
                        id: None,
                        direction: *direction,
                        supplier_id: supplier.clone(),
                        outlet_id: outlet.clone(),
                        occurred_at,
                        reference: reference.clone(),
                        notes: notes.clone(),
                        items: lines.clone(),
                    },
                )
                .await?;
            tracing::info!(
                "Recorded {} transaction '{}' with {} line(s)",
                transaction.direction,
                transaction.id,
                transaction.items.len()
            );
            write_json(out, &transaction, cli.pretty)
        }
        Command::Transactions { direction } => {
            let filter = TransactionFilter {
                direction: *direction,
                ..TransactionFilter::default()
            };
            let transactions = state.transaction_service.list_transactions(&ctx, &filter)?;
            write_json(out, &transactions, cli.pretty)
        }
        Command::History {
            entity_type,
            entity_id,
        } => {
            let history = state.audit_service.get_entity_history(
                &ctx,
                &entity_type.trim().to_ascii_uppercase(),
                entity_id,
            )?;
            write_json(out, &history, cli.pretty)
        }
        Command::Users => {
            let users = state.user_service.get_users(&ctx)?;
            write_json(out, &users, cli.pretty)
        }
        Command::AddUser {
            username,
            role,
            display_name,
        } => {
            let user = state
                .user_service
                .create_user(
                    &ctx,
                    NewUser {
                        id: None,
                        username: username.clone(),
                        display_name: display_name.clone(),
                        role: *role,
                    },
                )
                .await?;
            write_json(out, &user, cli.pretty)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let state = build_state(&config).context("failed to open the stock database")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &config, &state, &mut out).await
}
