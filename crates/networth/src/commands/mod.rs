//! Command dispatch: bridges CLI args -> orchestrator actions -> output.

pub mod assets;
pub mod config_cmd;
pub mod rows;
pub mod schema;
pub mod system;
pub mod util;

use networth_core::BackendConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Run `$body` with `$T` bound to the record type for `$kind`.
macro_rules! with_record_type {
    ($kind:expr, $T:ident => $body:expr) => {
        match $kind {
            ::networth_core::AssetKind::Cash => {
                type $T = ::networth_core::CashHolding;
                $body
            }
            ::networth_core::AssetKind::Stocks => {
                type $T = ::networth_core::StockHolding;
                $body
            }
            ::networth_core::AssetKind::Crypto => {
                type $T = ::networth_core::CryptoHolding;
                $body
            }
            ::networth_core::AssetKind::RealEstate => {
                type $T = ::networth_core::RealEstateProperty;
                $body
            }
            ::networth_core::AssetKind::Equity => {
                type $T = ::networth_core::EquityGrant;
                $body
            }
            ::networth_core::AssetKind::ManualEntries => {
                type $T = ::networth_core::ManualEntry;
                $body
            }
            ::networth_core::AssetKind::Categories => {
                type $T = ::networth_core::AssetCategory;
                $body
            }
        }
    };
}
pub(crate) use with_record_type;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    backend: &BackendConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = backend.build_client()?;
    let ttl = backend.message_ttl;

    match cmd {
        Command::List(args) => {
            with_record_type!(args.kind, T => assets::list::<T>(client, ttl, &args, global).await)
        }
        Command::Show { kind, id } => {
            with_record_type!(kind, T => assets::show::<T>(client, ttl, id, global).await)
        }
        Command::Add(args) => {
            with_record_type!(args.kind, T => assets::add::<T>(client, ttl, &args, global).await)
        }
        Command::Update(args) => {
            with_record_type!(args.kind, T => assets::update::<T>(client, ttl, &args, global).await)
        }
        Command::Delete { kind, id } => {
            with_record_type!(kind, T => assets::delete::<T>(client, ttl, id, global).await)
        }
        Command::Schema(args) => schema::handle(client, ttl, args, global).await,
        Command::Plugins => schema::plugins(&client, global).await,
        Command::Summary => system::summary(&client, global).await,
        Command::Health => system::health(&client, global).await,
        Command::ApiSpec { out } => system::api_spec(&client, out, global).await,
        // Config and Completions never reach the backend.
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "handled without a backend connection".into(),
        }),
    }
}
