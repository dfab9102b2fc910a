//! Screen implementations. Each screen is a top-level Component.

pub mod assets;
pub mod dashboard;
pub mod status;

use std::time::Duration;

use indexmap::IndexMap;

use networth_api::ApiClient;
use networth_core::{
    AssetCategory, AssetKind, CashHolding, CryptoHolding, EquityGrant, ManualEntry,
    RealEstateProperty, StockHolding,
};

use crate::component::Component;
use crate::screen::ScreenId;

use self::assets::AssetScreen;

fn asset_screen(kind: AssetKind, client: ApiClient, ttl: Duration) -> Box<dyn Component> {
    match kind {
        AssetKind::Cash => Box::new(AssetScreen::<CashHolding>::new(client, ttl)),
        AssetKind::Stocks => Box::new(AssetScreen::<StockHolding>::new(client, ttl)),
        AssetKind::Crypto => Box::new(AssetScreen::<CryptoHolding>::new(client, ttl)),
        AssetKind::RealEstate => Box::new(AssetScreen::<RealEstateProperty>::new(client, ttl)),
        AssetKind::Equity => Box::new(AssetScreen::<EquityGrant>::new(client, ttl)),
        AssetKind::ManualEntries => Box::new(AssetScreen::<ManualEntry>::new(client, ttl)),
        AssetKind::Categories => Box::new(AssetScreen::<AssetCategory>::new(client, ttl)),
    }
}

/// Create screen components in tab-bar order.
pub fn create_screens(
    client: &ApiClient,
    message_ttl: Duration,
) -> IndexMap<ScreenId, Box<dyn Component>> {
    ScreenId::ALL
        .into_iter()
        .map(|id| {
            let screen: Box<dyn Component> = match id {
                ScreenId::Dashboard => Box::new(dashboard::DashboardScreen::new(client.clone())),
                ScreenId::Assets(kind) => asset_screen(kind, client.clone(), message_ttl),
                ScreenId::Status => Box::new(status::StatusScreen::new(client.clone())),
            };
            (id, screen)
        })
        .collect()
}
