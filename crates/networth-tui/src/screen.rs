//! Screen identifiers and tab order.

use std::fmt;

use networth_core::AssetKind;

/// Each primary screen, navigable by number keys 1-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard,
    Assets(AssetKind),
    Status,
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 9] = [
        Self::Dashboard,
        Self::Assets(AssetKind::Cash),
        Self::Assets(AssetKind::Stocks),
        Self::Assets(AssetKind::Crypto),
        Self::Assets(AssetKind::RealEstate),
        Self::Assets(AssetKind::Equity),
        Self::Assets(AssetKind::ManualEntries),
        Self::Assets(AssetKind::Categories),
        Self::Status,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Numeric key (1-9) for this screen.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Assets(kind) => kind.title(),
            Self::Status => "Status",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn number_keys_cover_every_screen() {
        for (i, id) in ScreenId::ALL.iter().enumerate() {
            assert_eq!(id.number(), i + 1);
            assert_eq!(ScreenId::from_number(i + 1), Some(*id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(10), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Status.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Status);
        assert_eq!(ScreenId::Dashboard.next(), ScreenId::Assets(AssetKind::Cash));
    }

    #[test]
    fn asset_screens_use_kind_titles() {
        assert_eq!(ScreenId::Assets(AssetKind::RealEstate).label(), "Real Estate");
        assert_eq!(ScreenId::from_number(8).map(ScreenId::label), Some("Categories"));
    }
}
