//! Order kind (market, limit, stop-limit, OCO).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The closed set of order kinds the bot can place.
///
/// The kind determines which parameters are required and which exchange
/// operation is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    /// Market order - execute at best available price.
    Market,
    /// Limit order - execute at specified price or better.
    Limit,
    /// Stop-limit order - becomes a limit order when the stop price trades.
    StopLimit,
    /// One-cancels-other - two linked conditional legs.
    Oco,
}

impl OrderKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 4] = [Self::Market, Self::Limit, Self::StopLimit, Self::Oco];

    /// Number of kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this kind in [`OrderKind::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Market => 0,
            Self::Limit => 1,
            Self::StopLimit => 2,
            Self::Oco => 3,
        }
    }

    /// Tag used by callers to name the kind.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopLimit => "stop_limit",
            Self::Oco => "oco",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Order-type tag outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported order type: {0}")]
pub struct UnknownOrderKind(pub String);

impl FromStr for OrderKind {
    type Err = UnknownOrderKind;

    /// Tags are matched exactly: "market", "limit", "stop_limit", "oco".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| UnknownOrderKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_kind_parse_known_tags() {
        assert_eq!("market".parse::<OrderKind>().unwrap(), OrderKind::Market);
        assert_eq!("limit".parse::<OrderKind>().unwrap(), OrderKind::Limit);
        assert_eq!(
            "stop_limit".parse::<OrderKind>().unwrap(),
            OrderKind::StopLimit
        );
        assert_eq!("oco".parse::<OrderKind>().unwrap(), OrderKind::Oco);
    }

    #[test]
    fn order_kind_parse_unknown_tags() {
        for tag in ["", "MARKET", "stop", "trailing_stop", "stop-limit"] {
            let err = tag.parse::<OrderKind>().unwrap_err();
            assert_eq!(err, UnknownOrderKind(tag.to_string()));
        }
    }

    #[test]
    fn order_kind_index_matches_table_order() {
        for (i, kind) in OrderKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(OrderKind::COUNT, 4);
    }

    #[test]
    fn order_kind_serde() {
        let json = serde_json::to_string(&OrderKind::StopLimit).unwrap();
        assert_eq!(json, "\"stop_limit\"");

        let parsed: OrderKind = serde_json::from_str("\"oco\"").unwrap();
        assert_eq!(parsed, OrderKind::Oco);
    }
}
