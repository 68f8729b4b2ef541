//! Status enums for list entries and products.

use serde::{Deserialize, Serialize};

/// Error returned when a wire name does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lifecycle tag for a shopping-list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Still to be picked up.
    #[default]
    Required,
    /// In the trolley.
    Bought,
    /// Looked for and not in stock.
    Unavailable,
}

impl EntryStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Required, Self::Bought, Self::Unavailable];

    /// Whether the entry no longer needs attention in the store.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Bought | Self::Unavailable)
    }

    /// Wire name as stored by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Bought => "bought",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "required" => Ok(Self::Required),
            "bought" => Ok(Self::Bought),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(ParseError::new("entry status", s)),
        }
    }
}

/// Shelf the product sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShelfHeight {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl ShelfHeight {
    /// Wire name as stored by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for ShelfHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShelfHeight {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ParseError::new("shelf height", s)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_status_default_is_required() {
        assert_eq!(EntryStatus::default(), EntryStatus::Required);
    }

    #[test]
    fn test_entry_status_completed() {
        assert!(!EntryStatus::Required.is_completed());
        assert!(EntryStatus::Bought.is_completed());
        assert!(EntryStatus::Unavailable.is_completed());
    }

    #[test]
    fn test_entry_status_wire_names() {
        for status in EntryStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            assert_eq!(status.to_string().parse::<EntryStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_entry_status_parse_is_case_insensitive() {
        assert_eq!(
            " Bought ".parse::<EntryStatus>().unwrap(),
            EntryStatus::Bought
        );
        let err = "lost".parse::<EntryStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid entry status: lost");
    }

    #[test]
    fn test_shelf_height_parse() {
        assert_eq!("top".parse::<ShelfHeight>().unwrap(), ShelfHeight::Top);
        assert_eq!(
            serde_json::from_str::<ShelfHeight>("\"bottom\"").unwrap(),
            ShelfHeight::Bottom
        );
        assert!("floor".parse::<ShelfHeight>().is_err());
    }
}
