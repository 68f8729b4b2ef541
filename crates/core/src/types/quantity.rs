//! Requested quantity of a list entry.

use serde::{Deserialize, Serialize};

/// A requested quantity, always at least one.
///
/// Every way of producing a `Quantity` clamps instead of failing: a backend
/// row carrying `0` or a negative number becomes `1`, and decrementing past
/// one stays at one.
///
/// ```
/// use trolley_core::Quantity;
///
/// let one = Quantity::ONE;
/// assert_eq!(one.adjust(-1), Quantity::ONE);
/// assert_eq!(one.adjust(2).get(), 3);
/// assert_eq!(Quantity::clamped(-4), Quantity::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(#[serde(deserialize_with = "deserialize_clamped")] u32);

impl Quantity {
    /// The smallest quantity.
    pub const ONE: Self = Self(1);

    /// Build a quantity from any integer, clamping into `1..=u32::MAX`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        Self(u32::try_from(value.max(1)).unwrap_or(u32::MAX))
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Apply a signed change, never dropping below one.
    #[must_use]
    pub fn adjust(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }

    /// Add another quantity, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

fn deserialize_clamped<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(Quantity::clamped(raw).0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_at_one_stays_one() {
        assert_eq!(Quantity::ONE.adjust(-1), Quantity::ONE);
        assert_eq!(Quantity::clamped(3).adjust(-10), Quantity::ONE);
    }

    #[test]
    fn test_increment() {
        assert_eq!(Quantity::clamped(2).adjust(1).get(), 3);
    }

    #[test]
    fn test_saturates_high() {
        let max = Quantity::clamped(i64::MAX);
        assert_eq!(max.get(), u32::MAX);
        assert_eq!(max.adjust(1).get(), u32::MAX);
    }

    #[test]
    fn test_deserialize_clamps_non_positive() {
        let zero: Quantity = serde_json::from_str("0").unwrap();
        let negative: Quantity = serde_json::from_str("-3").unwrap();
        let four: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(zero, Quantity::ONE);
        assert_eq!(negative, Quantity::ONE);
        assert_eq!(four.get(), 4);
        assert_eq!(serde_json::to_string(&four).unwrap(), "4");
    }
}
