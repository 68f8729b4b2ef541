//! Shopping list data model.
//!
//! These structs mirror the backend's joined row shape: a list carries its
//! entries, each entry may carry its product, and each product may carry its
//! store section. Any join can be missing in a snapshot, so every accessor the
//! composition pipeline relies on falls back to a documented default instead
//! of failing.
//!
//! Field names on the wire follow the backend tables (`weekly_shops`,
//! `weekly_shop_items`, `products`, `store_locations`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{EntryId, EntryStatus, ListId, Price, ProductId, Quantity, SectionId, ShelfHeight};

/// Section name used for entries whose product or section did not resolve.
pub const UNSECTIONED: &str = "Other";

/// A physical area of the store, such as an aisle or counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSection {
    pub id: SectionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Walking order of the section through the store.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequence_number: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoreSection {
    /// Create a section with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>, sequence_number: i32) -> Self {
        Self {
            id: SectionId::new_v4(),
            name: name.into(),
            sequence_number,
            created_at: None,
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Alternative names used when searching the catalog.
    #[serde(default, deserialize_with = "null_as_default")]
    pub aliases: Vec<String>,
    #[serde(rename = "store_location_id", alias = "section_id")]
    pub section_id: SectionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shelf_height: ShelfHeight,
    /// Position of the product inside its section.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequence_number: i32,
    #[serde(default)]
    pub typical_price: Option<Price>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    /// Quantity used when the product is added to a list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Joined section row, if the backend resolved it.
    #[serde(
        default,
        rename = "location",
        alias = "section",
        skip_serializing_if = "Option::is_none"
    )]
    pub section: Option<StoreSection>,
}

impl Product {
    /// Create a product placed in the given section, joined to it.
    #[must_use]
    pub fn new(name: impl Into<String>, section: &StoreSection) -> Self {
        Self {
            section: Some(section.clone()),
            ..Self::unjoined(name, section.id)
        }
    }

    /// Create a product that references a section without carrying the join.
    #[must_use]
    pub fn unjoined(name: impl Into<String>, section_id: SectionId) -> Self {
        Self {
            id: ProductId::new_v4(),
            name: name.into(),
            aliases: Vec::new(),
            section_id,
            shelf_height: ShelfHeight::default(),
            sequence_number: 0,
            typical_price: None,
            notes: None,
            product_url: None,
            image_url: None,
            barcode: None,
            default_quantity: Quantity::ONE,
            created_at: None,
            section: None,
        }
    }

    /// Set the in-section sequence number.
    #[must_use]
    pub const fn with_sequence(mut self, sequence_number: i32) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    /// Set the quantity used when adding the product to a list.
    #[must_use]
    pub const fn with_default_quantity(mut self, quantity: Quantity) -> Self {
        self.default_quantity = quantity;
        self
    }

    /// Whether `term` (already lowercased) matches the name or any alias.
    pub(crate) fn matches_lowercase(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(term))
    }
}

/// One line on a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    pub id: EntryId,
    #[serde(rename = "weekly_shop_id", alias = "list_id")]
    pub list_id: ListId,
    pub product_id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: Quantity,
    /// Highest price the shopper is willing to pay.
    #[serde(default)]
    pub max_price: Option<Price>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Joined product row, if the backend resolved it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl ShoppingListEntry {
    /// Create a `required` entry for `product` at its default quantity.
    #[must_use]
    pub fn for_product(list_id: ListId, product: &Product) -> Self {
        Self {
            id: EntryId::new_v4(),
            list_id,
            product_id: product.id,
            quantity: product.default_quantity,
            max_price: None,
            notes: None,
            status: EntryStatus::Required,
            created_at: None,
            product: Some(product.clone()),
        }
    }

    /// Set the status.
    #[must_use]
    pub const fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// The joined section, if both joins resolved.
    #[must_use]
    pub fn section(&self) -> Option<&StoreSection> {
        self.product.as_ref()?.section.as_ref()
    }

    /// Product display name, or `""` when the product did not resolve.
    #[must_use]
    pub fn product_name(&self) -> &str {
        self.product.as_ref().map_or("", |p| p.name.as_str())
    }

    /// Section display name, or [`UNSECTIONED`] when it did not resolve or
    /// is blank.
    #[must_use]
    pub fn section_name(&self) -> &str {
        self.section()
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNSECTIONED)
    }

    /// Section walking order, `0` when unresolved.
    #[must_use]
    pub fn section_sequence(&self) -> i32 {
        self.section().map_or(0, |s| s.sequence_number)
    }

    /// In-section product order, `0` when unresolved.
    #[must_use]
    pub fn product_sequence(&self) -> i32 {
        self.product.as_ref().map_or(0, |p| p.sequence_number)
    }
}

impl AsRef<Self> for ShoppingListEntry {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// A point-in-time copy of one shopping list and all of its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: ListId,
    /// The day the shop is planned for.
    #[serde(rename = "shop_date", alias = "date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Entries in backend fetch order.
    #[serde(rename = "items", alias = "entries", default, deserialize_with = "null_as_default")]
    pub entries: Vec<ShoppingListEntry>,
}

impl ShoppingList {
    /// Create an empty list for `date`.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: ListId::new_v4(),
            date,
            created_at: None,
            entries: Vec::new(),
        }
    }

    /// Look up an entry by ID.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&ShoppingListEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Parse a snapshot from the backend's JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a required column is
    /// missing.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Read a nullable column, mapping `null` to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a001",
        "shop_date": "2024-03-09",
        "created_at": "2024-03-08T19:12:00Z",
        "items": [
            {
                "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a101",
                "weekly_shop_id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a001",
                "product_id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a201",
                "quantity": 2,
                "max_price": 1.2,
                "notes": null,
                "status": "required",
                "created_at": "2024-03-08T19:13:00Z",
                "product": {
                    "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a201",
                    "name": "Milk",
                    "store_location_id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a301",
                    "shelf_height": "bottom",
                    "typical_price": 1.15,
                    "notes": "Semi-skimmed",
                    "sequence_number": 4,
                    "created_at": "2024-01-01T00:00:00Z",
                    "product_url": null,
                    "image_url": null,
                    "barcode": "5000128000000",
                    "default_quantity": 1,
                    "aliases": null,
                    "location": {
                        "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a301",
                        "name": "Dairy",
                        "sequence_number": 7,
                        "created_at": "2024-01-01T00:00:00Z"
                    }
                }
            },
            {
                "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a102",
                "weekly_shop_id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a001",
                "product_id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a202",
                "quantity": 0,
                "status": "unavailable",
                "product": null
            }
        ]
    }"#;

    #[test]
    fn test_parse_backend_snapshot() {
        let list = ShoppingList::from_json(SNAPSHOT).unwrap();
        assert_eq!(list.date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(list.entries.len(), 2);

        let milk = &list.entries[0];
        assert_eq!(milk.product_name(), "Milk");
        assert_eq!(milk.section_name(), "Dairy");
        assert_eq!(milk.section_sequence(), 7);
        assert_eq!(milk.product_sequence(), 4);
        assert_eq!(milk.quantity.get(), 2);
        assert_eq!(milk.max_price, Some(Price::from_cents(120)));
        let product = milk.product.as_ref().unwrap();
        assert!(product.aliases.is_empty());
        assert_eq!(product.shelf_height, ShelfHeight::Bottom);
    }

    #[test]
    fn test_missing_join_defaults() {
        let list = ShoppingList::from_json(SNAPSHOT).unwrap();
        let orphan = &list.entries[1];
        assert_eq!(orphan.product_name(), "");
        assert_eq!(orphan.section_name(), UNSECTIONED);
        assert_eq!(orphan.section_sequence(), 0);
        assert_eq!(orphan.product_sequence(), 0);
        assert_eq!(orphan.quantity, Quantity::ONE);
        assert_eq!(orphan.status, EntryStatus::Unavailable);
    }

    #[test]
    fn test_product_without_section_join() {
        let product = Product::unjoined("Bread", SectionId::new_v4()).with_sequence(3);
        let entry = ShoppingListEntry::for_product(ListId::new_v4(), &product);
        assert_eq!(entry.product_name(), "Bread");
        assert_eq!(entry.section_name(), UNSECTIONED);
        assert_eq!(entry.section_sequence(), 0);
        assert_eq!(entry.product_sequence(), 3);
    }

    #[test]
    fn test_serialize_keeps_backend_names() {
        let list = ShoppingList::from_json(SNAPSHOT).unwrap();
        let value = serde_json::to_value(&list).unwrap();
        assert!(value.get("shop_date").is_some());
        assert!(value["items"][0].get("weekly_shop_id").is_some());
        assert!(value["items"][0]["product"].get("location").is_some());

        let reparsed: ShoppingList = serde_json::from_value(value).unwrap();
        assert_eq!(reparsed, list);
    }

    #[test]
    fn test_null_columns_default() {
        let list = ShoppingList::from_json(
            r#"{
                "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a001",
                "shop_date": "2024-03-09",
                "items": [{
                    "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a101",
                    "weekly_shop_id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a001",
                    "product_id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a201",
                    "quantity": null,
                    "status": null,
                    "product": {
                        "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a201",
                        "name": null,
                        "store_location_id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a301",
                        "shelf_height": null,
                        "sequence_number": null,
                        "default_quantity": null,
                        "location": {
                            "id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a301",
                            "name": null,
                            "sequence_number": null
                        }
                    }
                }]
            }"#,
        )
        .unwrap();

        let entry = &list.entries[0];
        assert_eq!(entry.product_name(), "");
        assert_eq!(entry.product_sequence(), 0);
        assert_eq!(entry.section_name(), UNSECTIONED);
        assert_eq!(entry.section_sequence(), 0);
        assert_eq!(entry.quantity, Quantity::ONE);
        assert_eq!(entry.status, EntryStatus::Required);
        let product = entry.product.as_ref().unwrap();
        assert_eq!(product.shelf_height, ShelfHeight::default());
        assert_eq!(product.default_quantity, Quantity::ONE);
    }

    #[test]
    fn test_missing_items_is_empty_list() {
        let list = ShoppingList::from_json(
            r#"{"id": "0b1d6a53-3a1c-4c8e-8d36-2b7ad6f0a001", "shop_date": "2024-03-09", "items": null}"#,
        )
        .unwrap();
        assert!(list.entries.is_empty());
    }
}
