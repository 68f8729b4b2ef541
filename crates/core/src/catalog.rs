//! Product and section catalog maintenance.
//!
//! The catalog is the administrator's view of the store: the sections in
//! walking order and the products placed in them. Drafts are what an edit
//! form submits; validating a draft against the catalog produces the row
//! that would be written to the backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::{Product, ShoppingList, StoreSection};
use crate::ordering::collate;
use crate::types::{Price, ProductId, Quantity, SectionId, ShelfHeight};

/// Errors from catalog maintenance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{0} name cannot be empty")]
    EmptyName(&'static str),

    #[error("unknown section: {0}")]
    UnknownSection(SectionId),

    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("invalid {field}: {reason}")]
    InvalidUrl {
        field: &'static str,
        reason: String,
    },

    #[error("section {section} still holds {products} product(s)")]
    SectionInUse { section: SectionId, products: usize },
}

/// All sections and products of one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub sections: Vec<StoreSection>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    /// Sections in walking order.
    #[must_use]
    pub fn sections_in_order(&self) -> Vec<&StoreSection> {
        let mut sections: Vec<&StoreSection> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.sequence_number);
        sections
    }

    /// Products in name order.
    #[must_use]
    pub fn products_by_name(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        products.sort_by(|a, b| collate(&a.name, &b.name));
        products
    }

    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&StoreSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// A copy of the product with its section attached.
    #[must_use]
    pub fn joined_product(&self, id: ProductId) -> Option<Product> {
        self.product(id).cloned().map(|p| self.with_section(p))
    }

    /// Products of one section in shelf order.
    #[must_use]
    pub fn products_in_section(&self, id: SectionId) -> Vec<&Product> {
        let mut products: Vec<&Product> =
            self.products.iter().filter(|p| p.section_id == id).collect();
        products.sort_by_key(|p| p.sequence_number);
        products
    }

    /// Products whose name or an alias contains `term`, ignoring case.
    ///
    /// A blank term matches nothing.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        self.products_by_name()
            .into_iter()
            .filter(|p| p.matches_lowercase(&term))
            .collect()
    }

    /// Sequence number proposed for a new section.
    #[must_use]
    pub fn next_section_sequence(&self) -> i32 {
        i32::try_from(self.sections.len())
            .unwrap_or(i32::MAX)
            .saturating_add(1)
    }

    /// Fill in missing product and section joins on a snapshot.
    ///
    /// Returns the number of entries that changed.
    pub fn join(&self, list: &mut ShoppingList) -> usize {
        let mut joined = 0;
        for entry in &mut list.entries {
            if let Some(product) = entry.product.as_mut() {
                if product.section.is_none() {
                    if let Some(section) = self.section(product.section_id) {
                        product.section = Some(section.clone());
                        joined += 1;
                    }
                }
            } else if let Some(product) = self.joined_product(entry.product_id) {
                entry.product = Some(product);
                joined += 1;
            }
        }
        tracing::debug!(list_id = %list.id, joined, "joined snapshot against catalog");
        joined
    }

    /// Validate and add a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft fails validation.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<ProductId, CatalogError> {
        let product = draft.validate(self)?;
        let id = product.id;
        self.products.push(product);
        Ok(id)
    }

    /// Validate a draft and replace an existing product with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the draft fails
    /// validation.
    pub fn update_product(
        &mut self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<(), CatalogError> {
        let mut product = draft.validate(self)?;
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::UnknownProduct(id))?;
        product.id = id;
        product.created_at = slot.created_at;
        *slot = product;
        Ok(())
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if it does not exist.
    pub fn remove_product(&mut self, id: ProductId) -> Result<Product, CatalogError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::UnknownProduct(id))?;
        Ok(self.products.remove(index))
    }

    /// Validate and add a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft fails validation.
    pub fn add_section(&mut self, draft: SectionDraft) -> Result<SectionId, CatalogError> {
        let section = draft.validate(self)?;
        let id = section.id;
        self.sections.push(section);
        Ok(id)
    }

    /// Rename or move a section, refreshing the joins of its products.
    ///
    /// # Errors
    ///
    /// Returns an error if the section does not exist or the draft fails
    /// validation.
    pub fn update_section(&mut self, id: SectionId, draft: SectionDraft) -> Result<(), CatalogError> {
        let mut section = draft.validate(self)?;
        let slot = self
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(CatalogError::UnknownSection(id))?;
        section.id = id;
        section.created_at = slot.created_at;
        slot.clone_from(&section);

        for product in self.products.iter_mut().filter(|p| p.section_id == id) {
            product.section = Some(section.clone());
        }
        Ok(())
    }

    /// Remove an empty section.
    ///
    /// # Errors
    ///
    /// Returns an error if the section does not exist or still has products.
    pub fn remove_section(&mut self, id: SectionId) -> Result<StoreSection, CatalogError> {
        let index = self
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(CatalogError::UnknownSection(id))?;
        let products = self.products.iter().filter(|p| p.section_id == id).count();
        if products > 0 {
            return Err(CatalogError::SectionInUse {
                section: id,
                products,
            });
        }
        Ok(self.sections.remove(index))
    }

    fn with_section(&self, mut product: Product) -> Product {
        if product.section.is_none() {
            product.section = self.section(product.section_id).cloned();
        }
        product
    }
}

/// Split a comma-separated alias field into trimmed, non-empty aliases.
#[must_use]
pub fn parse_aliases(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(String::from)
        .collect()
}

/// A product as submitted from an edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    /// Comma-separated aliases.
    #[serde(default)]
    pub aliases: String,
    pub section_id: SectionId,
    #[serde(default)]
    pub shelf_height: ShelfHeight,
    #[serde(default)]
    pub typical_price: Option<Price>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sequence_number: Option<i32>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub default_quantity: Option<i64>,
}

impl ProductDraft {
    /// Check the draft against `catalog` and build the product row.
    ///
    /// Blank optional fields become `None`, a missing sequence number becomes
    /// `0` and a missing or non-positive default quantity becomes `1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the section is unknown, or a
    /// URL is not absolute.
    pub fn validate(self, catalog: &Catalog) -> Result<Product, CatalogError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName("product"));
        }
        let section = catalog
            .section(self.section_id)
            .ok_or(CatalogError::UnknownSection(self.section_id))?;

        let product_url = validate_url("product URL", self.product_url)?;
        let image_url = validate_url("image URL", self.image_url)?;
        tracing::trace!(name, section = %section.name, "validated product draft");

        let mut product = Product::new(name, section)
            .with_sequence(self.sequence_number.unwrap_or(0))
            .with_default_quantity(Quantity::clamped(self.default_quantity.unwrap_or(1)));
        product.aliases = parse_aliases(&self.aliases);
        product.shelf_height = self.shelf_height;
        product.typical_price = self.typical_price;
        product.notes = non_blank(self.notes);
        product.barcode = non_blank(self.barcode);
        product.product_url = product_url;
        product.image_url = image_url;
        Ok(product)
    }
}

/// A section as submitted from an edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDraft {
    pub name: String,
    #[serde(default)]
    pub sequence_number: Option<i32>,
}

impl SectionDraft {
    /// Check the draft and build the section row.
    ///
    /// A missing sequence number places the section after all existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] if the name is blank.
    pub fn validate(self, catalog: &Catalog) -> Result<StoreSection, CatalogError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName("section"));
        }
        let sequence = self
            .sequence_number
            .unwrap_or_else(|| catalog.next_section_sequence());
        Ok(StoreSection::new(name, sequence))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(field: &'static str, value: Option<String>) -> Result<Option<String>, CatalogError> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    let url = Url::parse(&raw).map_err(|e| CatalogError::InvalidUrl {
        field,
        reason: e.to_string(),
    })?;
    Ok(Some(url.to_string()))
}
