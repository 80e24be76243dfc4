// demos/storefront_app/src/catalog.rs

//! In-memory facet filtering over the product listing.
//!
//! The catalog is small (hundreds of one-off thrift listings), so the list
//! endpoint fetches the unsold rows and narrows them here rather than
//! assembling SQL per facet combination.

use crate::models::Product;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
  /// Case-insensitive substring match over title, brand and description.
  pub search: Option<String>,
  pub sex: Option<String>,
  pub category: Option<String>,
  pub size: Option<String>,
  pub condition: Option<String>,
  pub max_price_cents: Option<i32>,
}

impl ProductFilter {
  pub fn matches(&self, product: &Product) -> bool {
    if let Some(search) = &self.search {
      let needle = search.to_lowercase();
      if !needle.is_empty() {
        let mut haystacks = vec![product.title.to_lowercase(), product.brand.to_lowercase()];
        if let Some(description) = &product.description {
          haystacks.push(description.to_lowercase());
        }
        if !haystacks.iter().any(|h| h.contains(&needle)) {
          return false;
        }
      }
    }
    if let Some(sex) = &self.sex {
      if product.sex.as_deref() != Some(sex.as_str()) {
        return false;
      }
    }
    if let Some(category) = &self.category {
      if product.category.as_deref() != Some(category.as_str()) {
        return false;
      }
    }
    if let Some(size) = &self.size {
      if !product.size.eq_ignore_ascii_case(size) {
        return false;
      }
    }
    if let Some(condition) = &self.condition {
      if !product.condition.eq_ignore_ascii_case(condition) {
        return false;
      }
    }
    if let Some(max) = self.max_price_cents {
      if product.price_cents > max {
        return false;
      }
    }
    true
  }

  pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(|p| self.matches(p)).collect()
  }
}
