use std::collections::HashSet;

use thiserror::Error;
use tracing::info;

use super::assembler::AssembledCatalog;
use super::ordered_map::OrderedMap;
use super::repository::Repository;

/// Inconsistencies that must stop generation before anything is written.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("product {product_id} ('{product}') uses category '{category}' which has no category metadata")]
    UnknownCategory {
        product_id: String,
        product: String,
        category: String,
    },

    #[error("category '{category}' has more than one product group")]
    DuplicateProductGroup { category: String },

    #[error("product {product_id} ('{product}') has invalid price {price}")]
    InvalidPrice {
        product_id: String,
        product: String,
        price: f64,
    },

    #[error("product id {product_id} is assigned more than once")]
    DuplicateProductId { product_id: String },

    #[error("category '{slug}' has metadata but no product uses it")]
    UnusedCategory { slug: String },

    #[error("review {review_id} references product {product_id} which does not exist")]
    UnknownReviewProduct {
        review_id: String,
        product_id: String,
    },

    #[error("review {review_id} has rating {rating}, expected 1 to 5")]
    InvalidReviewRating { review_id: String, rating: u8 },
}

/// Products per category key, in group declaration order.
#[derive(Debug)]
pub struct CatalogSummary {
    pub products_per_category: OrderedMap<&'static str, usize>,
    pub product_count: usize,
    pub review_count: usize,
}

pub struct CatalogValidator<'a> {
    repository: Repository<'a>,
}

impl<'a> CatalogValidator<'a> {

    pub const fn new(repository: Repository<'a>) -> Self {
        Self { repository }
    }

    pub fn validate(&self, assembled: &AssembledCatalog) -> Result<CatalogSummary, CatalogError> {
        let products_per_category = self.tally_groups()?;
        self.check_products(assembled)?;
        Self::check_reviews(assembled)?;
        self.check_unused_categories(&products_per_category)?;

        let summary = CatalogSummary {
            products_per_category,
            product_count: assembled.products.len(),
            review_count: assembled.reviews.len(),
        };

        for (category, count) in summary.products_per_category.iter() {
            info!(category = *category, products = *count, "category validated");
        }

        Ok(summary)
    }

    fn tally_groups(&self) -> Result<OrderedMap<&'static str, usize>, CatalogError> {
        let mut tallies = OrderedMap::new();

        for group in self.repository.groups() {
            if tallies.insert(group.category, group.products.len()).is_some() {
                return Err(CatalogError::DuplicateProductGroup {
                    category: group.category.to_string(),
                });
            }
        }

        Ok(tallies)
    }

    fn check_products(&self, assembled: &AssembledCatalog) -> Result<(), CatalogError> {
        let mut seen_ids = HashSet::new();

        for product in &assembled.products {
            if self.repository.category(product.category).is_none() {
                return Err(CatalogError::UnknownCategory {
                    product_id: product.id.clone(),
                    product: product.name.to_string(),
                    category: product.category.to_string(),
                });
            }

            if !product.price.is_finite() || product.price <= 0.0 {
                return Err(CatalogError::InvalidPrice {
                    product_id: product.id.clone(),
                    product: product.name.to_string(),
                    price: product.price,
                });
            }

            if !seen_ids.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateProductId {
                    product_id: product.id.clone(),
                });
            }
        }

        Ok(())
    }

    fn check_reviews(assembled: &AssembledCatalog) -> Result<(), CatalogError> {
        let product_ids = assembled
            .products
            .iter()
            .map(|product| product.id.as_str())
            .collect::<HashSet<_>>();

        for review in assembled.reviews {
            if !product_ids.contains(review.product_id) {
                return Err(CatalogError::UnknownReviewProduct {
                    review_id: review.id.to_string(),
                    product_id: review.product_id.to_string(),
                });
            }

            if !(1..=5).contains(&review.rating) {
                return Err(CatalogError::InvalidReviewRating {
                    review_id: review.id.to_string(),
                    rating: review.rating,
                });
            }
        }

        Ok(())
    }

    fn check_unused_categories(&self, tallies: &OrderedMap<&'static str, usize>) -> Result<(), CatalogError> {
        for category in self.repository.categories() {
            if tallies.get(&category.slug).is_none_or(|count| *count == 0) {
                return Err(CatalogError::UnusedCategory {
                    slug: category.slug.to_string(),
                });
            }
        }

        Ok(())
    }

}
