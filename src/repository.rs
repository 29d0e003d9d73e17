use super::models::{CategoryMetadata, ProductGroup, RawCatalog, SampleReview};

#[derive(Clone, Copy)]
pub struct Repository<'a> {
    catalog: &'a RawCatalog
}

impl <'a> Repository <'a> {

    pub const fn new(catalog: &'a RawCatalog) -> Self {
        Self { catalog }
    }

    pub const fn categories(&self) -> &'static [CategoryMetadata] {
        self.catalog.categories
    }

    pub const fn groups(&self) -> &'static [ProductGroup] {
        self.catalog.groups
    }

    pub const fn reviews(&self) -> &'static [SampleReview] {
        self.catalog.reviews
    }

    pub fn category_index(&self, slug: &str) -> Option<usize> {
        self.catalog.categories_map.get(slug).copied()
    }

    pub fn category(&self, slug: &str) -> Option<&'static CategoryMetadata> {
        self.category_index(slug)
            .and_then(|index| self.catalog.categories.get(index))
    }

    pub fn product_count(&self) -> usize {
        self.groups()
            .iter()
            .map(|group| group.products.len())
            .sum()
    }

}
