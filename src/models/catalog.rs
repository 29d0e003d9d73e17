use super::category::CategoryMetadata;
use super::product::ProductGroup;
use super::review::SampleReview;

#[derive(Debug)]
pub struct RawCatalog {
    pub categories: &'static [CategoryMetadata],
    pub groups: &'static [ProductGroup],
    pub reviews: &'static [SampleReview],
    pub categories_map: phf::Map<&'static str, usize>,
}
