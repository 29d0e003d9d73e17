mod category;
mod product;
mod review;
mod catalog;

pub use self::category::{CategoryMetadata, EmittedCategory};
pub use self::product::{EmittedProduct, ProductGroup, RawProduct};
pub use self::review::SampleReview;
pub use self::catalog::RawCatalog;
