use super::models::{CategoryMetadata, ProductGroup, RawCatalog, RawProduct, SampleReview};

pub const APP_CATALOG: RawCatalog = include!(concat!(env!("OUT_DIR"), "/catalog.rs"));
pub const APP_NAME: &str = env!("APP_NAME");
pub const APP_VERSION: &str = env!("APP_VERSION");
pub const APP_TITLE: &str = env!("APP_TITLE");
pub const APP_IMAGE_BASE: &str = env!("APP_IMAGE_BASE");
pub const APP_TYPES_MODULE: &str = env!("APP_TYPES_MODULE");
pub const APP_BESTSELLER_BADGE: &str = env!("APP_BESTSELLER_BADGE");
pub const APP_LONG_DESCRIPTION_SUFFIX: &str = env!("APP_LONG_DESCRIPTION_SUFFIX");
