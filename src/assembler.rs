use tracing::{debug, warn};

use super::derived_fields::DerivedFields;
use super::image_name;
use super::models::{EmittedCategory, EmittedProduct, RawProduct, SampleReview};
use super::repository::Repository;
use super::settings::EmitterSettings;

/// The three collections the storefront module declares, in output order.
#[derive(Debug, Clone)]
pub struct AssembledCatalog {
    pub categories: Vec<EmittedCategory>,
    pub products: Vec<EmittedProduct>,
    pub reviews: &'static [SampleReview],
}

pub struct CatalogAssembler<'a> {
    repository: Repository<'a>,
    settings: &'a EmitterSettings,
}

impl<'a> CatalogAssembler<'a> {

    pub const fn new(repository: Repository<'a>, settings: &'a EmitterSettings) -> Self {
        Self { repository, settings }
    }

    pub fn assemble(&self) -> AssembledCatalog {
        AssembledCatalog {
            categories: self.assemble_categories(),
            products: self.assemble_products(),
            reviews: self.repository.reviews(),
        }
    }

    fn assemble_categories(&self) -> Vec<EmittedCategory> {
        self.repository
            .categories()
            .iter()
            .map(|category| EmittedCategory {
                id: category.id,
                name: category.name,
                slug: category.slug,
                description: category.description,
                image: self.image_for(category.name),
                sub_categories: category.sub_categories,
            })
            .collect()
    }

    fn assemble_products(&self) -> Vec<EmittedProduct> {
        let mut products = Vec::with_capacity(self.repository.product_count());
        let mut position = 0;

        for group in self.repository.groups() {
            debug!(category = group.category, count = group.products.len(), "assembling group");

            for product in group.products {
                position += 1;
                products.push(self.emit_product(position, group.category, product));
            }
        }

        products
    }

    fn emit_product(&self, position: u32, category: &'static str, product: &RawProduct) -> EmittedProduct {
        let derived = DerivedFields::for_position(position);
        let badges = derived.badges(&self.settings.bestseller_badge);

        EmittedProduct {
            id: position.to_string(),
            name: product.name,
            description: product.description,
            long_description: self.settings.long_description(product.description),
            price: product.price,
            image: self.image_for(&format!("{} {}", product.name, product.brand)),
            category,
            sub_category: product.sub_category.unwrap_or_default(),
            brand: product.brand,
            rating: derived.rating,
            reviews_count: derived.reviews_count,
            in_stock: true,
            is_best_seller: derived.is_best_seller,
            badges,
        }
    }

    fn image_for(&self, display_name: &str) -> String {
        if image_name::image_stem(display_name).is_empty() {
            warn!(display_name, "image name is empty after sanitizing");
        }

        image_name::image_path(&self.settings.image_base, display_name)
    }

}
