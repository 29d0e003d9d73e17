use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use super::assembler::{AssembledCatalog, CatalogAssembler};
use super::image_audit::ImageAudit;
use super::repository::Repository;
use super::serializer::TypeScriptModule;
use super::settings::EmitterSettings;
use super::validator::CatalogValidator;

pub enum Destination {
    Stdout,
    File(PathBuf),
}

pub struct EmitPipeline<'a> {
    repository: Repository<'a>,
    settings: EmitterSettings,
}

impl<'a> EmitPipeline<'a> {

    pub const fn new(repository: Repository<'a>, settings: EmitterSettings) -> Self {
        Self { repository, settings }
    }

    /// Assembles and validates without rendering.
    pub fn assemble_validated(&self) -> Result<AssembledCatalog> {
        let assembled = CatalogAssembler::new(self.repository, &self.settings).assemble();
        let summary = CatalogValidator::new(self.repository)
            .validate(&assembled)
            .context("Catalog validation failed")?;

        if summary.products_per_category.is_empty() {
            warn!("catalog has no product groups");
        }

        info!(
            products = summary.product_count,
            categories = summary.products_per_category.len(),
            reviews = summary.review_count,
            "catalog assembled"
        );

        Ok(assembled)
    }

    pub fn render(&self) -> Result<String> {
        let assembled = self.assemble_validated()?;
        TypeScriptModule::new(&self.settings.types_module).render(&assembled)
    }

    pub fn generate(&self, destination: &Destination) -> Result<()> {
        let module = self.render()?;

        match destination {
            Destination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(module.as_bytes())
                    .and_then(|()| stdout.flush())
                    .context("Failed to write module to standard output")?;
                info!(bytes = module.len(), "module written to standard output");
            }
            Destination::File(path) => {
                std::fs::write(path, &module)
                    .with_context(|| format!("Failed to write module to {}", path.display()))?;
                info!(bytes = module.len(), path = %path.display(), "module written");
            }
        }

        Ok(())
    }

    pub fn audit_images(&self, image_dir: &Path) -> Result<()> {
        let assembled = self.assemble_validated()?;
        let audit = ImageAudit::run(&assembled, image_dir)?;

        print!("{audit}");

        if !audit.is_complete() {
            bail!(
                "{missing} image(s) missing from {dir}",
                missing = audit.missing.len(),
                dir = image_dir.display()
            );
        }

        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::APP_CATALOG;
    use crate::models::{CategoryMetadata, ProductGroup, RawCatalog, RawProduct, SampleReview};
    use crate::validator::CatalogError;

    fn pipeline() -> EmitPipeline<'static> {
        EmitPipeline::new(Repository::new(&APP_CATALOG), EmitterSettings::default())
    }

    #[test]
    fn generating_twice_gives_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.ts");
        let second = dir.path().join("second.ts");

        pipeline().generate(&Destination::File(first.clone())).unwrap();
        pipeline().generate(&Destination::File(second.clone())).unwrap();

        let first = std::fs::read(first).unwrap();
        let second = std::fs::read(second).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn types_module_override_reaches_the_import() {
        let settings = EmitterSettings::default().with_types_module(Some("../types".to_string()));
        let module = EmitPipeline::new(Repository::new(&APP_CATALOG), settings).render().unwrap();
        assert!(module.starts_with("import { Product, Category, Review } from '../types';"));
    }

    #[test]
    fn audit_fails_on_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let error = pipeline().audit_images(dir.path()).unwrap_err();
        assert!(error.to_string().contains("image(s) missing"));
    }

    #[test]
    fn inconsistent_catalog_writes_nothing() {
        static CATEGORIES: &[CategoryMetadata] = &[CategoryMetadata {
            id: "1",
            name: "Cheveux",
            slug: "cheveux",
            description: "Shampooings",
            sub_categories: None,
        }];
        static GROUPS: &[ProductGroup] = &[ProductGroup {
            category: "cheveux",
            products: &[RawProduct {
                name: "Elvive Color Vive",
                brand: "L'Oréal Paris",
                price: 8.99,
                description: "Shampooing couleur",
                sub_category: None,
            }],
        }];
        static REVIEWS: &[SampleReview] = &[SampleReview {
            id: "1",
            product_id: "99",
            user_name: "Emma L.",
            rating: 4,
            comment: "Bien",
            date: "2024-02-03",
            verified: false,
        }];
        static CATALOG: RawCatalog = RawCatalog {
            categories: CATEGORIES,
            groups: GROUPS,
            reviews: REVIEWS,
            categories_map: phf::phf_map! { "cheveux" => 0usize },
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.ts");
        let pipeline = EmitPipeline::new(Repository::new(&CATALOG), EmitterSettings::default());

        let error = pipeline.generate(&Destination::File(path.clone())).unwrap_err();

        assert!(!path.exists());
        assert_eq!(
            error.downcast_ref::<CatalogError>(),
            Some(&CatalogError::UnknownReviewProduct {
                review_id: "1".to_string(),
                product_id: "99".to_string(),
            })
        );
    }
}
