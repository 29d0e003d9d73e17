use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::assembler::AssembledCatalog;
use super::image_name::fold_accents;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingImage {
    pub owner: String,
    pub file_name: String,
    /// Existing file whose name only differs by accent folding.
    pub accent_folded_match: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImageAudit {
    pub expected: usize,
    pub missing: Vec<MissingImage>,
    pub orphaned: Vec<String>,
}

impl ImageAudit {

    pub fn run(catalog: &AssembledCatalog, image_dir: &Path) -> Result<Self> {
        let present = Self::list_files(image_dir)?;
        let expected = Self::expected_files(catalog);

        let folded_present = present
            .iter()
            .map(|file_name| (fold_accents(file_name), file_name))
            .collect::<HashMap<_, _>>();

        let mut missing = Vec::new();
        for (file_name, owner) in &expected {
            if present.contains(file_name) {
                continue;
            }

            let accent_folded_match = folded_present
                .get(&fold_accents(file_name))
                .map(|candidate| (*candidate).clone());

            warn!(owner = %owner, file_name = %file_name, "image file is missing");
            missing.push(MissingImage {
                owner: owner.clone(),
                file_name: file_name.clone(),
                accent_folded_match,
            });
        }

        let referenced = expected.iter().map(|(file_name, _)| file_name).collect::<BTreeSet<_>>();
        let orphaned = present
            .iter()
            .filter(|file_name| !referenced.contains(file_name))
            .cloned()
            .collect::<Vec<_>>();

        debug!(present = present.len(), expected = expected.len(), "image audit complete");

        Ok(Self {
            expected: referenced.len(),
            missing,
            orphaned,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    fn list_files(image_dir: &Path) -> Result<BTreeSet<String>> {
        let entries = std::fs::read_dir(image_dir)
            .with_context(|| format!("Failed to read image directory {}", image_dir.display()))?;

        let mut files = BTreeSet::new();
        for entry in entries {
            let entry = entry.context("Failed to read image directory entry")?;
            if entry.file_type()?.is_file() {
                files.insert(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(files)
    }

    // First owner wins when two records share an image.
    fn expected_files(catalog: &AssembledCatalog) -> Vec<(String, String)> {
        let category_images = catalog
            .categories
            .iter()
            .map(|category| (&category.image, format!("category {}", category.slug)));

        let product_images = catalog
            .products
            .iter()
            .map(|product| (&product.image, format!("product {} ({})", product.id, product.name)));

        let mut seen = BTreeSet::new();
        category_images
            .chain(product_images)
            .filter_map(|(image, owner)| {
                let file_name = image.rsplit('/').next().unwrap_or(image).to_string();
                seen.insert(file_name.clone()).then_some((file_name, owner))
            })
            .collect()
    }

}

impl fmt::Display for ImageAudit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            formatter,
            "{expected} images expected, {missing} missing, {orphaned} orphaned",
            expected = self.expected,
            missing = self.missing.len(),
            orphaned = self.orphaned.len()
        )?;

        for image in &self.missing {
            match &image.accent_folded_match {
                Some(candidate) => writeln!(
                    formatter,
                    "missing  {file} for {owner} (found {candidate})",
                    file = image.file_name,
                    owner = image.owner
                )?,
                None => writeln!(
                    formatter,
                    "missing  {file} for {owner}",
                    file = image.file_name,
                    owner = image.owner
                )?,
            }
        }

        for file_name in &self.orphaned {
            writeln!(formatter, "orphaned {file_name}")?;
        }

        Ok(())
    }
}
