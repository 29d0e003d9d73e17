use std::fmt::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::assembler::AssembledCatalog;
use super::models::EmittedProduct;

const INDENT: &str = "  ";

/// Renders an assembled catalog as the storefront's TypeScript data module.
pub struct TypeScriptModule<'a> {
    types_module: &'a str,
}

impl<'a> TypeScriptModule<'a> {

    pub const fn new(types_module: &'a str) -> Self {
        Self { types_module }
    }

    pub fn render(&self, catalog: &AssembledCatalog) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "import {{ Product, Category, Review }} from '{}';", self.types_module)?;
        writeln!(output)?;

        Self::write_declaration(&mut output, "categories", "Category", |output| {
            catalog.categories.iter().try_for_each(|category| Self::write_entry(output, category))
        })?;

        Self::write_declaration(&mut output, "products", "Product", |output| {
            Self::write_products(output, &catalog.products)
        })?;

        Self::write_declaration(&mut output, "reviews", "Review", |output| {
            catalog.reviews.iter().try_for_each(|review| Self::write_entry(output, review))
        })?;

        Ok(output)
    }

    fn write_declaration<F>(output: &mut String, name: &str, type_name: &str, write_entries: F) -> Result<()>
    where
        F: FnOnce(&mut String) -> Result<()>,
    {
        writeln!(output, "export const {name}: {type_name}[] = [")?;
        write_entries(output)?;
        writeln!(output, "];")?;
        writeln!(output)?;
        Ok(())
    }

    fn write_products(output: &mut String, products: &[EmittedProduct]) -> Result<()> {
        let mut current_category = None;

        for product in products {
            if current_category != Some(product.category) {
                writeln!(output, "{INDENT}// {}", Self::section_heading(product.category))?;
                current_category = Some(product.category);
            }
            Self::write_entry(output, product)?;
        }

        Ok(())
    }

    fn section_heading(category: &str) -> String {
        category.to_uppercase().replace('-', " ")
    }

    fn write_entry<T: Serialize>(output: &mut String, entry: &T) -> Result<()> {
        let literal = Self::object_literal(entry)?;
        let mut lines = literal.lines().peekable();

        while let Some(line) = lines.next() {
            let separator = if lines.peek().is_none() { "," } else { "" };
            writeln!(output, "{INDENT}{line}{separator}")?;
        }

        Ok(())
    }

    fn object_literal<T: Serialize>(entry: &T) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(INDENT.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);

        entry.serialize(&mut serializer)
            .context("Failed to serialize catalog entry")?;

        String::from_utf8(buffer).context("Serialized catalog entry is not valid UTF-8")
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::CatalogAssembler;
    use crate::constants::APP_CATALOG;
    use crate::models::{CategoryMetadata, ProductGroup, RawCatalog, RawProduct};
    use crate::repository::Repository;
    use crate::settings::EmitterSettings;

    fn render(catalog: &RawCatalog) -> String {
        let settings = EmitterSettings::default();
        let assembled = CatalogAssembler::new(Repository::new(catalog), &settings).assemble();
        TypeScriptModule::new(&settings.types_module).render(&assembled).unwrap()
    }

    #[test]
    fn declares_the_three_collections_in_order() {
        let output = render(&APP_CATALOG);

        assert!(output.starts_with("import { Product, Category, Review } from '@/types';\n"));
        let categories = output.find("export const categories: Category[] = [").unwrap();
        let products = output.find("export const products: Product[] = [").unwrap();
        let reviews = output.find("export const reviews: Review[] = [").unwrap();
        assert!(categories < products && products < reviews);
    }

    #[test]
    fn renders_first_product_with_wire_field_names() {
        let output = render(&APP_CATALOG);
        let expected = r#"export const products: Product[] = [
  // SOINS VISAGE
  {
    "id": "1",
    "name": "Buffet",
    "description": "Sérum multi-peptides pour réduire les signes de l'âge",
    "longDescription": "Sérum multi-peptides pour réduire les signes de l'âge. Produit de qualité professionnelle disponible aux Pays-Bas.",
    "price": 24.9,
    "image": "/image-products/buffet_the_ordinary.jpg",
    "category": "soins-visage",
    "subCategory": "Sérums",
    "brand": "The Ordinary",
    "rating": 4.1,
    "reviewsCount": 51,
    "inStock": true,
    "isBestSeller": false,
    "badges": []
  },
"#;
        assert!(output.contains(expected), "unexpected product rendering:\n{output}");
    }

    #[test]
    fn renders_category_sections_and_optional_sub_categories() {
        let output = render(&APP_CATALOG);

        for heading in ["// SOINS VISAGE", "// MAQUILLAGE", "// SOINS CORPS", "// CHEVEUX", "// PARFUMS", "// ACCESSOIRES"] {
            assert_eq!(output.matches(heading).count(), 1, "{heading} should appear once");
        }
        assert!(output.contains("\"subCategories\": [\n      \"Crèmes hydratantes\","));
        assert!(output.contains("\"badges\": [\n      \"Bestseller\"\n    ]"));
        assert!(output.contains("\"productId\": \"37\""));
        assert!(output.contains("\"verified\": true"));
    }

    #[test]
    fn escapes_quotes_in_free_text() {
        static CATEGORIES: &[CategoryMetadata] = &[CategoryMetadata {
            id: "1",
            name: "Maquillage",
            slug: "maquillage",
            description: "Le \"meilleur\" maquillage",
            sub_categories: None,
        }];
        static GROUPS: &[ProductGroup] = &[ProductGroup {
            category: "maquillage",
            products: &[RawProduct {
                name: "Rouge \"Intense\"",
                brand: "L'Oréal Paris",
                price: 25.0,
                description: "Chemin C:\\rouge",
                sub_category: None,
            }],
        }];
        let catalog = RawCatalog {
            categories: CATEGORIES,
            groups: GROUPS,
            reviews: &[],
            categories_map: phf::phf_map! { "maquillage" => 0usize },
        };

        let output = render(&catalog);
        assert!(output.contains(r#""name": "Rouge \"Intense\"","#));
        assert!(output.contains(r#""description": "Le \"meilleur\" maquillage","#));
        assert!(output.contains(r#""description": "Chemin C:\\rouge","#));
        assert!(output.contains(r#""brand": "L'Oréal Paris","#));
        assert!(output.contains("\"price\": 25.0,"));
        assert!(output.contains("export const reviews: Review[] = [\n];"));
    }

    #[test]
    fn section_heading_only_replaces_hyphens() {
        assert_eq!(TypeScriptModule::section_heading("soins-visage"), "SOINS VISAGE");
        assert_eq!(TypeScriptModule::section_heading("soins_visage"), "SOINS_VISAGE");
        assert_eq!(TypeScriptModule::section_heading("soinsVisage"), "SOINSVISAGE");
        assert_eq!(TypeScriptModule::section_heading("crèmes-2024"), "CRÈMES 2024");
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render(&APP_CATALOG), render(&APP_CATALOG));
    }
}
