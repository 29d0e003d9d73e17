use std::collections::HashMap;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use phf_codegen::Map;

const MANIFEST_TOML: &str = include_str!("Cargo.toml");
const CATALOG_TOML: &str = include_str!("resources/catalog.toml");

// ===== BUILD CONFIGURATION =====

struct BuildConfiguration {
    catalog_file: PathBuf,
}

impl BuildConfiguration {
    fn new() -> Result<Self> {
        let output_dir = PathBuf::from(
            std::env::var("OUT_DIR").context("OUT_DIR is not set")?
        );
        let catalog_file = output_dir.join("catalog.rs");

        Ok(Self { catalog_file })
    }
}

// ===== TOML HELPERS =====

struct TomlReader;

impl TomlReader {
    fn table<'a>(value: &'a toml::Value, context: &str) -> Result<&'a toml::Table> {
        value.as_table()
            .context(format!("{context} is not a table"))
    }

    fn string(value: &toml::Value, key: &str, context: &str) -> Result<String> {
        value.get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .context(format!("Key '{key}' in {context} is missing or not a string"))
    }

    fn optional_string(value: &toml::Value, key: &str, context: &str) -> Result<Option<String>> {
        match value.get(key) {
            None => Ok(None),
            Some(_) => Self::string(value, key, context).map(Some),
        }
    }

    fn float(value: &toml::Value, key: &str, context: &str) -> Result<f64> {
        let entry = value.get(key)
            .context(format!("Key '{key}' in {context} is missing"))?;

        match entry {
            toml::Value::Float(number) => Ok(*number),
            #[allow(clippy::cast_precision_loss)]
            toml::Value::Integer(number) => Ok(*number as f64),
            _ => bail!("Key '{key}' in {context} is not a number"),
        }
    }

    fn integer(value: &toml::Value, key: &str, context: &str) -> Result<i64> {
        value.get(key)
            .and_then(|v| v.as_integer())
            .context(format!("Key '{key}' in {context} is missing or not an integer"))
    }

    fn boolean(value: &toml::Value, key: &str, context: &str) -> Result<bool> {
        value.get(key)
            .and_then(|v| v.as_bool())
            .context(format!("Key '{key}' in {context} is missing or not a boolean"))
    }

    fn array<'a>(value: &'a toml::Value, key: &str, context: &str) -> Result<&'a Vec<toml::Value>> {
        value.get(key)
            .context(format!("Missing key '{key}' in {context}"))?
            .as_array()
            .context(format!("Key '{key}' in {context} is not an array"))
    }

    fn string_array(value: &toml::Value, key: &str, context: &str) -> Result<Vec<String>> {
        Self::array(value, key, context)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str()
                    .map(|s| s.to_string())
                    .context(format!("Element at index {i} in key '{key}' of {context} is not a string"))
            })
            .collect()
    }

    fn optional_string_array(value: &toml::Value, key: &str, context: &str) -> Result<Option<Vec<String>>> {
        match value.get(key) {
            None => Ok(None),
            Some(_) => Self::string_array(value, key, context).map(Some),
        }
    }
}

// ===== APPLICATION METADATA =====

struct ApplicationMetadata {
    name: &'static str,
    version: &'static str,
    title: String,
    image_base: String,
    types_module: String,
    bestseller_badge: String,
    long_description_suffix: String,
}

impl ApplicationMetadata {
    fn extract_from_cargo() -> Result<Self> {
        let name = env!("CARGO_PKG_NAME");
        let version = env!("CARGO_PKG_VERSION");

        let manifest: toml::Value = toml::from_str(MANIFEST_TOML)
            .context("Failed to parse Cargo.toml")?;

        let package = manifest.get("package")
            .context("Missing [package] section in Cargo.toml")?;

        let metadata = package.get("metadata")
            .context("Missing [package.metadata] section in Cargo.toml")?;

        let context = "[package.metadata]";

        Ok(Self {
            name,
            version,
            title: TomlReader::string(metadata, "title", context)?,
            image_base: TomlReader::string(metadata, "image_base", context)?,
            types_module: TomlReader::string(metadata, "types_module", context)?,
            bestseller_badge: TomlReader::string(metadata, "bestseller_badge", context)?,
            long_description_suffix: TomlReader::string(metadata, "long_description_suffix", context)?,
        })
    }
}

// ===== CATALOG SOURCE =====

struct CategoryEntry {
    id: String,
    name: String,
    slug: String,
    description: String,
    sub_categories: Option<Vec<String>>,
}

struct ProductEntry {
    name: String,
    brand: String,
    price: f64,
    description: String,
    sub_category: Option<String>,
}

struct GroupEntry {
    category: String,
    products: Vec<ProductEntry>,
}

struct ReviewEntry {
    id: String,
    product_id: String,
    user_name: String,
    rating: u8,
    comment: String,
    date: String,
    verified: bool,
}

struct CatalogSource {
    categories: Vec<CategoryEntry>,
    groups: Vec<GroupEntry>,
    reviews: Vec<ReviewEntry>,
}

// ===== CATALOG SOURCE READER =====

struct CatalogSourceReader;

impl CatalogSourceReader {
    fn read_catalog_source() -> Result<CatalogSource> {
        let document: toml::Value = toml::from_str(CATALOG_TOML)
            .context("Failed to parse resources/catalog.toml")?;

        TomlReader::table(&document, "catalog document")?;

        let categories = TomlReader::array(&document, "categories", "catalog")?
            .iter()
            .enumerate()
            .map(|(index, value)| Self::read_category(index, value))
            .collect::<Result<Vec<_>>>()?;

        let groups = TomlReader::array(&document, "groups", "catalog")?
            .iter()
            .enumerate()
            .map(|(index, value)| Self::read_group(index, value))
            .collect::<Result<Vec<_>>>()?;

        let reviews = match document.get("reviews") {
            None => Vec::new(),
            Some(_) => TomlReader::array(&document, "reviews", "catalog")?
                .iter()
                .enumerate()
                .map(|(index, value)| Self::read_review(index, value))
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(CatalogSource { categories, groups, reviews })
    }

    fn read_category(index: usize, value: &toml::Value) -> Result<CategoryEntry> {
        let context = format!("categories[{index}]");
        TomlReader::table(value, &context)?;

        Ok(CategoryEntry {
            id: TomlReader::string(value, "id", &context)?,
            name: TomlReader::string(value, "name", &context)?,
            slug: TomlReader::string(value, "slug", &context)?,
            description: TomlReader::string(value, "description", &context)?,
            sub_categories: TomlReader::optional_string_array(value, "sub_categories", &context)?,
        })
    }

    fn read_group(index: usize, value: &toml::Value) -> Result<GroupEntry> {
        let context = format!("groups[{index}]");
        TomlReader::table(value, &context)?;

        let category = TomlReader::string(value, "category", &context)?;
        let products = TomlReader::array(value, "products", &context)?
            .iter()
            .enumerate()
            .map(|(product_index, product)| {
                Self::read_product(&format!("{context}.products[{product_index}]"), product)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(GroupEntry { category, products })
    }

    fn read_product(context: &str, value: &toml::Value) -> Result<ProductEntry> {
        TomlReader::table(value, context)?;

        Ok(ProductEntry {
            name: TomlReader::string(value, "name", context)?,
            brand: TomlReader::string(value, "brand", context)?,
            price: TomlReader::float(value, "price", context)?,
            description: TomlReader::string(value, "description", context)?,
            sub_category: TomlReader::optional_string(value, "sub_category", context)?,
        })
    }

    fn read_review(index: usize, value: &toml::Value) -> Result<ReviewEntry> {
        let context = format!("reviews[{index}]");
        TomlReader::table(value, &context)?;

        let rating = TomlReader::integer(value, "rating", &context)?;
        let rating = u8::try_from(rating)
            .context(format!("Key 'rating' in {context} is out of range: {rating}"))?;

        Ok(ReviewEntry {
            id: TomlReader::string(value, "id", &context)?,
            product_id: TomlReader::string(value, "product_id", &context)?,
            user_name: TomlReader::string(value, "user_name", &context)?,
            rating,
            comment: TomlReader::string(value, "comment", &context)?,
            date: TomlReader::string(value, "date", &context)?,
            verified: TomlReader::boolean(value, "verified", &context)?,
        })
    }
}

// ===== CATALOG INDEX =====

struct CatalogIndex {
    category_slug_to_index: HashMap<String, usize>,
}

impl CatalogIndex {
    fn build_from_source(source: &CatalogSource) -> Result<Self> {
        let mut category_slug_to_index = HashMap::new();

        for (index, category) in source.categories.iter().enumerate() {
            if category_slug_to_index.insert(category.slug.clone(), index).is_some() {
                bail!("Category slug '{slug}' is declared more than once", slug = category.slug);
            }
        }

        Ok(Self { category_slug_to_index })
    }
}

// ===== CATALOG CODE BUILDER =====

struct CatalogCodeBuilder;

impl CatalogCodeBuilder {
    fn format_phf_hash_map<K: AsRef<str>>(map: &HashMap<K, usize>) -> String {
        let mut entries = map.iter().collect::<Vec<_>>();
        entries.sort_by_key(|(_, value)| **value);

        let mut phf_builder = Map::new();
        for (key, value) in entries {
            phf_builder.entry(key.as_ref(), value.to_string());
        }

        phf_builder.build().to_string()
    }

    fn format_optional_string_list(list: Option<&Vec<String>>) -> String {
        list.map(|items| format!("Some(&{items:?})"))
            .unwrap_or_else(|| "None".to_string())
    }

    fn format_category_struct(category: &CategoryEntry) -> String {
        let sub_categories = Self::format_optional_string_list(category.sub_categories.as_ref());

        format!(
            "CategoryMetadata {{
                id: {id:?},
                name: {name:?},
                slug: {slug:?},
                description: {description:?},
                sub_categories: {sub_categories}
            }}",
            id = category.id,
            name = category.name,
            slug = category.slug,
            description = category.description,
        )
    }

    fn format_product_struct(product: &ProductEntry) -> String {
        format!(
            "RawProduct {{
                name: {name:?},
                brand: {brand:?},
                price: {price:?},
                description: {description:?},
                sub_category: {sub_category:?}
            }}",
            name = product.name,
            brand = product.brand,
            price = product.price,
            description = product.description,
            sub_category = product.sub_category.as_deref(),
        )
    }

    fn format_group_struct(group: &GroupEntry) -> String {
        let products = group.products.iter()
            .map(Self::format_product_struct)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "ProductGroup {{
                category: {category:?},
                products: &[{products}]
            }}",
            category = group.category,
        )
    }

    fn format_review_struct(review: &ReviewEntry) -> String {
        format!(
            "SampleReview {{
                id: {id:?},
                product_id: {product_id:?},
                user_name: {user_name:?},
                rating: {rating},
                comment: {comment:?},
                date: {date:?},
                verified: {verified}
            }}",
            id = review.id,
            product_id = review.product_id,
            user_name = review.user_name,
            rating = review.rating,
            comment = review.comment,
            date = review.date,
            verified = review.verified,
        )
    }

    fn join_formatted<T>(items: &[T], formatter: fn(&T) -> String) -> String {
        items.iter()
            .map(formatter)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn build_catalog_struct_code(source: &CatalogSource, index: &CatalogIndex) -> String {
        let categories_array = Self::join_formatted(&source.categories, Self::format_category_struct);
        let groups_array = Self::join_formatted(&source.groups, Self::format_group_struct);
        let reviews_array = Self::join_formatted(&source.reviews, Self::format_review_struct);
        let categories_map = Self::format_phf_hash_map(&index.category_slug_to_index);

        format!(
            "RawCatalog {{
                categories: &[{categories_array}],
                groups: &[{groups_array}],
                reviews: &[{reviews_array}],
                categories_map: {categories_map}
            }}"
        )
    }
}

// ===== CATALOG PROCESSOR =====

struct CatalogProcessor<'a> {
    config: &'a BuildConfiguration,
}

impl<'a> CatalogProcessor<'a> {
    fn new(config: &'a BuildConfiguration) -> Self {
        Self { config }
    }

    fn process_catalog_data(&self) -> Result<()> {
        let source = CatalogSourceReader::read_catalog_source()?;
        let index = CatalogIndex::build_from_source(&source)?;
        let catalog_code = CatalogCodeBuilder::build_catalog_struct_code(&source, &index);

        std::fs::write(&self.config.catalog_file, catalog_code)
            .context("Failed to write catalog file")
    }
}

// ===== CARGO ENVIRONMENT =====

struct CargoEnvironmentVariables;

impl CargoEnvironmentVariables {
    fn emit_application_metadata(metadata: &ApplicationMetadata) {
        println!("cargo:rustc-env=APP_NAME={}", metadata.name);
        println!("cargo:rustc-env=APP_VERSION={}", metadata.version);
        println!("cargo:rustc-env=APP_TITLE={}", metadata.title);
        println!("cargo:rustc-env=APP_IMAGE_BASE={}", metadata.image_base);
        println!("cargo:rustc-env=APP_TYPES_MODULE={}", metadata.types_module);
        println!("cargo:rustc-env=APP_BESTSELLER_BADGE={}", metadata.bestseller_badge);
        println!("cargo:rustc-env=APP_LONG_DESCRIPTION_SUFFIX={}", metadata.long_description_suffix);
    }
}

// ===== BUILD ENVIRONMENT =====

struct BuildEnvironment;

impl BuildEnvironment {
    fn setup_cargo_configuration() {
        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed=Cargo.toml");
        println!("cargo:rerun-if-changed=resources");
    }
}

// ===== BUILD PIPELINE =====

struct BuildPipeline {
    config: BuildConfiguration,
    app_metadata: ApplicationMetadata,
}

impl BuildPipeline {
    fn new() -> Result<Self> {
        Ok(Self {
            config: BuildConfiguration::new()?,
            app_metadata: ApplicationMetadata::extract_from_cargo()?,
        })
    }

    fn execute_complete_build(&self) -> Result<()> {
        BuildEnvironment::setup_cargo_configuration();

        CatalogProcessor::new(&self.config).process_catalog_data()?;
        CargoEnvironmentVariables::emit_application_metadata(&self.app_metadata);

        Ok(())
    }
}

// ===== MAIN =====

fn main() -> Result<()> {
    BuildPipeline::new()?.execute_complete_build()
}
