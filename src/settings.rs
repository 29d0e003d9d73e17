use super::constants;

/// Values the emitted module depends on besides the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterSettings {
    pub image_base: String,
    pub types_module: String,
    pub bestseller_badge: String,
    pub long_description_suffix: String,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            image_base: constants::APP_IMAGE_BASE.to_string(),
            types_module: constants::APP_TYPES_MODULE.to_string(),
            bestseller_badge: constants::APP_BESTSELLER_BADGE.to_string(),
            long_description_suffix: constants::APP_LONG_DESCRIPTION_SUFFIX.to_string(),
        }
    }
}

impl EmitterSettings {

    #[must_use]
    pub fn with_image_base(mut self, image_base: Option<String>) -> Self {
        if let Some(image_base) = image_base {
            self.image_base = image_base;
        }
        self
    }

    #[must_use]
    pub fn with_types_module(mut self, types_module: Option<String>) -> Self {
        if let Some(types_module) = types_module {
            self.types_module = types_module;
        }
        self
    }

    #[must_use]
    pub fn long_description(&self, description: &str) -> String {
        format!("{description}. {suffix}", suffix = self.long_description_suffix)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_package_metadata() {
        let settings = EmitterSettings::default();
        assert_eq!(settings.image_base, "/image-products");
        assert_eq!(settings.types_module, "@/types");
        assert_eq!(settings.bestseller_badge, "Bestseller");
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let settings = EmitterSettings::default()
            .with_image_base(Some("/cdn/img".to_string()))
            .with_types_module(None);

        assert_eq!(settings.image_base, "/cdn/img");
        assert_eq!(settings.types_module, "@/types");
    }

    #[test]
    fn long_description_appends_suffix() {
        let settings = EmitterSettings::default();
        assert_eq!(
            settings.long_description("Sérum rétinol anti-âge"),
            "Sérum rétinol anti-âge. Produit de qualité professionnelle disponible aux Pays-Bas."
        );
    }
}
