use serde::Serialize;

/// Hand-authored category record, compiled in from the catalog source.
#[derive(Debug, Clone)]
pub struct CategoryMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub sub_categories: Option<&'static [&'static str]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmittedCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_categories: Option<&'static [&'static str]>,
}
