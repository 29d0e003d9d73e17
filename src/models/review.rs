use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleReview {
    pub id: &'static str,
    pub product_id: &'static str,
    pub user_name: &'static str,
    pub rating: u8,
    pub comment: &'static str,
    pub date: &'static str,
    pub verified: bool,
}
