use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Output of the image classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(rename = "cloth_image", default)]
    pub image_validity: String,
}

impl ClassificationResult {
    pub fn new(category: Option<&str>, items: &[&str], image_validity: &str) -> Self {
        Self {
            category: category.map(str::to_string),
            items: items.iter().map(|item| item.to_string()).collect(),
            image_validity: image_validity.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub title: String,
    pub price: String,
    pub link: String,
}

impl Coupon {
    pub fn new(title: &str, price: &str, link: &str) -> Self {
        Self {
            title: title.to_string(),
            price: price.to_string(),
            link: link.to_string(),
        }
    }

    /// "$12" -> 12.0
    pub fn price_value(&self) -> Option<f64> {
        parse_dollars(&self.price)
    }
}

/// Response body of `POST /upload`. Keys follow the frontend contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintReport {
    #[serde(rename = "carbonfootprint")]
    pub carbon_footprint: IndexMap<String, String>,
    pub coupons: Vec<Coupon>,
    #[serde(rename = "coupontotal")]
    pub summary: String,
    #[serde(rename = "ecosavings")]
    pub eco_savings: f64,
    #[serde(rename = "modelused")]
    pub model_used: String,
    pub image: String,
    pub total_footprint: f64,
}

pub fn parse_dollars(price: &str) -> Option<f64> {
    let value: f64 = price.trim().trim_start_matches('$').trim().parse().ok()?;
    value.is_finite().then_some(value)
}

pub fn parse_kg(weight: &str) -> Option<f64> {
    let value: f64 = weight.trim().trim_end_matches("kg").trim().parse().ok()?;
    value.is_finite().then_some(value)
}

pub fn format_kg(value: f64) -> String {
    format!("{}kg", value)
}
