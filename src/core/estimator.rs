use crate::core::catalog::Catalog;
use crate::domain::model::{format_kg, ClassificationResult, FootprintReport};
use crate::domain::ports::FootprintSampler;
use indexmap::IndexMap;
use std::sync::Arc;

pub const ECO_POINTS_PER_KG: f64 = 2.0;
pub const MIN_SAMPLED_KG: f64 = 1.0;
pub const MAX_SAMPLED_KG: f64 = 5.0;

pub const INVALID_IMAGE_KEY: &str = "invalid image";
pub const INVALID_IMAGE_VALUE: &str = "0";
pub const EXCLUDED_WEIGHT: &str = "0kg";

#[derive(Debug, Clone, Copy, PartialEq)]
enum ItemWeight {
    Excluded,
    Kg(f64),
}

fn is_sentinel(value: &str) -> bool {
    value.eq_ignore_ascii_case("invalid") || value.eq_ignore_ascii_case("unknown")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Turns a classification into a scored report. Only the sampler has state.
#[derive(Clone)]
pub struct FootprintEstimator {
    catalog: Arc<Catalog>,
    sampler: Arc<dyn FootprintSampler>,
}

impl FootprintEstimator {
    pub fn new(catalog: Arc<Catalog>, sampler: Arc<dyn FootprintSampler>) -> Self {
        Self { catalog, sampler }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 判斷整張圖片是否沒有可辨識的衣物
    ///
    /// 類別必須完全相符 (`unknown` / `invalid`)，項目則不分大小寫
    pub fn is_invalid_image(input: &ClassificationResult) -> bool {
        let all_sentinel = input.items.iter().all(|item| is_sentinel(item));
        match input.category.as_deref() {
            Some("unknown") => all_sentinel,
            Some("invalid") => input.items.is_empty() || all_sentinel,
            _ => false,
        }
    }

    fn weigh(&self, item: &str) -> ItemWeight {
        if is_sentinel(item) {
            return ItemWeight::Excluded;
        }
        match self.catalog.garment_kg(item) {
            Some(kg) => ItemWeight::Kg(kg),
            None => {
                let sampled = self.sampler.sample_kg(MIN_SAMPLED_KG, MAX_SAMPLED_KG);
                ItemWeight::Kg(round2(sampled.clamp(MIN_SAMPLED_KG, MAX_SAMPLED_KG)))
            }
        }
    }

    pub fn estimate(&self, input: &ClassificationResult, model_used: &str) -> FootprintReport {
        let mut carbon_footprint = IndexMap::new();
        let mut total_footprint = 0.0;

        if Self::is_invalid_image(input) {
            tracing::debug!("No garment detected (category: {:?})", input.category);
            carbon_footprint.insert(INVALID_IMAGE_KEY.to_string(), INVALID_IMAGE_VALUE.to_string());
        } else if !input.items.is_empty() {
            // 重複的項目保留第一次出現的位置，數值以最後一次為準
            let mut weights: IndexMap<&str, ItemWeight> = IndexMap::new();
            for item in &input.items {
                weights.insert(item.as_str(), self.weigh(item));
            }

            for (item, weight) in weights {
                let rendered = match weight {
                    ItemWeight::Excluded => EXCLUDED_WEIGHT.to_string(),
                    ItemWeight::Kg(kg) => {
                        total_footprint += kg;
                        format_kg(kg)
                    }
                };
                carbon_footprint.insert(item.to_string(), rendered);
            }
        }

        let eco_savings = total_footprint * ECO_POINTS_PER_KG;
        let coupons = self.catalog.coupons_within(total_footprint);
        let summary = format!(
            "The Eco-Savings points you received for this transaction is ${:.2}.",
            eco_savings
        );

        tracing::info!(
            "🌱 Estimated {} item(s): total {:.2}kg, {:.2} eco points, {} coupon(s)",
            carbon_footprint.len(),
            total_footprint,
            eco_savings,
            coupons.len()
        );

        FootprintReport {
            carbon_footprint,
            coupons,
            summary,
            eco_savings,
            model_used: model_used.to_string(),
            image: input.image_validity.clone(),
            total_footprint,
        }
    }
}
