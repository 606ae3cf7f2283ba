use crate::domain::model::{format_kg, parse_dollars, parse_kg, Coupon};
use crate::utils::error::{EcoError, Result};
use indexmap::IndexMap;

const COUPON_LINK: &str = "https://yakkshit.com";

const DEFAULT_GARMENTS: [(&str, f64); 17] = [
    ("hoodie", 2.0),
    ("sweatpants", 3.0),
    ("t-shirt", 1.0),
    ("jeans", 4.0),
    ("jacket", 5.0),
    ("shorts", 2.0),
    ("dress", 3.5),
    ("skirt", 2.5),
    ("socks", 0.5),
    ("hat", 0.8),
    ("scarf", 1.0),
    ("activewear", 3.0),
    ("swimwear", 2.0),
    ("pajamas", 1.5),
    ("overalls", 4.5),
    ("others", 1.0),
    ("blazer", 4.0),
];

const DEFAULT_COUPONS: [(&str, &str); 14] = [
    ("Eco Store", "$5"),
    ("Green Products Co.", "$10"),
    ("Sustainable Fashion", "$15"),
    ("Organic Marketplace", "$7"),
    ("Renewable Goods", "$12"),
    ("Eco-Friendly Apparel", "$8"),
    ("Green Living Essentials", "$20"),
    ("Conscious Clothing", "$25"),
    ("Nature's Best", "$18"),
    ("Planet-Friendly Products", "$14"),
    ("Ethical Fashion Hub", "$22"),
    ("Sustainable Home Goods", "$9"),
    ("Zero Waste Shop", "$11"),
    ("Green Tech Solutions", "$30"),
];

/// Garment lookup table and coupon catalog. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    garments: IndexMap<String, f64>,
    coupons: Vec<Coupon>,
}

impl Default for Catalog {
    fn default() -> Self {
        let garments = DEFAULT_GARMENTS
            .iter()
            .map(|(name, kg)| (name.to_string(), *kg))
            .collect();
        let coupons = DEFAULT_COUPONS
            .iter()
            .map(|(title, price)| Coupon::new(title, price, COUPON_LINK))
            .collect();
        Self { garments, coupons }
    }
}

impl Catalog {
    /// Builds a catalog from raw `"Nkg"` weights and `"$N"` coupon prices.
    pub fn from_parts(garments: IndexMap<String, String>, coupons: Vec<Coupon>) -> Result<Self> {
        let mut table = IndexMap::with_capacity(garments.len());
        for (name, weight) in garments {
            let kg = parse_kg(&weight)
                .filter(|kg| *kg > 0.0)
                .ok_or_else(|| EcoError::InvalidConfigValueError {
                    field: format!("garments.{}", name),
                    value: weight.clone(),
                    reason: "Weight must be a positive number of kilograms, e.g. \"2kg\"".to_string(),
                })?;
            table.insert(name.to_lowercase(), kg);
        }

        for coupon in &coupons {
            if coupon.price_value().filter(|price| *price >= 0.0).is_none() {
                return Err(EcoError::InvalidConfigValueError {
                    field: format!("coupons.{}", coupon.title),
                    value: coupon.price.clone(),
                    reason: "Price must be a dollar amount, e.g. \"$5\"".to_string(),
                });
            }
        }

        Ok(Self {
            garments: table,
            coupons,
        })
    }

    /// Case-insensitive lookup, returns kilograms.
    pub fn garment_kg(&self, item: &str) -> Option<f64> {
        self.garments.get(&item.to_lowercase()).copied()
    }

    pub fn garment_count(&self) -> usize {
        self.garments.len()
    }

    pub fn garments(&self) -> impl Iterator<Item = (&str, String)> {
        self.garments
            .iter()
            .map(|(name, kg)| (name.as_str(), format_kg(*kg)))
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Coupons priced at or below `budget`, in catalog order.
    pub fn coupons_within(&self, budget: f64) -> Vec<Coupon> {
        self.coupons
            .iter()
            .filter(|coupon| {
                parse_dollars(&coupon.price).is_some_and(|price| price <= budget)
            })
            .cloned()
            .collect()
    }
}
