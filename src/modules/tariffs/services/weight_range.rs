use std::cmp::{max, min};

use rand::Rng;

use crate::core::{AppError, Result};
use crate::modules::locations::DeliveryPoint;

/// Lower bound used when a delivery point declares none, in grams
pub const DEFAULT_WEIGHT_MIN_G: u32 = 100;
/// Upper bound used when a delivery point declares none, in grams
pub const DEFAULT_WEIGHT_MAX_G: u32 = 30_000;

/// Inclusive weight bounds in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightRange {
    pub min_g: u32,
    pub max_g: u32,
}

impl Default for WeightRange {
    fn default() -> Self {
        Self {
            min_g: DEFAULT_WEIGHT_MIN_G,
            max_g: DEFAULT_WEIGHT_MAX_G,
        }
    }
}

impl WeightRange {
    pub fn new(min_g: u32, max_g: u32) -> Result<Self> {
        if min_g > max_g {
            return Err(AppError::validation(format!(
                "Weight range is empty: {} g > {} g",
                min_g, max_g
            )));
        }

        Ok(Self { min_g, max_g })
    }

    /// Bounds accepted by a delivery point; limits it leaves out fall back to
    /// the defaults
    pub fn for_point(point: &DeliveryPoint) -> Self {
        Self {
            min_g: point
                .weight_min
                .map(kg_to_grams)
                .unwrap_or(DEFAULT_WEIGHT_MIN_G),
            max_g: point
                .weight_max
                .map(kg_to_grams)
                .unwrap_or(DEFAULT_WEIGHT_MAX_G),
        }
    }

    /// Weights acceptable to both ranges
    pub fn intersect(&self, other: &WeightRange) -> Result<Self> {
        Self::new(max(self.min_g, other.min_g), min(self.max_g, other.max_g))
    }

    /// Weights acceptable at both ends of a shipment
    pub fn between(from: &DeliveryPoint, to: &DeliveryPoint) -> Result<Self> {
        Self::for_point(from).intersect(&Self::for_point(to))
    }

    pub fn contains(&self, weight_g: u32) -> bool {
        (self.min_g..=self.max_g).contains(&weight_g)
    }

    /// Uniform weight inside the bounds
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.min_g >= self.max_g {
            return self.min_g;
        }
        rng.gen_range(self.min_g..=self.max_g)
    }
}

fn kg_to_grams(kg: f64) -> u32 {
    (kg.max(0.0) * 1000.0).round() as u32
}
