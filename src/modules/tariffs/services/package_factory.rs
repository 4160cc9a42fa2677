use fake::faker::lorem::raw::Word;
use fake::locales::EN;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;

use super::super::models::{Contact, Package, PackageItem, Payment, Phone};
use super::weight_range::WeightRange;

/// Fixed package dimensions in centimetres
pub const PACKAGE_LENGTH_CM: u32 = 30;
pub const PACKAGE_WIDTH_CM: u32 = 50;
pub const PACKAGE_HEIGHT_CM: u32 = 20;

const MIN_PACKAGES: usize = 1;
const MAX_PACKAGES: usize = 10;
const MIN_ITEMS: u32 = 1;
const MAX_ITEMS: u32 = 10;

/// Largest cash-on-delivery amount, in kopecks
const MAX_PAYMENT_KOPECKS: u32 = 1_000_000;

/// VAT rates the upstream accepts, in percent
pub const VAT_RATES: [u32; 6] = [0, 5, 7, 10, 12, 20];

/// Generates randomized but valid shipment contents
pub struct PackageFactory;

impl PackageFactory {
    /// 1 to 10 packages, each weighing something inside `range`
    pub fn packages<R: Rng + ?Sized>(rng: &mut R, range: &WeightRange) -> Vec<Package> {
        let count = rng.gen_range(MIN_PACKAGES..=MAX_PACKAGES);
        (1..=count)
            .map(|number| {
                let weight = range.pick(rng);
                Self::package(rng, number, weight)
            })
            .collect()
    }

    /// One package whose items never outweigh it
    pub fn package<R: Rng + ?Sized>(rng: &mut R, number: usize, weight_g: u32) -> Package {
        Package {
            number: number.to_string(),
            weight: weight_g,
            length: PACKAGE_LENGTH_CM,
            width: PACKAGE_WIDTH_CM,
            height: PACKAGE_HEIGHT_CM,
            comment: None,
            items: Self::items(rng, weight_g),
        }
    }

    /// 1 to 10 items sharing the package weight
    pub fn items<R: Rng + ?Sized>(rng: &mut R, package_weight_g: u32) -> Vec<PackageItem> {
        let count = rng.gen_range(MIN_ITEMS..=MAX_ITEMS);
        let item_weight = (package_weight_g / count).max(1);

        (0..count)
            .map(|_| {
                let payment = Self::payment(rng);
                let name: String = Word(EN).fake_with_rng(rng);
                PackageItem {
                    name,
                    ware_key: format!("{:08}", rng.gen_range(0..100_000_000u32)),
                    cost: payment.value,
                    payment,
                    weight: item_weight,
                    amount: 1,
                }
            })
            .collect()
    }

    /// Random amount; VAT is only attached to non-zero amounts
    pub fn payment<R: Rng + ?Sized>(rng: &mut R) -> Payment {
        let value = f64::from(rng.gen_range(0..=MAX_PAYMENT_KOPECKS)) / 100.0;
        if value == 0.0 {
            return Payment {
                value,
                vat_sum: None,
                vat_rate: None,
            };
        }

        let rate = *VAT_RATES.choose(rng).unwrap_or(&0);
        Payment {
            value,
            vat_sum: Some(round_kopecks(value * f64::from(rate) / 100.0)),
            vat_rate: Some(rate),
        }
    }

    pub fn recipient() -> Contact {
        Contact {
            name: "Иванов Иван".to_string(),
            company: None,
            phones: vec![Phone {
                number: "+79134637228".to_string(),
            }],
        }
    }

    pub fn sender() -> Contact {
        Contact {
            name: "Петров Петр".to_string(),
            company: Some("Тестовый магазин".to_string()),
            phones: vec![Phone {
                number: "+79134637229".to_string(),
            }],
        }
    }
}

fn round_kopecks(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
