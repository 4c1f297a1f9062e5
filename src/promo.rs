//! Flash sale: a timed discount on a random handful of products.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Discount percentages a flash sale draws from.
pub const DISCOUNT_STEPS: [u8; 9] = [10, 15, 20, 25, 30, 35, 40, 45, 50];

#[derive(Debug, Clone, PartialEq)]
pub struct FlashSale {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Product id to discount percent.
    pub discounts: BTreeMap<String, u8>,
}

impl FlashSale {
    /// Picks up to `count` distinct products and gives each a random discount.
    pub fn launch<R: Rng + ?Sized>(
        product_ids: &[String],
        count: usize,
        now: DateTime<Utc>,
        duration: Duration,
        rng: &mut R,
    ) -> Self {
        let discounts = product_ids
            .choose_multiple(rng, count)
            .cloned()
            .collect::<Vec<_>>()
            .into_iter()
            .map(|id| {
                let percent = DISCOUNT_STEPS.choose(rng).copied().unwrap_or(DISCOUNT_STEPS[0]);
                (id, percent)
            })
            .collect();
        Self {
            starts_at: now,
            ends_at: now + duration,
            discounts,
        }
    }

    pub fn discount_for(&self, product_id: &str) -> Option<u8> {
        self.discounts.get(product_id).copied()
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at && now < self.ends_at
    }

    /// Time left, never negative.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.ends_at - now).max(Duration::zero())
    }

    /// Countdown as shown on the banner, `HH:MM:SS`.
    pub fn countdown(&self, now: DateTime<Utc>) -> String {
        let secs = self.remaining(now).num_seconds();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
