//! Popularity signals derived from stored reviews and searches.

use domain_societies::{Society, haversine_km};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{NearbySociety, Trend, TrendingSociety};

/// More searches than this is `Rising`
pub const RISING_ABOVE: u64 = 100;
/// Fewer searches than this is `Declining`
pub const DECLINING_BELOW: u64 = 20;
pub const SIMILAR_LIMIT: usize = 5;
pub const TRENDING_LIMIT: usize = 10;

impl Trend {
    pub fn classify(search_count: u64) -> Self {
        if search_count > RISING_ABOVE {
            Trend::Rising
        } else if search_count < DECLINING_BELOW {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

/// Closest `limit` other societies; those without coordinates are skipped
pub fn nearest_societies(
    target: &Society,
    candidates: Vec<Society>,
    limit: usize,
) -> Vec<NearbySociety> {
    if !target.has_location() {
        return Vec::new();
    }

    let mut nearby: Vec<NearbySociety> = candidates
        .into_iter()
        .filter(|s| s.id != target.id && s.has_location())
        .map(|society| NearbySociety {
            distance_km: haversine_km(target.location(), society.location()),
            society,
        })
        .collect();
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby.truncate(limit);
    nearby
}

/// Most reviewed first, ties by name. Societies without reviews count as 0.
pub fn rank_by_reviews(
    societies: Vec<Society>,
    counts: &HashMap<Uuid, u64>,
    limit: usize,
) -> Vec<TrendingSociety> {
    let mut ranked: Vec<TrendingSociety> = societies
        .into_iter()
        .map(|society| TrendingSociety {
            review_count: counts.get(&society.id).copied().unwrap_or(0),
            society,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.review_count
            .cmp(&a.review_count)
            .then_with(|| a.society.name.cmp(&b.society.name))
    });
    ranked.truncate(limit);
    ranked
}
