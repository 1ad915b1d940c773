use std::collections::HashMap;
use crate::models::{CountSource, Item, ItemTally, Tally};

/// Vote counts keyed by item id.
pub type Counts = HashMap<String, i64>;

pub fn percentage(count: i64, total: i64) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Counts for `items` only, missing ids read as zero.
pub fn fill_missing(items: &[Item], counts: &Counts) -> Counts {
    items.iter()
        .map(|item| (item.id.clone(), counts.get(&item.id).copied().unwrap_or(0)))
        .collect()
}

pub fn zero_counts(items: &[Item]) -> Counts {
    items.iter().map(|item| (item.id.clone(), 0)).collect()
}

impl Tally {
    /// Builds a tally in configuration order. Ids in `counts` that are not
    /// configured are ignored and do not contribute to the total.
    pub fn from_counts(items: &[Item], counts: &Counts, source: CountSource) -> Self {
        let votes: Vec<i64> = items.iter()
            .map(|item| counts.get(&item.id).copied().unwrap_or(0))
            .collect();
        let total_votes = votes.iter().sum();

        let items = items.iter().zip(votes)
            .map(|(item, votes)| ItemTally {
                id: item.id.clone(),
                display_name: item.display_name.clone(),
                image: item.image.clone(),
                votes,
                percentage: percentage(votes, total_votes),
            })
            .collect();

        Self {
            items,
            total_votes,
            source,
            notice: None,
        }
    }

    pub fn counts(&self) -> Counts {
        self.items.iter().map(|item| (item.id.clone(), item.votes)).collect()
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}
