use serde::{Serialize, Deserialize};

/// A voting candidate, fixed by configuration at deployment time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(alias = "display_name")]
    pub display_name: String,
    pub image: String,
}

impl Item {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            image: image.into(),
        }
    }
}

/// One row of the `votes` table.
#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub item_name: String,
    pub vote_count: Option<i32>,
}

impl VoteRecord {
    pub fn count(&self) -> i64 {
        self.vote_count.map(i64::from).unwrap_or(0)
    }
}

/// Where the counts of a [`Tally`] came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum CountSource {
    #[default]
    Store,
    Session,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemTally {
    pub id: String,
    pub display_name: String,
    pub image: String,
    pub votes: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub items: Vec<ItemTally>,
    pub total_votes: i64,
    pub source: CountSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollInfo {
    pub title: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub item: String,
    pub votes: i64,
    pub tally: Tally,
}

impl Tally {
    pub fn votes_for(&self, id: &str) -> Option<i64> {
        self.items.iter().find(|item| item.id == id).map(|item| item.votes)
    }

    pub fn is_fallback(&self) -> bool {
        self.source == CountSource::Fallback
    }
}
