use std::collections::HashSet;
use crate::models::Item;

/// Width of the `item_name` column.
pub const MAX_ITEM_ID_LENGTH: usize = 50;
pub const MIN_ITEMS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Item id must not be empty")]
    EmptyItemId,
    #[error("Item id exceeds maximum length of {MAX_ITEM_ID_LENGTH}: {0}")]
    ItemIdTooLong(String),
    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),
    #[error("Too few items (minimum {MIN_ITEMS})")]
    TooFewItems,
    #[error("Item {0} has no display name")]
    MissingDisplayName(String),
}

pub fn validate_item_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() { return Err(ValidationError::EmptyItemId); }
    if id.chars().count() > MAX_ITEM_ID_LENGTH { return Err(ValidationError::ItemIdTooLong(id.to_string())); }
    Ok(())
}

pub fn validate_items(items: &[Item]) -> Result<(), ValidationError> {
    if items.len() < MIN_ITEMS { return Err(ValidationError::TooFewItems); }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        validate_item_id(&item.id)?;
        if item.display_name.trim().is_empty() {
            return Err(ValidationError::MissingDisplayName(item.id.clone()));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::DuplicateItem(item.id.clone()));
        }
    }

    Ok(())
}
