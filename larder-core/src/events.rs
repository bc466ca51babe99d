//! Catalog change notifications.
//!
//! Writes to the catalog announce themselves here so that anything keeping a
//! derived copy (a search index, a cache) can refresh the affected dish.

use crate::types::RecipeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEventKind {
    Created,
    Updated,
    Deleted,
}

impl CatalogEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogEventKind::Created => "created",
            CatalogEventKind::Updated => "updated",
            CatalogEventKind::Deleted => "deleted",
        }
    }
}

/// A request to reindex one dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEvent {
    pub kind: CatalogEventKind,
    pub dish_id: RecipeId,
}

impl CatalogEvent {
    pub fn created(dish_id: RecipeId) -> Self {
        Self {
            kind: CatalogEventKind::Created,
            dish_id,
        }
    }

    pub fn updated(dish_id: RecipeId) -> Self {
        Self {
            kind: CatalogEventKind::Updated,
            dish_id,
        }
    }

    pub fn deleted(dish_id: RecipeId) -> Self {
        Self {
            kind: CatalogEventKind::Deleted,
            dish_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind_and_dish() {
        let events = [
            CatalogEvent::created(1),
            CatalogEvent::updated(2),
            CatalogEvent::deleted(3),
        ];
        let labels: Vec<(&str, RecipeId)> = events
            .iter()
            .map(|event| (event.kind.as_str(), event.dish_id))
            .collect();
        assert_eq!(labels, vec![("created", 1), ("updated", 2), ("deleted", 3)]);
    }
}
