use serde::{Deserialize, Serialize};

use super::ProductSnapshot;

/// Snapshots found on sale during one run, in query order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaleReport {
    items: Vec<ProductSnapshot>,
}

impl SaleReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the snapshot if it is on sale. Returns whether it was kept.
    pub fn record(&mut self, snapshot: ProductSnapshot) -> bool {
        if !snapshot.is_on_sale {
            return false;
        }
        self.items.push(snapshot);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ProductSnapshot] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ProductSnapshot> {
        self.items
    }
}
