use std::sync::Arc;

use configs::{IdStrategy, PricesConfig};
use serde_json::Number;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::domain::{Collection, CreateItemInput, Item, UpdatePriceInput};
use crate::errors::ServiceError;

#[derive(Debug, Default)]
struct Shelf {
    items: Vec<Item>,
    // highest id ever issued, survives deletions
    high_water: u64,
}

impl Shelf {
    fn with_items(items: Vec<Item>) -> Self {
        let high_water = items.iter().map(|i| i.id).max().unwrap_or(0);
        Self { items, high_water }
    }

    fn next_id(&self, strategy: IdStrategy) -> u64 {
        match strategy {
            IdStrategy::LengthPlusOne => self.items.len() as u64 + 1,
            IdStrategy::Monotonic => self.high_water + 1,
        }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }
}

/// In-memory store for both price collections.
///
/// Every mutation holds the collection's write lock for its full
/// read-modify-write, so ids are assigned against a consistent length.
#[derive(Debug)]
pub struct PriceStore {
    food: RwLock<Shelf>,
    drinks: RwLock<Shelf>,
    id_strategy: IdStrategy,
}

impl PriceStore {
    /// Empty collections.
    pub fn new(id_strategy: IdStrategy) -> Arc<Self> {
        Arc::new(Self {
            food: RwLock::new(Shelf::default()),
            drinks: RwLock::new(Shelf::default()),
            id_strategy,
        })
    }

    /// Collections filled with the fixed start-up dataset.
    pub fn seeded(id_strategy: IdStrategy) -> Arc<Self> {
        Self::with_items(id_strategy, Collection::Food.seed(), Collection::Drinks.seed())
    }

    pub fn with_items(id_strategy: IdStrategy, food: Vec<Item>, drinks: Vec<Item>) -> Arc<Self> {
        Arc::new(Self {
            food: RwLock::new(Shelf::with_items(food)),
            drinks: RwLock::new(Shelf::with_items(drinks)),
            id_strategy,
        })
    }

    pub fn from_config(cfg: &PricesConfig) -> Arc<Self> {
        if cfg.seed {
            Self::seeded(cfg.id_strategy)
        } else {
            Self::new(cfg.id_strategy)
        }
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    fn shelf(&self, c: Collection) -> &RwLock<Shelf> {
        match c {
            Collection::Food => &self.food,
            Collection::Drinks => &self.drinks,
        }
    }

    /// All items of a collection in insertion order.
    pub async fn list(&self, c: Collection) -> Vec<Item> {
        self.shelf(c).read().await.items.clone()
    }

    /// Validate and append a new item; the id is assigned here.
    pub async fn create(&self, c: Collection, input: CreateItemInput) -> Result<Item, ServiceError> {
        let (name, price) = input.validate()?;
        let mut shelf = self.shelf(c).write().await;
        let id = shelf.next_id(self.id_strategy);
        if shelf.position(id).is_some() {
            // only reachable with LengthPlusOne after a deletion
            debug!(collection = %c, id, "assigned id already present in collection");
        }
        let item = Item { id, name, price };
        shelf.items.push(item.clone());
        shelf.high_water = shelf.high_water.max(id);
        drop(shelf);
        info!(collection = %c, id, name = %item.name, "item created");
        Ok(item)
    }

    /// Replace the price of the first item with `id`. Existence is checked before the price.
    pub async fn update_price(
        &self,
        c: Collection,
        id: u64,
        input: UpdatePriceInput,
    ) -> Result<Item, ServiceError> {
        let mut shelf = self.shelf(c).write().await;
        let idx = shelf.position(id).ok_or_else(ServiceError::item_not_found)?;
        let price: Number = input.validate()?;
        let existing = &mut shelf.items[idx];
        existing.price = price;
        let updated = existing.clone();
        drop(shelf);
        info!(collection = %c, id, price = %updated.price, "item price updated");
        Ok(updated)
    }

    /// Remove the first item with `id`, keeping the order of the rest.
    pub async fn delete(&self, c: Collection, id: u64) -> Result<Item, ServiceError> {
        let mut shelf = self.shelf(c).write().await;
        let idx = shelf.position(id).ok_or_else(ServiceError::item_not_found)?;
        let removed = shelf.items.remove(idx);
        drop(shelf);
        info!(collection = %c, id, "item deleted");
        Ok(removed)
    }
}
