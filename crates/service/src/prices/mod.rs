//! Price collections ("food", "drinks") and their CRUD operations.

pub mod domain;
pub mod store;

pub use domain::{Collection, CreateItemInput, Field, Item, UnknownCollection, UpdatePriceInput};
pub use store::PriceStore;
