use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::errors::ServiceError;

/// A priced entry. `price` keeps the numeric form the client sent (1 stays 1, 1.5 stays 1.5).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub price: Number,
}

impl Item {
    pub fn new(id: u64, name: impl Into<String>, price: impl Into<Number>) -> Self {
        Self { id, name: name.into(), price: price.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Food,
    Drinks,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Food, Collection::Drinks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Food => "food",
            Collection::Drinks => "drinks",
        }
    }

    /// Dataset loaded at process start.
    pub fn seed(&self) -> Vec<Item> {
        match self {
            Collection::Food => vec![
                Item::new(1, "apple", 1),
                Item::new(2, "orange", 2),
                Item::new(3, "banana", 3),
            ],
            Collection::Drinks => vec![Item::new(1, "water", 1), Item::new(2, "juice", 3)],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCollection(pub String);

impl fmt::Display for UnknownCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown collection '{}'", self.0)
    }
}

impl std::error::Error for UnknownCollection {}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Collection::Food),
            "drinks" => Ok(Collection::Drinks),
            other => Err(UnknownCollection(other.to_string())),
        }
    }
}

/// A request field that either has the expected type or holds whatever was sent.
///
/// Lets a body with a wrongly-typed field still deserialize, so the store decides
/// which error wins (e.g. "Item not found" before "Invalid price").
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Field<T> {
    Valid(T),
    Invalid(Value),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Invalid(Value::Null)
    }
}

impl<T> Field<T> {
    pub fn into_valid(self) -> Option<T> {
        match self {
            Field::Valid(v) => Some(v),
            Field::Invalid(_) => None,
        }
    }
}

/// Body of a create request: `{name, price}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CreateItemInput {
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub price: Field<Number>,
}

impl CreateItemInput {
    pub fn new(name: impl Into<String>, price: impl Into<Number>) -> Self {
        Self { name: Field::Valid(name.into()), price: Field::Valid(price.into()) }
    }

    /// `name` must be a non-empty string and `price` a number.
    pub fn validate(self) -> Result<(String, Number), ServiceError> {
        let name = self.name.into_valid().filter(|n| !n.is_empty());
        let price = self.price.into_valid();
        match (name, price) {
            (Some(name), Some(price)) => Ok((name, price)),
            _ => Err(ServiceError::invalid_input()),
        }
    }
}

/// Body of an update request: `{price}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UpdatePriceInput {
    #[serde(default)]
    pub price: Field<Number>,
}

impl UpdatePriceInput {
    pub fn new(price: impl Into<Number>) -> Self {
        Self { price: Field::Valid(price.into()) }
    }

    pub fn validate(self) -> Result<Number, ServiceError> {
        self.price.into_valid().ok_or_else(ServiceError::invalid_price)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn collection_parses_known_names_only() {
        assert_eq!("food".parse::<Collection>(), Ok(Collection::Food));
        assert_eq!("drinks".parse::<Collection>(), Ok(Collection::Drinks));
        assert_eq!(
            "Food".parse::<Collection>(),
            Err(UnknownCollection("Food".into()))
        );
        assert_eq!(Collection::Drinks.to_string(), "drinks");
    }

    #[test]
    fn item_serializes_integer_price_without_fraction() {
        let body = serde_json::to_string(&Item::new(1, "apple", 1)).unwrap();
        assert_eq!(body, r#"{"id":1,"name":"apple","price":1}"#);
    }

    #[test]
    fn create_input_accepts_int_and_float_prices() {
        let input: CreateItemInput = serde_json::from_value(json!({"name": "pear", "price": 4})).unwrap();
        assert_eq!(input.validate().unwrap(), ("pear".to_string(), Number::from(4)));

        let input: CreateItemInput = serde_json::from_value(json!({"name": "kiwi", "price": 2.5})).unwrap();
        let (_, price) = input.validate().unwrap();
        assert_eq!(price.as_f64(), Some(2.5));

        let input: CreateItemInput = serde_json::from_value(json!({"name": "debt", "price": -3})).unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_input_rejects_missing_or_mistyped_fields() {
        for body in [
            json!({"name": "tea"}),
            json!({"price": 1}),
            json!({"name": "", "price": 1}),
            json!({"name": "tea", "price": "1"}),
            json!({"name": 5, "price": 1}),
            json!({"name": "tea", "price": null}),
            json!({}),
        ] {
            let input: CreateItemInput = serde_json::from_value(body.clone()).unwrap();
            assert_eq!(input.validate(), Err(ServiceError::invalid_input()), "body {body}");
        }
    }

    #[test]
    fn update_input_requires_number() {
        let input: UpdatePriceInput = serde_json::from_value(json!({"price": 7})).unwrap();
        assert_eq!(input.validate().unwrap(), Number::from(7));

        let input: UpdatePriceInput = serde_json::from_value(json!({"price": "7"})).unwrap();
        assert_eq!(input.validate(), Err(ServiceError::invalid_price()));

        let input: UpdatePriceInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input.validate(), Err(ServiceError::invalid_price()));
    }
}
