//! The restaurant's stored entities.

use serde::{Deserialize, Serialize};

use crate::{
    document::{CollectionKind, Entity},
    validate::{ValidationError, validate_menu_item},
};

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: Option<String>,
    /// Price in dollars, never negative.
    pub price: f64,
    /// Starters, Mains, Desserts, Drinks, ...
    pub category: String,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_spicy: bool,
}

impl Entity for MenuItem {
    const KIND: CollectionKind = CollectionKind::MenuItem;

    fn check(&self) -> Result<(), ValidationError> {
        validate_menu_item(self)
    }
}

/// A table reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    /// `YYYY-MM-DD`, not parsed.
    pub date: String,
    /// `HH:MM`, not parsed.
    pub time: String,
    pub guests: i32,
    pub notes: Option<String>,
}

impl Entity for Reservation {
    const KIND: CollectionKind = CollectionKind::Reservation;
}

/// A message sent from the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Entity for ContactMessage {
    const KIND: CollectionKind = CollectionKind::ContactMessage;
}

fn dish(
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    is_vegetarian: bool,
    is_spicy: bool,
) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
        category: category.to_string(),
        is_vegetarian,
        is_spicy,
    }
}

/// The demo menu inserted into an empty `menuitem` collection, in insertion order.
pub fn sample_menu() -> Vec<MenuItem> {
    vec![
        dish(
            "Margherita Pizza",
            "San Marzano tomatoes, fresh mozzarella, basil",
            12.0,
            "Mains",
            true,
            false,
        ),
        dish(
            "Spicy Arrabbiata Pasta",
            "Penne tossed in a spicy tomato-garlic sauce",
            14.0,
            "Mains",
            true,
            true,
        ),
        dish(
            "Caesar Salad",
            "Romaine, parmesan, croutons, classic dressing",
            9.5,
            "Starters",
            false,
            false,
        ),
        dish(
            "Tiramisu",
            "Espresso-soaked ladyfingers, mascarpone cream",
            8.0,
            "Desserts",
            true,
            false,
        ),
        dish(
            "Lemonade",
            "Fresh squeezed with mint",
            4.0,
            "Drinks",
            true,
            false,
        ),
    ]
}
