use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Dish code to record, ordered by code.
pub type DishCatalog = BTreeMap<String, Dish>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DishCategory {
    #[serde(rename = "热菜", alias = "hot_dish")]
    HotDish,
    #[serde(rename = "凉菜", alias = "cold_dish")]
    ColdDish,
    #[serde(rename = "汤类", alias = "soup")]
    Soup,
    #[serde(rename = "主食", alias = "staple")]
    Staple,
    #[serde(rename = "素菜", alias = "vegetable")]
    Vegetable,
    #[serde(rename = "荤菜", alias = "meat")]
    Meat,
    #[serde(rename = "家常菜", alias = "home_style")]
    HomeStyle,
    #[serde(rename = "特色菜", alias = "specialty")]
    Specialty,
}

impl DishCategory {
    pub const ALL: [DishCategory; 8] = [
        DishCategory::HotDish,
        DishCategory::ColdDish,
        DishCategory::Soup,
        DishCategory::Staple,
        DishCategory::Vegetable,
        DishCategory::Meat,
        DishCategory::HomeStyle,
        DishCategory::Specialty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DishCategory::HotDish => "热菜",
            DishCategory::ColdDish => "凉菜",
            DishCategory::Soup => "汤类",
            DishCategory::Staple => "主食",
            DishCategory::Vegetable => "素菜",
            DishCategory::Meat => "荤菜",
            DishCategory::HomeStyle => "家常菜",
            DishCategory::Specialty => "特色菜",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            DishCategory::HotDish => "hot_dish",
            DishCategory::ColdDish => "cold_dish",
            DishCategory::Soup => "soup",
            DishCategory::Staple => "staple",
            DishCategory::Vegetable => "vegetable",
            DishCategory::Meat => "meat",
            DishCategory::HomeStyle => "home_style",
            DishCategory::Specialty => "specialty",
        }
    }
}

impl fmt::Display for DishCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DishCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        DishCategory::ALL
            .into_iter()
            .find(|category| category.label() == value || category.alias() == value)
            .ok_or_else(|| CoreError::Invalid(format!("Unknown dish category: {}", value)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub dish_code: String,
    pub dish_desc: String,
    pub category: DishCategory,
}

impl Dish {
    pub fn new(dish_code: String, dish_desc: String, category: DishCategory) -> Self {
        Self {
            dish_code,
            dish_desc,
            category,
        }
    }

    /// Whole-field merge; `None` keeps the current value.
    pub fn update(&mut self, dish_desc: Option<String>, category: Option<DishCategory>) {
        if let Some(dish_desc) = dish_desc {
            self.dish_desc = dish_desc;
        }
        if let Some(category) = category {
            self.category = category;
        }
    }
}

/// Built-in catalog used when the catalog file is missing or unreadable.
pub fn default_dishes() -> DishCatalog {
    use DishCategory::*;

    [
        ("dish_001", "宫保鸡丁", HotDish),
        ("dish_002", "麻婆豆腐", HotDish),
        ("dish_003", "红烧肉", HotDish),
        ("dish_004", "青椒土豆丝", Vegetable),
        ("dish_005", "西红柿鸡蛋", HomeStyle),
        ("dish_006", "蒜蓉小白菜", Vegetable),
        ("dish_007", "糖醋里脊", HotDish),
        ("dish_008", "鱼香肉丝", HotDish),
        ("dish_009", "清蒸鲈鱼", Meat),
        ("dish_010", "白米饭", Staple),
    ]
    .into_iter()
    .map(|(code, desc, category)| {
        (
            code.to_string(),
            Dish::new(code.to_string(), desc.to_string(), category),
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dishes_are_keyed_by_code() {
        let dishes = default_dishes();
        assert_eq!(dishes.len(), 10);
        for (code, dish) in &dishes {
            assert_eq!(code, &dish.dish_code);
        }
        assert_eq!(dishes.keys().next().map(String::as_str), Some("dish_001"));
        assert_eq!(dishes.keys().last().map(String::as_str), Some("dish_010"));
    }

    #[test]
    fn test_category_parse_accepts_label_and_alias() {
        assert_eq!("热菜".parse::<DishCategory>(), Ok(DishCategory::HotDish));
        assert_eq!("staple".parse::<DishCategory>(), Ok(DishCategory::Staple));
        assert!("dessert".parse::<DishCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let dish = Dish::new("dish_011".into(), "酸辣汤".into(), DishCategory::Soup);
        let json = serde_json::to_value(&dish).unwrap();
        assert_eq!(json["category"], "汤类");

        let parsed: Dish = serde_json::from_str(
            r#"{"dish_code":"dish_012","dish_desc":"拍黄瓜","category":"cold_dish"}"#,
        )
        .unwrap();
        assert_eq!(parsed.category, DishCategory::ColdDish);
    }

    #[test]
    fn test_update_merges_provided_fields() {
        let mut dish = Dish::new("dish_013".into(), "old".into(), DishCategory::Meat);
        dish.update(Some("new".into()), None);
        assert_eq!(dish.dish_desc, "new");
        assert_eq!(dish.category, DishCategory::Meat);
        dish.update(None, Some(DishCategory::Specialty));
        assert_eq!(dish.category, DishCategory::Specialty);
    }
}
