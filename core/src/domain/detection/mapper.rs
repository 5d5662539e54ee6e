//! Class label to dish code resolution.
//!
//! This is a stand-in for a trained label correspondence: the label is hashed into the
//! current catalog's code list, so a label can resolve to a different dish whenever the
//! catalog grows or shrinks.

use sha2::{Digest, Sha256};

use crate::domain::dish::entities::{Dish, DishCatalog};

pub fn hash_class_label(class_label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(class_label.as_bytes());
    let hash = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash[..8]);
    u64::from_be_bytes(prefix)
}

/// Returns `None` only when the catalog is empty.
pub fn map_class_to_dish<'a>(class_label: &str, catalog: &'a DishCatalog) -> Option<&'a Dish> {
    if catalog.is_empty() {
        return None;
    }

    let index = (hash_class_label(class_label) % catalog.len() as u64) as usize;
    catalog.values().nth(index)
}

pub fn class_name_for(class_id: usize, class_names: &[String]) -> String {
    class_names
        .get(class_id)
        .cloned()
        .unwrap_or_else(|| format!("class_{}", class_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dish::entities::{DishCategory, default_dishes};

    #[test]
    fn test_mapping_is_deterministic() {
        let catalog = default_dishes();
        let first = map_class_to_dish("bowl", &catalog).map(|d| d.dish_code.clone());
        let second = map_class_to_dish("bowl", &catalog).map(|d| d.dish_code.clone());
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_mapping_resolves_to_catalog_entry() {
        let catalog = default_dishes();
        for label in ["pizza", "broccoli", "class_7", "sandwich", ""] {
            let dish = map_class_to_dish(label, &catalog).unwrap();
            assert!(catalog.contains_key(&dish.dish_code));
        }
    }

    #[test]
    fn test_mapping_empty_catalog() {
        assert!(map_class_to_dish("pizza", &DishCatalog::new()).is_none());
    }

    #[test]
    fn test_mapping_uses_catalog_size_at_call_time() {
        let mut catalog = DishCatalog::new();
        catalog.insert(
            "dish_100".into(),
            Dish::new("dish_100".into(), "only".into(), DishCategory::Staple),
        );
        let dish = map_class_to_dish("anything", &catalog).unwrap();
        assert_eq!(dish.dish_code, "dish_100");
    }

    #[test]
    fn test_class_name_fallback() {
        let names = vec!["person".to_string(), "bowl".to_string()];
        assert_eq!(class_name_for(1, &names), "bowl");
        assert_eq!(class_name_for(45, &names), "class_45");
    }
}
