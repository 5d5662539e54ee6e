use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::dish::entities::{Dish, DishCatalog};

/// On-disk shape: a JSON object keyed by dish code.
pub type DishDocument = BTreeMap<String, Dish>;

/// Re-keys entries whose key disagrees with the record's own code.
pub fn catalog_from_document(document: DishDocument) -> DishCatalog {
    document
        .into_iter()
        .map(|(key, dish)| {
            if key != dish.dish_code {
                warn!(
                    key = %key,
                    dish_code = %dish.dish_code,
                    "Catalog entry key does not match its dish_code, re-keying"
                );
            }
            (dish.dish_code.clone(), dish)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dish::entities::DishCategory;

    #[test]
    fn test_mismatched_key_is_rekeyed() {
        let mut document = DishDocument::new();
        document.insert(
            "wrong_key".into(),
            Dish::new("dish_020".into(), "炒饭".into(), DishCategory::Staple),
        );

        let catalog = catalog_from_document(document);
        assert!(catalog.contains_key("dish_020"));
        assert!(!catalog.contains_key("wrong_key"));
    }
}
