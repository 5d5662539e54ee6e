//! Fabricated detections served while no detection model is loaded.

use rand::{Rng, seq::SliceRandom};

use crate::domain::{
    common::round_to,
    detection::entities::Detection,
    dish::entities::{Dish, DishCatalog},
};

const MAX_SIMULATED_DETECTIONS: usize = 3;
const MAX_PLACEMENT_ATTEMPTS: usize = 16;

fn random_box<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> [f32; 4] {
    let x_center = rng.gen_range(0.2..=0.8) * width;
    let y_center = rng.gen_range(0.2..=0.8) * height;
    let w = rng.gen_range(0.1..=0.4) * width;
    let h = rng.gen_range(0.1..=0.4) * height;

    [
        (x_center - w / 2.0).max(0.0),
        (y_center - h / 2.0).max(0.0),
        (x_center + w / 2.0).min(width),
        (y_center + h / 2.0).min(height),
    ]
}

fn overlaps(a: &[f32; 4], b: &[f32; 4]) -> bool {
    a[0] < b[2] && b[0] < a[2] && a[1] < b[3] && b[1] < a[3]
}

/// 1 to 3 distinct catalog dishes with random boxes and confidences in `[0.7, 0.99]`.
pub fn simulate_detections<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &DishCatalog,
    width: u32,
    height: u32,
) -> Vec<Detection> {
    if catalog.is_empty() || width == 0 || height == 0 {
        return Vec::new();
    }

    let dishes: Vec<&Dish> = catalog.values().collect();
    let count = rng
        .gen_range(1..=MAX_SIMULATED_DETECTIONS)
        .min(dishes.len());
    let (w, h) = (width as f32, height as f32);

    let mut placed: Vec<[f32; 4]> = Vec::with_capacity(count);
    let mut detections = Vec::with_capacity(count);

    for dish in dishes.choose_multiple(rng, count) {
        let mut bbox = random_box(rng, w, h);
        for _ in 1..MAX_PLACEMENT_ATTEMPTS {
            if !placed.iter().any(|other| overlaps(&bbox, other)) {
                break;
            }
            bbox = random_box(rng, w, h);
        }
        placed.push(bbox);

        let confidence = round_to(rng.gen_range(0.7..=0.99), 2);
        detections.push(Detection::new(dish, confidence, bbox, width, height));
    }

    detections
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::domain::dish::entities::default_dishes;

    #[test]
    fn test_simulated_boxes_are_well_formed() {
        let catalog = default_dishes();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for detection in simulate_detections(&mut rng, &catalog, 640, 480) {
                let [x1, y1, x2, y2] = detection.bbox_normalized;
                for v in detection.bbox_normalized {
                    assert!((0.0..=1.0).contains(&v), "seed {seed}: {v} out of range");
                }
                assert!(x1 < x2 && y1 < y2, "seed {seed}: degenerate normalized box");
                assert!(detection.bbox[0] < detection.bbox[2]);
                assert!(detection.bbox[1] < detection.bbox[3]);
                assert!((0.7..=0.99).contains(&detection.confidence));
            }
        }
    }

    #[test]
    fn test_simulated_codes_are_distinct_catalog_entries() {
        let catalog = default_dishes();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let detections = simulate_detections(&mut rng, &catalog, 100, 100);
            assert!((1..=3).contains(&detections.len()));

            let codes: HashSet<_> = detections.iter().map(|d| d.dish_code.clone()).collect();
            assert_eq!(codes.len(), detections.len());
            for detection in &detections {
                let dish = &catalog[&detection.dish_code];
                assert_eq!(dish.dish_desc, detection.dish_desc);
            }
        }
    }

    #[test]
    fn test_simulation_with_empty_catalog_or_image() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(simulate_detections(&mut rng, &DishCatalog::new(), 640, 480).is_empty());
        assert!(simulate_detections(&mut rng, &default_dishes(), 0, 480).is_empty());
    }

    #[test]
    fn test_simulation_caps_at_catalog_size() {
        let mut catalog = default_dishes();
        catalog.retain(|code, _| code == "dish_001");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let detections = simulate_detections(&mut rng, &catalog, 320, 240);
            assert_eq!(detections.len(), 1);
            assert_eq!(detections[0].dish_code, "dish_001");
        }
    }
}
