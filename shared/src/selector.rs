use log::debug;
use rand::Rng;

use crate::catalog::{Catalog, Prize};
use crate::inventory::Inventory;

/// A wedge can be drawn only if it has a usable weight and its label still
/// has stock.
pub fn is_eligible(prize: &Prize, inventory: &Inventory) -> bool {
    prize.weight.is_finite() && prize.weight > 0.0 && inventory.count(&prize.label) > 0
}

/// Weighted draw over eligible wedges, scanning in catalog order. The first
/// wedge whose cumulative weight reaches the draw wins, so a seeded rng
/// always lands on the same index.
///
/// Returns `None` when nothing is eligible.
pub fn select_prize<R: Rng + ?Sized>(
    catalog: &Catalog,
    inventory: &Inventory,
    rng: &mut R,
) -> Option<usize> {
    let mut eligible: Vec<(usize, f64)> = catalog
        .iter()
        .enumerate()
        .filter(|(_, prize)| is_eligible(prize, inventory))
        .map(|(index, prize)| (index, prize.weight))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let mut total: f64 = eligible.iter().map(|(_, w)| w).sum();
    if !total.is_finite() {
        // Each weight is finite but the sum overflowed. Only ratios matter.
        let largest = eligible.iter().map(|&(_, w)| w).fold(0.0, f64::max);
        for (_, weight) in eligible.iter_mut() {
            *weight /= largest;
        }
        total = eligible.iter().map(|(_, w)| w).sum();
    }

    let draw = rng.gen_range(0.0..total);
    let mut remainder = draw;
    for &(index, weight) in &eligible {
        remainder -= weight;
        if remainder <= 0.0 {
            debug!("Drew {:.4} of {:.4}, landed on wedge {}", draw, total, index);
            return Some(index);
        }
    }

    // Float drift can leave a sliver past the last wedge.
    eligible.last().map(|&(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn only_towel_left() -> Inventory {
        let mut inventory = Inventory::baseline();
        for label in ["Sticker", "Pen", "Pouch", "Keychain", "Tote Bag"] {
            inventory.set_count(label, 0);
        }
        inventory.set_count("Towel", 1);
        inventory
    }

    #[test]
    fn test_only_towel_in_stock_always_picks_towel() {
        let catalog = Catalog::booth_default();
        let inventory = only_towel_left();
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(select_prize(&catalog, &inventory, &mut rng), Some(2));
        }
    }

    #[test]
    fn test_all_zero_is_no_eligible_prize() {
        let catalog = Catalog::booth_default();
        let mut inventory = Inventory::baseline();
        for label in catalog.distinct_labels() {
            inventory.set_count(label, 0);
        }
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_prize(&catalog, &inventory, &mut rng), None);
    }

    #[test]
    fn test_never_picks_out_of_stock_label() {
        let catalog = Catalog::booth_default();
        let mut inventory = Inventory::baseline();
        inventory.set_count("Sticker", 0);
        inventory.set_count("Keychain", 0);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..2000 {
            let index = select_prize(&catalog, &inventory, &mut rng).unwrap();
            let prize = catalog.get(index).unwrap();
            assert!(inventory.count(&prize.label) > 0, "picked {}", prize.label);
        }
    }

    #[test]
    fn test_zero_weight_wedges_are_skipped() {
        let catalog = Catalog::new(vec![
            Prize::weighted("Pen", 0.0),
            Prize::weighted("Towel", f64::NAN),
            Prize::weighted("Pouch", 2.0),
        ]);
        let inventory = Inventory::baseline();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(select_prize(&catalog, &inventory, &mut rng), Some(2));
        }

        let no_weight = Catalog::new(vec![Prize::weighted("Pen", 0.0)]);
        assert_eq!(select_prize(&no_weight, &inventory, &mut rng), None);
    }

    #[test]
    fn test_overflowing_weights_still_draw() {
        let catalog = Catalog::new(vec![
            Prize::weighted("Pen", 1e308),
            Prize::weighted("Towel", 1e308),
        ]);
        let inventory = Inventory::baseline();
        let mut seen = [false; 2];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let index = select_prize(&catalog, &inventory, &mut rng).unwrap();
            seen[index] = true;
        }
        assert_eq!(seen, [true, true]);

        // Stock still filters after rescaling.
        let mut towel_gone = Inventory::baseline();
        towel_gone.set_count("Towel", 0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_prize(&catalog, &towel_gone, &mut rng), Some(0));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let catalog = Catalog::booth_default();
        let inventory = Inventory::baseline();
        let draws = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| select_prize(&catalog, &inventory, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(42), draws(42));
    }

    #[test]
    fn test_scan_order_decides_boundary() {
        // Always draws the low end of the range, so the first eligible wedge wins.
        struct Floor;
        impl rand::RngCore for Floor {
            fn next_u32(&mut self) -> u32 {
                0
            }

            fn next_u64(&mut self) -> u64 {
                0
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0)
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                dest.fill(0);
                Ok(())
            }
        }
        let catalog = Catalog::booth_default();
        let mut inventory = Inventory::baseline();
        inventory.set_count("Sticker", 0);
        assert_eq!(select_prize(&catalog, &inventory, &mut Floor), Some(1));
    }
}
