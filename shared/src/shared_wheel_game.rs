use log::{debug, info};
use rand::Rng;

use crate::admin::{AdminError, AdminGate};
use crate::catalog::Catalog;
use crate::config::RaffleConfig;
use crate::constants::OUT_OF_STOCK_MESSAGE;
use crate::inventory::{Inventory, InventoryDraft};
use crate::selector::select_prize;
use crate::store::{InventoryStore, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

/// Everything the UI needs to animate one spin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub index: usize,
    pub label: String,
    pub from_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Started(SpinPlan),
    /// A spin is already in flight.
    Busy,
    /// Every count is zero; the button should not have been live.
    NothingInStock,
    /// Stock exists but no wedge could be drawn for it.
    OutOfStock,
}

// === Wheel geometry ===
//
// Wedges run clockwise from 12 o'clock. The wheel turns clockwise by the
// accumulated rotation, and the pointer sits at a fixed clockwise angle
// from 12 o'clock.

pub fn wedge_size(wedge_count: usize) -> f64 {
    360.0 / wedge_count.max(1) as f64
}

pub fn wedge_center(index: usize, wedge_count: usize) -> f64 {
    (index as f64 + 0.5) * wedge_size(wedge_count)
}

/// Smallest non-negative turn that brings the wedge's center under the pointer.
pub fn forward_delta(current: f64, index: usize, wedge_count: usize, pointer: f64) -> f64 {
    (pointer - wedge_center(index, wedge_count) - current).rem_euclid(360.0)
}

pub fn target_rotation(
    current: f64,
    turns: u32,
    index: usize,
    wedge_count: usize,
    pointer: f64,
    jitter: f64,
) -> f64 {
    current + turns as f64 * 360.0 + forward_delta(current, index, wedge_count, pointer) + jitter
}

/// Which wedge sits under the pointer at a given rotation.
pub fn wedge_under_pointer(rotation: f64, wedge_count: usize, pointer: f64) -> usize {
    let under = (pointer - rotation).rem_euclid(360.0);
    ((under / wedge_size(wedge_count)).floor() as usize).min(wedge_count.saturating_sub(1))
}

/// Keeps jitter well inside half a wedge so it can never tip into a neighbour.
pub fn jitter_bound(jitter_degrees: f64, wedge_count: usize) -> f64 {
    jitter_degrees.abs().min(wedge_size(wedge_count) * 0.45)
}

/// Spin controller plus the stock it spends. One instance per wheel; the
/// rendering layer borrows it rather than reaching for globals.
pub struct RaffleWheel<S> {
    catalog: Catalog,
    inventory: Inventory,
    store: InventoryStore<S>,
    config: RaffleConfig,
    rotation: f64,
    phase: SpinPhase,
    pending: Option<usize>,
    winner: Option<String>,
    notice: Option<String>,
}

impl<S: KeyValueStore> RaffleWheel<S> {
    pub fn new(catalog: Catalog, store: InventoryStore<S>, config: RaffleConfig) -> Self {
        let inventory = store.load();
        Self {
            catalog,
            inventory,
            store,
            config,
            rotation: 0.0,
            phase: SpinPhase::Idle,
            pending: None,
            winner: None,
            notice: None,
        }
    }

    /// The booth wheel with its baseline stock, persisted through `backend`.
    pub fn booth(backend: S, config: RaffleConfig) -> Self {
        let store = InventoryStore::new(backend, config.storage_key.clone(), Inventory::baseline());
        Self::new(Catalog::booth_default(), store, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    pub fn store(&self) -> &InventoryStore<S> {
        &self.store
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && self.inventory.any_in_stock()
    }

    /// Draws a wedge and plans the animation toward it. The rotation is
    /// advanced to the target right away; stock is only spent in `settle`.
    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpinOutcome {
        if self.is_spinning() {
            return SpinOutcome::Busy;
        }
        if !self.inventory.any_in_stock() {
            return SpinOutcome::NothingInStock;
        }

        self.phase = SpinPhase::Spinning;
        self.winner = None;
        self.notice = None;

        let Some(index) = select_prize(&self.catalog, &self.inventory, rng) else {
            self.phase = SpinPhase::Idle;
            self.notice = Some(OUT_OF_STOCK_MESSAGE.to_string());
            return SpinOutcome::OutOfStock;
        };
        let label = match self.catalog.get(index) {
            Some(prize) => prize.label.clone(),
            None => {
                self.phase = SpinPhase::Idle;
                self.notice = Some(OUT_OF_STOCK_MESSAGE.to_string());
                return SpinOutcome::OutOfStock;
            }
        };

        let wedges = self.catalog.len();
        let turns = rng.gen_range(self.config.turn_range()).max(1);
        let bound = jitter_bound(self.config.jitter_degrees, wedges);
        let jitter = if bound > 0.0 { rng.gen_range(-bound..=bound) } else { 0.0 };

        let from_rotation = self.rotation;
        let target = target_rotation(from_rotation, turns, index, wedges, self.config.pointer_angle, jitter);
        self.rotation = target;
        self.pending = Some(index);

        debug!(
            "Spinning to wedge {} ({}) over {} turns: {:.1} -> {:.1}",
            index, label, turns, from_rotation, target
        );

        SpinOutcome::Started(SpinPlan {
            index,
            label,
            from_rotation,
            target_rotation: target,
            duration_ms: self.config.spin_duration_ms,
        })
    }

    /// Commits the in-flight spin: spends one unit of the winning label,
    /// persists, and returns to idle. Does nothing when idle.
    pub fn settle(&mut self) -> Option<String> {
        if !self.is_spinning() {
            return None;
        }
        self.phase = SpinPhase::Idle;

        let label = self
            .pending
            .take()
            .and_then(|index| self.catalog.get(index))
            .map(|prize| prize.label.clone())?;

        let remaining = self.inventory.decrement(&label);
        self.store.save(&self.inventory);
        info!("Awarded {} ({} left)", label, remaining);

        self.winner = Some(label.clone());
        Some(label)
    }

    /// Replaces the whole stock table with the coerced draft.
    pub fn commit_draft(&mut self, gate: &AdminGate, draft: &InventoryDraft) -> Result<(), AdminError> {
        gate.ensure_unlocked()?;
        self.inventory = draft.resolve();
        self.store.save(&self.inventory);
        info!("Stock updated from admin panel ({} units total)", self.inventory.total());
        Ok(())
    }

    /// Drops the persisted snapshot and reloads. Returns what was actually
    /// loaded, which is still the old stock if storage refused the removal.
    pub fn restore_defaults(&mut self, gate: &AdminGate) -> Result<Inventory, AdminError> {
        gate.ensure_unlocked()?;
        self.store.reset();
        self.inventory = self.store.load();
        info!("Stock restored to defaults");
        Ok(self.inventory.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wheel() -> RaffleWheel<MemoryStore> {
        RaffleWheel::booth(MemoryStore::new(), RaffleConfig::default())
    }

    fn empty_out(wheel: &mut RaffleWheel<MemoryStore>, keep: &[(&str, &str)]) {
        let mut gate = AdminGate::new(wheel.config().admin_password.clone());
        gate.unlock(&wheel.config().admin_password.clone());
        let mut draft = InventoryDraft::default();
        for label in wheel.catalog().distinct_labels() {
            draft.set(label, "0");
        }
        for (label, raw) in keep {
            draft.set(*label, *raw);
        }
        wheel.commit_draft(&gate, &draft).unwrap();
    }

    #[test]
    fn test_target_lands_on_chosen_wedge() {
        for wedges in [1usize, 3, 8, 13] {
            for index in 0..wedges {
                for turns in 4..=6 {
                    for current in [0.0, 17.5, 359.9, 4000.25] {
                        for pointer in [0.0, 90.0] {
                            let bound = jitter_bound(5.0, wedges);
                            for jitter in [-bound, 0.0, bound] {
                                let target = target_rotation(current, turns, index, wedges, pointer, jitter);
                                assert!(target > current);
                                assert_eq!(wedge_under_pointer(target, wedges, pointer), index);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_forward_delta_is_minimal() {
        // Wedge 0 of 8 is centered at 22.5, so it needs 337.5 to reach the top.
        assert!((forward_delta(0.0, 0, 8, 0.0) - 337.5).abs() < 1e-9);
        // Already aligned: no extra turn.
        assert!(forward_delta(337.5, 0, 8, 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_spin_then_settle_spends_one_unit() {
        let mut wheel = wheel();
        let mut rng = StdRng::seed_from_u64(3);
        let before = wheel.inventory().clone();

        let SpinOutcome::Started(plan) = wheel.spin(&mut rng) else {
            panic!("expected spin to start");
        };
        assert!(wheel.is_spinning());
        assert_eq!(plan.duration_ms, 3500);
        assert_eq!(wheel.winner(), None);
        // Nothing is spent until the animation settles.
        assert_eq!(wheel.inventory(), &before);

        let won = wheel.settle().unwrap();
        assert_eq!(won, plan.label);
        assert_eq!(wheel.winner(), Some(won.as_str()));
        assert_eq!(wheel.inventory().count(&won), before.count(&won) - 1);
        assert!(!wheel.is_spinning());
        assert_eq!(wedge_under_pointer(wheel.rotation(), 8, 0.0), plan.index);
    }

    #[test]
    fn test_spin_while_spinning_is_rejected() {
        let mut wheel = wheel();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(wheel.spin(&mut rng), SpinOutcome::Started(_)));
        let rotation = wheel.rotation();
        assert_eq!(wheel.spin(&mut rng), SpinOutcome::Busy);
        assert_eq!(wheel.rotation(), rotation);
    }

    #[test]
    fn test_rotation_keeps_increasing() {
        let mut wheel = wheel();
        let mut rng = StdRng::seed_from_u64(11);
        let mut last = wheel.rotation();
        for _ in 0..20 {
            let SpinOutcome::Started(plan) = wheel.spin(&mut rng) else {
                panic!("expected spin to start");
            };
            assert_eq!(plan.from_rotation, last);
            let gained = plan.target_rotation - last;
            assert!(gained >= 4.0 * 360.0 - 5.0 && gained < 7.0 * 360.0 + 5.0);
            last = plan.target_rotation;
            wheel.settle();
        }
    }

    #[test]
    fn test_settle_is_clamped_and_idle_settle_is_noop() {
        let mut wheel = wheel();
        empty_out(&mut wheel, &[("Towel", "1")]);
        let mut rng = StdRng::seed_from_u64(0);

        let SpinOutcome::Started(plan) = wheel.spin(&mut rng) else {
            panic!("expected spin to start");
        };
        assert_eq!(plan.label, "Towel");
        assert_eq!(plan.index, 2);
        assert_eq!(wheel.settle().as_deref(), Some("Towel"));
        assert_eq!(wheel.settle(), None);
        assert_eq!(wheel.settle(), None);
        assert_eq!(wheel.inventory().count("Towel"), 0);
    }

    #[test]
    fn test_empty_stock_is_a_noop() {
        let mut wheel = wheel();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(wheel.spin(&mut rng), SpinOutcome::Started(_)));
        wheel.settle();
        empty_out(&mut wheel, &[]);

        let rotation = wheel.rotation();
        assert!(!wheel.can_spin());
        assert_eq!(wheel.spin(&mut rng), SpinOutcome::NothingInStock);
        assert_eq!(wheel.rotation(), rotation);
        assert!(wheel.winner().is_some());
    }

    #[test]
    fn test_stock_off_the_wheel_reports_out_of_stock() {
        let mut wheel = wheel();
        let mut rng = StdRng::seed_from_u64(0);
        wheel.spin(&mut rng);
        wheel.settle();
        // Stock remains, but only for a label no wedge carries.
        empty_out(&mut wheel, &[("Retired Mug", "3")]);

        assert_eq!(wheel.spin(&mut rng), SpinOutcome::OutOfStock);
        assert!(!wheel.is_spinning());
        assert_eq!(wheel.winner(), None);
        assert_eq!(wheel.notice(), Some("Out of stock"));
    }

    #[test]
    fn test_duplicate_wedges_share_stock() {
        let mut wheel = wheel();
        empty_out(&mut wheel, &[("Sticker", "2")]);
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..2 {
            let SpinOutcome::Started(plan) = wheel.spin(&mut rng) else {
                panic!("expected spin to start");
            };
            assert!(plan.index == 0 || plan.index == 3);
            wheel.settle();
        }
        assert_eq!(wheel.inventory().count("Sticker"), 0);
        assert_eq!(wheel.spin(&mut rng), SpinOutcome::NothingInStock);
    }

    #[test]
    fn test_settlement_persists_stock() {
        let backend = MemoryStore::new();
        let config = RaffleConfig::default();
        let won = {
            let mut wheel = RaffleWheel::booth(&backend, config.clone());
            let mut rng = StdRng::seed_from_u64(8);
            wheel.spin(&mut rng);
            wheel.settle().unwrap()
        };
        let reloaded = RaffleWheel::booth(&backend, config);
        assert_eq!(
            reloaded.inventory().count(&won),
            Inventory::baseline().count(&won) - 1
        );
    }

    #[test]
    fn test_admin_draft_requires_unlock_and_clamps() {
        let mut wheel = wheel();
        let mut gate = AdminGate::new(wheel.config().admin_password.clone());
        let mut draft = wheel.inventory().to_draft();
        draft.set("Pouch", "-9");

        assert_eq!(wheel.commit_draft(&gate, &draft), Err(AdminError::Locked));
        assert_eq!(wheel.inventory().count("Pouch"), 10);

        assert!(!gate.unlock("nope"));
        assert!(!gate.unlock("still nope"));
        assert!(gate.unlock("booth2024"));
        wheel.commit_draft(&gate, &draft).unwrap();
        assert_eq!(wheel.inventory().count("Pouch"), 0);

        draft.set("Pouch", "many");
        wheel.commit_draft(&gate, &draft).unwrap();
        assert_eq!(wheel.store().load().count("Pouch"), 0);

        let restored = wheel.restore_defaults(&gate).unwrap();
        assert_eq!(restored, Inventory::baseline());
        assert_eq!(wheel.inventory(), &Inventory::baseline());
    }

    /// Reads and writes work, but the key can never be removed.
    struct StickyStore(MemoryStore);

    impl KeyValueStore for StickyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.set_item(key, value)
        }

        fn remove_item(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("denied".to_string()))
        }
    }

    #[test]
    fn test_failed_reset_reports_the_stock_still_held() {
        let backend = StickyStore(MemoryStore::new());
        let mut wheel = RaffleWheel::booth(backend, RaffleConfig::default());
        let mut gate = AdminGate::new(wheel.config().admin_password.clone());
        assert!(gate.unlock("booth2024"));
        let mut draft = wheel.inventory().to_draft();
        draft.set("Towel", "1");
        wheel.commit_draft(&gate, &draft).unwrap();

        let restored = wheel.restore_defaults(&gate).unwrap();
        assert_eq!(restored.count("Towel"), 1);
        assert_eq!(&restored, wheel.inventory());
        assert_ne!(restored, Inventory::baseline());
    }
}
