//! Layered armor and health model shared by every combatant

use serde::{Deserialize, Serialize};

/// Health of an unarmored combatant
pub const BASE_HEALTH: i32 = 100;
/// Full helmet durability
pub const HELMET_DURABILITY: i32 = 50;
/// Full vest durability
pub const VEST_DURABILITY: i32 = 60;

/// Armor layer kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorKind {
    Helmet,
    Vest,
}

impl ArmorKind {
    fn full_durability(&self) -> i32 {
        match self {
            ArmorKind::Helmet => HELMET_DURABILITY,
            ArmorKind::Vest => VEST_DURABILITY,
        }
    }
}

/// Health plus the two optional armor layers.
///
/// While a layer is present it contributes its full-durability value to max
/// health; its remaining durability only governs when the layer breaks.
#[derive(Debug, Clone)]
pub struct Vitals {
    current_health: i32,
    /// Remaining helmet durability, `None` when absent
    helmet: Option<i32>,
    /// Remaining vest durability, `None` when absent
    vest: Option<i32>,
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new()
    }
}

impl Vitals {
    pub fn new() -> Self {
        Self {
            current_health: BASE_HEALTH,
            helmet: None,
            vest: None,
        }
    }

    pub fn health(&self) -> i32 {
        self.current_health
    }

    pub fn max_health(&self) -> i32 {
        let mut max = BASE_HEALTH;
        if self.helmet.is_some() {
            max += HELMET_DURABILITY;
        }
        if self.vest.is_some() {
            max += VEST_DURABILITY;
        }
        max
    }

    pub fn has_layer(&self, kind: ArmorKind) -> bool {
        match kind {
            ArmorKind::Helmet => self.helmet.is_some(),
            ArmorKind::Vest => self.vest.is_some(),
        }
    }

    pub fn layer_durability(&self, kind: ArmorKind) -> Option<i32> {
        match kind {
            ArmorKind::Helmet => self.helmet,
            ArmorKind::Vest => self.vest,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current_health == 0
    }

    /// Install a layer at full durability, overwriting any existing layer of
    /// the same kind. Gaining a new layer raises current health by the max
    /// health delta.
    pub fn equip(&mut self, kind: ArmorKind) {
        let old_max = self.max_health();
        let slot = match kind {
            ArmorKind::Helmet => &mut self.helmet,
            ArmorKind::Vest => &mut self.vest,
        };
        *slot = Some(kind.full_durability());
        let new_max = self.max_health();
        if new_max > old_max {
            self.current_health += new_max - old_max;
        }
        self.clamp();
    }

    /// Drop a layer; current health clamps down to the lowered max
    fn discard(&mut self, kind: ArmorKind) {
        match kind {
            ArmorKind::Helmet => self.helmet = None,
            ArmorKind::Vest => self.vest = None,
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        self.current_health = self.current_health.clamp(0, self.max_health());
    }

    /// Apply incoming damage through the armor layers.
    ///
    /// With both layers present the one with more remaining durability
    /// absorbs (tie goes to the helmet), and health drops by the same
    /// amount. Layer breakage thresholds derive from the tuning constants so
    /// retuning armor re-derives them automatically.
    ///
    /// Returns `true` when the damage was lethal.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        let weaker_discard_threshold = BASE_HEALTH + HELMET_DURABILITY;
        let both_discard_threshold = BASE_HEALTH;

        match (self.helmet, self.vest) {
            (Some(helmet), Some(vest)) => {
                if helmet >= vest {
                    self.helmet = Some(helmet - amount);
                } else {
                    self.vest = Some(vest - amount);
                }
                self.current_health -= amount;

                let health = self.current_health;
                if health <= both_discard_threshold {
                    self.discard(ArmorKind::Helmet);
                    self.discard(ArmorKind::Vest);
                } else if health <= weaker_discard_threshold {
                    // Weaker of the two layers at time of check; the helmet
                    // wins ties, so a tie discards the vest.
                    let weaker = if self.helmet.unwrap_or(0) >= self.vest.unwrap_or(0) {
                        ArmorKind::Vest
                    } else {
                        ArmorKind::Helmet
                    };
                    self.discard(weaker);
                }
            }
            (Some(durability), None) | (None, Some(durability)) => {
                let kind = if self.helmet.is_some() {
                    ArmorKind::Helmet
                } else {
                    ArmorKind::Vest
                };
                let remaining = durability - amount;
                match kind {
                    ArmorKind::Helmet => self.helmet = Some(remaining),
                    ArmorKind::Vest => self.vest = Some(remaining),
                }
                self.current_health -= amount;

                if remaining <= 0 || self.current_health <= both_discard_threshold {
                    self.discard(kind);
                }
            }
            (None, None) => {
                self.current_health -= amount;
            }
        }

        self.clamp();
        self.is_dead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helmet_raises_max_and_current() {
        let mut vitals = Vitals::new();
        assert_eq!(vitals.health(), 100);
        vitals.equip(ArmorKind::Helmet);
        assert_eq!(vitals.max_health(), 150);
        assert_eq!(vitals.health(), 150);
    }

    #[test]
    fn losing_helmet_clamps_health_down() {
        let mut vitals = Vitals::new();
        vitals.equip(ArmorKind::Helmet);
        vitals.discard(ArmorKind::Helmet);
        assert_eq!(vitals.max_health(), 100);
        assert_eq!(vitals.health(), 100);
    }

    #[test]
    fn re_equipping_resets_durability_without_raising_health() {
        let mut vitals = Vitals::new();
        vitals.equip(ArmorKind::Vest);
        vitals.apply_damage(5);
        assert_eq!(vitals.layer_durability(ArmorKind::Vest), Some(55));
        vitals.equip(ArmorKind::Vest);
        assert_eq!(vitals.layer_durability(ArmorKind::Vest), Some(60));
        assert_eq!(vitals.max_health(), 160);
        assert_eq!(vitals.health(), 155);
    }

    #[test]
    fn stronger_layer_absorbs_and_weaker_breaks() {
        let mut vitals = Vitals::new();
        vitals.equip(ArmorKind::Helmet);
        vitals.equip(ArmorKind::Vest);
        assert_eq!(vitals.health(), 210);

        // Vest (60) outranks the helmet (50), absorbs the hit and becomes
        // the weaker layer at the <=150 check.
        vitals.apply_damage(70);
        assert!(!vitals.has_layer(ArmorKind::Vest));
        assert!(vitals.has_layer(ArmorKind::Helmet));
        assert_eq!(vitals.layer_durability(ArmorKind::Helmet), Some(50));
        assert_eq!(vitals.max_health(), 150);
        assert_eq!(vitals.health(), 140);
    }

    #[test]
    fn tie_sends_damage_to_helmet() {
        let mut vitals = Vitals::new();
        vitals.equip(ArmorKind::Helmet);
        vitals.equip(ArmorKind::Vest);
        // Wear the vest down to the helmet's durability.
        vitals.apply_damage(10);
        assert_eq!(vitals.layer_durability(ArmorKind::Vest), Some(50));
        vitals.apply_damage(10);
        assert_eq!(vitals.layer_durability(ArmorKind::Helmet), Some(40));
        assert_eq!(vitals.layer_durability(ArmorKind::Vest), Some(50));
    }

    #[test]
    fn heavy_hit_strips_both_layers() {
        let mut vitals = Vitals::new();
        vitals.equip(ArmorKind::Helmet);
        vitals.equip(ArmorKind::Vest);
        vitals.apply_damage(115);
        assert!(!vitals.has_layer(ArmorKind::Helmet));
        assert!(!vitals.has_layer(ArmorKind::Vest));
        assert_eq!(vitals.max_health(), 100);
        assert_eq!(vitals.health(), 95);
    }

    #[test]
    fn single_layer_breaks_when_spent() {
        let mut vitals = Vitals::new();
        vitals.equip(ArmorKind::Helmet);
        vitals.apply_damage(30);
        assert_eq!(vitals.layer_durability(ArmorKind::Helmet), Some(20));
        vitals.apply_damage(25);
        assert!(!vitals.has_layer(ArmorKind::Helmet));
        assert_eq!(vitals.max_health(), 100);
        assert_eq!(vitals.health(), 95);
    }

    #[test]
    fn health_never_escapes_bounds() {
        let mut vitals = Vitals::new();
        vitals.equip(ArmorKind::Helmet);
        vitals.equip(ArmorKind::Vest);
        for _ in 0..20 {
            vitals.apply_damage(37);
            assert!(vitals.health() >= 0);
            assert!(vitals.health() <= vitals.max_health());
        }
        assert!(vitals.is_dead());
    }

    #[test]
    fn lethal_damage_floors_at_zero() {
        let mut vitals = Vitals::new();
        assert!(vitals.apply_damage(500));
        assert_eq!(vitals.health(), 0);
    }
}
