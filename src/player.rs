//! Player profile model for PLAYVAULT.
//!
//! A profile is the persisted game-state snapshot for one player: level,
//! vitals, combat stats, and attributes. Profiles are addressed by the
//! owning account's player id and round-trip through the slot store.

use serde::{Deserialize, Serialize};

/// Starting level for a fresh profile.
pub const STARTING_LEVEL: u32 = 1;

/// Starting (and maximum) health for a fresh profile.
pub const STARTING_MAX_HEALTH: f32 = 100.0;

/// Starting (and maximum) mana for a fresh profile.
pub const STARTING_MAX_MANA: f32 = 50.0;

/// Experience required to reach level 2.
pub const STARTING_NEXT_LEVEL_EXP: f32 = 100.0;

/// Growth factor applied to the level-up threshold after each level.
pub const STARTING_EXP_MULTIPLIER: f32 = 1.1;

/// Starting base damage.
pub const STARTING_BASE_DAMAGE: f32 = 5.0;

/// Starting critical hit chance, in percent.
pub const STARTING_CRITICAL_CHANCE: f32 = 5.0;

/// Starting critical hit damage, in percent of base damage.
pub const STARTING_CRITICAL_DAMAGE: f32 = 150.0;

/// Starting value for strength and dexterity.
pub const STARTING_ATTRIBUTE: i32 = 1;

/// Persisted game-state profile for one player.
///
/// Every field has a documented default so a profile loaded from an older
/// save (or synthesized for a player with no save at all) is never left
/// partially initialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    /// Owning account's player id. Empty on a freshly synthesized default.
    pub id: String,
    /// Denormalized username copy for display.
    pub username: String,

    /// Current level.
    pub level: u32,

    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,

    /// Current mana.
    pub mana: f32,
    /// Maximum mana.
    pub max_mana: f32,

    /// Experience accumulated toward the next level.
    pub current_exp: f32,
    /// Experience required for the next level.
    pub next_level_exp: f32,
    /// The level-1 threshold, kept for reset flows.
    pub initial_next_level_exp: f32,
    /// Growth factor for the threshold after each level-up.
    pub exp_multiplier: f32,

    /// Base attack damage.
    pub base_damage: f32,
    /// Critical hit chance, in percent.
    pub critical_chance: f32,
    /// Critical hit damage, in percent of base damage.
    pub critical_damage: f32,

    /// Strength attribute.
    pub strength: i32,
    /// Dexterity attribute.
    pub dexterity: i32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            id: String::new(),
            username: String::new(),
            level: STARTING_LEVEL,
            health: STARTING_MAX_HEALTH,
            max_health: STARTING_MAX_HEALTH,
            mana: STARTING_MAX_MANA,
            max_mana: STARTING_MAX_MANA,
            current_exp: 0.0,
            next_level_exp: STARTING_NEXT_LEVEL_EXP,
            initial_next_level_exp: STARTING_NEXT_LEVEL_EXP,
            exp_multiplier: STARTING_EXP_MULTIPLIER,
            base_damage: STARTING_BASE_DAMAGE,
            critical_chance: STARTING_CRITICAL_CHANCE,
            critical_damage: STARTING_CRITICAL_DAMAGE,
            strength: STARTING_ATTRIBUTE,
            dexterity: STARTING_ATTRIBUTE,
        }
    }
}

impl PlayerProfile {
    /// Create a default profile stamped with the owning account's identity.
    pub fn for_player(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            ..Self::default()
        }
    }

    /// Whether the player is dead.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage; health floors at zero.
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Restore health, capped at `max_health`.
    pub fn restore_health(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Restore the player to full health.
    pub fn revive(&mut self) {
        self.health = self.max_health;
    }

    /// Spend mana if enough is available.
    ///
    /// Returns `false` (leaving mana unchanged) when the cost exceeds the
    /// current pool.
    pub fn spend_mana(&mut self, amount: f32) -> bool {
        if self.mana < amount {
            return false;
        }
        self.mana -= amount;
        true
    }

    /// Recover mana, capped at `max_mana`.
    pub fn recover_mana(&mut self, amount: f32) {
        self.mana = (self.mana + amount).min(self.max_mana);
    }

    /// Grant experience, leveling up as thresholds are crossed.
    ///
    /// Surplus experience carries over, and the threshold grows by
    /// `exp_multiplier` per level, so a large grant can produce several
    /// level-ups at once. Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: f32) -> u32 {
        self.current_exp += amount;

        let mut levels = 0;
        while self.current_exp >= self.next_level_exp {
            self.current_exp -= self.next_level_exp;
            self.next_level_exp *= self.exp_multiplier;
            self.level += 1;
            levels += 1;
        }
        levels
    }
}
