//! Data models for extracted creature records.

use crate::vocabulary::{Alignment, CreatureType, Size, Skill};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One creature, assembled from a single stat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub name: String,
    pub challenge_rating: ChallengeRating,
    pub attributes: Option<Attributes>,
    pub defense: Option<Defense>,
    pub offense: Option<Offense>,
    pub statistics: Option<Statistics>,
}

impl CreatureRecord {
    pub fn to_json(&self, pretty: bool) -> crate::error::Result<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        })
    }
}

/// Challenge rating as a fraction. Whole ratings have a denominator of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRating {
    pub numerator: u32,
    pub denominator: u32,
}

impl ChallengeRating {
    pub fn whole(value: u32) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Name and challenge rating read from the header line.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub challenge_rating: ChallengeRating,
    pub experience_points: Option<u64>,
}

/// The line above DEFENSE: XP, alignment, size, type, initiative, senses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub alignment: Option<Alignment>,
    pub size: Option<Size>,
    pub creature_type: Option<CreatureType>,
    pub subtypes: Vec<String>,
    pub initiative: Option<i32>,
    pub experience_points: Option<u64>,
    pub senses: Vec<String>,
    pub perception: Option<i32>,
    pub aura: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defense {
    pub armor_class: Option<ArmorClass>,
    pub hit_points: Option<u32>,
    pub hit_die: Option<u32>,
    /// Full hit dice expression, e.g. `2d8+2`.
    pub hit_dice: Option<String>,
    pub fort: Option<i32>,
    pub reflex: Option<i32>,
    pub will: Option<i32>,
    pub spell_resistance: Option<u32>,
    pub damage_reduction: Option<String>,
    pub regeneration: Option<String>,
    pub defensive_abilities: Vec<String>,
    pub immunities: Vec<String>,
    pub resistances: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorClass {
    pub total: u32,
    pub touch: Option<u32>,
    pub flat_footed: Option<u32>,
    pub bonuses: AcBonuses,
}

/// Typed armor class bonuses that the record tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcBonusType {
    Dodge,
    Natural,
    Deflection,
    Insight,
    Sacred,
    Profane,
}

impl AcBonusType {
    pub const ALL: [AcBonusType; 6] = [
        AcBonusType::Dodge,
        AcBonusType::Natural,
        AcBonusType::Deflection,
        AcBonusType::Insight,
        AcBonusType::Sacred,
        AcBonusType::Profane,
    ];

    /// Word that follows the bonus in the AC breakdown.
    pub fn keyword(&self) -> &'static str {
        match self {
            AcBonusType::Dodge => "dodge",
            AcBonusType::Natural => "natural",
            AcBonusType::Deflection => "deflection",
            AcBonusType::Insight => "insight",
            AcBonusType::Sacred => "sacred",
            AcBonusType::Profane => "profane",
        }
    }
}

/// Bonus per type. A bonus missing from the breakdown is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcBonuses {
    pub dodge: i32,
    pub natural: i32,
    pub deflection: i32,
    pub insight: i32,
    pub sacred: i32,
    pub profane: i32,
}

impl AcBonuses {
    pub fn get(&self, bonus: AcBonusType) -> i32 {
        match bonus {
            AcBonusType::Dodge => self.dodge,
            AcBonusType::Natural => self.natural,
            AcBonusType::Deflection => self.deflection,
            AcBonusType::Insight => self.insight,
            AcBonusType::Sacred => self.sacred,
            AcBonusType::Profane => self.profane,
        }
    }

    pub fn set(&mut self, bonus: AcBonusType, value: i32) {
        match bonus {
            AcBonusType::Dodge => self.dodge = value,
            AcBonusType::Natural => self.natural = value,
            AcBonusType::Deflection => self.deflection = value,
            AcBonusType::Insight => self.insight = value,
            AcBonusType::Sacred => self.sacred = value,
            AcBonusType::Profane => self.profane = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offense {
    pub speed: Option<Speed>,
    pub melee: Option<Attack>,
    pub ranged: Option<Attack>,
    pub special_attacks: Vec<String>,
    pub spell_like_abilities: Option<SpellLikeAbilities>,
}

/// Movement rates in feet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speed {
    pub land: u32,
    pub fly: Option<u32>,
    pub swim: Option<u32>,
    pub burrow: Option<u32>,
    pub fly_maneuverability: Option<String>,
}

/// First attack option of a Melee or Ranged line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    /// Weapon or natural attack, e.g. `mwk longsword` or `2 claws`.
    pub label: String,
    /// One bonus per iterative attack.
    pub attack_bonuses: Vec<i32>,
    pub damage: String,
    pub damage_modifier: i32,
    pub crit_range: String,
    pub crit_multiplier: Option<String>,
    pub effect: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellLikeAbilities {
    pub caster_level: Option<u32>,
    pub concentration: Option<i32>,
    pub groups: Vec<SpellLikeGroup>,
}

/// Abilities sharing one usage frequency (`Constant`, `At will`, `3/day`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellLikeGroup {
    pub frequency: String,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub abilities: AbilityScores,
    pub base_attack: Option<i32>,
    pub cmb: Option<i32>,
    pub cmd: Option<u32>,
    pub feats: Vec<String>,
    /// Only skills printed in the block. An untrained skill has no entry.
    pub skills: BTreeMap<Skill, i32>,
    pub languages: Vec<String>,
    pub special_qualities: Vec<String>,
    pub gear: Vec<String>,
}

/// Ability scores. A score printed as `—` (nonabilities) is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: Option<u32>,
    pub dex: Option<u32>,
    pub con: Option<u32>,
    pub int: Option<u32>,
    pub wis: Option<u32>,
    pub cha: Option<u32>,
}
