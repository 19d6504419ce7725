//! Finite vocabularies of the stat-block dialect.
//!
//! Each vocabulary exists twice: as an enum that ends up in the creature
//! record, and as a precompiled alternation pattern the field parsers search
//! with. Both are derived from the same `ALL` tables so they cannot drift.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Character class for a sign prefix. The source typography writes negative
/// numbers with an en-dash, em-dash or minus sign as often as with a hyphen.
pub const SIGN: &str = "[+\\-\u{2013}\u{2014}\u{2212}]";

/// The nine alignment codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    LawfulGood,
    NeutralGood,
    ChaoticGood,
    LawfulNeutral,
    Neutral,
    ChaoticNeutral,
    LawfulEvil,
    NeutralEvil,
    ChaoticEvil,
}

impl Alignment {
    pub const ALL: [Alignment; 9] = [
        Alignment::LawfulGood,
        Alignment::NeutralGood,
        Alignment::ChaoticGood,
        Alignment::LawfulNeutral,
        Alignment::Neutral,
        Alignment::ChaoticNeutral,
        Alignment::LawfulEvil,
        Alignment::NeutralEvil,
        Alignment::ChaoticEvil,
    ];

    /// Abbreviation as printed in a stat block (`LG`, `N`, `CE`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            Alignment::LawfulGood => "LG",
            Alignment::NeutralGood => "NG",
            Alignment::ChaoticGood => "CG",
            Alignment::LawfulNeutral => "LN",
            Alignment::Neutral => "N",
            Alignment::ChaoticNeutral => "CN",
            Alignment::LawfulEvil => "LE",
            Alignment::NeutralEvil => "NE",
            Alignment::ChaoticEvil => "CE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.code() == code)
    }
}

/// Size categories, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Fine,
    Diminutive,
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Gargantuan,
    Colossal,
}

impl Size {
    pub const ALL: [Size; 9] = [
        Size::Fine,
        Size::Diminutive,
        Size::Tiny,
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::Huge,
        Size::Gargantuan,
        Size::Colossal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Size::Fine => "Fine",
            Size::Diminutive => "Diminutive",
            Size::Tiny => "Tiny",
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
            Size::Huge => "Huge",
            Size::Gargantuan => "Gargantuan",
            Size::Colossal => "Colossal",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }
}

/// Creature type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureType {
    Aberration,
    Animal,
    Construct,
    Dragon,
    Fey,
    Humanoid,
    MagicalBeast,
    MonstrousHumanoid,
    Ooze,
    Outsider,
    Plant,
    Undead,
    Vermin,
}

impl CreatureType {
    pub const ALL: [CreatureType; 13] = [
        CreatureType::Aberration,
        CreatureType::Animal,
        CreatureType::Construct,
        CreatureType::Dragon,
        CreatureType::Fey,
        CreatureType::Humanoid,
        CreatureType::MagicalBeast,
        CreatureType::MonstrousHumanoid,
        CreatureType::Ooze,
        CreatureType::Outsider,
        CreatureType::Plant,
        CreatureType::Undead,
        CreatureType::Vermin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CreatureType::Aberration => "aberration",
            CreatureType::Animal => "animal",
            CreatureType::Construct => "construct",
            CreatureType::Dragon => "dragon",
            CreatureType::Fey => "fey",
            CreatureType::Humanoid => "humanoid",
            CreatureType::MagicalBeast => "magical beast",
            CreatureType::MonstrousHumanoid => "monstrous humanoid",
            CreatureType::Ooze => "ooze",
            CreatureType::Outsider => "outsider",
            CreatureType::Plant => "plant",
            CreatureType::Undead => "undead",
            CreatureType::Vermin => "vermin",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == label)
    }
}

/// Skills looked up in the Statistics section.
///
/// Craft and Knowledge are not listed: they only ever appear with a
/// specialisation and would need one entry per specialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Acrobatics,
    Appraise,
    Bluff,
    Climb,
    Diplomacy,
    DisableDevice,
    Disguise,
    EscapeArtist,
    Fly,
    HandleAnimal,
    Heal,
    Intimidate,
    Linguistics,
    Perception,
    Perform,
    Profession,
    Ride,
    SenseMotive,
    SleightOfHand,
    Spellcraft,
    Stealth,
    Survival,
    Swim,
    UseMagicDevice,
}

impl Skill {
    pub const ALL: [Skill; 24] = [
        Skill::Acrobatics,
        Skill::Appraise,
        Skill::Bluff,
        Skill::Climb,
        Skill::Diplomacy,
        Skill::DisableDevice,
        Skill::Disguise,
        Skill::EscapeArtist,
        Skill::Fly,
        Skill::HandleAnimal,
        Skill::Heal,
        Skill::Intimidate,
        Skill::Linguistics,
        Skill::Perception,
        Skill::Perform,
        Skill::Profession,
        Skill::Ride,
        Skill::SenseMotive,
        Skill::SleightOfHand,
        Skill::Spellcraft,
        Skill::Stealth,
        Skill::Survival,
        Skill::Swim,
        Skill::UseMagicDevice,
    ];

    /// Canonical snake_case key, identical to the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::Appraise => "appraise",
            Skill::Bluff => "bluff",
            Skill::Climb => "climb",
            Skill::Diplomacy => "diplomacy",
            Skill::DisableDevice => "disable_device",
            Skill::Disguise => "disguise",
            Skill::EscapeArtist => "escape_artist",
            Skill::Fly => "fly",
            Skill::HandleAnimal => "handle_animal",
            Skill::Heal => "heal",
            Skill::Intimidate => "intimidate",
            Skill::Linguistics => "linguistics",
            Skill::Perception => "perception",
            Skill::Perform => "perform",
            Skill::Profession => "profession",
            Skill::Ride => "ride",
            Skill::SenseMotive => "sense_motive",
            Skill::SleightOfHand => "sleight_of_hand",
            Skill::Spellcraft => "spellcraft",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
            Skill::Swim => "swim",
            Skill::UseMagicDevice => "use_magic_device",
        }
    }

    /// Name as printed in a stat block, e.g. `Sleight of Hand`.
    pub fn label(&self) -> String {
        skill_label(self.key())
    }
}

/// Words left lower-case when building a display label.
const MINOR_WORDS: &[&str] = &["of", "the", "and"];

/// Turn a snake_case skill key into its title-cased display label.
///
/// `use_magic_device` becomes `Use Magic Device`; minor words after the
/// first stay lower-case, so `sleight_of_hand` becomes `Sleight of Hand`.
pub fn skill_label(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(i, word)| {
            if i > 0 && MINOR_WORDS.contains(&word) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn alternation<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.map(regex::escape).collect::<Vec<_>>().join("|")
}

lazy_static! {
    pub static ref ALIGNMENT_PATTERN: Regex = Regex::new(&format!(
        r"\b({})\b",
        alternation(Alignment::ALL.iter().map(|a| a.code()))
    ))
    .unwrap();

    pub static ref SIZE_PATTERN: Regex = Regex::new(&format!(
        r"\b({})\b",
        alternation(Size::ALL.iter().map(|s| s.label()))
    ))
    .unwrap();

    pub static ref TYPE_PATTERN: Regex = Regex::new(&format!(
        r"\b({})\b(?: \(([^)]*)\))?",
        alternation(CreatureType::ALL.iter().map(|t| t.label()))
    ))
    .unwrap();

    /// `N Medium humanoid (human)` as one run. Preferred over the three
    /// standalone patterns because it cannot pick up a stray capital `N`.
    pub static ref ALIGNMENT_SIZE_TYPE_PATTERN: Regex = Regex::new(&format!(
        r"\b({}) ({}) ({})\b(?: \(([^)]*)\))?",
        alternation(Alignment::ALL.iter().map(|a| a.code())),
        alternation(Size::ALL.iter().map(|s| s.label())),
        alternation(CreatureType::ALL.iter().map(|t| t.label()))
    ))
    .unwrap();

    /// One lookup pattern per skill, built once from the display labels.
    /// A parenthesised specialisation between name and bonus is allowed.
    pub static ref SKILL_PATTERNS: Vec<(Skill, Regex)> = Skill::ALL
        .iter()
        .map(|skill| {
            let pattern = format!(
                r"\b{}(?: \([^)]*\))? ({}\d+)",
                regex::escape(&skill.label()),
                SIGN
            );
            (*skill, Regex::new(&pattern).unwrap())
        })
        .collect();
}
