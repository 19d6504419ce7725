//! Field parsers for stat-block regions.
//!
//! Each parser reads one field out of the raw text of a section region and
//! returns the field or its absent form: `None` for optional values, an empty
//! `Vec` for lists, `0` for typed AC bonuses. A parser never fails the whole
//! record; only [`parse_header`] can return an error.
//!
//! Regions are newline-joined lines, so an end of line terminates a field
//! the same way a `;` does in the printed paragraph.

use crate::error::{BestiaryError, Result};
use crate::models::{
    AbilityScores, AcBonusType, AcBonuses, ArmorClass, Attack, Attributes, ChallengeRating,
    Defense, Header, Offense, Speed, SpellLikeAbilities, SpellLikeGroup, Statistics,
};
use crate::vocabulary::{
    ALIGNMENT_PATTERN, ALIGNMENT_SIZE_TYPE_PATTERN, Alignment, CreatureType, SIGN, SIZE_PATTERN,
    SKILL_PATTERNS, Size, Skill, TYPE_PATTERN,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

/// Which attack line an attack parser reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Melee,
    Ranged,
}

impl AttackKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            AttackKind::Melee => "Melee",
            AttackKind::Ranged => "Ranged",
        }
    }
}

lazy_static! {
    static ref HEADER: Regex =
        Regex::new(r"^(?P<name>.+?)\s+CR\s+(?P<cr>\d+(?:/\d+)?)\b").unwrap();
    static ref EXPERIENCE: Regex = Regex::new(r"\bXP (\d[\d,]*)").unwrap();

    static ref INITIATIVE: Regex = Regex::new(&format!(r"\bInit ({SIGN}\d+)")).unwrap();
    static ref SENSES: Regex = Regex::new(r"(?m)\bSenses (.+)$").unwrap();
    static ref PERCEPTION: Regex = Regex::new(&format!(r"\bPerception ({SIGN}\d+)")).unwrap();
    static ref AURA: Regex = Regex::new(r"(?m)\bAura (.+)$").unwrap();

    static ref AC_TOTAL: Regex = Regex::new(r"\bAC (\d+)").unwrap();
    static ref AC_TOUCH: Regex = Regex::new(r"\btouch (\d+)").unwrap();
    static ref AC_FLAT_FOOTED: Regex = Regex::new(r"\bflat-footed (\d+)").unwrap();
    static ref AC_BONUSES: Vec<(AcBonusType, Regex)> = AcBonusType::ALL
        .iter()
        .map(|bonus| {
            let pattern = format!(r"({SIGN}\d+) {}\b", bonus.keyword());
            (*bonus, Regex::new(&pattern).unwrap())
        })
        .collect();
    static ref HIT_POINTS: Regex = Regex::new(r"\bhp (\d+)").unwrap();
    static ref HIT_DICE: Regex = Regex::new(r"\bhp \d+ \((?:\d+ HD; )?([^)]*)\)").unwrap();
    static ref HIT_DIE: Regex = Regex::new(r"\d*d(\d+)").unwrap();
    static ref FORT: Regex = Regex::new(&format!(r"\bFort ({SIGN}\d+)")).unwrap();
    static ref REFLEX: Regex = Regex::new(&format!(r"\bRef ({SIGN}\d+)")).unwrap();
    static ref WILL: Regex = Regex::new(&format!(r"\bWill ({SIGN}\d+)")).unwrap();
    static ref SPELL_RESISTANCE: Regex = Regex::new(r"\bSR (\d+)").unwrap();
    static ref DAMAGE_REDUCTION: Regex = Regex::new(r"\bDR (\d+/[^;\n]+)").unwrap();
    static ref REGENERATION: Regex =
        Regex::new(r"(?i)\bregeneration (\d+(?: \([^)]*\))?)").unwrap();
    static ref DEFENSIVE_ABILITIES: Regex =
        Regex::new(r"(?m)\bDefensive Abilities (.+)$").unwrap();
    static ref IMMUNITIES: Regex = Regex::new(r"(?m)\bImmune (.+)$").unwrap();
    static ref RESISTANCES: Regex = Regex::new(r"(?m)\bResist (.+)$").unwrap();
    static ref WEAKNESSES: Regex = Regex::new(r"(?m)\bWeaknesses (.+)$").unwrap();

    static ref LAND_SPEED: Regex = Regex::new(r"\bSpeed (\d+)").unwrap();
    static ref FLY_SPEED: Regex =
        Regex::new(r"\bfly (\d+)(?: ft\.)?(?: \(([a-z]+)\))?").unwrap();
    static ref SWIM_SPEED: Regex = Regex::new(r"\bswim (\d+)").unwrap();
    static ref BURROW_SPEED: Regex = Regex::new(r"\bburrow (\d+)").unwrap();
    static ref MELEE: Regex = attack_pattern(AttackKind::Melee);
    static ref RANGED: Regex = attack_pattern(AttackKind::Ranged);
    static ref SPECIAL_ATTACKS: Regex = Regex::new(
        r"(?m)\bSpecial Attacks (.+?)\s*(?:\b(?:Spell-Like Abilities|Spells Known|Spells Prepared|Sorcerer Spells|Cleric Spells|Wizard Spells|Domain)\b|$)"
    )
    .unwrap();
    static ref SPELL_LIKE_HEADER: Regex = Regex::new(&format!(
        r"\bSpell-Like Abilities \(CL (\d+)(?:st|nd|rd|th)?(?:;\s*concentration ({SIGN}\d+))?"
    ))
    .unwrap();
    static ref SPELL_LIKE_FREQUENCY: Regex =
        Regex::new(r"\b(Constant|At will|\d+/(?:day|week|month|year))\s*[\u{2014}\u{2013}]\s*")
            .unwrap();

    static ref ABILITY_SCORES: [Regex; 6] = ["Str", "Dex", "Con", "Int", "Wis", "Cha"]
        .map(|name| Regex::new(&format!(r"\b{name} (\d+|[\-\u{{2013}}\u{{2014}}])")).unwrap());
    static ref BASE_ATTACK: Regex = Regex::new(&format!(r"\bBase Atk ({SIGN}\d+)")).unwrap();
    static ref CMB: Regex = Regex::new(&format!(r"\bCMB ({SIGN}\d+)")).unwrap();
    static ref CMD: Regex = Regex::new(r"\bCMD (\d+)").unwrap();
    static ref FEATS: Regex = Regex::new(
        r"(?m)\bFeats (.+?)\s*(?:\b(?:Skills|Languages|SQ|Combat Gear|Other Gear|Gear)\b|$)"
    )
    .unwrap();
    static ref SKILLS_CLAUSE: Regex = Regex::new(
        r"(?m)\bSkills (.+?)\s*(?:\b(?:Languages|SQ|Combat Gear|Other Gear|Gear)\b|$)"
    )
    .unwrap();
    static ref LANGUAGES: Regex = Regex::new(
        r"(?m)\bLanguages (.+?)\s*(?:\b(?:SQ|Combat Gear|Other Gear|Gear)\b|$)"
    )
    .unwrap();
    static ref SPECIAL_QUALITIES: Regex =
        Regex::new(r"(?m)\bSQ (.+?)\s*(?:\b(?:Combat Gear|Other Gear|Gear)\b|$)").unwrap();
    static ref GEAR: Regex = Regex::new(r"\b(Combat Gear|Other Gear|Gear) ").unwrap();
}

/// `Melee mwk longsword +4/-1 (1d8+2/19-20/x2 plus trip)` and its parts.
fn attack_pattern(kind: AttackKind) -> Regex {
    let pattern = format!(
        r"\b{kind} (?P<label>.+?) (?P<bonuses>{SIGN}\d+(?:/{SIGN}\d+)*) \((?P<dice>\d+d\d+)(?P<modifier>{SIGN}\d+)?(?:/(?P<range>\d+[\-\u{{2013}}\u{{2014}}\u{{2212}}]\d+))?(?:/?(?P<multiplier>[x\u{{00d7}}]\d+))?(?P<effect> plus [^)]*)?[^)]*\)",
        kind = kind.keyword(),
    );
    Regex::new(&pattern).unwrap()
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Parse a signed integer, accepting any of the minus glyphs in [`SIGN`].
pub fn parse_signed(text: &str) -> Option<i32> {
    let normalized: String = text
        .trim()
        .chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            c => c,
        })
        .collect();
    normalized.parse().ok()
}

/// Parse a non-negative integer, ignoring thousands separators.
pub fn parse_unsigned(text: &str) -> Option<u32> {
    text.trim().replace(',', "").parse().ok()
}

/// Split a list on `separators`, except inside parentheses. Items are trimmed
/// and empty items dropped.
pub fn split_top_level(text: &str, separators: &[char]) -> Vec<String> {
    fn push_item(items: &mut Vec<String>, item: &str) {
        let item = item.trim();
        if !item.is_empty() {
            items.push(item.to_string());
        }
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if depth == 0 && separators.contains(&c) => {
                push_item(&mut items, &current);
                current.clear();
            }
            c => current.push(c),
        }
    }
    push_item(&mut items, &current);
    items
}

/// Comma-separated list, parenthesis-aware.
pub fn split_list(text: &str) -> Vec<String> {
    split_top_level(text, &[','])
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn capture_signed(pattern: &Regex, text: &str) -> Option<i32> {
    capture(pattern, text).and_then(parse_signed)
}

fn capture_unsigned(pattern: &Regex, text: &str) -> Option<u32> {
    capture(pattern, text).and_then(parse_unsigned)
}

fn capture_list(pattern: &Regex, text: &str) -> Vec<String> {
    capture(pattern, text).map(split_list).unwrap_or_default()
}

/// Cut `text` at its first `;` outside parentheses.
fn top_level_clause(text: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => return text[..i].trim(),
            _ => {}
        }
    }
    text.trim()
}

fn capture_clause_list(pattern: &Regex, text: &str) -> Vec<String> {
    capture(pattern, text)
        .map(|clause| split_list(top_level_clause(clause)))
        .unwrap_or_default()
}

fn capture_text(pattern: &Regex, text: &str) -> Option<String> {
    capture(pattern, text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Cut `text` into `(marker, body)` pairs, one per match of `marker`. A body
/// runs to the next marker or the end of its line, whichever comes first.
fn segments<'t>(marker: &Regex, text: &'t str) -> Vec<(&'t str, &'t str)> {
    let matches: Vec<_> = marker.captures_iter(text).collect();
    let mut result = Vec::with_capacity(matches.len());
    for (i, caps) in matches.iter().enumerate() {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let next = matches
            .get(i + 1)
            .and_then(|c| c.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        let body = &text[whole.end()..next];
        let body = body.split('\n').next().unwrap_or_default();
        result.push((label.as_str(), body));
    }
    result
}

// ============================================================================
// Header
// ============================================================================

/// Parse `<name> CR <rating>`. The rating is a whole number or `1/N`.
///
/// This is the one field whose absence aborts extraction.
pub fn parse_header(text: &str) -> Result<Header> {
    let raw = text.trim();
    let malformed = || BestiaryError::MalformedHeader {
        raw: raw.to_string(),
    };

    let caps = HEADER.captures(raw).ok_or_else(malformed)?;
    let name = caps["name"].trim().to_string();
    if name.is_empty() {
        return Err(malformed());
    }
    let challenge_rating = parse_challenge_rating(&caps["cr"]).ok_or_else(malformed)?;

    Ok(Header {
        name,
        challenge_rating,
        experience_points: parse_experience_points(raw),
    })
}

/// `5` or `1/3`. Zero and zero denominators are rejected.
pub fn parse_challenge_rating(text: &str) -> Option<ChallengeRating> {
    let (numerator, denominator) = match text.trim().split_once('/') {
        Some((num, denom)) => (num.parse().ok()?, denom.parse().ok()?),
        None => (text.trim().parse().ok()?, 1),
    };
    if numerator == 0 || denominator == 0 {
        return None;
    }
    Some(ChallengeRating {
        numerator,
        denominator,
    })
}

pub fn parse_experience_points(text: &str) -> Option<u64> {
    capture(&EXPERIENCE, text).and_then(|xp| xp.replace(',', "").parse().ok())
}

// ============================================================================
// Attributes
// ============================================================================

pub fn parse_alignment(text: &str) -> Option<Alignment> {
    ALIGNMENT_SIZE_TYPE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .or_else(|| ALIGNMENT_PATTERN.captures(text).and_then(|caps| caps.get(1)))
        .and_then(|m| Alignment::from_code(m.as_str()))
}

pub fn parse_size(text: &str) -> Option<Size> {
    ALIGNMENT_SIZE_TYPE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(2))
        .or_else(|| SIZE_PATTERN.captures(text).and_then(|caps| caps.get(1)))
        .and_then(|m| Size::from_label(m.as_str()))
}

/// Creature type plus the parenthesised subtypes that may follow it.
pub fn parse_creature_type(text: &str) -> (Option<CreatureType>, Vec<String>) {
    let (kind, subtypes) = match ALIGNMENT_SIZE_TYPE_PATTERN.captures(text) {
        Some(caps) => (caps.get(3), caps.get(4)),
        None => match TYPE_PATTERN.captures(text) {
            Some(caps) => (caps.get(1), caps.get(2)),
            None => return (None, Vec::new()),
        },
    };
    (
        kind.and_then(|m| CreatureType::from_label(m.as_str())),
        subtypes.map(|m| split_list(m.as_str())).unwrap_or_default(),
    )
}

pub fn parse_initiative(text: &str) -> Option<i32> {
    capture_signed(&INITIATIVE, text)
}

pub fn parse_senses(text: &str) -> Vec<String> {
    capture_clause_list(&SENSES, text)
}

pub fn parse_perception(text: &str) -> Option<i32> {
    capture_signed(&PERCEPTION, text)
}

pub fn parse_aura(text: &str) -> Option<String> {
    capture(&AURA, text)
        .map(top_level_clause)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// All attribute fields. XP from the header wins over XP in the region.
pub fn parse_attributes(text: &str, header_xp: Option<u64>) -> Attributes {
    let (creature_type, subtypes) = parse_creature_type(text);
    let attributes = Attributes {
        alignment: parse_alignment(text),
        size: parse_size(text),
        creature_type,
        subtypes,
        initiative: parse_initiative(text),
        experience_points: header_xp.or_else(|| parse_experience_points(text)),
        senses: parse_senses(text),
        perception: parse_perception(text),
        aura: parse_aura(text),
    };
    if attributes.alignment.is_none() || attributes.creature_type.is_none() {
        debug!("Attributes without alignment or type: {:?}", text);
    }
    attributes
}

// ============================================================================
// Defense
// ============================================================================

/// Armor class with its typed bonus breakdown. Absent when `AC <n>` is not
/// found; touch and flat-footed are independent of each other and of the total.
pub fn parse_armor_class(text: &str) -> Option<ArmorClass> {
    let total = capture_unsigned(&AC_TOTAL, text)?;
    let mut bonuses = AcBonuses::default();
    for (bonus, pattern) in AC_BONUSES.iter() {
        if let Some(value) = capture_signed(pattern, text) {
            bonuses.set(*bonus, value);
        }
    }
    Some(ArmorClass {
        total,
        touch: capture_unsigned(&AC_TOUCH, text),
        flat_footed: capture_unsigned(&AC_FLAT_FOOTED, text),
        bonuses,
    })
}

pub fn parse_hit_points(text: &str) -> Option<u32> {
    capture_unsigned(&HIT_POINTS, text)
}

/// Dice expression inside the hp parentheses, without any `N HD;` prefix.
pub fn parse_hit_dice(text: &str) -> Option<String> {
    capture_text(&HIT_DICE, text)
}

/// Die size of the first hit dice term: 8 for `2d8+2`.
pub fn parse_hit_die(text: &str) -> Option<u32> {
    parse_hit_dice(text).and_then(|dice| capture_unsigned(&HIT_DIE, &dice))
}

pub fn parse_fort(text: &str) -> Option<i32> {
    capture_signed(&FORT, text)
}

pub fn parse_reflex(text: &str) -> Option<i32> {
    capture_signed(&REFLEX, text)
}

pub fn parse_will(text: &str) -> Option<i32> {
    capture_signed(&WILL, text)
}

pub fn parse_spell_resistance(text: &str) -> Option<u32> {
    capture_unsigned(&SPELL_RESISTANCE, text)
}

pub fn parse_damage_reduction(text: &str) -> Option<String> {
    capture_text(&DAMAGE_REDUCTION, text)
}

/// Kept as printed, e.g. `5 (acid or fire)`.
pub fn parse_regeneration(text: &str) -> Option<String> {
    capture_text(&REGENERATION, text)
}

pub fn parse_defensive_abilities(text: &str) -> Vec<String> {
    capture_clause_list(&DEFENSIVE_ABILITIES, text)
}

pub fn parse_immunities(text: &str) -> Vec<String> {
    capture_clause_list(&IMMUNITIES, text)
}

pub fn parse_resistances(text: &str) -> Vec<String> {
    capture_clause_list(&RESISTANCES, text)
}

pub fn parse_weaknesses(text: &str) -> Vec<String> {
    capture_clause_list(&WEAKNESSES, text)
}

pub fn parse_defense(text: &str) -> Defense {
    let defense = Defense {
        armor_class: parse_armor_class(text),
        hit_points: parse_hit_points(text),
        hit_die: parse_hit_die(text),
        hit_dice: parse_hit_dice(text),
        fort: parse_fort(text),
        reflex: parse_reflex(text),
        will: parse_will(text),
        spell_resistance: parse_spell_resistance(text),
        damage_reduction: parse_damage_reduction(text),
        regeneration: parse_regeneration(text),
        defensive_abilities: parse_defensive_abilities(text),
        immunities: parse_immunities(text),
        resistances: parse_resistances(text),
        weaknesses: parse_weaknesses(text),
    };
    if defense.armor_class.is_none() {
        debug!("Defense section without AC: {:?}", text);
    }
    if defense.hit_points.is_none() {
        debug!("Defense section without hp: {:?}", text);
    }
    defense
}

// ============================================================================
// Offense
// ============================================================================

/// Land speed is required; the other modes are read independently.
pub fn parse_speed(text: &str) -> Option<Speed> {
    let land = capture_unsigned(&LAND_SPEED, text)?;
    let fly = FLY_SPEED.captures(text);
    Some(Speed {
        land,
        fly: fly
            .as_ref()
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_unsigned(m.as_str())),
        swim: capture_unsigned(&SWIM_SPEED, text),
        burrow: capture_unsigned(&BURROW_SPEED, text),
        fly_maneuverability: fly
            .as_ref()
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str().to_string()),
    })
}

/// Decompose the first attack of a Melee or Ranged line.
///
/// `Melee bite +5 (1d6+2/19-20 plus grab)` gives label `bite`, bonuses
/// `[5]`, damage `1d6`, modifier `2`, crit range `19-20` and effect `grab`.
/// Without a threat range the crit range is `20`; without a modifier it is 0.
pub fn parse_attack(kind: AttackKind, text: &str) -> Option<Attack> {
    let pattern: &Regex = match kind {
        AttackKind::Melee => &*MELEE,
        AttackKind::Ranged => &*RANGED,
    };
    let caps = pattern.captures(text)?;

    let attack_bonuses: Option<Vec<i32>> = caps["bonuses"].split('/').map(parse_signed).collect();
    let Some(attack_bonuses) = attack_bonuses else {
        debug!("Unreadable {} attack bonuses: {:?}", kind.keyword(), &caps["bonuses"]);
        return None;
    };

    Some(Attack {
        label: caps["label"].trim().to_string(),
        attack_bonuses,
        damage: caps["dice"].to_string(),
        damage_modifier: caps
            .name("modifier")
            .and_then(|m| parse_signed(m.as_str()))
            .unwrap_or(0),
        crit_range: caps
            .name("range")
            .map(|m| m.as_str().replace(['\u{2013}', '\u{2014}', '\u{2212}'], "-"))
            .unwrap_or_else(|| "20".to_string()),
        crit_multiplier: caps
            .name("multiplier")
            .map(|m| m.as_str().replace('\u{00d7}', "x")),
        effect: caps
            .name("effect")
            .map(|m| m.as_str().trim())
            .map(|effect| effect.strip_prefix("plus").unwrap_or(effect).trim().to_string())
            .filter(|effect| !effect.is_empty()),
    })
}

pub fn parse_special_attacks(text: &str) -> Vec<String> {
    capture_list(&SPECIAL_ATTACKS, text)
}

/// Caster level, concentration and per-frequency ability lists. Absent when
/// the region has neither a `Spell-Like Abilities` header nor a frequency group.
pub fn parse_spell_like_abilities(text: &str) -> Option<SpellLikeAbilities> {
    let header = SPELL_LIKE_HEADER.captures(text);
    let body = match header.as_ref().and_then(|caps| caps.get(0)) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let groups: Vec<SpellLikeGroup> = segments(&SPELL_LIKE_FREQUENCY, body)
        .into_iter()
        .map(|(frequency, abilities)| SpellLikeGroup {
            frequency: frequency.to_string(),
            abilities: split_list(abilities),
        })
        .collect();

    if header.is_none() && groups.is_empty() {
        return None;
    }
    Some(SpellLikeAbilities {
        caster_level: header
            .as_ref()
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_unsigned(m.as_str())),
        concentration: header
            .as_ref()
            .and_then(|caps| caps.get(2))
            .and_then(|m| parse_signed(m.as_str())),
        groups,
    })
}

pub fn parse_offense(text: &str) -> Offense {
    let offense = Offense {
        speed: parse_speed(text),
        melee: parse_attack(AttackKind::Melee, text),
        ranged: parse_attack(AttackKind::Ranged, text),
        special_attacks: parse_special_attacks(text),
        spell_like_abilities: parse_spell_like_abilities(text),
    };
    if offense.speed.is_none() {
        debug!("Offense section without land speed: {:?}", text);
    }
    offense
}

// ============================================================================
// Statistics
// ============================================================================

pub fn parse_ability_scores(text: &str) -> AbilityScores {
    let [str, dex, con, int, wis, cha] =
        ABILITY_SCORES.each_ref().map(|pattern| capture_unsigned(pattern, text));
    AbilityScores {
        str,
        dex,
        con,
        int,
        wis,
        cha,
    }
}

pub fn parse_base_attack(text: &str) -> Option<i32> {
    capture_signed(&BASE_ATTACK, text)
}

pub fn parse_cmb(text: &str) -> Option<i32> {
    capture_signed(&CMB, text)
}

pub fn parse_cmd(text: &str) -> Option<u32> {
    capture_unsigned(&CMD, text)
}

pub fn parse_feats(text: &str) -> Vec<String> {
    capture_list(&FEATS, text)
}

/// Bonus for every known skill printed in the Skills clause (or the whole
/// region when there is no clause). Skills not printed get no entry.
pub fn parse_skills(text: &str) -> BTreeMap<Skill, i32> {
    let clause = capture(&SKILLS_CLAUSE, text).unwrap_or(text);
    SKILL_PATTERNS
        .iter()
        .filter_map(|(skill, pattern)| capture_signed(pattern, clause).map(|bonus| (*skill, bonus)))
        .collect()
}

/// Languages are separated by commas or semicolons.
pub fn parse_languages(text: &str) -> Vec<String> {
    capture(&LANGUAGES, text)
        .map(|languages| split_top_level(languages, &[',', ';']))
        .unwrap_or_default()
}

pub fn parse_special_qualities(text: &str) -> Vec<String> {
    capture_list(&SPECIAL_QUALITIES, text)
}

/// Items from every `Gear`, `Combat Gear` and `Other Gear` clause, in order.
pub fn parse_gear(text: &str) -> Vec<String> {
    segments(&GEAR, text)
        .into_iter()
        .flat_map(|(_, items)| split_list(items.trim_end_matches([';', ' '])))
        .collect()
}

pub fn parse_statistics(text: &str) -> Statistics {
    Statistics {
        abilities: parse_ability_scores(text),
        base_attack: parse_base_attack(text),
        cmb: parse_cmb(text),
        cmd: parse_cmd(text),
        feats: parse_feats(text),
        skills: parse_skills(text),
        languages: parse_languages(text),
        special_qualities: parse_special_qualities(text),
        gear: parse_gear(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signed_normalizes_dashes() {
        assert_eq!(parse_signed("+5"), Some(5));
        assert_eq!(parse_signed("-2"), Some(-2));
        assert_eq!(parse_signed("\u{2013}2"), Some(-2));
        assert_eq!(parse_signed("\u{2014}3"), Some(-3));
        assert_eq!(parse_signed("\u{2212}4"), Some(-4));
        assert_eq!(parse_signed("abc"), None);
    }

    #[test]
    fn test_split_list_respects_parentheses() {
        assert_eq!(
            split_list("acid 5, cold 5 (see note, below)"),
            vec!["acid 5", "cold 5 (see note, below)"]
        );
        assert_eq!(split_list("  "), Vec::<String>::new());
        assert_eq!(
            split_top_level("Common, Goblin; telepathy 100 ft.", &[',', ';']),
            vec!["Common", "Goblin", "telepathy 100 ft."]
        );
    }

    #[test]
    fn test_parse_header() {
        let header = parse_header("Goblin CR 1/3").unwrap();
        assert_eq!(header.name, "Goblin");
        assert_eq!(header.challenge_rating, ChallengeRating { numerator: 1, denominator: 3 });
        assert_eq!(header.experience_points, None);

        let header = parse_header("Young Red Dragon CR 10 XP 9,600").unwrap();
        assert_eq!(header.name, "Young Red Dragon");
        assert_eq!(header.challenge_rating, ChallengeRating::whole(10));
        assert_eq!(header.experience_points, Some(9600));
    }

    #[test]
    fn test_parse_header_malformed() {
        for raw in ["Goblin", "CR 3", "Goblin CR 0", "Goblin CR 1/0"] {
            match parse_header(raw) {
                Err(BestiaryError::MalformedHeader { raw: got }) => assert_eq!(got, raw),
                other => panic!("expected malformed header for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_attributes() {
        let text = "XP 400\nCE Medium outsider (chaotic, demon, evil, extraplanar)\nInit +6; Senses darkvision 60 ft., see in darkness; Perception +11\nAura unholy aura (DC 20)";
        let attributes = parse_attributes(text, None);
        assert_eq!(attributes.experience_points, Some(400));
        assert_eq!(attributes.alignment, Some(Alignment::ChaoticEvil));
        assert_eq!(attributes.size, Some(Size::Medium));
        assert_eq!(attributes.creature_type, Some(CreatureType::Outsider));
        assert_eq!(attributes.subtypes, vec!["chaotic", "demon", "evil", "extraplanar"]);
        assert_eq!(attributes.initiative, Some(6));
        assert_eq!(attributes.senses, vec!["darkvision 60 ft.", "see in darkness"]);
        assert_eq!(attributes.perception, Some(11));
        assert_eq!(attributes.aura.as_deref(), Some("unholy aura (DC 20)"));
    }

    #[test]
    fn test_header_xp_wins() {
        let attributes = parse_attributes("XP 200 N Tiny animal", Some(135));
        assert_eq!(attributes.experience_points, Some(135));
    }

    #[test]
    fn test_parse_initiative_with_en_dash() {
        assert_eq!(parse_initiative("Init \u{2013}1; Senses low-light vision"), Some(-1));
    }

    #[test]
    fn test_parse_armor_class_bonuses_default_to_zero() {
        let ac = parse_armor_class("AC 15, touch 12, flat-footed 13, +2 dodge, +1 natural").unwrap();
        assert_eq!(ac.total, 15);
        assert_eq!(ac.touch, Some(12));
        assert_eq!(ac.flat_footed, Some(13));
        assert_eq!(ac.bonuses.dodge, 2);
        assert_eq!(ac.bonuses.natural, 1);
        for bonus in [
            AcBonusType::Deflection,
            AcBonusType::Insight,
            AcBonusType::Sacred,
            AcBonusType::Profane,
        ] {
            assert_eq!(ac.bonuses.get(bonus), 0);
        }
    }

    #[test]
    fn test_parse_armor_class_missing_touch() {
        let ac = parse_armor_class("AC 20, flat-footed 18 (+2 Dex, +8 natural)").unwrap();
        assert_eq!(ac.total, 20);
        assert_eq!(ac.touch, None);
        assert_eq!(ac.flat_footed, Some(18));
        assert_eq!(ac.bonuses.natural, 8);
        assert!(parse_armor_class("hp 11 (2d8+2)").is_none());
    }

    #[test]
    fn test_parse_defense() {
        let text = "AC 22, touch 13, flat-footed 19 (+3 Dex, +9 natural)\nhp 85 (10d10+30); regeneration 5 (acid or fire)\nFort +10 Ref +6 Will \u{2013}1\nDefensive Abilities ferocity; DR 5/cold iron; Immune fire, poison; Resist acid 10, cold 5 (see note, below); SR 19\nWeaknesses vulnerable to cold";
        let defense = parse_defense(text);
        assert_eq!(defense.hit_points, Some(85));
        assert_eq!(defense.hit_die, Some(10));
        assert_eq!(defense.hit_dice.as_deref(), Some("10d10+30"));
        assert_eq!(defense.regeneration.as_deref(), Some("5 (acid or fire)"));
        assert_eq!(defense.fort, Some(10));
        assert_eq!(defense.reflex, Some(6));
        assert_eq!(defense.will, Some(-1));
        assert_eq!(defense.defensive_abilities, vec!["ferocity"]);
        assert_eq!(defense.damage_reduction.as_deref(), Some("5/cold iron"));
        assert_eq!(defense.immunities, vec!["fire", "poison"]);
        assert_eq!(defense.resistances, vec!["acid 10", "cold 5 (see note, below)"]);
        assert_eq!(defense.spell_resistance, Some(19));
        assert_eq!(defense.weaknesses, vec!["vulnerable to cold"]);
    }

    #[test]
    fn test_parse_defense_lists_default_empty() {
        let defense = parse_defense("AC 10, touch 10, flat-footed 10\nhp 4 (1d8)");
        assert!(defense.immunities.is_empty());
        assert!(defense.resistances.is_empty());
        assert!(defense.weaknesses.is_empty());
        assert_eq!(defense.spell_resistance, None);
        assert_eq!(defense.regeneration, None);
    }

    #[test]
    fn test_defense_lists_keep_semicolons_inside_parentheses() {
        let defense = parse_defense("Immune poison (see text; below), fire; Resist cold 10");
        assert_eq!(defense.immunities, vec!["poison (see text; below)", "fire"]);
        assert_eq!(defense.resistances, vec!["cold 10"]);

        let senses = parse_senses("Senses blindsight (60 ft.; 30 ft. underwater), scent; Perception +9");
        assert_eq!(senses, vec!["blindsight (60 ft.; 30 ft. underwater)", "scent"]);
    }

    #[test]
    fn test_parse_hit_die_with_hd_prefix() {
        assert_eq!(parse_hit_die("hp 52 (8 HD; 5d8+3d10+16)"), Some(8));
        assert_eq!(parse_hit_dice("hp 52 (8 HD; 5d8+3d10+16)").as_deref(), Some("5d8+3d10+16"));
    }

    #[test]
    fn test_saves_accept_either_minus() {
        assert_eq!(parse_fort("Fort \u{2013}2"), Some(-2));
        assert_eq!(parse_fort("Fort -2"), Some(-2));
    }

    #[test]
    fn test_parse_speed() {
        let speed = parse_speed("Speed 30 ft., burrow 10 ft., fly 60 ft. (good), swim 20 ft.").unwrap();
        assert_eq!(speed.land, 30);
        assert_eq!(speed.fly, Some(60));
        assert_eq!(speed.fly_maneuverability.as_deref(), Some("good"));
        assert_eq!(speed.swim, Some(20));
        assert_eq!(speed.burrow, Some(10));

        let speed = parse_speed("Speed 20 ft.").unwrap();
        assert_eq!(speed.fly, None);
        assert_eq!(speed.swim, None);
        assert!(parse_speed("Melee bite +1 (1d3)").is_none());
    }

    #[test]
    fn test_parse_attack_with_threat_range() {
        let attack = parse_attack(AttackKind::Melee, "Melee bite +5 (1d6+2/19-20)").unwrap();
        assert_eq!(attack.label, "bite");
        assert_eq!(attack.attack_bonuses, vec![5]);
        assert_eq!(attack.damage, "1d6");
        assert_eq!(attack.damage_modifier, 2);
        assert_eq!(attack.crit_range, "19-20");
        assert_eq!(attack.crit_multiplier, None);
        assert_eq!(attack.effect, None);
    }

    #[test]
    fn test_parse_attack_with_em_dash_range() {
        let attack = parse_attack(AttackKind::Melee, "Melee rapier +5 (1d6+1/18\u{2014}20)").unwrap();
        assert_eq!(attack.label, "rapier");
        assert_eq!(attack.attack_bonuses, vec![5]);
        assert_eq!(attack.damage, "1d6");
        assert_eq!(attack.damage_modifier, 1);
        assert_eq!(attack.crit_range, "18-20");
    }

    #[test]
    fn test_parse_attack_unknown_tail_keeps_leading_fields() {
        let attack = parse_attack(AttackKind::Ranged, "Ranged javelin +3 (1d6+2 nonlethal)").unwrap();
        assert_eq!(attack.label, "javelin");
        assert_eq!(attack.damage, "1d6");
        assert_eq!(attack.damage_modifier, 2);
        assert_eq!(attack.crit_range, "20");
        assert_eq!(attack.effect, None);
    }

    #[test]
    fn test_parse_attack_defaults_crit_range() {
        let attack = parse_attack(AttackKind::Melee, "Melee 2 claws +3 (1d4+1)").unwrap();
        assert_eq!(attack.label, "2 claws");
        assert_eq!(attack.crit_range, "20");
    }

    #[test]
    fn test_parse_attack_iterative_and_multiplier() {
        let attack = parse_attack(
            AttackKind::Melee,
            "Melee +1 greataxe +12/+7 (1d12+7/\u{00d7}3)",
        )
        .unwrap();
        assert_eq!(attack.label, "+1 greataxe");
        assert_eq!(attack.attack_bonuses, vec![12, 7]);
        assert_eq!(attack.damage, "1d12");
        assert_eq!(attack.damage_modifier, 7);
        assert_eq!(attack.crit_range, "20");
        assert_eq!(attack.crit_multiplier.as_deref(), Some("x3"));
    }

    #[test]
    fn test_parse_attack_effect_and_negative_modifier() {
        let attack = parse_attack(
            AttackKind::Melee,
            "Melee bite \u{2013}1 (1d4\u{2013}1/18\u{2013}20 plus poison)",
        )
        .unwrap();
        assert_eq!(attack.attack_bonuses, vec![-1]);
        assert_eq!(attack.damage_modifier, -1);
        assert_eq!(attack.crit_range, "18-20");
        assert_eq!(attack.effect.as_deref(), Some("poison"));
    }

    #[test]
    fn test_parse_ranged_attack_independent_of_melee() {
        let text = "Speed 30 ft.\nRanged shortbow +4 (1d6/x3)";
        assert!(parse_attack(AttackKind::Melee, text).is_none());
        let ranged = parse_attack(AttackKind::Ranged, text).unwrap();
        assert_eq!(ranged.label, "shortbow");
        assert_eq!(ranged.damage_modifier, 0);
        assert_eq!(ranged.crit_multiplier.as_deref(), Some("x3"));
    }

    #[test]
    fn test_parse_spell_like_abilities() {
        let text = "Special Attacks rend (2 claws, 1d8+6)\nSpell-Like Abilities (CL 5th; concentration +7)\nConstant\u{2014}detect magic\nAt will\u{2014}invisibility (self only), darkness\n3/day\u{2014}dispel magic";
        let offense = parse_offense(text);
        assert_eq!(offense.special_attacks, vec!["rend (2 claws, 1d8+6)"]);

        let sla = offense.spell_like_abilities.unwrap();
        assert_eq!(sla.caster_level, Some(5));
        assert_eq!(sla.concentration, Some(7));
        assert_eq!(sla.groups.len(), 3);
        assert_eq!(sla.groups[0].frequency, "Constant");
        assert_eq!(sla.groups[0].abilities, vec!["detect magic"]);
        assert_eq!(sla.groups[1].abilities, vec!["invisibility (self only)", "darkness"]);
        assert_eq!(sla.groups[2].frequency, "3/day");
    }

    #[test]
    fn test_special_attacks_stop_at_spell_like_abilities() {
        let text = "Special Attacks breath weapon, fear aura Spell-Like Abilities (CL 3rd)";
        assert_eq!(parse_special_attacks(text), vec!["breath weapon", "fear aura"]);
        assert!(parse_spell_like_abilities("Speed 30 ft.").is_none());
    }

    #[test]
    fn test_parse_statistics() {
        let text = "Str 14 Dex 14 Con 12 Int 10 Wis 10 Cha 10\nBase Atk +2; CMB +3; CMD 15\nFeats Power Attack, Weapon Focus (longsword)\nSkills Climb +5, Perform (sing) +3, Sleight of Hand \u{2013}1\nLanguages Common, Dwarven\nSQ armor training 1\nCombat Gear potion of cure light wounds; Other Gear chainmail, longsword";
        let stats = parse_statistics(text);
        assert_eq!(stats.abilities.str, Some(14));
        assert_eq!(stats.abilities.cha, Some(10));
        assert_eq!(stats.base_attack, Some(2));
        assert_eq!(stats.cmb, Some(3));
        assert_eq!(stats.cmd, Some(15));
        assert_eq!(stats.feats, vec!["Power Attack", "Weapon Focus (longsword)"]);
        assert_eq!(stats.skills.get(&Skill::Climb), Some(&5));
        assert_eq!(stats.skills.get(&Skill::Perform), Some(&3));
        assert_eq!(stats.skills.get(&Skill::SleightOfHand), Some(&-1));
        assert_eq!(stats.skills.len(), 3);
        assert_eq!(stats.languages, vec!["Common", "Dwarven"]);
        assert_eq!(stats.special_qualities, vec!["armor training 1"]);
        assert_eq!(
            stats.gear,
            vec!["potion of cure light wounds", "chainmail", "longsword"]
        );
    }

    #[test]
    fn test_skills_omit_unlisted() {
        let skills = parse_skills("Str 10 Dex 10 Skills Stealth +6, Perception +0");
        assert_eq!(skills.get(&Skill::Stealth), Some(&6));
        assert_eq!(skills.get(&Skill::Perception), Some(&0));
        assert!(!skills.contains_key(&Skill::Swim));
        assert!(!skills.contains_key(&Skill::Climb));
    }

    #[test]
    fn test_nonability_is_absent() {
        let scores = parse_ability_scores("Str 17 Dex 10 Con \u{2014} Int \u{2014} Wis 10 Cha 1");
        assert_eq!(scores.str, Some(17));
        assert_eq!(scores.con, None);
        assert_eq!(scores.int, None);
        assert_eq!(scores.cha, Some(1));
    }

    #[test]
    fn test_feats_on_one_line_with_skills() {
        let text = "Str 8 Dex 15 Con 10 Int 10 Wis 9 Cha 6 Base Atk +1; CMB +0; CMD 12 Feats Improved Initiative Skills Ride +10, Stealth +10 Languages Goblin";
        let stats = parse_statistics(text);
        assert_eq!(stats.feats, vec!["Improved Initiative"]);
        assert_eq!(stats.skills.get(&Skill::Ride), Some(&10));
        assert_eq!(stats.languages, vec!["Goblin"]);
    }
}
