//! Record assembly and the public extraction entry points.
//!
//! Both input shapes end up here: a header plus body lines (classified into
//! regions first), or a header plus regions the caller already isolated.
//! The header is parsed before anything else; it is the only part whose
//! absence is an error.

use crate::classifier::{SectionRegions, segment_lines};
use crate::error::Result;
use crate::file_utils::split_stat_block_text;
use crate::models::{CreatureRecord, Header};
use crate::parsers::{parse_attributes, parse_defense, parse_header, parse_offense, parse_statistics};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stat block already cut into its four regions by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlockSections {
    pub header: String,
    pub attributes: Option<String>,
    pub defense: Option<String>,
    pub offense: Option<String>,
    pub statistics: Option<String>,
}

/// Run each section's parsers once and merge the results with the header.
/// Header XP alone is enough to produce an attributes record.
pub fn assemble(header: Header, regions: &SectionRegions) -> CreatureRecord {
    let record = CreatureRecord {
        attributes: match regions.attributes.as_deref() {
            Some(text) => Some(parse_attributes(text, header.experience_points)),
            None => header
                .experience_points
                .map(|xp| parse_attributes("", Some(xp))),
        },
        defense: regions.defense.as_deref().map(parse_defense),
        offense: regions.offense.as_deref().map(parse_offense),
        statistics: regions.statistics.as_deref().map(parse_statistics),
        name: header.name,
        challenge_rating: header.challenge_rating,
    };

    debug!(
        "Assembled {} (CR {}): attributes={} defense={} offense={} statistics={}",
        record.name,
        record.challenge_rating,
        record.attributes.is_some(),
        record.defense.is_some(),
        record.offense.is_some(),
        record.statistics.is_some()
    );
    record
}

/// Extract a creature from its header line and the trimmed body lines.
///
/// # Errors
/// `MalformedHeader` when the header has no name or challenge rating.
/// Missing sections or fields are not errors.
pub fn extract_lines<S: AsRef<str>>(header: &str, lines: &[S]) -> Result<CreatureRecord> {
    let header = parse_header(header)?;
    Ok(assemble(header, &segment_lines(lines)))
}

/// Extract a creature from caller-isolated regions. Blank regions count as absent.
pub fn extract_sections(sections: &StatBlockSections) -> Result<CreatureRecord> {
    let header = parse_header(&sections.header)?;

    let region = |text: &Option<String>| {
        text.as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    };
    let regions = SectionRegions {
        attributes: region(&sections.attributes),
        defense: region(&sections.defense),
        offense: region(&sections.offense),
        statistics: region(&sections.statistics),
    };
    Ok(assemble(header, &regions))
}

/// Extract a creature from plain text whose first non-blank line is the header.
pub fn extract_text(text: &str) -> Result<CreatureRecord> {
    let (header, lines) = split_stat_block_text(text)?;
    extract_lines(&header, &lines)
}
