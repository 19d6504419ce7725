//! Line classification for stat-block bodies.
//!
//! A single forward pass over the trimmed lines that follow the header.
//! Section markers (`AC`, `Speed`, `Str `) open a section, upper-case divider
//! headings (`DEFENSE`, `TACTICS`, `ECOLOGY`, ...) close the open one, and
//! every other line continues whatever section is open. Lines before the
//! first marker describe the creature's attributes.

use tracing::{debug, trace};

/// The four regions of a stat block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Attributes,
    Defense,
    Offense,
    Statistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Line starts a section and belongs to it.
    Marker(Section),
    /// Heading such as `DEFENSE` or `SPECIAL ABILITIES`.
    Divider,
    Content,
}

/// Minimum letters in an all-caps line before it counts as a divider, so
/// short abbreviations like `SQ` stay content.
const DIVIDER_MIN_LETTERS: usize = 4;

fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    match line.strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}

fn is_divider(line: &str) -> bool {
    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    letters >= DIVIDER_MIN_LETTERS
        && line
            .chars()
            .all(|c| c == ' ' || (c.is_alphabetic() && c.is_uppercase()))
}

/// Classify one trimmed line by its leading keyword.
pub fn classify_line(line: &str) -> LineKind {
    if starts_with_keyword(line, "AC") {
        LineKind::Marker(Section::Defense)
    } else if starts_with_keyword(line, "Speed") {
        LineKind::Marker(Section::Offense)
    } else if line.starts_with("Str ") {
        LineKind::Marker(Section::Statistics)
    } else if is_divider(line) {
        LineKind::Divider
    } else {
        LineKind::Content
    }
}

/// Raw text of every section that was found, lines joined with `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegions {
    pub attributes: Option<String>,
    pub defense: Option<String>,
    pub offense: Option<String>,
    pub statistics: Option<String>,
}

impl SectionRegions {
    fn region_mut(&mut self, section: Section) -> &mut Option<String> {
        match section {
            Section::Attributes => &mut self.attributes,
            Section::Defense => &mut self.defense,
            Section::Offense => &mut self.offense,
            Section::Statistics => &mut self.statistics,
        }
    }

    /// Append a line to a section, creating the region on first use.
    pub fn append(&mut self, section: Section, line: &str) {
        match self.region_mut(section) {
            Some(region) => {
                region.push('\n');
                region.push_str(line);
            }
            empty => *empty = Some(line.to_string()),
        }
    }
}

/// Assign each body line to a section.
pub fn segment_lines<S: AsRef<str>>(lines: &[S]) -> SectionRegions {
    let mut regions = SectionRegions::default();
    let mut open = Some(Section::Attributes);

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let kind = classify_line(line);
        trace!("{:?} <- {:?}", kind, line);

        match kind {
            LineKind::Marker(section) => {
                open = Some(section);
                regions.append(section, line);
            }
            LineKind::Divider => {
                if let Some(section) = open.take() {
                    debug!("{:?} closed by divider {:?}", section, line);
                }
            }
            LineKind::Content => match open {
                Some(section) => regions.append(section, line),
                None => debug!("Skipping line outside any section: {:?}", line),
            },
        }
    }

    regions
}
