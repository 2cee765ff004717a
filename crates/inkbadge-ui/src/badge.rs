//! The badge record: six lines of text describing one identity card.

extern crate alloc;

use alloc::string::{String, ToString};

/// Directory holding badge definition files.
/// No trailing slash; paths are built with `filesystem::join_path`.
pub const BADGE_DIR: &str = "/badges";

/// Filename the default record is bootstrapped under.
pub const DEFAULT_BADGE_FILE: &str = "badge.txt";

/// Content written to [`DEFAULT_BADGE_FILE`] when no badges exist.
pub const DEFAULT_BADGE_TEXT: &str = "mustelid inc
H. Badger
RP2040
2MB Flash
E ink
296x128px";

/// One badge definition, parsed fresh from its file on every draw so the
/// on-disk record stays the source of truth between frames.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BadgeRecord {
    pub company: String,
    pub name: String,
    pub detail1_title: String,
    pub detail1_text: String,
    pub detail2_title: String,
    pub detail2_text: String,
}

impl BadgeRecord {
    /// Parse the six-line badge format. Line order is fixed: company, name,
    /// first detail title/text, second detail title/text. Missing trailing
    /// lines read as empty strings; line endings are stripped.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));
        let mut next = || lines.next().unwrap_or("").to_string();
        Self {
            company: next(),
            name: next(),
            detail1_title: next(),
            detail1_text: next(),
            detail2_title: next(),
            detail2_text: next(),
        }
    }
}
