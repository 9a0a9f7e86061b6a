//! Terminal colors for activity kinds.

use ansi_term::Colour;
use dl_core::ActivityKind;

/// Color assigned to each activity kind. Unmapped kinds share the
/// `Custom` fallback.
#[must_use]
pub const fn kind_colour(kind: ActivityKind) -> Colour {
    match kind {
        ActivityKind::GitCommit => Colour::Green,
        ActivityKind::Calendar => Colour::Blue,
        ActivityKind::Slack => Colour::Purple,
        ActivityKind::IssueTracker => Colour::Yellow,
        ActivityKind::File => Colour::Cyan,
        ActivityKind::Browser => Colour::Cyan,
        ActivityKind::Application | ActivityKind::Custom => Colour::White,
        ActivityKind::System => Colour::Red,
    }
}

/// `[kind]` tag, painted when color is enabled.
#[must_use]
pub fn kind_tag(kind: ActivityKind, color: bool) -> String {
    let tag = format!("[{kind}]");
    if color {
        kind_colour(kind).paint(tag).to_string()
    } else {
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tags_have_no_escape_codes() {
        assert_eq!(kind_tag(ActivityKind::GitCommit, false), "[git-commit]");
    }

    #[test]
    fn painted_tags_keep_the_tag_text() {
        let painted = kind_tag(ActivityKind::GitCommit, true);
        assert!(painted.contains("[git-commit]"));
        assert!(painted.contains("\u{1b}["));
    }

    #[test]
    fn every_kind_has_a_colour() {
        for kind in ActivityKind::ALL {
            // No panic and a paintable colour for each variant.
            let _ = kind_colour(kind);
        }
    }
}
