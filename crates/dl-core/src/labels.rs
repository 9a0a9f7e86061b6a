//! Display labels for source names.

/// Human-facing label for a source name.
///
/// Unknown sources pass through unchanged, so output never loses the name.
#[must_use]
pub fn source_label(source: &str) -> &str {
    match source {
        "github" => "GitHub",
        "gitlab" => "GitLab",
        "calendar" => "Calendar",
        "slack" => "Slack",
        "youtrack" => "YouTrack",
        "webhook" => "Webhook",
        "feed" => "Feed",
        "system" => "System",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sources_get_display_labels() {
        assert_eq!(source_label("github"), "GitHub");
        assert_eq!(source_label("gitlab"), "GitLab");
        assert_eq!(source_label("feed"), "Feed");
    }

    #[test]
    fn unknown_sources_pass_through() {
        assert_eq!(source_label("jenkins"), "jenkins");
        assert_eq!(source_label(""), "");
    }
}
