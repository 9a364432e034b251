//! Per-source link filtering.
//!
//! A source carries exactly one [`LinkFilter`]; allow and block lists are
//! separate variants, so a source can never have both.

use serde::Deserialize;

/// Which filter policy a source uses, as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Allowlist,
    Blocklist,
    #[default]
    None,
}

/// Path-substring filter applied to an entry's link.
///
/// Patterns are stored lowercased; matching lowercases the link and looks
/// for a plain substring, with no URL parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinkFilter {
    /// Accept only links containing at least one pattern.
    AllowList(Vec<String>),
    /// Reject links containing any pattern.
    BlockList(Vec<String>),
    #[default]
    None,
}

impl LinkFilter {
    pub fn new(mode: FilterMode, patterns: &[String]) -> Self {
        let lowered = || patterns.iter().map(|p| p.to_lowercase()).collect::<Vec<_>>();
        match mode {
            FilterMode::Allowlist => Self::AllowList(lowered()),
            FilterMode::Blocklist => Self::BlockList(lowered()),
            FilterMode::None => Self::None,
        }
    }

    /// Whether `link` passes.  An absent link never passes, in every mode.
    pub fn accepts(&self, link: Option<&str>) -> bool {
        let Some(link) = link else {
            return false;
        };
        match self {
            Self::AllowList(patterns) => contains_any(link, patterns),
            Self::BlockList(patterns) => !contains_any(link, patterns),
            Self::None => true,
        }
    }
}

fn contains_any(link: &str, patterns: &[String]) -> bool {
    let link = link.to_lowercase();
    patterns.iter().any(|p| link.contains(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn allowlist_accepts_matching_path_only() {
        let filter = LinkFilter::new(FilterMode::Allowlist, &patterns(&["/world/"]));
        assert!(filter.accepts(Some("https://x.com/world/story1")));
        assert!(!filter.accepts(Some("https://x.com/sports/story2")));
    }

    #[test]
    fn blocklist_rejects_matching_path_only() {
        let filter = LinkFilter::new(FilterMode::Blocklist, &patterns(&["/live/", "/video/"]));
        assert!(!filter.accepts(Some("https://x.com/world/live/2026/oct/14/a")));
        assert!(!filter.accepts(Some("https://x.com/video/b")));
        assert!(filter.accepts(Some("https://x.com/world/c")));
    }

    #[test]
    fn matching_ignores_case_on_both_sides() {
        let filter = LinkFilter::new(FilterMode::Allowlist, &patterns(&["/World/"]));
        assert!(filter.accepts(Some("https://X.COM/WORLD/story")));
    }

    #[test]
    fn absent_link_is_rejected_in_every_mode() {
        for filter in [
            LinkFilter::new(FilterMode::Allowlist, &patterns(&["/world/"])),
            LinkFilter::new(FilterMode::Blocklist, &patterns(&["/live/"])),
            LinkFilter::None,
        ] {
            assert!(!filter.accepts(None), "{filter:?} accepted an absent link");
        }
    }

    #[test]
    fn none_mode_accepts_any_link() {
        assert!(LinkFilter::None.accepts(Some("https://x.com/anything")));
    }

    #[test]
    fn none_mode_ignores_patterns() {
        assert_eq!(
            LinkFilter::new(FilterMode::None, &patterns(&["/world/"])),
            LinkFilter::None
        );
    }
}
