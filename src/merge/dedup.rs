use std::collections::HashSet;

/// Every link already in the document or accepted earlier in this run.
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<String>,
}

impl DedupSet {
    /// Seed from the links of the persisted document.
    pub fn seeded<'a>(links: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            seen: links.into_iter().map(String::from).collect(),
        }
    }

    /// `true` (and remember `link`) if it has not been seen before.
    pub fn accept(&mut self, link: &str) -> bool {
        self.seen.insert(link.to_string())
    }
}
