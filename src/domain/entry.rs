pub const NO_TITLE: &str = "No Title";
pub const NO_DATE: &str = "No Date";
pub const NO_SUMMARY: &str = "No Summary";

/// One item of a feed, derived fresh on every fetch.
///
/// Fields the feed omits carry the documented placeholder values rather
/// than options, so the presentation layer can render them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub published: String,
    pub summary: String,
}

impl Entry {
    /// An entry without a link cannot lead to a PDF.
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}
