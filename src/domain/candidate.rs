/// A downloadable PDF discovered while scanning one feed's entries.
///
/// Ephemeral: recomputed on every scan, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfCandidate {
    /// Title of the entry the PDF came from; becomes the filename.
    pub title: String,
    /// Absolute URL of the PDF resource.
    pub url: String,
}
