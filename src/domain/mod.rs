pub mod candidate;
pub mod entry;

pub use candidate::PdfCandidate;
pub use entry::Entry;
