//! Prune Use Case
//!
//! Finds `.gitignore` group entries that no installed package declares any
//! more and, unless in a dry run, deletes their directories and lines.

mod options;
mod result;
mod use_case;


pub use options::PruneOptions;
pub use result::PruneReport;
pub use use_case::PruneUseCase;
