//! The class directory the lookup searches against.
//!
//! The `ClassDirectory` trait returns futures instead of spawning, so the
//! caller decides how to run them. This keeps the seam runtime-agnostic and
//! mockable for testing.

use futures::future::BoxFuture;
use schedulomatic_core::{ClassMatch, DirectoryError};

/// Trait for class directory searches.
///
/// `search` takes the user's term and resolves to highlighted matches in
/// directory order. Implementations decide transport; callers decide spawning
/// and cancellation.
pub trait ClassDirectory: Send + Sync {
    /// Search the directory with the given term.
    fn search(&self, term: String) -> BoxFuture<'static, Result<Vec<ClassMatch>, DirectoryError>>;
}

// =============================================================================
// Mock Directory for Testing
// =============================================================================


// =============================================================================
// Tests
// =============================================================================
