//! Testing utilities
//!
//!     Tree tests should check the shape and content of the whole tree, not just node counts.
//!     Hand-written matches over `children[i]` get long quickly and hide what is being tested,
//!     so use the fluent [`assert_tree`] API instead:
//!
//!     ```rust,ignore
//!     use slim_parser::slim::testing::assert_tree;
//!
//!     assert_tree(&doc)
//!         .child_count(1)
//!         .child(0, |html| {
//!             html.name("html")
//!                 .attr("lang", "ja")
//!                 .child(1, |body| {
//!                     body.name("body").child(0, |p| {
//!                         p.name("p").text("Hello").is_leaf();
//!                     });
//!                 });
//!         });
//!     ```
//!
//!     Failures report the path of the offending node (`root[0][1][0]`) and a one-line summary
//!     of its siblings.
//!
//! Fixtures
//!
//!     Shared template sources live in `tests/fixtures/`. Load them with [`fixture`] rather than
//!     repeating the same markup inline across tests.

mod tree_assertions;

pub use tree_assertions::{assert_tree, DocumentAssertion, NodeAssertion};

use crate::slim::loader::{LoaderError, SourceLoader};
use std::path::PathBuf;

/// Directory holding the shared `.slim` fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load `tests/fixtures/<name>.slim`.
pub fn fixture(name: &str) -> Result<SourceLoader, LoaderError> {
    SourceLoader::from_path(fixtures_dir().join(format!("{name}.slim")))
}
