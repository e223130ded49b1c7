//! Semantic cell styles.
//!
//! Producers tag cells with what they are (a search match, the match under
//! the cursor); the writer decides how a terminal draws each one.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleAttr {
    /// Part of a search match.
    SearchMatch,
    /// The search match cell the cursor sits on.
    SearchMatchCursor,
}
