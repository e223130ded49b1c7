//! Regex search and substitution engine.
//!
//! Layering, leaves first:
//!
//! * [`Pattern`]: the single live pattern text plus its compiled matcher.
//! * [`MatchFrame`] / [`MatchRegistry`]: per-view ordered match lists.
//! * [`scan()`]: fills a frame by running the matcher over buffer lines.
//! * [`nearest()`]: picks the closest match to a cursor, wrapping around.
//! * [`substitute`]: rewrites matches in place with per-line drift tracking.
//! * [`expression`]: parses `[scope]s/find/replace/[flags]`.
//!
//! The engine never talks to a concrete buffer; it reads lines through
//! [`core_text::LineSource`] and edits through [`core_text::LineSink`].

pub mod error;
pub mod expression;
pub mod frame;
pub mod navigate;
pub mod pattern;
pub mod scan;
pub mod substitute;

pub use error::{CompileError, SearchError};
pub use expression::{ParseError, parse};
pub use frame::{Match, MatchFrame, MatchRegistry};
pub use navigate::{Direction, HIT_BOTTOM, HIT_TOP, NavHit, nearest};
pub use pattern::{DEFAULT_SIZE_LIMIT, Pattern};
pub use scan::{ALL_LINES, scan, scan_range};
pub use substitute::{ReplaceProperties, Scope, Substitution, apply, prepare};
