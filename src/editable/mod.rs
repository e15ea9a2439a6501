//! Markdown editing primitives for form fields.
//!
//! # Architecture
//!
//! - [`Selection`]: character-offset range, always passed in and returned
//!   explicitly
//! - [`RopeBuffer`]: line lookups and clamped edits over `ropey::Rope`
//! - [`transform`]: pure `(text, selection) -> Edit` operations
//! - [`EditAction`] / [`apply`]: named markdown actions mapped onto transforms
//! - [`EditHistory`]: coalescing snapshot undo/redo
//!
//! # Example
//!
//! ```
//! use markfield::editable::{apply, EditAction, InlineFormat, Selection};
//!
//! let edit = apply(
//!     &EditAction::Inline(InlineFormat::Bold),
//!     "a bold word",
//!     Selection::new(2, 6),
//! )
//! .unwrap();
//!
//! assert_eq!(edit.text, "a **bold** word");
//! assert_eq!(edit.selection, Selection::new(4, 8));
//! ```

mod actions;
mod buffer;
mod history;
mod selection;
pub mod transform;

pub use actions::{
    apply, heading_prefix, ActiveFormats, EditAction, InlineFormat, ListKind, QUOTE_PREFIX,
};
pub use buffer::{char_len, RopeBuffer};
pub use history::{EditHistory, Recorded, COMMIT_DELIMITERS, DEFAULT_MAX_ENTRIES};
pub use selection::Selection;
pub use transform::{Continuation, Edit, EditError};
