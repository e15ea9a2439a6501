//! Mention (tag) autocomplete
//!
//! Typing the trigger character (default `@`) starts a composition; every
//! query change is resolved from the per-session [`MentionCache`] or, on a
//! miss, by the host's [`MentionLookup`] running off the update loop.
//! Results for a query that is no longer being composed are cached but never
//! reopen the panel.

mod cache;
mod lookup;
mod state;

pub use cache::MentionCache;
pub use lookup::{Candidate, LookupError, MentionLookup};
pub use state::{MentionAutocomplete, MentionCommit, MentionEffect, MentionPhase, MentionQuery};
