//! pasindo-util - Core Utilities and Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the foundation types shared by every phase of the
//! Pascal-S-Indo front end: source locations (`span`), string interning
//! (`symbol`), diagnostic collection (`diagnostic`), and typed arena storage
//! (`index_vec`). None of it is specific to Pascal-S-Indo; it is the ambient
//! infrastructure a multi-phase front end needs regardless of the source
//! language, which is why it lives in its own crate rather than any one phase.
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. ZERO-COST ABSTRACTIONS
//!    All utilities compile down to efficient code with no runtime penalty
//!    compared to hand-written implementations.
//!
//! 2. TYPE SAFETY
//!    Leverage Rust's type system to prevent bugs at compile time.
//!    Examples: typed indices (`TabIdx`, `BTabIdx`, `ATabIdx`) prevent mixing
//!    different index spaces when indexing the symbol tables.
//!
//! 3. ERGONOMICS
//!    APIs should be intuitive and easy to use correctly: builder patterns
//!    for diagnostics, `Idx`/`IndexVec` for arena storage.
//!
//! STRING INTERNING (SYMBOL)
//! --------------------------
//! Interning maps each distinct string to a stable integer handle so that
//! repeated identifiers (which dominate source text) compare and hash in
//! O(1) instead of O(n). `TAB.ident` and every AST `name` field store a
//! `Symbol` rather than a `String`.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, Span};
pub use symbol::{StringTable, Symbol};

pub use rustc_hash::{FxHashMap, FxHashSet};

/// Defines a newtype wrapping `u32` that implements [`Idx`], for use as the
/// index type of an [`IndexVec`]. Used by `pasindo-sem` to carve out
/// `TabIdx`, `BTabIdx`, and `ATabIdx` as three distinct, non-interchangeable
/// index spaces over the TAB/BTAB/ATAB arenas.
#[macro_export]
macro_rules! define_idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize);
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl $name {
            #[inline]
            pub fn as_usize(self) -> usize {
                $crate::Idx::index(self)
            }
        }
    };
}
