//! `TypeKind` - the closed set of primitive/reference type tags (spec §3).
//!
//! Mirrors `original_source/src/semantic/types.py`'s `TYPE_*` constants, but
//! as a proper Rust enum instead of bare integers. `ARRAYS`/`RECORDS` are the
//! only reference-bearing kinds; their TAB entry's `ref` field then points
//! into ATAB (`RECORDS` is carried for completeness even though the grammar
//! never produces one — see DESIGN.md).

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeKind {
    #[default]
    NOTYP,
    INTS,
    REALS,
    BOOLS,
    CHARS,
    STRINGS,
    ARRAYS,
    RECORDS,
}

impl TypeKind {
    /// `true` for the two kinds arithmetic operators accept.
    pub fn is_numeric(self) -> bool {
        matches!(self, TypeKind::INTS | TypeKind::REALS)
    }

    /// Storage size in scalar units (spec §4.5's "scalar size = 1").
    /// Arrays compute their own size from ATAB bounds; this is only valid
    /// for non-array kinds.
    pub fn scalar_size(self) -> i64 {
        1
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::NOTYP => "NOTYP",
            TypeKind::INTS => "INTS",
            TypeKind::REALS => "REALS",
            TypeKind::BOOLS => "BOOLS",
            TypeKind::CHARS => "CHARS",
            TypeKind::STRINGS => "STRINGS",
            TypeKind::ARRAYS => "ARRAYS",
            TypeKind::RECORDS => "RECORDS",
        };
        f.write_str(name)
    }
}
