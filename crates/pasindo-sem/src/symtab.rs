//! TAB / BTAB / ATAB - the Wirth-style Pascal-S symbol-table triple (spec §4.5).
//!
//! `original_source/src/semantic/symbol_table.py` names the classes
//! (`SymbolTables`, `TypeKind`, `ObjectKind`) that `semantic_analyzer.py`
//! drives but never fills in their bodies; the operations below are
//! reconstructed from how `semantic_analyzer.py` actually calls them
//! (`insert`, `lookup`, `begin_block`/`end_block`, `mark_parameter_section_end`,
//! `enter_array`/`finalize_array`, `dx`, `get_variable_size`/`get_elem_size`)
//! plus spec §4.5's operation contracts. Storage itself follows the teacher
//! crate's `IndexVec`/`define_idx!` convention rather than raw `Vec`+`usize`.

use pasindo_util::index_vec::IndexVec;
use pasindo_util::{define_idx, Symbol};

use crate::types::TypeKind;

define_idx!(TabIdx);
define_idx!(BTabIdx);
define_idx!(ATabIdx);

/// TAB's `obj` tag (spec §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjKind {
    Constant,
    Variable,
    Type,
    Procedure,
    Function,
    Reserved,
}

/// One TAB row.
///
/// `ref_idx` is deliberately a raw, untyped index rather than
/// `Option<ATabIdx>`/`Option<BTabIdx>`: Wirth's table reuses the single slot
/// for whichever reference the entry's `obj` calls for (an ATAB row for
/// `typ=ARRAYS`, a BTAB row for `PROCEDURE`/`FUNCTION`), so one typed field
/// can't describe it without a third enum just to distinguish "which table".
/// `0` means "no reference", matching the sentinel convention of `link`.
#[derive(Clone, Debug)]
pub struct TabEntry {
    pub ident: Symbol,
    pub link: TabIdx,
    pub obj: ObjKind,
    pub typ: TypeKind,
    pub ref_idx: u32,
    /// `true` for by-value parameters (spec §4.6's `Param` visit sets this).
    pub nrm: bool,
    pub lev: u32,
    /// Storage offset (variables/parameters), constant value, or built-in tag.
    pub adr: i64,
}

/// One BTAB row - a block's identifier-chain head plus frame sizing.
#[derive(Clone, Copy, Debug, Default)]
pub struct BTabEntry {
    pub last: u32,
    pub lpar: u32,
    pub psze: i64,
    pub vsze: i64,
}

/// One ATAB row - an array's index/element types and bounds.
#[derive(Clone, Copy, Debug)]
pub struct ATabEntry {
    pub xtyp: TypeKind,
    pub etyp: TypeKind,
    pub eref: u32,
    pub low: i64,
    pub high: i64,
    pub elsz: i64,
    pub size: i64,
}

/// Tag range for built-in procedures/functions, preserved as an opaque range
/// per spec §9's open question ("the source uses `adr ∈ {1..4}`").
const BUILTIN_PROC_ADR: std::ops::RangeInclusive<i64> = 1..=4;

/// Every block's frame reserves its first three storage units for the
/// runtime-managed function-result/return-address, static-link, and
/// dynamic-link words (the classic Pascal-S `mark` layout); user variables,
/// parameters, and the implicit function-return slot start at `dx=3`. The
/// global program block is no exception - spec §8's S1 scenario gives the
/// first global variable `adr=3`, so the top-level block's `dx` resets the
/// same way a nested procedure/function block's does.
const BLOCK_FRAME_SIZE: i64 = 3;

pub struct SymbolTables {
    pub tab: IndexVec<TabIdx, TabEntry>,
    pub btab: IndexVec<BTabIdx, BTabEntry>,
    pub atab: IndexVec<ATabIdx, ATabEntry>,
    /// `display[level]` is the BTAB index owning that nesting level, or `0`
    /// when the level isn't currently active (spec §4.5/§GLOSSARY).
    display: Vec<u32>,
    level: u32,
    /// Per-block variable-address counter, reset on `begin_block` (and
    /// started at the same value for the implicit global block built by
    /// `new`, so the top-level scope isn't a special case).
    dx: i64,
}

/// Error raised by a table operation the caller must treat as fatal
/// (redeclaration in the current block). Lookups simply return `None`;
/// only `insert` can fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeclaredError {
    pub name: String,
}

impl SymbolTables {
    /// Builds the tables with TAB[0]/BTAB[0] sentinels, then preloads the
    /// level-0 built-ins spec §4.5 lists: boolean constants, primitive
    /// types, standard functions, standard procedures.
    pub fn new() -> Self {
        let mut tables = SymbolTables {
            tab: IndexVec::new(),
            btab: IndexVec::new(),
            atab: IndexVec::new(),
            display: vec![0],
            level: 0,
            dx: BLOCK_FRAME_SIZE,
        };

        // TAB[0]/BTAB[0] sentinels: link chains terminate at 0, and the
        // global block owns BTAB[0].
        tables.tab.push(TabEntry {
            ident: Symbol::intern(""),
            link: TabIdx(0),
            obj: ObjKind::Reserved,
            typ: TypeKind::NOTYP,
            ref_idx: 0,
            nrm: false,
            lev: 0,
            adr: 0,
        });
        tables.btab.push(BTabEntry::default());
        tables.display[0] = 0;

        tables.preload_builtins();
        tables
    }

    fn preload_builtins(&mut self) {
        // Boolean constants.
        self.insert_builtin("false", ObjKind::Constant, TypeKind::BOOLS, 0);
        self.insert_builtin("true", ObjKind::Constant, TypeKind::BOOLS, 1);

        // Primitive types, registered as TYPE entries so `NamedType` lookups
        // of `integer`/`real`/`char`/`boolean` resolve the same way a
        // user-declared type alias would.
        self.insert_builtin("integer", ObjKind::Type, TypeKind::INTS, 0);
        self.insert_builtin("real", ObjKind::Type, TypeKind::REALS, 0);
        self.insert_builtin("char", ObjKind::Type, TypeKind::CHARS, 0);
        self.insert_builtin("boolean", ObjKind::Type, TypeKind::BOOLS, 0);

        // Standard functions, tagged 1..N in `adr` (spec §4.5 "a numeric
        // tag"); the analyzer never branches on the exact number, only on
        // `ref_idx == 0 && obj == Function` to skip arity checks.
        let functions: &[(&str, TypeKind)] = &[
            ("abs", TypeKind::INTS),
            ("sqr", TypeKind::INTS),
            ("odd", TypeKind::BOOLS),
            ("chr", TypeKind::CHARS),
            ("ord", TypeKind::INTS),
            ("succ", TypeKind::INTS),
            ("pred", TypeKind::INTS),
            ("round", TypeKind::INTS),
            ("trunc", TypeKind::INTS),
            ("sin", TypeKind::REALS),
            ("cos", TypeKind::REALS),
            ("exp", TypeKind::REALS),
            ("ln", TypeKind::REALS),
            ("sqrt", TypeKind::REALS),
            ("arctan", TypeKind::REALS),
            ("eof", TypeKind::BOOLS),
            ("eoln", TypeKind::BOOLS),
        ];
        for (i, (name, ret)) in functions.iter().enumerate() {
            self.insert_builtin(name, ObjKind::Function, *ret, (i + 1) as i64);
        }

        // Standard procedures, tagged within spec §9's preserved `1..4` range.
        let procedures: &[&str] = &["read", "readln", "write", "writeln"];
        for (i, name) in procedures.iter().enumerate() {
            self.insert_builtin(name, ObjKind::Procedure, TypeKind::NOTYP, (i + 1) as i64);
        }
    }

    fn insert_builtin(&mut self, name: &str, obj: ObjKind, typ: TypeKind, adr: i64) {
        let idx = self
            .insert(name, obj)
            .expect("built-in names are distinct and inserted once");
        let entry = &mut self.tab[idx];
        entry.typ = typ;
        entry.adr = adr;
        entry.ref_idx = 0;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn dx(&self) -> i64 {
        self.dx
    }

    fn current_btab_idx(&self) -> BTabIdx {
        BTabIdx(self.display[self.level as usize])
    }

    /// Increments the level, allocates a BTAB row, and resets `dx`
    /// (spec §4.5). Parameters occupy `dx` starting at `BLOCK_FRAME_SIZE`,
    /// past the reserved mark words the runtime otherwise manages.
    pub fn begin_block(&mut self) -> BTabIdx {
        let idx = self.btab.push(BTabEntry::default());
        self.level += 1;
        if self.display.len() <= self.level as usize {
            self.display.push(0);
        }
        self.display[self.level as usize] = idx.as_usize() as u32;
        self.dx = BLOCK_FRAME_SIZE;
        idx
    }

    /// Zeroes `display[level]` and steps back one level (spec §4.5).
    pub fn end_block(&mut self) {
        let btab_idx = self.current_btab_idx();
        self.btab[btab_idx].vsze = self.dx - BLOCK_FRAME_SIZE;
        self.display[self.level as usize] = 0;
        self.level -= 1;
    }

    /// Walks the current block's link chain; fails if `ident` is already
    /// present at this level (spec §4.5's redeclaration rule), otherwise
    /// appends a TAB entry chained onto `btab.last`.
    pub fn insert(&mut self, ident: &str, obj: ObjKind) -> Result<TabIdx, RedeclaredError> {
        let btab_idx = self.current_btab_idx();
        let mut cursor = self.btab[btab_idx].last;
        while cursor != 0 {
            let entry = &self.tab[TabIdx(cursor)];
            if entry.ident.eq_str(ident) {
                return Err(RedeclaredError {
                    name: ident.to_string(),
                });
            }
            cursor = entry.link.as_usize() as u32;
        }

        let new_idx = self.tab.push(TabEntry {
            ident: Symbol::intern(ident),
            link: TabIdx(self.btab[btab_idx].last),
            obj,
            typ: TypeKind::NOTYP,
            ref_idx: 0,
            nrm: false,
            lev: self.level,
            adr: 0,
        });
        self.btab[btab_idx].last = new_idx.as_usize() as u32;
        Ok(new_idx)
    }

    /// Captures `btab.lpar` so parameters can later be enumerated by walking
    /// the link chain up to this marker (spec §4.5).
    pub fn mark_parameter_section_end(&mut self) {
        let btab_idx = self.current_btab_idx();
        let last = self.btab[btab_idx].last;
        self.btab[btab_idx].lpar = last;
        self.btab[btab_idx].psze = self.dx - BLOCK_FRAME_SIZE;
    }

    /// Nearest enclosing scope wins: walks levels from current down to 0,
    /// traversing each block's link chain (spec §4.5/§8 "scope shadowing").
    pub fn lookup(&self, ident: &str) -> Option<TabIdx> {
        for lvl in (0..=self.level).rev() {
            let btab_idx = BTabIdx(self.display[lvl as usize]);
            let mut cursor = self.btab[btab_idx].last;
            while cursor != 0 {
                let tab_idx = TabIdx(cursor);
                let entry = &self.tab[tab_idx];
                if entry.ident.eq_str(ident) {
                    return Some(tab_idx);
                }
                cursor = entry.link.as_usize() as u32;
            }
        }
        None
    }

    /// Reserves an ATAB row ahead of knowing its element type, so a nested
    /// array's outer dimension can forward-reference the inner one
    /// (spec §4.5).
    pub fn enter_array(&mut self, index_type: TypeKind, low: i64, high: i64) -> ATabIdx {
        self.atab.push(ATabEntry {
            xtyp: index_type,
            etyp: TypeKind::NOTYP,
            eref: 0,
            low,
            high,
            elsz: 0,
            size: 0,
        })
    }

    pub fn finalize_array(&mut self, idx: ATabIdx, elem_type: TypeKind, elem_ref: u32, elem_size: i64) {
        let row = &mut self.atab[idx];
        row.etyp = elem_type;
        row.eref = elem_ref;
        row.elsz = elem_size;
        row.size = (row.high - row.low + 1) * elem_size;
    }

    /// Reserves `size_of(typ)` units at the current `dx` and advances it;
    /// used for variables, parameters, and the implicit function-return
    /// slot (spec §4.5's "Address assignment").
    pub fn reserve(&mut self, size: i64) -> i64 {
        let addr = self.dx;
        self.dx += size;
        addr
    }

    pub fn variable_size(&self, typ: TypeKind, array_ref: u32) -> i64 {
        if typ == TypeKind::ARRAYS {
            self.atab[ATabIdx(array_ref)].size
        } else {
            typ.scalar_size()
        }
    }

    /// `true` when `tab[idx]` is a built-in procedure/function: `ref_idx=0`
    /// plus an `adr` inside the reserved tag range (spec §9's "distinguish
    /// them by `ref=0` plus a dedicated `adr` tag range").
    pub fn is_builtin_callable(&self, idx: TabIdx) -> bool {
        let entry = &self.tab[idx];
        entry.ref_idx == 0 && BUILTIN_PROC_ADR.contains(&entry.adr)
    }

    /// Enumerates a procedure/function's parameter types by walking its
    /// BTAB row's link chain up to `lpar`, then reversing to declaration
    /// order (spec §4.6's `_get_procedure_param_types`).
    pub fn procedure_param_types(&self, block_ref: u32) -> Vec<TypeKind> {
        if block_ref == 0 || block_ref as usize >= self.btab.len() {
            return Vec::new();
        }
        let block = self.btab[BTabIdx(block_ref)];
        let mut params = Vec::new();
        let mut cursor = block.lpar;
        while cursor != 0 {
            let entry = &self.tab[TabIdx(cursor)];
            params.push(entry.typ);
            cursor = entry.link.as_usize() as u32;
        }
        params.reverse();
        params
    }
}

impl Default for SymbolTables {
    fn default() -> Self {
        Self::new()
    }
}
