//! The decorated AST (spec §3), lowered from `pasindo_par::Node` by
//! [`crate::builder::AstBuilder`] and walked in place by
//! [`crate::analyzer::SemanticAnalyzer`].
//!
//! Node shapes mirror `original_source/src/semantic/ast.py`'s dataclasses
//! one-to-one (`Program`, `Block`, `ConstDecl`, ..., `BooleanLiteral`), but
//! as Rust enums instead of a class hierarchy, and with the mutable
//! "semantic placeholder" fields (`type_info`, `symbol`, `scope_level` on
//! the Python `ASTNode` base) pulled out into one [`Meta`] struct embedded
//! by value in every variant. `Meta`'s fields are `Cell`s so the analyzer
//! can decorate a node through a shared reference during the tree walk
//! instead of needing `&mut` all the way down (see DESIGN.md's note on the
//! "dynamic dispatch on AST" redesign flag).

use std::cell::Cell;

use pasindo_lex::Token;

use crate::symtab::TabIdx;
use crate::types::TypeKind;

/// The decoration spec §3 says every AST node optionally carries: an
/// inferred type, a resolved symbol index, and the scope level it resolved
/// at. Present on every node (not just name/expression occurrences) for
/// uniformity; nodes the analyzer never decorates simply keep the defaults.
#[derive(Debug, Default)]
pub struct Meta {
    pub token: Option<Token>,
    ty: Cell<TypeKind>,
    symbol: Cell<Option<TabIdx>>,
    scope_level: Cell<Option<u32>>,
}

impl Meta {
    pub fn new(token: Option<Token>) -> Self {
        Meta {
            token,
            ty: Cell::new(TypeKind::NOTYP),
            symbol: Cell::new(None),
            scope_level: Cell::new(None),
        }
    }

    pub fn ty(&self) -> TypeKind {
        self.ty.get()
    }

    pub fn set_ty(&self, ty: TypeKind) {
        self.ty.set(ty);
    }

    pub fn symbol(&self) -> Option<TabIdx> {
        self.symbol.get()
    }

    pub fn set_symbol(&self, symbol: TabIdx) {
        self.symbol.set(Some(symbol));
    }

    pub fn scope_level(&self) -> Option<u32> {
        self.scope_level.get()
    }

    pub fn set_scope_level(&self, level: u32) {
        self.scope_level.set(Some(level));
    }
}

#[derive(Debug)]
pub struct Program {
    pub meta: Meta,
    pub name: String,
    pub block: Block,
}

#[derive(Debug, Default)]
pub struct Block {
    pub const_decls: Vec<ConstDecl>,
    pub type_decls: Vec<TypeDecl>,
    pub var_decls: Vec<VarDecl>,
    pub subprogram_decls: Vec<SubprogramDecl>,
    pub body: Option<CompoundStmt>,
}

#[derive(Debug)]
pub struct ConstDecl {
    pub meta: Meta,
    pub name: String,
    pub value: Expr,
}

#[derive(Debug)]
pub struct TypeDecl {
    pub meta: Meta,
    pub name: String,
    pub type_expr: TypeExpr,
}

#[derive(Debug)]
pub struct VarDecl {
    pub meta: Meta,
    pub names: Vec<String>,
    pub type_expr: TypeExpr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Value,
}

#[derive(Debug)]
pub struct Param {
    pub meta: Meta,
    pub name: String,
    pub type_expr: TypeExpr,
    pub kind: ParamKind,
}

#[derive(Debug)]
pub struct ProcedureDecl {
    pub meta: Meta,
    pub name: String,
    pub params: Vec<Param>,
    pub block: Block,
}

#[derive(Debug)]
pub struct FunctionDecl {
    pub meta: Meta,
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    pub block: Block,
}

#[derive(Debug)]
pub enum SubprogramDecl {
    Procedure(ProcedureDecl),
    Function(FunctionDecl),
}

/// Type expressions (spec §3). `PrimitiveType.name` is one of
/// `integer|real|boolean|char`; `NamedType.name` is a user type alias or
/// forward reference resolved by the analyzer, not the builder.
#[derive(Debug)]
pub enum TypeExpr {
    Primitive { meta: Meta, name: String },
    Named { meta: Meta, name: String },
    Array {
        meta: Meta,
        index_range: Box<RangeExpr>,
        element_type: Box<TypeExpr>,
    },
}

#[derive(Debug)]
pub struct RangeExpr {
    pub meta: Meta,
    pub lower: Expr,
    pub upper: Expr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForDirection {
    To,
    DownTo,
}

#[derive(Debug)]
pub struct CompoundStmt {
    pub meta: Meta,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug)]
pub struct AssignStmt {
    pub meta: Meta,
    pub target: Expr,
    pub value: Expr,
}

#[derive(Debug)]
pub struct IfStmt {
    pub meta: Meta,
    pub cond: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug)]
pub struct WhileStmt {
    pub meta: Meta,
    pub cond: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug)]
pub struct ForStmt {
    pub meta: Meta,
    pub var: String,
    pub var_token: Option<Token>,
    pub start: Expr,
    pub end: Expr,
    pub direction: ForDirection,
    pub body: Box<Stmt>,
}

#[derive(Debug)]
pub struct ProcCallStmt {
    pub meta: Meta,
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug)]
pub enum Stmt {
    Compound(CompoundStmt),
    Assign(AssignStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    ProcCall(ProcCallStmt),
}

/// Expressions (spec §3). `ArrayAccess` covers both the assignment-target
/// and factor contexts spec §4.4 distinguishes structurally, not by variant.
#[derive(Debug)]
pub enum Expr {
    BinOp {
        meta: Meta,
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        meta: Meta,
        op: String,
        operand: Box<Expr>,
    },
    Call {
        meta: Meta,
        name: String,
        args: Vec<Expr>,
    },
    VarRef {
        meta: Meta,
        name: String,
    },
    ArrayAccess {
        meta: Meta,
        array: Box<Expr>,
        index: Box<Expr>,
    },
    NumberLiteral {
        meta: Meta,
        value: String,
    },
    StringLiteral {
        meta: Meta,
        value: String,
    },
    CharLiteral {
        meta: Meta,
        value: String,
    },
    BooleanLiteral {
        meta: Meta,
        value: bool,
    },
}

impl Expr {
    pub fn meta(&self) -> &Meta {
        match self {
            Expr::BinOp { meta, .. }
            | Expr::UnaryOp { meta, .. }
            | Expr::Call { meta, .. }
            | Expr::VarRef { meta, .. }
            | Expr::ArrayAccess { meta, .. }
            | Expr::NumberLiteral { meta, .. }
            | Expr::StringLiteral { meta, .. }
            | Expr::CharLiteral { meta, .. }
            | Expr::BooleanLiteral { meta, .. } => meta,
        }
    }

    /// The name an `AssignStmt.target` or `ForStmt.var` resolves against:
    /// `VarRef`'s own name, or the array being indexed for `ArrayAccess`.
    pub fn target_name(&self) -> Option<&str> {
        match self {
            Expr::VarRef { name, .. } => Some(name),
            Expr::ArrayAccess { array, .. } => array.target_name(),
            _ => None,
        }
    }
}
