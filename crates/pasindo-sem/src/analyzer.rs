//! Semantic analyzer (spec §4.6): a single tree walk over [`crate::ast`]
//! that populates [`crate::symtab::SymbolTables`] and decorates every node's
//! [`crate::ast::Meta`] with its resolved type, symbol, and scope level.
//!
//! `original_source/src/semantic/semantic_analyzer.py` dispatches per AST
//! node through Python's dynamic `visit_<ClassName>` method lookup; spec §9
//! flags that as a redesign target, so this walker instead matches on each
//! Rust enum explicitly - one exhaustive `match` per pass, the same way
//! `pasindo-par::Parser` dispatches on `TokenKind`. A handful of gaps in the
//! original are fixed here rather than carried forward (see DESIGN.md):
//! `NamedType` resolution actually copies the aliased type instead of
//! discarding the lookup, `AssignStmt` allows `INTS` to widen into a `REALS`
//! target and accepts an `ArrayAccess` target, and `CallExpr` validates
//! arity/argument types and returns the callee's type instead of being a
//! no-op.
//!
//! Analysis is fatal-on-first-error: the first `SemanticError` aborts the
//! walk, matching the original's behavior and spec §7's "fail fast" framing
//! for this phase.

use pasindo_lex::Token;

use crate::ast::*;
use crate::error::SemanticError;
use crate::symtab::{ATabIdx, ObjKind, RedeclaredError, SymbolTables, TabIdx};
use crate::types::TypeKind;

fn loc(token: Option<&Token>) -> (Option<u32>, Option<u32>) {
    match token {
        Some(t) => (Some(t.line), Some(t.column)),
        None => (None, None),
    }
}

fn undeclared(name: &str, token: Option<&Token>) -> SemanticError {
    let (line, column) = loc(token);
    SemanticError::Undeclared { name: name.to_string(), line, column }
}

fn redeclared(err: RedeclaredError, token: Option<&Token>) -> SemanticError {
    let (line, column) = loc(token);
    SemanticError::Redeclared { name: err.name, line, column }
}

fn type_mismatch(detail: impl Into<String>, token: Option<&Token>) -> SemanticError {
    let (line, column) = loc(token);
    SemanticError::TypeMismatch { detail: detail.into(), line, column }
}

fn kind_from_primitive_name(name: &str) -> TypeKind {
    match name.to_lowercase().as_str() {
        "integer" => TypeKind::INTS,
        "real" => TypeKind::REALS,
        "boolean" => TypeKind::BOOLS,
        "char" => TypeKind::CHARS,
        _ => TypeKind::NOTYP,
    }
}

/// `true` when an argument/value of type `from` may flow into a target of
/// type `to` - exact match, or spec §4.6's `INTS -> REALS` widening.
fn assignable(to: TypeKind, from: TypeKind) -> bool {
    to == from || (to == TypeKind::REALS && from == TypeKind::INTS)
}

pub struct SemanticAnalyzer {
    pub tables: SymbolTables,
    program_visited: bool,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer {
            tables: SymbolTables::new(),
            program_visited: false,
        }
    }

    /// Runs the walk, returning the first error encountered. On success the
    /// program's tables (`self.tables`) and the AST's `Meta` cells hold the
    /// full decoration spec §6 prints.
    pub fn analyze(&mut self, program: &Program) -> Result<(), SemanticError> {
        self.visit_program(program)
    }

    fn visit_program(&mut self, program: &Program) -> Result<(), SemanticError> {
        if self.program_visited {
            return Ok(());
        }
        self.program_visited = true;

        let idx = self
            .tables
            .insert(&program.name, ObjKind::Procedure)
            .map_err(|e| redeclared(e, program.meta.token.as_ref()))?;
        program.meta.set_symbol(idx);
        program.meta.set_scope_level(self.tables.level());

        self.visit_block(&program.block)
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), SemanticError> {
        for c in &block.const_decls {
            self.visit_const_decl(c)?;
        }
        for t in &block.type_decls {
            self.visit_type_decl(t)?;
        }
        for v in &block.var_decls {
            self.visit_var_decl(v)?;
        }
        for s in &block.subprogram_decls {
            match s {
                SubprogramDecl::Procedure(p) => self.visit_procedure_decl(p)?,
                SubprogramDecl::Function(f) => self.visit_function_decl(f)?,
            }
        }
        if let Some(body) = &block.body {
            self.visit_compound_stmt(body)?;
        }
        Ok(())
    }

    fn visit_const_decl(&mut self, decl: &ConstDecl) -> Result<(), SemanticError> {
        let value_type = self.visit_expr(&decl.value)?;
        let const_value = self.eval_const_expr(&decl.value).unwrap_or(0);

        let idx = self
            .tables
            .insert(&decl.name, ObjKind::Constant)
            .map_err(|e| redeclared(e, decl.meta.token.as_ref()))?;
        let entry = &mut self.tables.tab[idx];
        entry.typ = value_type;
        entry.adr = const_value;

        decl.meta.set_symbol(idx);
        decl.meta.set_ty(value_type);
        decl.meta.set_scope_level(self.tables.level());
        Ok(())
    }

    fn visit_type_decl(&mut self, decl: &TypeDecl) -> Result<(), SemanticError> {
        let idx = self
            .tables
            .insert(&decl.name, ObjKind::Type)
            .map_err(|e| redeclared(e, decl.meta.token.as_ref()))?;
        let (kind, ref_idx) = self.resolve_type_expr(&decl.type_expr)?;
        let entry = &mut self.tables.tab[idx];
        entry.typ = kind;
        entry.ref_idx = ref_idx;

        decl.meta.set_symbol(idx);
        decl.meta.set_ty(kind);
        decl.meta.set_scope_level(self.tables.level());
        Ok(())
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) -> Result<(), SemanticError> {
        let (kind, ref_idx) = self.resolve_type_expr(&decl.type_expr)?;
        for name in &decl.names {
            let idx = self
                .tables
                .insert(name, ObjKind::Variable)
                .map_err(|e| redeclared(e, decl.meta.token.as_ref()))?;
            let size = self.tables.variable_size(kind, ref_idx);
            let addr = self.tables.reserve(size);
            let entry = &mut self.tables.tab[idx];
            entry.typ = kind;
            entry.ref_idx = ref_idx;
            entry.adr = addr;
        }
        decl.meta.set_ty(kind);
        decl.meta.set_scope_level(self.tables.level());
        Ok(())
    }

    fn visit_param(&mut self, p: &Param) -> Result<(), SemanticError> {
        let idx = self
            .tables
            .insert(&p.name, ObjKind::Variable)
            .map_err(|e| redeclared(e, p.meta.token.as_ref()))?;
        let (kind, ref_idx) = self.resolve_type_expr(&p.type_expr)?;
        let size = self.tables.variable_size(kind, ref_idx);
        let addr = self.tables.reserve(size);
        let entry = &mut self.tables.tab[idx];
        entry.typ = kind;
        entry.ref_idx = ref_idx;
        entry.nrm = matches!(p.kind, ParamKind::Value);
        entry.adr = addr;

        p.meta.set_symbol(idx);
        p.meta.set_ty(kind);
        p.meta.set_scope_level(self.tables.level());
        Ok(())
    }

    fn visit_procedure_decl(&mut self, decl: &ProcedureDecl) -> Result<(), SemanticError> {
        let proc_idx = self
            .tables
            .insert(&decl.name, ObjKind::Procedure)
            .map_err(|e| redeclared(e, decl.meta.token.as_ref()))?;
        decl.meta.set_symbol(proc_idx);

        let block_idx = self.tables.begin_block();
        self.tables.tab[proc_idx].ref_idx = block_idx.0;
        decl.meta.set_scope_level(self.tables.level());

        for p in &decl.params {
            self.visit_param(p)?;
        }
        self.tables.mark_parameter_section_end();
        self.visit_block(&decl.block)?;
        self.tables.end_block();
        Ok(())
    }

    fn visit_function_decl(&mut self, decl: &FunctionDecl) -> Result<(), SemanticError> {
        let func_idx = self
            .tables
            .insert(&decl.name, ObjKind::Function)
            .map_err(|e| redeclared(e, decl.meta.token.as_ref()))?;
        decl.meta.set_symbol(func_idx);

        // Array-returning functions aren't meaningfully supported: `ref_idx`
        // is about to be overwritten with the block index so
        // `procedure_param_types` can walk it, same as a procedure's. This
        // mirrors classic Pascal-S, which never allows a structured
        // function result either (see DESIGN.md).
        let (ret_kind, _ret_ref) = self.resolve_type_expr(&decl.return_type)?;
        self.tables.tab[func_idx].typ = ret_kind;

        let block_idx = self.tables.begin_block();
        self.tables.tab[func_idx].ref_idx = block_idx.0;
        decl.meta.set_scope_level(self.tables.level());

        // The implicit return-value slot: a variable sharing the function's
        // name, declared inside its own block (spec §4.6).
        let implicit_idx = self
            .tables
            .insert(&decl.name, ObjKind::Variable)
            .map_err(|e| redeclared(e, decl.meta.token.as_ref()))?;
        let size = self.tables.variable_size(ret_kind, 0);
        let addr = self.tables.reserve(size);
        let implicit = &mut self.tables.tab[implicit_idx];
        implicit.typ = ret_kind;

        implicit.adr = addr;

        for p in &decl.params {
            self.visit_param(p)?;
        }
        self.tables.mark_parameter_section_end();
        self.visit_block(&decl.block)?;
        self.tables.end_block();
        Ok(())
    }

    fn resolve_type_expr(&mut self, type_expr: &TypeExpr) -> Result<(TypeKind, u32), SemanticError> {
        match type_expr {
            TypeExpr::Primitive { name, .. } => Ok((kind_from_primitive_name(name), 0)),
            TypeExpr::Named { name, meta } => {
                let idx = self
                    .tables
                    .lookup(name)
                    .ok_or_else(|| undeclared(name, meta.token.as_ref()))?;
                let entry = self.tables.tab[idx].clone();
                Ok((entry.typ, entry.ref_idx))
            }
            TypeExpr::Array { index_range, element_type, .. } => {
                let atab_idx = self.resolve_array_type(index_range, element_type)?;
                Ok((TypeKind::ARRAYS, atab_idx.as_usize() as u32))
            }
        }
    }

    fn resolve_array_type(&mut self, range: &RangeExpr, element_type: &TypeExpr) -> Result<ATabIdx, SemanticError> {
        let lower_ty = self.visit_expr(&range.lower)?;
        let upper_ty = self.visit_expr(&range.upper)?;
        let index_ty = match (lower_ty, upper_ty) {
            (TypeKind::INTS, TypeKind::INTS) => TypeKind::INTS,
            (TypeKind::CHARS, TypeKind::CHARS) => TypeKind::CHARS,
            _ => TypeKind::NOTYP,
        };
        if index_ty == TypeKind::NOTYP {
            return Err(type_mismatch(
                format!("array index bounds must both be INTS or both CHARS, got {lower_ty} and {upper_ty}"),
                range.meta.token.as_ref(),
            ));
        }

        let low = self
            .eval_const_expr(&range.lower)
            .ok_or_else(|| type_mismatch("array bounds must be constant expressions", range.meta.token.as_ref()))?;
        let high = self
            .eval_const_expr(&range.upper)
            .ok_or_else(|| type_mismatch("array bounds must be constant expressions", range.meta.token.as_ref()))?;

        let atab_idx = self.tables.enter_array(index_ty, low, high);

        let (elem_kind, elem_ref, elem_size) = match element_type {
            TypeExpr::Primitive { name, .. } => {
                let kind = kind_from_primitive_name(name);
                (kind, 0u32, kind.scalar_size())
            }
            TypeExpr::Named { name, meta } => {
                let idx = self
                    .tables
                    .lookup(name)
                    .ok_or_else(|| undeclared(name, meta.token.as_ref()))?;
                let entry = self.tables.tab[idx].clone();
                let size = self.tables.variable_size(entry.typ, entry.ref_idx);
                (entry.typ, entry.ref_idx, size)
            }
            TypeExpr::Array { index_range, element_type, .. } => {
                let nested = self.resolve_array_type(index_range, element_type)?;
                let size = self.tables.variable_size(TypeKind::ARRAYS, nested.as_usize() as u32);
                (TypeKind::ARRAYS, nested.as_usize() as u32, size)
            }
        };
        self.tables.finalize_array(atab_idx, elem_kind, elem_ref, elem_size);
        Ok(atab_idx)
    }

    /// Best-effort constant folding for array bounds and `ConstDecl.adr`:
    /// literals, a reference to an already-declared constant, and unary
    /// minus on either. Anything richer (e.g. folding `1 + 2`) is out of
    /// scope - spec §4.5 only requires bounds and constant values to carry
    /// *some* address/value, not a general constant-expression evaluator.
    fn eval_const_expr(&self, expr: &Expr) -> Option<i64> {
        match expr {
            Expr::NumberLiteral { value, .. } => value.parse::<i64>().ok(),
            Expr::CharLiteral { value, .. } => value.chars().next().map(|c| c as i64),
            Expr::BooleanLiteral { value, .. } => Some(*value as i64),
            Expr::UnaryOp { op, operand, .. } if op == "-" => self.eval_const_expr(operand).map(|v| -v),
            Expr::UnaryOp { op, operand, .. } if op == "+" => self.eval_const_expr(operand),
            Expr::VarRef { name, .. } => {
                let idx = self.tables.lookup(name)?;
                let entry = &self.tables.tab[idx];
                (entry.obj == ObjKind::Constant).then_some(entry.adr)
            }
            _ => None,
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::Compound(c) => self.visit_compound_stmt(c),
            Stmt::Assign(a) => self.visit_assign_stmt(a),
            Stmt::If(i) => self.visit_if_stmt(i),
            Stmt::While(w) => self.visit_while_stmt(w),
            Stmt::For(f) => self.visit_for_stmt(f),
            Stmt::ProcCall(p) => self.visit_proc_call_stmt(p),
        }
    }

    fn visit_compound_stmt(&mut self, c: &CompoundStmt) -> Result<(), SemanticError> {
        for s in &c.stmts {
            self.visit_stmt(s)?;
        }
        Ok(())
    }

    /// Resolves the target via [`Expr::target_name`] so an `ArrayAccess`
    /// target (`a[i] := ...`) is checked the same way a plain `VarRef`
    /// target is - the original never handles this case (see DESIGN.md).
    fn visit_assign_stmt(&mut self, stmt: &AssignStmt) -> Result<(), SemanticError> {
        let name = stmt
            .target
            .target_name()
            .ok_or_else(|| SemanticError::MalformedNode {
                detail: "assignment target has no resolvable name".to_string(),
            })?
            .to_string();
        let idx = self
            .tables
            .lookup(&name)
            .ok_or_else(|| undeclared(&name, stmt.target.meta().token.as_ref()))?;
        let base_obj = self.tables.tab[idx].obj;
        if !matches!(base_obj, ObjKind::Variable | ObjKind::Function) {
            return Err(type_mismatch(
                format!("'{name}' is not assignable"),
                stmt.target.meta().token.as_ref(),
            ));
        }

        let target_type = self.visit_expr(&stmt.target)?;
        let value_type = self.visit_expr(&stmt.value)?;
        if !assignable(target_type, value_type) {
            return Err(type_mismatch(
                format!("cannot assign {value_type} to a {target_type} target"),
                stmt.meta.token.as_ref(),
            ));
        }
        stmt.meta.set_ty(target_type);
        Ok(())
    }

    fn visit_if_stmt(&mut self, s: &IfStmt) -> Result<(), SemanticError> {
        let cond_type = self.visit_expr(&s.cond)?;
        if cond_type != TypeKind::BOOLS {
            return Err(type_mismatch(
                format!("if condition must be BOOLS, got {cond_type}"),
                s.meta.token.as_ref(),
            ));
        }
        self.visit_stmt(&s.then_branch)?;
        if let Some(else_branch) = &s.else_branch {
            self.visit_stmt(else_branch)?;
        }
        Ok(())
    }

    fn visit_while_stmt(&mut self, s: &WhileStmt) -> Result<(), SemanticError> {
        let cond_type = self.visit_expr(&s.cond)?;
        if cond_type != TypeKind::BOOLS {
            return Err(type_mismatch(
                format!("while condition must be BOOLS, got {cond_type}"),
                s.meta.token.as_ref(),
            ));
        }
        self.visit_stmt(&s.body)
    }

    fn visit_for_stmt(&mut self, s: &ForStmt) -> Result<(), SemanticError> {
        let idx = self
            .tables
            .lookup(&s.var)
            .ok_or_else(|| undeclared(&s.var, s.var_token.as_ref()))?;
        let entry = self.tables.tab[idx].clone();
        if entry.typ != TypeKind::INTS {
            return Err(type_mismatch(
                format!("for loop variable '{}' must be INTS, got {}", s.var, entry.typ),
                s.var_token.as_ref(),
            ));
        }
        let start_type = self.visit_expr(&s.start)?;
        if start_type != TypeKind::INTS {
            return Err(type_mismatch(
                format!("for loop start value must be INTS, got {start_type}"),
                s.meta.token.as_ref(),
            ));
        }
        let end_type = self.visit_expr(&s.end)?;
        if end_type != TypeKind::INTS {
            return Err(type_mismatch(
                format!("for loop end value must be INTS, got {end_type}"),
                s.meta.token.as_ref(),
            ));
        }
        s.meta.set_symbol(idx);
        s.meta.set_scope_level(entry.lev);
        s.meta.set_ty(TypeKind::INTS);
        self.visit_stmt(&s.body)
    }

    fn visit_proc_call_stmt(&mut self, s: &ProcCallStmt) -> Result<(), SemanticError> {
        let idx = self
            .tables
            .lookup(&s.name)
            .ok_or_else(|| undeclared(&s.name, s.meta.token.as_ref()))?;
        let entry = self.tables.tab[idx].clone();
        if entry.obj != ObjKind::Procedure {
            return Err(type_mismatch(
                format!("'{}' is not a procedure", s.name),
                s.meta.token.as_ref(),
            ));
        }

        let mut arg_types = Vec::with_capacity(s.args.len());
        for a in &s.args {
            arg_types.push(self.visit_expr(a)?);
        }

        s.meta.set_symbol(idx);
        if self.tables.is_builtin_callable(idx) {
            return Ok(());
        }

        let param_types = self.tables.procedure_param_types(entry.ref_idx);
        self.check_arguments(&s.name, &param_types, &arg_types, s.meta.token.as_ref())
    }

    fn check_arguments(
        &self,
        name: &str,
        param_types: &[TypeKind],
        arg_types: &[TypeKind],
        token: Option<&Token>,
    ) -> Result<(), SemanticError> {
        if param_types.len() != arg_types.len() {
            let (line, column) = loc(token);
            return Err(SemanticError::ArityMismatch {
                name: name.to_string(),
                expected: param_types.len(),
                got: arg_types.len(),
                line,
                column,
            });
        }
        for (i, (pt, at)) in param_types.iter().zip(arg_types.iter()).enumerate() {
            if !assignable(*pt, *at) {
                return Err(type_mismatch(
                    format!("argument {} of '{}' expects {}, got {}", i + 1, name, pt, at),
                    token,
                ));
            }
        }
        Ok(())
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<TypeKind, SemanticError> {
        let ty = match expr {
            Expr::BinOp { op, left, right, meta } => self.visit_bin_op(op, left, right, meta.token.as_ref())?,
            Expr::UnaryOp { op, operand, meta } => self.visit_unary_op(op, operand, meta.token.as_ref())?,
            Expr::Call { name, args, meta } => self.visit_call_expr(name, args, meta)?,
            Expr::VarRef { name, meta } => {
                let idx = self.tables.lookup(name).ok_or_else(|| undeclared(name, meta.token.as_ref()))?;
                let entry = self.tables.tab[idx].clone();
                meta.set_symbol(idx);
                meta.set_scope_level(entry.lev);
                entry.typ
            }
            Expr::ArrayAccess { array, index, meta } => self.visit_array_access(array, index, meta)?,
            Expr::NumberLiteral { value, .. } => {
                if value.contains('.') {
                    TypeKind::REALS
                } else {
                    TypeKind::INTS
                }
            }
            Expr::StringLiteral { .. } => TypeKind::STRINGS,
            Expr::CharLiteral { .. } => TypeKind::CHARS,
            Expr::BooleanLiteral { .. } => TypeKind::BOOLS,
        };
        expr.meta().set_ty(ty);
        Ok(ty)
    }

    fn visit_bin_op(&mut self, op: &str, left: &Expr, right: &Expr, token: Option<&Token>) -> Result<TypeKind, SemanticError> {
        let lt = self.visit_expr(left)?;
        let rt = self.visit_expr(right)?;
        match op.to_lowercase().as_str() {
            "+" | "-" | "*" => {
                if !lt.is_numeric() || !rt.is_numeric() {
                    return Err(type_mismatch(
                        format!("operator '{op}' requires numeric operands, got {lt} and {rt}"),
                        token,
                    ));
                }
                Ok(if lt == TypeKind::REALS || rt == TypeKind::REALS { TypeKind::REALS } else { TypeKind::INTS })
            }
            "/" => {
                if !lt.is_numeric() || !rt.is_numeric() {
                    return Err(type_mismatch(
                        format!("operator '/' requires numeric operands, got {lt} and {rt}"),
                        token,
                    ));
                }
                Ok(TypeKind::REALS)
            }
            "bagi" | "mod" => {
                if lt != TypeKind::INTS || rt != TypeKind::INTS {
                    return Err(type_mismatch(
                        format!("operator '{op}' requires INTS operands, got {lt} and {rt}"),
                        token,
                    ));
                }
                Ok(TypeKind::INTS)
            }
            "dan" | "atau" => {
                if lt != TypeKind::BOOLS || rt != TypeKind::BOOLS {
                    return Err(type_mismatch(
                        format!("operator '{op}' requires BOOLS operands, got {lt} and {rt}"),
                        token,
                    ));
                }
                Ok(TypeKind::BOOLS)
            }
            "=" | "<>" | "<" | "<=" | ">" | ">=" => {
                let compatible = lt == rt || (lt.is_numeric() && rt.is_numeric());
                if !compatible {
                    return Err(type_mismatch(
                        format!("operator '{op}' requires comparable operands, got {lt} and {rt}"),
                        token,
                    ));
                }
                Ok(TypeKind::BOOLS)
            }
            _ => Err(SemanticError::MalformedNode { detail: format!("unknown binary operator '{op}'") }),
        }
    }

    fn visit_unary_op(&mut self, op: &str, operand: &Expr, token: Option<&Token>) -> Result<TypeKind, SemanticError> {
        let ot = self.visit_expr(operand)?;
        match op.to_lowercase().as_str() {
            "tidak" => {
                if ot != TypeKind::BOOLS {
                    return Err(type_mismatch(format!("'tidak' requires a BOOLS operand, got {ot}"), token));
                }
                Ok(TypeKind::BOOLS)
            }
            "-" | "+" => {
                if !ot.is_numeric() {
                    return Err(type_mismatch(format!("unary '{op}' requires a numeric operand, got {ot}"), token));
                }
                Ok(ot)
            }
            _ => Err(SemanticError::MalformedNode { detail: format!("unknown unary operator '{op}'") }),
        }
    }

    /// Unlike `original_source`'s `visit_CallExpr` (a no-op that only
    /// recurses into the arguments), this validates the callee resolves to
    /// a FUNCTION, checks arity/argument types, and returns the function's
    /// type (spec §4.6).
    fn visit_call_expr(&mut self, name: &str, args: &[Expr], meta: &Meta) -> Result<TypeKind, SemanticError> {
        let idx = self.tables.lookup(name).ok_or_else(|| undeclared(name, meta.token.as_ref()))?;
        let entry = self.tables.tab[idx].clone();
        if entry.obj != ObjKind::Function {
            return Err(type_mismatch(format!("'{name}' is not a function"), meta.token.as_ref()));
        }

        let mut arg_types = Vec::with_capacity(args.len());
        for a in args {
            arg_types.push(self.visit_expr(a)?);
        }

        meta.set_symbol(idx);
        meta.set_scope_level(entry.lev);

        if !self.tables.is_builtin_callable(idx) {
            let param_types = self.tables.procedure_param_types(entry.ref_idx);
            self.check_arguments(name, &param_types, &arg_types, meta.token.as_ref())?;
        }

        Ok(entry.typ)
    }

    fn visit_array_access(&mut self, array: &Expr, index: &Expr, meta: &Meta) -> Result<TypeKind, SemanticError> {
        let array_ty = self.visit_expr(array)?;
        if array_ty != TypeKind::ARRAYS {
            return Err(type_mismatch(
                format!("'{}' is not an array", array.target_name().unwrap_or("?")),
                meta.token.as_ref(),
            ));
        }
        let tab_idx = array.meta().symbol().ok_or_else(|| SemanticError::MalformedNode {
            detail: "array access base expression was never resolved to a symbol".to_string(),
        })?;
        let array_entry = self.tables.tab[tab_idx].clone();
        let atab_idx = ATabIdx(array_entry.ref_idx);
        let atab_entry = self.tables.atab[atab_idx];

        let index_ty = self.visit_expr(index)?;
        if index_ty != atab_entry.xtyp {
            return Err(type_mismatch(
                format!("array index must be {}, got {}", atab_entry.xtyp, index_ty),
                meta.token.as_ref(),
            ));
        }

        meta.set_symbol(tab_idx);
        meta.set_scope_level(array_entry.lev);
        Ok(atab_entry.etyp)
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
