//! Human-readable dumps for the success path (spec §6).
//!
//! Spec §6 fixes the columns (`TAB: idx, id, obj, typ, ref, nrm, lev, adr,
//! link`; `BTAB: idx, last, lpar, psze, vsze`; `ATAB: idx, xtyp, etyp,
//! eref, low, high, elsz, size`) and says enum names print as their
//! identifier, not a numeric code - so `TypeKind::INTS` prints `INTS`
//! (its `Display` already does this) and `ObjKind` gets the same
//! treatment here since it has no `Display` of its own.

use pasindo_sem::ast::{
    Block, CompoundStmt, Expr, Program, Stmt, SubprogramDecl, TypeExpr,
};
use pasindo_sem::{ObjKind, SymbolTables};

fn obj_label(obj: ObjKind) -> &'static str {
    match obj {
        ObjKind::Constant => "CONSTANT",
        ObjKind::Variable => "VARIABLE",
        ObjKind::Type => "TYPE",
        ObjKind::Procedure => "PROCEDURE",
        ObjKind::Function => "FUNCTION",
        ObjKind::Reserved => "RESERVED",
    }
}

pub fn print_symbol_tables(tables: &SymbolTables) {
    println!("TAB");
    println!(
        "{:<4} {:<16} {:<10} {:<8} {:<5} {:<4} {:<4} {:<6} {:<4}",
        "idx", "id", "obj", "typ", "ref", "nrm", "lev", "adr", "link"
    );
    for (idx, entry) in tables.tab.iter_enumerated() {
        println!(
            "{:<4} {:<16} {:<10} {:<8} {:<5} {:<4} {:<4} {:<6} {:<4}",
            idx.0,
            entry.ident.as_str(),
            obj_label(entry.obj),
            entry.typ,
            entry.ref_idx,
            entry.nrm,
            entry.lev,
            entry.adr,
            entry.link.0,
        );
    }

    println!();
    println!("BTAB");
    println!("{:<4} {:<6} {:<6} {:<6} {:<6}", "idx", "last", "lpar", "psze", "vsze");
    for (idx, entry) in tables.btab.iter_enumerated() {
        println!(
            "{:<4} {:<6} {:<6} {:<6} {:<6}",
            idx.0, entry.last, entry.lpar, entry.psze, entry.vsze
        );
    }

    println!();
    println!("ATAB");
    println!(
        "{:<4} {:<6} {:<6} {:<6} {:<6} {:<6} {:<6} {:<6}",
        "idx", "xtyp", "etyp", "eref", "low", "high", "elsz", "size"
    );
    for (idx, entry) in tables.atab.iter_enumerated() {
        println!(
            "{:<4} {:<6} {:<6} {:<6} {:<6} {:<6} {:<6} {:<6}",
            idx.0, entry.xtyp, entry.etyp, entry.eref, entry.low, entry.high, entry.elsz, entry.size
        );
    }
}

/// An intermediate box-drawable tree for the decorated AST, built once per
/// dump so the actual rendering shares `pasindo_par::Node`'s connector logic
/// (`original_source/src/common/node.py`'s `Node.print_tree`) instead of
/// duplicating it against a second node shape.
struct DumpNode {
    label: String,
    children: Vec<DumpNode>,
}

impl DumpNode {
    fn leaf(label: impl Into<String>) -> Self {
        DumpNode { label: label.into(), children: Vec::new() }
    }

    fn inner(label: impl Into<String>, children: Vec<DumpNode>) -> Self {
        DumpNode { label: label.into(), children }
    }

    fn print(&self, prefix: &str, is_last: bool, at_root: bool) {
        if at_root {
            println!("{}", self.label);
        } else {
            let connector = if is_last { "└── " } else { "├── " };
            println!("{prefix}{connector}{}", self.label);
        }
        let child_prefix = if at_root {
            String::new()
        } else {
            format!("{prefix}{}", if is_last { "    " } else { "│   " })
        };
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.print(&child_prefix, i + 1 == count, false);
        }
    }
}

/// Appends a node's decoration (`type=`, `symbol=`, `level=`) - spec §6's
/// decorated-AST dump has no original-source analog to follow, since the
/// original never prints the AST it builds, so the annotation shape is new
/// here - when the analyzer actually set it (skipped for a node the walk
/// never visited, e.g. an unreachable branch after a fatal error upstream).
fn decorate(label: impl Into<String>, meta: &pasindo_sem::ast::Meta) -> String {
    let mut s = label.into();
    if meta.ty() != pasindo_sem::TypeKind::NOTYP {
        s.push_str(&format!(" type={}", meta.ty()));
    }
    if let Some(sym) = meta.symbol() {
        s.push_str(&format!(" symbol={}", sym.0));
    }
    if let Some(lvl) = meta.scope_level() {
        s.push_str(&format!(" level={lvl}"));
    }
    s
}

fn dump_program(program: &Program) -> DumpNode {
    DumpNode::inner(
        decorate(format!("Program({})", program.name), &program.meta),
        vec![dump_block(&program.block)],
    )
}

fn dump_block(block: &Block) -> DumpNode {
    let mut children = Vec::new();
    for c in &block.const_decls {
        children.push(DumpNode::inner(
            decorate(format!("ConstDecl({})", c.name), &c.meta),
            vec![dump_expr(&c.value)],
        ));
    }
    for t in &block.type_decls {
        children.push(DumpNode::inner(
            decorate(format!("TypeDecl({})", t.name), &t.meta),
            vec![dump_type_expr(&t.type_expr)],
        ));
    }
    for v in &block.var_decls {
        children.push(DumpNode::inner(
            decorate(format!("VarDecl({})", v.names.join(", ")), &v.meta),
            vec![dump_type_expr(&v.type_expr)],
        ));
    }
    for s in &block.subprogram_decls {
        children.push(dump_subprogram(s));
    }
    if let Some(body) = &block.body {
        children.push(dump_compound_stmt(body));
    }
    DumpNode::inner("Block", children)
}

fn dump_subprogram(s: &SubprogramDecl) -> DumpNode {
    match s {
        SubprogramDecl::Procedure(p) => {
            let mut children: Vec<DumpNode> = p
                .params
                .iter()
                .map(|param| DumpNode::leaf(decorate(format!("Param({})", param.name), &param.meta)))
                .collect();
            children.push(dump_block(&p.block));
            DumpNode::inner(decorate(format!("ProcedureDecl({})", p.name), &p.meta), children)
        }
        SubprogramDecl::Function(f) => {
            let mut children: Vec<DumpNode> = f
                .params
                .iter()
                .map(|param| DumpNode::leaf(decorate(format!("Param({})", param.name), &param.meta)))
                .collect();
            children.push(dump_type_expr(&f.return_type));
            children.push(dump_block(&f.block));
            DumpNode::inner(decorate(format!("FunctionDecl({})", f.name), &f.meta), children)
        }
    }
}

fn dump_type_expr(t: &TypeExpr) -> DumpNode {
    match t {
        TypeExpr::Primitive { name, meta } => DumpNode::leaf(decorate(format!("PrimitiveType({name})"), meta)),
        TypeExpr::Named { name, meta } => DumpNode::leaf(decorate(format!("NamedType({name})"), meta)),
        TypeExpr::Array { index_range, element_type, meta } => DumpNode::inner(
            decorate("ArrayType", meta),
            vec![
                DumpNode::inner(
                    "RangeExpr",
                    vec![dump_expr(&index_range.lower), dump_expr(&index_range.upper)],
                ),
                dump_type_expr(element_type),
            ],
        ),
    }
}

fn dump_compound_stmt(c: &CompoundStmt) -> DumpNode {
    DumpNode::inner(
        decorate("CompoundStmt", &c.meta),
        c.stmts.iter().map(dump_stmt).collect(),
    )
}

fn dump_stmt(s: &Stmt) -> DumpNode {
    match s {
        Stmt::Compound(c) => dump_compound_stmt(c),
        Stmt::Assign(a) => DumpNode::inner(
            decorate("AssignStmt", &a.meta),
            vec![dump_expr(&a.target), dump_expr(&a.value)],
        ),
        Stmt::If(i) => {
            let mut children = vec![dump_expr(&i.cond), dump_stmt(&i.then_branch)];
            if let Some(e) = &i.else_branch {
                children.push(dump_stmt(e));
            }
            DumpNode::inner(decorate("IfStmt", &i.meta), children)
        }
        Stmt::While(w) => DumpNode::inner(
            decorate("WhileStmt", &w.meta),
            vec![dump_expr(&w.cond), dump_stmt(&w.body)],
        ),
        Stmt::For(fo) => DumpNode::inner(
            decorate(format!("ForStmt({}, {:?})", fo.var, fo.direction), &fo.meta),
            vec![dump_expr(&fo.start), dump_expr(&fo.end), dump_stmt(&fo.body)],
        ),
        Stmt::ProcCall(p) => DumpNode::inner(
            decorate(format!("ProcCallStmt({})", p.name), &p.meta),
            p.args.iter().map(dump_expr).collect(),
        ),
    }
}

fn dump_expr(e: &Expr) -> DumpNode {
    match e {
        Expr::BinOp { op, left, right, meta } => {
            DumpNode::inner(decorate(format!("BinOp({op})"), meta), vec![dump_expr(left), dump_expr(right)])
        }
        Expr::UnaryOp { op, operand, meta } => {
            DumpNode::inner(decorate(format!("UnaryOp({op})"), meta), vec![dump_expr(operand)])
        }
        Expr::Call { name, args, meta } => {
            DumpNode::inner(decorate(format!("CallExpr({name})"), meta), args.iter().map(dump_expr).collect())
        }
        Expr::VarRef { name, meta } => DumpNode::leaf(decorate(format!("VarRef({name})"), meta)),
        Expr::ArrayAccess { array, index, meta } => {
            DumpNode::inner(decorate("ArrayAccess", meta), vec![dump_expr(array), dump_expr(index)])
        }
        Expr::NumberLiteral { value, meta } => DumpNode::leaf(decorate(format!("NumberLiteral({value})"), meta)),
        Expr::StringLiteral { value, meta } => DumpNode::leaf(decorate(format!("StringLiteral({value})"), meta)),
        Expr::CharLiteral { value, meta } => DumpNode::leaf(decorate(format!("CharLiteral({value})"), meta)),
        Expr::BooleanLiteral { value, meta } => DumpNode::leaf(decorate(format!("BooleanLiteral({value})"), meta)),
    }
}

/// Dumps the decorated AST in the same box-drawing style as
/// `pasindo_par::Node`'s parse-tree dump, annotated with each node's
/// resolved type/symbol/scope level where the analyzer set one.
pub fn print_decorated_ast(program: &Program) {
    dump_program(program).print("", true, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasindo_lex::{default_rules, tokenize};
    use pasindo_par::{Parser, ParserMode};
    use pasindo_sem::{AstBuilder, SemanticAnalyzer};

    #[test]
    fn dump_program_annotates_resolved_names_with_their_type() {
        let rules = default_rules();
        let (tokens, _) = tokenize(
            "program hello;\nvariabel x: integer;\nmulai x := 2 + 3 selesai.",
            &rules,
        );
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let program = AstBuilder::build(&tree).unwrap();
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&program).unwrap();

        let root = dump_program(&program);
        assert!(root.label.starts_with("Program(hello)"));
    }
}
