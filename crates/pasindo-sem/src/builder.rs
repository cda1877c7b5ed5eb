//! AST builder (spec §4.4): lowers a [`pasindo_par::Node`] parse tree into
//! the strongly typed [`crate::ast`] representation.
//!
//! One function per grammar non-terminal, mirroring the architecture of
//! `original_source/src/semantic/ast_builder.py`'s `_build_*` methods - but
//! matching against `pasindo-par`'s actual node shapes, which use different
//! labels than the original (`<const-decl>` not `<const-declaration>`,
//! unwrapped operator leaves instead of `<additive-operator>` wrapper nodes,
//! no `BOOLEAN_LITERAL` token, and so on; see `pasindo-par::parser` for the
//! grammar this builder is actually grounded on). Expression lowering
//! re-associates left-to-right exactly as the parser nests them: `a-b-c`
//! folds into `BinOp('-', BinOp('-', a, b), c)`.
//!
//! A node labelled `<error>` means the parser ran in [`pasindo_par::ParserMode::Diagnostic`]
//! and could not recover a well-formed subtree; the builder treats that as
//! fatal and returns [`crate::error::SemanticError::MalformedNode`] rather
//! than guessing at a repair.

use pasindo_lex::Token;
use pasindo_par::Node;

use crate::ast::*;
use crate::error::SemanticError;

fn malformed(detail: impl Into<String>) -> SemanticError {
    SemanticError::MalformedNode { detail: detail.into() }
}

/// Entry point: lowers a `<program>` parse tree into a [`Program`].
pub struct AstBuilder;

impl AstBuilder {
    pub fn build(root: &Node) -> Result<Program, SemanticError> {
        build_program(root)
    }
}

fn build_program(node: &Node) -> Result<Program, SemanticError> {
    let header = node
        .child("<program-header>")
        .ok_or_else(|| malformed("program is missing its header"))?;
    let name_tok = header
        .children
        .get(1)
        .and_then(|n| n.token.as_ref())
        .ok_or_else(|| malformed("program header is missing its name"))?;

    let decls_node = node
        .child("<declaration-part>")
        .ok_or_else(|| malformed("program is missing a declaration part"))?;
    let body_node = node
        .child("<compound-stmt>")
        .ok_or_else(|| malformed("program is missing a compound statement"))?;

    let mut block = Block::default();
    build_declaration_part(decls_node, &mut block)?;
    block.body = Some(build_compound_stmt(body_node)?);

    Ok(Program {
        meta: Meta::new(Some(name_tok.clone())),
        name: name_tok.value.clone(),
        block,
    })
}

fn build_block(node: &Node) -> Result<Block, SemanticError> {
    let decls_node = node
        .child("<declaration-part>")
        .ok_or_else(|| malformed("block is missing a declaration part"))?;
    let body_node = node
        .child("<compound-stmt>")
        .ok_or_else(|| malformed("block is missing a compound statement"))?;

    let mut block = Block::default();
    build_declaration_part(decls_node, &mut block)?;
    block.body = Some(build_compound_stmt(body_node)?);
    Ok(block)
}

fn build_declaration_part(node: &Node, block: &mut Block) -> Result<(), SemanticError> {
    for child in &node.children {
        match child.label.as_str() {
            "<const-decl>" => block.const_decls.extend(build_const_decl(child)?),
            "<type-decl>" => block.type_decls.extend(build_type_decl(child)?),
            "<var-decl>" => block.var_decls.extend(build_var_decl(child)?),
            "<procedure-decl>" => block
                .subprogram_decls
                .push(SubprogramDecl::Procedure(build_procedure_decl(child)?)),
            "<function-decl>" => block
                .subprogram_decls
                .push(SubprogramDecl::Function(build_function_decl(child)?)),
            "<error>" => return Err(malformed("unrecoverable declaration")),
            other => return Err(malformed(format!("unexpected declaration-part child: {other}"))),
        }
    }
    Ok(())
}

fn build_const_decl(node: &Node) -> Result<Vec<ConstDecl>, SemanticError> {
    let mut decls = Vec::new();
    for assign in node.children_labelled("<const-assign>") {
        let ident = assign
            .children
            .get(0)
            .and_then(|n| n.token.as_ref())
            .ok_or_else(|| malformed("const-assign is missing its identifier"))?;
        let expr_node = assign
            .children
            .get(2)
            .ok_or_else(|| malformed("const-assign is missing its value"))?;
        let value = build_expression(expr_node)?;
        decls.push(ConstDecl {
            meta: Meta::new(Some(ident.clone())),
            name: ident.value.clone(),
            value,
        });
    }
    Ok(decls)
}

fn build_type_decl(node: &Node) -> Result<Vec<TypeDecl>, SemanticError> {
    let mut decls = Vec::new();
    for assign in node.children_labelled("<type-assign>") {
        let ident = assign
            .children
            .get(0)
            .and_then(|n| n.token.as_ref())
            .ok_or_else(|| malformed("type-assign is missing its identifier"))?;
        let type_node = assign
            .children
            .get(2)
            .ok_or_else(|| malformed("type-assign is missing its type"))?;
        let type_expr = build_type_expr(type_node)?;
        decls.push(TypeDecl {
            meta: Meta::new(Some(ident.clone())),
            name: ident.value.clone(),
            type_expr,
        });
    }
    Ok(decls)
}

fn build_var_decl(node: &Node) -> Result<Vec<VarDecl>, SemanticError> {
    let mut decls = Vec::new();
    for group in node.children_labelled("<var-group>") {
        let ident_list_node = group
            .children
            .get(0)
            .ok_or_else(|| malformed("var-group is missing its identifier list"))?;
        let names = build_ident_list(ident_list_node)?;
        let type_node = group
            .children
            .get(2)
            .ok_or_else(|| malformed("var-group is missing its type"))?;
        let type_expr = build_type_expr(type_node)?;
        decls.push(VarDecl {
            meta: Meta::new(ident_list_node.first_token().cloned()),
            names,
            type_expr,
        });
    }
    Ok(decls)
}

fn build_ident_list(node: &Node) -> Result<Vec<String>, SemanticError> {
    let names: Vec<String> = node
        .children
        .iter()
        .filter(|c| c.label == "IDENTIFIER")
        .filter_map(|c| c.token.as_ref())
        .map(|t| t.value.clone())
        .collect();
    if names.is_empty() {
        return Err(malformed("identifier list has no identifiers"));
    }
    Ok(names)
}

fn build_procedure_decl(node: &Node) -> Result<ProcedureDecl, SemanticError> {
    let ident = node
        .children
        .get(1)
        .and_then(|n| n.token.as_ref())
        .ok_or_else(|| malformed("procedure declaration is missing its name"))?;
    let params = match node.child("<formal-params>") {
        Some(fp) => build_formal_params(fp)?,
        None => Vec::new(),
    };
    let block_node = node
        .child("<block>")
        .ok_or_else(|| malformed("procedure declaration is missing its block"))?;
    let block = build_block(block_node)?;
    Ok(ProcedureDecl {
        meta: Meta::new(Some(ident.clone())),
        name: ident.value.clone(),
        params,
        block,
    })
}

fn build_function_decl(node: &Node) -> Result<FunctionDecl, SemanticError> {
    let ident = node
        .children
        .get(1)
        .and_then(|n| n.token.as_ref())
        .ok_or_else(|| malformed("function declaration is missing its name"))?;
    let params = match node.child("<formal-params>") {
        Some(fp) => build_formal_params(fp)?,
        None => Vec::new(),
    };
    let return_type_node = node
        .child("<type>")
        .ok_or_else(|| malformed("function declaration is missing its return type"))?;
    let return_type = build_type_expr(return_type_node)?;
    let block_node = node
        .child("<block>")
        .ok_or_else(|| malformed("function declaration is missing its block"))?;
    let block = build_block(block_node)?;
    Ok(FunctionDecl {
        meta: Meta::new(Some(ident.clone())),
        name: ident.value.clone(),
        params,
        return_type,
        block,
    })
}

fn build_formal_params(node: &Node) -> Result<Vec<Param>, SemanticError> {
    let mut params = Vec::new();
    for group in node.children_labelled("<param-group>") {
        params.extend(build_param_group(group)?);
    }
    Ok(params)
}

fn build_param_group(node: &Node) -> Result<Vec<Param>, SemanticError> {
    let ident_list_node = node
        .children
        .get(0)
        .ok_or_else(|| malformed("param-group is missing its identifier list"))?;
    let idents: Vec<&Token> = ident_list_node
        .children
        .iter()
        .filter(|c| c.label == "IDENTIFIER")
        .filter_map(|c| c.token.as_ref())
        .collect();
    if idents.is_empty() {
        return Err(malformed("param-group has no identifiers"));
    }
    let type_node = node
        .children
        .get(2)
        .ok_or_else(|| malformed("param-group is missing its type"))?;

    let mut params = Vec::new();
    for ident in idents {
        let type_expr = build_type_expr(type_node)?;
        params.push(Param {
            meta: Meta::new(Some(ident.clone())),
            name: ident.value.clone(),
            type_expr,
            kind: ParamKind::Value,
        });
    }
    Ok(params)
}

fn build_type_expr(node: &Node) -> Result<TypeExpr, SemanticError> {
    let child = node
        .children
        .get(0)
        .ok_or_else(|| malformed("type node has no child"))?;
    if child.label == "<array-type>" {
        return build_array_type(child);
    }
    let token = child
        .token
        .clone()
        .ok_or_else(|| malformed("type leaf is missing its token"))?;
    if child.label == "KEYWORD" {
        Ok(TypeExpr::Primitive {
            meta: Meta::new(Some(token.clone())),
            name: token.value,
        })
    } else {
        Ok(TypeExpr::Named {
            meta: Meta::new(Some(token.clone())),
            name: token.value,
        })
    }
}

fn build_array_type(node: &Node) -> Result<TypeExpr, SemanticError> {
    let range_node = node
        .child("<range>")
        .ok_or_else(|| malformed("array type is missing its range"))?;
    let range = build_range(range_node)?;
    let elem_node = node
        .child("<type>")
        .ok_or_else(|| malformed("array type is missing its element type"))?;
    let element_type = build_type_expr(elem_node)?;
    Ok(TypeExpr::Array {
        meta: Meta::new(node.first_token().cloned()),
        index_range: Box::new(range),
        element_type: Box::new(element_type),
    })
}

fn build_range(node: &Node) -> Result<RangeExpr, SemanticError> {
    let lower_node = node
        .children
        .get(0)
        .ok_or_else(|| malformed("range is missing its lower bound"))?;
    let upper_node = node
        .children
        .get(2)
        .ok_or_else(|| malformed("range is missing its upper bound"))?;
    let lower = build_expression(lower_node)?;
    let upper = build_expression(upper_node)?;
    Ok(RangeExpr {
        meta: Meta::new(node.first_token().cloned()),
        lower,
        upper,
    })
}

fn build_compound_stmt(node: &Node) -> Result<CompoundStmt, SemanticError> {
    let mut stmts = Vec::new();
    for child in &node.children {
        match child.label.as_str() {
            "KEYWORD" | "SEMICOLON" => continue,
            "<error>" => return Err(malformed("unrecoverable statement")),
            _ => stmts.push(build_statement(child)?),
        }
    }
    Ok(CompoundStmt {
        meta: Meta::new(node.first_token().cloned()),
        stmts,
    })
}

fn build_statement(node: &Node) -> Result<Stmt, SemanticError> {
    match node.label.as_str() {
        "<compound-stmt>" => Ok(Stmt::Compound(build_compound_stmt(node)?)),
        "<if-stmt>" => Ok(Stmt::If(build_if_stmt(node)?)),
        "<while-stmt>" => Ok(Stmt::While(build_while_stmt(node)?)),
        "<for-stmt>" => Ok(Stmt::For(build_for_stmt(node)?)),
        "<assignment-stmt>" => Ok(Stmt::Assign(build_assignment_stmt(node)?)),
        "<proc-call>" => Ok(Stmt::ProcCall(build_proc_call(node)?)),
        "<error>" => Err(malformed("unrecoverable statement")),
        other => Err(malformed(format!("unexpected statement shape: {other}"))),
    }
}

fn build_if_stmt(node: &Node) -> Result<IfStmt, SemanticError> {
    let cond_node = node
        .child("<expression>")
        .ok_or_else(|| malformed("if statement is missing its condition"))?;
    let cond = build_expression(cond_node)?;
    let then_node = node
        .children
        .get(3)
        .ok_or_else(|| malformed("if statement is missing its then-branch"))?;
    let then_branch = Box::new(build_statement(then_node)?);
    let else_branch = if node.children.len() > 5 {
        let else_node = node
            .children
            .get(5)
            .ok_or_else(|| malformed("if statement is missing its else-branch"))?;
        Some(Box::new(build_statement(else_node)?))
    } else {
        None
    };
    Ok(IfStmt {
        meta: Meta::new(node.first_token().cloned()),
        cond,
        then_branch,
        else_branch,
    })
}

fn build_while_stmt(node: &Node) -> Result<WhileStmt, SemanticError> {
    let cond_node = node
        .children
        .get(1)
        .ok_or_else(|| malformed("while statement is missing its condition"))?;
    let cond = build_expression(cond_node)?;
    let body_node = node
        .children
        .get(3)
        .ok_or_else(|| malformed("while statement is missing its body"))?;
    let body = Box::new(build_statement(body_node)?);
    Ok(WhileStmt {
        meta: Meta::new(node.first_token().cloned()),
        cond,
        body,
    })
}

fn build_for_stmt(node: &Node) -> Result<ForStmt, SemanticError> {
    let var_tok = node
        .children
        .get(1)
        .and_then(|n| n.token.as_ref())
        .ok_or_else(|| malformed("for statement is missing its loop variable"))?;
    let start_node = node
        .children
        .get(3)
        .ok_or_else(|| malformed("for statement is missing its start expression"))?;
    let start = build_expression(start_node)?;
    let dir_tok = node
        .children
        .get(4)
        .and_then(|n| n.token.as_ref())
        .ok_or_else(|| malformed("for statement is missing its direction keyword"))?;
    let direction = if dir_tok.value_eq_ignore_case("turun_ke") {
        ForDirection::DownTo
    } else {
        ForDirection::To
    };
    let end_node = node
        .children
        .get(5)
        .ok_or_else(|| malformed("for statement is missing its end expression"))?;
    let end = build_expression(end_node)?;
    let body_node = node
        .children
        .get(7)
        .ok_or_else(|| malformed("for statement is missing its body"))?;
    let body = Box::new(build_statement(body_node)?);
    Ok(ForStmt {
        meta: Meta::new(Some(var_tok.clone())),
        var: var_tok.value.clone(),
        var_token: Some(var_tok.clone()),
        start,
        end,
        direction,
        body,
    })
}

fn build_assignment_stmt(node: &Node) -> Result<AssignStmt, SemanticError> {
    let ident = node
        .children
        .get(0)
        .and_then(|n| n.token.as_ref())
        .ok_or_else(|| malformed("assignment is missing its target"))?;
    let mut target = Expr::VarRef {
        meta: Meta::new(Some(ident.clone())),
        name: ident.value.clone(),
    };
    if let Some(index_node) = node.child("<index>") {
        let idx_expr_node = index_node
            .children
            .get(1)
            .ok_or_else(|| malformed("array index is missing its expression"))?;
        let index_expr = build_expression(idx_expr_node)?;
        target = Expr::ArrayAccess {
            meta: Meta::new(Some(ident.clone())),
            array: Box::new(target),
            index: Box::new(index_expr),
        };
    }
    let value_node = node
        .child("<expression>")
        .ok_or_else(|| malformed("assignment is missing its value"))?;
    let value = build_expression(value_node)?;
    Ok(AssignStmt {
        meta: Meta::new(Some(ident.clone())),
        target,
        value,
    })
}

fn build_proc_call(node: &Node) -> Result<ProcCallStmt, SemanticError> {
    let ident = node
        .children
        .get(0)
        .and_then(|n| n.token.as_ref())
        .ok_or_else(|| malformed("procedure call is missing its name"))?;
    let args = match node.child("<param-list>") {
        Some(pl) => build_param_list(pl)?,
        None => Vec::new(),
    };
    Ok(ProcCallStmt {
        meta: Meta::new(Some(ident.clone())),
        name: ident.value.clone(),
        args,
    })
}

fn build_param_list(node: &Node) -> Result<Vec<Expr>, SemanticError> {
    node.children
        .iter()
        .filter(|c| c.label == "<expression>")
        .map(build_expression)
        .collect()
}

fn build_expression(node: &Node) -> Result<Expr, SemanticError> {
    let simple_node = node
        .children
        .get(0)
        .ok_or_else(|| malformed("expression is missing its simple-expression"))?;
    let left = build_simple_expr(simple_node)?;
    if node.children.len() >= 3 {
        let op_tok = node
            .children
            .get(1)
            .and_then(|n| n.token.as_ref())
            .ok_or_else(|| malformed("expression is missing its relational operator"))?;
        let right_node = node
            .children
            .get(2)
            .ok_or_else(|| malformed("expression is missing its right-hand side"))?;
        let right = build_simple_expr(right_node)?;
        return Ok(Expr::BinOp {
            meta: Meta::new(Some(op_tok.clone())),
            op: op_tok.value.clone(),
            left: Box::new(left),
            right: Box::new(right),
        });
    }
    Ok(left)
}

/// `[(sign)?, <term>, (op, <term>)*]`, left-associative: a leading `+`/`-`
/// wraps the first term in a `UnaryOp`, then every later operator folds the
/// accumulated result and the next term into a new `BinOp`.
fn build_simple_expr(node: &Node) -> Result<Expr, SemanticError> {
    let mut i = 0;
    let leading_sign = node
        .children
        .get(0)
        .filter(|c| c.label == "ARITHMETIC_OPERATOR")
        .and_then(|c| c.token.clone());
    if leading_sign.is_some() {
        i = 1;
    }

    let term_node = node
        .children
        .get(i)
        .ok_or_else(|| malformed("simple expression is missing its first term"))?;
    let mut result = build_term(term_node)?;
    i += 1;

    if let Some(sign_tok) = leading_sign {
        result = Expr::UnaryOp {
            meta: Meta::new(Some(sign_tok.clone())),
            op: sign_tok.value,
            operand: Box::new(result),
        };
    }

    while i + 1 < node.children.len() {
        let op_tok = node.children[i]
            .token
            .clone()
            .ok_or_else(|| malformed("simple expression is missing an operator token"))?;
        let next_term = node
            .children
            .get(i + 1)
            .ok_or_else(|| malformed("simple expression is missing a term after its operator"))?;
        let right = build_term(next_term)?;
        result = Expr::BinOp {
            meta: Meta::new(Some(op_tok.clone())),
            op: op_tok.value,
            left: Box::new(result),
            right: Box::new(right),
        };
        i += 2;
    }

    Ok(result)
}

fn build_term(node: &Node) -> Result<Expr, SemanticError> {
    let mut i = 0;
    let factor_node = node
        .children
        .get(0)
        .ok_or_else(|| malformed("term is missing its first factor"))?;
    let mut result = build_factor(factor_node)?;
    i += 1;

    while i + 1 < node.children.len() {
        let op_tok = node.children[i]
            .token
            .clone()
            .ok_or_else(|| malformed("term is missing an operator token"))?;
        let next_factor = node
            .children
            .get(i + 1)
            .ok_or_else(|| malformed("term is missing a factor after its operator"))?;
        let right = build_factor(next_factor)?;
        result = Expr::BinOp {
            meta: Meta::new(Some(op_tok.clone())),
            op: op_tok.value,
            left: Box::new(result),
            right: Box::new(right),
        };
        i += 2;
    }

    Ok(result)
}

/// Dispatches on the factor's first child. There is no `BOOLEAN_LITERAL`
/// token kind: `true`/`false` lex as plain identifiers and fall through to
/// the `VarRef` case, resolved later against the preloaded boolean
/// constants (spec §4.6's literal rule) rather than built as
/// `Expr::BooleanLiteral` here - that variant exists for the analyzer's
/// totality but the builder never constructs one.
fn build_factor(node: &Node) -> Result<Expr, SemanticError> {
    let first = node
        .children
        .get(0)
        .ok_or_else(|| malformed("factor has no children"))?;

    match first.label.as_str() {
        "NUMBER" => {
            let tok = first
                .token
                .clone()
                .ok_or_else(|| malformed("number literal is missing its token"))?;
            Ok(Expr::NumberLiteral {
                meta: Meta::new(Some(tok.clone())),
                value: tok.value,
            })
        }
        "STRING_LITERAL" => {
            let tok = first
                .token
                .clone()
                .ok_or_else(|| malformed("string literal is missing its token"))?;
            Ok(Expr::StringLiteral {
                meta: Meta::new(Some(tok.clone())),
                value: tok.value,
            })
        }
        "CHAR_LITERAL" => {
            let tok = first
                .token
                .clone()
                .ok_or_else(|| malformed("char literal is missing its token"))?;
            Ok(Expr::CharLiteral {
                meta: Meta::new(Some(tok.clone())),
                value: tok.value,
            })
        }
        "IDENTIFIER" => {
            let tok = first
                .token
                .clone()
                .ok_or_else(|| malformed("identifier is missing its token"))?;
            if node.children.len() == 1 {
                return Ok(Expr::VarRef {
                    meta: Meta::new(Some(tok.clone())),
                    name: tok.value,
                });
            }
            let second = node
                .children
                .get(1)
                .ok_or_else(|| malformed("factor is missing its second child"))?;
            match second.label.as_str() {
                "LPARENTHESIS" => {
                    let args = match node.child("<param-list>") {
                        Some(pl) => build_param_list(pl)?,
                        None => Vec::new(),
                    };
                    Ok(Expr::Call {
                        meta: Meta::new(Some(tok.clone())),
                        name: tok.value,
                        args,
                    })
                }
                "LBRACKET" => {
                    let index_node = node
                        .children
                        .get(2)
                        .ok_or_else(|| malformed("array access is missing its index"))?;
                    let index = build_expression(index_node)?;
                    Ok(Expr::ArrayAccess {
                        meta: Meta::new(Some(tok.clone())),
                        array: Box::new(Expr::VarRef {
                            meta: Meta::new(Some(tok.clone())),
                            name: tok.value.clone(),
                        }),
                        index: Box::new(index),
                    })
                }
                other => Err(malformed(format!("unexpected factor shape after identifier: {other}"))),
            }
        }
        "LPARENTHESIS" => {
            let inner = node
                .child("<expression>")
                .ok_or_else(|| malformed("parenthesized factor is missing its expression"))?;
            build_expression(inner)
        }
        "LOGICAL_OPERATOR" => {
            let tok = first
                .token
                .clone()
                .ok_or_else(|| malformed("'tidak' is missing its token"))?;
            let operand_node = node
                .children
                .get(1)
                .ok_or_else(|| malformed("'tidak' is missing its operand"))?;
            let operand = build_factor(operand_node)?;
            Ok(Expr::UnaryOp {
                meta: Meta::new(Some(tok.clone())),
                op: tok.value,
                operand: Box::new(operand),
            })
        }
        other => Err(malformed(format!("unhandled factor shape: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasindo_lex::{default_rules, tokenize};
    use pasindo_par::{Parser, ParserMode};

    fn build(src: &str) -> Program {
        let rules = default_rules();
        let (tokens, errors) = tokenize(src, &rules);
        assert!(errors.is_empty(), "unexpected lexical errors: {errors:?}");
        let tree = Parser::new(&tokens, ParserMode::Strict)
            .parse_program()
            .expect("source should parse");
        AstBuilder::build(&tree).expect("tree should lower")
    }

    #[test]
    fn minimal_program_lowers_to_an_empty_block() {
        let program = build("program p; mulai selesai.");
        assert_eq!(program.name, "p");
        assert!(program.block.const_decls.is_empty());
        assert_eq!(program.block.body.as_ref().unwrap().stmts.len(), 0);
    }

    #[test]
    fn const_decl_lowers_its_value_expression() {
        let program = build("program p; konstanta n = 10; mulai selesai.");
        assert_eq!(program.block.const_decls.len(), 1);
        assert_eq!(program.block.const_decls[0].name, "n");
        match &program.block.const_decls[0].value {
            Expr::NumberLiteral { value, .. } => assert_eq!(value, "10"),
            other => panic!("expected a number literal, got {other:?}"),
        }
    }

    #[test]
    fn var_decl_shares_one_type_expr_across_names() {
        let program = build("program p; variabel x, y: integer; mulai selesai.");
        assert_eq!(program.block.var_decls.len(), 1);
        assert_eq!(program.block.var_decls[0].names, vec!["x", "y"]);
        assert!(matches!(
            program.block.var_decls[0].type_expr,
            TypeExpr::Primitive { .. }
        ));
    }

    #[test]
    fn array_type_lowers_range_and_element() {
        let program = build("program p; variabel a: larik[1..10] dari integer; mulai selesai.");
        match &program.block.var_decls[0].type_expr {
            TypeExpr::Array { index_range, element_type, .. } => {
                assert!(matches!(index_range.lower, Expr::NumberLiteral { .. }));
                assert!(matches!(**element_type, TypeExpr::Primitive { .. }));
            }
            other => panic!("expected an array type, got {other:?}"),
        }
    }

    #[test]
    fn subtraction_chain_is_left_associative() {
        let program = build("program p; variabel x: integer; mulai x := a - b - c; selesai.");
        let Stmt::Assign(assign) = &program.block.body.as_ref().unwrap().stmts[0] else {
            panic!("expected an assignment");
        };
        match &assign.value {
            Expr::BinOp { op, left, .. } => {
                assert_eq!(op, "-");
                assert!(matches!(**left, Expr::BinOp { .. }));
            }
            other => panic!("expected a BinOp, got {other:?}"),
        }
    }

    #[test]
    fn true_and_false_lower_to_var_refs_not_boolean_literals() {
        let program = build("program p; variabel x: boolean; mulai x := true; selesai.");
        let Stmt::Assign(assign) = &program.block.body.as_ref().unwrap().stmts[0] else {
            panic!("expected an assignment");
        };
        match &assign.value {
            Expr::VarRef { name, .. } => assert_eq!(name, "true"),
            other => panic!("expected a VarRef, got {other:?}"),
        }
    }

    #[test]
    fn array_element_assignment_wraps_the_target_in_array_access() {
        let program = build("program p; variabel a: larik[1..10] dari integer; mulai a[1] := 5; selesai.");
        let Stmt::Assign(assign) = &program.block.body.as_ref().unwrap().stmts[0] else {
            panic!("expected an assignment");
        };
        assert!(matches!(assign.target, Expr::ArrayAccess { .. }));
        assert_eq!(assign.target.target_name(), Some("a"));
    }

    #[test]
    fn if_without_else_has_no_else_branch() {
        let program = build("program p; variabel x: integer; mulai jika x maka x := 1 selesai.");
        let Stmt::If(if_stmt) = &program.block.body.as_ref().unwrap().stmts[0] else {
            panic!("expected an if statement");
        };
        assert!(if_stmt.else_branch.is_none());
    }

    #[test]
    fn for_statement_captures_its_direction() {
        let program = build("program p; variabel i: integer; mulai untuk i := 1 turun_ke 10 lakukan i := i; selesai.");
        let Stmt::For(for_stmt) = &program.block.body.as_ref().unwrap().stmts[0] else {
            panic!("expected a for statement");
        };
        assert_eq!(for_stmt.direction, ForDirection::DownTo);
    }

    #[test]
    fn bare_identifier_statement_is_a_proc_call_with_no_args() {
        let program = build("program p; mulai tulis selesai.");
        let Stmt::ProcCall(call) = &program.block.body.as_ref().unwrap().stmts[0] else {
            panic!("expected a procedure call");
        };
        assert_eq!(call.name, "tulis");
        assert!(call.args.is_empty());
    }

    #[test]
    fn malformed_tree_from_diagnostic_mode_is_rejected() {
        let rules = default_rules();
        let (tokens, _) = tokenize("program p; mulai 1 + ; selesai.", &rules);
        let tree = Parser::new(&tokens, ParserMode::Diagnostic)
            .parse_program()
            .expect("diagnostic mode always returns a tree");
        assert!(AstBuilder::build(&tree).is_err());
    }
}
