//! JavaScript code generation.
//!
//! Each node kind has one fixed template. Binary operations are always fully
//! parenthesised, so the output never depends on JavaScript's own precedence
//! rules.

use rustc_hash::FxHashSet;

use self::js::{ALWAYS_TRUE_LOOP, ENTRY_POINT, entry_call, render_body, render_number};
use crate::ast::{Block, ElseBranch, Expression, Function, Program, Prototype};
use crate::builtins::BuiltinFunction;

pub mod error;
pub mod js;

pub use self::error::{CodegenError, CodegenResult};

pub struct Transpiler;

impl Transpiler {
    pub fn transpile(&self, program: &Program) -> CodegenResult<String> {
        self.check_program(program)?;

        let mut output = String::new();
        for function in &program.functions {
            if function.prototype.is_anonymous() {
                return Err(CodegenError::Internal {
                    message: "anonymous function at top level".to_string(),
                });
            }
            output.push_str(&self.emit_function(function)?);
            output.push('\n');
        }
        output.push('\n');
        output.push_str(&entry_call());

        Ok(output)
    }

    /// Function names are unique and exactly one of them is `main`.
    fn check_program(&self, program: &Program) -> CodegenResult<()> {
        let mut seen = FxHashSet::default();
        for function in &program.functions {
            let name = function.name();
            if name.is_empty() {
                continue;
            }
            if !seen.insert(name) {
                return Err(CodegenError::DuplicateFunction {
                    name: name.to_string(),
                });
            }
        }

        if !seen.contains(ENTRY_POINT) {
            return Err(CodegenError::MissingEntryPoint);
        }
        Ok(())
    }

    pub fn emit_expression(&self, expr: &Expression) -> CodegenResult<String> {
        match expr {
            Expression::Number(value) => Ok(render_number(*value)),
            Expression::Boolean(value) => Ok(value.to_string()),
            Expression::String(value) => Ok(format!("\"{value}\"")),
            Expression::Array(elements) => {
                Ok(format!("[{}]", self.emit_list(elements)?.join(", ")))
            }
            Expression::Variable(name) => Ok(name.clone()),
            Expression::Unary { op, operand } => {
                let operand = self.emit_expression(operand)?;
                Ok(format!("({}{operand})", op.symbol()))
            }
            Expression::Binary { left, op, right } => {
                let left = self.emit_expression(left)?;
                let right = self.emit_expression(right)?;
                Ok(format!("({left} {} {right})", op.symbol()))
            }
            Expression::Call { callee, args } => {
                let args = self.emit_list(args)?.join(", ");
                match BuiltinFunction::from_name(callee) {
                    Some(builtin) => Ok(format!("{}({args})", builtin.js_callee())),
                    None => Ok(format!("{callee}({args})")),
                }
            }
            Expression::Index { target, index } => {
                let target = self.emit_expression(target)?;
                let index = self.emit_expression(index)?;
                Ok(format!("{target}[{index}]"))
            }
            Expression::IndexAssign {
                target,
                index,
                value,
            } => {
                let target = self.emit_expression(target)?;
                let index = self.emit_expression(index)?;
                let value = self.emit_expression(value)?;
                Ok(format!("{target}[{index}] = {value}"))
            }
            Expression::Assign { name, value } => {
                let value = self.emit_expression(value)?;
                Ok(format!("{name} = {value}"))
            }
            Expression::Declaration {
                name,
                mutable,
                value,
            } => {
                let keyword = if *mutable { "let" } else { "const" };
                let value = self.emit_expression(value)?;
                Ok(format!("{keyword} {name} = {value}"))
            }
            Expression::If {
                condition,
                then_body,
                else_branch,
            } => {
                let condition = self.emit_expression(condition)?;
                let then_body = self.emit_block(then_body.as_ref())?;
                let mut output = format!("if ({condition}) {then_body}");
                match else_branch {
                    None => {}
                    Some(ElseBranch::Block(block)) => {
                        output.push_str(" else ");
                        output.push_str(&self.emit_block(block.as_ref())?);
                    }
                    Some(ElseBranch::If(nested)) => {
                        if !matches!(nested.as_ref(), Expression::If { .. }) {
                            return Err(CodegenError::Internal {
                                message: format!(
                                    "else-if branch holds a {:?} node",
                                    nested.kind()
                                ),
                            });
                        }
                        output.push_str(" else ");
                        output.push_str(&self.emit_expression(nested)?);
                    }
                }
                Ok(output)
            }
            Expression::For {
                variable,
                start,
                condition,
                step,
                body,
            } => {
                let start = self.emit_expression(start)?;
                let condition = self.emit_expression(condition)?;
                let step = self.emit_expression(step)?;
                let body = self.emit_block(body.as_ref())?;
                Ok(format!(
                    "for (let {variable} = {start}; {condition}; {step}) {body}"
                ))
            }
            Expression::ForEach {
                variable,
                iterable,
                body,
            } => {
                let iterable = self.emit_expression(iterable)?;
                let body = self.emit_block(body.as_ref())?;
                Ok(format!("for (const {variable} of {iterable}) {body}"))
            }
            Expression::Loop { body } => {
                let body = self.emit_block(body.as_ref())?;
                Ok(format!("{ALWAYS_TRUE_LOOP} {body}"))
            }
            Expression::Return(None) => Ok("return".to_string()),
            Expression::Return(Some(value)) => {
                let value = self.emit_expression(value)?;
                Ok(format!("return {value}"))
            }
            Expression::Block(block) => self.emit_block(Some(block)),
            Expression::Function(function) => self.emit_function(function),
        }
    }

    fn emit_function(&self, function: &Function) -> CodegenResult<String> {
        let prototype = self.emit_prototype(&function.prototype);
        let body = self.emit_block(function.body.as_ref())?;
        Ok(format!("{prototype} {body}"))
    }

    fn emit_prototype(&self, prototype: &Prototype) -> String {
        let params = prototype.params.join(", ");
        if prototype.is_anonymous() {
            format!("function({params})")
        } else {
            format!("function {}({params})", prototype.name)
        }
    }

    fn emit_block(&self, block: Option<&Block>) -> CodegenResult<String> {
        let statements = match block {
            Some(block) => self.emit_list(&block.items)?,
            None => Vec::new(),
        };
        Ok(render_body(&statements))
    }

    fn emit_list(&self, exprs: &[Expression]) -> CodegenResult<Vec<String>> {
        exprs.iter().map(|expr| self.emit_expression(expr)).collect()
    }
}

/// Generate a JavaScript program from parsed function units.
pub fn generate(program: &Program) -> CodegenResult<String> {
    Transpiler.transpile(program)
}
