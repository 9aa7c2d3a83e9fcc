//! Tree-walking evaluator for the language.
//!
//! This module provides the [`Interpreter`] struct which walks the
//! statement forest produced by [`crate::parser`] directly: no bytecode, no
//! separate resolution pass.
//!
//! # Overview
//!
//! [`Interpreter`] owns the `globals` environment across calls to
//! [`Interpreter::interpret`], so top-level `var`/`fun` declarations persist
//! across REPL turns exactly like the interpreter handle [`crate::Session`]
//! wraps it in.
//!
//! # Module Structure
//!
//! - [`error`] - [`RuntimeError`] and the internal [`error::Signal`] used to
//!   unwind both errors and `return`
//! - [`value`] - [`Value`], [`value::Callable`], user functions and natives
//! - [`environment`] - the lexically scoped name-to-value frame chain
//!
//! # See Also
//!
//! * [`crate::parser`] - produces the statement forest this module walks
//! * [`crate::diagnostics`] - renders the [`RuntimeError`] this module raises

pub mod environment;
pub mod error;
pub mod value;

pub use error::RuntimeError;
pub use value::Value;

use crate::ast::{Expr, Literal, Stmt};
use crate::token::{Token, TokenKind};
use environment::{EnvRef, Environment};
use error::Signal;
use std::io::Write;
use std::rc::Rc;
use value::{Callable, Function, NativeFunction};

pub struct Interpreter {
    pub(crate) globals: EnvRef,
    environment: EnvRef,
    out: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(out: Box<dyn Write>) -> Self {
        let globals = Environment::new_global();
        define_natives(&globals);
        Self {
            environment: Rc::clone(&globals),
            globals,
            out,
        }
    }

    /// Runs a full program. A runtime error aborts whatever top-level
    /// statement raised it; statements before it have already taken effect,
    /// and the caller decides what "aborts" means for the rest of the batch
    /// (file mode stops the whole program, the REPL only loses that turn;
    /// both simply stop calling `interpret` again after an error).
    pub fn interpret(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            match self.execute(stmt) {
                Ok(()) => {}
                Err(Signal::Error(err)) => {
                    tracing::debug!(line = err.token.line(), message = %err.message, "runtime error");
                    return Err(err);
                }
                // A `return` that escapes every enclosing function is not a
                // user-visible error; there is nowhere left for it to go.
                Err(Signal::Return(_)) => return Ok(()),
            }
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Signal> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{value}").ok();
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block(stmts) => {
                let child = Environment::new_enclosed(Rc::clone(&self.environment));
                self.execute_block(stmts, child)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::Function(decl) => {
                let function = Function { decl: Rc::clone(decl) };
                self.environment
                    .borrow_mut()
                    .define(decl.name.lexeme.clone(), Value::Callable(Rc::new(function)));
                Ok(())
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Err(Signal::Return(value))
            }
        }
    }

    /// Executes `stmts` with `env` as the current environment, restoring
    /// whatever was current before on every exit path, including an error
    /// or a `return` unwinding through it. This is the one place scope push
    /// and pop happen, so block discipline can't be broken by a stray early
    /// return elsewhere.
    pub(crate) fn execute_block(&mut self, stmts: &[Stmt], env: EnvRef) -> Result<(), Signal> {
        let previous = std::mem::replace(&mut self.environment, env);
        let result = (|| {
            for stmt in stmts {
                self.execute(stmt)?;
            }
            Ok(())
        })();
        self.environment = previous;
        result
    }

    /// Evaluates a single expression outside of any statement context, for
    /// the REPL's bare-expression echo (see `crate::Session::run_repl`).
    /// A `return` can never escape a bare expression, since the only way
    /// to produce one is `Stmt::Return`, which this never executes.
    pub(crate) fn evaluate_for_repl(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match self.evaluate(expr) {
            Ok(value) => Ok(value),
            Err(Signal::Error(err)) => Err(err),
            Err(Signal::Return(_)) => unreachable!("a bare expression cannot produce a return"),
        }
    }

    pub(crate) fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, Signal> {
        let value = match expr {
            Expr::Literal(lit) => literal_value(lit),
            Expr::Grouping(inner) => self.evaluate(inner)?,
            Expr::Unary { op, right } => self.evaluate_unary(op, right)?,
            Expr::Binary { left, op, right } => self.evaluate_binary(left, op, right)?,
            Expr::Logical { left, op, right } => self.evaluate_logical(left, op, right)?,
            Expr::Variable(name) => Environment::get(&self.environment, name)?,
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                Environment::assign(&self.environment, name, value.clone())?;
                value
            }
            Expr::Call {
                callee,
                paren,
                args,
            } => self.evaluate_call(callee, paren, args)?,
        };
        Ok(value)
    }

    fn evaluate_unary(&mut self, op: &Token, right: &Expr) -> Result<Value, Signal> {
        let right = self.evaluate(right)?;
        match op.kind {
            TokenKind::Minus => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(runtime_error(op, "Operand must be a number.")),
            },
            TokenKind::Bang => Ok(Value::Boolean(!right.is_truthy())),
            _ => unreachable!("parser only emits Bang/Minus as unary operators"),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, Signal> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        let value = match op.kind {
            TokenKind::Minus => Value::Number(number_operand(op, &left)? - number_operand(op, &right)?),
            TokenKind::Star => Value::Number(number_operand(op, &left)? * number_operand(op, &right)?),
            TokenKind::Slash => Value::Number(number_operand(op, &left)? / number_operand(op, &right)?),
            TokenKind::Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
                (Value::String(a), Value::String(b)) => Value::String(format!("{a}{b}")),
                _ => {
                    return Err(runtime_error(
                        op,
                        "Operands must be two numbers or two strings.",
                    ));
                }
            },
            TokenKind::Greater => Value::Boolean(number_operand(op, &left)? > number_operand(op, &right)?),
            TokenKind::GreaterEqual => {
                Value::Boolean(number_operand(op, &left)? >= number_operand(op, &right)?)
            }
            TokenKind::Less => Value::Boolean(number_operand(op, &left)? < number_operand(op, &right)?),
            TokenKind::LessEqual => {
                Value::Boolean(number_operand(op, &left)? <= number_operand(op, &right)?)
            }
            TokenKind::EqualEqual => Value::Boolean(left == right),
            TokenKind::BangEqual => Value::Boolean(left != right),
            _ => unreachable!("parser only emits arithmetic/comparison operators as binary"),
        };
        Ok(value)
    }

    /// `or`/`and` short-circuit and yield the operand itself, not a
    /// coerced boolean.
    fn evaluate_logical(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, Signal> {
        let left = self.evaluate(left)?;
        match op.kind {
            TokenKind::Or if left.is_truthy() => Ok(left),
            TokenKind::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(right),
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, args: &[Expr]) -> Result<Value, Signal> {
        let callee = self.evaluate(callee)?;

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate(arg)?);
        }

        let Value::Callable(callable) = callee else {
            return Err(runtime_error(paren, "Can only call functions and classes."));
        };

        if arg_values.len() != callable.arity() {
            return Err(runtime_error(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arg_values.len()
                ),
            ));
        }

        callable.call(self, arg_values).map_err(Signal::Error)
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(s.clone()),
        Literal::Bool(b) => Value::Boolean(*b),
        Literal::Nil => Value::Nil,
    }
}

fn number_operand(op: &Token, value: &Value) -> Result<f64, Signal> {
    match value {
        Value::Number(n) => Ok(*n),
        _ => Err(runtime_error(op, "Operand must be a number.")),
    }
}

fn runtime_error(token: &Token, message: impl Into<String>) -> Signal {
    Signal::Error(RuntimeError::new(message, token.clone()))
}

fn define_natives(globals: &EnvRef) {
    globals.borrow_mut().define(
        "clock",
        Value::Callable(Rc::new(NativeFunction {
            name: "clock",
            arity: 0,
            func: |_args| {
                let elapsed = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default();
                Value::Number(elapsed.as_secs_f64())
            },
        })),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use std::cell::RefCell;
    use std::io;

    /// A `Write` sink backed by a shared buffer, so tests can read stdout
    /// back out after `Interpreter` (which owns its writer) is done with it.
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(source: &str) -> (String, Result<(), RuntimeError>) {
        let (tokens, lex_errors) = Lexer::new(source).tokenize();
        assert!(lex_errors.is_empty(), "unexpected lex errors: {lex_errors:?}");
        let (stmts, parse_errors) = Parser::new(tokens).parse();
        assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");

        let buf = Rc::new(RefCell::new(Vec::new()));
        let result = {
            let mut interp = Interpreter::new(Box::new(SharedBuf(Rc::clone(&buf))));
            interp.interpret(&stmts)
        };
        let out = String::from_utf8(buf.borrow().clone()).unwrap();
        (out, result)
    }

    #[test]
    fn arithmetic_precedence() {
        let (out, result) = run("print 1 + 2 * 3;");
        result.unwrap();
        assert_eq!(out, "7\n");
    }

    #[test]
    fn string_concatenation() {
        let (out, result) = run(r#"var a = "hi"; var b = " there"; print a + b;"#);
        result.unwrap();
        assert_eq!(out, "hi there\n");
    }

    #[test]
    fn while_loop() {
        let (out, result) = run("var i = 0; while (i < 3) { print i; i = i + 1; }");
        result.unwrap();
        assert_eq!(out, "0\n1\n2\n");
    }

    #[test]
    fn recursive_fibonacci() {
        let (out, result) = run(
            "fun fib(n) { if (n < 2) return n; return fib(n-1) + fib(n-2); } print fib(10);",
        );
        result.unwrap();
        assert_eq!(out, "55\n");
    }

    #[test]
    fn undefined_variable_is_runtime_error() {
        let (_, result) = run("print x;");
        let err = result.unwrap_err();
        assert!(err.message.contains("Undefined variable 'x'."));
    }

    #[test]
    fn adding_string_and_number_is_runtime_error() {
        let (_, result) = run(r#"print "a" + 1;"#);
        let err = result.unwrap_err();
        assert!(err.message.contains("Operands must be two numbers or two strings."));
    }

    #[test]
    fn block_scoping_does_not_leak() {
        let (out, result) = run("var a = 1; { var a = 2; print a; } print a;");
        result.unwrap();
        assert_eq!(out, "2\n1\n");
    }

    #[test]
    fn for_loop_desugars_correctly() {
        let (out, result) = run("for (var i = 0; i < 3; i = i + 1) print i;");
        result.unwrap();
        assert_eq!(out, "0\n1\n2\n");
    }

    #[test]
    fn short_circuit_or_returns_operand() {
        let (out, result) = run(r#"print "left" or "right";"#);
        result.unwrap();
        assert_eq!(out, "left\n");
    }

    #[test]
    fn short_circuit_and_returns_operand() {
        let (out, result) = run("print false and 1;");
        result.unwrap();
        assert_eq!(out, "false\n");
    }

    #[test]
    fn arity_mismatch_is_runtime_error() {
        let (_, result) = run("fun f(a, b) { return a + b; } f(1);");
        let err = result.unwrap_err();
        assert!(err.message.contains("Expected 2 arguments but got 1."));
    }

    #[test]
    fn function_without_return_yields_nil() {
        let (out, result) = run("fun f() { var x = 1; } print f();");
        result.unwrap();
        assert_eq!(out, "nil\n");
    }

    #[test]
    fn late_binding_resolves_against_globals_not_declaration_site() {
        // The function body references `a`, which exists only in the
        // *caller's* block scope, not in globals. Per the preserved
        // late-binding behavior, this is an undefined-variable error rather
        // than a successful closure lookup.
        let (_, result) = run(
            "fun show() { print a; } { var a = 1; show(); }",
        );
        assert!(result.is_err());
    }

    #[test]
    fn function_value_prints_with_angle_bracket_form() {
        let (out, result) = run("fun f() {} print f;");
        result.unwrap();
        assert_eq!(out, "<fn f>\n");
    }

    #[test]
    fn native_clock_prints_native_fn() {
        let (out, result) = run("print clock;");
        result.unwrap();
        assert_eq!(out, "<native fn>\n");
    }
}
