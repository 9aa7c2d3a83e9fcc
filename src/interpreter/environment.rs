//! Lexically scoped name-to-value bindings.
//!
//! # Overview
//!
//! Environments form a tree rooted at the interpreter's `globals` frame;
//! every other frame links to exactly one enclosing frame. `Rc<RefCell<_>>`
//! lets the interpreter hold one "current environment" pointer while still
//! sharing frames with anything else that might reference them. A function
//! value's call-time frame parents directly onto `globals` per the
//! late-binding behavior this interpreter preserves, so no frame is ever
//! shared between two concurrently live call chains.

use crate::interpreter::error::RuntimeError;
use crate::interpreter::value::Value;
use crate::token::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new_global() -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: None,
        }))
    }

    pub fn new_enclosed(enclosing: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }))
    }

    /// Unconditionally binds `name` in this frame, overwriting any existing
    /// binding. This is what permits redeclaring `var x` at global scope.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(env: &EnvRef, name: &Token) -> Result<Value, RuntimeError> {
        let borrowed = env.borrow();
        if let Some(value) = borrowed.values.get(&name.lexeme) {
            return Ok(value.clone());
        }
        match &borrowed.enclosing {
            Some(parent) => {
                let parent = Rc::clone(parent);
                drop(borrowed);
                Environment::get(&parent, name)
            }
            None => Err(RuntimeError::new(
                format!("Undefined variable '{}'.", name.lexeme),
                name.clone(),
            )),
        }
    }

    pub fn assign(env: &EnvRef, name: &Token, value: Value) -> Result<(), RuntimeError> {
        let mut borrowed = env.borrow_mut();
        if borrowed.values.contains_key(&name.lexeme) {
            borrowed.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }
        match &borrowed.enclosing {
            Some(parent) => {
                let parent = Rc::clone(parent);
                drop(borrowed);
                Environment::assign(&parent, name, value)
            }
            None => Err(RuntimeError::new(
                format!("Undefined variable '{}'.", name.lexeme),
                name.clone(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Span, TokenKind};

    fn ident(name: &str) -> Token {
        Token::new(TokenKind::Identifier, name, Span::new(0, 0, 1))
    }

    #[test]
    fn reads_own_binding() {
        let env = Environment::new_global();
        env.borrow_mut().define("x", Value::Number(1.0));
        assert_eq!(Environment::get(&env, &ident("x")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn reads_through_enclosing_chain() {
        let global = Environment::new_global();
        global.borrow_mut().define("x", Value::Number(1.0));
        let child = Environment::new_enclosed(Rc::clone(&global));
        assert_eq!(Environment::get(&child, &ident("x")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn undefined_variable_errors() {
        let env = Environment::new_global();
        assert!(Environment::get(&env, &ident("missing")).is_err());
    }

    #[test]
    fn assign_finds_nearest_defining_frame() {
        let global = Environment::new_global();
        global.borrow_mut().define("x", Value::Number(1.0));
        let child = Environment::new_enclosed(Rc::clone(&global));
        Environment::assign(&child, &ident("x"), Value::Number(2.0)).unwrap();
        assert_eq!(global.borrow().values.get("x"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn assign_to_undefined_errors() {
        let env = Environment::new_global();
        assert!(Environment::assign(&env, &ident("missing"), Value::Nil).is_err());
    }

    #[test]
    fn redefining_in_same_frame_overwrites() {
        let env = Environment::new_global();
        env.borrow_mut().define("x", Value::Number(1.0));
        env.borrow_mut().define("x", Value::Number(2.0));
        assert_eq!(Environment::get(&env, &ident("x")).unwrap(), Value::Number(2.0));
    }
}
