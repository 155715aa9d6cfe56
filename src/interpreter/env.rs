use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::value::{
        complex,
        core::{FunctionValue, Value},
    },
};

/// Looks up a global constant by name.
///
/// Constants live in a read-only table consulted after the scope stack, so a
/// program can shadow `pi` with its own variable without ever mutating the
/// table.
///
/// # Example
/// ```
/// use algoscript::interpreter::{env::constant, value::core::Value};
///
/// assert_eq!(constant("pi"), Some(Value::Real(std::f64::consts::PI)));
/// assert_eq!(constant("unknown"), None);
/// ```
#[must_use]
pub fn constant(name: &str) -> Option<Value> {
    match name {
        "pi" => Some(Value::Real(std::f64::consts::PI)),
        "e" => Some(Value::Real(std::f64::consts::E)),
        "tau" => Some(Value::Real(std::f64::consts::TAU)),
        "i" => Some(Value::Complex(complex::I)),
        _ => None,
    }
}

/// The nested variable-scope stack and function table of one program run.
///
/// A new scope is pushed on function-call entry and on each FOR-loop
/// iteration; popped on exit. A variable write resolves to the nearest
/// enclosing scope that already defines the name; if none does, the variable
/// is created in the innermost scope. Each run owns an independent
/// `Environment` — nothing is shared between runs.
pub struct Environment {
    scopes:    Vec<HashMap<String, Value>>,
    functions: HashMap<String, Rc<FunctionDef>>,
}

#[allow(clippy::new_without_default)]
impl Environment {
    /// Creates an environment with a single (global) scope and no
    /// user-defined functions.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:    vec![HashMap::new()],
               functions: HashMap::new(), }
    }

    /// Pushes a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Removes the innermost scope.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// The current scope-stack depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Retrieves a variable from the scope stack, innermost scope first.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::{env::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define_local("x", Value::Real(5.0));
    ///
    /// assert_eq!(env.get_variable("x"), Some(&Value::Real(5.0)));
    /// assert_eq!(env.get_variable("y"), None);
    /// ```
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        for scope in self.scopes.iter().rev() {
            if let Some(v) = scope.get(name) {
                return Some(v);
            }
        }
        None
    }

    /// Defines a variable in the current (innermost) scope.
    ///
    /// # Panics
    /// Panics if no scope exists, which indicates an internal error.
    pub fn define_local(&mut self, name: &str, value: Value) {
        self.scopes
            .last_mut()
            .expect("at least global")
            .insert(name.to_string(), value);
    }

    /// Assigns a value with write-through semantics.
    ///
    /// The write resolves to the nearest scope (innermost to outermost) that
    /// already defines the name; if none does, the variable is created in
    /// the innermost scope.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::{env::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define_local("x", Value::Real(1.0));
    /// env.push_scope();
    ///
    /// // Writes through to the outer scope rather than shadowing.
    /// env.assign_nearest("x", Value::Real(2.0));
    /// env.pop_scope();
    ///
    /// assert_eq!(env.get_variable("x"), Some(&Value::Real(2.0)));
    /// ```
    pub fn assign_nearest(&mut self, name: &str, value: Value) {
        for scope in self.scopes.iter_mut().rev() {
            if scope.contains_key(name) {
                scope.insert(name.to_string(), value);
                return;
            }
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        } else {
            self.scopes
                .push(HashMap::from([(name.to_string(), value)]));
        }
    }

    /// Registers a user-defined function. Redefinition overwrites the
    /// previous definition.
    pub fn define_function(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.clone(), Rc::new(def));
    }

    /// Retrieves a user-defined function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.functions.get(name).cloned()
    }

    /// Resolves a name the way the evaluator does: scope stack, then the
    /// constants table, then user functions.
    /// Builtin resolution happens one layer up, in the evaluator, so this
    /// module stays free of the builtin catalog.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.get_variable(name) {
            return Some(value.clone());
        }
        if let Some(value) = constant(name) {
            return Some(value);
        }
        self.function(name)
            .map(|def| Value::Function(FunctionValue::User(def)))
    }
}
