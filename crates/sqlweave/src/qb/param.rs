//! Live parameter bindings.
//!
//! A binding maps a [`ParamToken`] (what the expression tree embeds) to an
//! accessor closure (how the value is obtained). Accessors are called again on
//! every execution, so one prepared statement can be executed repeatedly while
//! the caller changes its variables in between.

use crate::value::Value;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

static NEXT_BINDER_ID: AtomicUsize = AtomicUsize::new(1);

/// Placeholder handle returned by `bind_param`.
///
/// Tokens are numbered from 1 in bind order and remember the binder that
/// issued them; the placeholder text that ends up in the SQL is chosen by the
/// dialect at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamToken {
    pub(crate) binder: usize,
    pub(crate) index: usize,
}

impl ParamToken {
    pub fn id(self) -> usize {
        self.index
    }
}

impl fmt::Display for ParamToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":param{}", self.index)
    }
}

type Accessor = Arc<dyn Fn() -> Value + Send + Sync>;

/// One registered binding. The accessor is fixed for the binding's lifetime.
#[derive(Clone)]
pub struct Binding {
    token: ParamToken,
    accessor: Accessor,
}

impl Binding {
    pub fn token(&self) -> ParamToken {
        self.token
    }

    /// Read the current value through the accessor.
    pub fn resolve(&self) -> Value {
        (self.accessor)()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding")
            .field(&self.token)
            .field(&"<dyn Fn() -> Value>")
            .finish()
    }
}

/// Registry of bindings owned by one builder/statement.
///
/// Each binder gets a process-unique id. Clones keep it, so tokens stay valid
/// on a cloned builder.
#[derive(Clone, Debug)]
pub struct ParamBinder {
    id: usize,
    bindings: Vec<Binding>,
}

impl Default for ParamBinder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamBinder {
    pub fn new() -> Self {
        Self {
            id: NEXT_BINDER_ID.fetch_add(1, Ordering::Relaxed),
            bindings: Vec::new(),
        }
    }

    /// Register an accessor and return its token.
    pub fn bind<F, V>(&mut self, accessor: F) -> ParamToken
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        let token = ParamToken {
            binder: self.id,
            index: self.bindings.len() + 1,
        };
        self.bindings.push(Binding {
            token,
            accessor: Arc::new(move || accessor().into()),
        });
        token
    }

    /// Register a binding that always yields `value`.
    pub fn bind_value(&mut self, value: impl Into<Value>) -> ParamToken {
        let value = value.into();
        self.bind(move || value.clone())
    }

    /// Register a binding that reads `var` at execution time.
    pub fn bind_var<T>(&mut self, var: &Var<T>) -> ParamToken
    where
        T: Clone + Into<Value> + Send + Sync + 'static,
    {
        let var = var.clone();
        self.bind(move || var.get())
    }

    /// Look up a token issued by this binder. Tokens from other binders
    /// return `None`.
    pub fn get(&self, token: ParamToken) -> Option<&Binding> {
        if token.binder != self.id {
            return None;
        }
        token
            .index
            .checked_sub(1)
            .and_then(|idx| self.bindings.get(idx))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }
}

/// A shared, cloneable variable for use with [`ParamBinder::bind_var`].
///
/// Clones share storage: `set` on one handle is visible to every binding that
/// reads through another.
pub struct Var<T>(Arc<RwLock<T>>);

impl<T> Var<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    pub fn set(&self, value: T) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Replace the value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(
            &mut *self.0.write().unwrap_or_else(PoisonError::into_inner),
            value,
        )
    }
}

impl<T: Clone> Var<T> {
    pub fn get(&self) -> T {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> Clone for Var<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for Var<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.read() {
            Ok(v) => f.debug_tuple("Var").field(&*v).finish(),
            Err(_) => f.debug_tuple("Var").field(&"<poisoned>").finish(),
        }
    }
}
