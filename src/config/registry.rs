// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::backends::local::FnEntryPoint;
use crate::errors::RegistryError;
use crate::observability::messages::registry::{
    EntryPointLookupFailed, EntryPointRegistered, EntryPointReplaced,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{EntryPoint, StatusCode};

#[derive(Default)]
struct RegistryInner {
    entries: HashMap<String, Arc<dyn EntryPoint>>,
    // First-registration order; the map itself has none.
    order: Vec<String>,
}

/// Thread-safe catalog of entry points by name.
///
/// Every operation takes one registry-wide lock for the duration of the map
/// access only. Entry points are handed out as `Arc`s and invoked after the
/// lock is released, so a long-running invocation on one thread never blocks
/// registration on another.
///
/// # Examples
///
/// ```
/// use the_linkwalker::config::EntryPointRegistry;
/// use the_linkwalker::traits::STATUS_OK;
///
/// let registry = EntryPointRegistry::new();
/// registry
///     .register_fn("triple", |input, output: &mut f64| {
///         *output = input * 3.0;
///         STATUS_OK
///     })
///     .unwrap();
///
/// let triple = registry.get("triple").unwrap();
/// let mut output = 0.0;
/// assert_eq!(triple.invoke(2.0, &mut output), STATUS_OK);
/// assert_eq!(output, 6.0);
/// assert_eq!(registry.names(), vec!["triple".to_string()]);
/// ```
#[derive(Default)]
pub struct EntryPointRegistry {
    inner: Mutex<RegistryInner>,
}

impl EntryPointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created empty on first use.
    ///
    /// Nothing is registered implicitly; call
    /// [`register_builtins`](crate::backends::local::register_builtins) or
    /// [`register`](Self::register) during startup.
    pub fn global() -> &'static EntryPointRegistry {
        static GLOBAL: OnceLock<EntryPointRegistry> = OnceLock::new();
        GLOBAL.get_or_init(EntryPointRegistry::new)
    }

    /// Stores `entry_point` under `name`, replacing any previous entry, and
    /// returns the same entry point.
    pub fn register(
        &self,
        name: &str,
        entry_point: Arc<dyn EntryPoint>,
    ) -> Result<Arc<dyn EntryPoint>, RegistryError> {
        validate_entry_point(name, entry_point.as_ref())?;

        let (replaced, registered_count) = {
            let mut inner = self.lock();
            let replaced = inner
                .entries
                .insert(name.to_string(), Arc::clone(&entry_point))
                .is_some();
            if !replaced {
                inner.order.push(name.to_string());
            }
            (replaced, inner.entries.len())
        };

        if replaced {
            EntryPointReplaced { name }.log();
        }
        EntryPointRegistered {
            name,
            registered_count,
        }
        .log();

        Ok(entry_point)
    }

    /// Registers a closure or function as an entry point.
    pub fn register_fn<F>(&self, name: &str, func: F) -> Result<Arc<dyn EntryPoint>, RegistryError>
    where
        F: Fn(f64, &mut f64) -> StatusCode + Send + Sync + 'static,
    {
        self.register(name, Arc::new(FnEntryPoint::new(name, func)))
    }

    /// Returns the entry point currently registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn EntryPoint>, RegistryError> {
        let found = self.lock().entries.get(name).cloned();
        found.ok_or_else(|| {
            EntryPointLookupFailed { name }.log();
            RegistryError::NotFound {
                name: name.to_string(),
            }
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.lock().entries.contains_key(name)
    }

    /// Snapshot of registered names in first-registration order. Replacing an
    /// entry keeps its original position.
    pub fn names(&self) -> Vec<String> {
        self.lock().order.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Map operations cannot leave the map half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EntryPointRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names();
        f.debug_struct("EntryPointRegistry")
            .field("entry_point_count", &names.len())
            .field("entry_point_names", &names)
            .finish()
    }
}

fn validate_entry_point(name: &str, entry_point: &dyn EntryPoint) -> Result<(), RegistryError> {
    let reason = if name.trim().is_empty() {
        Some("name must not be blank")
    } else if name.contains('\0') {
        Some("name must not contain NUL bytes")
    } else if !entry_point.is_invocable() {
        Some("entry point reports it can no longer be invoked")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RegistryError::InvalidEntryPoint {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
