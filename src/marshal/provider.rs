// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Marshaller providers for explicitly declared marshaller classes.
//!
//! A catalog entry may name the marshaller class that handles it instead of
//! relying on a derived strategy. Classes are resolved here, by name, when
//! the factory is built:
//!
//! ```
//! use std::sync::Arc;
//! use marshalgen::marshal::{Marshaller, MarshallerProviders, StringMarshaller};
//!
//! let mut providers = MarshallerProviders::builtin();
//! providers.register("UpperStringMarshaller", || {
//!     Arc::new(StringMarshaller) as Arc<dyn Marshaller>
//! });
//! assert!(providers.contains("UpperStringMarshaller"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::{MarshalError, PrimitiveType, Result};

use super::{
    ListMarshaller, ListTarget, CollectionTarget, MapMarshaller, Marshaller, ScalarMarshaller,
    SetMarshaller, SetTarget, StringMarshaller,
};

/// Factory for one marshaller class.
pub trait MarshallerProvider: Send + Sync {
    /// Create a new marshaller instance.
    fn create(&self) -> Arc<dyn Marshaller>;
}

impl<F> MarshallerProvider for F
where
    F: Fn() -> Arc<dyn Marshaller> + Send + Sync,
{
    fn create(&self) -> Arc<dyn Marshaller> {
        self()
    }
}

/// Marshaller classes known by name.
#[derive(Default)]
pub struct MarshallerProviders {
    providers: HashMap<String, Box<dyn MarshallerProvider>>,
}

impl MarshallerProviders {
    /// Create an empty set of providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Providers for every built-in marshaller class.
    pub fn builtin() -> Self {
        let mut providers = Self::new();
        for p in PrimitiveType::ALL {
            providers.register(ScalarMarshaller::class_name(p), move || {
                Arc::new(ScalarMarshaller::new(p)) as Arc<dyn Marshaller>
            });
        }
        providers.register(StringMarshaller::CLASS_NAME, || {
            Arc::new(StringMarshaller) as Arc<dyn Marshaller>
        });
        providers.register(ListTarget::CLASS_NAME, || {
            Arc::new(ListMarshaller::new()) as Arc<dyn Marshaller>
        });
        providers.register(SetTarget::CLASS_NAME, || {
            Arc::new(SetMarshaller::new()) as Arc<dyn Marshaller>
        });
        providers.register(MapMarshaller::CLASS_NAME, || {
            Arc::new(MapMarshaller) as Arc<dyn Marshaller>
        });
        providers
    }

    /// Register a provider under a class name, replacing any previous one.
    pub fn register(&mut self, class: impl Into<String>, provider: impl MarshallerProvider + 'static) {
        self.providers.insert(class.into(), Box::new(provider));
    }

    /// Unregister a class. Returns `true` if it was registered.
    pub fn unregister(&mut self, class: &str) -> bool {
        self.providers.remove(class).is_some()
    }

    /// Check if a class is registered.
    pub fn contains(&self, class: &str) -> bool {
        self.providers.contains_key(class)
    }

    /// Instantiate `class` on behalf of `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::UnknownMarshallerClass`] if no provider is
    /// registered under `class`.
    pub fn create(&self, class: &str, type_name: &str) -> Result<Arc<dyn Marshaller>> {
        self.providers
            .get(class)
            .map(|provider| provider.create())
            .ok_or_else(|| MarshalError::unknown_class(class, type_name))
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered classes.
    pub fn count(&self) -> usize {
        self.providers.len()
    }
}

impl fmt::Debug for MarshallerProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarshallerProviders")
            .field("classes", &self.names())
            .finish()
    }
}
