//! Sampler registry.
//!
//! The [`SamplerRegistry`] maps sampler names to factories so callers can
//! pick a sampler from configuration instead of naming a concrete type.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{HalError, HalResult};
use crate::sampler::{Sampler, SamplerConfig, SamplerFactory};

type Factory = Box<dyn Fn(SamplerConfig) -> HalResult<Box<dyn Sampler>> + Send + Sync>;

/// Name to factory map for samplers.
pub struct SamplerRegistry {
    factories: FxHashMap<String, Factory>,
}

impl SamplerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Register a sampler type under `name`.
    pub fn register<S>(&mut self, name: impl Into<String>)
    where
        S: SamplerFactory + 'static,
    {
        let name = name.into();
        debug!("Registering sampler: {}", name);
        self.factories.insert(
            name,
            Box::new(|config| {
                let sampler = S::from_config(config)?;
                Ok(Box::new(sampler))
            }),
        );
    }

    /// Register a sampler with a custom constructor.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(SamplerConfig) -> HalResult<Box<dyn Sampler>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("Registering sampler factory: {}", name);
        self.factories.insert(name, Box::new(factory));
    }

    /// Create the sampler named by `config.name`.
    pub fn create(&self, config: SamplerConfig) -> HalResult<Box<dyn Sampler>> {
        match self.factories.get(&config.name) {
            Some(factory) => factory(config),
            None => Err(HalError::BackendUnavailable(format!(
                "no sampler registered with name '{}' (available: {})",
                config.name,
                self.available_samplers().join(", ")
            ))),
        }
    }

    /// Registered sampler names, sorted.
    pub fn available_samplers(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a sampler is registered under `name`.
    pub fn has_sampler(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for SamplerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = SamplerRegistry::new();
        assert!(registry.available_samplers().is_empty());
        assert!(!registry.has_sampler("sim"));
    }

    #[test]
    fn test_register_factory() {
        let mut registry = SamplerRegistry::new();
        registry.register_factory("test", |_config| {
            Err(HalError::BackendUnavailable("test only".into()))
        });

        assert!(registry.has_sampler("test"));
        assert_eq!(registry.available_samplers(), vec!["test"]);
        assert!(registry.create(SamplerConfig::new("test")).is_err());
    }

    #[test]
    fn test_create_unknown_sampler() {
        let registry = SamplerRegistry::new();
        let result = registry.create(SamplerConfig::new("qpu"));
        assert!(matches!(result, Err(HalError::BackendUnavailable(_))));
    }

    #[test]
    fn test_available_samplers_sorted() {
        let mut registry = SamplerRegistry::new();
        registry.register_factory("sim", |_| Err(HalError::BackendUnavailable("test".into())));
        registry.register_factory("exact", |_| Err(HalError::BackendUnavailable("test".into())));

        assert_eq!(registry.available_samplers(), vec!["exact", "sim"]);
    }
}
