//! Walking the load order to produce mod components
//!
//! The resolver never touches host internals. Whatever turns a resolved mod
//! into live components is plugged in through [`ComponentFactory`].

use crate::ResolvedMod;
use hat_errors::ActivationError;
use hat_events::{ActivationEvent, AppEvent, EventEmitter};
use hat_types::PackageMetadata;

/// Produces the components of one mod
pub trait ComponentFactory {
    type Component;

    /// Build the components of `metadata`
    ///
    /// # Errors
    ///
    /// Returns `ActivationError` if the mod's library or one of its
    /// components cannot be produced.
    fn produce(&mut self, metadata: &PackageMetadata)
        -> Result<Vec<Self::Component>, ActivationError>;
}

/// Components produced for one mod
#[derive(Debug)]
pub struct ActivatedMod<C> {
    pub metadata: PackageMetadata,
    pub components: Vec<C>,
}

/// A mod whose factory call failed
#[derive(Debug)]
pub struct FailedMod {
    pub metadata: PackageMetadata,
    pub error: ActivationError,
}

/// Outcome of walking a load order
#[derive(Debug)]
pub struct ActivationReport<C> {
    /// Successful mods in load order
    pub activated: Vec<ActivatedMod<C>>,
    pub failed: Vec<FailedMod>,
}

impl<C> ActivationReport<C> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of components across all activated mods
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.activated.iter().map(|m| m.components.len()).sum()
    }
}

/// Produce components for every mod in `load_order`, in order
///
/// Asset-only mods are activated with no components. A factory failure is
/// recorded and the walk continues with the next mod.
pub fn activate<F>(
    load_order: &[ResolvedMod],
    factory: &mut F,
    emitter: &impl EventEmitter,
) -> ActivationReport<F::Component>
where
    F: ComponentFactory,
{
    let mut report = ActivationReport {
        activated: Vec::with_capacity(load_order.len()),
        failed: Vec::new(),
    };

    for resolved in load_order {
        let metadata = &resolved.metadata;
        let produced = if metadata.is_code_mod() {
            factory.produce(metadata)
        } else {
            Ok(Vec::new())
        };

        match produced {
            Ok(components) => {
                tracing::debug!(name = %metadata.name, components = components.len(), "mod activated");
                emitter.emit(AppEvent::Activation(ActivationEvent::ModActivated {
                    name: metadata.name.clone(),
                    version: metadata.version.to_string(),
                    components: components.len(),
                }));
                report.activated.push(ActivatedMod {
                    metadata: metadata.clone(),
                    components,
                });
            }
            Err(error) => {
                tracing::warn!(name = %metadata.name, %error, "mod activation failed");
                emitter.emit(AppEvent::Activation(ActivationEvent::ModFailed {
                    name: metadata.name.clone(),
                    error: error.to_string(),
                }));
                report.failed.push(FailedMod {
                    metadata: metadata.clone(),
                    error,
                });
            }
        }
    }

    report
}
