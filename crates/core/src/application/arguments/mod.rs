// Arguments Pipeline - derives JVM flags from limits + feature flags

pub mod expansion;
pub mod modificators;


use std::sync::Arc;

use tracing::debug;

use crate::domain::{Descriptor, ResourceLimits};
use crate::port::EnvLookup;

/// Everything a modificator is allowed to look at.
///
/// Built once at startup and never mutated; the environment is an injected
/// capability so the pipeline stays a pure function of its explicit inputs.
#[derive(Clone)]
pub struct ArgumentsContext {
    pub limits: ResourceLimits,
    pub descriptor: Descriptor,
    env: Arc<dyn EnvLookup>,
}

impl ArgumentsContext {
    pub fn new(limits: ResourceLimits, descriptor: Descriptor, env: Arc<dyn EnvLookup>) -> Self {
        Self {
            limits,
            descriptor,
            env,
        }
    }

    /// Raw lookup; `None` means the key is not present at all.
    pub fn env(&self, key: &str) -> Option<String> {
        self.env.lookup(key)
    }

    /// Lookup with absence collapsed to the empty string.
    pub fn env_or_empty(&self, key: &str) -> String {
        self.env.lookup(key).unwrap_or_default()
    }

    /// Feature-flag reading: unset and falsy values ("", "0", "false",
    /// "no", case-insensitive) are all "disabled".
    pub fn flag_enabled(&self, key: &str) -> bool {
        match self.env.lookup(key) {
            None => false,
            Some(value) => !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "" | "0" | "false" | "no"
            ),
        }
    }
}

/// A pure derivation unit: context in, zero or more tokens out.
///
/// All modificators share this exact signature, so the pipeline is a plain
/// ordered list of function values rather than a trait-object dispatch.
pub type Modificator = fn(&ArgumentsContext) -> Vec<String>;

/// The registered pipeline, in emission order.
pub fn default_modificators() -> Vec<Modificator> {
    vec![
        modificators::memory_options,
        modificators::cpu_options,
        modificators::jolokia_options,
        modificators::diagnostics_options,
        modificators::remote_debug_options,
        modificators::appdynamics_options,
        modificators::exit_on_oom_options,
        modificators::java_options,
    ]
}

/// Fold the pipeline over the context, concatenating each unit's output in
/// registration order. Append-only and infallible: a unit that cannot make
/// sense of its input emits nothing or a documented default, never an error.
pub fn apply_arguments(modificators: &[Modificator], ctx: &ArgumentsContext) -> Vec<String> {
    let mut args = Vec::new();
    for modificator in modificators {
        let derived = modificator(ctx);
        if !derived.is_empty() {
            debug!(tokens = ?derived, "Modificator emitted arguments");
        }
        args.extend(derived);
    }
    args
}
