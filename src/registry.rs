//! Fingerprint-indexed lookup over the built-in device definitions.

use tracing::warn;

use crate::definition::DeviceDefinition;
use crate::devices;

pub struct Registry {
    definitions: Vec<DeviceDefinition>,
}

impl Registry {
    /// All definitions shipped with this crate.
    pub fn builtin() -> Self {
        Self::from_definitions(vec![
            devices::tervix::proline_thermostat(),
            devices::tervix::wall_thermostat(),
            devices::tervix::proline_x10(),
        ])
    }

    /// Build a registry from an explicit definition list. Lookup resolves
    /// in list order; a fingerprint claimed by more than one definition is
    /// reported here so the shadowing is visible rather than silent.
    pub fn from_definitions(definitions: Vec<DeviceDefinition>) -> Self {
        for (i, def) in definitions.iter().enumerate() {
            for fp in def.fingerprints {
                if let Some(first) = definitions[..i]
                    .iter()
                    .find(|d| d.fingerprints.contains(fp))
                {
                    warn!(
                        model_id = fp.model_id,
                        manufacturer = fp.manufacturer,
                        resolves_to = first.model,
                        shadowed = def.model,
                        "duplicate fingerprint, lookup resolves to the first registration"
                    );
                }
            }
        }
        Self { definitions }
    }

    /// Select the definition for a device by its reported model id and
    /// manufacturer name.
    pub fn lookup(&self, model_id: &str, manufacturer: &str) -> Option<&DeviceDefinition> {
        self.definitions
            .iter()
            .find(|d| d.fingerprints.iter().any(|f| f.matches(model_id, manufacturer)))
    }

    pub fn definitions(&self) -> &[DeviceDefinition] {
        &self.definitions
    }
}
