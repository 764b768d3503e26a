use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::utils::id::DeviceName;

/// Module name → device names, in insertion order per module.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleMapping {
    mapping: BTreeMap<String, Vec<DeviceName>>,
}

impl ModuleMapping {
    pub fn new() -> Self {
        Self { mapping: BTreeMap::new() }
    }

    /// Adding the same pair twice has no effect.
    pub fn add_module_to_device(&mut self, module: impl Into<String>, device: DeviceName) {
        let devices = self.mapping.entry(module.into()).or_default();
        if !devices.contains(&device) {
            devices.push(device);
        }
    }

    pub fn devices_for(&self, module: &str) -> &[DeviceName] {
        self.mapping.get(module).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, module: &str, device: &DeviceName) -> bool {
        self.devices_for(module).contains(device)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DeviceName])> {
        self.mapping.iter().map(|(module, devices)| (module.as_str(), devices.as_slice()))
    }
}
