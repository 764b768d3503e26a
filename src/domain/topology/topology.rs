use bimap::BiMap;
use std::collections::{HashMap, HashSet};

use crate::domain::device::device::{Device, DeviceRole};
use crate::domain::utils::id::{DeviceName, EntityId};
use crate::error::{Error, Result};

/// The device tree of a scenario.
///
/// Devices are kept in insertion order. A device can only be added once its
/// parent is present, so the list never holds a forward reference and the
/// parent links cannot form a cycle.
#[derive(Debug, Clone)]
pub struct Topology {
    devices: Vec<Device>,

    /// Bidirectional index between device ids and device names.
    index: BiMap<EntityId, DeviceName>,

    /// Device id → position in `devices`.
    positions: HashMap<EntityId, usize>,
}

impl Topology {
    pub fn new() -> Self {
        Self { devices: Vec::new(), index: BiMap::new(), positions: HashMap::new() }
    }

    /// Adds a device below an already present parent.
    ///
    /// Fails with a `TopologyError` if the parent id is unknown, if the level
    /// does not strictly increase from the parent, if a second root is added,
    /// or if the id or name is taken.
    pub fn add_device(&mut self, device: Device) -> Result<()> {
        if self.index.contains_left(&device.id) || self.index.contains_right(&device.name) {
            return Err(Error::TopologyError(format!("device '{}' ({}) is already part of the topology", device.name, device.id)));
        }

        match device.parent_id {
            None => {
                if let Some(root) = self.root() {
                    return Err(Error::TopologyError(format!("device '{}' has no parent but '{}' is already the root", device.name, root.name)));
                }
            }
            Some(parent_id) => {
                let parent = self.require(parent_id)?;
                if device.level <= parent.level {
                    return Err(Error::TopologyError(format!(
                        "device '{}' at level {} cannot sit below '{}' at level {}",
                        device.name, device.level, parent.name, parent.level
                    )));
                }
            }
        }

        self.index.insert(device.id, device.name.clone());
        self.positions.insert(device.id, self.devices.len());
        self.devices.push(device);
        Ok(())
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Device> {
        self.positions.get(&id).and_then(|&position| self.devices.get(position))
    }

    /// Like `get`, but a missing device is a topology integrity error.
    pub fn require(&self, id: EntityId) -> Result<&Device> {
        self.get(id).ok_or_else(|| Error::TopologyError(format!("no device with id {} exists", id)))
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Device> {
        let id = self.index.get_by_right(&DeviceName::new(name))?;
        self.get(*id)
    }

    pub fn name_of(&self, id: EntityId) -> Option<&DeviceName> {
        self.index.get_by_left(&id)
    }

    pub fn root(&self) -> Option<&Device> {
        self.devices.iter().find(|device| device.is_root())
    }

    pub fn devices_with_role(&self, role: DeviceRole) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(move |device| device.role == role)
    }

    pub fn children_of(&self, id: EntityId) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(move |device| device.parent_id == Some(id))
    }

    /// Ids from `id` up to the root, starting with `id` itself.
    /// Empty if the device is unknown.
    pub fn path_to_root(&self, id: EntityId) -> Vec<EntityId> {
        let mut path = Vec::new();
        let mut current = self.get(id);

        while let Some(device) = current {
            path.push(device.id);
            current = device.parent_id.and_then(|parent_id| self.get(parent_id));
        }
        path
    }

    /// Sum of uplink latencies on the tree path between two devices.
    ///
    /// Returns `None` when either device is unknown or the two do not share a
    /// common ancestor.
    pub fn latency_between(&self, from: EntityId, to: EntityId) -> Option<f64> {
        if from == to {
            return self.get(from).map(|_| 0.0);
        }

        let from_path = self.path_to_root(from);
        let to_path = self.path_to_root(to);
        let to_ancestors: HashSet<EntityId> = to_path.iter().copied().collect();

        let common = *from_path.iter().find(|id| to_ancestors.contains(id))?;

        let climb = |path: &[EntityId]| -> f64 {
            path.iter().take_while(|id| **id != common).filter_map(|id| self.get(*id)).map(|device| device.uplink_latency).sum()
        };

        Some(climb(&from_path) + climb(&to_path))
    }

    /// Re-checks every structural invariant of the tree.
    pub fn validate(&self) -> Result<()> {
        let roots = self.devices.iter().filter(|device| device.is_root()).count();
        if !self.devices.is_empty() && roots != 1 {
            return Err(Error::TopologyError(format!("expected exactly one root device, found {}", roots)));
        }

        let mut seen: HashSet<EntityId> = HashSet::new();
        for device in &self.devices {
            if let Some(parent_id) = device.parent_id {
                if !seen.contains(&parent_id) {
                    return Err(Error::TopologyError(format!("device '{}' references parent {} before it was created", device.name, parent_id)));
                }
            }
            seen.insert(device.id);
        }

        Ok(())
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}
