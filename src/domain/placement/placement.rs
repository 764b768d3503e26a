use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::domain::application::application::Application;
use crate::domain::endpoint::sensor::Sensor;
use crate::domain::placement::module_mapping::ModuleMapping;
use crate::domain::placement::placement_strategy::PlacementStrategy;
use crate::domain::topology::topology::Topology;
use crate::domain::utils::id::EntityId;
use crate::error::{Error, Result};

/// Resolved module → hosting devices assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    assignments: BTreeMap<String, BTreeSet<EntityId>>,
}

impl Placement {
    /// Turns a placement strategy into concrete hosts.
    pub fn resolve(strategy: &PlacementStrategy, topology: &Topology, application: &Application, sensors: &[Sensor]) -> Result<Placement> {
        let placement = match strategy {
            PlacementStrategy::StaticMapping(mapping) => Self::resolve_static(mapping, topology, application)?,
            PlacementStrategy::EdgeWard(candidates) => Self::resolve_edge_ward(candidates, topology, application, sensors)?,
        };

        for (module, hosts) in &placement.assignments {
            let names: Vec<String> = hosts.iter().filter_map(|id| topology.name_of(*id)).map(ToString::to_string).collect();
            log::info!("[{}] Module '{}' placed on {:?}.", strategy, module, names);
        }
        Ok(placement)
    }

    fn resolve_static(mapping: &ModuleMapping, topology: &Topology, application: &Application) -> Result<Placement> {
        let mut placement = Placement::default();

        for (module, devices) in mapping.iter() {
            if !application.is_module(module) {
                return Err(Error::SubmissionError(format!("mapping names unknown module '{}'", module)));
            }
            for name in devices {
                let device = topology
                    .get_by_name(name.as_str())
                    .ok_or_else(|| Error::SubmissionError(format!("mapping places '{}' on unknown device '{}'", module, name)))?;
                placement.assign(module, device.id);
            }
        }

        if let Some(unplaced) = application.modules.iter().find(|module| !placement.is_placed(&module.name)) {
            return Err(Error::SubmissionError(format!("static mapping leaves module '{}' without a device", unplaced.name)));
        }
        Ok(placement)
    }

    /// Walks every sensor's path towards the cloud and puts each module on the
    /// lowest candidate device (at or above the previous module) that still
    /// has RAM for it. Without such a device the module goes to the cloud.
    fn resolve_edge_ward(candidates: &ModuleMapping, topology: &Topology, application: &Application, sensors: &[Sensor]) -> Result<Placement> {
        let mut placement = Placement::default();
        let order = application.module_order()?;

        let mut candidate_ids: HashMap<&str, HashSet<EntityId>> = HashMap::new();
        for (module, devices) in candidates.iter() {
            let mut ids = HashSet::new();
            for name in devices {
                let device = topology
                    .get_by_name(name.as_str())
                    .ok_or_else(|| Error::SubmissionError(format!("candidate '{}' for module '{}' does not exist", name, module)))?;
                ids.insert(device.id);
            }
            candidate_ids.insert(module, ids);
        }

        let mut free_ram: HashMap<EntityId, u64> = topology.devices().iter().map(|device| (device.id, device.ram_mb)).collect();

        for sensor in sensors {
            let path = topology.path_to_root(sensor.gateway_device_id);
            let Some(&root) = path.last() else {
                return Err(Error::SubmissionError(format!("sensor '{}' is attached to unknown device {}", sensor.name, sensor.gateway_device_id)));
            };

            let mut cursor = 0;
            for module_name in &order {
                let Some(module) = application.get_module(module_name) else {
                    continue;
                };
                let allowed = candidate_ids.get(module_name.as_str());

                let chosen = path.iter().enumerate().skip(cursor).find(|(_, id)| {
                    let is_candidate = allowed.is_some_and(|set| set.contains(*id));
                    let fits = placement.hosts_on(module_name, **id) || free_ram.get(*id).copied().unwrap_or(0) >= module.ram;
                    is_candidate && fits
                });

                let (index, device_id) = match chosen {
                    Some((index, id)) => (index, *id),
                    None => {
                        log::warn!("No candidate on the path of '{}' can host '{}', falling back to the cloud.", sensor.name, module_name);
                        (path.len() - 1, root)
                    }
                };

                if !placement.hosts_on(module_name, device_id) {
                    if let Some(ram) = free_ram.get_mut(&device_id) {
                        *ram = ram.saturating_sub(module.ram);
                    }
                    placement.assign(module_name, device_id);
                }
                cursor = index;
            }
        }

        Ok(placement)
    }

    pub fn assign(&mut self, module: &str, device: EntityId) {
        self.assignments.entry(module.to_string()).or_default().insert(device);
    }

    pub fn is_placed(&self, module: &str) -> bool {
        self.assignments.get(module).is_some_and(|hosts| !hosts.is_empty())
    }

    pub fn hosts_on(&self, module: &str, device: EntityId) -> bool {
        self.assignments.get(module).is_some_and(|hosts| hosts.contains(&device))
    }

    /// The instance of `module` a tuple at device `from` is routed to: the
    /// nearest host on the way up to the cloud, otherwise the lowest-id host.
    pub fn host_for(&self, module: &str, from: EntityId, topology: &Topology) -> Option<EntityId> {
        let hosts = self.assignments.get(module)?;
        topology.path_to_root(from).into_iter().find(|id| hosts.contains(id)).or_else(|| hosts.iter().next().copied())
    }

    /// Module → device names, for reports.
    pub fn describe(&self, topology: &Topology) -> BTreeMap<String, Vec<String>> {
        self.assignments
            .iter()
            .map(|(module, hosts)| (module.clone(), hosts.iter().filter_map(|id| topology.name_of(*id)).map(ToString::to_string).collect()))
            .collect()
    }
}
