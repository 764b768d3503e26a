use std::collections::{BTreeSet, HashMap, VecDeque};

use serde::Serialize;

use crate::domain::application::app_edge::{AppEdge, EdgeRole};
use crate::domain::application::app_loop::AppLoop;
use crate::domain::application::app_module::AppModule;
use crate::domain::application::selectivity::{FractionalSelectivity, SelectivityRule};
use crate::domain::utils::id::{AppId, EntityId};
use crate::error::{Error, Result};

/// The directed application graph: modules, the sensor and actuator tags
/// feeding and draining them, the edges between all of those, selectivity
/// rules and the tracked loops.
///
/// Declarations are collected freely; nothing is cross-checked until
/// [`Application::validate`] runs.
#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub app_id: AppId,
    pub user_id: EntityId,

    pub modules: Vec<AppModule>,
    pub sensor_tags: BTreeSet<String>,
    pub actuator_tags: BTreeSet<String>,
    pub edges: Vec<AppEdge>,
    pub selectivity_rules: Vec<SelectivityRule>,
    pub loops: Vec<AppLoop>,
}

impl Application {
    pub fn new(app_id: AppId, user_id: EntityId) -> Self {
        Self {
            app_id,
            user_id,
            modules: Vec::new(),
            sensor_tags: BTreeSet::new(),
            actuator_tags: BTreeSet::new(),
            edges: Vec::new(),
            selectivity_rules: Vec::new(),
            loops: Vec::new(),
        }
    }

    pub fn add_app_module(&mut self, name: impl Into<String>, ram: u64) -> Result<()> {
        let module = AppModule::new(name, ram);
        if self.get_module(&module.name).is_some() {
            return Err(Error::GraphError(format!("module '{}' is declared twice in '{}'", module.name, self.app_id)));
        }
        self.modules.push(module);
        Ok(())
    }

    pub fn add_sensor_tag(&mut self, tag: impl Into<String>) {
        self.sensor_tags.insert(tag.into());
    }

    pub fn add_actuator_tag(&mut self, tag: impl Into<String>) {
        self.actuator_tags.insert(tag.into());
    }

    pub fn add_app_edge(&mut self, edge: AppEdge) {
        self.edges.push(edge);
    }

    pub fn add_tuple_mapping(
        &mut self,
        module: impl Into<String>,
        input_tuple_type: impl Into<String>,
        output_tuple_type: impl Into<String>,
        selectivity: FractionalSelectivity,
    ) {
        self.selectivity_rules.push(SelectivityRule {
            module: module.into(),
            input_tuple_type: input_tuple_type.into(),
            output_tuple_type: output_tuple_type.into(),
            selectivity,
        });
    }

    pub fn set_loops(&mut self, loops: Vec<AppLoop>) {
        self.loops = loops;
    }

    pub fn get_module(&self, name: &str) -> Option<&AppModule> {
        self.modules.iter().find(|module| module.name == name)
    }

    pub fn is_module(&self, name: &str) -> bool {
        self.get_module(name).is_some()
    }

    pub fn get_edge(&self, source: &str, destination: &str) -> Option<&AppEdge> {
        self.edges.iter().find(|edge| edge.source == source && edge.destination == destination)
    }

    pub fn outgoing_edges<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a AppEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.source == source)
    }

    /// Selectivity applied when `module` processes a tuple of `input_tuple_type`.
    pub fn rules_for<'a>(&'a self, module: &'a str, input_tuple_type: &'a str) -> impl Iterator<Item = &'a SelectivityRule> + 'a {
        self.selectivity_rules.iter().filter(move |rule| rule.module == module && rule.input_tuple_type == input_tuple_type)
    }

    /// Modules in data-flow order (Kahn's algorithm over module → module edges,
    /// ties broken by declaration order).
    pub fn module_order(&self) -> Result<Vec<String>> {
        let mut in_degree: HashMap<&str, usize> = self.modules.iter().map(|module| (module.name.as_str(), 0)).collect();

        for edge in self.edges.iter().filter(|edge| edge.role == EdgeRole::Module) {
            if let Some(degree) = in_degree.get_mut(edge.destination.as_str()) {
                *degree += 1;
            }
        }

        let mut queue: VecDeque<&str> =
            self.modules.iter().map(|module| module.name.as_str()).filter(|name| in_degree.get(name) == Some(&0)).collect();
        let mut order = Vec::with_capacity(self.modules.len());

        while let Some(name) = queue.pop_front() {
            order.push(name.to_string());

            for edge in self.outgoing_edges(name).filter(|edge| edge.role == EdgeRole::Module) {
                if let Some(degree) = in_degree.get_mut(edge.destination.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(edge.destination.as_str());
                    }
                }
            }
        }

        if order.len() != self.modules.len() {
            return Err(Error::GraphError(format!("module graph of '{}' contains a cycle", self.app_id)));
        }
        Ok(order)
    }

    /// Checks the whole graph before it may be submitted.
    ///
    /// * every edge endpoint is a declared node of the kind its role demands,
    /// * every selectivity rule names a declared module, a tuple type that
    ///   arrives at it and a tuple type that leaves it,
    /// * every loop hop is a declared edge.
    pub fn validate(&self) -> Result<()> {
        for edge in &self.edges {
            self.validate_edge(edge)?;
        }

        for rule in &self.selectivity_rules {
            self.validate_rule(rule)?;
        }

        for app_loop in &self.loops {
            self.validate_loop(app_loop)?;
        }

        self.module_order()?;

        log::debug!(
            "Application '{}' validated: {} modules, {} edges, {} loops.",
            self.app_id,
            self.modules.len(),
            self.edges.len(),
            self.loops.len()
        );
        Ok(())
    }

    fn validate_edge(&self, edge: &AppEdge) -> Result<()> {
        let (source_ok, destination_ok) = match edge.role {
            EdgeRole::Sensor => (self.sensor_tags.contains(&edge.source), self.is_module(&edge.destination)),
            EdgeRole::Module => (self.is_module(&edge.source), self.is_module(&edge.destination)),
            EdgeRole::Actuator => (self.is_module(&edge.source), self.actuator_tags.contains(&edge.destination)),
        };

        if !source_ok {
            return Err(Error::GraphError(format!(
                "{:?} edge '{}' -> '{}' starts at undeclared node '{}'",
                edge.role, edge.source, edge.destination, edge.source
            )));
        }
        if !destination_ok {
            return Err(Error::GraphError(format!(
                "{:?} edge '{}' -> '{}' ends at undeclared node '{}'",
                edge.role, edge.source, edge.destination, edge.destination
            )));
        }
        Ok(())
    }

    fn validate_rule(&self, rule: &SelectivityRule) -> Result<()> {
        if !self.is_module(&rule.module) {
            return Err(Error::GraphError(format!("selectivity rule references undeclared module '{}'", rule.module)));
        }

        let consumes = self.edges.iter().any(|edge| edge.destination == rule.module && edge.tuple_type == rule.input_tuple_type);
        if !consumes {
            return Err(Error::GraphError(format!("module '{}' never receives tuple type '{}'", rule.module, rule.input_tuple_type)));
        }

        let produces = self.edges.iter().any(|edge| edge.source == rule.module && edge.tuple_type == rule.output_tuple_type);
        if !produces {
            return Err(Error::GraphError(format!("module '{}' never emits tuple type '{}'", rule.module, rule.output_tuple_type)));
        }
        Ok(())
    }

    fn validate_loop(&self, app_loop: &AppLoop) -> Result<()> {
        if app_loop.nodes.len() < 2 {
            return Err(Error::GraphError(format!("loop '{}' needs at least two nodes", app_loop.label())));
        }

        for hop in app_loop.nodes.windows(2) {
            if self.get_edge(&hop[0], &hop[1]).is_none() {
                return Err(Error::GraphError(format!("loop '{}' has no edge for hop '{}' -> '{}'", app_loop.label(), hop[0], hop[1])));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::application::app_edge::TupleDirection;

    fn two_stage() -> Application {
        let mut app = Application::new(AppId::new("test"), EntityId(1));
        app.add_app_module("a", 10).unwrap();
        app.add_app_module("b", 10).unwrap();
        app.add_sensor_tag("s");
        app.add_actuator_tag("act");
        app.add_app_edge(AppEdge::new("s", "a", 1000.0, 500.0, "s", TupleDirection::Up, EdgeRole::Sensor));
        app.add_app_edge(AppEdge::new("a", "b", 1000.0, 500.0, "ab", TupleDirection::Up, EdgeRole::Module));
        app.add_app_edge(AppEdge::new("b", "act", 100.0, 28.0, "cmd", TupleDirection::Up, EdgeRole::Actuator));
        app.add_tuple_mapping("a", "s", "ab", FractionalSelectivity::new(1.0).unwrap());
        app.add_tuple_mapping("b", "ab", "cmd", FractionalSelectivity::new(1.0).unwrap());
        app.set_loops(vec![AppLoop::new(["s", "a", "b", "act"])]);
        app
    }

    #[test]
    fn test_valid_graph() {
        let app = two_stage();
        assert!(app.validate().is_ok());
        assert_eq!(app.module_order().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_module_is_rejected() {
        let mut app = two_stage();
        assert!(matches!(app.add_app_module("a", 5), Err(Error::GraphError(_))));
    }

    #[test]
    fn test_dangling_edge_endpoint() {
        let mut app = two_stage();
        app.add_app_edge(AppEdge::new("b", "ghost", 1.0, 1.0, "x", TupleDirection::Up, EdgeRole::Module));

        assert!(matches!(app.validate(), Err(Error::GraphError(_))));
    }

    #[test]
    fn test_sensor_edge_from_module_is_rejected() {
        let mut app = two_stage();
        app.add_app_edge(AppEdge::new("a", "b", 1.0, 1.0, "x", TupleDirection::Up, EdgeRole::Sensor));

        assert!(app.validate().is_err());
    }

    #[test]
    fn test_loop_without_edge_is_rejected() {
        let mut app = two_stage();
        app.set_loops(vec![AppLoop::new(["s", "b", "act"])]);

        assert!(matches!(app.validate(), Err(Error::GraphError(_))));
    }

    #[test]
    fn test_rule_for_unknown_tuple_type_is_rejected() {
        let mut app = two_stage();
        app.add_tuple_mapping("b", "nope", "cmd", FractionalSelectivity::new(1.0).unwrap());

        assert!(app.validate().is_err());
    }

    #[test]
    fn test_module_cycle_is_rejected() {
        let mut app = two_stage();
        app.add_app_edge(AppEdge::new("b", "a", 1.0, 1.0, "back", TupleDirection::Down, EdgeRole::Module));

        assert!(app.module_order().is_err());
    }
}
