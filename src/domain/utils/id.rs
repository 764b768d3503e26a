use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// Name-based identifier, typed by what it names so a device name cannot be
/// handed to something expecting an application id.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize)]
pub struct Id<T> {
    pub id: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Id { id: id.into(), _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Name");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct DeviceTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct SensorTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct ActuatorTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct ApplicationTag;

pub type DeviceName = Id<DeviceTag>;
pub type SensorName = Id<SensorTag>;
pub type ActuatorName = Id<ActuatorTag>;
pub type AppId = Id<ApplicationTag>;

/// Numeric identity of a simulation entity (device, endpoint, broker).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh entity ids. Owned by whoever builds the scenario, so two
/// scenarios built in the same process never share a counter.
#[derive(Debug)]
pub struct EntityIdGenerator {
    next: u32,
}

impl EntityIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn generate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

impl Default for EntityIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_hands_out_increasing_ids() {
        let mut ids = EntityIdGenerator::new();
        let first = ids.generate();
        let second = ids.generate();

        assert!(first < second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_debug_uses_tag_name() {
        let name = DeviceName::new("router-0");
        assert_eq!(format!("{:?}", name), "DeviceName: \"router-0\"");
        assert_eq!(name.to_string(), "router-0");
    }
}
