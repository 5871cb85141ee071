use std::collections::BTreeSet;

use crate::col::{HashMap, map_new};
use crate::geo::Coordinates;

use super::{BusIdx, StopIdx};

#[derive(Debug)]
pub struct Stop {
    name: String,
    coordinates: Coordinates,
    /// False while the stop only exists because a bus or a road distance referenced it.
    defined: bool,
    road_distances: HashMap<StopIdx, u32>,
    buses: BTreeSet<BusIdx>,
}

impl Stop {
    pub(super) fn stub(name: String) -> Self {
        Self {
            name,
            coordinates: Coordinates::default(),
            defined: false,
            road_distances: map_new(),
            buses: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn is_defined(&self) -> bool {
        self.defined
    }

    /// The explicitly declared (or mirrored) road distance in meters.
    pub fn road_distance_to(&self, other: StopIdx) -> Option<u32> {
        self.road_distances.get(&other).copied()
    }

    pub fn buses(&self) -> impl Iterator<Item = BusIdx> + '_ {
        self.buses.iter().copied()
    }

    pub fn is_served_by(&self, bus: BusIdx) -> bool {
        self.buses.contains(&bus)
    }

    pub(super) fn define(&mut self, coordinates: Coordinates) {
        self.coordinates = coordinates;
        self.defined = true;
    }

    pub(super) fn set_road_distance(&mut self, other: StopIdx, meters: u32) {
        self.road_distances.insert(other, meters);
    }

    pub(super) fn add_bus(&mut self, bus: BusIdx) {
        self.buses.insert(bus);
    }
}
