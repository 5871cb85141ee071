use std::fmt::Debug;

use itertools::Itertools;
use log::debug;

use crate::geo::Coordinates;
use crate::indexer::Indexer;

pub mod bus;
pub mod stop;

pub use bus::Bus;
pub use stop::Stop;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIdx(pub u32);
impl Debug for StopIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("s#{}", self.0))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusIdx(pub u32);
impl Debug for BusIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("b#{}", self.0))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ValidateError {
    /// Stops that were referenced by a bus or a road distance but never defined.
    UndefinedStops { stops: Vec<String> },
}

/// Owns every stop and bus of one session. Stops and buses refer to each other by index.
pub struct TransitNetwork {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    stop_index: Indexer<String, StopIdx>,
    bus_index: Indexer<String, BusIdx>,
}

impl TransitNetwork {
    pub fn new() -> Self {
        Self {
            stops: vec![],
            buses: vec![],
            stop_index: Indexer::new(|it| StopIdx(it as u32)),
            bus_index: Indexer::new(|it| BusIdx(it as u32)),
        }
    }

    /// Returns the stop with the given name, creating an undefined stub if necessary.
    fn stop_or_stub(&mut self, name: &str) -> StopIdx {
        if let Some(idx) = self.stop_index.get(name) {
            return idx;
        }
        let (idx, _) = self.stop_index.index(name.to_string());
        self.stops.push(Stop::stub(name.to_string()));
        debug_assert_eq!(self.stops.len(), self.stop_index.len());
        idx
    }

    /// Defines (or redefines) a stop.
    ///
    /// Each declared distance is also mirrored to the other stop unless that stop
    /// already declares a distance back.
    pub fn define_stop<S: AsRef<str>>(
        &mut self,
        name: &str,
        coordinates: Coordinates,
        road_distances: impl IntoIterator<Item = (S, u32)>,
    ) -> StopIdx {
        let idx = self.stop_or_stub(name);
        self.stops[idx.0 as usize].define(coordinates);

        for (other_name, meters) in road_distances {
            let other = self.stop_or_stub(other_name.as_ref());
            self.stops[idx.0 as usize].set_road_distance(other, meters);
            let other_stop = &mut self.stops[other.0 as usize];
            if other_stop.road_distance_to(idx).is_none() {
                other_stop.set_road_distance(idx, meters);
            }
        }
        idx
    }

    /// Defines a bus, or appends further stops to an already defined one.
    pub fn define_bus<S: AsRef<str>>(
        &mut self,
        name: &str,
        stop_names: impl IntoIterator<Item = S>,
        is_circular: bool,
    ) -> BusIdx {
        let (idx, is_new) = match self.bus_index.get(name) {
            Some(idx) => (idx, false),
            None => self.bus_index.index(name.to_string()),
        };
        if is_new {
            self.buses.push(Bus::new(name.to_string()));
        } else {
            debug!("Extending already defined bus {}", name);
        }

        for stop_name in stop_names {
            let stop = self.stop_or_stub(stop_name.as_ref());
            self.buses[idx.0 as usize].push_stop(stop);
            self.stops[stop.0 as usize].add_bus(idx);
        }
        if is_circular {
            self.buses[idx.0 as usize].make_circular();
        }
        idx
    }

    pub fn lookup_stop(&self, name: &str) -> Option<StopIdx> {
        self.stop_index.get(name)
    }

    pub fn lookup_bus(&self, name: &str) -> Option<BusIdx> {
        self.bus_index.get(name)
    }

    pub fn stop(&self, idx: StopIdx) -> &Stop {
        &self.stops[idx.0 as usize]
    }

    pub fn bus(&self, idx: BusIdx) -> &Bus {
        &self.buses[idx.0 as usize]
    }

    pub fn stops(&self) -> impl Iterator<Item = (StopIdx, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(idx, stop)| (StopIdx(idx as u32), stop))
    }

    pub fn buses(&self) -> impl Iterator<Item = (BusIdx, &Bus)> {
        self.buses
            .iter()
            .enumerate()
            .map(|(idx, bus)| (BusIdx(idx as u32), bus))
    }

    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn num_buses(&self) -> usize {
        self.buses.len()
    }

    /// Distance in whole meters a bus drives from `from` to `to`.
    /// Falls back to the (truncated) great-circle distance if none was declared.
    pub fn road_distance(&self, from: StopIdx, to: StopIdx) -> u32 {
        self.stop(from)
            .road_distance_to(to)
            .unwrap_or_else(|| self.geo_distance(from, to) as u32)
    }

    pub fn geo_distance(&self, from: StopIdx, to: StopIdx) -> f64 {
        self.stop(from)
            .coordinates()
            .distance(&self.stop(to).coordinates())
    }

    pub fn validate(&self) -> Result<(), ValidateError> {
        let undefined = self
            .stops
            .iter()
            .filter(|stop| !stop.is_defined())
            .map(|stop| stop.name().to_string())
            .sorted()
            .collect_vec();
        if undefined.is_empty() {
            Ok(())
        } else {
            Err(ValidateError::UndefinedStops { stops: undefined })
        }
    }
}
