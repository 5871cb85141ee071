use std::borrow::Cow;

use super::StopIdx;

#[derive(Debug)]
pub struct Bus {
    name: String,
    stops: Vec<StopIdx>,
    is_circular: bool,
}

impl Bus {
    pub(super) fn new(name: String) -> Self {
        Self {
            name,
            stops: vec![],
            is_circular: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stops as published.
    pub fn stops(&self) -> &[StopIdx] {
        &self.stops
    }

    pub fn is_circular(&self) -> bool {
        self.is_circular
    }

    /// The stops in driving order for one direction.
    ///
    /// For a circular bus this is the closed loop: if the published sequence does
    /// not return to its first stop, the first stop is appended.
    pub fn route(&self) -> Cow<'_, [StopIdx]> {
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) if self.is_circular && first != last => {
                let mut closed = self.stops.clone();
                closed.push(*first);
                Cow::Owned(closed)
            }
            _ => Cow::Borrowed(&self.stops),
        }
    }

    pub(super) fn push_stop(&mut self, stop: StopIdx) {
        self.stops.push(stop);
    }

    pub(super) fn make_circular(&mut self) {
        self.is_circular = true;
    }
}

#[cfg(test)]
mod tests {
    use super::{Bus, StopIdx};

    fn bus(stops: &[u32], is_circular: bool) -> Bus {
        let mut bus = Bus::new("b".to_string());
        for &stop in stops {
            bus.push_stop(StopIdx(stop));
        }
        if is_circular {
            bus.make_circular();
        }
        bus
    }

    #[test]
    fn circular_route_is_closed_once() {
        let open = bus(&[0, 1, 2], true);
        assert_eq!(&*open.route(), &[StopIdx(0), StopIdx(1), StopIdx(2), StopIdx(0)]);

        let closed = bus(&[0, 1, 2, 0], true);
        assert_eq!(&*closed.route(), closed.stops());
    }

    #[test]
    fn linear_route_is_the_published_sequence() {
        let linear = bus(&[0, 1, 2], false);
        assert_eq!(&*linear.route(), linear.stops());
        assert!(bus(&[], true).route().is_empty());
    }
}
