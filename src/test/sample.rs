use crate::catalogue::{Catalogue, Update};
use crate::geo::Coordinates;
use crate::routing::RoutingSettings;

pub fn sample_settings() -> RoutingSettings {
    RoutingSettings::new(6.0, 40.0)
}

fn stop(name: &str, latitude: f64, longitude: f64, road_distances: &[(&str, u32)]) -> Update {
    Update::Stop {
        name: name.to_string(),
        coordinates: Coordinates::new(latitude, longitude),
        road_distances: road_distances
            .iter()
            .map(|&(other, meters)| (other.to_string(), meters))
            .collect(),
    }
}

fn bus(name: &str, stops: &[&str], is_circular: bool) -> Update {
    Update::Bus {
        name: name.to_string(),
        stops: stops.iter().map(|it| it.to_string()).collect(),
        is_circular,
    }
}

/// Two disconnected parts: bus 750 in the west, the circular buses 256 and 828 in the east.
/// Stop "Prazhskaya" is served by no bus.
pub fn create_sample() -> Catalogue {
    let mut catalogue = Catalogue::new(sample_settings());
    for update in [
        stop(
            "Tolstopaltsevo",
            55.611087,
            37.20829,
            &[("Marushkino", 3900)],
        ),
        stop(
            "Marushkino",
            55.595884,
            37.209755,
            &[("Rasskazovka", 9900)],
        ),
        bus(
            "256",
            &[
                "Biryulyovo Zapadnoye",
                "Biryusinka",
                "Universam",
                "Biryulyovo Tovarnaya",
                "Biryulyovo Passazhirskaya",
                "Biryulyovo Zapadnoye",
            ],
            true,
        ),
        bus(
            "750",
            &["Tolstopaltsevo", "Marushkino", "Rasskazovka"],
            false,
        ),
        stop("Rasskazovka", 55.632761, 37.333324, &[]),
        stop(
            "Biryulyovo Zapadnoye",
            55.574371,
            37.6517,
            &[
                ("Biryusinka", 1800),
                ("Universam", 2400),
                ("Rossoshanskaya ulitsa", 7500),
            ],
        ),
        stop("Biryusinka", 55.581065, 37.64839, &[("Universam", 750)]),
        stop(
            "Universam",
            55.587655,
            37.645687,
            &[
                ("Biryulyovo Tovarnaya", 900),
                ("Rossoshanskaya ulitsa", 5600),
            ],
        ),
        stop(
            "Biryulyovo Tovarnaya",
            55.592028,
            37.653656,
            &[("Biryulyovo Passazhirskaya", 1300)],
        ),
        stop(
            "Biryulyovo Passazhirskaya",
            55.580999,
            37.659164,
            &[("Biryulyovo Zapadnoye", 1200)],
        ),
        bus(
            "828",
            &[
                "Biryulyovo Zapadnoye",
                "Universam",
                "Rossoshanskaya ulitsa",
                "Biryulyovo Zapadnoye",
            ],
            true,
        ),
        stop("Rossoshanskaya ulitsa", 55.595579, 37.605757, &[]),
        stop("Prazhskaya", 55.611678, 37.603831, &[]),
    ] {
        catalogue.apply(update);
    }
    catalogue
}

#[cfg(test)]
mod tests {
    use crate::catalogue::{Query, Response};

    #[test]
    pub fn test_sample_is_complete() {
        let catalogue = super::create_sample();
        assert_eq!(catalogue.network().validate(), Ok(()));
        assert_eq!(catalogue.network().num_stops(), 10);
        assert_eq!(catalogue.network().num_buses(), 3);
    }

    #[test]
    pub fn test_bus_stats() {
        let mut catalogue = super::create_sample();
        let query = Query::Bus {
            id: 1965312327,
            name: "256".to_string(),
        };
        let Response::Bus { request_id, stats } = catalogue.answer(&query).unwrap() else {
            panic!("Bus 256 not found");
        };
        assert_eq!(request_id, 1965312327);
        assert_eq!(stats.stop_count, 6);
        assert_eq!(stats.unique_stop_count, 5);
        assert_eq!(stats.route_length, 5950);
        assert!((stats.curvature - 1.361239).abs() < 1e-5, "{}", stats.curvature);

        let query = Query::Bus {
            id: 519139350,
            name: "750".to_string(),
        };
        let Response::Bus { stats, .. } = catalogue.answer(&query).unwrap() else {
            panic!("Bus 750 not found");
        };
        assert_eq!(stats.stop_count, 5);
        assert_eq!(stats.unique_stop_count, 3);
        assert_eq!(stats.route_length, 27600);
        assert!((stats.curvature - 1.318084).abs() < 1e-5, "{}", stats.curvature);
    }

    #[test]
    pub fn test_stop_stats() {
        let mut catalogue = super::create_sample();
        let query = Query::Stop {
            id: 1042838872,
            name: "Biryulyovo Zapadnoye".to_string(),
        };
        let Response::Stop { stats, .. } = catalogue.answer(&query).unwrap() else {
            panic!("Stop not found");
        };
        assert_eq!(stats.buses, vec!["256", "828"]);

        let query = Query::Stop {
            id: 1042838873,
            name: "Prazhskaya".to_string(),
        };
        let Response::Stop { stats, .. } = catalogue.answer(&query).unwrap() else {
            panic!("Stop not found");
        };
        assert!(stats.buses.is_empty());
    }
}
