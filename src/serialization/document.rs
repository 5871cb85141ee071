use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};

use serde::Deserialize;

use crate::catalogue::{Query, RequestId, Update};
use crate::geo::Coordinates;
use crate::routing::RoutingSettings;

#[derive(Debug, Deserialize)]
pub struct Document {
    pub routing_settings: RoutingSettingsRecord,

    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoutingSettingsRecord {
    /// Minutes.
    pub bus_wait_time: f64,
    /// km/h.
    pub bus_velocity: f64,
}

impl From<RoutingSettingsRecord> for RoutingSettings {
    fn from(record: RoutingSettingsRecord) -> Self {
        RoutingSettings::new(record.bus_wait_time, record.bus_velocity)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

impl From<BaseRequest> for Update {
    fn from(request: BaseRequest) -> Self {
        match request {
            BaseRequest::Stop {
                name,
                latitude,
                longitude,
                road_distances,
            } => Update::Stop {
                name,
                coordinates: Coordinates::new(latitude, longitude),
                road_distances: road_distances.into_iter().collect(),
            },
            BaseRequest::Bus {
                name,
                stops,
                is_roundtrip,
            } => Update::Bus {
                name,
                stops,
                is_circular: is_roundtrip,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus {
        id: RequestId,
        name: String,
    },
    Stop {
        id: RequestId,
        name: String,
    },
    Route {
        id: RequestId,
        from: String,
        to: String,
    },
}

impl From<StatRequest> for Query {
    fn from(request: StatRequest) -> Self {
        match request {
            StatRequest::Bus { id, name } => Query::Bus { id, name },
            StatRequest::Stop { id, name } => Query::Stop { id, name },
            StatRequest::Route { id, from, to } => Query::Route { id, from, to },
        }
    }
}

#[derive(Debug)]
pub enum LoadDocumentError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

pub fn load_document(reader: impl Read) -> Result<Document, LoadDocumentError> {
    serde_json::from_reader(BufReader::new(reader)).map_err(|err| {
        if err.is_io() {
            LoadDocumentError::Io(err.into())
        } else {
            LoadDocumentError::Json(err)
        }
    })
}

pub fn import_document(filename: &str) -> Result<Document, LoadDocumentError> {
    let file = File::open(filename).map_err(LoadDocumentError::Io)?;
    load_document(file)
}
