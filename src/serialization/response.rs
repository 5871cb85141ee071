use std::io::Write;

use serde::Serialize;

use crate::catalogue::{RequestId, Response};
use crate::routing::itinerary::RouteItem;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ResponseRecord<'a> {
    Bus {
        request_id: RequestId,
        stop_count: usize,
        unique_stop_count: usize,
        route_length: u64,
        curvature: f64,
    },
    Stop {
        request_id: RequestId,
        buses: &'a [String],
    },
    Route {
        request_id: RequestId,
        total_time: f64,
        items: Vec<RouteItemRecord<'a>>,
    },
    NotFound {
        request_id: RequestId,
        error_message: &'static str,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum RouteItemRecord<'a> {
    Wait {
        stop_name: &'a str,
        time: f64,
    },
    Bus {
        bus: &'a str,
        span_count: u32,
        time: f64,
    },
}

impl<'a> From<&'a RouteItem> for RouteItemRecord<'a> {
    fn from(item: &'a RouteItem) -> Self {
        match item {
            RouteItem::Wait { stop_name, time } => RouteItemRecord::Wait {
                stop_name,
                time: *time,
            },
            RouteItem::Bus {
                bus_name,
                span_count,
                time,
            } => RouteItemRecord::Bus {
                bus: bus_name,
                span_count: *span_count,
                time: *time,
            },
        }
    }
}

impl<'a> From<&'a Response> for ResponseRecord<'a> {
    fn from(response: &'a Response) -> Self {
        match response {
            Response::Bus { request_id, stats } => ResponseRecord::Bus {
                request_id: *request_id,
                stop_count: stats.stop_count,
                unique_stop_count: stats.unique_stop_count,
                route_length: stats.route_length,
                curvature: stats.curvature,
            },
            Response::Stop { request_id, stats } => ResponseRecord::Stop {
                request_id: *request_id,
                buses: &stats.buses,
            },
            Response::Route {
                request_id,
                itinerary,
            } => ResponseRecord::Route {
                request_id: *request_id,
                total_time: itinerary.total_time,
                items: itinerary.items.iter().map(RouteItemRecord::from).collect(),
            },
            Response::NotFound { request_id } => ResponseRecord::NotFound {
                request_id: *request_id,
                error_message: "not found",
            },
        }
    }
}

#[derive(Debug)]
pub enum WriteResponsesError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

/// Writes the responses as a pretty-printed JSON array.
pub fn write_responses(
    mut writer: impl Write,
    responses: &[Response],
) -> Result<(), WriteResponsesError> {
    let records: Vec<ResponseRecord> = responses.iter().map(ResponseRecord::from).collect();
    serde_json::to_writer_pretty(&mut writer, &records).map_err(WriteResponsesError::Json)?;
    writeln!(writer).map_err(WriteResponsesError::Io)?;
    writer.flush().map_err(WriteResponsesError::Io)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::write_responses;
    use crate::catalogue::Response;
    use crate::routing::itinerary::{Itinerary, RouteItem};
    use crate::stats::StopStats;

    fn to_json(responses: &[Response]) -> Value {
        let mut buffer = vec![];
        write_responses(&mut buffer, responses).unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn writes_each_response_kind() {
        let responses = vec![
            Response::Stop {
                request_id: 1,
                stats: StopStats {
                    buses: vec!["256".to_string(), "828".to_string()],
                },
            },
            Response::Route {
                request_id: 2,
                itinerary: Itinerary {
                    total_time: 7.5,
                    items: vec![
                        RouteItem::Wait {
                            stop_name: "A".to_string(),
                            time: 6.0,
                        },
                        RouteItem::Bus {
                            bus_name: "256".to_string(),
                            span_count: 1,
                            time: 1.5,
                        },
                    ],
                },
            },
            Response::NotFound { request_id: 3 },
        ];
        assert_eq!(
            to_json(&responses),
            json!([
                {"request_id": 1, "buses": ["256", "828"]},
                {
                    "request_id": 2,
                    "total_time": 7.5,
                    "items": [
                        {"type": "Wait", "stop_name": "A", "time": 6.0},
                        {"type": "Bus", "bus": "256", "span_count": 1, "time": 1.5}
                    ]
                },
                {"request_id": 3, "error_message": "not found"}
            ])
        );
    }

    #[test]
    fn empty_route_has_no_items() {
        let responses = vec![Response::Route {
            request_id: 4,
            itinerary: Itinerary {
                total_time: 0.0,
                items: vec![],
            },
        }];
        assert_eq!(
            to_json(&responses),
            json!([{"request_id": 4, "total_time": 0.0, "items": []}])
        );
    }
}
