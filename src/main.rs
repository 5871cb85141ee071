#![allow(dead_code)]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process::exit;

use catalogue::{Catalogue, Query, Response, Update};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use log::{error, info, warn};
use routing::RoutingSettings;
use serialization::document::{Document, import_document};
use serialization::response::write_responses;

mod catalogue;
mod col;
mod geo;
mod indexer;
mod network;
mod routing;
mod serialization;
mod stats;
#[cfg(test)]
mod test;

#[derive(Parser, Debug)]
#[command(
    version,
    author,
    about = "Answers bus, stop and route queries on a static bus network"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    #[command(about = "Apply the base requests of a document and answer its stat requests")]
    Process(ProcessArgs),

    #[command(about = "Build the routing graph of a document and report its size")]
    GraphInfo(GraphInfoArgs),
}

#[derive(Args, Clone, Debug)]
struct RoutingArgs {
    #[arg(
        long,
        help = "Wait time at every stop (in minutes). Overrides the document's bus_wait_time."
    )]
    wait_time: Option<f64>,

    #[arg(
        long,
        help = "Bus velocity (in km/h). Overrides the document's bus_velocity."
    )]
    velocity: Option<f64>,
}

impl RoutingArgs {
    fn settings(&self, document: &Document) -> RoutingSettings {
        RoutingSettings::new(
            self.wait_time
                .unwrap_or(document.routing_settings.bus_wait_time),
            self.velocity
                .unwrap_or(document.routing_settings.bus_velocity),
        )
    }
}

#[derive(Args, Clone, Debug)]
struct ProcessArgs {
    #[arg(short = 'i', long, default_value = "requests.json", help = "The input document.")]
    input_filename: String,

    #[arg(
        short = 'o',
        long,
        help = "The file to write the responses to. Responses are written to stdout if not given."
    )]
    out_filename: Option<String>,

    #[arg(
        long,
        help = "Abort if a stop is referenced but never defined, instead of only warning."
    )]
    strict: bool,

    #[clap(flatten)]
    routing_args: RoutingArgs,
}

fn load_catalogue(input_filename: &str, routing_args: &RoutingArgs) -> (Catalogue, Vec<Query>) {
    let document = import_document(input_filename).unwrap_or_else(|it| {
        error!("Could not import document {}:\n{:#?}", input_filename, it);
        exit(1);
    });

    let settings = routing_args.settings(&document);
    info!(
        "Routing settings: wait time {} min, velocity {} m/min",
        settings.wait_time, settings.velocity
    );
    let mut catalogue = Catalogue::new(settings);
    for request in document.base_requests {
        catalogue.apply(Update::from(request));
    }
    info!(
        "Loaded {} stops and {} buses",
        catalogue.network().num_stops(),
        catalogue.network().num_buses()
    );

    let queries = document
        .stat_requests
        .into_iter()
        .map(Query::from)
        .collect_vec();
    (catalogue, queries)
}

fn main_process(args: &ProcessArgs) {
    if let Some(out_filename) = &args.out_filename {
        if Path::new(out_filename).exists() {
            error!("Output file already exists: {}", out_filename);
            exit(1);
        }
    }

    let (mut catalogue, queries) = load_catalogue(&args.input_filename, &args.routing_args);
    if let Err(err) = catalogue.network().validate() {
        if args.strict {
            error!("Invalid network:\n{:#?}", err);
            exit(1);
        }
        warn!("Network is incomplete:\n{:#?}", err);
    }

    info!("Answering {} requests...", queries.len());
    let responses: Vec<Response> = queries
        .iter()
        .map(|query| catalogue.answer(query))
        .collect::<Result<_, _>>()
        .unwrap_or_else(|it| {
            error!("Could not reconstruct a route:\n{:#?}", it);
            exit(1);
        });

    let result = match &args.out_filename {
        Some(out_filename) => {
            let file = File::create(out_filename).unwrap_or_else(|it| {
                error!("Could not create {}: {}", out_filename, it);
                exit(1);
            });
            write_responses(BufWriter::new(file), &responses)
        }
        None => write_responses(io::stdout().lock(), &responses),
    };
    result.unwrap_or_else(|it| {
        error!("Could not write responses:\n{:#?}", it);
        exit(1);
    });
}

#[derive(Args, Clone, Debug)]
struct GraphInfoArgs {
    #[arg(short = 'i', long, default_value = "requests.json", help = "The input document.")]
    input_filename: String,

    #[clap(flatten)]
    routing_args: RoutingArgs,
}

fn main_graph_info(args: &GraphInfoArgs) {
    let (mut catalogue, _) = load_catalogue(&args.input_filename, &args.routing_args);
    let edges_by_bus = catalogue
        .router()
        .graph()
        .edges()
        .map(|(_, edge)| edge.bus)
        .counts();

    let network = catalogue.network();
    for (bus_idx, bus) in network.buses().sorted_by(|a, b| a.1.name().cmp(b.1.name())) {
        info!(
            "Bus {}: {} stops, circular: {}, {} edges",
            bus.name(),
            bus.stops().len(),
            bus.is_circular(),
            edges_by_bus.get(&bus_idx).copied().unwrap_or(0)
        );
    }
    info!(
        "Total: {} vertices, {} edges",
        network.num_stops(),
        edges_by_bus.values().sum::<usize>()
    );
}

fn main() {
    env_logger::builder().parse_env("LOG").init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => main_process(&args),
        Commands::GraphInfo(args) => main_graph_info(&args),
    }
}
