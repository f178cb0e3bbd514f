//! End-to-end pipeline test: archive extraction, loading, cleaning and
//! route aggregation over a small synthetic dataset.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use routelens::analysis::{RouteAnalyzer, BREAK_EVEN_SENTINEL};
use routelens::data::{ensure_extracted, DataLoader};
use zip::write::FileOptions;
use zip::ZipWriter;

const FLIGHTS_CSV: &str = "\
ORIGIN,DESTINATION,DISTANCE,CANCELLED,DEP_DELAY,ARR_DELAY
ORD,LAX,1000,0,5,10
ORD,LAX,1000,0,,
ORD,LAX,1000,0,0,0
ORD,LAX,1000,0,0,0
ORD,LAX,1000,0,0,0
ORD,LAX,1000,1,0,0
JFK,SFO,2586,0,0,0
JFK,SFO,bad,0,0,0
";

const TICKETS_CSV: &str = "\
ORIGIN,DESTINATION,ITIN_FARE
ORD,LAX,100
ORD,LAX,200
JFK,SFO,not-a-number
JFK,SFO,310
";

const AIRPORTS_CSV: &str = "\
IATA_CODE,NAME
ORD,O'Hare International
LAX,Los Angeles International
,Unnamed Field
";

fn write_fixture_archive(path: &Path) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();
    for (name, body) in [
        ("Flights.csv", FLIGHTS_CSV),
        ("Tickets.csv", TICKETS_CSV),
        ("Airport_Codes.csv", AIRPORTS_CSV),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("data.zip");
    write_fixture_archive(&archive);

    let paths = ensure_extracted(&archive, dir.path()).unwrap();
    let tables = DataLoader::load_all(&paths).unwrap();

    // One cancelled ORD-LAX row and one bad-distance JFK-SFO row are gone.
    assert_eq!(tables.flights.height(), 6);
    // The blank-IATA airport row is gone.
    assert_eq!(tables.airports.height(), 2);

    let routes = RouteAnalyzer::top_routes(&tables.flights, &tables.tickets).unwrap();
    assert_eq!(routes.len(), 2);

    // Busiest first: five surviving ORD-LAX flights, then one JFK-SFO.
    let ord = &routes[0];
    assert_eq!((ord.origin.as_str(), ord.destination.as_str()), ("ORD", "LAX"));
    assert_eq!(ord.num_flights, 5);
    assert_eq!(ord.avg_ticket_price, 150.0);
    assert_eq!(ord.total_revenue, 150_000.0);
    assert_eq!(ord.total_cost, 45_900.0);
    assert_eq!(ord.profit, 104_100.0);
    assert_eq!(ord.break_even_flights, 864);

    // The unparseable fare row was dropped, leaving a single 310 fare.
    let jfk = &routes[1];
    assert_eq!(jfk.num_flights, 1);
    assert_eq!(jfk.avg_ticket_price, 310.0);
    assert_eq!(jfk.profit, jfk.total_revenue - jfk.total_cost);

    for r in &routes {
        assert!(r.profit.is_finite());
        if r.profit <= 0.0 {
            assert_eq!(r.break_even_flights, BREAK_EVEN_SENTINEL);
        }
    }
}

#[test]
fn pipeline_is_deterministic_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("data.zip");
    write_fixture_archive(&archive);

    let run = || {
        let paths = ensure_extracted(&archive, dir.path()).unwrap();
        let tables = DataLoader::load_all(&paths).unwrap();
        RouteAnalyzer::top_routes(&tables.flights, &tables.tickets).unwrap()
    };

    assert_eq!(run(), run());
}
