//! Flood Forecast Service - Main Daemon
//!
//! A server-side daemon that continuously:
//! 1. Reads the coastal water level gauge, NWS hourly weather, and
//!    CO-OPS tide predictions, in that order
//! 2. Substitutes deterministic synthetic series when a source is down
//! 3. Fuses the inputs into a 72-hour predicted-level and risk forecast
//! 4. Publishes each completed cycle to subscribed sinks
//! 5. Serves proxy and forecast routes over HTTP when requested
//!
//! Usage:
//!   cargo run --release                    # Start daemon without HTTP endpoint
//!   cargo run --release -- --endpoint 3001 # Start with HTTP endpoint on port 3001
//!   cargo run --release -- --once          # Run a single refresh cycle and exit
//!
//! Configuration:
//!   floodcast.toml - station selection and polling knobs (optional)

use floodcast_service::config;
use floodcast_service::daemon::{Scheduler, SharedLatest};
use floodcast_service::endpoint;
use std::env;

fn main() {
    println!("🌊 Flood Forecast Service");
    println!("==========================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut endpoint_port: Option<u16> = None;
    let mut station_override: Option<String> = None;
    let mut run_once = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                if i + 1 < args.len() {
                    endpoint_port = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            }
            "--station" => {
                if i + 1 < args.len() {
                    station_override = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --station requires a station id");
                    std::process::exit(1);
                }
            }
            "--once" => {
                run_once = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!(
                    "Usage: {} [--endpoint PORT] [--station ID] [--once]",
                    args[0]
                );
                std::process::exit(1);
            }
        }
    }

    // Load configuration, then apply command-line overrides
    println!("📊 Loading configuration...");
    let mut service_config = config::load_config();
    if let Some(station_id) = station_override {
        service_config.station_id = station_id;
    }
    println!("✓ Station: {}\n", service_config.station_id);

    let mut scheduler = match Scheduler::new(service_config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            eprintln!("\n❌ Startup failed: {}\n", e);
            std::process::exit(1);
        }
    };

    // The endpoint reads the latest cycle through a shared sink
    let latest = SharedLatest::new();
    scheduler.subscribe(Box::new(latest.clone()));

    // Start HTTP endpoint if requested (in background thread)
    if let Some(port) = endpoint_port {
        println!("🚀 Starting HTTP endpoint server...");
        let endpoint_latest = latest.clone();
        std::thread::spawn(move || {
            if let Err(e) = endpoint::start_endpoint_server(port, endpoint_latest) {
                eprintln!("❌ Endpoint server error: {}", e);
            }
        });
    }

    if run_once {
        let outcome = scheduler.refresh();
        println!(
            "✓ Single cycle complete: {} forecast hours for {}",
            outcome.forecast.len(),
            outcome.station_id
        );
        return;
    }

    println!("   Press Ctrl+C to stop\n");
    scheduler.run();
}
