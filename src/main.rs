// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use switchyard::config::{load_and_validate_config, Config, EngineId, RuntimeBuilder};
use switchyard::http::{Connection, Request, Response};
use switchyard::traits::ApplicationHost;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Args {
    list: bool,
    engine: Option<EngineId>,
    config_file: Option<String>,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} [--list] [--engine <id>] [config-file]\n\
         Example: {} configs/custom-backends.yaml\n\
         Example: {} --list --engine tokio-current-thread",
        program, program, program
    )
}

fn parse_args(args: &[String]) -> Result<Args> {
    let program = args.first().map(String::as_str).unwrap_or("switchyard");
    let mut parsed = Args {
        list: false,
        engine: None,
        config_file: None,
    };

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--list" => parsed.list = true,
            "--engine" => {
                let Some(value) = rest.next() else {
                    bail!("--engine needs a value\n{}", usage(program));
                };
                parsed.engine = Some(value.parse()?);
            }
            "-h" | "--help" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("Unknown flag '{}'\n{}", flag, usage(program)),
            path => {
                if parsed.config_file.replace(path.to_string()).is_some() {
                    bail!("Only one config file may be given\n{}", usage(program));
                }
            }
        }
    }

    Ok(parsed)
}

/// Application used for the sample request: echoes what it was handed and
/// where it ran.
fn demo_host() -> Arc<dyn ApplicationHost> {
    Arc::new(|conn: &Connection, req: Request| {
        let thread = std::thread::current().name().unwrap_or("unnamed").to_string();
        Response::ok(format!(
            "{} {} handled for connection {} on thread '{}'",
            req.method, req.path, conn.id, thread
        ))
    })
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args)?;

    let mut config = match &args.config_file {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("Failed to load config '{}'", path))?,
        None => Config::default(),
    };
    if args.engine.is_some() {
        config.engine = args.engine;
    }

    let dispatcher = RuntimeBuilder::from_config(&config).context("Failed to build backend registry")?;

    if args.list {
        let description = dispatcher.registry().describe();
        println!("{}", serde_json::to_string_pretty(&description)?);
        return Ok(());
    }

    // Resolve once so the backend printed is the one the request runs on.
    let engine = dispatcher.preferred_engine();
    let backend = dispatcher.resolve(engine);
    println!("Backend: {}", backend.name());

    let start_time = Instant::now();
    let outcome = dispatcher.run_on(
        &backend,
        engine,
        demo_host(),
        Connection::new(1),
        Request::new("GET", "/"),
    );

    // Spawned work lives on another runtime; the waiter only drives the join handle.
    let waiter = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let response = waiter.block_on(outcome.into_response())?;

    println!("Status: {}", response.status);
    println!("Body: {}", String::from_utf8_lossy(&response.body));
    println!("Elapsed: {:?}", start_time.elapsed());

    Ok(())
}
