// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::Context;
use the_linkwalker::backends::local::{register_builtins, DOUBLE, DOUBLE_NON_NEGATIVE};
use the_linkwalker::config::{load_config, EntryPointRegistry, ValueType};
use the_linkwalker::engine::{LinkedListProcessor, OnError, ProcessResult, StopRule};
use the_linkwalker::list::{build, ListKind, LinkedList};
use the_linkwalker::traits::StopCondition;

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "LINKWALKER_LOG";

/// Config named in the usage text, relative to the repository root.
const EXAMPLE_CONFIG: &str = "configs/registry-skip-negative.yaml";

/// One canned run for `--demo`.
struct DemoScenario {
    title: &'static str,
    entry_point: &'static str,
    values: &'static [f64],
    on_error: OnError,
    stop_when: Option<StopRule>,
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    // Registration happens once, here, before anything resolves a name.
    let registry = EntryPointRegistry::global();
    register_builtins(registry).context("registering built-in entry points")?;

    if args.len() >= 2 && args[1] == "--demo" {
        return run_demo(registry);
    }

    if args.len() < 3 {
        eprintln!("Usage: {} <config.yaml|config.toml> <value> [value ...]", args[0]);
        eprintln!("       {} --demo", args[0]);
        eprintln!("Example: {} {} 1 -2 3", args[0], EXAMPLE_CONFIG);
        std::process::exit(1);
    }

    let values = args[2..]
        .iter()
        .map(|raw| {
            raw.parse::<f64>()
                .with_context(|| format!("'{}' is not a number", raw))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;

    run_config(registry, &args[1], values)
}

fn run_config(registry: &EntryPointRegistry, config_file: &str, values: Vec<f64>) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let config = load_config(config_file)
        .with_context(|| format!("loading configuration '{}'", config_file))?;
    let mut processor = config.build_processor(registry)?;
    let on_error = config.on_error()?;

    println!("Configuration: {}", config_file);
    println!("Entry point:   {}", config.entry_point.function());
    println!("Value type:    {}", config.value_type);
    println!("On error:      {}", on_error);

    let mut list = build(values, config.list_kind.clone());
    let stop = config.stop_when.as_ref().map(|rule| rule as &dyn StopCondition);
    let result = processor.process(list.head_mut(), on_error, stop)?;

    report(&list, &result)?;
    processor.dispose();

    println!("Total time (including resolution): {:?}", start_time.elapsed());
    Ok(())
}

fn run_demo(registry: &EntryPointRegistry) -> anyhow::Result<()> {
    let scenarios = [
        DemoScenario {
            title: "A: single node",
            entry_point: DOUBLE,
            values: &[2.0],
            on_error: OnError::Stop,
            stop_when: None,
        },
        DemoScenario {
            title: "B: three nodes",
            entry_point: DOUBLE,
            values: &[1.0, 2.0, 3.0],
            on_error: OnError::Stop,
            stop_when: None,
        },
        DemoScenario {
            title: "C: failing node skipped",
            entry_point: DOUBLE_NON_NEGATIVE,
            values: &[1.0, -2.0, 3.0],
            on_error: OnError::Skip,
            stop_when: None,
        },
        DemoScenario {
            title: "D: stop when output exceeds 5",
            entry_point: DOUBLE,
            values: &[1.0, 2.0, 10.0],
            on_error: OnError::Stop,
            stop_when: Some(StopRule {
                output_above: Some(5.0),
                ..StopRule::default()
            }),
        },
    ];

    for scenario in &scenarios {
        println!("\n{}", "=".repeat(60));
        println!("Scenario {} ({}, on_error={})", scenario.title, scenario.entry_point, scenario.on_error);
        println!("Input:  {:?}", scenario.values);

        let processor = LinkedListProcessor::from_registry(
            registry,
            scenario.entry_point,
            ValueType::F64,
            ListKind::default(),
        )?;
        let mut list = build(scenario.values.iter().copied(), ListKind::default());
        let stop = scenario.stop_when.as_ref().map(|rule| rule as &dyn StopCondition);
        let result = processor.process(list.head_mut(), scenario.on_error, stop)?;

        report(&list, &result)?;
    }

    Ok(())
}

fn report(list: &LinkedList, result: &ProcessResult) -> anyhow::Result<()> {
    println!("Output: {:?}", list.values());
    if result.halted_early() {
        println!("Halted after {} of {} nodes", result.visited(), list.len());
    }
    println!("Result: {}", serde_json::to_string_pretty(result)?);
    Ok(())
}
