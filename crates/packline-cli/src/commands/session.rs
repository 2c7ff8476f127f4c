use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use packline_config::Config;
use packline_core::LineStats;
use packline_engine::{DragController, Notification, TransferEngine};
use packline_sim::{SimConfig, SimHandle, SimulationDriver};
use packline_store::{lock_log, lock_store, ActionLog};

use crate::cli::SessionArgs;
use crate::display;
use crate::seed::seed_store;

/// Interactive shell over one in-memory traceability session. State lives
/// for the lifetime of the process; quitting discards it.
pub async fn handle(args: SessionArgs, config: &Config) -> Result<()> {
    let store = seed_store(args.lines, args.cases_per_line, args.capacity).into_shared();
    let log = ActionLog::new().into_shared();
    let engine = TransferEngine::new(store.clone(), log.clone()).with_operator(&config.operator);
    let mut drag = DragController::new(engine.clone());

    let sim_config = SimConfig {
        tick_interval_ms: config.simulation.tick_interval_ms,
        fill_probability: config.simulation.fill_probability,
        seed: args.seed.or(config.simulation.seed),
        ..SimConfig::default()
    };
    let mut idle_driver = Some(SimulationDriver::new(store.clone(), sim_config));
    let mut running: Option<SimHandle> = None;

    println!("packline session - type 'help' for commands, 'quit' to leave.");
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = input.next_line().await? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),

            ["state"] | ["list"] => display::print_state(&lock_store(&store)),
            ["stats"] => {
                let store = lock_store(&store);
                display::print_stats(&LineStats::compute(
                    store.lines(),
                    store.scrap(),
                    config.units_per_pallet,
                ));
            }
            ["history"] => display::print_history(&lock_log(&log), 20),
            ["history", n] => {
                let limit = n.parse().unwrap_or(20);
                display::print_history(&lock_log(&log), limit);
            }
            ["search", query] => {
                let store = lock_store(&store);
                let hits = store.search(query);
                if hits.is_empty() {
                    println!("No containers match '{query}'.");
                } else {
                    for case in hits {
                        println!(
                            "  {} {}/{} {:?}",
                            case.id,
                            case.filled_count(),
                            case.capacity,
                            case.status()
                        );
                    }
                }
            }
            ["dump"] => println!("{}", serde_json::to_string_pretty(&*lock_store(&store))?),

            ["move", unit, from, to] => report(engine.move_unit(unit, from, to)),
            ["scrap", unit, from, rest @ ..] => {
                report(engine.scrap_unit(unit, from, join_reason(rest)))
            }
            ["reassign", unit, from, to, rest @ ..] => {
                report(engine.manual_transfer(unit, from, Some(*to), join_reason(rest)))
            }
            ["undo"] => report(engine.undo_last()),

            ["drag", unit, from] => {
                drag.start_drag(*unit, *from);
                println!("Dragging {unit} out of {from}; 'drop <case>' or 'dropscrap'.");
            }
            ["drop", to] => report(drag.drop_on_container(to)),
            ["dropscrap", rest @ ..] => report(drag.drop_on_scrap(join_reason(rest))),
            ["cancel"] => {
                drag.cancel();
                println!("Drag cancelled.");
            }

            ["tick"] | ["tick", _] => {
                let count: u32 = parts.get(1).and_then(|n| n.parse().ok()).unwrap_or(1);
                match idle_driver.as_mut() {
                    Some(driver) => {
                        for _ in 0..count {
                            for event in driver.step() {
                                println!("  packed {} into {}", event.unit_id, event.container_id);
                            }
                        }
                    }
                    None => println!("Simulation is running in the background; 'stop' it first."),
                }
            }
            ["start"] => match idle_driver.take() {
                Some(driver) => {
                    running = Some(driver.spawn());
                    println!("Simulation started.");
                }
                None => println!("Simulation already running."),
            },
            ["stop"] => match running.take() {
                Some(handle) => {
                    idle_driver = Some(handle.stop().await);
                    println!("Simulation stopped.");
                }
                None => println!("Simulation is not running."),
            },

            _ => println!("Unknown command; try 'help'."),
        }
    }

    if let Some(handle) = running.take() {
        handle.stop().await;
    }
    Ok(())
}

fn join_reason(parts: &[&str]) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn report(result: packline_core::Result<Notification>) {
    match result {
        Ok(notification) => display::print_notification(&notification),
        Err(err) => display::print_notification(&Notification::from_error(&err)),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  state                    show lines, cases and scrap");
    println!("  stats                    rollup statistics");
    println!("  search <query>           find cases by case or unit id");
    println!("  history [n]              recent actions, newest first");
    println!("  move <unit> <from> <to>  move a unit between cases");
    println!("  reassign <unit> <from> <to> [reason...]");
    println!("  scrap <unit> <from> [reason...]");
    println!("  undo                     revert the most recent action");
    println!("  drag <unit> <from>       begin a drag gesture");
    println!("  drop <case> | dropscrap [reason...] | cancel");
    println!("  tick [n]                 run simulation ticks by hand");
    println!("  start | stop             background simulation");
    println!("  dump                     repository state as JSON");
    println!("  quit");
}
