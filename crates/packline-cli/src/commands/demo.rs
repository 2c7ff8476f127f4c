use anyhow::Result;
use packline_config::Config;
use packline_core::LineStats;
use packline_engine::{Notification, TransferEngine};
use packline_sim::{SimConfig, SimulationDriver};
use packline_store::{lock_log, lock_store, ActionLog};

use crate::cli::DemoArgs;
use crate::display;
use crate::seed::seed_store;

pub fn handle(args: DemoArgs, config: &Config) -> Result<()> {
    let store = seed_store(args.lines, args.cases_per_line, args.capacity).into_shared();
    let log = ActionLog::new().into_shared();
    let engine = TransferEngine::new(store.clone(), log.clone()).with_operator(&config.operator);

    let sim_config = SimConfig {
        tick_interval_ms: config.simulation.tick_interval_ms,
        fill_probability: config.simulation.fill_probability,
        seed: args.seed.or(config.simulation.seed),
        ..SimConfig::default()
    };
    let mut driver = SimulationDriver::new(store.clone(), sim_config);

    println!("Running {} simulation ticks...", args.ticks);
    let mut packed = 0;
    for tick in 1..=args.ticks {
        let events = driver.step();
        packed += events.len();
        for event in &events {
            println!("  tick {:>3}: packed {} into {}", tick, event.unit_id, event.container_id);
        }
    }
    println!("Packed {} units.\n", packed);

    // Exercise the correction paths against whatever the line produced.
    demo_corrections(&engine);

    println!();
    {
        let store = lock_store(&store);
        display::print_state(&store);
        println!();
        display::print_stats(&LineStats::compute(
            store.lines(),
            store.scrap(),
            config.units_per_pallet,
        ));
    }
    println!();
    display::print_history(&lock_log(&log), 10);

    if args.json {
        println!();
        println!("{}", serde_json::to_string_pretty(&*lock_store(&store))?);
    }

    Ok(())
}

/// Move one packed unit to another open case, scrap another with a reason.
fn demo_corrections(engine: &TransferEngine) {
    let (move_candidate, scrap_candidate) = {
        let store = lock_store(engine.store());
        let mut donors = store
            .containers()
            .filter(|c| c.filled_count() > 0)
            .map(|c| c.id.clone());
        let donor = donors.next();
        let open = store
            .containers()
            .find(|c| !c.is_full() && Some(&c.id) != donor.as_ref())
            .map(|c| c.id.clone());

        let move_candidate = donor.clone().zip(open).and_then(|(from, to)| {
            store
                .find_container(&from)
                .ok()
                .and_then(|c| c.children().first().map(|u| (u.id.clone(), from.clone(), to)))
        });
        // The first child may be mid-move, so only scrap from cases
        // holding more than one unit.
        let scrap_candidate = donor.and_then(|from| {
            store
                .find_container(&from)
                .ok()
                .filter(|c| c.filled_count() > 1)
                .and_then(|c| c.children().last().map(|u| (u.id.clone(), from)))
        });
        (move_candidate, scrap_candidate)
    };

    if let Some((unit, from, to)) = move_candidate {
        report(engine.move_unit(&unit, &from, &to));
    }
    if let Some((unit, from)) = scrap_candidate {
        report(engine.scrap_unit(&unit, &from, Some("cracked neck".to_string())));
    }
}

fn report(result: packline_core::Result<Notification>) {
    match result {
        Ok(notification) => display::print_notification(&notification),
        Err(err) => display::print_notification(&Notification::from_error(&err)),
    }
}
