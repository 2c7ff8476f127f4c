//! Console rendering of repository state, the audit trail, and
//! per-operation notifications.

use packline_core::{ContainerStatus, LineStats, TransferAction};
use packline_engine::{Notification, NotificationKind};
use packline_store::{ActionLog, Store};

pub fn print_state(store: &Store) {
    for line in store.lines() {
        println!("{}:", line.name);
        for case in &line.containers {
            let fill: String = std::iter::repeat('#')
                .take(case.filled_count())
                .chain(std::iter::repeat('.').take(case.capacity - case.filled_count()))
                .collect();
            let status = match case.status() {
                ContainerStatus::Open => "OPEN",
                ContainerStatus::Full => "FULL",
            };
            println!(
                "  {:<10} [{}] {}/{} {}",
                case.id,
                fill,
                case.filled_count(),
                case.capacity,
                status
            );
        }
    }
    if !store.scrap().is_empty() {
        println!("Scrap ({}):", store.scrap().len());
        for unit in store.scrap() {
            println!("  {} ({:?})", unit.id, unit.status);
        }
    }
}

pub fn print_stats(stats: &LineStats) {
    println!("Stats:");
    println!("  Units packed:    {}", stats.total_units);
    println!("  Open cases:      {}", stats.open_containers);
    println!("  Full cases:      {}", stats.full_containers);
    println!("  Pallets ready:   {}", stats.pallets_ready);
    println!("  Damaged units:   {}", stats.damaged_units);
}

pub fn print_history(log: &ActionLog, limit: usize) {
    if log.is_empty() {
        println!("No actions recorded.");
        return;
    }
    println!("History (most recent first):");
    for action in log.entries().take(limit) {
        print_action(action);
    }
    if log.len() > limit {
        println!("  ... {} older entries", log.len() - limit);
    }
}

fn print_action(action: &TransferAction) {
    let target = action
        .to_container_id
        .as_deref()
        .unwrap_or("scrap")
        .to_string();
    let reason = action
        .reason
        .as_deref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default();
    println!(
        "  [{:?}] {} {} -> {} by {}{}",
        action.action, action.unit_id, action.from_container_id, target, action.performed_by, reason
    );
}

pub fn print_notification(notification: &Notification) {
    let prefix = match notification.kind {
        NotificationKind::Info => "·",
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✗",
    };
    println!("{} {}", prefix, notification.message);
}
