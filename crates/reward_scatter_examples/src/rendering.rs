//! Terminal rendering helpers shared by the example binaries.
use std::collections::HashMap;

use reward_scatter::prelude::*;
use tracing_subscriber::EnvFilter;

/// Initializes a compact tracing subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .try_init();
}

/// Assigns a display letter to each item, in the order given.
pub fn item_labels(items: &[ItemId]) -> HashMap<ItemId, char> {
    items
        .iter()
        .enumerate()
        .map(|(i, &item)| (item, (b'A' + (i % 26) as u8) as char))
        .collect()
}

/// Renders a schedule as two aligned rows: item letters and quantities.
///
/// Empty slots show as `.`; quantities above 9 show as `+`.
pub fn render_schedule(schedule: &Schedule, labels: &HashMap<ItemId, char>) -> String {
    let mut items_row = String::with_capacity(schedule.len());
    let mut qty_row = String::with_capacity(schedule.len());

    for entry in schedule.iter() {
        match entry.item {
            Some(item) => {
                items_row.push(*labels.get(&item).unwrap_or(&'?'));
                qty_row.push(match entry.quantity {
                    q @ 1..=9 => (b'0' + q as u8) as char,
                    _ => '+',
                });
            }
            None => {
                items_row.push('.');
                qty_row.push('.');
            }
        }
    }

    format!("items: {items_row}\n  qty: {qty_row}")
}
