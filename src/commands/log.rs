//! Implementation of the `dsub-e2e log` command.

use super::resolve_layout;
use crate::cli::TestArgs;
use crate::environment::EnvSnapshot;
use crate::error::Result;
use crate::events::read_events;

/// Execute the `dsub-e2e log` command.
pub fn cmd_log(args: TestArgs) -> Result<()> {
    let snapshot = EnvSnapshot::from_process();
    let layout = resolve_layout(&args, &snapshot)?;
    let events = read_events(&layout.events_file())?;

    if events.is_empty() {
        println!("No setup events recorded for {}.", layout.name);
        return Ok(());
    }

    println!("Setup events for {} ({}):", layout.name, events.len());
    println!();

    for event in &events {
        println!(
            "  {}  {:<7} {}",
            event.ts.format("%Y-%m-%d %H:%M:%S UTC"),
            event.action,
            event.actor
        );
        if let Some(details) = event.details.as_object()
            && !details.is_empty()
        {
            for (key, value) in details {
                println!("      {}: {}", key, value);
            }
        }
    }

    Ok(())
}
