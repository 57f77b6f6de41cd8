//! Recently used diagrams command.

use super::common::Context;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let recent = ctx.recent()?;

    println!("Recent Diagrams:");
    println!("================");
    if recent.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for entry in recent.entries() {
        let exists = if entry.path.exists() { "" } else { " (missing)" };
        println!("  {:20} {}{}", entry.name, entry.path.display(), exists);
    }
    Ok(())
}
