//! Types command implementation

use anyconf::Registry;
use anyhow::Result;

pub fn run() -> Result<()> {
    println!("Supported types:");
    for descriptor in Registry::builtin().descriptors() {
        let extensions: Vec<String> = descriptor.extensions().iter().map(|e| format!(".{e}")).collect();
        let mode = if descriptor.can_dump() { "load, dump" } else { "load" };
        println!("  {:<12} {:<28} ({})", descriptor.type_tag(), extensions.join(", "), mode);
    }
    Ok(())
}
