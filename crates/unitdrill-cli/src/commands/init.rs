//! The `unitdrill init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    if Path::new("unitdrill.toml").exists() {
        println!("unitdrill.toml already exists, skipping.");
    } else {
        std::fs::write("unitdrill.toml", SAMPLE_CONFIG).context("failed to write unitdrill.toml")?;
        println!("Created unitdrill.toml");
    }

    std::fs::create_dir_all("catalogs")?;
    let example_path = Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)
            .context("failed to write catalogs/example.toml")?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit unitdrill.toml with your name and score webhook");
    println!("  2. Run: unitdrill validate --catalog catalogs/example.toml");
    println!("  3. Run: unitdrill practice --catalog catalogs/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# unitdrill configuration

player = "Anonymous"
default_duration_secs = 60
feedback_delay_ms = 150
output_dir = "./unitdrill-results"
# catalog = "catalogs"

[reporter]
type = "none"

# To submit final scores, use a webhook instead:
# [reporter]
# type = "webhook"
# url = "${UNITDRILL_SCORE_URL}"
# token = "${UNITDRILL_SCORE_TOKEN}"
"#;

const EXAMPLE_CATALOG: &str = r#"# Each group needs exactly one base unit (to_base = 1).

[[groups]]
name = "Time"

[[groups.units]]
name = "s"
to_base = 1

[[groups.units]]
name = "min"
to_base = 60

[[groups.units]]
name = "h"
to_base = 3600

[[groups.units]]
name = "day"
to_base = 86400

[[groups]]
name = "Digital Storage"

[[groups.units]]
name = "B"
to_base = 1

[[groups.units]]
name = "KiB"
to_base = 1024

[[groups.units]]
name = "MiB"
to_base = 1048576
"#;
