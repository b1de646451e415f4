use std::path::Path;

use homeroom_core::config::HomeroomConfig;
use homeroom_core::state;
use tracing::info;

/// Run the `status` command: show configuration and last-sync watermark.
pub async fn run(config_path: &str) -> anyhow::Result<()> {
    let config = HomeroomConfig::load(Path::new(config_path))?;
    config.validate()?;

    info!("Loaded configuration from {}", config_path);

    println!("Homeroom Status");
    println!("===============");
    println!("Instance: {}", config.homeroom.instance_name);
    println!("Roster:   {}", config.roster.base_url);
    println!("MDM:      {}", config.mdm.server_url);
    println!();

    println!("Scope");
    println!("-----");
    println!(
        "Skipped school levels: {}",
        format_list(&config.sync.skip_school_levels)
    );
    println!(
        "Skipped course types:  {}",
        format_list(&config.sync.skip_course_types)
    );
    println!();

    match state::load(&config.state_path())? {
        Some(watermark) => {
            println!(
                "Last sync: {}",
                watermark.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "Next incremental pull bound: {}",
                state::lookback(watermark, config.roster.overlap_days)
            );
        }
        None => {
            println!("Last sync: never");
            println!("The next run will pull the full roster.");
        }
    }

    Ok(())
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
