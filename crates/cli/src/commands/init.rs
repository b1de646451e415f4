use std::path::Path;

use homeroom_core::config::HomeroomConfig;
use tracing::info;

/// Run the `init` command: create the data directory and write a default
/// configuration file.
pub async fn run(data_dir: &str) -> anyhow::Result<()> {
    let data_path = Path::new(data_dir);

    if !data_path.exists() {
        std::fs::create_dir_all(data_path)?;
        info!("Created data directory: {}", data_dir);
    }

    let mut config = HomeroomConfig::generate_default();
    config.homeroom.data_dir = data_dir.to_string();

    let config_path = data_path.join("homeroom.toml");
    let toml_str = toml::to_string_pretty(&config)?;
    std::fs::write(&config_path, &toml_str)?;
    info!("Wrote configuration to {}", config_path.display());

    println!("Homeroom initialized successfully!");
    println!("  Data directory: {}", data_dir);
    println!("  Configuration: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit {} with your roster and MDM credentials",
        config_path.display()
    );
    println!("  2. Run `homeroom sync --dry-run` to preview the first sync");
    println!("  3. Run `homeroom sync --full` to perform the first sync");

    Ok(())
}
