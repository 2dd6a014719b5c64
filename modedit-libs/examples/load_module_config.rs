// Example: Load a module configuration and print what the editor would show
use modedit_libs::{load_config, Vocabulary};

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "module_config.yaml".to_string());

    match load_config(&config_path) {
        Ok(mut config) => {
            println!("✓ Successfully loaded config!");
            println!("  Description: {}", config.description);
            println!("  Header paths: {}", config.header_paths.len());
            println!("  C sources: {}", config.c_sources.len());
            println!("  C++ sources: {}", config.cxx_sources.len());
            println!("  Libraries: {}", config.libraries.len());

            for reset in Vocabulary::default().normalize(&mut config) {
                println!(
                    "  ! {} of '{}' reset from '{}' to '{}'",
                    reset.field, reset.owner, reset.from, reset.to
                );
            }

            println!("\n  Parameters:");
            for parameter in &config.parameters {
                println!(
                    "    - {} ({}, {}) = {}",
                    parameter.name, parameter.data_type, parameter.units, parameter.default_value
                );
            }

            println!("\n  Interfaces:");
            for interface in &config.interfaces {
                println!(
                    "    - {} [{} / {}]",
                    interface.name, interface.direction, interface.io_type
                );
            }
        }
        Err(e) => {
            eprintln!("✗ Failed to load config: {}", e);
            std::process::exit(1);
        }
    }
}
