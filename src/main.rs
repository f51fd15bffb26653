use std::process::ExitCode;

use jwks_export::{export, logging, ExportConfig};
use tracing::error;

fn main() -> ExitCode {
    logging::init();

    let config = match ExportConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            println!("JWKS export failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match export(&config) {
        Ok(generated) => {
            println!("JWKS written to {}", config.output_path.display());
            println!("kid={}", generated.key_id);
            println!("keys={}", generated.jwks.keys.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("JWKS export failed: {e}");
            println!("{} left unchanged", config.output_path.display());
            ExitCode::FAILURE
        }
    }
}
