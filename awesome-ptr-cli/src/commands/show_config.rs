use crate::config::Config;
use crate::output::{self, OutputFormat};
use anyhow::Result;

pub fn handle_config_command(config: &Config, output_format: &str) -> Result<()> {
    let format = OutputFormat::from_str(output_format);
    match format {
        // TOML mirrors the file the CLI reads
        OutputFormat::Table => {
            print!("{}", toml::to_string_pretty(config)?);
            output::print_success(&format!(
                "{} drive, trigger at {}px",
                if config.pull.is_bounce_supported { "bounce" } else { "no-bounce" },
                config.pull.trigger_height
            ));
        }
        _ => output::print_single(config, format)?,
    }
    Ok(())
}
