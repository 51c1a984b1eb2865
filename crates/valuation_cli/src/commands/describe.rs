//! Describe command implementation

use tracing::info;
use valuation_engine::model_description;
use valuation_engine::pricing::EnginePreset;

use crate::config::CliConfig;
use crate::Result;

/// Run the describe command
pub fn run(config: &CliConfig, preset: Option<EnginePreset>) -> Result<()> {
    let preset = preset.unwrap_or(config.pricing.preset);
    info!("Describing the {} preset", preset);
    print!("{}", render(config, preset)?);
    Ok(())
}

/// Model description for `preset` with the configured overrides.
pub fn render(config: &CliConfig, preset: EnginePreset) -> Result<String> {
    Ok(model_description(&config.engine_config(preset)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_follows_overrides() {
        let mut config = CliConfig::default();
        config.pricing.ceiling = Some(1800.0);

        let text = render(&config, EnginePreset::Page).unwrap();
        assert!(text.contains("## Weighting"));
        assert!(text.contains("capped at 1800"));
    }
}
