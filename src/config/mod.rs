pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gift-draw")]
#[command(about = "Draw gift-exchange pairings with exclusions")]
pub struct CliConfig {
    /// Path to the TOML draw file
    #[arg(short, long, default_value = "draw.toml")]
    pub config: String,

    /// Override max_attempts from the draw file
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Override the seed from the draw file for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數優先於檔案設定
    pub fn apply_overrides(&self, config: &mut toml_config::DrawConfig) {
        if let Some(max_attempts) = self.max_attempts {
            config.draw.max_attempts = Some(max_attempts);
        }
        if let Some(seed) = self.seed {
            config.draw.seed = Some(seed);
        }
    }
}
