use crate::core::draw::{DrawOptions, DEFAULT_MAX_ATTEMPTS};
use crate::domain::model::{ExclusionPair, Participant};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// A draw file: event metadata, the participant list and the exclusions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    #[serde(default)]
    pub exclusions: Vec<ExclusionPair>,
    #[serde(default)]
    pub draw: DrawSection,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawSection {
    #[serde(default = "default_name")]
    pub name: String,
    pub max_attempts: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for DrawSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            max_attempts: None,
            seed: None,
        }
    }
}

fn default_name() -> String {
    "Gift exchange".to_string()
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl DrawConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ORGANIZER_EMAIL})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn max_attempts(&self) -> usize {
        self.draw.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    pub fn draw_options(&self) -> DrawOptions {
        DrawOptions {
            max_attempts: self.max_attempts(),
            seed: self.draw.seed,
        }
    }

    /// 驗證檔案層級的欄位；抽籤前置條件由 core::draw 檢查
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("draw.name", &self.draw.name)?;

        if let Some(max_attempts) = self.draw.max_attempts {
            validation::validate_positive_number("draw.max_attempts", max_attempts, 1)?;
        }

        for (index, participant) in self.participants.iter().enumerate() {
            validation::validate_non_empty_string(&format!("participants[{}].id", index), &participant.id)?;
            validation::validate_non_empty_string(
                &format!("participants[{}].name", index),
                &participant.name,
            )?;
            if let Some(email) = &participant.email {
                validation::validate_email(&format!("participants[{}].email", index), email)?;
            }
        }

        Ok(())
    }
}

impl Validate for DrawConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
