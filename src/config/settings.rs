use crate::alerts::Thresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub thresholds: Thresholds,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub patterns_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: String, // "table" or "json"
    pub decimal_places: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            storage: StorageConfig {
                patterns_path: default_patterns_path(),
            },
            output: OutputConfig {
                format: "table".to_string(),
                decimal_places: 2,
            },
        }
    }
}

fn default_patterns_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("alertsys").join("data.txt"))
        .unwrap_or_else(|| PathBuf::from("data.txt"))
        .display()
        .to_string()
}

impl Config {
    /// Load from `config_path`, writing defaults on first run.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", config_path.display()))?;

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(config_path, self.to_commented_toml())
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(".config").join("alertsys").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if !["table", "json"].contains(&self.output.format.as_str()) {
            anyhow::bail!(
                "Invalid output format: {}. Must be 'table' or 'json'",
                self.output.format
            );
        }
        if self.output.decimal_places > 6 {
            anyhow::bail!("Decimal places must be between 0 and 6");
        }
        Ok(())
    }

    pub fn patterns_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.patterns_path)
    }

    /// Commented TOML document describing every option.
    pub fn to_commented_toml(&self) -> String {
        let t = &self.thresholds;
        let mut output = String::new();

        output.push_str("# alertsys configuration\n");
        output.push_str("# Adaptive temperature alerting with learned recurring patterns\n");
        output.push('\n');

        output.push_str("# ==========================================================================\n");
        output.push_str("# THRESHOLDS\n");
        output.push_str("# ==========================================================================\n");
        output.push('\n');
        output.push_str("[thresholds]\n");
        output.push_str("# Expected set point, shown for reference only\n");
        output.push_str(&format!("baseline = {:?}\n", t.baseline));
        output.push('\n');
        output.push_str("# Readings inside [min_normal, max_normal] are never flagged\n");
        output.push_str(&format!("min_normal = {:?}\n", t.min_normal));
        output.push_str(&format!("max_normal = {:?}\n", t.max_normal));
        output.push('\n');
        output.push_str("# Abnormal readings inside [min_learnable, max_learnable] can become\n");
        output.push_str("# learned patterns after 3 consecutive days at the same time\n");
        output.push_str(&format!("min_learnable = {:?}\n", t.min_learnable));
        output.push_str(&format!("max_learnable = {:?}\n", t.max_learnable));
        output.push('\n');
        output.push_str("# A status report is emitted when minute % report_interval_minutes == 0\n");
        output.push_str(&format!("report_interval_minutes = {}\n", t.report_interval_minutes));
        output.push('\n');

        output.push_str("# ==========================================================================\n");
        output.push_str("# STORAGE\n");
        output.push_str("# ==========================================================================\n");
        output.push('\n');
        output.push_str("[storage]\n");
        output.push_str("# Append-only record file, one learned pattern per line:\n");
        output.push_str("#   value,minute,hour,min_range,max_range\n");
        output.push_str(&format!("patterns_path = {:?}\n", self.storage.patterns_path));
        output.push('\n');

        output.push_str("# ==========================================================================\n");
        output.push_str("# OUTPUT\n");
        output.push_str("# ==========================================================================\n");
        output.push('\n');
        output.push_str("[output]\n");
        output.push_str("#   \"table\" - Human-readable tables\n");
        output.push_str("#   \"json\"  - Machine-readable JSON\n");
        output.push_str(&format!("format = \"{}\"\n", self.output.format));
        output.push('\n');
        output.push_str("# Decimal places for temperatures in tables (0-6)\n");
        output.push_str(&format!("decimal_places = {}\n", self.output.decimal_places));

        output
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_float = |value: &str| -> Result<f32> {
            value
                .parse::<f32>()
                .with_context(|| format!("Invalid number: {}", value))
        };

        let mut updated = self.clone();
        match key {
            "thresholds.baseline" => updated.thresholds.baseline = parse_float(value)?,
            "thresholds.min_normal" => updated.thresholds.min_normal = parse_float(value)?,
            "thresholds.max_normal" => updated.thresholds.max_normal = parse_float(value)?,
            "thresholds.min_learnable" => updated.thresholds.min_learnable = parse_float(value)?,
            "thresholds.max_learnable" => updated.thresholds.max_learnable = parse_float(value)?,
            "thresholds.report_interval_minutes" => {
                updated.thresholds.report_interval_minutes = value
                    .parse()
                    .with_context(|| format!("Invalid interval value: {}", value))?;
            }
            "storage.patterns_path" => updated.storage.patterns_path = value.to_string(),
            "output.format" => updated.output.format = value.to_string(),
            "output.decimal_places" => {
                updated.output.decimal_places = value
                    .parse()
                    .with_context(|| format!("Invalid decimal places value: {}", value))?;
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
