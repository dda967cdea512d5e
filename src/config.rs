use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{
    tables::{DEFAULT_BLOCKED_KEYWORDS, DEFAULT_COST_TIERS, DEFAULT_SAFE_VENUES},
    CostTier, RankingTables, ReasonThresholds, SafetyBonuses, SafetyRules, ScoreBonuses,
    ScoringWeights,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub safety: SafetySettingsConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

fn default_catalog_path() -> String { "data/programs.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub bonuses: BonusesConfig,
    #[serde(default)]
    pub safety_bonuses: SafetyBonuses,
    #[serde(default)]
    pub reasons: ReasonThresholds,
    #[serde(default = "default_cost_tiers")]
    pub cost_tiers: Vec<CostTier>,
    #[serde(default = "default_cost_floor")]
    pub cost_floor: f64,
    #[serde(default = "default_neutral_score")]
    pub neutral_location_score: f64,
    #[serde(default = "default_out_of_range_score")]
    pub out_of_range_location_score: f64,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            bonuses: BonusesConfig::default(),
            safety_bonuses: SafetyBonuses::default(),
            reasons: ReasonThresholds::default(),
            cost_tiers: default_cost_tiers(),
            cost_floor: default_cost_floor(),
            neutral_location_score: default_neutral_score(),
            out_of_range_location_score: default_out_of_range_score(),
        }
    }
}

fn default_cost_tiers() -> Vec<CostTier> { DEFAULT_COST_TIERS.to_vec() }
fn default_cost_floor() -> f64 { 0.1 }
fn default_neutral_score() -> f64 { 0.5 }
fn default_out_of_range_score() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interest_weight")]
    pub interest: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_schedule_weight")]
    pub schedule: f64,
    #[serde(default = "default_cost_weight")]
    pub cost: f64,
    #[serde(default = "default_safety_weight")]
    pub safety: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interest: default_interest_weight(),
            location: default_location_weight(),
            schedule: default_schedule_weight(),
            cost: default_cost_weight(),
            safety: default_safety_weight(),
        }
    }
}

fn default_interest_weight() -> f64 { 0.40 }
fn default_location_weight() -> f64 { 0.20 }
fn default_schedule_weight() -> f64 { 0.20 }
fn default_cost_weight() -> f64 { 0.10 }
fn default_safety_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct BonusesConfig {
    #[serde(default = "default_verified_bonus")]
    pub verified: f64,
    #[serde(default = "default_scholarship_bonus")]
    pub scholarship: f64,
    #[serde(default = "default_scholarship_min_cost")]
    pub scholarship_min_cost: f64,
}

impl Default for BonusesConfig {
    fn default() -> Self {
        Self {
            verified: default_verified_bonus(),
            scholarship: default_scholarship_bonus(),
            scholarship_min_cost: default_scholarship_min_cost(),
        }
    }
}

fn default_verified_bonus() -> f64 { 0.10 }
fn default_scholarship_bonus() -> f64 { 0.05 }
fn default_scholarship_min_cost() -> f64 { 100.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct SafetySettingsConfig {
    #[serde(default = "default_flag_threshold")]
    pub flag_threshold: f64,
    #[serde(default = "default_verified_threshold")]
    pub verified_threshold: f64,
    #[serde(default = "default_max_age_span")]
    pub max_age_span: u8,
    #[serde(default = "default_safe_venues")]
    pub safe_venues: Vec<String>,
    #[serde(default = "default_blocked_keywords")]
    pub blocked_keywords: Vec<String>,
}

impl Default for SafetySettingsConfig {
    fn default() -> Self {
        Self {
            flag_threshold: default_flag_threshold(),
            verified_threshold: default_verified_threshold(),
            max_age_span: default_max_age_span(),
            safe_venues: default_safe_venues(),
            blocked_keywords: default_blocked_keywords(),
        }
    }
}

fn default_flag_threshold() -> f64 { 0.6 }
fn default_verified_threshold() -> f64 { 0.8 }
fn default_max_age_span() -> u8 { 10 }
fn default_safe_venues() -> Vec<String> {
    DEFAULT_SAFE_VENUES.iter().map(|s| s.to_string()).collect()
}
fn default_blocked_keywords() -> Vec<String> {
    DEFAULT_BLOCKED_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl RankingSettings {
    /// Build the ranking engine tables from configuration
    pub fn to_tables(&self) -> RankingTables {
        let mut cost_tiers = self.cost_tiers.clone();
        cost_tiers.sort_by(|a, b| a.max_amount.total_cmp(&b.max_amount));

        RankingTables {
            weights: ScoringWeights {
                interest: self.weights.interest,
                location: self.weights.location,
                schedule: self.weights.schedule,
                cost: self.weights.cost,
                safety: self.weights.safety,
            },
            bonuses: ScoreBonuses {
                verified: self.bonuses.verified,
                scholarship: self.bonuses.scholarship,
                scholarship_min_cost: self.bonuses.scholarship_min_cost,
            },
            safety_bonuses: self.safety_bonuses,
            reasons: self.reasons,
            cost_tiers,
            cost_floor: self.cost_floor,
            neutral_location_score: self.neutral_location_score,
            out_of_range_location_score: self.out_of_range_location_score,
            ..RankingTables::default()
        }
    }
}

impl SafetySettingsConfig {
    /// Build the safety validator rules from configuration
    pub fn to_rules(&self) -> SafetyRules {
        SafetyRules {
            max_age_span: self.max_age_span,
            safe_venues: normalize_terms(&self.safe_venues),
            blocked_keywords: normalize_terms(&self.blocked_keywords),
            flag_threshold: self.flag_threshold,
            verified_threshold: self.verified_threshold,
            ..SafetyRules::default()
        }
    }
}

/// Trim and lower-case match terms, dropping blanks
fn normalize_terms(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RUSE__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RUSE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("RUSE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("RUSE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
