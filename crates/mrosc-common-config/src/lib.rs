//! Configuration types for the MROSC partnership console.
//!
//! This crate provides the configuration read from `.mrosc/config.yaml`,
//! environment handling, and the branding persistence port.

pub mod branding;
pub mod env;
pub mod loader;
pub mod types;


pub use branding::*;
pub use env::*;
pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_sensible_values() {
        let config = MroscConfig::default();

        assert_eq!(config.municipality.name, "Prefeitura Municipal");
        assert_eq!(config.municipality.state, "SP");
        assert_eq!(config.documents.expiry_rule, ExpiryRule::FlatThirtyDayMonths);
        assert!(config.documents.catalog_path.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_serializes_to_yaml() {
        let yaml = serde_yaml::to_string(&MroscConfig::default()).unwrap();

        assert!(yaml.contains("municipality:"));
        assert!(yaml.contains("documents:"));
        assert!(yaml.contains("logging:"));
        assert!(yaml.contains("expiry_rule: flat_thirty_day_months"));
    }

    #[test]
    fn test_partial_configs_merge_with_defaults() {
        let partial_yaml = r#"
logging:
  level: debug
"#;

        let config: MroscConfig = serde_yaml::from_str(partial_yaml).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.municipality.state, "SP");
        assert_eq!(config.documents.expiry_rule, ExpiryRule::FlatThirtyDayMonths);
    }

    #[test]
    fn test_expiry_rule_uses_snake_case() {
        let yaml = serde_yaml::to_string(&ExpiryRule::CalendarMonths).unwrap();
        assert!(yaml.contains("calendar_months"));
        let parsed: ExpiryRule = serde_yaml::from_str("flat_thirty_day_months").unwrap();
        assert_eq!(parsed, ExpiryRule::FlatThirtyDayMonths);
    }
}
