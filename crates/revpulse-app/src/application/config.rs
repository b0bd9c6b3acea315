use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::time::Duration;
use tracing::{info, warn};

/// Conversion rules
///
/// Every revenue constant lives here rather than in the services: the fixed
/// dollar values attached to signups, clicks and view milestones are an
/// estimation model, not business logic, and deployments tune them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionRules {
    pub daily_goal: f64,
    pub email_signup_value: f64,
    pub affiliate_click_value: f64,
    pub course_purchase_value: f64,
    pub ad_revenue_value: f64,
    /// Every Nth page view credits `ad_revenue_value`; 0 disables the rule
    pub page_view_milestone: u64,
    pub autosave_interval_secs: u64,
    pub submission_delay_ms: u64,
}

impl Default for ConversionRules {
    fn default() -> Self {
        Self {
            daily_goal: 100.0,
            email_signup_value: 50.0,
            affiliate_click_value: 25.0,
            course_purchase_value: 297.0,
            ad_revenue_value: 10.0,
            page_view_milestone: 100,
            autosave_interval_secs: 30,
            submission_delay_ms: 1000,
        }
    }
}

impl ConversionRules {
    /// Load rules from a JSON file. A missing or malformed file falls back
    /// to the defaults; a partial file falls back field-wise.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(rules) => {
                    info!("Conversion rules loaded from {:?}", path);
                    rules
                }
                Err(e) => {
                    warn!("Malformed rules file {:?} ({}), using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("No rules file at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_rules() {
        let rules = ConversionRules::default();
        assert_eq!(rules.daily_goal, 100.0);
        assert_eq!(rules.email_signup_value, 50.0);
        assert_eq!(rules.affiliate_click_value, 25.0);
        assert_eq!(rules.page_view_milestone, 100);
        assert_eq!(rules.autosave_interval_secs, 30);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let rules = ConversionRules::load(Path::new("/nonexistent/rules.json"));
        assert_eq!(rules.daily_goal, 100.0);
    }

    #[test]
    fn test_partial_file_defaults_field_wise() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "daily_goal": 250.0 }}"#).unwrap();

        let rules = ConversionRules::load(&path);
        assert_eq!(rules.daily_goal, 250.0);
        assert_eq!(rules.email_signup_value, 50.0);
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, "not json at all").unwrap();

        let rules = ConversionRules::load(&path);
        assert_eq!(rules.daily_goal, 100.0);
    }
}
