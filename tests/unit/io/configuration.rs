//! Tests for configuration defaults and validation

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tileloops::io::configuration::{
        DEFAULT_REGION_MARGIN, DEFAULT_REVIVE_DELAY, MAX_REGION_MARGIN, REBUILD_THREAD_NAME,
        WorldConfig,
    };

    // Tests that defaults come from the named constants
    // Verified by setting the default margin to zero
    #[test]
    fn test_default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.revive_delay, DEFAULT_REVIVE_DELAY);
        assert_eq!(config.region_margin, DEFAULT_REGION_MARGIN);
        assert!(config.validate().is_ok());
    }

    // Tests that a negative margin fails validation and zero passes
    // Verified by rejecting a zero margin
    #[test]
    fn test_margin_validation() {
        let mut config = WorldConfig {
            revive_delay: Duration::ZERO,
            region_margin: -2,
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("region_margin"));

        config.region_margin = 0;
        assert!(config.validate().is_ok());
    }

    // Tests that the worker thread has a recognizable name
    // Verified by leaving the worker thread unnamed
    #[test]
    fn test_rebuild_thread_name() {
        assert!(!REBUILD_THREAD_NAME.is_empty());
        assert!(!REBUILD_THREAD_NAME.contains(char::is_whitespace));
    }

    // Tests that margins large enough to overflow a room are refused
    // Verified by removing the MAX_REGION_MARGIN check
    #[test]
    fn test_margin_upper_limit() {
        let mut config = WorldConfig {
            revive_delay: Duration::ZERO,
            region_margin: i32::MAX,
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("region_margin"));

        config.region_margin = MAX_REGION_MARGIN;
        assert!(config.validate().is_ok());
    }
}
