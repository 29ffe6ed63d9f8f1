use super::*;
use crate::{error::config::ConfigError, policy::DefaultPolicy};

/// Tests a negative bot ratio is rejected at construction.
///
/// Left unchecked, every guild would exceed the ratio, even one with no bots.
///
/// Expected: Err(InvalidThreshold)
#[test]
fn rejects_negative_bot_ratio() {
    let config = ManagerConfig::default().with_max_bot_ratio(-1.0);

    let result = GuildManager::new(config, DefaultPolicy);

    assert!(matches!(result, Err(ConfigError::InvalidThreshold(_))));
}

/// Tests a NaN bot ratio is rejected at construction.
///
/// Expected: Err(InvalidThreshold)
#[test]
fn rejects_nan_bot_ratio() {
    let config = ManagerConfig::default().with_max_bot_ratio(f64::NAN);

    assert!(GuildManager::new(config, DefaultPolicy).is_err());
}

/// Tests a zero guild cap is rejected at construction.
///
/// Left unchecked, every joined guild would be left immediately.
///
/// Expected: Err(InvalidThreshold)
#[test]
fn rejects_zero_max_guilds() {
    let config = ManagerConfig::default().with_max_guilds(0);

    assert!(matches!(
        GuildManager::new(config, DefaultPolicy),
        Err(ConfigError::InvalidThreshold(_))
    ));
}

/// Tests a valid configuration is kept as given.
///
/// Expected: Ok, config unchanged
#[test]
fn accepts_valid_config() {
    let manager = GuildManager::new(thresholds(), DefaultPolicy).unwrap();

    assert_eq!(manager.config(), &thresholds());
}
