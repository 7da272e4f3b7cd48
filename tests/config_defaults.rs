use webtestify::config::Settings;

#[test]
fn test_default_settings_values() {
    let settings = Settings::default();

    // Verify defaults match the documented configuration surface
    assert!(settings.detailed_output);
    assert!(!settings.live_output);
    assert!(!settings.parallel_mode);
    assert!(!settings.unit_tests_mode);
    assert!(!settings.silent);
    assert!(settings.start_session);
    assert!(!settings.screenshots.on_error);
    assert_eq!(settings.screenshots.path, "screens");
}

#[test]
fn test_missing_sections_fall_back_to_defaults() {
    let settings = Settings::parse("silent = true").expect("Failed to parse settings");

    assert!(settings.silent);
    assert!(settings.detailed_output);
    assert_eq!(settings.screenshots.path, "screens");
}
