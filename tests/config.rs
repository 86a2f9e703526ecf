mod tests {
    use christmas_tree_display::{
        ColorScheme, DisplayMode, Duration, SETTINGS_FORM, StoredConfig, TreeDisplayConfig,
        config::{CONFIG_SECTION, FormField, PinMap},
    };

    #[test]
    fn test_defaults() {
        let config = TreeDisplayConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.display_mode, DisplayMode::Hybrid);
        assert_eq!(config.color_scheme, ColorScheme::Classic);
        assert_eq!(config.animation_speed(), 5);
        assert!(!config.show_in_december_only);
        assert_eq!(config.backlight_timeout_secs(), 300);
        assert_eq!(config.backlight_timeout(), Some(Duration::from_secs(300)));
        assert_eq!(config.pins, PinMap::T_DISPLAY_S3);
    }

    #[test]
    fn test_setters_clamp() {
        let mut config = TreeDisplayConfig::default();
        config.set_animation_speed(0);
        assert_eq!(config.animation_speed(), 1);
        config.set_animation_speed(42);
        assert_eq!(config.animation_speed(), 10);

        config.set_backlight_timeout_secs(7200);
        assert_eq!(config.backlight_timeout_secs(), 3600);
        config.set_backlight_timeout_secs(0);
        assert_eq!(config.backlight_timeout(), None);
    }

    #[test]
    fn test_stored_json_layout() {
        let mut config = TreeDisplayConfig::default();
        config.enabled = true;
        config.display_mode = DisplayMode::Info;
        config.color_scheme = ColorScheme::WledSync;

        let json = serde_json::to_value(config.to_stored()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "enabled": true,
                "displayMode": 2,
                "animationSpeed": 5,
                "colorScheme": 2,
                "showInDecemberOnly": false,
                "backlightTimeout": 300,
                "pin": [5, 4, 5, 38],
            })
        );
    }

    #[test]
    fn test_stored_round_trip() {
        let mut config = TreeDisplayConfig::default();
        config.enabled = true;
        config.show_in_december_only = true;
        config.set_animation_speed(9);
        config.set_backlight_timeout_secs(60);

        let text = serde_json::to_string(&config.to_stored()).unwrap();
        let stored: StoredConfig = serde_json::from_str(&text).unwrap();

        let mut loaded = TreeDisplayConfig::default();
        assert!(loaded.load(&stored));
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_clamps_out_of_range_values() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{
                "enabled": true,
                "displayMode": 9,
                "animationSpeed": 0,
                "colorScheme": -1,
                "showInDecemberOnly": false,
                "backlightTimeout": 100000
            }"#,
        )
        .unwrap();

        let mut config = TreeDisplayConfig::default();
        assert!(config.load(&stored));
        assert_eq!(config.display_mode, DisplayMode::Hybrid);
        assert_eq!(config.animation_speed(), 1);
        assert_eq!(config.color_scheme, ColorScheme::Classic);
        assert_eq!(config.backlight_timeout_secs(), 3600);
    }

    #[test]
    fn test_load_high_speed_clamps_to_max() {
        let stored = StoredConfig {
            animation_speed: Some(25),
            ..StoredConfig::default()
        };
        let mut config = TreeDisplayConfig::default();
        config.load(&stored);
        assert_eq!(config.animation_speed(), 10);
    }

    #[test]
    fn test_load_missing_keys_keeps_values() {
        let stored: StoredConfig = serde_json::from_str(r#"{"enabled": true}"#).unwrap();

        let mut config = TreeDisplayConfig::default();
        config.set_animation_speed(8);
        assert!(!config.load(&stored));
        assert!(config.enabled);
        assert_eq!(config.animation_speed(), 8);
        assert_eq!(config.display_mode, DisplayMode::Hybrid);
    }

    #[test]
    fn test_pin_array_is_optional() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{
                "enabled": false,
                "displayMode": 0,
                "animationSpeed": 3,
                "colorScheme": 1,
                "showInDecemberOnly": true,
                "backlightTimeout": 0
            }"#,
        )
        .unwrap();

        let mut config = TreeDisplayConfig::default();
        assert!(config.load(&stored));
        assert_eq!(config.display_mode, DisplayMode::FullTree);
        assert_eq!(config.color_scheme, ColorScheme::Rainbow);
        assert_eq!(config.pins, PinMap::T_DISPLAY_S3);
        assert_eq!(config.backlight_timeout(), None);
    }

    #[test]
    fn test_malformed_key_reads_as_missing() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{
                "enabled": true,
                "displayMode": 0,
                "animationSpeed": "fast",
                "colorScheme": 1,
                "showInDecemberOnly": "yes",
                "backlightTimeout": 60,
                "pin": [5, "dc", 5, 38]
            }"#,
        )
        .unwrap();
        assert_eq!(stored.animation_speed, None);
        assert_eq!(stored.show_in_december_only, None);
        assert_eq!(stored.pin, None);

        let mut config = TreeDisplayConfig::default();
        config.set_animation_speed(7);
        assert!(!config.load(&stored));
        assert!(config.enabled);
        assert_eq!(config.display_mode, DisplayMode::FullTree);
        assert_eq!(config.color_scheme, ColorScheme::Rainbow);
        assert_eq!(config.animation_speed(), 7);
        assert_eq!(config.backlight_timeout_secs(), 60);
        assert_eq!(config.pins, PinMap::T_DISPLAY_S3);
    }

    #[test]
    fn test_oversized_numbers_are_clamped() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{"enabled": true, "backlightTimeout": 99999999999, "animationSpeed": -99999999999}"#,
        )
        .unwrap();
        assert_eq!(stored.backlight_timeout, Some(i32::MAX));

        let mut config = TreeDisplayConfig::default();
        config.load(&stored);
        assert!(config.enabled);
        assert_eq!(config.backlight_timeout_secs(), 3600);
        assert_eq!(config.animation_speed(), 1);
    }

    #[test]
    fn test_null_and_nested_values_read_as_missing() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{"enabled": null, "displayMode": {"value": 2}, "colorScheme": [2], "pin": [1, 2, 3]}"#,
        )
        .unwrap();
        assert_eq!(stored, StoredConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let stored: StoredConfig =
            serde_json::from_str(r#"{"enabled": true, "legacyBrightness": 12}"#).unwrap();
        assert_eq!(stored.enabled, Some(true));
    }

    #[test]
    fn test_settings_form() {
        let keys: Vec<&str> = SETTINGS_FORM.iter().map(FormField::key).collect();
        assert_eq!(
            keys,
            [
                "displayMode",
                "animationSpeed",
                "colorScheme",
                "showInDecemberOnly",
                "backlightTimeout",
                "pin",
                "pin",
                "pin",
                "pin",
            ]
        );
        assert_eq!(CONFIG_SECTION, "ChristmasTree");

        let Some(FormField::Slider { min, max, default, .. }) = SETTINGS_FORM.get(1) else {
            panic!("animation speed is not a slider");
        };
        assert_eq!((*min, *max, *default), (1, 10, 5));
    }
}
