// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::from_u8(4), Some(LogLevel::DEBUG));
    assert_eq!(LogLevel::from_u8(7), None);
    assert!(LogLevel::new(9).is_err());
    assert_eq!(u8::from(LogLevel::TRACE), 5);
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    insta::assert_debug_snapshot!(filters, @r#"
    [
        "off",
        "error",
        "warn",
        "warn,tugboat=info",
        "warn,tugboat=debug",
        "warn,tugboat=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_config_overrides() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::new(3).unwrap())
        .with_file_level(LogLevel::TRACE)
        .with_log_file("logs/tugboat.log".into())
        .with_color(false)
        .build();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert_eq!(
        config.log_file(),
        Some(std::path::Path::new("logs/tugboat.log"))
    );
    assert!(!config.color());
}
