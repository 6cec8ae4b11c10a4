use stayledger::config::ConfigKey;
use stayledger::core::types::SettingsChangePolicy;
use stayledger::reminders::ReminderSettings;

use crate::common::{at, build_context, desk_at, make_temp_dir, reload_config, write_config};

#[test]
fn settings_edits_persist_to_disk() {
    let dir = make_temp_dir("stayledger-config");
    write_config(&dir, 24.0, "keep-existing");
    let mut ctx = build_context(&dir);
    let mut desk = desk_at(&mut ctx, at(2024, 6, 1, 9, 0));

    desk.change_settings(ReminderSettings {
        check_in_enabled: true,
        check_out_enabled: false,
        check_in_lead_hours: 72.0,
        check_out_lead_hours: 6.0,
    })
    .unwrap();
    desk.set_settings_change_policy(SettingsChangePolicy::RescheduleUpcoming)
        .unwrap();

    let cfg = reload_config(&dir);
    assert!(!cfg.check_out_reminders());
    assert_eq!(cfg.check_in_lead_hours(), 72.0);
    assert_eq!(
        cfg.settings_change_policy(),
        SettingsChangePolicy::RescheduleUpcoming
    );
}

#[test]
fn config_rows_follow_key_order() {
    let dir = make_temp_dir("stayledger-config");
    write_config(&dir, 1.0, "keep-existing");
    let mut cfg = reload_config(&dir);
    cfg.set_key(ConfigKey::FileLoggingEnabled, "False").unwrap();

    let keys: Vec<String> = cfg.rows().iter().map(|(k, _, _)| k.clone()).collect();
    assert_eq!(
        keys,
        vec![
            "CHECK_IN_REMINDERS",
            "CHECK_OUT_REMINDERS",
            "CHECK_IN_LEAD_HOURS",
            "CHECK_OUT_LEAD_HOURS",
            "SETTINGS_CHANGE_POLICY",
            "FILE_LOGGING_ENABLED",
        ]
    );
    assert!(!reload_config(&dir).file_logging_enabled());
}

#[test]
fn disabled_file_logging_writes_no_log() {
    let dir = make_temp_dir("stayledger-nolog");
    write_config(&dir, 24.0, "keep-existing");
    reload_config(&dir)
        .set_key(ConfigKey::FileLoggingEnabled, "False")
        .unwrap();

    let mut ctx = build_context(&dir);
    let mut desk = desk_at(&mut ctx, at(2024, 6, 1, 9, 0));
    desk.add_property(1, "Loft").unwrap();
    assert!(desk.context().logger.log_path().is_none());
}
