use stayledger::core::types::ReminderKind;
use stayledger::reminders::ReminderSettings;

use crate::common::{at, build_context, desk_at, draft, make_temp_dir, write_config};

#[test]
fn day_ahead_reminder_is_due_when_booked_late() {
    let dir = make_temp_dir("stayledger-reminders");
    write_config(&dir, 24.0, "keep-existing");
    let mut ctx = build_context(&dir);
    let mut desk = desk_at(&mut ctx, at(2024, 6, 9, 15, 0));
    let cabin = desk.add_property(1, "Sea Cabin").unwrap();
    desk.create_booking(cabin, draft("Ana Ruiz", "2024-06-10", "2024-06-15"))
        .unwrap();

    let now = desk.now();
    let mut inbox = desk.inbox();
    let due = inbox.due(now);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].kind, ReminderKind::CheckIn);
    assert_eq!(due[0].scheduled_for, at(2024, 6, 9, 14, 0));
    let id = due[0].id;

    assert_eq!(inbox.unread_count(now), 1);
    inbox.mark_read(id).unwrap();
    assert_eq!(inbox.unread_count(now), 0);
}

#[test]
fn disabled_check_in_only_schedules_check_out() {
    let dir = make_temp_dir("stayledger-reminders");
    write_config(&dir, 24.0, "keep-existing");
    let mut ctx = build_context(&dir);
    let mut desk = desk_at(&mut ctx, at(2024, 6, 1, 9, 0));
    desk.change_settings(ReminderSettings {
        check_in_enabled: false,
        ..ReminderSettings::default()
    })
    .unwrap();

    let cabin = desk.add_property(1, "Sea Cabin").unwrap();
    desk.create_booking(cabin, draft("Ana Ruiz", "2024-06-10", "2024-06-15"))
        .unwrap();

    let kinds: Vec<ReminderKind> = desk
        .context()
        .reminders
        .query()
        .collect()
        .into_iter()
        .map(|r| r.kind)
        .collect();
    assert_eq!(kinds, vec![ReminderKind::CheckOut]);
}

#[test]
fn rescheduling_policy_moves_upcoming_reminders() {
    let dir = make_temp_dir("stayledger-reminders");
    write_config(&dir, 24.0, "reschedule-upcoming");
    let mut ctx = build_context(&dir);
    let mut desk = desk_at(&mut ctx, at(2024, 6, 1, 9, 0));
    let cabin = desk.add_property(1, "Sea Cabin").unwrap();
    desk.create_booking(cabin, draft("Ana Ruiz", "2024-06-10", "2024-06-15"))
        .unwrap();

    desk.change_settings(ReminderSettings {
        check_in_lead_hours: 168.0,
        check_out_lead_hours: 1.0,
        ..ReminderSettings::default()
    })
    .unwrap();

    let reminders = &desk.context().reminders;
    assert_eq!(reminders.len(), 2);
    let when = |kind: ReminderKind| {
        reminders
            .query()
            .r#where(move |r| r.kind == kind)
            .collect()[0]
            .scheduled_for
    };
    assert_eq!(when(ReminderKind::CheckIn), at(2024, 6, 3, 14, 0));
    assert_eq!(when(ReminderKind::CheckOut), at(2024, 6, 15, 10, 0));
}
