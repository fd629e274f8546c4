use super::*;
use crate::db::repository::RepoError;
use shared::models::{
    AreaUpdate, BusinessRuleCreate, BusinessRuleUpdate, DiningTableUpdate, RuleAction,
    RuleCondition, SpecialDayInput,
};

// ========================================================================
// 预订策略：提前量、营业时间、规则、渠道
// ========================================================================

#[tokio::test]
async fn test_min_advance_hours_rejects_last_minute() {
    let h = Harness::new(&[4]).await;
    h.clock.set(at(DAY, "18:00"));
    let err = h.book("18:30", 2).await.unwrap_err();
    assert!(matches!(err, BookingError::AdvanceWindowViolation { .. }));

    // exactly two hours ahead is fine
    assert!(h.book("20:00", 2).await.is_ok());
}

#[tokio::test]
async fn test_max_advance_days_rejects_far_future() {
    let h = Harness::new(&[4]).await;
    let err = h
        .manager
        .create(h.restaurant_id, request("2026-11-20", "19:00", 2))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AdvanceWindowViolation { .. }));
}

#[tokio::test]
async fn test_window_must_fit_operating_hours() {
    let h = Harness::new(&[4]).await;
    for time in ["17:00", "22:00", "23:00"] {
        let err = h.book(time, 2).await.unwrap_err();
        assert!(
            matches!(err, BookingError::OutsideOperatingHours { .. }),
            "{time} should be outside hours, got {err:?}"
        );
    }
    assert!(h.book("21:30", 2).await.is_ok());
}

#[tokio::test]
async fn test_special_day_closure_wins_over_weekly_hours() {
    let h = Harness::new(&[4]).await;
    h.admin
        .set_special_day(
            h.restaurant_id,
            SpecialDayInput {
                special_date: DAY.into(),
                open_time: "00:00".into(),
                close_time: "00:00".into(),
                is_closed: true,
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        h.book("19:00", 2).await,
        Err(BookingError::OutsideOperatingHours { .. })
    ));

    // upsert replaces the same date instead of adding a second record
    h.admin
        .set_special_day(
            h.restaurant_id,
            SpecialDayInput {
                special_date: DAY.into(),
                open_time: "13:00".into(),
                close_time: "23:00".into(),
                is_closed: false,
            },
        )
        .await
        .unwrap();
    let hours = h.admin.operating_hours(h.restaurant_id).await.unwrap();
    assert_eq!(hours.iter().filter(|h| h.is_special_day).count(), 1);
    assert_eq!(hours.iter().filter(|h| !h.is_special_day).count(), 7);
    assert!(h.book("13:30", 2).await.is_ok());
}

#[tokio::test]
async fn test_deny_rule_reports_rule_name() {
    let h = Harness::new(&[8]).await;
    h.admin
        .create_rule(
            h.restaurant_id,
            BusinessRuleCreate {
                name: "Grupos grandes por teléfono".into(),
                description: None,
                rule_type: "CAPACITY".into(),
                conditions: vec![RuleCondition::PartySizeAtLeast { min: 6 }],
                actions: vec![RuleAction::Deny { reason: None }],
                is_active: None,
                priority: Some(10),
            },
        )
        .await
        .unwrap();

    match h.book("19:00", 6).await {
        Err(BookingError::RuleViolation { rule, .. }) => {
            assert_eq!(rule, "Grupos grandes por teléfono")
        }
        other => panic!("expected RuleViolation, got {other:?}"),
    }
    assert!(h.book("19:00", 5).await.is_ok());
}

#[tokio::test]
async fn test_deactivated_rule_stops_denying() {
    let h = Harness::new(&[8]).await;
    let rule = h
        .admin
        .create_rule(
            h.restaurant_id,
            BusinessRuleCreate {
                name: "Grupos grandes por teléfono".into(),
                description: None,
                rule_type: "CAPACITY".into(),
                conditions: vec![RuleCondition::PartySizeAtLeast { min: 6 }],
                actions: vec![RuleAction::Deny { reason: None }],
                is_active: None,
                priority: None,
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        h.book("19:00", 6).await,
        Err(BookingError::RuleViolation { .. })
    ));

    let updated = h
        .admin
        .update_rule(
            h.restaurant_id,
            rule.id,
            BusinessRuleUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!updated.is_active);
    assert_eq!(updated.name, rule.name);
    assert_eq!(updated.created_at, rule.created_at);

    assert!(h.book("19:00", 6).await.is_ok());
}

#[tokio::test]
async fn test_rule_update_changes_conditions_and_checks_owner() {
    let h = Harness::new(&[8]).await;
    let rule = h
        .admin
        .create_rule(
            h.restaurant_id,
            BusinessRuleCreate {
                name: "Grupos grandes".into(),
                description: None,
                rule_type: "CAPACITY".into(),
                conditions: vec![RuleCondition::PartySizeAtLeast { min: 6 }],
                actions: vec![RuleAction::Deny { reason: None }],
                is_active: None,
                priority: None,
            },
        )
        .await
        .unwrap();

    // 门槛从 6 人降到 3 人
    h.admin
        .update_rule(
            h.restaurant_id,
            rule.id,
            BusinessRuleUpdate {
                conditions: Some(vec![RuleCondition::PartySizeAtLeast { min: 3 }]),
                priority: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        h.book("19:00", 3).await,
        Err(BookingError::RuleViolation { .. })
    ));
    assert!(h.book("19:00", 2).await.is_ok());

    let err = h
        .admin
        .update_rule(h.restaurant_id + 1, rule.id, BusinessRuleUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::NotFound {
            entity: "business_rule",
            ..
        }
    ));
}

#[tokio::test]
async fn test_rules_set_duration_and_area() {
    let h = Harness::new(&[4]).await;
    let terrace = h
        .admin
        .create_area(
            h.restaurant_id,
            AreaCreate {
                name: "Terraza".into(),
                description: None,
            },
        )
        .await
        .unwrap();
    let terrace_table = h
        .admin
        .create_table(
            h.restaurant_id,
            DiningTableCreate {
                area_id: terrace.id,
                number: "T1".into(),
                capacity: Some(6),
                location: Some(shared::models::TableLocation::Terrace),
            },
        )
        .await
        .unwrap();
    h.admin
        .create_rule(
            h.restaurant_id,
            BusinessRuleCreate {
                name: "Cenas largas en terraza".into(),
                description: None,
                rule_type: "SEATING".into(),
                conditions: vec![RuleCondition::PartySizeAtLeast { min: 3 }],
                actions: vec![
                    RuleAction::RequireArea { area_id: terrace.id },
                    RuleAction::SetDuration { minutes: 120 },
                ],
                is_active: None,
                priority: None,
            },
        )
        .await
        .unwrap();

    let small = h.book("19:00", 2).await.unwrap();
    assert_eq!(small.table_id, Some(h.table_ids[0]));
    assert_eq!(small.duration_minutes, 90);

    let big = h.book("19:00", 3).await.unwrap();
    assert_eq!(big.table_id, Some(terrace_table.id));
    assert_eq!(big.duration_minutes, 120);
}

#[tokio::test]
async fn test_manual_confirmation_rule_overrides_auto_confirm() {
    let h = Harness::new(&[8]).await;
    h.auto_confirm().await;
    h.admin
        .create_rule(
            h.restaurant_id,
            BusinessRuleCreate {
                name: "Revisar grupos".into(),
                description: None,
                rule_type: "REVIEW".into(),
                conditions: vec![RuleCondition::PartySizeAtLeast { min: 6 }],
                actions: vec![RuleAction::RequireManualConfirmation],
                is_active: None,
                priority: None,
            },
        )
        .await
        .unwrap();

    assert_status(&h.book("19:00", 6).await.unwrap(), ReservationStatus::Pending);
    assert_status(&h.book("21:00", 2).await.unwrap(), ReservationStatus::Confirmed);
}

#[tokio::test]
async fn test_online_channel_respects_toggle() {
    let h = Harness::new(&[4]).await;
    h.settings(RestaurantSettingsUpdate {
        enable_online_bookings: Some(false),
        ..Default::default()
    })
    .await;

    let mut online = request(DAY, "19:00", 2);
    online.channel = BookingChannel::Online;
    assert!(matches!(
        h.manager.create(h.restaurant_id, online).await,
        Err(BookingError::OnlineBookingsDisabled { .. })
    ));

    // staff bookings still go through; with no waitlist a full house is CapacityUnavailable
    h.book("19:00", 4).await.unwrap();
    assert!(matches!(
        h.book("19:00", 2).await,
        Err(BookingError::CapacityUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_party_size_limits() {
    let h = Harness::new(&[20]).await;
    assert!(matches!(
        h.book("19:00", 13).await,
        Err(BookingError::PartySizeExceeded {
            party_size: 13,
            max: 12
        })
    ));
    assert!(matches!(
        h.book("19:00", 0).await,
        Err(BookingError::Validation(_))
    ));
}

#[tokio::test]
async fn test_blank_customer_name_is_rejected() {
    let h = Harness::new(&[4]).await;
    let mut req = request(DAY, "19:00", 2);
    req.customer_name = "  ".into();
    assert!(matches!(
        h.manager.create(h.restaurant_id, req).await,
        Err(BookingError::Validation(_))
    ));
}

#[tokio::test]
async fn test_area_capacity_follows_tables() {
    let h = Harness::new(&[2, 4, 6]).await;
    let areas = h.admin.areas(h.restaurant_id).await.unwrap();
    let salon = areas.iter().find(|a| a.id == h.area_id).unwrap();
    assert_eq!(salon.max_capacity, 12);
}

async fn area_capacity(h: &Harness, area_id: i64) -> i32 {
    h.admin
        .areas(h.restaurant_id)
        .await
        .unwrap()
        .into_iter()
        .find(|a| a.id == area_id)
        .unwrap()
        .max_capacity
}

#[tokio::test]
async fn test_deactivated_table_is_not_allocated() {
    let h = Harness::new(&[2, 4]).await;
    let off = DiningTableUpdate {
        is_active: Some(false),
        ..Default::default()
    };
    let table = h
        .admin
        .update_table(h.restaurant_id, h.table_ids[1], off)
        .await
        .unwrap();
    assert!(!table.is_active);
    assert_eq!(area_capacity(&h, h.area_id).await, 2);

    assert!(matches!(
        h.book("19:00", 3).await,
        Err(BookingError::CapacityUnavailable { party_size: 3 })
    ));

    let on = DiningTableUpdate {
        is_active: Some(true),
        ..Default::default()
    };
    h.admin
        .update_table(h.restaurant_id, h.table_ids[1], on)
        .await
        .unwrap();
    assert_eq!(area_capacity(&h, h.area_id).await, 6);
    let r = h.book("19:00", 3).await.unwrap();
    assert_eq!(r.table_id, Some(h.table_ids[1]));
}

#[tokio::test]
async fn test_table_capacity_and_area_move_refresh_both_areas() {
    let h = Harness::new(&[2, 4]).await;
    let terrace = h
        .admin
        .create_area(
            h.restaurant_id,
            AreaCreate {
                name: "Terraza".into(),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(terrace.max_capacity, 0);

    h.admin
        .update_table(
            h.restaurant_id,
            h.table_ids[0],
            DiningTableUpdate {
                capacity: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(area_capacity(&h, h.area_id).await, 10);

    let moved = h
        .admin
        .update_table(
            h.restaurant_id,
            h.table_ids[0],
            DiningTableUpdate {
                area_id: Some(terrace.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.area_id, terrace.id);
    assert_eq!(moved.capacity, 6);
    assert_eq!(area_capacity(&h, h.area_id).await, 4);
    assert_eq!(area_capacity(&h, terrace.id).await, 6);

    // 编号不可与其他桌台重复
    let err = h
        .admin
        .update_table(
            h.restaurant_id,
            h.table_ids[0],
            DiningTableUpdate {
                number: Some("2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Store(RepoError::Duplicate(_))));

    let err = h
        .admin
        .update_table(
            h.restaurant_id,
            h.table_ids[0],
            DiningTableUpdate {
                capacity: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}

#[tokio::test]
async fn test_area_update_keeps_derived_capacity() {
    let h = Harness::new(&[2, 4]).await;
    let area = h
        .admin
        .update_area(
            h.restaurant_id,
            h.area_id,
            AreaUpdate {
                name: Some("Comedor".into()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(area.name, "Comedor");
    assert!(!area.is_active);
    assert_eq!(area_capacity(&h, h.area_id).await, 6);

    let err = h
        .admin
        .update_area(h.restaurant_id, h.area_id + 1, AreaUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound { entity: "area", .. }));
}

#[tokio::test]
async fn test_settings_validation() {
    let h = Harness::new(&[4]).await;
    let err = h
        .admin
        .update_settings(
            h.restaurant_id,
            RestaurantSettingsUpdate {
                max_party_size: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}
