//! Business Rule Evaluator
//!
//! Active rules whose conditions all hold are applied in priority order
//! (highest first, then creation order). A `DENY` stops evaluation. Rules
//! containing a condition or action kind this server does not know are
//! skipped entirely.

use chrono::{NaiveDate, NaiveTime};
use shared::models::{BookingChannel, BusinessRule, RuleAction, RuleCondition};

use super::error::{BookingError, BookingResult};
use crate::utils::time::weekday_index;

/// What a rule sees of a reservation request
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub party_size: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub area_id: Option<i64>,
    pub channel: BookingChannel,
}

/// Combined effect of all matching rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub required_area: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub require_manual_confirmation: bool,
    /// Names of the matching rules, in application order
    pub applied: Vec<String>,
}

pub fn evaluate(draft: &ReservationDraft, rules: &[BusinessRule]) -> BookingResult<RuleOutcome> {
    match fold(draft, rules, true) {
        (_, Some((rule, reason))) => {
            tracing::info!(rule = %rule, "Reservation denied by business rule");
            Err(BookingError::RuleViolation { rule, reason })
        }
        (outcome, None) => Ok(outcome),
    }
}

/// Placement effects only (area, duration, manual confirmation)
///
/// `DENY` actions are skipped: the reservation was already accepted.
pub fn placement(draft: &ReservationDraft, rules: &[BusinessRule]) -> RuleOutcome {
    fold(draft, rules, false).0
}

/// Matching rules in application order, folded into one outcome
fn fold(
    draft: &ReservationDraft,
    rules: &[BusinessRule],
    stop_on_deny: bool,
) -> (RuleOutcome, Option<(String, Option<String>)>) {
    let mut ordered: Vec<&BusinessRule> = rules
        .iter()
        .filter(|r| r.is_active && is_known(r) && r.conditions.iter().all(|c| matches(c, draft)))
        .collect();
    ordered.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });

    let mut outcome = RuleOutcome::default();
    for rule in ordered {
        for action in &rule.actions {
            match action {
                RuleAction::Deny { reason } => {
                    if stop_on_deny {
                        return (outcome, Some((rule.name.clone(), reason.clone())));
                    }
                }
                RuleAction::RequireArea { area_id } => {
                    outcome.required_area.get_or_insert(*area_id);
                }
                RuleAction::SetDuration { minutes } => {
                    outcome.duration_minutes.get_or_insert(*minutes);
                }
                RuleAction::RequireManualConfirmation => {
                    outcome.require_manual_confirmation = true;
                }
                RuleAction::Unknown => {}
            }
        }
        outcome.applied.push(rule.name.clone());
    }
    (outcome, None)
}

fn is_known(rule: &BusinessRule) -> bool {
    !rule.conditions.contains(&RuleCondition::Unknown) && !rule.actions.contains(&RuleAction::Unknown)
}

fn matches(condition: &RuleCondition, draft: &ReservationDraft) -> bool {
    match condition {
        RuleCondition::PartySizeAtLeast { min } => draft.party_size >= *min,
        RuleCondition::PartySizeAtMost { max } => draft.party_size <= *max,
        RuleCondition::DaysOfWeek { days } => {
            let weekday = weekday_index(draft.date);
            days.iter().any(|d| i32::from(*d) == weekday)
        }
        RuleCondition::TimeBetween { start, end } => match (parse_time(start), parse_time(end)) {
            (Some(start), Some(end)) if start < end => draft.time >= start && draft.time < end,
            // Overnight (e.g. 22:00 - 02:00)
            (Some(start), Some(end)) => draft.time >= start || draft.time < end,
            _ => false,
        },
        RuleCondition::DateBetween { from, to } => match (parse_date(from), parse_date(to)) {
            (Some(from), Some(to)) => draft.date >= from && draft.date <= to,
            _ => false,
        },
        RuleCondition::Area { area_id } => draft.area_id == Some(*area_id),
        RuleCondition::Channel { channel } => draft.channel == *channel,
        RuleCondition::Unknown => false,
    }
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(
        id: i64,
        name: &str,
        priority: i32,
        conditions: Vec<RuleCondition>,
        actions: Vec<RuleAction>,
    ) -> BusinessRule {
        BusinessRule {
            id,
            restaurant_id: 1,
            name: name.into(),
            description: None,
            rule_type: "CAPACITY".into(),
            conditions,
            actions,
            is_active: true,
            priority,
            created_at: id,
        }
    }

    fn draft(party_size: i32) -> ReservationDraft {
        ReservationDraft {
            party_size,
            // Friday
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            area_id: None,
            channel: BookingChannel::Online,
        }
    }

    #[test]
    fn no_rules_allows_everything() {
        let outcome = evaluate(&draft(4), &[]).unwrap();
        assert_eq!(outcome, RuleOutcome::default());
    }

    #[test]
    fn deny_short_circuits_with_rule_name() {
        let rules = vec![rule(
            1,
            "No big online parties",
            10,
            vec![
                RuleCondition::PartySizeAtLeast { min: 8 },
                RuleCondition::Channel {
                    channel: BookingChannel::Online,
                },
            ],
            vec![RuleAction::Deny {
                reason: Some("call us".into()),
            }],
        )];
        assert!(evaluate(&draft(4), &rules).is_ok());
        match evaluate(&draft(8), &rules) {
            Err(BookingError::RuleViolation { rule, reason }) => {
                assert_eq!(rule, "No big online parties");
                assert_eq!(reason.as_deref(), Some("call us"));
            }
            other => panic!("expected RuleViolation, got {other:?}"),
        }
    }

    #[test]
    fn highest_priority_wins_then_creation_order() {
        let rules = vec![
            rule(1, "low", 1, vec![], vec![RuleAction::RequireArea { area_id: 10 }]),
            rule(2, "high", 5, vec![], vec![RuleAction::RequireArea { area_id: 20 }]),
            rule(3, "high-later", 5, vec![], vec![RuleAction::SetDuration { minutes: 120 }]),
            rule(4, "high-latest", 5, vec![], vec![RuleAction::SetDuration { minutes: 60 }]),
        ];
        let outcome = evaluate(&draft(2), &rules).unwrap();
        assert_eq!(outcome.required_area, Some(20));
        assert_eq!(outcome.duration_minutes, Some(120));
        assert_eq!(outcome.applied, vec!["high", "high-later", "high-latest", "low"]);
    }

    #[test]
    fn unknown_kinds_make_the_rule_inert() {
        let rules = vec![
            rule(
                1,
                "future condition",
                9,
                vec![RuleCondition::Unknown],
                vec![RuleAction::Deny { reason: None }],
            ),
            rule(2, "future action", 9, vec![], vec![RuleAction::Unknown, RuleAction::Deny { reason: None }]),
        ];
        assert!(evaluate(&draft(2), &rules).is_ok());
    }

    #[test]
    fn inactive_rules_are_ignored() {
        let mut r = rule(1, "off", 1, vec![], vec![RuleAction::Deny { reason: None }]);
        r.is_active = false;
        assert!(evaluate(&draft(2), &[r]).is_ok());
    }

    #[test]
    fn time_and_day_conditions() {
        let late = RuleCondition::TimeBetween {
            start: "22:00".into(),
            end: "02:00".into(),
        };
        let evening = RuleCondition::TimeBetween {
            start: "19:00".into(),
            end: "21:00".into(),
        };
        let friday = RuleCondition::DaysOfWeek { days: vec![5] };
        let december = RuleCondition::DateBetween {
            from: "2026-12-01".into(),
            to: "2026-12-31".into(),
        };
        let d = draft(2);
        assert!(!matches(&late, &d));
        assert!(matches(&evening, &d));
        assert!(matches(&friday, &d));
        assert!(!matches(&december, &d));
    }

    #[test]
    fn area_condition_needs_a_requested_area() {
        let cond = RuleCondition::Area { area_id: 3 };
        let mut d = draft(2);
        assert!(!matches(&cond, &d));
        d.area_id = Some(3);
        assert!(matches(&cond, &d));
    }

    #[test]
    fn manual_confirmation_flag() {
        let rules = vec![rule(
            1,
            "VIP review",
            1,
            vec![RuleCondition::PartySizeAtLeast { min: 6 }],
            vec![RuleAction::RequireManualConfirmation],
        )];
        assert!(!evaluate(&draft(2), &rules).unwrap().require_manual_confirmation);
        assert!(evaluate(&draft(6), &rules).unwrap().require_manual_confirmation);
    }

    #[test]
    fn placement_skips_deny_but_keeps_area_and_duration() {
        let rules = vec![
            rule(1, "closed to groups", 5, vec![], vec![RuleAction::Deny { reason: None }]),
            rule(
                2,
                "terrace",
                1,
                vec![],
                vec![
                    RuleAction::RequireArea { area_id: 30 },
                    RuleAction::SetDuration { minutes: 120 },
                ],
            ),
        ];
        assert!(evaluate(&draft(4), &rules).is_err());

        let outcome = placement(&draft(4), &rules);
        assert_eq!(outcome.required_area, Some(30));
        assert_eq!(outcome.duration_minutes, Some(120));
        assert_eq!(outcome.applied, vec!["closed to groups", "terrace"]);
    }
}
