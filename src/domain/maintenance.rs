//! Maintenance history and recommendation entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A maintenance action performed on a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: String,
    pub vehicle_id: String,
    pub description: String,
    pub performed_at: Option<NaiveDate>,
    pub mileage_km: u32,
    /// Cost in cents; zero when the backend has none on record.
    pub cost_cents: u64,
}

/// A backend-computed recommendation for upcoming maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecommendation {
    pub id: String,
    pub vehicle_id: String,
    pub title: String,
    pub detail: String,
    pub due_date: Option<NaiveDate>,
    pub due_mileage_km: Option<u32>,
}

/// Recommendations due within `horizon_days` of `today`, soonest first.
///
/// Recommendations without a due date are excluded; already-overdue entries
/// are kept so the reminder list surfaces them.
pub fn upcoming_reminders(
    recommendations: &[MaintenanceRecommendation],
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<MaintenanceRecommendation> {
    let mut due: Vec<MaintenanceRecommendation> = recommendations
        .iter()
        .filter(|r| {
            r.due_date
                .map(|d| (d - today).num_days() <= horizon_days)
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    due.sort_by_key(|r| r.due_date);
    due
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(id: &str, due: Option<&str>) -> MaintenanceRecommendation {
        MaintenanceRecommendation {
            id: id.to_string(),
            vehicle_id: "v1".to_string(),
            title: "Oil change".to_string(),
            detail: String::new(),
            due_date: due.map(|d| d.parse().unwrap()),
            due_mileage_km: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn reminders_within_horizon_are_kept_sorted() {
        let recs = vec![
            recommendation("r1", Some("2026-09-20")),
            recommendation("r2", Some("2026-09-01")),
            recommendation("r3", Some("2027-01-01")),
        ];
        let due = upcoming_reminders(&recs, date("2026-08-25"), 30);
        let ids: Vec<_> = due.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r2", "r1"]);
    }

    #[test]
    fn overdue_reminders_are_included() {
        let recs = vec![recommendation("r1", Some("2026-08-01"))];
        let due = upcoming_reminders(&recs, date("2026-08-25"), 30);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn reminders_without_due_date_are_excluded() {
        let recs = vec![recommendation("r1", None)];
        assert!(upcoming_reminders(&recs, date("2026-08-25"), 30).is_empty());
    }
}
