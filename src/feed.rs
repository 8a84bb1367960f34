use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{
    Alert, DailyMetric, EmployeeRecord, Insight, PersonalSnapshot, Priority, TeamMetrics,
    WellnessSnapshot,
};
use crate::risk::{self, RiskLevel};

pub const SNAPSHOT_FILE: &str = "snapshot.json";

pub fn load_snapshot(path: &Path) -> anyhow::Result<WellnessSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read metrics snapshot {}", path.display()))?;
    let mut snapshot: WellnessSnapshot =
        serde_json::from_str(&raw).context("metrics snapshot is not valid JSON")?;

    // Ingestion boundary: the collaborator's numbers are taken as given,
    // except that scores must land inside [0, 100].
    for record in &mut snapshot.employees {
        record.risk_score = record.risk_score.min(100);
        record.productivity_score = record.productivity_score.min(100);
    }
    snapshot.personal.risk_score = snapshot.personal.risk_score.min(100);
    snapshot.personal.productivity_score = snapshot.personal.productivity_score.min(100);

    tracing::debug!(
        employees = snapshot.employees.len(),
        insights = snapshot.insights.len(),
        "loaded metrics snapshot"
    );
    Ok(snapshot)
}

pub fn write_snapshot(path: &Path, snapshot: &WellnessSnapshot) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let raw = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, raw)
        .with_context(|| format!("failed to write metrics snapshot {}", path.display()))?;
    Ok(())
}

pub fn import_csv(csv_path: &Path) -> anyhow::Result<Vec<EmployeeRecord>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: String,
        name: String,
        department: String,
        title: String,
        risk_score: i64,
        sentiment_trend: i32,
        productivity_score: i64,
        last_activity: DateTime<Utc>,
        recent_changes: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut records = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        records.push(EmployeeRecord {
            id: row.id,
            name: row.name,
            department: row.department,
            title: row.title,
            risk_score: risk::clamp_score(row.risk_score),
            sentiment_trend: row.sentiment_trend,
            productivity_score: risk::clamp_score(row.productivity_score),
            last_activity: row.last_activity,
            recent_changes: row
                .recent_changes
                .as_deref()
                .map(split_changes)
                .unwrap_or_default(),
        });
    }

    Ok(records)
}

/// Replaces records sharing an id, appends new ones; feed order is kept.
pub fn merge_records(snapshot: &mut WellnessSnapshot, incoming: Vec<EmployeeRecord>) -> usize {
    let mut merged = 0usize;
    for record in incoming {
        match snapshot
            .employees
            .iter_mut()
            .find(|existing| existing.id == record.id)
        {
            Some(existing) => *existing = record,
            None => snapshot.employees.push(record),
        }
        merged += 1;
    }
    merged
}

fn split_changes(notes: &str) -> Vec<String> {
    notes
        .split(';')
        .map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty())
        .collect()
}

pub fn demo_snapshot() -> anyhow::Result<WellnessSnapshot> {
    let base = Utc
        .with_ymd_and_hms(2026, 2, 6, 17, 0, 0)
        .single()
        .context("invalid date")?;

    let employees = vec![
        (
            "1247",
            "Engineering",
            "Senior Developer",
            85,
            -25,
            45,
            base - Duration::hours(2),
            "Decreased productivity;Negative sentiment spike",
        ),
        (
            "1089",
            "Design",
            "UX Designer",
            65,
            -8,
            78,
            base - Duration::days(1),
            "Irregular work patterns",
        ),
        (
            "1156",
            "Engineering",
            "Frontend Developer",
            62,
            -12,
            72,
            base - Duration::hours(3),
            "Reduced communication;Late work hours",
        ),
        (
            "1203",
            "Product",
            "Product Manager",
            28,
            5,
            92,
            base - Duration::hours(1),
            "Consistent performance",
        ),
        (
            "1298",
            "Engineering",
            "DevOps Engineer",
            22,
            12,
            88,
            base - Duration::minutes(30),
            "Improved collaboration",
        ),
    ];

    let employees = employees
        .into_iter()
        .map(
            |(id, department, title, risk, sentiment, productivity, last_activity, changes)| {
                EmployeeRecord {
                    id: id.to_string(),
                    name: format!("Employee #{id}"),
                    department: department.to_string(),
                    title: title.to_string(),
                    risk_score: risk,
                    sentiment_trend: sentiment,
                    productivity_score: productivity,
                    last_activity,
                    recent_changes: split_changes(changes),
                }
            },
        )
        .collect();

    let insights = vec![
        Insight {
            title: "Team Communication Declining".to_string(),
            description: "Team-wide communication frequency has decreased by 25% over the past two weeks"
                .to_string(),
            category: "Communication".to_string(),
            impact: RiskLevel::High,
            trend: -25,
            affected_count: 8,
            recommendations: vec![
                "Schedule weekly team check-ins".to_string(),
                "Encourage informal communication channels".to_string(),
                "Consider team building activities".to_string(),
            ],
            priority: Priority::Urgent,
        },
        Insight {
            title: "After-Hours Work Pattern".to_string(),
            description: "30% of team members are consistently working outside normal business hours"
                .to_string(),
            category: "Work-Life Balance".to_string(),
            impact: RiskLevel::High,
            trend: 30,
            affected_count: 7,
            recommendations: vec![
                "Implement no-email-after-hours policy".to_string(),
                "Review workload distribution".to_string(),
                "Discuss time management strategies".to_string(),
            ],
            priority: Priority::Urgent,
        },
        Insight {
            title: "Productivity Inconsistency".to_string(),
            description: "Several team members showing irregular productivity patterns".to_string(),
            category: "Performance".to_string(),
            impact: RiskLevel::Medium,
            trend: -15,
            affected_count: 5,
            recommendations: vec![
                "Provide productivity tools and training".to_string(),
                "Identify and remove blockers".to_string(),
                "Consider flexible work arrangements".to_string(),
            ],
            priority: Priority::Medium,
        },
        Insight {
            title: "Positive Collaboration Increase".to_string(),
            description: "Cross-team collaboration has improved by 18% this month".to_string(),
            category: "Collaboration".to_string(),
            impact: RiskLevel::Low,
            trend: 18,
            affected_count: 12,
            recommendations: vec![
                "Celebrate and document successful collaboration patterns".to_string(),
                "Share best practices with other teams".to_string(),
                "Consider expanding cross-team initiatives".to_string(),
            ],
            priority: Priority::Low,
        },
    ];

    let alerts = vec![
        Alert {
            employee: "Employee #1247".to_string(),
            risk_level: RiskLevel::High,
            reason: "Significant drop in productivity and negative sentiment increase".to_string(),
            noted_at: base - Duration::hours(2),
        },
        Alert {
            employee: "Employee #1089".to_string(),
            risk_level: RiskLevel::Medium,
            reason: "Irregular work patterns detected".to_string(),
            noted_at: base - Duration::days(1),
        },
        Alert {
            employee: "Employee #1156".to_string(),
            risk_level: RiskLevel::Medium,
            reason: "Decreased communication activity".to_string(),
            noted_at: base - Duration::days(2),
        },
    ];

    let team_metrics = TeamMetrics {
        avg_risk_score: 45,
        risk_trend: -8,
        satisfaction_score: 72,
        retention_risk: 15,
        burnout_prevention: 85,
    };

    let personal = PersonalSnapshot {
        risk_score: 65,
        sentiment_trend: -12,
        productivity_score: 78,
        weekly_hours: 42,
        recommendations: vec![
            "Consider taking short breaks between tasks".to_string(),
            "Your communication sentiment has been declining - reach out if you need support"
                .to_string(),
            "Great job maintaining consistent productivity!".to_string(),
        ],
        weekly: vec![
            DailyMetric { day: "Mon".to_string(), sentiment: 80, productivity: 85 },
            DailyMetric { day: "Tue".to_string(), sentiment: 75, productivity: 90 },
            DailyMetric { day: "Wed".to_string(), sentiment: 65, productivity: 75 },
            DailyMetric { day: "Thu".to_string(), sentiment: 60, productivity: 70 },
            DailyMetric { day: "Fri".to_string(), sentiment: 70, productivity: 80 },
        ],
    };

    Ok(WellnessSnapshot {
        generated_at: base,
        employees,
        insights,
        alerts,
        team_metrics,
        personal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn demo_snapshot_matches_the_seeded_roster() {
        let snapshot = demo_snapshot().unwrap();
        assert_eq!(snapshot.employees.len(), 5);
        assert_eq!(snapshot.insights.len(), 4);
        assert_eq!(snapshot.alerts.len(), 3);

        let scores: Vec<u8> = snapshot
            .employees
            .iter()
            .map(|record| record.risk_score)
            .collect();
        assert_eq!(scores, [85, 65, 62, 28, 22]);
        assert_eq!(snapshot.employees[0].recent_changes.len(), 2);
    }

    #[test]
    fn snapshot_round_trips_through_disk_with_clamping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);

        let mut snapshot = demo_snapshot().unwrap();
        snapshot.employees[0].risk_score = 140;
        write_snapshot(&path, &snapshot).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.employees[0].risk_score, 100);
        assert_eq!(&loaded.employees[1..], &snapshot.employees[1..]);
        assert_eq!(loaded.team_metrics, snapshot.team_metrics);
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);
        std::fs::write(&path, "{broken").unwrap();
        assert!(load_snapshot(&path).is_err());
    }

    #[test]
    fn csv_rows_become_clamped_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics.csv");
        std::fs::write(
            &path,
            "id,name,department,title,risk_score,sentiment_trend,productivity_score,last_activity,recent_changes\n\
             2001,Employee #2001,Finance,Analyst,120,-4,95,2026-02-05T09:00:00Z,Late work hours; Missed standup\n\
             2002,Employee #2002,Finance,Controller,35,6,88,2026-02-05T10:30:00Z,\n",
        )
        .unwrap();

        let records = import_csv(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].risk_score, 100);
        assert_eq!(
            records[0].recent_changes,
            ["Late work hours", "Missed standup"]
        );
        assert!(records[1].recent_changes.is_empty());
        assert_eq!(records[1].risk_level(), RiskLevel::Low);
    }

    #[test]
    fn merge_replaces_by_id_and_appends_the_rest() {
        let mut snapshot = demo_snapshot().unwrap();
        let mut replacement = snapshot.employees[0].clone();
        replacement.risk_score = 30;
        let mut newcomer = snapshot.employees[1].clone();
        newcomer.id = "9999".to_string();

        let merged = merge_records(&mut snapshot, vec![replacement, newcomer]);
        assert_eq!(merged, 2);
        assert_eq!(snapshot.employees.len(), 6);
        assert_eq!(snapshot.employees[0].risk_score, 30);
        assert_eq!(snapshot.employees[5].id, "9999");
    }
}
