use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::risk::{BadgeVariant, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// Anything unrecognized resolves to Employee, so every signed-in user
    /// lands on exactly one of the two known roles.
    pub fn from_str_or_default(value: &str) -> Role {
        match value {
            "manager" => Role::Manager,
            _ => Role::Employee,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub department: String,
    pub title: String,
    pub risk_score: u8,
    pub sentiment_trend: i32,
    pub productivity_score: u8,
    pub last_activity: DateTime<Utc>,
    pub recent_changes: Vec<String>,
}

impl EmployeeRecord {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::classify(self.risk_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn badge_variant(self) -> BadgeVariant {
        match self {
            Priority::Urgent => BadgeVariant::Critical,
            Priority::Medium => BadgeVariant::Caution,
            Priority::Low => BadgeVariant::Positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub category: String,
    pub impact: RiskLevel,
    pub trend: i32,
    pub affected_count: u32,
    pub recommendations: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub employee: String,
    pub risk_level: RiskLevel,
    pub reason: String,
    pub noted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMetrics {
    pub avg_risk_score: u8,
    pub risk_trend: i32,
    pub satisfaction_score: u8,
    pub retention_risk: u8,
    pub burnout_prevention: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub day: String,
    pub sentiment: u8,
    pub productivity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalSnapshot {
    pub risk_score: u8,
    pub sentiment_trend: i32,
    pub productivity_score: u8,
    pub weekly_hours: u32,
    pub recommendations: Vec<String>,
    pub weekly: Vec<DailyMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessSnapshot {
    pub generated_at: DateTime<Utc>,
    pub employees: Vec<EmployeeRecord>,
    pub insights: Vec<Insight>,
    pub alerts: Vec<Alert>,
    pub team_metrics: TeamMetrics,
    pub personal: PersonalSnapshot,
}
