use crate::models::EmployeeRecord;
use crate::risk::RiskLevel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RiskFilter {
    #[default]
    All,
    Level(RiskLevel),
}

impl RiskFilter {
    /// Case-insensitive; anything but a known level means "all".
    pub fn parse(value: &str) -> RiskFilter {
        match value.to_lowercase().as_str() {
            "low" => RiskFilter::Level(RiskLevel::Low),
            "medium" => RiskFilter::Level(RiskLevel::Medium),
            "high" => RiskFilter::Level(RiskLevel::High),
            _ => RiskFilter::All,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DepartmentFilter {
    #[default]
    All,
    Named(String),
}

impl DepartmentFilter {
    pub fn parse(value: &str) -> DepartmentFilter {
        if value.eq_ignore_ascii_case("all") {
            DepartmentFilter::All
        } else {
            DepartmentFilter::Named(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub risk: RiskFilter,
    pub department: DepartmentFilter,
}

/// Order-preserving subsequence of the input; an empty result is a valid
/// "no matches" state, not an error.
pub fn apply(records: &[EmployeeRecord], criteria: &FilterCriteria) -> Vec<EmployeeRecord> {
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect()
}

fn matches(record: &EmployeeRecord, criteria: &FilterCriteria) -> bool {
    matches_search(record, &criteria.search_text)
        && matches_risk(record, criteria.risk)
        && matches_department(record, &criteria.department)
}

fn matches_search(record: &EmployeeRecord, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    record.name.to_lowercase().contains(&needle)
        || record.department.to_lowercase().contains(&needle)
        || record.title.to_lowercase().contains(&needle)
}

fn matches_risk(record: &EmployeeRecord, filter: RiskFilter) -> bool {
    match filter {
        RiskFilter::All => true,
        RiskFilter::Level(level) => record.risk_level() == level,
    }
}

fn matches_department(record: &EmployeeRecord, filter: &DepartmentFilter) -> bool {
    match filter {
        DepartmentFilter::All => true,
        DepartmentFilter::Named(department) => record.department == *department,
    }
}

/// Derived fresh from the current collection, first-seen order.
pub fn distinct_departments(records: &[EmployeeRecord]) -> Vec<String> {
    let mut departments: Vec<String> = Vec::new();
    for record in records {
        if !departments.iter().any(|known| known == &record.department) {
            departments.push(record.department.clone());
        }
    }
    departments
}
