use crate::models::{Identity, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Auth,
    Dashboard,
    Employees,
    Insights,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Landing,
        Route::Auth,
        Route::Dashboard,
        Route::Employees,
        Route::Insights,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Auth => "/auth",
            Route::Dashboard => "/dashboard",
            Route::Employees => "/employees",
            Route::Insights => "/insights",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub route: Route,
}

const MANAGER_ITEMS: [NavItem; 3] = [
    NavItem {
        title: "Team Overview",
        route: Route::Dashboard,
    },
    NavItem {
        title: "Employee Details",
        route: Route::Employees,
    },
    NavItem {
        title: "Insights",
        route: Route::Insights,
    },
];

const EMPLOYEE_ITEMS: [NavItem; 1] = [NavItem {
    title: "My Dashboard",
    route: Route::Dashboard,
}];

/// A missing or unknown role sees the employee navigation.
pub fn navigation_for(role: Option<Role>) -> &'static [NavItem] {
    match role {
        Some(Role::Manager) => &MANAGER_ITEMS,
        _ => &EMPLOYEE_ITEMS,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Manager,
    Employee,
}

pub fn dashboard_for(role: Option<Role>) -> DashboardView {
    match role {
        Some(Role::Manager) => DashboardView::Manager,
        _ => DashboardView::Employee,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Granted,
    AuthRequired,
    ManagerOnly,
}

pub fn route_access(route: Route, identity: Option<&Identity>) -> RouteAccess {
    match route {
        Route::Landing | Route::Auth => RouteAccess::Granted,
        Route::Dashboard => match identity {
            Some(_) => RouteAccess::Granted,
            None => RouteAccess::AuthRequired,
        },
        Route::Employees | Route::Insights => match identity {
            Some(identity) if identity.role == Role::Manager => RouteAccess::Granted,
            Some(_) => RouteAccess::ManagerOnly,
            None => RouteAccess::AuthRequired,
        },
    }
}
