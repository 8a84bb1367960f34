use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod aggregate;
mod auth;
mod feed;
mod filter;
mod models;
mod nav;
mod report;
mod risk;
mod session;

use crate::auth::DemoCredentials;
use crate::filter::{DepartmentFilter, FilterCriteria, RiskFilter};
use crate::models::{Identity, Role, WellnessSnapshot};
use crate::nav::{DashboardView, Route, RouteAccess};
use crate::session::{FileStore, SessionManager};

#[derive(Parser)]
#[command(name = "burnout-tracker")]
#[command(about = "Workplace wellness burnout risk tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the demo metrics snapshot
    Seed,
    /// Import employee metrics from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Sign in with email and password
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a demo account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_parser = ["manager", "employee"], default_value = "employee")]
        role: String,
        /// Consent to collection and analysis of communication and activity data
        #[arg(long)]
        consent: bool,
    },
    /// Sign out and clear the persisted session
    Signout,
    /// Show the current session and its navigation
    Whoami,
    /// Show the dashboard for the signed-in role
    Dashboard,
    /// List employees with optional filters
    Employees {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all", value_parser = ["all", "low", "medium", "high"])]
        risk: String,
        #[arg(long, default_value = "all")]
        department: String,
    },
    /// Show team insights and metrics
    Insights,
    /// Generate a markdown wellness report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let data_dir = data_dir()?;
    let snapshot_path = data_dir.join(feed::SNAPSHOT_FILE);
    let mut sessions = SessionManager::new(DemoCredentials, FileStore::new(&data_dir));

    match cli.command {
        Commands::Seed => {
            let snapshot = feed::demo_snapshot()?;
            feed::write_snapshot(&snapshot_path, &snapshot)?;
            println!("Demo snapshot written to {}.", snapshot_path.display());
        }
        Commands::Import { csv } => {
            let incoming = feed::import_csv(&csv)?;
            let mut snapshot = read_snapshot(&snapshot_path)?;
            let count = feed::merge_records(&mut snapshot, incoming);
            snapshot.generated_at = Utc::now();
            feed::write_snapshot(&snapshot_path, &snapshot)?;
            println!("Imported {count} employee records from {}.", csv.display());
        }
        Commands::Signin { email, password } => {
            match sessions.sign_in(&email, &password).await {
                Ok(identity) => {
                    println!("Signed in as {} ({}).", identity.email, identity.role.as_str());
                }
                Err(err) => {
                    println!("{err}");
                    println!(
                        "Demo accounts: {}/{} or {}/{}",
                        auth::MANAGER_EMAIL,
                        auth::MANAGER_PASSWORD,
                        auth::EMPLOYEE_EMAIL,
                        auth::EMPLOYEE_PASSWORD
                    );
                }
            }
        }
        Commands::Signup {
            email,
            password,
            role,
            consent,
        } => {
            let role = Role::from_str_or_default(&role);
            match sessions.sign_up(&email, &password, role, consent).await {
                Ok(identity) => {
                    println!(
                        "Account created. Signed in as {} ({}).",
                        identity.email,
                        identity.role.as_str()
                    );
                }
                Err(err) => println!("{err}"),
            }
        }
        Commands::Signout => {
            sessions.restore_session().await;
            sessions.sign_out().await;
            println!("Signed out.");
        }
        Commands::Whoami => match sessions.restore_session().await {
            Some(identity) => {
                println!("{} ({})", identity.email, identity.role.as_str());
                println!("Navigation:");
                for item in nav::navigation_for(Some(identity.role)) {
                    println!("- {} ({})", item.title, item.route.path());
                }
                println!("Accessible routes:");
                for route in Route::ALL {
                    if nav::route_access(route, Some(&identity)) == RouteAccess::Granted {
                        println!("- {}", route.path());
                    }
                }
            }
            None => println!("Not signed in. Use the signin or signup command."),
        },
        Commands::Dashboard => {
            sessions.restore_session().await;
            require_route(sessions.current(), Route::Dashboard)?;
            let snapshot = read_snapshot(&snapshot_path)?;
            match nav::dashboard_for(sessions.role()) {
                DashboardView::Manager => print!("{}", report::render_team_overview(&snapshot)),
                DashboardView::Employee => {
                    print!("{}", report::render_personal_dashboard(&snapshot.personal))
                }
            }
        }
        Commands::Employees {
            search,
            risk,
            department,
        } => {
            sessions.restore_session().await;
            require_route(sessions.current(), Route::Employees)?;
            let snapshot = read_snapshot(&snapshot_path)?;
            let criteria = FilterCriteria {
                search_text: search,
                risk: RiskFilter::parse(&risk),
                department: DepartmentFilter::parse(&department),
            };
            let visible = filter::apply(&snapshot.employees, &criteria);
            print!("{}", report::render_employee_list(&visible));
            println!(
                "Departments: {}",
                filter::distinct_departments(&snapshot.employees).join(", ")
            );
        }
        Commands::Insights => {
            sessions.restore_session().await;
            require_route(sessions.current(), Route::Insights)?;
            let snapshot = read_snapshot(&snapshot_path)?;
            print!("{}", report::render_insights(&snapshot));
        }
        Commands::Report { out } => {
            sessions.restore_session().await;
            // The report is the file rendition of the manager-only views.
            require_route(sessions.current(), Route::Insights)?;
            let snapshot = read_snapshot(&snapshot_path)?;
            let rendered = report::build_team_report(&snapshot);
            std::fs::write(&out, rendered)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("BURNOUT_TRACKER_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_local_dir().context("could not determine a local data directory")?;
    Ok(base.join("burnout-tracker"))
}

fn read_snapshot(path: &Path) -> anyhow::Result<WellnessSnapshot> {
    feed::load_snapshot(path).context("no metrics snapshot found; run the seed command first")
}

fn require_route(identity: Option<&Identity>, route: Route) -> anyhow::Result<()> {
    match nav::route_access(route, identity) {
        RouteAccess::Granted => Ok(()),
        RouteAccess::AuthRequired => {
            anyhow::bail!("sign in first: this view requires an active session")
        }
        RouteAccess::ManagerOnly => anyhow::bail!("this view is only available to managers"),
    }
}
