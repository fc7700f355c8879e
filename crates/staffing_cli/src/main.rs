//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the configured store to verify `staffing_core` wiring.
//! - Print a deterministic summary for quick local sanity checks.

use staffing_core::{
    core_version, init_logging, CoreConfig, EmployeeService, ProjectService,
    SqliteEmployeeRepository, SqliteProjectRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("staffing_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    let conn = config.open_db()?;
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let employees = EmployeeService::new(
        SqliteEmployeeRepository::new(&conn),
        SqliteProjectRepository::new(&conn),
    );

    let project_count = projects.find_all()?.len();
    let employee_count = employees.find_all()?.len();
    log::info!(
        "event=cli_summary module=cli status=ok projects={project_count} employees={employee_count}"
    );

    println!("staffing_core version={}", core_version());
    println!(
        "store={}",
        config
            .db_path
            .as_deref()
            .map_or_else(|| "memory".to_string(), |path| path.display().to_string())
    );
    println!("projects={project_count} employees={employee_count}");
    Ok(())
}
