//! Open and close the configured source database once.

use hr_analytics::config::Config;
use hr_analytics::source::SqliteSource;
use std::process::ExitCode;

fn main() -> ExitCode {
    hr_analytics::init_tracing();

    let result = Config::from_env().and_then(|config| {
        let conn = SqliteSource::new(config.source).connect()?;
        conn.query("SELECT 1", &[])?;
        conn.close()
    });

    match result {
        Ok(()) => {
            println!("Success - Connect!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error - Not Connect! {e}");
            ExitCode::FAILURE
        }
    }
}
