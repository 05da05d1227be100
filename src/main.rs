use tracing::info;

use userseed::config;
use userseed::core::{Result, SeedError};
use userseed::db::{NewUser, Session};

/// Runs the seeding pipeline: load config, connect, set charset, insert
/// the demo row, print the outcome. The session handle is released when
/// it goes out of scope, on failure paths included.
fn run() -> Result<()> {
    // Logs go to stderr; stdout carries only the two result lines.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SeedError::Init(e.to_string()))?;

    let args: Vec<String> = std::env::args().collect();
    let config = config::resolve(args.get(1).map(String::as_str))?;

    let mut session = Session::connect(&config)?;
    session.set_utf8();

    let outcome = session.insert_user(&NewUser::sample())?;
    info!(
        affected_rows = outcome.affected_rows,
        last_insert_id = outcome.last_insert_id,
        "insert complete"
    );

    println!("Inserted {} row(s)", outcome.affected_rows);
    println!("Last insert id: {}", outcome.last_insert_id);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
