use std::error::Error;

use cf_stats_merge::{run, Config};

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::default();
    run(&config)?;

    println!("New spreadsheet created successfully.");

    Ok(())
}
