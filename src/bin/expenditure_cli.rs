use std::{env, process};

use chrono::Local;
use expenditure_core::{cli::run_cli, init};

fn main() {
    init();

    let today = Local::now().date_naive();
    match run_cli(env::args().skip(1), today) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}
