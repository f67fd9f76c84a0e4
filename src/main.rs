use std::process::exit;

use signalboard::app::{self, Status};

fn main() {
    match app::run_cli() {
        Ok(Status::Shown) => {}
        Ok(Status::LoadFailed) => exit(2),
        Err(e) => {
            eprintln!("error: {e}");
            exit(1);
        }
    }
}
