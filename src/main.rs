//! rTimesheet main entrypoint.

use rtimesheet::run;
use rtimesheet::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
