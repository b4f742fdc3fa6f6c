//! agavelog main entrypoint.

use agavelog::run;

fn main() {
    if let Err(e) = run() {
        agavelog::ui::messages::error(e);
        std::process::exit(1);
    }
}
