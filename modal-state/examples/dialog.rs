// Example: Dialog
//
// Drives a single modal through a scripted sequence of clicks:
// - Initial state from the first argument ("open" / "closed")
// - Several clicks between two renders, batched into one tick
// - Logging to dialog.log
//
// cargo run -p modal-state --example dialog -- open

use std::convert::Infallible;
use std::fs::File;

use modal_state::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

/// Clicks delivered before each render, in order.
const SCRIPT: &[&[&str]] = &[
    &["toggle"],
    &["toggle", "toggle", "toggle"],
    &["open", "open"],
    &["close"],
];

fn render(controls: &ModalControls) {
    if controls.is_open {
        println!("+--------------------+");
        println!("| Dialog       [x]   |");
        println!("+--------------------+");
    } else {
        println!("[ Open dialog ]");
    }
}

#[tokio::main]
async fn main() {
    let log_file = File::create("dialog.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let initial = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<ModalStatus>() {
            Ok(status) => status,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        },
        None => ModalStatus::Closed,
    };

    let dialog = ModalState::with_config(ModalConfig::new("dialog").initial(initial));
    let mut scheduler = Scheduler::new();
    scheduler.attach(dialog.state());

    let mut step = 0;
    let result = scheduler
        .run(|| {
            let controls = dialog.controls();
            println!("-- render {} ({})", step, dialog.status());
            render(&controls);

            let Some(clicks) = SCRIPT.get(step) else {
                return Ok::<_, Infallible>(Flow::Exit);
            };
            step += 1;
            for click in *clicks {
                println!("   click: {}", click);
                match *click {
                    "open" => (controls.on_open)(),
                    "close" => (controls.on_close)(),
                    _ => (controls.on_toggle)(),
                }
            }
            Ok(Flow::Continue)
        })
        .await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
}
