extern crate anyhow;
extern crate chrono;
extern crate flexi_logger;
extern crate getopts;
#[macro_use]
extern crate log;
extern crate reqwest;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

mod arrivals;
mod mbta;
mod poller;
mod result;

use std::io::Write;
use std::sync::mpsc;

// Last-seen values per station; a station whose fetch failed keeps showing
// whatever it showed last cycle.
struct Board {
    slots: [[String; 2]; 3],
    stopped: [&'static str; 3],
    delayed: [&'static str; 3],
}

impl Board {
    fn new() -> Board {
        return Board{
            slots: Default::default(),
            stopped: [poller::STYLE_NORMAL; 3],
            delayed: [poller::STYLE_NORMAL; 3],
        };
    }

    fn apply(&mut self, update: &poller::StationUpdate) {
        match update {
            poller::StationUpdate::ArrivalText{ station, slot, text } => {
                self.slots[*station][*slot] = text.clone();
            },
            poller::StationUpdate::StoppedStyle{ station, style } => {
                self.stopped[*station] = style;
            },
            poller::StationUpdate::DelayedStyle{ station, style } => {
                self.delayed[*station] = style;
            },
            poller::StationUpdate::CountdownTick(_) => {},
        }
    }

    fn print(&self) {
        println!("");
        for (station, endpoint) in mbta::STATIONS.iter().enumerate() {
            println!("{:<18}{:>12}{:>12}   stopped: {:<5} delayed: {:<5}",
                     endpoint.name,
                     self.slots[station][0],
                     self.slots[station][1],
                     style_marker(self.stopped[station]),
                     style_marker(self.delayed[station]));
        }
    }
}

fn style_marker(style: &str) -> &'static str {
    if style == poller::STYLE_ALERT {
        return "ALERT";
    }
    return "ok";
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = getopts::Options::new();
    opts.optflag("o", "one-shot", "run a single fetch cycle and exit");
    opts.optflag("h", "help", "print this help");

    let matches = opts.parse(&args[1..]).expect("parse opts");
    if matches.opt_present("help") {
        print!("{}", opts.usage("Usage: greendash [options]"));
        return;
    }
    let one_shot = matches.opt_present("one-shot");

    flexi_logger::Logger::try_with_env_or_str("info")
        .expect("logger spec")
        .start()
        .expect("logger start");

    info!("Running. one-shot={}", one_shot);

    let (sender, receiver) = mpsc::channel();

    let worker = std::thread::spawn(move || {
        if one_shot {
            if let Err(err) = poller::run_cycle(&sender) {
                error!("{}", err);
            }
            return;
        }
        poller::run_forever(sender);
    });

    let mut board = Board::new();
    for update in &receiver {
        board.apply(&update);
        if let poller::StationUpdate::CountdownTick(remaining) = update {
            if remaining == poller::REFRESH_SECONDS {
                board.print();
            }
            print!("\r  next refresh in {:>2}s ", remaining);
            let _ = std::io::stdout().flush();
        }
    }

    // Channel closed: in one-shot mode that's the normal end of the cycle.
    if one_shot {
        board.print();
    }
    worker.join().expect("poller thread");
}
