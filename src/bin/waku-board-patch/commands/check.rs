use std::time::{Duration, Instant};

use waku_board_patch::ports;

use crate::cli;
use crate::context;
use crate::exit_codes;
use crate::output::{CheckReport, Event, Reporter};

pub fn run(args: cli::CheckArgs, out: &mut dyn Reporter) -> i32 {
    let patch = context::patch_from_args(&args.hwid, &[]);
    let pairs = match patch.id_pairs() {
        Ok(pairs) => pairs,
        Err(e) => {
            out.emit(Event::Error {
                code: exit_codes::EXIT_UNEXPECTED,
                message: e.to_string(),
            });
            return exit_codes::EXIT_UNEXPECTED;
        }
    };

    let wait_timeout = context::wait_timeout(args.wait_timeout_ms);
    let start = Instant::now();

    loop {
        let scanned = match ports::discover_ports() {
            Ok(p) => p,
            Err(e) => {
                out.emit(Event::Error {
                    code: exit_codes::EXIT_UNEXPECTED,
                    message: e.to_string(),
                });
                return exit_codes::EXIT_UNEXPECTED;
            }
        };
        let matched = ports::matching_ports(&scanned, &pairs);
        out.emit(Event::CheckScan {
            ports: scanned.len(),
            matched: matched.len(),
        });

        let timed_out = wait_timeout.is_some_and(|t| start.elapsed() >= t);
        if !matched.is_empty() || !args.wait || timed_out {
            let found = !matched.is_empty();
            out.emit(Event::Check(CheckReport {
                pairs,
                ports: scanned,
                matched,
                waited_ms: start.elapsed().as_millis() as u64,
            }));
            return if found {
                exit_codes::EXIT_OK
            } else {
                exit_codes::EXIT_NO_DEVICE
            };
        }

        std::thread::sleep(Duration::from_millis(250));
    }
}
