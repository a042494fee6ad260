use waku_board_patch::{patch::BoardPatch, ports};

use crate::cli;
use crate::exit_codes;
use crate::output::{Event, Reporter};

pub fn run(_args: cli::ListArgs, out: &mut dyn Reporter) -> i32 {
    let pairs = match BoardPatch::waku().id_pairs() {
        Ok(pairs) => pairs,
        Err(e) => {
            out.emit(Event::Error {
                code: exit_codes::EXIT_UNEXPECTED,
                message: e.to_string(),
            });
            return exit_codes::EXIT_UNEXPECTED;
        }
    };

    match ports::discover_ports() {
        Ok(detected) => {
            let matched = ports::matching_ports(&detected, &pairs);
            out.emit(Event::ListPorts {
                ports: detected,
                matched,
            });
            exit_codes::EXIT_OK
        }
        Err(e) => {
            out.emit(Event::Error {
                code: exit_codes::EXIT_UNEXPECTED,
                message: e.to_string(),
            });
            exit_codes::EXIT_UNEXPECTED
        }
    }
}
