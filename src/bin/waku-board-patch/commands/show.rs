use waku_board_patch::{api, patch::BoardPatch};

use crate::cli;
use crate::commands::apply::map_apply_error;
use crate::exit_codes;
use crate::output::{Event, Reporter};

pub fn run(args: cli::ShowArgs, out: &mut dyn Reporter) -> i32 {
    match api::inspect_manifest(&args.manifest, &BoardPatch::waku()) {
        Ok(report) => {
            out.emit(Event::Show(report));
            exit_codes::EXIT_OK
        }
        Err(e) => {
            let code = map_apply_error(&e);
            out.emit(Event::Error {
                code,
                message: e.to_string(),
            });
            code
        }
    }
}
