use waku_board_patch::{api, env::FlagScope};

use crate::cli;
use crate::context;
use crate::exit_codes;
use crate::output::{ApplySummary, Event, Reporter};

pub fn run(args: cli::ApplyArgs, out: &mut dyn Reporter) -> i32 {
    let patch = context::patch_from_args(&args.hwid, &args.flags);
    let opts = api::ApplyOptions {
        create_missing: args.create,
        output: args.out.clone(),
    };

    let r = if args.dry_run {
        api::plan_patch(&args.manifest, &patch, &opts, |ev| {
            out.emit(Event::Operation(ev))
        })
    } else {
        api::apply_patch(&args.manifest, &patch, &opts, |ev| {
            out.emit(Event::Operation(ev))
        })
    };

    match r {
        Ok(plan) => {
            out.emit(Event::Apply(ApplySummary {
                destination: plan.destination,
                created: plan.created,
                dry_run: args.dry_run,
                cxx_flags: plan.env.flags(FlagScope::Cxx).to_vec(),
                hwids: patch.hwids.clone(),
            }));
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

pub(crate) fn map_apply_error(e: &api::ApplyError) -> i32 {
    match e.kind() {
        api::ApplyErrorKind::InvalidManifest => exit_codes::EXIT_INVALID_MANIFEST,
        api::ApplyErrorKind::KeyConflict => exit_codes::EXIT_KEY_CONFLICT,
        api::ApplyErrorKind::WriteFailed => exit_codes::EXIT_WRITE_FAILED,
    }
}
