use std::path::PathBuf;

use waku_board_patch::{api, hwid::HwidPair, operation::PatchEvent, ports};

use crate::cli;

pub mod human;
pub mod json;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub verbose: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct ApplySummary {
    pub destination: PathBuf,
    pub created: bool,
    pub dry_run: bool,
    pub cxx_flags: Vec<String>,
    pub hwids: Vec<HwidPair>,
}

#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The (vid, pid) pairs the scan matched on.
    pub pairs: Vec<(u16, u16)>,
    /// Every USB serial port seen in the final scan.
    pub ports: Vec<ports::DetectedPort>,
    /// Indices into `ports` that matched.
    pub matched: Vec<usize>,
    pub waited_ms: u64,
}

#[derive(Debug, Clone)]
pub enum Event {
    Operation(PatchEvent),
    Apply(ApplySummary),
    Show(api::ManifestReport),
    ListPorts {
        ports: Vec<ports::DetectedPort>,
        matched: Vec<usize>,
    },
    CheckScan {
        ports: usize,
        matched: usize,
    },
    Check(CheckReport),
    Error {
        code: i32,
        message: String,
    },
}

pub trait Reporter {
    fn emit(&mut self, event: Event);
    fn finish(&mut self);
}

pub fn make_for_apply(args: &cli::ApplyArgs) -> Box<dyn Reporter> {
    let opts = OutputOptions {
        verbose: args.verbose,
        quiet: args.quiet,
    };
    if args.json {
        Box::new(json::JsonOutput::new(opts))
    } else {
        Box::new(human::HumanOutput::new(opts))
    }
}

pub fn make_for_show(args: &cli::ShowArgs) -> Box<dyn Reporter> {
    let opts = OutputOptions {
        verbose: false,
        quiet: false,
    };
    if args.json {
        Box::new(json::JsonOutput::new(opts))
    } else {
        Box::new(human::HumanOutput::new(opts))
    }
}

pub fn make_for_list(args: &cli::ListArgs) -> Box<dyn Reporter> {
    let opts = OutputOptions {
        verbose: false,
        quiet: false,
    };
    if args.json {
        Box::new(json::JsonOutput::new(opts))
    } else {
        Box::new(human::HumanOutput::new(opts))
    }
}

pub fn make_for_check(args: &cli::CheckArgs) -> Box<dyn Reporter> {
    let opts = OutputOptions {
        verbose: args.verbose,
        quiet: false,
    };
    if args.json {
        Box::new(json::JsonOutput::new(opts))
    } else {
        Box::new(human::HumanOutput::new(opts).with_wait(args.wait))
    }
}

pub fn port_to_value(index: usize, p: &ports::DetectedPort, matched: bool) -> serde_json::Value {
    let mut v = serde_json::to_value(p)
        .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
    if let serde_json::Value::Object(obj) = &mut v {
        obj.insert("index".to_string(), serde_json::Value::from(index as u64));
        obj.insert("port_id".to_string(), serde_json::Value::from(p.id()));
        obj.insert("matched".to_string(), serde_json::Value::from(matched));
    }
    v
}

pub fn format_port_line(index: usize, p: &ports::DetectedPort, matched: bool) -> String {
    format!(
        "[{index}] {} {:04X}:{:04X}{} {}",
        p.id(),
        p.vid,
        p.pid,
        if matched { " *" } else { "" },
        p.product.as_deref().unwrap_or("")
    )
}
