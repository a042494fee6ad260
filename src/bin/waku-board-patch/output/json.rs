use std::collections::BTreeMap;

use waku_board_patch::operation::PatchEvent;

use crate::output::{
    port_to_value, ApplySummary, CheckReport, Event, OutputOptions, Reporter,
};

#[derive(serde::Serialize)]
pub struct JsonEvent {
    schema: u32,
    event: &'static str,
    #[serde(flatten)]
    fields: BTreeMap<&'static str, serde_json::Value>,
}

impl JsonEvent {
    pub fn status(event: &'static str) -> Self {
        Self {
            schema: 1,
            event,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_u64(mut self, k: &'static str, v: u64) -> Self {
        self.fields.insert(k, serde_json::Value::from(v));
        self
    }

    pub fn with_bool(mut self, k: &'static str, v: bool) -> Self {
        self.fields.insert(k, serde_json::Value::from(v));
        self
    }

    pub fn with_str(mut self, k: &'static str, v: &str) -> Self {
        self.fields.insert(k, serde_json::Value::from(v));
        self
    }

    pub fn with_value(mut self, k: &'static str, v: serde_json::Value) -> Self {
        self.fields.insert(k, v);
        self
    }
}

pub struct JsonOutput {
    opts: OutputOptions,
}

impl JsonOutput {
    pub fn new(opts: OutputOptions) -> Self {
        Self { opts }
    }

    fn json_event(&mut self, ev: JsonEvent) {
        println!(
            "{}",
            serde_json::to_string(&ev).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn error_event(&mut self, code: i32, msg: &str) {
        self.json_event(
            JsonEvent::status("error")
                .with_u64("code", code as u64)
                .with_str("message", msg),
        );

        if self.opts.verbose {
            eprintln!("error: {msg}");
        }
    }
}

impl Reporter for JsonOutput {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Operation(ev) => {
                let ev = patch_event_to_json(ev);
                self.json_event(ev);
            }
            Event::Apply(summary) => self.json_event(apply_to_json(summary)),
            Event::Show(report) => {
                self.json_event(
                    JsonEvent::status("show")
                        .with_str("path", &report.path.display().to_string())
                        .with_u64("keys", report.keys as u64)
                        .with_value(
                            "hwids",
                            report.hwids.unwrap_or(serde_json::Value::Null),
                        )
                        .with_bool("patched", report.patched),
                );
            }
            Event::ListPorts { ports, matched } => {
                self.json_event(
                    JsonEvent::status("list")
                        .with_u64("count", ports.len() as u64)
                        .with_value(
                            "ports",
                            serde_json::Value::Array(
                                ports
                                    .iter()
                                    .enumerate()
                                    .map(|(i, p)| port_to_value(i, p, matched.contains(&i)))
                                    .collect(),
                            ),
                        ),
                );
            }
            Event::CheckScan { ports, matched } => {
                self.json_event(
                    JsonEvent::status("scan")
                        .with_u64("ports", ports as u64)
                        .with_u64("matched", matched as u64),
                );
            }
            Event::Check(report) => self.json_event(check_to_json(report)),
            Event::Error { code, message } => self.error_event(code, &message),
        }
    }

    fn finish(&mut self) {}
}

pub(crate) fn patch_event_to_json(ev: PatchEvent) -> JsonEvent {
    match ev {
        PatchEvent::ManifestLoaded { path, keys } => JsonEvent::status("manifest_loaded")
            .with_str("path", &path.display().to_string())
            .with_u64("keys", keys as u64),
        PatchEvent::ManifestMissing { path } => JsonEvent::status("manifest_missing")
            .with_str("path", &path.display().to_string()),
        PatchEvent::FlagsAppended { scope, flags, total } => JsonEvent::status("flags_appended")
            .with_str("scope", scope.as_str())
            .with_value(
                "flags",
                serde_json::Value::Array(
                    flags.into_iter().map(serde_json::Value::from).collect(),
                ),
            )
            .with_u64("total", total as u64),
        PatchEvent::HwidsSet { key, pairs } => JsonEvent::status("hwids_set")
            .with_str("key", &key)
            .with_value(
                "hwids",
                serde_json::Value::Array(pairs.iter().map(|p| p.to_value()).collect()),
            ),
        PatchEvent::ManifestWritten { path, bytes } => JsonEvent::status("manifest_written")
            .with_str("path", &path.display().to_string())
            .with_u64("bytes", bytes as u64),
    }
}

pub(crate) fn apply_to_json(summary: ApplySummary) -> JsonEvent {
    JsonEvent::status("apply")
        .with_str("destination", &summary.destination.display().to_string())
        .with_bool("created", summary.created)
        .with_bool("dry_run", summary.dry_run)
        .with_value(
            "cxx_flags",
            serde_json::Value::Array(
                summary
                    .cxx_flags
                    .into_iter()
                    .map(serde_json::Value::from)
                    .collect(),
            ),
        )
        .with_value(
            "hwids",
            serde_json::Value::Array(summary.hwids.iter().map(|p| p.to_value()).collect()),
        )
}

pub(crate) fn check_to_json(report: CheckReport) -> JsonEvent {
    JsonEvent::status("check")
        .with_bool("found", !report.matched.is_empty())
        .with_u64("waited_ms", report.waited_ms)
        .with_value(
            "ids",
            serde_json::Value::Array(
                report
                    .pairs
                    .iter()
                    .map(|&(vid, pid)| {
                        serde_json::Value::from(format!("{vid:04X}:{pid:04X}"))
                    })
                    .collect(),
            ),
        )
        .with_value(
            "ports",
            serde_json::Value::Array(
                report
                    .matched
                    .iter()
                    .map(|&i| port_to_value(i, &report.ports[i], true))
                    .collect(),
            ),
        )
}
