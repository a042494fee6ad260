use waku_board_patch::operation::PatchEvent;

use crate::output::{format_port_line, CheckReport, Event, OutputOptions, Reporter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Quiet,
    Verbose,
    Normal,
}

pub struct HumanOutput {
    opts: OutputOptions,
    wait_enabled: bool,
    waiting_printed: bool,
}

impl HumanOutput {
    pub fn new(opts: OutputOptions) -> Self {
        Self {
            opts,
            wait_enabled: false,
            waiting_printed: false,
        }
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait_enabled = wait;
        self
    }

    fn mode(&self) -> Mode {
        if self.opts.quiet {
            Mode::Quiet
        } else if self.opts.verbose {
            Mode::Verbose
        } else {
            Mode::Normal
        }
    }

    fn println(&self, msg: &str) {
        if self.mode() == Mode::Quiet {
            return;
        }
        eprintln!("{msg}");
    }

    fn on_patch_event(&mut self, ev: PatchEvent) {
        match ev {
            PatchEvent::ManifestLoaded { path, keys } => {
                if self.mode() == Mode::Verbose {
                    self.println(&format!("manifest: {} ({keys} keys)", path.display()));
                }
            }
            PatchEvent::ManifestMissing { path } => {
                self.println(&format!(
                    "manifest {} missing, starting empty",
                    path.display()
                ));
            }
            PatchEvent::FlagsAppended { scope, flags, total } => {
                self.println(&format!(
                    "append {}: {} ({total} total)",
                    scope.as_str(),
                    flags.join(" ")
                ));
            }
            PatchEvent::HwidsSet { key, pairs } => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|p| format!("{}:{}", p.vid, p.pid))
                    .collect();
                self.println(&format!("set {key} = [{}]", pairs.join(", ")));
            }
            PatchEvent::ManifestWritten { path, bytes } => {
                self.println(&format!("wrote {} ({bytes} bytes)", path.display()));
            }
        }
    }

    fn on_check_report(&mut self, report: CheckReport) {
        let ids: Vec<String> = report
            .pairs
            .iter()
            .map(|(vid, pid)| format!("{vid:04X}:{pid:04X}"))
            .collect();
        let ids = ids.join(", ");

        if report.matched.is_empty() {
            self.println(&format!("No device matching {ids} found"));
            return;
        }

        for &i in &report.matched {
            let p = &report.ports[i];
            self.println(&format!(
                "Found {} {:04X}:{:04X} {}",
                p.id(),
                p.vid,
                p.pid,
                p.product.as_deref().unwrap_or("")
            ));
        }
    }
}

impl Reporter for HumanOutput {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Operation(ev) => self.on_patch_event(ev),
            Event::Apply(summary) => {
                if summary.dry_run {
                    self.println("Dry run OK");
                    self.println(&format!("Would write {}", summary.destination.display()));
                }
            }
            Event::Show(report) => {
                self.println(&format!(
                    "{}: {} keys",
                    report.path.display(),
                    report.keys
                ));
                match &report.hwids {
                    Some(v) => self.println(&format!("build.hwids = {v}")),
                    None => self.println("build.hwids not set"),
                }
                self.println(if report.patched {
                    "patch applied"
                } else {
                    "patch not applied"
                });
            }
            Event::ListPorts { ports, matched } => {
                if ports.is_empty() {
                    self.println("No USB serial ports found");
                } else {
                    for (i, p) in ports.iter().enumerate() {
                        self.println(&format_port_line(i, p, matched.contains(&i)));
                    }
                }
            }
            Event::CheckScan { ports, matched } => {
                if matched == 0 && self.wait_enabled && !self.waiting_printed {
                    self.println("waiting for device... (use --wait-timeout-ms to limit)");
                    self.waiting_printed = true;
                }
                if self.mode() == Mode::Verbose {
                    self.println(&format!("scan: {ports} port(s), {matched} matching"));
                }
            }
            Event::Check(report) => self.on_check_report(report),
            Event::Error { code: _, message } => {
                eprintln!("error: {message}");
            }
        }
    }

    fn finish(&mut self) {}
}
