// SPDX-License-Identifier: MPL-2.0
use dialog_preview::config;
use dialog_preview::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsCollector};
use dialog_preview::domain::channels::{ChannelOutcome, ChannelRole};
use dialog_preview::domain::preview::{Preview, PreviewContent, PreviewMode};
use dialog_preview::error::{ChannelPickerError, Error};
use dialog_preview::i18n::fluent::I18n;
use dialog_preview::infrastructure::TiffPlaneDecoder;
use dialog_preview::preview::PreviewSelector;
use dialog_preview::ui::{ChannelPicker, PreviewPane};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
dialog-preview

USAGE:
  dialog-preview [OPTIONS] preview <PATH>...
  dialog-preview [OPTIONS] channels <PATH> [--select R,G,B | --cancel]

OPTIONS:
  --lang <ID>            UI language (e.g. en-US, fr)
  --config-dir <DIR>     Directory holding settings.toml
  --diagnostics <FILE>   Write a JSON diagnostics report on exit
  -h, --help             Print this help
";

struct Flags {
    lang: Option<String>,
    config_dir: Option<PathBuf>,
    diagnostics: Option<PathBuf>,
}

enum ChannelAction {
    List,
    Select(usize, usize, usize),
    Cancel,
}

enum Command {
    Preview(Vec<PathBuf>),
    Channels { path: PathBuf, action: ChannelAction },
}

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let (flags, command) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let (config, warning) = config::load_with_override(flags.config_dir);
    let mut collector =
        DiagnosticsCollector::new(BufferCapacity::new(config.diagnostics.buffer_capacity));
    if let Some(warning) = warning {
        eprintln!("[WARN] {warning}");
        collector.handle().log_warning(warning);
    }
    let i18n = I18n::new(flags.lang, &config);

    let status = match command {
        Command::Preview(paths) => {
            let selector =
                PreviewSelector::new(&config.preview).with_diagnostics(collector.handle());
            run_preview(&selector, &mut collector, &paths, &i18n)
        }
        Command::Channels { path, action } => {
            let mut picker = match ChannelPicker::open(&TiffPlaneDecoder::new(), &path, &i18n) {
                Ok(picker) => picker,
                Err(err) => {
                    log_open_failure(&collector, &err);
                    eprintln!("{}: {}", i18n.tr(err.i18n_key()), err);
                    return finish(collector, flags.diagnostics, ExitCode::FAILURE);
                }
            };
            picker.set_diagnostics(collector.handle());
            run_channels(&mut picker, action, &i18n)
        }
    };

    finish(collector, flags.diagnostics, status)
}

fn parse_args(mut args: pico_args::Arguments) -> Result<(Flags, Command), String> {
    let flags = Flags {
        lang: args.opt_value_from_str("--lang").map_err(|e| e.to_string())?,
        config_dir: args
            .opt_value_from_os_str("--config-dir", |s| Ok::<_, String>(PathBuf::from(s)))
            .map_err(|e| e.to_string())?,
        diagnostics: args
            .opt_value_from_os_str("--diagnostics", |s| Ok::<_, String>(PathBuf::from(s)))
            .map_err(|e| e.to_string())?,
    };

    let subcommand = args.subcommand().map_err(|e| e.to_string())?;
    let command = match subcommand.as_deref() {
        Some("preview") => {
            let paths = into_paths(args.finish());
            if paths.is_empty() {
                return Err("preview needs at least one path".into());
            }
            Command::Preview(paths)
        }
        Some("channels") => {
            let select: Option<String> =
                args.opt_value_from_str("--select").map_err(|e| e.to_string())?;
            let cancel = args.contains("--cancel");
            let action = match (select, cancel) {
                (Some(_), true) => return Err("--select and --cancel are exclusive".into()),
                (Some(triple), false) => parse_triple(&triple)?,
                (None, true) => ChannelAction::Cancel,
                (None, false) => ChannelAction::List,
            };
            let mut paths = into_paths(args.finish());
            if paths.len() != 1 {
                return Err("channels needs exactly one path".into());
            }
            Command::Channels {
                path: paths.remove(0),
                action,
            }
        }
        Some(other) => return Err(format!("unknown command: {other}")),
        None => return Err("missing command".into()),
    };

    Ok((flags, command))
}

fn into_paths(rest: Vec<OsString>) -> Vec<PathBuf> {
    rest.into_iter().map(PathBuf::from).collect()
}

fn parse_triple(value: &str) -> Result<ChannelAction, String> {
    let indices = value
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid --select value {value:?}: {e}"))?;

    match indices.as_slice() {
        [r, g, b] => Ok(ChannelAction::Select(*r, *g, *b)),
        _ => Err(format!("--select expects three indices, got {value:?}")),
    }
}

fn run_preview(
    selector: &PreviewSelector,
    collector: &mut DiagnosticsCollector,
    paths: &[PathBuf],
    i18n: &I18n,
) -> ExitCode {
    let mut pane = PreviewPane::new();
    let mut status = ExitCode::SUCCESS;

    for path in paths {
        println!("{}", path.display());
        match selector.select_preview(path) {
            Ok(preview) => {
                print_preview(&preview, i18n);
                pane.show(preview);
            }
            Err(err) => {
                eprintln!("  {}: {}", i18n.tr(err.i18n_key()), err);
                pane.clear();
                status = ExitCode::FAILURE;
            }
        }
        // The handle's channel is bounded; drain before it fills up.
        collector.process_pending();
    }

    status
}

fn print_preview(preview: &Preview, i18n: &I18n) {
    let mode_key = match preview.mode() {
        PreviewMode::Text => "preview-mode-text",
        PreviewMode::Image => "preview-mode-image",
        PreviewMode::None => "preview-mode-none",
    };
    match preview.alignment() {
        Some(alignment) => println!("  {} ({:?})", i18n.tr(mode_key), alignment),
        None => println!("  {}", i18n.tr(mode_key)),
    }

    match preview.content() {
        Some(PreviewContent::Text(text)) => {
            for line in text.lines() {
                println!("    {line}");
            }
        }
        Some(PreviewContent::Image(thumbnail)) => {
            let (width, height) = thumbnail.display_size();
            println!(
                "    {}x{} (source {}x{})",
                width, height, thumbnail.source_width, thumbnail.source_height
            );
        }
        None => {}
    }
}

fn run_channels(picker: &mut ChannelPicker, action: ChannelAction, i18n: &I18n) -> ExitCode {
    println!("{}", picker.title());
    for option in picker.options() {
        println!("  {}", option.label);
    }

    let result = match action {
        ChannelAction::List => return ExitCode::SUCCESS,
        ChannelAction::Cancel => picker.cancel(),
        ChannelAction::Select(r, g, b) => confirm_selection(picker, [r, g, b]),
    };
    if let Err(err) = result {
        eprintln!("{}: {}", i18n.tr(err.i18n_key()), err);
        return ExitCode::FAILURE;
    }

    match picker.finalize() {
        Ok(ChannelOutcome::Selected(selection)) => {
            for role in ChannelRole::ALL {
                println!("{} {}", picker.labels().row(role), selection.get(role));
            }
            ExitCode::SUCCESS
        }
        Ok(ChannelOutcome::Cancelled) => {
            println!("{}", i18n.tr("dialog-cancel"));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {}", i18n.tr(err.i18n_key()), err);
            ExitCode::FAILURE
        }
    }
}

fn confirm_selection(
    picker: &mut ChannelPicker,
    indices: [usize; 3],
) -> Result<(), ChannelPickerError> {
    for (role, index) in ChannelRole::ALL.into_iter().zip(indices) {
        picker.select(role, index)?;
    }
    picker.confirm()?;
    Ok(())
}

fn log_open_failure(collector: &DiagnosticsCollector, err: &Error) {
    let kind = match err {
        Error::Decode(failure) => DiagnosticEventKind::decode_failed(failure),
        Error::UnsupportedRank(rank) => DiagnosticEventKind::rank_rejected(rank),
        other => DiagnosticEventKind::Warning {
            message: other.to_string(),
        },
    };
    collector.handle().log(kind);
}

fn finish(
    mut collector: DiagnosticsCollector,
    report: Option<PathBuf>,
    status: ExitCode,
) -> ExitCode {
    collector.process_pending();
    if let Some(path) = report {
        if let Err(err) = collector.export_to_file(&path) {
            eprintln!("[WARN] Failed to write diagnostics report: {err}");
        }
    }
    status
}
