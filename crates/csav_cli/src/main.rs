use std::path::PathBuf;
use std::process;

use clap::Parser;
use csav_core::core_api::{Engine, Session};
use csav_core::save::DecodeOptions;
use csav_render::{
    FieldSelection, TextRenderOptions, TimeFormat, render_json_full, render_json_selected,
    render_layout_json, render_layout_lines, render_selected_pairs, render_session_report,
};
use serde_json::Value as JsonValue;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE.BIN")]
    path: PathBuf,
    #[arg(long)]
    magic: bool,
    #[arg(long = "completed-levels")]
    completed_levels: bool,
    #[arg(long)]
    abilities: bool,
    #[arg(long)]
    speedrun: bool,
    #[arg(long)]
    levels: bool,
    #[arg(long)]
    shortest: bool,
    #[arg(long)]
    longest: bool,
    #[arg(long)]
    json: bool,
    /// Show the save tag and ability names in the report.
    #[arg(long)]
    verbose: bool,
    /// Append the in-game MM:SS.cc timer to every time.
    #[arg(long)]
    clock: bool,
    /// Refuse files whose tag is not CSAV.
    #[arg(long)]
    strict: bool,
    /// Print the byte layout of the file instead of the report.
    #[arg(
        long,
        conflicts_with_all = [
            "magic",
            "completed_levels",
            "abilities",
            "speedrun",
            "levels",
            "shortest",
            "longest",
        ]
    )]
    layout: bool,
}

impl Cli {
    fn field_selection(&self) -> FieldSelection {
        FieldSelection {
            magic: self.magic,
            completed_levels: self.completed_levels,
            abilities: self.abilities,
            speedrun: self.speedrun,
            levels: self.levels,
            shortest: self.shortest,
            longest: self.longest,
        }
    }

    fn text_options(&self) -> TextRenderOptions {
        TextRenderOptions {
            verbose: self.verbose,
            time_format: if self.clock {
                TimeFormat::Clock
            } else {
                TimeFormat::Seconds
            },
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let fields = cli.field_selection();

    let engine = Engine::with_options(DecodeOptions {
        strict_magic: cli.strict,
    });
    let session = engine.open_path(&cli.path).unwrap_or_else(|e| {
        log::debug!("failed with {:?}", e.code());
        eprintln!("Error: {e}");
        process::exit(1);
    });

    if cli.layout {
        if cli.json {
            print_json(&render_layout_json(session.layout()));
        } else {
            for line in render_layout_lines(session.layout()) {
                println!("{line}");
            }
        }
        return;
    }

    if cli.json {
        print_json(&json_output(&session, &fields));
        return;
    }

    if fields.is_any_selected() {
        for (key, value) in render_selected_pairs(session.record(), session.statistics(), &fields)
        {
            println!("{key}={value}");
        }
        return;
    }

    print!("{}", render_session_report(&session, cli.text_options()));
}

fn json_output(session: &Session, fields: &FieldSelection) -> JsonValue {
    if fields.is_any_selected() {
        render_json_selected(session.record(), session.statistics(), fields)
    } else {
        render_json_full(session.record(), session.statistics())
    }
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}
