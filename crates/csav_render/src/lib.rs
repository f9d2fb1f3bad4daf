use csav_core::ability::Ability;
use csav_core::core_api::Session;
use csav_core::layout::FileLayout;
use csav_core::save::SaveRecord;
use csav_core::stats::{LevelTime, Statistics, format_clock};
use serde_json::{Map as JsonMap, Value as JsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// `5.0 sec`
    #[default]
    Seconds,
    /// `5.0 sec (00:05.00)`
    Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    pub verbose: bool,
    pub time_format: TimeFormat,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub magic: bool,
    pub completed_levels: bool,
    pub abilities: bool,
    pub speedrun: bool,
    pub levels: bool,
    pub shortest: bool,
    pub longest: bool,
}

impl FieldSelection {
    pub fn is_any_selected(&self) -> bool {
        self.magic
            || self.completed_levels
            || self.abilities
            || self.speedrun
            || self.levels
            || self.shortest
            || self.longest
    }
}

pub fn render_report(record: &SaveRecord, stats: &Statistics) -> String {
    render_report_with_options(record, stats, TextRenderOptions::default())
}

pub fn render_report_with_options(
    record: &SaveRecord,
    stats: &Statistics,
    options: TextRenderOptions,
) -> String {
    let mut out = render_report_lines(record, stats, options).join("\n");
    out.push('\n');
    out
}

pub fn render_session_report(session: &Session, options: TextRenderOptions) -> String {
    render_report_with_options(session.record(), session.statistics(), options)
}

/// The progress report, one entry per output line, in its fixed order.
pub fn render_report_lines(
    record: &SaveRecord,
    stats: &Statistics,
    options: TextRenderOptions,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(stats.levels.len() + 8);

    if options.verbose {
        lines.push(format!("Magic: {}", format_magic(record.magic)));
    }
    lines.push(format!("Completed levels: {}", record.completed_levels));
    lines.push(format!(
        "Unlocked abilities: {}",
        format_ability_mask(record.unlocked_abilities)
    ));
    if options.verbose {
        lines.push(format!(
            "Ability names: {}",
            format_ability_names(&record.abilities())
        ));
    }
    lines.push(format!(
        "Speedrun time: {}",
        format_time(stats.speedrun_seconds, record.speedrun_ticks, options.time_format)
    ));

    lines.push("Completion times:".to_string());
    for level in &stats.levels {
        lines.push(format!(
            "Level #{}: {}",
            level.number(),
            format_time(level.seconds, level.ticks, options.time_format)
        ));
    }

    lines.push(format!(
        "Shortest level: {}",
        format_extreme(stats.shortest.as_ref(), options.time_format)
    ));
    lines.push(format!(
        "Longest level: {}",
        format_extreme(stats.longest.as_ref(), options.time_format)
    ));

    lines
}

pub fn render_json_full(record: &SaveRecord, stats: &Statistics) -> JsonValue {
    let mut out = JsonMap::new();

    out.insert("magic".to_string(), JsonValue::from(record.magic));
    out.insert(
        "magic_ok".to_string(),
        JsonValue::Bool(record.has_expected_magic()),
    );
    out.insert(
        "completed_levels".to_string(),
        JsonValue::from(record.completed_levels),
    );
    out.insert(
        "highest_unlocked_level".to_string(),
        JsonValue::from(record.highest_unlocked_level()),
    );
    out.insert(
        "unlocked_abilities".to_string(),
        JsonValue::from(record.unlocked_abilities),
    );
    out.insert("abilities".to_string(), abilities_to_json(&record.abilities()));
    out.insert(
        "speedrun_ticks".to_string(),
        JsonValue::from(record.speedrun_ticks),
    );
    out.insert(
        "speedrun_seconds".to_string(),
        JsonValue::from(stats.speedrun_seconds),
    );
    out.insert(
        "speedrun_clock".to_string(),
        JsonValue::String(format_clock(record.speedrun_ticks)),
    );
    out.insert("levels".to_string(), levels_to_json(&stats.levels));
    out.insert(
        "shortest".to_string(),
        optional_level_to_json(stats.shortest.as_ref()),
    );
    out.insert(
        "longest".to_string(),
        optional_level_to_json(stats.longest.as_ref()),
    );

    JsonValue::Object(out)
}

pub fn render_json_selected(
    record: &SaveRecord,
    stats: &Statistics,
    fields: &FieldSelection,
) -> JsonValue {
    let mut out = JsonMap::new();

    if fields.magic {
        out.insert("magic".to_string(), JsonValue::from(record.magic));
    }
    if fields.completed_levels {
        out.insert(
            "completed_levels".to_string(),
            JsonValue::from(record.completed_levels),
        );
    }
    if fields.abilities {
        out.insert(
            "unlocked_abilities".to_string(),
            JsonValue::from(record.unlocked_abilities),
        );
        out.insert("abilities".to_string(), abilities_to_json(&record.abilities()));
    }
    if fields.speedrun {
        out.insert(
            "speedrun_seconds".to_string(),
            JsonValue::from(stats.speedrun_seconds),
        );
    }
    if fields.levels {
        out.insert("levels".to_string(), levels_to_json(&stats.levels));
    }
    if fields.shortest {
        out.insert(
            "shortest".to_string(),
            optional_level_to_json(stats.shortest.as_ref()),
        );
    }
    if fields.longest {
        out.insert(
            "longest".to_string(),
            optional_level_to_json(stats.longest.as_ref()),
        );
    }

    JsonValue::Object(out)
}

/// `key=value` pairs for the selected fields, in a fixed order.
pub fn render_selected_pairs(
    record: &SaveRecord,
    stats: &Statistics,
    fields: &FieldSelection,
) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();

    if fields.magic {
        out.push(("magic", format_magic(record.magic)));
    }
    if fields.completed_levels {
        out.push(("completed_levels", record.completed_levels.to_string()));
    }
    if fields.abilities {
        out.push((
            "abilities",
            format_ability_mask(record.unlocked_abilities),
        ));
    }
    if fields.speedrun {
        out.push((
            "speedrun",
            format!("{} sec", format_seconds(stats.speedrun_seconds)),
        ));
    }
    if fields.levels {
        for level in &stats.levels {
            out.push((
                "level",
                format!("#{} {} sec", level.number(), format_seconds(level.seconds)),
            ));
        }
    }
    if fields.shortest {
        out.push((
            "shortest",
            format_extreme(stats.shortest.as_ref(), TimeFormat::Seconds),
        ));
    }
    if fields.longest {
        out.push((
            "longest",
            format_extreme(stats.longest.as_ref(), TimeFormat::Seconds),
        ));
    }

    out
}

pub fn render_layout_lines(layout: &FileLayout) -> Vec<String> {
    let mut lines = Vec::with_capacity(layout.sections.len() + 1);
    lines.push(format!("File length: {} bytes", layout.file_len));
    for section in &layout.sections {
        lines.push(format!(
            "{:<18}{:>5}..{:<5} ({} bytes)",
            section.id.as_str(),
            section.range.start,
            section.range.end,
            section.range.len()
        ));
    }
    lines
}

pub fn render_layout_json(layout: &FileLayout) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("file_len".to_string(), JsonValue::from(layout.file_len));
    out.insert(
        "sections".to_string(),
        JsonValue::Array(
            layout
                .sections
                .iter()
                .map(|s| {
                    let mut m = JsonMap::new();
                    m.insert("id".to_string(), JsonValue::String(s.id.to_string()));
                    m.insert("start".to_string(), JsonValue::from(s.range.start));
                    m.insert("end".to_string(), JsonValue::from(s.range.end));
                    m.insert("len".to_string(), JsonValue::from(s.range.len()));
                    JsonValue::Object(m)
                })
                .collect(),
        ),
    );
    JsonValue::Object(out)
}

/// Shortest representation that round-trips, always with a decimal part:
/// `20.0`, `5.0`, `1.23`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:?}")
}

pub fn format_ability_mask(mask: u32) -> String {
    format!("{mask:#b}")
}

fn format_magic(magic: u32) -> String {
    let bytes = magic.to_le_bytes();
    if bytes.iter().all(|b| b.is_ascii_graphic()) {
        let tag: String = bytes.iter().map(|&b| b as char).collect();
        format!("{magic:#010x} ({tag})")
    } else {
        format!("{magic:#010x}")
    }
}

fn format_ability_names(abilities: &[Ability]) -> String {
    if abilities.is_empty() {
        return "none".to_string();
    }
    abilities
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_time(seconds: f64, ticks: u32, time_format: TimeFormat) -> String {
    match time_format {
        TimeFormat::Seconds => format!("{} sec", format_seconds(seconds)),
        TimeFormat::Clock => format!(
            "{} sec ({})",
            format_seconds(seconds),
            format_clock(ticks)
        ),
    }
}

fn format_extreme(level: Option<&LevelTime>, time_format: TimeFormat) -> String {
    match level {
        Some(level) => format!(
            "#{} ({})",
            level.number(),
            format_time(level.seconds, level.ticks, time_format)
        ),
        None => "none (no completed levels)".to_string(),
    }
}

fn abilities_to_json(abilities: &[Ability]) -> JsonValue {
    JsonValue::Array(
        abilities
            .iter()
            .map(|a| JsonValue::String(a.to_string()))
            .collect(),
    )
}

fn level_to_json(level: &LevelTime) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("level".to_string(), JsonValue::from(level.number()));
    m.insert("ticks".to_string(), JsonValue::from(level.ticks));
    m.insert("seconds".to_string(), JsonValue::from(level.seconds));
    m.insert(
        "clock".to_string(),
        JsonValue::String(format_clock(level.ticks)),
    );
    JsonValue::Object(m)
}

fn levels_to_json(levels: &[LevelTime]) -> JsonValue {
    JsonValue::Array(levels.iter().map(level_to_json).collect())
}

fn optional_level_to_json(level: Option<&LevelTime>) -> JsonValue {
    match level {
        Some(level) => level_to_json(level),
        None => JsonValue::Null,
    }
}
