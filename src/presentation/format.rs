use crate::domain::error::PokedexError;
use crate::domain::model::{ImageBytes, RecordDetail, RosterEntry};
use crate::presentation::sprite::{decode, fit_scale, half_block_rows, scale_nearest};
use crate::presentation::theme::Theme;
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

/// Character cell box the sprite is fitted into. Each cell holds two
/// vertical pixels.
pub const SPRITE_BOX: (u32, u32) = (80, 40);

const STAT_PLACEHOLDER: &str = "--";
const STAT_BAR_MAX: i64 = 255;
const STAT_BAR_WIDTH: i64 = 20;

/// What the sprite panel shows for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteView {
    Sprite {
        width: u32,
        height: u32,
        scale: u32,
        cells: Vec<String>,
    },
    Unreadable,
    NoImage,
}

impl SpriteView {
    pub fn from_bytes(bytes: Option<&ImageBytes>) -> Self {
        let Some(data) = bytes else {
            return SpriteView::NoImage;
        };
        let pixels = match decode(data) {
            Ok(pixels) => pixels,
            Err(e) => {
                debug!(error = %e, "sprite decode failed");
                return SpriteView::Unreadable;
            }
        };

        let (width, height) = pixels.dimensions();
        let scale = fit_scale(width, height, SPRITE_BOX.0, SPRITE_BOX.1 * 2);
        SpriteView::Sprite {
            width,
            height,
            scale,
            cells: half_block_rows(&scale_nearest(&pixels, scale)),
        }
    }
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, PokedexError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `#001  Bulbasaur`
pub fn roster_row(entry: &RosterEntry) -> String {
    format!("#{:03}  {}", entry.id, entry.name)
}

pub fn format_roster(entries: &[&RosterEntry], theme: &Theme) -> String {
    let mut output = String::new();
    for entry in entries {
        writeln!(output, "  {}", (theme.idx)(&roster_row(entry))).ok();
    }
    output
}

fn stat_bar(value: i64) -> String {
    let filled = (value.clamp(0, STAT_BAR_MAX) * STAT_BAR_WIDTH / STAT_BAR_MAX) as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(STAT_BAR_WIDTH as usize - filled)
    )
}

pub fn format_detail(
    detail: &RecordDetail,
    sprite: &SpriteView,
    theme: &Theme,
    enable_emoji: bool,
) -> String {
    let mut output = String::new();

    let heading = format!("#{:03} {}", detail.id, detail.name);
    writeln!(output, "{}", (theme.title)(&heading)).ok();
    writeln!(
        output,
        "  {}",
        (theme.meta)(&format!(
            "{}   |   HT {:.1} m   |   WT {:.1} kg",
            detail.genus, detail.height_m, detail.weight_kg
        ))
    )
    .ok();

    writeln!(output).ok();
    writeln!(
        output,
        "  {} {}",
        (theme.label)("Types:"),
        join_or_placeholder(&detail.types)
    )
    .ok();
    writeln!(
        output,
        "  {} {}",
        (theme.label)("Abilities:"),
        join_or_placeholder(&detail.abilities)
    )
    .ok();

    let sprite_line = match sprite {
        SpriteView::Sprite {
            width,
            height,
            scale,
            ..
        } => format!("{}x{} px, scale ×{}", width, height, scale),
        SpriteView::Unreadable => "SPRITE ERROR".to_string(),
        SpriteView::NoImage => "NO IMAGE".to_string(),
    };
    let sprite_label = if enable_emoji { "🖼  Sprite:" } else { "Sprite:" };
    writeln!(output, "  {} {}", (theme.label)(sprite_label), sprite_line).ok();
    if let SpriteView::Sprite { cells, .. } = sprite {
        for row in cells {
            writeln!(output, "  {}", row).ok();
        }
    }

    writeln!(output).ok();
    let cutoff = "⸺".repeat(40);
    writeln!(output, "  {}", (theme.line)(&cutoff)).ok();
    writeln!(output, "  {}", (theme.para)(&detail.flavor_text)).ok();
    writeln!(output, "  {}", (theme.line)(&cutoff)).ok();

    writeln!(output).ok();
    writeln!(output, "  {}", (theme.label)("STATS")).ok();
    for (name, value) in detail.ordered_stats() {
        let (shown, bar) = match value {
            Some(v) => (v.to_string(), stat_bar(v)),
            None => (STAT_PLACEHOLDER.to_string(), String::new()),
        };
        writeln!(
            output,
            "  {:<16} {} {}",
            name,
            (theme.value)(&format!("{:>3}", shown)),
            (theme.line)(&bar)
        )
        .ok();
    }

    writeln!(output).ok();
    output
}

fn join_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        STAT_PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}
