use anyhow::Result;
use owo_colors::OwoColorize;
use widgetshell_core::HandAngles;

use crate::panels::Panels;
use crate::render::Render;

/// Format an offset as e.g. `+5m` or `-1h 15m`.
pub fn format_offset(offset_minutes: i64) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let abs = offset_minutes.unsigned_abs();
    let (hours, minutes) = (abs / 60, abs % 60);

    if hours == 0 {
        format!("{sign}{minutes}m")
    } else {
        format!("{sign}{hours}h {minutes}m")
    }
}

pub fn now(panels: &Panels) -> Result<()> {
    let clock = &panels.clock;
    let line = clock.now().format("%H:%M:%S").to_string();

    if clock.can_reset() {
        println!(
            "{} {}",
            line.bold(),
            format!("({} from system time)", format_offset(clock.offset_minutes())).dimmed()
        );
    } else {
        println!("{}", line.bold());
    }
    Ok(())
}

pub fn bump(panels: &mut Panels, minutes: i64) -> Result<()> {
    panels.clock.bump_offset(minutes);
    print_offset(panels);
    Ok(())
}

pub fn reset(panels: &mut Panels) -> Result<()> {
    if !panels.clock.can_reset() {
        println!("{}", "Clock already follows system time".dimmed());
        return Ok(());
    }
    panels.clock.reset();
    print_offset(panels);
    Ok(())
}

pub fn set(panels: &mut Panels, time: &str) -> Result<()> {
    panels.clock.set_absolute_from_str(time)?;
    print_offset(panels);
    Ok(())
}

pub fn hands(panels: &Panels) -> Result<()> {
    println!("{}", HandAngles::at(panels.clock.now()).render());
    Ok(())
}

fn print_offset(panels: &Panels) {
    println!(
        "{} {} {}",
        "✓".green(),
        panels.clock.display_hhmm().bold(),
        format!("(offset {})", format_offset(panels.clock.offset_minutes())).dimmed()
    );
}
