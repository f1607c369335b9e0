use anyhow::Result;
use owo_colors::OwoColorize;
use widgetshell_core::CalendarDate;

use crate::panels::Panels;
use crate::render::Render;

pub fn get(panels: &Panels, date: CalendarDate) -> Result<()> {
    match panels.events.get(date) {
        Some(label) => println!("{}", label),
        None => anyhow::bail!("No label for {}", date),
    }
    Ok(())
}

pub fn set(panels: &mut Panels, date: CalendarDate, text: &str) -> Result<()> {
    panels.events.set(date, text);

    match panels.events.get(date) {
        Some(label) => println!("{} {} {}", "✓".green(), date.bold(), label),
        None => println!("{} {} {}", "✓".green(), date.bold(), "cleared".dimmed()),
    }
    Ok(())
}

pub fn list(panels: &Panels) -> Result<()> {
    if panels.events.is_empty() {
        println!("{}", "No labelled days".dimmed());
        return Ok(());
    }

    let today = panels.today();
    for (date, label) in panels.events.iter() {
        let key = date.to_string();
        if date < today {
            println!("{}  {}", key.dimmed(), label.dimmed());
        } else {
            println!("{}  {}", key.bold(), label);
        }
    }
    Ok(())
}

pub fn preview(panels: &Panels, today: Option<CalendarDate>) -> Result<()> {
    let today = today.unwrap_or_else(|| panels.today());
    println!("{}", panels.events.preview_for(today).render());
    Ok(())
}
