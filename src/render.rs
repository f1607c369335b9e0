//! Terminal rendering for widgetshell types.
//!
//! Extension traits that add colored terminal output to widgetshell-core
//! types using owo_colors.

use owo_colors::OwoColorize;
use widgetshell_core::{HandAngles, MonthGrid, Preview};

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

const NO_PLANS: &str = "No plans";

impl Render for Preview {
    fn render(&self) -> String {
        format!("{} {}", self.tag.to_string().blue(), self.label.bold())
    }
}

impl Render for Option<Preview> {
    fn render(&self) -> String {
        match self {
            Some(preview) => preview.render(),
            None => NO_PLANS.dimmed().to_string(),
        }
    }
}

impl Render for HandAngles {
    fn render(&self) -> String {
        format!(
            "hour {:>6.2}°  minute {:>6.2}°  second {:>6.2}°",
            self.hour, self.minute, self.second
        )
    }
}

/// Column headers, Monday first.
const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = vec![format!("{:^27}", self.title()).bold().to_string()];

        let header: Vec<String> = WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, d)| if i >= 5 { d.blue().to_string() } else { d.dimmed().to_string() })
            .collect();
        lines.push(header.join("  "));

        for week in self.weeks() {
            let cells: Vec<String> = week
                .iter()
                .map(|day| {
                    let marker = if day.has_label { "•" } else { " " };
                    let cell = format!("{:>2}", day.date.day());
                    let cell = if day.is_today {
                        cell.blue().bold().to_string()
                    } else if !day.in_month {
                        cell.dimmed().to_string()
                    } else {
                        cell
                    };
                    format!("{}{}", cell, marker.blue())
                })
                .collect();
            lines.push(cells.join(" "));
        }

        lines.join("\n")
    }
}
