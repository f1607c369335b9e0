use anyhow::Result;
use widgetshell_core::month_grid::{next_month, prev_month};
use widgetshell_core::{CalendarDate, MonthGrid};

use crate::panels::Panels;
use crate::render::Render;

/// Which way to step from the selected month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

pub fn run(
    panels: &Panels,
    year: Option<i32>,
    month: Option<u32>,
    step: Option<Step>,
) -> Result<()> {
    let today = panels.today();
    let (year, month) = target_month(today, year, month, step);

    let grid = MonthGrid::for_month(year, month, today, &panels.events)?;
    println!("{}", grid.render());
    Ok(())
}

fn target_month(
    today: CalendarDate,
    year: Option<i32>,
    month: Option<u32>,
    step: Option<Step>,
) -> (i32, u32) {
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());

    match step {
        Some(Step::Prev) => prev_month(year, month),
        Some(Step::Next) => next_month(year, month),
        None => (year, month),
    }
}
