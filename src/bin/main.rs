use std::io::{stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use site_core::core::filter::YearFilter;
use site_core::core::page::Page;
use site_core::core::publications;
use site_core::core::rate_limit::Throttle;
use site_core::persistence;
use site_core::SiteEngine;

const PUBLICATIONS_PATH: &str = "publications.json";
const THEME_PREF_KEY: &str = "theme";
/// How often the event loop wakes up to check the debounce deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(25);
/// Redraw gate; key repeat can outpace the terminal otherwise.
const REDRAW_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> std::io::Result<()> {
    // A publications.json next to the binary overrides the built-in
    // dataset, same fallback shape as the preference load.
    let dataset = publications::load_from_disk(Path::new(PUBLICATIONS_PATH))
        .unwrap_or_else(|_| publications::sample());
    let mut engine = SiteEngine::from_file_or_new(
        &persistence::default_path(),
        Page::lab_site(),
        Some(dataset),
    );

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
    let result = run(&mut engine);
    execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(e) = engine.save_preferences() {
        eprintln!("[ERROR] Could not save preferences: {}", e);
    }
    result
}

fn run(engine: &mut SiteEngine) -> std::io::Result<()> {
    let mut redraw_gate = Throttle::new(REDRAW_INTERVAL);
    // The raw search box content; the engine keeps the folded form.
    let mut query = String::new();
    // 0 selects every year, 1.. index into the year options.
    let mut year_index: usize = 0;
    let mut dirty = true;

    loop {
        let now = Instant::now();
        if engine.tick(now) {
            dirty = true;
        }
        if dirty && redraw_gate.ready(now) {
            draw(engine, &query, year_index)?;
            dirty = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    engine.toggle_language();
                    let _ = engine.save_preferences();
                    dirty = true;
                }
                KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    toggle_theme(engine);
                    dirty = true;
                }
                KeyCode::Tab => {
                    year_index = (year_index + 1) % (engine.year_options().len() + 1);
                    engine.select_year(selected_year(engine, year_index));
                    dirty = true;
                }
                KeyCode::Backspace => {
                    query.pop();
                    engine.type_query(&query, now);
                    dirty = true;
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    query.push(c);
                    engine.type_query(&query, now);
                    dirty = true;
                }
                _ => {}
            },
            Event::Resize(..) => dirty = true,
            _ => {}
        }
    }
    Ok(())
}

fn selected_year(engine: &SiteEngine, year_index: usize) -> YearFilter {
    if year_index == 0 {
        YearFilter::All
    } else {
        engine
            .year_options()
            .get(year_index - 1)
            .map(|label| YearFilter::Year(label.clone()))
            .unwrap_or(YearFilter::All)
    }
}

fn toggle_theme(engine: &mut SiteEngine) {
    let next = if engine.preference(THEME_PREF_KEY) == Some("light") {
        "dark"
    } else {
        "light"
    };
    engine.set_preference(THEME_PREF_KEY, next);
    let _ = engine.save_preferences();
}

struct Palette {
    accent: Color,
    dim: Color,
}

fn palette(engine: &SiteEngine) -> Palette {
    // No OS color-scheme probe in a terminal; an absent preference means dark.
    if engine.preference(THEME_PREF_KEY) == Some("light") {
        Palette {
            accent: Color::Blue,
            dim: Color::Grey,
        }
    } else {
        Palette {
            accent: Color::Cyan,
            dim: Color::DarkGrey,
        }
    }
}

fn draw(engine: &SiteEngine, query: &str, year_index: usize) -> std::io::Result<()> {
    let colors = palette(engine);
    let page = engine.page();
    let report = engine.report();
    let mut out = stdout();

    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    // Nav strip with the language toggle indicator on the right.
    let nav = [
        page.text("nav-home", "Home"),
        page.text("nav-research", "Research"),
        page.text("nav-publications", "Publications"),
        page.text("nav-contact", "Contact"),
    ]
    .join("  ·  ");
    queue!(
        out,
        SetForegroundColor(colors.dim),
        Print(format!("{}    [{}]\r\n", nav, page.toggle_label)),
        ResetColor,
        SetAttribute(Attribute::Bold),
        Print(format!(
            "{} {}\r\n",
            page.text("hero-title", ""),
            page.text("hero-title-highlight", "")
        )),
        SetAttribute(Attribute::Reset),
    )?;

    let stat_label = engine
        .locale()
        .translate("stat-publications")
        .unwrap_or("Publications");
    queue!(
        out,
        SetForegroundColor(colors.dim),
        Print(format!("{} {}\r\n\r\n", report.total_count, stat_label)),
        ResetColor,
    )?;

    // Search box: show the localized placeholder while empty.
    if query.is_empty() {
        queue!(
            out,
            Print("> "),
            SetForegroundColor(colors.dim),
            Print(format!("{}\r\n", page.text("search-placeholder", ""))),
            ResetColor,
        )?;
    } else {
        queue!(out, Print(format!("> {}_\r\n", query)))?;
    }

    // Year selector, localized "all" option first.
    let all_label = page.text("filter-all", "All Years");
    let selected = if year_index == 0 {
        all_label.clone()
    } else {
        engine
            .year_options()
            .get(year_index - 1)
            .cloned()
            .unwrap_or_else(|| all_label.clone())
    };
    queue!(out, Print(format!("[ {} ]\r\n", selected)))?;

    if let Some(message) = &report.message {
        queue!(
            out,
            SetForegroundColor(colors.accent),
            Print(format!("{}\r\n", message)),
            ResetColor,
        )?;
    }
    queue!(out, Print("\r\n"))?;

    // Timeline: hidden groups and entries are skipped, never removed.
    for (gi, group) in engine.publications().iter().enumerate() {
        if !report.group_visible.get(gi).copied().unwrap_or(true) {
            continue;
        }
        queue!(
            out,
            SetForegroundColor(colors.accent),
            Print(format!("{}\r\n", group.label)),
            ResetColor,
        )?;
        for (ei, entry) in group.entries.iter().enumerate() {
            let visible = report
                .entry_visible
                .get(gi)
                .and_then(|row| row.get(ei))
                .copied()
                .unwrap_or(true);
            if !visible {
                continue;
            }
            queue!(
                out,
                Print(format!("  {}\r\n", entry.title)),
                SetForegroundColor(colors.dim),
                Print(format!("    {} — {}\r\n", entry.authors, entry.venue)),
                ResetColor,
            )?;
        }
    }

    let address = page
        .text("footer-address", "")
        .replace('\n', "\r\n          ");
    queue!(
        out,
        Print("\r\n"),
        SetForegroundColor(colors.dim),
        Print(format!(
            "{}: {}\r\n",
            page.text("footer-contact", "Contact"),
            address
        )),
        Print(format!(
            "Tab: {}  ·  Ctrl-L: [{}]  ·  Ctrl-T: theme  ·  Esc: quit\r\n",
            all_label, page.toggle_label
        )),
        ResetColor,
    )?;
    out.flush()
}
