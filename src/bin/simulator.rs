use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use site_core::core::filter::YearFilter;
use site_core::core::page::Page;
use site_core::core::publications;
use site_core::persistence::Preferences;
use site_core::SiteEngine;

fn get_log_path() -> PathBuf {
    let mut path = PathBuf::from("target");
    path.push("ldahs_site_sim.log");
    path
}

fn log(message: &str) {
    if let Ok(mut file) = File::options().create(true).append(true).open(get_log_path()) {
        let _ = writeln!(file, "{}", message);
    }
}

/// Headless driver for the site engine. Commands on stdin, one per line:
///
///   QUERY <text>   type into the search box (debounced; advance with TICK)
///   TICK <ms>      advance the simulated clock
///   YEAR <label>   select a year ("all" clears)
///   LANG           toggle the display language
///   STATE          print the current visibility state
///   EXIT           quit
///
/// The clock only moves on TICK, so debounce scenarios replay exactly.
fn main() -> io::Result<()> {
    let _ = std::fs::remove_file(get_log_path());
    log("--- Site Simulator Starting ---");

    let mut engine = SiteEngine::with_preferences(
        Preferences::new(),
        Page::lab_site(),
        Some(publications::sample()),
    );
    let mut now = Instant::now();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        log(&format!("<- '{}'", input));
        let (command, rest) = match input.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input.trim(), ""),
        };

        match command {
            "QUERY" => {
                engine.type_query(rest, now);
                writeln!(stdout, "PENDING {}", engine.search_pending())?;
            }
            "TICK" => {
                let ms: u64 = rest.parse().unwrap_or(0);
                now += Duration::from_millis(ms);
                let fired = engine.tick(now);
                writeln!(stdout, "RECOMPUTED {}", fired)?;
            }
            "YEAR" => {
                engine.select_year(YearFilter::from_value(rest));
                writeln!(stdout, "RECOMPUTED true")?;
            }
            "LANG" => {
                engine.toggle_language();
                writeln!(stdout, "LANG {}", engine.locale().active().code())?;
                for (lang, key) in engine.drain_missing_translations() {
                    log(&format!("missing translation: {} '{}'", lang.code(), key));
                }
            }
            "STATE" => print_state(&engine, &mut stdout)?,
            "EXIT" => {
                log("Received EXIT, saving preferences.");
                if let Err(e) = engine.save_preferences() {
                    log(&format!("Error saving preferences: {}", e));
                }
                break;
            }
            _ => {
                log("Received unknown command.");
            }
        }
        stdout.flush()?;
    }
    log("Shutting down.");
    Ok(())
}

fn print_state(engine: &SiteEngine, stdout: &mut io::Stdout) -> io::Result<()> {
    let report = engine.report();
    writeln!(
        stdout,
        "VISIBLE {} OF {}",
        report.visible_count, report.total_count
    )?;
    for (gi, group) in engine.publications().iter().enumerate() {
        let shown = report.group_visible.get(gi).copied().unwrap_or(true);
        writeln!(
            stdout,
            "GROUP {} {}",
            group.label,
            if shown { "shown" } else { "hidden" }
        )?;
    }
    match &report.message {
        Some(message) => writeln!(stdout, "MESSAGE {}", message),
        None => writeln!(stdout, "MESSAGE none"),
    }
}
