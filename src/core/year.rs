//! Release year extraction.
//!
//! The year pattern is built from the current year so that it matches every
//! year from 1900 up to, and never beyond, that year.

use chrono::Datelike;
use regex::Regex;

/// Build the alternation matching `19xx` and `2000..=current_year`.
///
/// The upper range is assembled digit by digit from the millennium, century,
/// decade and unit of `current_year`.
pub fn year_pattern(current_year: u32) -> String {
    let millennium = current_year / 1000;
    let century = (current_year / 100) % 10;
    let decade = (current_year / 10) % 10;
    let unit = current_year % 10;

    let mut alternatives = vec!["19[0-9]{2}".to_string()];
    if century > 0 {
        alternatives.push(format!("{}[0-{}][0-9]{{2}}", millennium, century - 1));
    }
    if decade > 0 {
        alternatives.push(format!("{}{}[0-{}][0-9]", millennium, century, decade - 1));
    }
    alternatives.push(format!("{}{}{}[0-{}]", millennium, century, decade, unit));

    alternatives.join("|")
}

/// Find the most plausible release year in `text`.
///
/// All matches are collected and the rightmost one is returned, since release
/// years usually trail the title.
pub fn extract_year(text: &str, current_year: u32) -> Option<String> {
    let pattern = year_pattern(current_year);
    tracing::debug!("Year pattern: {}", pattern);

    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Invalid year pattern {}: {}", pattern, e);
            return None;
        }
    };

    match re.find_iter(text).last() {
        Some(m) => {
            tracing::debug!("year: {}", m.as_str());
            Some(m.as_str().to_string())
        }
        None => {
            tracing::debug!("No year found");
            None
        }
    }
}

/// The current calendar year from the local clock.
pub fn current_year() -> u32 {
    chrono::Local::now().year().max(0) as u32
}
