//! Search result disambiguation.
//!
//! A single result, or a top result whose title equals the parsed title, is
//! taken as is. Anything else is handed to a [`MatchResolver`].

use crate::models::media::SearchMatch;
use dialoguer::Input;
use std::io::{BufRead, Write};

/// Strategy for choosing among ambiguous search results.
pub trait MatchResolver {
    /// Return the 0-based index of the chosen match, or `None` to reject all.
    fn resolve(&mut self, matches: &[SearchMatch]) -> Option<usize>;
}

/// Resolver that never picks a match.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectResolver;

impl MatchResolver for RejectResolver {
    fn resolve(&mut self, _matches: &[SearchMatch]) -> Option<usize> {
        None
    }
}

/// Validate a 1-based choice among `count` matches.
pub fn validate_choice(number: usize, count: usize) -> std::result::Result<(), String> {
    if (1..=count).contains(&number) {
        Ok(())
    } else {
        Err(format!("Please choose a number between 1 and {}", count))
    }
}

/// Interactive resolver prompting on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalResolver;

impl MatchResolver for TerminalResolver {
    fn resolve(&mut self, matches: &[SearchMatch]) -> Option<usize> {
        for (index, m) in matches.iter().enumerate() {
            println!("{}: {}", index + 1, m);
        }

        let count = matches.len();
        let choice = Input::<usize>::new()
            .with_prompt(format!("Please choose a number between 1 and {}", count))
            .validate_with(move |number: &usize| validate_choice(*number, count))
            .interact_text();

        match choice {
            Ok(number) => Some(number - 1),
            Err(e) => {
                tracing::warn!("Failed to read selection: {}", e);
                None
            }
        }
    }
}

/// Resolver reading the choice from any line-based reader.
pub struct ConsoleResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, matches: &[SearchMatch]) -> std::io::Result<Option<usize>> {
        for (index, m) in matches.iter().enumerate() {
            writeln!(self.output, "{}: {}", index + 1, m)?;
        }

        loop {
            write!(
                self.output,
                "Please choose a number between 1 and {}: ",
                matches.len()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim().parse::<usize>() {
                Ok(number) if validate_choice(number, matches.len()).is_ok() => {
                    return Ok(Some(number - 1));
                }
                _ => continue,
            }
        }
    }
}

impl<R: BufRead, W: Write> MatchResolver for ConsoleResolver<R, W> {
    fn resolve(&mut self, matches: &[SearchMatch]) -> Option<usize> {
        match self.prompt(matches) {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!("Failed to read selection: {}", e);
                None
            }
        }
    }
}

/// Select one match among the search results for `title`.
pub fn select_match<'a>(
    matches: &'a [SearchMatch],
    title: &str,
    resolver: &mut dyn MatchResolver,
) -> Option<&'a SearchMatch> {
    let selected = match matches {
        [] => None,
        [only] => Some(only),
        [first, ..] if first.title == title => Some(first),
        _ => resolver
            .resolve(matches)
            .and_then(|index| matches.get(index)),
    };

    match selected {
        Some(m) => tracing::debug!("imdbID: {}", m.id),
        None => tracing::debug!("No match found"),
    }
    selected
}
