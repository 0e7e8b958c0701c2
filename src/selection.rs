//! Paged interactive club chooser

use std::io::{BufRead, Write};

use crate::constants::selection::EXAMPLE_TEAMS_PER_CLUB;
use crate::data_fetcher::processors::Club;
use crate::error::AppError;

/// What the user asked for on a chooser page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Next,
    Back,
    /// Zero-based index into the full club list.
    Choose(usize),
    Quit,
    Invalid(String),
}

/// Interprets one line of chooser input.
///
/// `z` goes back, `v` goes forward, `q` quits, and a number picks the club
/// with that position in the whole list (1-based). Navigating past either
/// end of the list is reported as invalid.
pub fn parse_selection(input: &str, page: usize, total_pages: usize, total_clubs: usize) -> Selection {
    let choice = input.trim().to_lowercase();
    match choice.as_str() {
        "q" => Selection::Quit,
        "z" if page > 0 => Selection::Back,
        "z" => Selection::Invalid("Already on the first page".to_string()),
        "v" if page + 1 < total_pages => Selection::Next,
        "v" => Selection::Invalid("Already on the last page".to_string()),
        "" => Selection::Invalid("No input".to_string()),
        other => match other.parse::<usize>() {
            Ok(number) if (1..=total_clubs).contains(&number) => Selection::Choose(number - 1),
            Ok(number) => Selection::Invalid(format!(
                "{number} is out of range, choose 1-{total_clubs}"
            )),
            Err(_) => Selection::Invalid(format!("Unknown input '{}'", input.trim())),
        },
    }
}

fn render_page<W: Write>(
    out: &mut W,
    clubs: &[Club],
    page: usize,
    page_size: usize,
    total_pages: usize,
) -> std::io::Result<()> {
    let start = page * page_size;
    let end = (start + page_size).min(clubs.len());

    writeln!(out, "\n{}", "=".repeat(70))?;
    writeln!(out, "Club selection - page {}/{}", page + 1, total_pages)?;
    writeln!(out, "Showing clubs {}-{} of {}", start + 1, end, clubs.len())?;
    writeln!(out, "{}\n", "=".repeat(70))?;

    for (offset, club) in clubs[start..end].iter().enumerate() {
        let examples = club.example_team_names(EXAMPLE_TEAMS_PER_CLUB);
        let mut teams = examples.join(", ");
        let hidden = club.team_name_variants.len().saturating_sub(examples.len());
        if hidden > 0 {
            teams.push_str(&format!(" (+{hidden} more)"));
        }

        writeln!(out, "  {:3}. {} (ClubID: {})", start + offset + 1, club.name, club.id)?;
        writeln!(
            out,
            "       {} team(s) in {} league(s)",
            club.team_count(),
            club.league_count()
        )?;
        writeln!(out, "       Teams: {teams}\n")?;
    }

    writeln!(out, "{}", "=".repeat(70))?;
    if page > 0 {
        writeln!(out, "  [z] previous page")?;
    }
    if page + 1 < total_pages {
        writeln!(out, "  [v] next page")?;
    }
    writeln!(out, "  [1-{}] choose a club", clubs.len())?;
    writeln!(out, "  [q] quit")?;
    write!(out, "\nChoice: ")?;
    out.flush()
}

/// Lets the user pick a club, `page_size` clubs per page.
///
/// Returns `None` when the user quits, the input ends, or there are no clubs.
/// Invalid input re-prompts on the same page.
pub fn choose_club<'a, R: BufRead, W: Write>(
    clubs: &'a [Club],
    page_size: usize,
    input: &mut R,
    out: &mut W,
) -> Result<Option<&'a Club>, AppError> {
    if clubs.is_empty() {
        writeln!(out, "No clubs found")?;
        return Ok(None);
    }

    let page_size = page_size.max(1);
    let total_pages = clubs.len().div_ceil(page_size);
    let mut page = 0usize;

    loop {
        render_page(out, clubs, page, page_size, total_pages)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match parse_selection(&line, page, total_pages, clubs.len()) {
            Selection::Quit => return Ok(None),
            Selection::Back => page -= 1,
            Selection::Next => page += 1,
            Selection::Choose(index) => return Ok(clubs.get(index)),
            Selection::Invalid(reason) => writeln!(out, "Invalid choice: {reason}")?,
        }
    }
}
