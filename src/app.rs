use crate::cli::Args;
use bbb_club_discovery::config::Config;
use bbb_club_discovery::config::user_prompts::{confirm, prompt_for_home_association};
use bbb_club_discovery::data_fetcher::DiscoverySession;
use bbb_club_discovery::data_fetcher::processors::{Club, find, search};
use bbb_club_discovery::error::AppError;
use bbb_club_discovery::export::{auto_export_filename, export_report};
use bbb_club_discovery::report::{ClubReport, render_summary};
use bbb_club_discovery::selection::choose_club;
use chrono::{Local, Utc};
use std::time::Instant;
use tracing::info;

/// Run the discovery flow.
///
/// - Resolves the home subdivision (flag or prompt)
/// - Discovers every club reachable from it
/// - Picks a club (flag or paged chooser) and prints its analysis
/// - Exports the analysis when asked to
pub async fn run_discovery(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await?;
    if let Some(workers) = args.workers {
        config.max_workers = workers;
        config.validate()?;
    }

    let home_id = match args.verband {
        Some(id) => id,
        None => match prompt_for_home_association().await? {
            Some(id) => id,
            None => {
                println!("No subdivision given.");
                return Ok(());
            }
        },
    };

    let session = DiscoverySession::from_config(&config)?;

    println!(
        "Discovering clubs of subdivision {home_id} with {} workers...",
        session.workers()
    );
    let started = Instant::now();
    let clubs = session.discover_clubs(home_id).await;
    println!(
        "Found {} clubs in {:.1}s using {} requests.",
        clubs.len(),
        started.elapsed().as_secs_f64(),
        session.gateway().request_count()
    );

    let Some(club) = pick_club(args, &clubs).await? else {
        println!("No club selected.");
        return Ok(());
    };

    let report = session.analyze_club(club, Local::now().naive_local()).await;
    println!("\n{}", render_summary(&report));
    let standings = session.cache().standings_stats().await;
    let fixtures = session.cache().fixtures_stats().await;
    info!(
        "Analysis of club {} done, {} requests in total (standings cache {}/{} hits, fixtures cache {}/{} hits)",
        club.id,
        session.gateway().request_count(),
        standings.hits,
        standings.hits + standings.misses,
        fixtures.hits,
        fixtures.hits + fixtures.misses
    );

    export(args, &report).await
}

async fn pick_club<'a>(args: &Args, clubs: &'a [Club]) -> Result<Option<&'a Club>, AppError> {
    if let Some(club_id) = args.club {
        return find(clubs, club_id)
            .map(Some)
            .ok_or_else(|| AppError::club_not_found(club_id));
    }

    let offered: Vec<Club> = match &args.search {
        Some(query) => search(clubs, query).into_iter().cloned().collect(),
        None => clubs.to_vec(),
    };
    let page_size = args.page_size;

    // The chooser reads stdin line by line, so it runs on the blocking pool
    let chosen_id = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stdout();
        choose_club(&offered, page_size, &mut input, &mut out)
            .map(|chosen| chosen.map(|club| club.id))
    })
    .await
    .map_err(std::io::Error::other)??;

    Ok(chosen_id.and_then(|club_id| find(clubs, club_id)))
}

async fn export(args: &Args, report: &ClubReport) -> Result<(), AppError> {
    let target = match &args.export {
        Some(path) => Some(path.clone()),
        None if args.export_auto => Some(auto_export_filename(&report.club_name, Utc::now().timestamp()).into()),
        None if args.club.is_none() && confirm("Export analysis as JSON?").await? => {
            Some(auto_export_filename(&report.club_name, Utc::now().timestamp()).into())
        }
        None => None,
    };

    if let Some(path) = target {
        let written = export_report(report, path).await?;
        println!("Exported: {}", written.display());
    }
    Ok(())
}
