use std::io::Write;

use crate::app::{AppContext, MovieTrackError, Result};
use crate::domain::{LoadKind, MovieRecord};
use crate::session::NEVER_VISITED;
use crate::store::{PreferenceStore, LAST_VISITED_KEY};

pub async fn search(ctx: &AppContext, term: &str, json: bool) -> Result<()> {
    ctx.session.search(term, LoadKind::UserSearch).await?;
    let state = ctx.session.snapshot();

    if let Some(err) = &state.remote_error {
        eprintln!("Catalog unavailable: {}", err);
    }

    print_movies(&mut std::io::stdout(), &state.movies, json)
}

pub fn list_favorites(ctx: &AppContext, json: bool) -> Result<()> {
    let favorites = ctx.repository.favorites()?;
    print_movies(&mut std::io::stdout(), &favorites, json)
}

pub async fn toggle(ctx: &AppContext, id: i64, term: Option<&str>) -> Result<()> {
    let loaded = match term {
        Some(term) => ctx.session.search(term, LoadKind::UserSearch).await?,
        None => ctx.session.initial_load().await?,
    };
    if !loaded {
        return Err(MovieTrackError::Other("Search was superseded".into()));
    }

    let movie = ctx
        .session
        .toggle_favorite(id)
        .ok_or(MovieTrackError::MovieNotFound(id))?;
    ctx.session.flush().await;

    if movie.is_favorite {
        println!("Added favorite: {}", movie.display_title());
    } else {
        println!("Removed favorite: {}", movie.display_title());
    }
    Ok(())
}

pub fn last_visited(ctx: &AppContext) -> Result<()> {
    let value = ctx
        .store
        .get_preference(LAST_VISITED_KEY)?
        .unwrap_or_else(|| NEVER_VISITED.to_string());
    println!("Last visited: {}", value);
    Ok(())
}

fn print_movies<W: Write>(out: &mut W, movies: &[MovieRecord], json: bool) -> Result<()> {
    if json {
        let body = serde_json::to_string_pretty(movies)
            .map_err(|e| MovieTrackError::Other(e.to_string()))?;
        writeln!(out, "{}", body)?;
        return Ok(());
    }

    if movies.is_empty() {
        writeln!(out, "No movies")?;
        return Ok(());
    }

    for movie in movies {
        writeln!(
            out,
            "{} {:>10}  {:>8}  {}  [{}]",
            movie.favorite_marker(),
            movie.id,
            movie.display_price(),
            movie.display_title(),
            movie.genre
        )?;
    }

    Ok(())
}
