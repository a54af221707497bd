use std::{io::Write, sync::Arc};

use anyhow::{anyhow, bail, Result};
use japan_info_client::{
    i18n, list_view, BrowseSession, ClientConfig, ContentFetcher, ContentSource, DetailLoader,
    DetailSession, DetailState, ErrorNotice,
};
use japan_info_shared::{query::same_tag, FilterSelection, SortOrder};

use crate::{
    cli::{Cli, Commands, ListArgs},
    output,
};

/// Runs `cli` against `source`, writing the rendered view to `out`.
pub async fn execute<W: Write>(
    cli: Cli,
    config: &ClientConfig,
    source: Arc<dyn ContentSource>,
    out: &mut W,
) -> Result<()> {
    match cli.command {
        Commands::List(args) => list(args, config, source, cli.json, out).await,
        Commands::Show { id } => show(&id, config, source, cli.json, out).await,
        Commands::Tags => tags(config, source, cli.json, out).await,
    }
}

/// Location string for `args`: the `--location` selection with the
/// individual flags layered on top.
pub fn list_location(args: &ListArgs) -> Result<String> {
    let mut selection = FilterSelection::from_query_string(args.location.as_deref().unwrap_or(""))?;

    if let Some(q) = &args.q {
        selection.set_search_text(q)?;
    }
    for tag in &args.tags {
        if !selection.tags.iter().any(|selected| same_tag(selected, tag)) {
            selection.toggle_tag(tag)?;
        }
    }
    if args.popular {
        selection.set_popular_only(true);
    }
    if let Some(sort) = args.sort {
        selection.set_sort(SortOrder::from(sort));
    }
    if let Some(page) = args.page {
        selection.set_page(page)?;
    }

    Ok(selection.to_query_string())
}

async fn list<W: Write>(
    args: ListArgs,
    config: &ClientConfig,
    source: Arc<dyn ContentSource>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let location = list_location(&args)?;
    tracing::debug!(location = %location, "Listing articles");

    let session = BrowseSession::from_config(config, source, &location)?;
    session.open().await;
    let state = session.snapshot().await;

    if json {
        if let Some(page) = &state.result {
            writeln!(out, "{}", serde_json::to_string_pretty(page)?)?;
        }
    } else {
        let view = list_view(&state, session.page_metadata().await);
        output::render_list(out, &view, &state, config.locale)?;
        let shared = session.location().await;
        if !shared.is_empty() {
            writeln!(out)?;
            writeln!(out, "?{shared}")?;
        }
    }

    match state.last_error {
        Some(err) => Err(anyhow!(err).context("failed to load articles")),
        None => Ok(()),
    }
}

async fn show<W: Write>(
    id: &str,
    config: &ClientConfig,
    source: Arc<dyn ContentSource>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let fetcher = ContentFetcher::new(source, config.request_timeout);
    let mut session = DetailSession::new(DetailLoader::new(fetcher, config.related_cap));

    match session.open(id).await {
        DetailState::Ready(view) if json => {
            writeln!(out, "{}", serde_json::to_string_pretty(view)?)?;
            Ok(())
        },
        DetailState::Ready(view) => {
            output::render_detail(out, view, config.locale)?;
            Ok(())
        },
        DetailState::NotFound { id } => {
            writeln!(out, "{}", i18n::strings(config.locale).not_found)?;
            bail!("article not found: {id}")
        },
        DetailState::Failed { id, error } => {
            let notice = ErrorNotice::for_error(error);
            writeln!(out, "! {}", notice.message(config.locale))?;
            Err(anyhow!(error.clone()).context(format!("failed to load article {id}")))
        },
        DetailState::Idle | DetailState::Loading { .. } => bail!("detail load did not finish"),
    }
}

async fn tags<W: Write>(
    config: &ClientConfig,
    source: Arc<dyn ContentSource>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let fetcher = ContentFetcher::new(source, config.request_timeout);
    let tags = fetcher.fetch_tags().await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&tags)?)?;
    } else {
        output::render_tags(out, &tags, config.locale)?;
    }
    Ok(())
}
