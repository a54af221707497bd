use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use japan_info_client::ClientConfig;
use japan_info_shared::{Locale, SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Newest,
    MostPopular,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Newest => SortOrder::Newest,
            SortArg::MostPopular => SortOrder::MostPopular,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ji-cli", version, about = "Browse japan-info articles from the terminal")]
pub struct Cli {
    /// Backend API root (defaults to `JAPAN_INFO_API_BASE`).
    #[arg(long, global = true)]
    pub api_base: Option<String>,
    /// Display language: `ja` or `ko` (defaults to `JAPAN_INFO_LOCALE`).
    #[arg(long, global = true, value_parser = parse_locale)]
    pub locale: Option<Locale>,
    /// Request timeout in milliseconds (defaults to `JAPAN_INFO_TIMEOUT_MS`).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
    /// Print raw JSON instead of formatted text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List articles matching search, tag and popularity filters.
    List(ListArgs),
    /// Show one article with its neighbours and related articles.
    Show {
        /// Article id (markdown file stem).
        id: String,
    },
    /// List every tag with its article count.
    Tags,
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Keyword matched against titles, descriptions, bodies and tags.
    #[arg(long)]
    pub q: Option<String>,
    /// Required tag; repeat for several (all must match).
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Only articles marked popular.
    #[arg(long)]
    pub popular: bool,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    /// 1-based page number.
    #[arg(long)]
    pub page: Option<usize>,
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Shareable query string to start from, e.g. `tags=ramen&page=2`.
    /// Flags given alongside it take precedence.
    #[arg(long)]
    pub location: Option<String>,
}

impl Cli {
    /// Applies command-line overrides on top of `base`.
    pub fn client_config(&self, mut base: ClientConfig) -> Result<ClientConfig> {
        if let Some(api_base) = &self.api_base {
            base.api_base = api_base.trim().trim_end_matches('/').to_string();
        }
        let parsed = url::Url::parse(&base.api_base)
            .with_context(|| format!("invalid API base `{}`", base.api_base))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("API base must use http or https, got `{}`", parsed.scheme());
        }

        if let Some(locale) = self.locale {
            base.locale = locale;
        }
        match self.timeout_ms {
            Some(0) => bail!("--timeout-ms must be positive"),
            Some(ms) => base.request_timeout = Duration::from_millis(ms),
            None => {},
        }
        if let Commands::List(ListArgs {
            page_size: Some(size),
            ..
        }) = &self.command
        {
            if *size == 0 {
                bail!("--page-size must be positive");
            }
            base.page_size = *size;
        }
        Ok(base)
    }
}

fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("unknown locale `{raw}` (expected ja or ko)"))
}
