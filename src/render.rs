use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use url::Url;

use crate::model::ResultEntry;
use crate::query::normalize_search_term;
use crate::search::SearchSession;
use crate::util::now_utc_string;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?sz=64&domain=";

pub const PLACEHOLDER_OPTIONS: [&str; 7] = [
    "github",
    "dapp",
    "web3",
    "ao",
    "arweave",
    "weave",
    "decentralised",
];

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                title: "\x1b[1;34m",
                redirect: "\x1b[90m",
                notice: "\x1b[33m",
            },
            Self::Dark => Palette {
                title: "\x1b[1;94m",
                redirect: "\x1b[37m",
                notice: "\x1b[93m",
            },
        }
    }
}

struct Palette {
    title: &'static str,
    redirect: &'static str,
    notice: &'static str,
}

const RESET: &str = "\x1b[0m";

#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    pub theme: Theme,
    pub color: bool,
}

impl RenderOptions {
    fn paint(&self, pick: fn(&Palette) -> &'static str, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let palette = self.theme.palette();
        format!("{}{text}{RESET}", pick(&palette))
    }
}

pub fn favicon_url(redirect: &str) -> Option<String> {
    let parsed = Url::parse(redirect).ok()?;
    let host = parsed.host_str().filter(|host| !host.is_empty())?;
    Some(format!("{FAVICON_SERVICE}{host}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub redirect: Option<String>,
    pub favicon_url: Option<String>,
}

impl From<&ResultEntry> for DisplayEntry {
    fn from(entry: &ResultEntry) -> Self {
        let tags = entry.distinguished();
        let favicon_url = tags.redirect.as_deref().and_then(favicon_url);
        Self {
            id: entry.id().to_string(),
            title: tags.title,
            description: tags.description,
            redirect: tags.redirect,
            favicon_url,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    normalized_query: String,
    endpoint: &'a str,
    fetched_at: String,
    returned: usize,
    results: Vec<DisplayEntry>,
}

pub fn no_results_message(query: &str) -> String {
    format!("No results found for \"{query}\". Please try a different keyword.")
}

/// Writes whatever the session currently shows: notification, empty notice, or list.
pub fn write_session_text<W: Write>(
    out: &mut W,
    session: &SearchSession,
    options: &RenderOptions,
) -> Result<()> {
    if let Some(err) = session.last_error() {
        writeln!(out, "{}", options.paint(|p| p.notice, &err.to_string()))?;
        return Ok(());
    }

    if session.is_empty_settled() {
        let query = session.last_query().unwrap_or_default();
        writeln!(
            out,
            "{}",
            options.paint(|p| p.notice, &no_results_message(query))
        )?;
        return Ok(());
    }

    write_entries_text(out, session.results(), options)
}

pub fn write_entries_text<W: Write>(
    out: &mut W,
    entries: &[ResultEntry],
    options: &RenderOptions,
) -> Result<()> {
    for (idx, entry) in entries.iter().enumerate() {
        let display = DisplayEntry::from(entry);
        writeln!(out, "{}. {}", idx + 1, display.id)?;

        if let (Some(title), Some(_)) = (&display.title, &display.redirect) {
            writeln!(out, "\t{}", options.paint(|p| p.title, title))?;
        }
        if let Some(redirect) = &display.redirect {
            writeln!(out, "\t{}", options.paint(|p| p.redirect, redirect))?;
        }
        if let Some(description) = &display.description {
            writeln!(out, "\t{description}")?;
        }
        if let Some(favicon) = &display.favicon_url {
            writeln!(out, "\tfavicon: {favicon}")?;
        }
    }
    Ok(())
}

pub fn write_json_report<W: Write>(
    out: &mut W,
    query: &str,
    endpoint: &str,
    entries: &[ResultEntry],
) -> Result<()> {
    let report = SearchReport {
        query,
        normalized_query: normalize_search_term(query),
        endpoint,
        fetched_at: now_utc_string(),
        returned: entries.len(),
        results: entries.iter().map(DisplayEntry::from).collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)
        .context("failed to serialize search json output")?;
    writeln!(out)?;
    Ok(())
}

/// Rotating search hint for the interactive prompt.
#[derive(Debug, Default)]
pub struct PlaceholderCycle {
    index: usize,
}

impl PlaceholderCycle {
    pub fn current(&self) -> &'static str {
        PLACEHOLDER_OPTIONS[self.index]
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % PLACEHOLDER_OPTIONS.len();
    }

    pub fn prompt(&self) -> String {
        format!("Search {}> ", self.current())
    }
}
