use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::SearchArgs;
use crate::commands::{build_fetcher, render_options};
use crate::render::{write_json_report, write_session_text};
use crate::search::SearchSession;

pub fn run(args: SearchArgs) -> Result<()> {
    let fetcher = build_fetcher(&args.endpoint);
    let options = render_options(&args.display);
    let mut session = SearchSession::new();

    info!(
        query = %args.query,
        endpoint = %fetcher.endpoint(),
        theme = args.display.theme.as_str(),
        "search requested"
    );

    if let Err(err) = session.search(&args.query, &fetcher) {
        let mut stderr = io::stderr().lock();
        write_session_text(&mut stderr, &session, &options)?;
        return Err(err).context("search did not complete");
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        write_json_report(
            &mut output,
            &args.query,
            fetcher.endpoint(),
            session.results(),
        )?;
    } else {
        write_session_text(&mut output, &session, &options)?;
    }
    output.flush()?;

    info!(results = session.results().len(), "search completed");
    Ok(())
}
