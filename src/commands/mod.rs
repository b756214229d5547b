pub mod interactive;
pub mod search;

use std::time::Duration;

use crate::cli::{DisplayArgs, EndpointArgs};
use crate::fetch::{FetchConfig, GraphqlFetcher};
use crate::render::RenderOptions;

fn build_fetcher(args: &EndpointArgs) -> GraphqlFetcher {
    GraphqlFetcher::new(FetchConfig {
        endpoint: args.endpoint.clone(),
        timeout: args.timeout_ms.map(Duration::from_millis),
    })
}

fn render_options(args: &DisplayArgs) -> RenderOptions {
    RenderOptions {
        theme: args.theme,
        color: !args.no_color,
    }
}
