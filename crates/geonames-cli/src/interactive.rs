//! Line-driven search session
//!
//! Each stdin line is a new search text. `:select N` picks a row,
//! `:cancel` gives up, and an empty line clears the text.

use geonames_client::{GeoName, GeoNamesError};
use geonames_search::{SearchController, SearchHost, SearchOptions, SearchRow, SearchState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::output::describe;

struct CliHost {
    username: String,
    selection: Option<Option<GeoName>>,
}

impl SearchHost for CliHost {
    fn username(&mut self) -> String {
        self.username.clone()
    }

    fn did_finish(&mut self, result: Option<GeoName>) {
        self.selection = Some(result);
    }

    fn network_activity_changed(&mut self, is_active: bool) {
        debug!(is_active, "Network activity changed");
    }

    fn search_failed(&mut self, error: &GeoNamesError) {
        eprintln!("search failed: {}", error);
    }

    fn results_changed(&mut self, rows: &[SearchRow]) {
        for (index, row) in rows.iter().enumerate() {
            if row.subtitle.is_empty() {
                println!("{:>3}. {}", index, row.title);
            } else {
                println!("{:>3}. {} - {}", index, row.title, row.subtitle);
            }
        }
    }
}

enum Input<'a> {
    Text(&'a str),
    Select(usize),
    Cancel,
}

fn parse_input(line: &str) -> Option<Input<'_>> {
    if let Some(index) = line.strip_prefix(":select") {
        return index.trim().parse().ok().map(Input::Select);
    }
    if line.trim() == ":cancel" {
        return Some(Input::Cancel);
    }
    Some(Input::Text(line))
}

pub async fn run(config: Config) -> Result<()> {
    let host = CliHost {
        username: config.username,
        selection: None,
    };
    let options = SearchOptions {
        language: config.language,
        lookup: config.lookup,
        ..Default::default()
    };
    let mut controller = SearchController::with_options(host, options);

    info!("Type to search; ':select N' picks a row, ':cancel' quits");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Some(Input::Text(text)) => {
                controller.text_changed(text);
                controller.run_until_idle().await;
            }
            Some(Input::Select(index)) => {
                if !controller.select_row(index) {
                    eprintln!("no row {}", index);
                }
            }
            Some(Input::Cancel) => controller.cancel(),
            None => eprintln!("usage: :select N"),
        }

        if controller.state() == SearchState::Finished {
            break;
        }
    }

    match controller.into_host().selection {
        Some(Some(geoname)) => println!("selected: {}", describe(&geoname)),
        Some(None) => println!("cancelled"),
        None => debug!("Input ended without a selection"),
    }

    Ok(())
}
