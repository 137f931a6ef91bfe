// src/pipeline/commands.rs

//! Chat command parsing and dispatch.
//!
//! | Command                   | Effect                                  |
//! |---------------------------|-----------------------------------------|
//! | `list`                    | print the station directory             |
//! | `bus_list <station name>` | report the board of a listed station    |
//! | `bus <url>`               | report the board at a raw URL           |
//! | `add <station name> <id>` | add or update a station                 |
//! | `remove <station name>`   | remove a station                        |

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{Station, validate_station};
use crate::pipeline::{BotContext, fetch_and_report};
use crate::utils::station_url;

static COMMAND_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\S+)(?:\s+(.*?))?\s*$").ok());

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    List,
    BusList { station: String },
    Bus { url: String },
    Add { station: String, id: String },
    Remove { station: String },
}

impl BotCommand {
    /// Parse a chat line.
    ///
    /// Returns `Ok(None)` when the line does not start with `prefix`, and
    /// [`AppError::InvalidCommand`] for unknown commands or missing arguments.
    pub fn parse(line: &str, prefix: &str) -> Result<Option<Self>> {
        let Some(body) = line.trim().strip_prefix(prefix) else {
            return Ok(None);
        };

        let re = COMMAND_RE
            .as_ref()
            .ok_or_else(|| AppError::config("command pattern failed to compile"))?;
        let caps = re
            .captures(body)
            .ok_or_else(|| AppError::InvalidCommand(line.trim().to_string()))?;

        let name = caps.get(1).map_or("", |m| m.as_str());
        let args = caps.get(2).map_or("", |m| m.as_str());

        let command = match name {
            "list" => Self::List,
            "bus_list" => Self::BusList {
                station: required(name, normalize_name(args))?,
            },
            "bus" => Self::Bus {
                url: required(name, args.split_whitespace().next().unwrap_or("").to_string())?,
            },
            "add" => {
                let fields: Vec<&str> = args.split_whitespace().collect();
                match fields.split_last() {
                    Some((id, station)) if !station.is_empty() => Self::Add {
                        station: station.join(" "),
                        id: id.to_string(),
                    },
                    _ => {
                        return Err(AppError::InvalidCommand(format!(
                            "{name}: expected <station name> <id>"
                        )));
                    }
                }
            }
            "remove" => Self::Remove {
                station: required(name, normalize_name(args))?,
            },
            other => return Err(AppError::InvalidCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn normalize_name(args: &str) -> String {
    args.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn required(command: &str, value: String) -> Result<String> {
    if value.is_empty() {
        Err(AppError::InvalidCommand(format!("{command}: missing argument")))
    } else {
        Ok(value)
    }
}

/// Run a parsed command. Errors are returned to the caller untouched.
pub async fn execute(ctx: &BotContext, command: BotCommand) -> Result<()> {
    log::info!("Executing {:?}", command);

    match command {
        BotCommand::List => {
            let directory = ctx.storage.load_stations().await?;
            ctx.sink
                .send(&ctx.formatter.format_directory(&directory))
                .await?;
        }

        BotCommand::BusList { station } => {
            let directory = ctx.storage.load_stations().await?;
            match directory.resolve(&station) {
                Ok(found) => {
                    let url = station_url(&ctx.fetcher_config, &found.id)?;
                    fetch_and_report(ctx, &url).await?;
                }
                Err(AppError::UnknownStation(name)) => {
                    log::info!("Station '{}' is not registered", name);
                    ctx.sink.send(&ctx.formatter.not_registered(&name)).await?;
                }
                Err(e) => return Err(e),
            }
        }

        BotCommand::Bus { url } => {
            url::Url::parse(&url)?;
            fetch_and_report(ctx, &url).await?;
        }

        BotCommand::Add { station, id } => {
            let station = Station::new(station, id);
            validate_station(&station)?;

            let mut directory = ctx.storage.load_stations().await?;
            let message = ctx.formatter.station_saved(&station.name, &station.id);
            directory.upsert(station);
            ctx.storage.save_stations(&directory).await?;
            ctx.sink.send(&message).await?;
        }

        BotCommand::Remove { station } => {
            let mut directory = ctx.storage.load_stations().await?;
            let message = match directory.remove(&station) {
                Some(removed) => {
                    ctx.storage.save_stations(&directory).await?;
                    ctx.formatter.station_removed(&removed.name)
                }
                None => ctx.formatter.not_registered(&station),
            };
            ctx.sink.send(&message).await?;
        }
    }

    Ok(())
}

/// Handle one chat line end to end.
///
/// Non-command lines are ignored. Invalid commands get the usage hint and
/// any other failure gets the generic apology; the detail is only logged.
pub async fn handle_line(ctx: &BotContext, line: &str) -> Result<()> {
    let result = match BotCommand::parse(line, &ctx.command_prefix) {
        Ok(Some(command)) => execute(ctx, command).await,
        Ok(None) => return Ok(()),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(()),
        Err(AppError::InvalidCommand(detail)) => {
            log::info!("Invalid command '{}'", detail);
            ctx.sink.send(&ctx.formatter.messages().usage).await
        }
        Err(e) => {
            log::error!("Command '{}' failed: {}", line.trim(), e);
            ctx.sink.send(&ctx.formatter.messages().apology).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationDirectory;
    use crate::pipeline::context::testing::{FakeFetcher, board_html, harness};

    const BASE: &str =
        "https://transfer.navitime.biz/chuo-bus/pc/location/BusLocationResult";

    fn gates() -> StationDirectory {
        StationDirectory::new(vec![
            Station::new("North Gate", "101"),
            Station::new("South Gate", "202"),
        ])
    }

    fn url_for(id: &str) -> String {
        format!("{BASE}?startId={id}&sort=minutesToArrival")
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(BotCommand::parse("!list", "!").unwrap(), Some(BotCommand::List));
        assert_eq!(
            BotCommand::parse("  !bus_list   South  Gate ", "!").unwrap(),
            Some(BotCommand::BusList {
                station: "South Gate".to_string()
            })
        );
        assert_eq!(
            BotCommand::parse("!bus https://example.com/x?startId=1", "!").unwrap(),
            Some(BotCommand::Bus {
                url: "https://example.com/x?startId=1".to_string()
            })
        );
        assert_eq!(
            BotCommand::parse("!add East Gate 303", "!").unwrap(),
            Some(BotCommand::Add {
                station: "East Gate".to_string(),
                id: "303".to_string()
            })
        );
        assert_eq!(
            BotCommand::parse("!remove East Gate", "!").unwrap(),
            Some(BotCommand::Remove {
                station: "East Gate".to_string()
            })
        );
    }

    #[test]
    fn test_parse_ignores_plain_chat() {
        assert_eq!(BotCommand::parse("hello there", "!").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_unknown_and_incomplete() {
        assert!(matches!(
            BotCommand::parse("!frobnicate", "!"),
            Err(AppError::InvalidCommand(_))
        ));
        assert!(matches!(
            BotCommand::parse("!bus_list", "!"),
            Err(AppError::InvalidCommand(_))
        ));
        assert!(matches!(
            BotCommand::parse("!add 303", "!"),
            Err(AppError::InvalidCommand(_))
        ));
        assert!(matches!(
            BotCommand::parse("!", "!"),
            Err(AppError::InvalidCommand(_))
        ));
    }

    #[tokio::test]
    async fn test_list_prints_directory_in_file_order() {
        let h = harness(gates(), FakeFetcher::default());

        handle_line(&h.ctx, "!list").await.unwrap();

        let sent = h.sink.sent();
        assert_eq!(sent.len(), 1);
        let north = sent[0].find("North Gate      101").unwrap();
        let south = sent[0].find("South Gate      202").unwrap();
        assert!(north < south);
        assert!(h.fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_bus_list_fetches_station_url() {
        let url = url_for("202");
        let html = board_html("South Gate", &[("12", "10:05", "Central", "/icons/bus_n.png")]);
        let h = harness(gates(), FakeFetcher::default().with_page(&url, &html));

        handle_line(&h.ctx, "!bus_list South Gate").await.unwrap();

        assert_eq!(h.fetcher.requests(), vec![url]);
        let sent = h.sink.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("**South Gate**\n"));
    }

    #[tokio::test]
    async fn test_duplicate_station_names_use_first_line() {
        let directory = StationDirectory::parse("Hachioji 111\nTachikawa 42\nHachioji 222\n");
        let url = url_for("111");
        let h = harness(
            directory,
            FakeFetcher::default().with_page(&url, &board_html("Hachioji", &[])),
        );

        handle_line(&h.ctx, "!list").await.unwrap();
        handle_line(&h.ctx, "!bus_list Hachioji").await.unwrap();

        let sent = h.sink.sent();
        assert!(sent[0].contains("Hachioji        111"));
        assert!(sent[0].contains("Hachioji        222"));
        assert_eq!(h.fetcher.requests(), vec![url]);
    }

    #[tokio::test]
    async fn test_bus_list_unknown_station_does_not_fetch() {
        let h = harness(gates(), FakeFetcher::default());

        handle_line(&h.ctx, "!bus_list West Gate").await.unwrap();

        assert!(h.fetcher.requests().is_empty());
        assert_eq!(
            h.sink.sent(),
            vec!["**West Gate** is not registered in the list."]
        );
    }

    #[tokio::test]
    async fn test_bus_and_bus_list_share_report() {
        let url = url_for("101");
        let html = board_html("North Gate", &[("7", "10:20", "Airport", "/icons/bus_s.png")]);
        let h = harness(gates(), FakeFetcher::default().with_page(&url, &html));

        handle_line(&h.ctx, "!bus_list North Gate").await.unwrap();
        handle_line(&h.ctx, &format!("!bus {url}")).await.unwrap();

        let sent = h.sink.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
        assert_eq!(h.fetcher.requests(), vec![url.clone(), url]);
    }

    #[tokio::test]
    async fn test_unknown_command_gets_usage() {
        let h = harness(gates(), FakeFetcher::default());

        handle_line(&h.ctx, "!weather").await.unwrap();

        assert_eq!(
            h.sink.sent(),
            vec!["Unknown command. Try `!list` or `!bus_list <station>`."]
        );
    }

    #[tokio::test]
    async fn test_other_failures_get_apology() {
        let h = harness(gates(), FakeFetcher::default());

        handle_line(&h.ctx, "!bus not-a-url").await.unwrap();

        assert!(h.fetcher.requests().is_empty());
        assert_eq!(
            h.sink.sent(),
            vec![
                "Something went wrong while running the command. Please contact an administrator."
            ]
        );
    }

    #[tokio::test]
    async fn test_add_and_remove_stations() {
        let h = harness(gates(), FakeFetcher::default());

        handle_line(&h.ctx, "!add East Gate 303").await.unwrap();
        handle_line(&h.ctx, "!add North Gate 111").await.unwrap();
        handle_line(&h.ctx, "!remove South Gate").await.unwrap();
        handle_line(&h.ctx, "!remove South Gate").await.unwrap();

        let directory = h.storage.stations.lock().unwrap().clone();
        let rows: Vec<_> = directory
            .iter()
            .map(|s| (s.name.clone(), s.id.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("North Gate".to_string(), "111".to_string()),
                ("East Gate".to_string(), "303".to_string()),
            ]
        );

        assert_eq!(
            h.sink.sent(),
            vec![
                "Saved **East Gate** (303).",
                "Saved **North Gate** (111).",
                "Removed **South Gate**.",
                "**South Gate** is not registered in the list.",
            ]
        );
    }
}
