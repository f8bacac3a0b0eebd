/*!
# Hush Command Line Interface

A binary for poking the Hush Feeds server's gRPC-Web endpoints from the
command line. Results print as JSON.

## Usage

```bash
hushcli help [subcommand]
```

## Example

```bash
hushcli height
hushcli identity hush1abc
hushcli search alice --limit 5
hushcli feeds hush1abc
hushcli group feed-42
hushcli invite ABC123
```

## Dev

To run from source against a non-default server:

```bash
HUSH_SERVER__BASE_URL=https://hush.example.org cargo run --bin hushcli -- height
```
*/
use std::sync::Arc;

use clap::{App, Arg, SubCommand};
use hush_rpc::service::HushClient;
use hush_rpc::settings::Settings;

#[tokio::main]
pub async fn main() -> hush_rpc::Result<()> {
    tracing_subscriber::fmt::init();

    let matches = App::new("Hush Command Line Interface")
        .about("Query the Hush Feeds server over gRPC-Web")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("config file name"),
        )
        .subcommand(SubCommand::with_name("height").about("prints the current blockchain height"))
        .subcommand(
            SubCommand::with_name("identity")
                .about("looks up the identity registered for an address")
                .arg(Arg::with_name("address").required(true).takes_value(true)),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("searches identities by display name")
                .arg(Arg::with_name("query").required(true).takes_value(true))
                .arg(
                    Arg::with_name("limit")
                        .short("l")
                        .long("limit")
                        .takes_value(true)
                        .default_value("20"),
                ),
        )
        .subcommand(
            SubCommand::with_name("feeds")
                .about("lists the feeds an address participates in")
                .arg(Arg::with_name("address").required(true).takes_value(true)),
        )
        .subcommand(
            SubCommand::with_name("group")
                .about("fetches group feed details by feed id")
                .arg(Arg::with_name("feed-id").required(true).takes_value(true)),
        )
        .subcommand(
            SubCommand::with_name("invite")
                .about("previews a group feed by invite code")
                .arg(Arg::with_name("code").required(true).takes_value(true)),
        )
        .get_matches();

    let config_name = matches.value_of("config").unwrap_or("config");
    let settings = Arc::new(Settings::load(config_name)?);
    let client = HushClient::new(settings);

    match matches.subcommand() {
        ("height", Some(_)) => {
            let height = client.blockchain.get_blockchain_height().await?;
            println!("{}", height);
        }
        ("identity", Some(sub_matches)) => {
            let address = sub_matches.value_of("address").unwrap();
            match client.identity.get_identity(address).await? {
                Some(identity) => print_json(&identity),
                None => println!("no identity registered for {}", address),
            }
        }
        ("search", Some(sub_matches)) => {
            let query = sub_matches.value_of("query").unwrap();
            let limit = sub_matches
                .value_of("limit")
                .unwrap()
                .parse::<u32>()
                .unwrap_or(20);
            print_json(&client.identity.search_by_display_name(query, limit).await?);
        }
        ("feeds", Some(sub_matches)) => {
            let address = sub_matches.value_of("address").unwrap();
            print_json(&client.feed.get_feeds_for_address(address).await?);
        }
        ("group", Some(sub_matches)) => {
            let feed_id = sub_matches.value_of("feed-id").unwrap();
            print_json(&client.group.get_group_feed(feed_id).await?);
        }
        ("invite", Some(sub_matches)) => {
            let code = sub_matches.value_of("code").unwrap();
            print_json(&client.group.get_group_feed_by_invite_code(code).await?);
        }
        _ => {
            println!("{}", matches.usage());
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("could not render result: {}", err),
    }
}
