use anyhow::{anyhow, Result};
use clap::{App as ClapApp, Arg, SubCommand};
use trello_pocket::app::App;
use trello_pocket::config::Config;
use trello_pocket::utils::token::extract_token;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .subcommand(
            SubCommand::with_name("authorize")
                .about("Prints the URL that grants this client access to your boards"),
        )
        .subcommand(
            SubCommand::with_name("token")
                .about("Stores the access token from the authorization redirect")
                .arg(
                    Arg::with_name("TOKEN")
                        .help("The token, or the full redirect URL containing it")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    match matches.subcommand() {
        ("authorize", Some(_)) => {
            println!("Open this URL, allow access, then run `token` with the redirect URL:");
            println!("{}", config.authorize_url()?);
        }
        ("token", Some(sub)) => {
            let input = sub.value_of("TOKEN").unwrap_or_default();
            let token = extract_token(input)
                .ok_or_else(|| anyhow!("No access token found in '{}'", input))?;
            config.save_token(token)?;
            if let Some(path) = config.file_path() {
                println!("Access token saved to {}", path.display());
            }
        }
        _ => App::start(config).await?,
    }
    Ok(())
}
