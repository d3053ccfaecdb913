use std::time::Duration;

use clap::{Parser, Subcommand};
use futures::future::try_join_all;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reddit_links::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use reddit_links::{Client, ClientConfig, LinkPage, Sort};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(long, env = "REDDIT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[clap(long, env = "REDDIT_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
    #[clap(long, env = "REDDIT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    #[clap(long, value_parser)]
    timeout_secs: Option<u64>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the links of one or more communities.
    List {
        #[clap(short, long, value_parser, required = true)]
        subreddit: Vec<String>,
        #[clap(short = 'o', long, value_enum, default_value_t = Sort::Hot)]
        sort: Sort,
    },
    /// Delete one of your own links by id.
    Delete {
        #[clap(long, value_parser)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Args = Args::parse();
    let client = Client::new(ClientConfig {
        base_url: args.base_url,
        user_agent: args.user_agent,
        access_token: args.access_token,
        timeout: args.timeout_secs.map(Duration::from_secs),
    })?;

    match args.command {
        Command::List { subreddit, sort } => {
            let pages = try_join_all(
                subreddit
                    .iter()
                    .map(|name| client.get_links_page(name, sort)),
            )
            .await?;
            for (name, page) in subreddit.iter().zip(pages) {
                print_page(name, sort, &page);
            }
        }
        Command::Delete { id } => {
            client.delete_link(&id).await?;
            info!(%id, "link deleted");
        }
    }

    Ok(())
}

fn print_page(subreddit: &str, sort: Sort, page: &LinkPage) {
    println!("/r/{}/{}", subreddit, sort);
    for link in &page.links {
        println!("{:>6} {} {}", link.score, link.id, link.title);
    }
    if let Some(after) = &page.after {
        println!("next page after {}", after);
    }
}
