use clap::{Parser, Subcommand};
use kv_server::logging::root_logger;
use kv_server::config::ClientArgs;
use kv_server::{ClientConfig, KvClient};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "kv-client", version, about = "Talk to a kv-server")]
struct Cli {
    #[command(flatten)]
    connection: ClientArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the server to greet NAME
    Greet { name: String },
    /// Set the value of a string key to a string
    Set { key: String, value: String },
    /// Get the string value of a given string key
    Get { key: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = ClientConfig::from(cli.connection);
    let client = KvClient::connect(&config, root_logger()).await?;

    match cli.command {
        Some(Command::Greet { name }) => println!("{}", client.greet(&name).await?),
        Some(Command::Set { key, value }) => client.set(&key, &value).await?,
        Some(Command::Get { key }) => println!("{}", client.get(&key).await?),
        None => {
            let reply = client.say_hello("world").await;
            println!("Greeter received: {}", reply);

            client.set_key("1", "1").await;
            client.set_key("2", "2").await;

            println!("got keys: ");
            println!("1: {}", client.get_key("1").await);
            println!("2: {}", client.get_key("2").await);
        }
    }
    Ok(())
}
