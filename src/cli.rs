use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use rootnet::{install_panic_hook, App, Config};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Pick a host from the rootnet hosts file and connect to it",
    long_about = "Pick a host from the rootnet hosts file and connect to it

Each line of the hosts file is `name | host`. A query that matches exactly one
name or host is used directly, otherwise a filterable list is shown.

Examples:
  rootnet                   (pick from all hosts, then ssh)
  rootnet db                (ssh to the only host matching db)
  rootnet get prod          (print the chosen host)
  ssh $(rootnet get web)
",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// narrow the host list before picking
    query: Option<String>,

    /// hosts file to read (defaults to ~/rootnet_hosts.txt)
    #[arg(long, global = true, env = "ROOTNET_HOSTS")]
    hosts_file: Option<PathBuf>,

    /// program used to open the session
    #[arg(long = "ssh", global = true, env = "ROOTNET_SSH", default_value = rootnet::DEFAULT_SSH_PROGRAM)]
    ssh_program: String,

    /// log level (RUST_LOG takes precedence)
    #[arg(long, global = true, value_parser = LevelFilter::from_str, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// print the resolved host instead of connecting
    Get {
        /// narrow the host list before picking
        query: Option<String>,
    },
}

impl Cli {
    fn config(&self) -> Config {
        let hosts_file = self
            .hosts_file
            .clone()
            .unwrap_or_else(Config::default_hosts_file);
        Config::new(hosts_file).with_ssh_program(self.ssh_program.clone())
    }
}

fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

// stdout carries only the host so `$(rootnet get ...)` stays clean
fn print_host<W: Write>(out: &mut W, host: &str) -> io::Result<()> {
    write!(out, "{}", host)?;
    out.flush()
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_file.as_deref())?;
    install_panic_hook();

    let app = App::new(cli.config());
    log::debug!("hosts file: {:?}", app.config().hosts_file);

    match &cli.command {
        Some(Commands::Get { query }) => {
            let host = app.get(query.as_deref().unwrap_or(""));
            print_host(&mut io::stdout(), &host)?;
        }
        None => {
            if let Some(status) = app.connect(cli.query.as_deref().unwrap_or("")) {
                log::debug!("session finished: {}", status);
            }
        }
    }

    Ok(())
}
