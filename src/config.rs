//! Connection configuration shared by the `stress` and `warmup` commands.

pub mod duration;

pub use duration::{parse_conn_lifetime, parse_duration};

use clap::Args;

/// MySQL connection options, flattened into every subcommand.
#[derive(Args, Clone, Debug)]
pub struct ConnectionOpts {
    /// MySQL host
    #[arg(long, short = 'H', default_value = "localhost", env = "MYSQL_HOST")]
    pub host: String,

    /// MySQL server port
    #[arg(long, short = 'P', default_value_t = 3306)]
    pub port: u16,

    /// MySQL user
    #[arg(long, short = 'u', default_value = "root", env = "MYSQL_USER")]
    pub user: String,

    /// MySQL password
    #[arg(long, short = 'p', default_value = "", env = "MYSQL_PWD")]
    pub password: String,

    /// Max number of open MySQL connections
    #[arg(long = "max-connection", short = 'c', default_value_t = 50)]
    pub max_connections: usize,

    /// Max number of idle MySQL connections
    #[arg(long = "max-idle-connection", short = 'i', default_value_t = 50)]
    pub max_idle_connections: usize,

    /// Maximum amount of time a connection may be reused, e.g. 30s, 5m, 1h;
    /// "none" means connections are never recycled (keeps long-running
    /// queries alive)
    #[arg(long = "connection-max-lifetime", short = 'l', default_value = "none")]
    pub connection_max_lifetime: String,

    /// Show debug level log
    #[arg(long, short = 'D')]
    pub debug: bool,
}
