use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use wormhole_core::ShortCode;

pub const LISTEN_ADDR_ENV: &str = "WORMHOLE_GATEWAY_LISTEN_ADDR";
pub const FIXED_CODE_ENV: &str = "WORMHOLE_GATEWAY_FIXED_CODE";
pub const CODE_LENGTH_ENV: &str = "WORMHOLE_GATEWAY_CODE_LENGTH";
pub const LOG_FORMAT_ENV: &str = "WORMHOLE_GATEWAY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wormhole-gateway")]
pub struct CLI {
    #[arg(short = 'a', long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Store every new URL under this code instead of a generated one.
    /// Each create then overwrites the previous URL.
    #[arg(short = 'b', long, env = FIXED_CODE_ENV, value_parser = parse_short_code)]
    pub fixed_code: Option<ShortCode>,

    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = wormhole_generator::random::DEFAULT_LENGTH,
        value_parser = clap::value_parser!(u8).range(1..=32).map(usize::from),
    )]
    pub code_length: usize,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

fn parse_short_code(value: &str) -> Result<ShortCode, String> {
    ShortCode::new(value).map_err(|err| err.to_string())
}
