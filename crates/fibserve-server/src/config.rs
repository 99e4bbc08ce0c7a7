//! Server configuration from CLI flags and environment.

use std::num::NonZeroUsize;

use clap::{Parser, ValueEnum};
use fibserve_core::memory_budget::parse_memory_limit;
use fibserve_core::Limits;

/// FibServe — Fibonacci numbers of any size over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "fibserve", version, about)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0", env = "FIBSERVE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value = "8080", env = "FIBSERVE_PORT")]
    pub port: u16,

    /// Largest count or index a request may ask for (0 = unlimited).
    #[arg(long, default_value = "20000", env = "FIBSERVE_MAX_N")]
    pub max_n: u64,

    /// Memory a single request may need (e.g., "512M", "2G"; 0 = unlimited).
    #[arg(long, default_value = "0", value_parser = parse_memory_limit, env = "FIBSERVE_MEMORY_LIMIT")]
    pub memory_limit: usize,

    /// Number of single values kept by the nth endpoint.
    #[arg(long, default_value = "1024", env = "FIBSERVE_NTH_CACHE_SIZE")]
    pub nth_cache_size: NonZeroUsize,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "FIBSERVE_LOG_FORMAT")]
    pub log_format: LogFormat,
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output for development.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl ServerConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Request limits handed to the core.
    #[must_use]
    pub fn limits(&self) -> Limits {
        Limits::from_raw(self.max_n, self.memory_limit)
    }
}
