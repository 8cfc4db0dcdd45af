use {
    reqwest::{Client, ClientBuilder},
    std::{fmt, time::Duration},
};

const USER_AGENT: &str = "untron/0.1.0";

/// Builds the reqwest clients used for outbound calls to the order service,
/// so every client shares the same user agent and timeout while keeping its
/// own connection pool.
#[derive(Clone, Debug)]
pub struct HttpClientFactory {
    timeout: Duration,
}

impl HttpClientFactory {
    pub fn new(args: &Arguments) -> Self {
        Self {
            timeout: args.http_timeout,
        }
    }

    /// Creates a new HTTP client with the shared settings.
    pub fn create(&self) -> Client {
        self.builder().build().unwrap()
    }

    /// A `ClientBuilder` with the shared settings, for clients that need
    /// additional per-API configuration.
    pub fn builder(&self) -> ClientBuilder {
        ClientBuilder::new()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
    }
}

impl Default for HttpClientFactory {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

/// Command line arguments for the common HTTP factory.
#[derive(clap::Parser)]
#[group(skip)]
pub struct Arguments {
    /// Timeout for requests to the order service.
    #[clap(
        long,
        env,
        default_value = "10s",
        value_parser = humantime::parse_duration,
    )]
    pub http_timeout: Duration,
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self { http_timeout } = self;

        writeln!(f, "http_timeout: {:?}", http_timeout)
    }
}
