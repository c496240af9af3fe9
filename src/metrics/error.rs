#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to bind local statsd socket: {0}")]
    Bind(#[source] std::io::Error),
    #[error("failed to set up collector address `{addr}`: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to send gauges to collector: {0}")]
    Send(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
