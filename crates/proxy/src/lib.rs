//! Query pipeline for the catapult dataset proxy:
//! resolve SQL -> submit -> poll -> fetch -> envelope.

pub mod config;
pub mod envelope;
pub mod error;
pub mod limit;
pub mod proxy;
pub mod request;

pub use config::ProxyConfig;
pub use envelope::ResponseEnvelope;
pub use error::ProxyError;
pub use proxy::{QueryOutput, QueryProxy};
