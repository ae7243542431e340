/// `reqwest`-backed scoring service client.
pub mod http;
/// Wire records returned by the scoring service.
pub mod models;
/// Abstraction over the scoring service.
pub mod scoreboard;
/// Transport error shared by every client implementation.
pub mod transport;

#[cfg(test)]
pub mod fake;
