//! The served capability: a stateless echo.

mod echo;

pub use echo::EchoService;
