pub mod discovery;
pub mod traits;
pub mod transport;
