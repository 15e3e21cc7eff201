pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod logging;
pub mod lookup;
pub mod mapping;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod server;
pub mod sink;
pub mod vocab;
