pub mod admission;
pub mod cli;
pub mod conf;
pub mod dispatch;
pub mod logging;
