pub mod config;
pub mod logging;

pub mod checksum;
pub mod console;
pub mod deferred;
pub mod driver;
pub mod printer;
pub mod worker;
