//! Chinese address geolocation: province, city and county with geocodes,
//! resolved by substring matching against fixed reference dictionaries.

pub mod config;
pub mod location;
pub mod logging;
pub mod server;
