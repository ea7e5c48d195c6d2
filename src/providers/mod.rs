pub mod dolarapi;
pub mod exchangerate_api;
pub mod util;
