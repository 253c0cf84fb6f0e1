pub mod api;
pub mod config;
pub mod runtime;
pub mod script;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(test)]
mod test_support;
