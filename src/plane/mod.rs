pub mod client;
pub mod models;
#[cfg(test)]
pub mod test_support;
pub mod workspace;
