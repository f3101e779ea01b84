pub mod models;
pub mod services;
pub mod transfers;

#[cfg(test)]
mod tests;
