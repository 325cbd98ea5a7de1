pub mod errors;
pub mod db;
pub mod ship;

#[cfg(test)]
mod tests;
