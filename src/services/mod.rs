pub mod polygon;

#[cfg(test)]
pub mod fake;
