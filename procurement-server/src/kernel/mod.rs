pub mod db;
pub mod entities;
pub mod validation;

#[cfg(test)]
pub mod test_utils;
