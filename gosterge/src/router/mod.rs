pub mod page;
pub mod series;
