pub mod homes;
