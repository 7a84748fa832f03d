pub mod csv_loader;

pub use csv_loader::load_topics_from_csv;
