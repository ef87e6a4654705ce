pub mod export_reader;
