pub mod create_eml;
