pub mod parse_msg;
