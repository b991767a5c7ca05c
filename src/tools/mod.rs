pub mod str_writer;
