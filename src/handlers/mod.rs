pub mod suppliers;
