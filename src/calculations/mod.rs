pub mod first_fit;
