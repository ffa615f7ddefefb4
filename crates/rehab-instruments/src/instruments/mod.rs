pub mod barthel;
pub mod fim;
pub mod katz_adl;
