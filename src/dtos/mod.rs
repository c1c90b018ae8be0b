pub mod flash_sale;
pub mod inventory;
