pub mod filters_sheet;
pub mod page_jump;
pub mod table;
