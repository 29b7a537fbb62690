//! Excel I/O for fields files

mod reader;
mod writer;

pub use reader::read_fields_excel;
pub use writer::write_fields_excel;

/// Column indices (must match `records::COLUMNS`)
mod cols {
    pub const NAME: u16 = 0;
    pub const LABEL: u16 = 1;
    pub const TYPE: u16 = 2;
    pub const LENGTH: u16 = 3;
    pub const PRECISION: u16 = 4;
    pub const SCALE: u16 = 5;
    pub const REQUIRED: u16 = 6;
    pub const UNIQUE: u16 = 7;
    pub const UPDATEABLE: u16 = 8;
    pub const CREATEABLE: u16 = 9;
    pub const REFERENCE_TO: u16 = 10;
    pub const PICKLIST_VALUES: u16 = 11;
    pub const CAN_MIGRATE: u16 = 12;
    pub const MIGRATION_TYPE: u16 = 13;
    pub const MIGRATION_NOTES: u16 = 14;
    pub const HUBSPOT_PROPERTY: u16 = 15;
}
