//! Register map of the FT5x06 family. Only used for help output and for
//! naming registers in log lines.

use std::collections::BTreeMap;

// Documented registers
pub const ID_G_THGROUP: u8 = 0x80;
pub const ID_G_THPEAK: u8 = 0x81;
pub const ID_G_THCAL: u8 = 0x82;
pub const ID_G_THWATER: u8 = 0x83;
pub const ID_G_THTEMP: u8 = 0x84;
pub const ID_G_CTRL: u8 = 0x86;
pub const ID_G_TIME_ENTER_MONITOR: u8 = 0x87;
pub const ID_G_PERIODACTIVE: u8 = 0x88;
pub const ID_G_PERIODMONITOR: u8 = 0x89;
pub const ID_G_AUTO_CLB_MODE: u8 = 0xa0;
pub const ID_G_LIB_VERSION_H: u8 = 0xa1;
pub const ID_G_LIB_VERSION_L: u8 = 0xa2;
pub const ID_G_CIPHER: u8 = 0xa3;
pub const ID_G_MODE: u8 = 0xa4;
pub const ID_G_FIRMID: u8 = 0xa6;
pub const ID_G_FT5201ID: u8 = 0xa8;
pub const ID_G_ERR: u8 = 0xa9;
pub const ID_G_CLB: u8 = 0xaa;
pub const ID_G_B_AREA_TH: u8 = 0xae;
pub const MAX_REG_OFFSET: u8 = ID_G_B_AREA_TH;

// Undocumented registers, used by the vendor firmware update flow
pub const FT_FW_READ_REG: u8 = 0x03;
pub const FT_REG_RESET_FW: u8 = 0x07;
pub const FT_ERASE_APP_REG: u8 = 0x61;
pub const FT_ERASE_PANEL_REG: u8 = 0x63;
pub const FT_FLASH_STATUS: u8 = 0x6a;
pub const FT_PARAM_READ_REG: u8 = 0x85;
pub const FT_READ_ID_REG: u8 = 0x90;
pub const FT_FW_START_REG: u8 = 0xbf;
pub const FT_REG_ECC: u8 = 0xcc;
pub const FT_RST_CMD_REG1: u8 = 0xfc;

// Chip IDs
pub const FT5X06_ID: u8 = 0x55;
pub const FT5X16_ID: u8 = 0x0a;
pub const FT5X26_ID: u8 = 0x54;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Register {
    pub name: &'static str,
    pub documented: bool,
}

fn documented(name: &'static str) -> Register {
    Register {
        name,
        documented: true,
    }
}

fn undocumented(name: &'static str) -> Register {
    Register {
        name,
        documented: false,
    }
}

pub fn register_map() -> BTreeMap<u8, Register> {
    btreemap! {
        ID_G_THGROUP => documented("ID_G_THGROUP"),
        ID_G_THPEAK => documented("ID_G_THPEAK"),
        ID_G_THCAL => documented("ID_G_THCAL"),
        ID_G_THWATER => documented("ID_G_THWATER"),
        ID_G_THTEMP => documented("ID_G_THTEMP"),
        ID_G_CTRL => documented("ID_G_CTRL"),
        ID_G_TIME_ENTER_MONITOR => documented("ID_G_TIME_ENTER_MONITOR"),
        ID_G_PERIODACTIVE => documented("ID_G_PERIODACTIVE"),
        ID_G_PERIODMONITOR => documented("ID_G_PERIODMONITOR"),
        ID_G_AUTO_CLB_MODE => documented("ID_G_AUTO_CLB_MODE"),
        ID_G_LIB_VERSION_H => documented("ID_G_LIB_VERSION_H"),
        ID_G_LIB_VERSION_L => documented("ID_G_LIB_VERSION_L"),
        ID_G_CIPHER => documented("ID_G_CIPHER"),
        ID_G_MODE => documented("ID_G_MODE"),
        ID_G_FIRMID => documented("ID_G_FIRMID"),
        ID_G_FT5201ID => documented("ID_G_FT5201ID"),
        ID_G_ERR => documented("ID_G_ERR"),
        ID_G_CLB => documented("ID_G_CLB"),
        ID_G_B_AREA_TH => documented("ID_G_B_AREA_TH"),
        FT_FW_READ_REG => undocumented("FT_FW_READ_REG"),
        FT_REG_RESET_FW => undocumented("FT_REG_RESET_FW"),
        FT_ERASE_APP_REG => undocumented("FT_ERASE_APP_REG"),
        FT_ERASE_PANEL_REG => undocumented("FT_ERASE_PANEL_REG"),
        FT_FLASH_STATUS => undocumented("FT_FLASH_STATUS"),
        FT_PARAM_READ_REG => undocumented("FT_PARAM_READ_REG"),
        FT_READ_ID_REG => undocumented("FT_READ_ID_REG"),
        FT_FW_START_REG => undocumented("FT_FW_START_REG"),
        FT_REG_ECC => undocumented("FT_REG_ECC"),
        FT_RST_CMD_REG1 => undocumented("FT_RST_CMD_REG1")
    }
}

pub fn chip_name(chip_id: u8) -> Option<&'static str> {
    match chip_id {
        FT5X06_ID => Some("FT5x06"),
        FT5X16_ID => Some("FT5x16"),
        FT5X26_ID => Some("FT5x26"),
        _ => None,
    }
}

/// Human readable name of a register offset, e.g. `0x88 (ID_G_PERIODACTIVE)`
pub fn describe(offset: u8) -> String {
    match register_map().get(&offset) {
        Some(register) => format!("{:#04x} ({})", offset, register.name),
        None => format!("{:#04x}", offset),
    }
}

/// Table of the documented registers, one per line, for the usage text.
pub fn help_table() -> String {
    register_map()
        .iter()
        .filter(|(_, register)| register.documented)
        .map(|(offset, register)| format!("\t\t{:#04x}  {}\n", offset, register.name))
        .collect()
}

pub fn chip_table() -> String {
    [FT5X06_ID, FT5X16_ID, FT5X26_ID]
        .iter()
        .filter_map(|id| chip_name(*id).map(|name| format!("\t\t{:#04x}  {}\n", id, name)))
        .collect()
}
