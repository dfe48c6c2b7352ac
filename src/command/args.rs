use clap::{App, AppSettings, Arg, ArgMatches, ErrorKind};

use std::ffi::OsString;
use std::fmt::{Display, Error, Formatter};

use super::config::{ConfigError, FileConfig};
use super::{Config, DEFAULT_ADDRESS, DEFAULT_BUS};
use crate::i2c::registers;

const MAX_7BIT_ADDRESS: u16 = 0x7f;

#[derive(Debug, PartialEq)]
pub enum UsageError {
    Help,
    Invalid(String),
    Config(ConfigError),
}

impl Display for UsageError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            UsageError::Help => write!(f, "Help requested"),
            UsageError::Invalid(message) => write!(f, "{}", message),
            UsageError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl From<ConfigError> for UsageError {
    fn from(err: ConfigError) -> UsageError {
        UsageError::Config(err)
    }
}

pub fn usage(name: &str) -> String {
    format!(
        "FT5x06 tool usage: {} [OPTIONS]\nOPTIONS:\n\
         \t-a, --address\n\t\tI2C address of the FT5x06 controller (hex). Default is {:#04x}.\n\
         \t-b, --bus\n\t\tI2C bus the FT5x06 controller is on. Default is {}.\n\
         \t-r, --read\n\t\tAddress to read from.\n\
         \t-w, --write\n\t\tAddress to write to.\n\
         \t-v, --value\n\t\tValue to write\n\
         \t-c, --config\n\t\tYAML file with default bus and address.\n\
         \t-h, --help\n\t\tShow this help and exit.\n\
         REGISTERS ({:#04x} - {:#04x}):\n{}\
         CHIP IDS:\n{}",
        name,
        DEFAULT_ADDRESS,
        DEFAULT_BUS,
        registers::ID_G_THGROUP,
        registers::MAX_REG_OFFSET,
        registers::help_table(),
        registers::chip_table()
    )
}

fn value_arg(name: &'static str, short: &'static str) -> Arg<'static, 'static> {
    // Repeats are allowed; the last one given wins
    Arg::with_name(name)
        .short(short)
        .long(name)
        .takes_value(true)
        .number_of_values(1)
        .multiple(true)
}

fn app() -> App<'static, 'static> {
    App::new("ft5x06-register-tool")
        .setting(AppSettings::DisableVersion)
        .setting(AppSettings::ColorNever)
        .arg(value_arg("address", "a"))
        .arg(value_arg("bus", "b"))
        .arg(value_arg("read", "r"))
        .arg(value_arg("write", "w"))
        .arg(value_arg("value", "v"))
        .arg(value_arg("config", "c"))
}

fn last_value<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches.values_of(name).and_then(|values| values.last())
}

/// Digits after an optional `0x`. `from_str_radix` would take a sign too,
/// so one is rejected here.
fn hex_digits<'a>(text: &'a str, what: &str) -> Result<&'a str, UsageError> {
    let digits = if text.starts_with("0x") || text.starts_with("0X") {
        &text[2..]
    } else {
        text
    };

    if digits.starts_with('+') || digits.starts_with('-') {
        Err(UsageError::Invalid(format!("Invalid {} '{}': sign not allowed", what, text)))
    } else {
        Ok(digits)
    }
}

pub fn parse_hex_byte(text: &str) -> Result<u8, UsageError> {
    u8::from_str_radix(hex_digits(text, "byte")?, 16)
        .map_err(|err| UsageError::Invalid(format!("Invalid byte '{}': {}", text, err)))
}

pub fn parse_address(text: &str) -> Result<u16, UsageError> {
    let address = u16::from_str_radix(hex_digits(text, "address")?, 16)
        .map_err(|err| UsageError::Invalid(format!("Invalid address '{}': {}", text, err)))?;

    check_address(address)
}

fn check_address(address: u16) -> Result<u16, UsageError> {
    if address > MAX_7BIT_ADDRESS {
        Err(UsageError::Invalid(format!(
            "Address {:#04x} is not a 7-bit address",
            address
        )))
    } else {
        Ok(address)
    }
}

pub fn parse_bus(text: &str) -> Result<u32, UsageError> {
    if text.starts_with('+') {
        return Err(UsageError::Invalid(format!("Invalid bus '{}': sign not allowed", text)));
    }

    text.parse()
        .map_err(|err| UsageError::Invalid(format!("Invalid bus '{}': {}", text, err)))
}

// First line of a clap error, without its own "error: " label
fn clap_message(message: &str) -> String {
    let line = message.lines().next().unwrap_or("");
    line.trim_start_matches("error:").trim_start().to_string()
}

/// Parse a full argv (program name first) into a `Config`. Anything clap
/// rejects, including `-h`, stops parsing before a device is touched.
pub fn parse_args<I, T>(argv: I) -> Result<Config, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app().get_matches_from_safe(argv).map_err(|err| match err.kind {
        ErrorKind::HelpDisplayed => UsageError::Help,
        _ => UsageError::Invalid(clap_message(&err.message)),
    })?;

    let mut config = Config::default();

    if let Some(path) = last_value(&matches, "config") {
        let file = FileConfig::load(path)?;
        config.bus = file.bus.unwrap_or(config.bus);
        if let Some(address) = file.address {
            config.address = check_address(address)?;
        }
    }

    if let Some(text) = last_value(&matches, "bus") {
        config.bus = parse_bus(text)?;
    }
    if let Some(text) = last_value(&matches, "address") {
        config.address = parse_address(text)?;
    }

    config.read = last_value(&matches, "read").map(parse_hex_byte).transpose()?;
    config.write = last_value(&matches, "write").map(parse_hex_byte).transpose()?;
    config.value = last_value(&matches, "value").map(parse_hex_byte).transpose()?;

    debug!(target: "main", "Parsed {:?}", config);

    Ok(config)
}
