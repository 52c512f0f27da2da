//! Operations. Every one has the same shape: validate required fields,
//! confirm when mutating and not forced, make one client call, render.

pub mod domains;
pub mod records;

use crate::console::{Console, Prompter};
use crate::error::{Error, Result};
use crate::godaddy::DnsApi;

/// Values every operation needs, passed explicitly rather than read from
/// process-wide globals.
pub struct Ctx<'a> {
    pub api: &'a dyn DnsApi,
    pub console: &'a Console,
    pub prompter: &'a dyn Prompter,
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingField(field));
    }
    Ok(())
}
