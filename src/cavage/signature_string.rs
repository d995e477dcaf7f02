//!
//! Utilities for handling signature strings
//!

use super::HeaderList;
use crate::{Error, Message, Result};
use std::fmt::Write;

/// Name of the pseudo-header covering the request line
pub const REQUEST_TARGET: &str = "(request-target)";

/// Construct the signing string for a message from a header list
///
/// Every name in the list becomes one `name: value` line, in list order, separated by `\n` without a trailing new-line.
/// Repeated headers get their values joined with `", "`.
#[inline]
pub fn construct<M>(message: &M, header_list: &HeaderList) -> Result<String>
where
    M: Message + ?Sized,
{
    let mut signature_string = String::new();
    for name in header_list.names() {
        if name == REQUEST_TARGET {
            let target = message
                .request_target()
                .ok_or_else(|| Error::SignedHeaderNotPresent(name.to_string()))?;

            let _ = writeln!(signature_string, "{name}: {target}");
            continue;
        }

        let mut values = message.headers().get_all(name).iter().peekable();
        if values.peek().is_none() {
            return Err(Error::SignedHeaderNotPresent(name.to_string()));
        }

        let _ = write!(signature_string, "{name}: ");
        for (idx, value) in values.enumerate() {
            if idx > 0 {
                signature_string.push_str(", ");
            }
            signature_string.push_str(value.to_str()?);
        }
        signature_string.push('\n');
    }

    // Remove the last new-line
    signature_string.pop();

    Ok(signature_string)
}
