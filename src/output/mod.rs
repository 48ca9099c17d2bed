pub mod print;


use crate::Result;
use anyhow::anyhow;
use std::fmt;

/// Where a rendered message ends up.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum ResponseSlot {
    Insert,
    Query,
}

impl ResponseSlot {
    pub fn name(&self) -> &'static str {
        match *self {
            ResponseSlot::Insert => "insert-response",
            ResponseSlot::Query => "query-response",
        }
    }
}

impl fmt::Display for ResponseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum FormatItem {
    Slot,
    Message,
    Chars(String),
}

/// Parses a format such as `"%S: %M\n"`.
///
/// `%S` is the slot name, `%M` the message and `%%` a literal percent sign.
pub fn parse_format(format: &str) -> Result<Vec<FormatItem>> {
    let mut result = Vec::new();
    let mut marker = false;
    let mut buff = String::new();
    for ch in format.chars() {
        if marker {
            marker = false;
            let action = match ch {
                '%' => None,
                'S' => Some(FormatItem::Slot),
                'M' => Some(FormatItem::Message),
                _ => return Err(anyhow!("Invalid formatting character '{}'", ch)),
            };
            if let Some(a) = action {
                if !buff.is_empty() {
                    result.push(FormatItem::Chars(buff));
                    buff = String::new();
                }
                result.push(a);
            } else {
                buff.push(ch);
            }
        } else if ch == '%' {
            marker = true;
        } else {
            buff.push(ch);
        }
    }
    if !buff.is_empty() {
        result.push(FormatItem::Chars(buff));
    }
    Ok(result)
}

pub trait Outputter {
    fn display(&mut self, slot: ResponseSlot, message: &str) -> Result<()>;
}
