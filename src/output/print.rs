use crate::output::{FormatItem, Outputter, ResponseSlot};
use crate::Result;
use std::io::Write;

pub struct FormattedOutputter<'a, W: Write> {
    writer: &'a mut W,
    format: Vec<FormatItem>,
}

impl<'a, W: Write> FormattedOutputter<'a, W> {
    pub fn new(writer: &'a mut W, format: Vec<FormatItem>) -> FormattedOutputter<'a, W> {
        FormattedOutputter { writer, format }
    }
}

impl<'a, W: Write> Outputter for FormattedOutputter<'a, W> {
    fn display(&mut self, slot: ResponseSlot, message: &str) -> Result<()> {
        for format_item in &self.format {
            match format_item {
                FormatItem::Slot => self.writer.write_all(slot.name().as_bytes())?,
                FormatItem::Message => self.writer.write_all(message.as_bytes())?,
                FormatItem::Chars(s) => self.writer.write_all(s.as_bytes())?,
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
