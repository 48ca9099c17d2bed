use patient_api::output::parse_format;
use patient_api::output::print::FormattedOutputter;
use std::io;
use std::io::Write;
use std::str::from_utf8;

pub struct DebugWriter(pub String);
impl Write for DebugWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let DebugWriter(inner) = self;
        let buf = from_utf8(buf).unwrap();
        inner.push_str(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn slot_outputter(writer: &mut DebugWriter) -> FormattedOutputter<'_, DebugWriter> {
    FormattedOutputter::new(writer, parse_format("%S: %M\n").unwrap())
}
