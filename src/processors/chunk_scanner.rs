use memchr::{memchr, memchr2};
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::{Aggregate, AggregateTable, ByteRange, StationKey};
use crate::utils::constants::{
    DEFAULT_TABLE_CAPACITY, FIELD_SEPARATOR, LINE_TERMINATOR, MAX_KEY_BYTES,
};
use crate::utils::parse_decimal_at;

/// First line start at or after `offset`.
///
/// Offset 0 always starts a line. Any other offset starts a line only when
/// the byte before it is a newline; otherwise the partial line is skipped, as
/// it belongs to the worker whose range holds its first byte. Returns
/// `buffer.len()` when no further line starts.
pub fn line_start_at_or_after(buffer: &[u8], offset: usize) -> usize {
    if offset == 0 {
        return 0;
    }
    if offset > buffer.len() {
        return buffer.len();
    }

    match memchr(LINE_TERMINATOR, &buffer[offset - 1..]) {
        Some(pos) => offset + pos,
        None => buffer.len(),
    }
}

/// Table and line count produced by one scanner.
#[derive(Debug, Default)]
pub struct ScannedChunk {
    pub table: AggregateTable,
    pub lines: u64,
}

/// Parses the lines owned by one worker into a private aggregate table.
pub struct ChunkScanner<'a> {
    buffer: &'a [u8],
    worker: usize,
}

impl<'a> ChunkScanner<'a> {
    pub fn new(buffer: &'a [u8], worker: usize) -> Self {
        Self { buffer, worker }
    }

    /// Fold every line whose first byte lies in `range` into a new table.
    ///
    /// The last line may extend past `range.end`; it is read to its newline.
    pub fn scan(&self, range: ByteRange) -> Result<ScannedChunk> {
        let buffer = self.buffer;
        let end = range.end.min(buffer.len());
        let mut cursor = line_start_at_or_after(buffer, range.start);

        let mut chunk = ScannedChunk {
            table: AggregateTable::with_capacity(DEFAULT_TABLE_CAPACITY),
            lines: 0,
        };

        while cursor < end {
            let line_start = cursor;

            let separator = match memchr2(FIELD_SEPARATOR, LINE_TERMINATOR, &buffer[cursor..]) {
                Some(pos) if buffer[cursor + pos] == FIELD_SEPARATOR => cursor + pos,
                _ => {
                    return Err(ProcessingError::MalformedLine {
                        offset: line_start,
                        reason: "missing ';' separator",
                    })
                }
            };

            let name = &buffer[line_start..separator];
            if name.is_empty() {
                return Err(ProcessingError::MalformedLine {
                    offset: line_start,
                    reason: "empty station name",
                });
            }

            let value_start = separator + 1;
            let newline = memchr(LINE_TERMINATOR, &buffer[value_start..])
                .map(|pos| value_start + pos)
                .ok_or(ProcessingError::MalformedLine {
                    offset: line_start,
                    reason: "missing line terminator",
                })?;

            let value = parse_decimal_at(&buffer[value_start..newline], value_start)?;
            Self::record(&mut chunk.table, name, value, line_start)?;

            chunk.lines += 1;
            cursor = newline + 1;
        }

        debug!(
            worker = self.worker,
            range = %range,
            bytes = range.len(),
            lines = chunk.lines,
            stations = chunk.table.len(),
            "chunk scanned"
        );

        Ok(chunk)
    }

    fn record(table: &mut AggregateTable, name: &[u8], value: f64, offset: usize) -> Result<()> {
        if let Some(aggregate) = table.get_mut(name) {
            aggregate.observe(value);
            return Ok(());
        }

        let key = StationKey::new(name).ok_or(ProcessingError::KeyTooLong {
            offset,
            length: name.len(),
            max: MAX_KEY_BYTES,
        })?;
        table.insert(key, Aggregate::new(value));
        Ok(())
    }
}
