//! Text-protocol field decoding.
//!
//! MySQL and PostgreSQL text protocols deliver every field as a byte string
//! or NULL. [`FieldDecoder`] turns one such field into the [`Value`] a column
//! of a given physical type accepts, and [`TextRows`] adapts a cursor of text
//! rows into a cursor of value rows for
//! [`materialize`](crate::materialize::materialize).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use colbatch_proto::{days_since_epoch, Decimal, PhysicalType, Row, TimeUnit, Value};

use crate::column::builder::fit_integer;
use crate::config::TextDialect;
use crate::error::{Error, Result};
use crate::schema::Schema;

/// One text-protocol row: raw field bytes, `None` for NULL.
pub type TextRow = Vec<Option<Vec<u8>>>;

/// 2000-01-01T00:00:00 in nanoseconds since the Unix epoch. Time-of-day
/// values are stored as offsets from this instant.
pub const TIME_ANCHOR_NANOS: i128 = 946_684_800_000_000_000;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Decodes text fields for one physical type.
#[derive(Debug, Clone)]
pub struct FieldDecoder {
    data_type: PhysicalType,
    dialect: TextDialect,
}

impl FieldDecoder {
    /// Create a decoder for a column type.
    pub fn new(data_type: PhysicalType, dialect: TextDialect) -> Self {
        Self { data_type, dialect }
    }

    /// Type this decoder produces values for.
    pub fn data_type(&self) -> &PhysicalType {
        &self.data_type
    }

    /// Decode one field. `None` is SQL NULL.
    pub fn decode(&self, field: Option<&[u8]>) -> Result<Value> {
        match field {
            None => Ok(Value::Null),
            Some(bytes) => self.decode_bytes(bytes),
        }
    }

    fn decode_bytes(&self, bytes: &[u8]) -> Result<Value> {
        match &self.data_type {
            PhysicalType::Binary => self.decode_binary(bytes),
            PhysicalType::Utf8 => Ok(Value::Text(utf8(bytes, &self.data_type)?.to_string())),
            PhysicalType::Boolean => decode_bool(bytes),
            other => {
                let text = utf8(bytes, other)?;
                decode_str(text, other)
            }
        }
    }

    fn decode_binary(&self, bytes: &[u8]) -> Result<Value> {
        if self.dialect == TextDialect::Postgres {
            if let Some(encoded) = bytes.strip_prefix(b"\\x") {
                let decoded = hex::decode(encoded)
                    .map_err(|e| Error::mismatch("hex bytea", format!("invalid hex: {}", e)))?;
                return Ok(Value::Bytes(decoded));
            }
        }
        Ok(Value::Bytes(bytes.to_vec()))
    }
}

/// Decode a text value into the representation `data_type` accepts.
///
/// Used by casts from text columns. Binary targets take the UTF-8 bytes as
/// they are.
pub fn decode_str(text: &str, data_type: &PhysicalType) -> Result<Value> {
    let malformed = || Error::mismatch(data_type, format!("text '{}'", text));

    match data_type {
        PhysicalType::Null => Err(malformed()),
        PhysicalType::Boolean => decode_bool(text.as_bytes()),
        PhysicalType::Int8
        | PhysicalType::Int16
        | PhysicalType::Int32
        | PhysicalType::Int64
        | PhysicalType::UInt8
        | PhysicalType::UInt16
        | PhysicalType::UInt32
        | PhysicalType::UInt64 => {
            let v = text.trim().parse::<i128>().map_err(|_| malformed())?;
            fit_integer(v, data_type)
        }
        PhysicalType::Float32 | PhysicalType::Float64 => {
            text.trim().parse::<f64>().map(Value::Float).map_err(|_| malformed())
        }
        PhysicalType::Decimal128 { .. } => text
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| malformed()),
        PhysicalType::Date32 => match parse_date(text.trim()).map_err(|_| malformed())? {
            Some(date) => Ok(Value::Date(days_since_epoch(date))),
            None => Ok(Value::Null),
        },
        PhysicalType::Timestamp(unit) => decode_timestamp(text.trim(), *unit, data_type),
        PhysicalType::Binary => Ok(Value::Bytes(text.as_bytes().to_vec())),
        PhysicalType::Utf8 => Ok(Value::Text(text.to_string())),
    }
}

fn utf8<'a>(bytes: &'a [u8], data_type: &PhysicalType) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| Error::mismatch(data_type, "invalid utf-8 bytes"))
}

fn decode_bool(bytes: &[u8]) -> Result<Value> {
    match bytes {
        b"1" | b"\x01" | b"t" | b"T" => Ok(Value::Bool(true)),
        b"0" | b"\x00" | b"f" | b"F" => Ok(Value::Bool(false)),
        other if other.eq_ignore_ascii_case(b"true") => Ok(Value::Bool(true)),
        other if other.eq_ignore_ascii_case(b"false") => Ok(Value::Bool(false)),
        other => Err(Error::mismatch(
            PhysicalType::Boolean,
            format!("text '{}'", String::from_utf8_lossy(other)),
        )),
    }
}

/// Parse `YYYY-MM-DD`. The zero date `0000-00-00` is `None`.
fn parse_date(text: &str) -> std::result::Result<Option<NaiveDate>, ()> {
    let mut parts = text.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(());
    };
    let year: i32 = y.parse().map_err(|_| ())?;
    let month: u32 = m.parse().map_err(|_| ())?;
    let day: u32 = d.parse().map_err(|_| ())?;

    if year == 0 && month == 0 && day == 0 {
        return Ok(None);
    }
    // MySQL allows partial zero dates like 2024-00-15; they name no day.
    if month == 0 || day == 0 {
        return Err(());
    }
    NaiveDate::from_ymd_opt(year, month, day).map(Some).ok_or(())
}

fn decode_timestamp(text: &str, unit: TimeUnit, data_type: &PhysicalType) -> Result<Value> {
    let malformed = || Error::mismatch(data_type, format!("text '{}'", text));

    // A bare time of day has no date separator after an optional sign.
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    if !unsigned.contains('-') {
        let nanos = parse_time_of_day(text)
            .and_then(|nanos| TIME_ANCHOR_NANOS.checked_add(nanos))
            .ok_or_else(malformed)?;
        return Ok(Value::Timestamp {
            value: ticks_from_nanos(nanos, unit)?,
            unit,
        });
    }

    let (date_part, time_part) = match text.split_once([' ', 'T']) {
        Some((d, t)) => (d, Some(t)),
        None => (text, None),
    };
    let Some(date) = parse_date(date_part).map_err(|_| malformed())? else {
        return Ok(Value::Null);
    };
    let time = match time_part {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M:%S%.f").map_err(|_| malformed())?,
        None => NaiveTime::MIN,
    };

    Ok(Value::Timestamp {
        value: datetime_ticks(&date.and_time(time), unit)?,
        unit,
    })
}

/// Parse `[-]H+:MM:SS[.fffffffff]` into signed nanoseconds. Hours may exceed
/// 23, as MySQL `TIME` values do.
fn parse_time_of_day(text: &str) -> Option<i128> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (clock, fraction) = match unsigned.split_once('.') {
        Some((c, f)) => (c, f),
        None => (unsigned, ""),
    };

    let mut parts = clock.splitn(3, ':');
    let hours: i128 = parts.next()?.parse().ok()?;
    let minutes: i128 = parts.next()?.parse().ok()?;
    let seconds: i128 = parts.next()?.parse().ok()?;
    if minutes > 59 || seconds > 59 || hours < 0 || minutes < 0 || seconds < 0 {
        return None;
    }

    if !fraction.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut sub_nanos: i128 = 0;
    for (i, c) in fraction.bytes().take(9).enumerate() {
        sub_nanos += i128::from(c - b'0') * 10i128.pow(8 - i as u32);
    }

    let nanos = hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)?
        .checked_mul(NANOS_PER_SECOND)?
        .checked_add(sub_nanos)?;
    Some(if negative { -nanos } else { nanos })
}

/// Ticks of `unit` since the epoch for a UTC date and time, rounding down.
pub(crate) fn datetime_ticks(datetime: &NaiveDateTime, unit: TimeUnit) -> Result<i64> {
    let utc = datetime.and_utc();
    let nanos = i128::from(utc.timestamp()) * NANOS_PER_SECOND
        + i128::from(utc.timestamp_subsec_nanos());
    ticks_from_nanos(nanos, unit)
}

fn ticks_from_nanos(nanos: i128, unit: TimeUnit) -> Result<i64> {
    let per_tick = NANOS_PER_SECOND / i128::from(unit.ticks_per_second());
    let ticks = nanos.div_euclid(per_tick);
    i64::try_from(ticks)
        .map_err(|_| Error::Overflow(format!("{}ns does not fit timestamp[{}]", nanos, unit.suffix())))
}

/// Adapts a cursor of text rows into a cursor of value rows.
///
/// Each field is decoded for its schema column. A row with the wrong number
/// of fields yields [`Error::RowShapeMismatch`].
pub struct TextRows<I> {
    rows: I,
    decoders: Vec<FieldDecoder>,
    row: usize,
}

impl<I> TextRows<I>
where
    I: Iterator<Item = Result<TextRow>>,
{
    /// Create a decoding cursor over `rows` for `schema`.
    pub fn new(rows: I, schema: &Schema, dialect: TextDialect) -> Self {
        let decoders = schema
            .fields()
            .iter()
            .map(|f| FieldDecoder::new(f.data_type.clone(), dialect))
            .collect();
        Self {
            rows,
            decoders,
            row: 0,
        }
    }

    fn decode_row(&self, index: usize, fields: TextRow) -> Result<Row> {
        if fields.len() != self.decoders.len() {
            return Err(Error::RowShapeMismatch {
                row: index,
                expected: self.decoders.len(),
                actual: fields.len(),
            });
        }
        self.decoders
            .iter()
            .zip(fields)
            .map(|(decoder, field)| decoder.decode(field.as_deref()))
            .collect()
    }
}

impl<I> Iterator for TextRows<I>
where
    I: Iterator<Item = Result<TextRow>>,
{
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let fields = match self.rows.next()? {
            Ok(fields) => fields,
            Err(e) => return Some(Err(e)),
        };
        let index = self.row;
        self.row += 1;
        Some(self.decode_row(index, fields))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}
