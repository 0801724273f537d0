//! Deterministic result sets for benchmarks.

use colbatch_core::cast::render_text;
use colbatch_core::{ColumnMeta, TextRow};
use colbatch_proto::{Decimal, LogicalType, Row, Value};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 12345;

/// Number of rows in a generated result.
#[derive(Clone, Copy, Debug, Default)]
pub enum Scale {
    /// 100 rows.
    Small,
    /// 10,000 rows.
    #[default]
    Medium,
    /// 100,000 rows.
    Large,
}

impl Scale {
    /// Row count for this scale.
    pub fn rows(&self) -> usize {
        match self {
            Scale::Small => 100,
            Scale::Medium => 10_000,
            Scale::Large => 100_000,
        }
    }
}

/// Header of the generated `orders` result.
pub fn order_columns() -> Vec<ColumnMeta> {
    vec![
        ColumnMeta::new("id", LogicalType::BigInteger),
        ColumnMeta::new("customer", LogicalType::String),
        ColumnMeta::new("quantity", LogicalType::Integer),
        ColumnMeta::new("price", LogicalType::decimal(10, 2)),
        ColumnMeta::new("weight", LogicalType::Float),
        ColumnMeta::new("shipped", LogicalType::Boolean),
        ColumnMeta::new("placed_on", LogicalType::Date),
        ColumnMeta::new("note", LogicalType::Text),
    ]
}

/// Generate `orders` rows as values. Roughly one note in four is null.
pub fn generate_orders(count: usize) -> Vec<Row> {
    let mut rng = StdRng::seed_from_u64(SEED);

    (0..count)
        .map(|i| {
            let cents = rng.gen_range(100..1_000_000i64);
            let note = if rng.gen_bool(0.25) {
                Value::Null
            } else {
                Value::Text(random_string(&mut rng, 40))
            };
            vec![
                Value::Int(i as i64),
                Value::Text(format!("customer_{}", i % 500)),
                Value::Int(rng.gen_range(1..100)),
                Value::Decimal(Decimal::from_i128(i128::from(cents), 2)),
                Value::Float(rng.gen_range(0.1..50.0)),
                Value::Bool(rng.gen_bool(0.8)),
                Value::Date(18_000 + (i % 2_000) as i32),
                note,
            ]
        })
        .collect()
}

/// Generate `orders` rows in text-protocol form.
pub fn generate_text_orders(count: usize) -> Vec<TextRow> {
    generate_orders(count).iter().map(to_text_row).collect()
}

fn to_text_row(row: &Row) -> TextRow {
    row.iter()
        .map(|value| match value {
            Value::Null => None,
            Value::Bool(b) => Some(if *b { b"1".to_vec() } else { b"0".to_vec() }),
            other => render_text(other).ok().map(String::into_bytes),
        })
        .collect()
}

/// Generate a random string of specified length.
fn random_string(rng: &mut StdRng, len: usize) -> String {
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}
