//! Core value types shared by the demo components
//!
//! - `Scalar`: tagged input value for classification
//! - `Summary`: aggregated metrics record
//! - `DatabaseConnection` / `ExpensiveResult`: deferred-value payloads
//! - `Latency`: simulated I/O delays

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Tagged scalar value
///
/// Mirrors the boxed primitive types a loosely typed request body can carry.
/// Anything that is not a scalar keeps only its runtime type name.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// Double precision float
    Double(f64),
    /// Single precision float
    Float(f32),
    /// Boolean
    Bool(bool),
    /// 8-bit signed integer
    Byte(i8),
    /// 16-bit signed integer
    Short(i16),
    /// Single character
    Char(char),
    /// Text
    Text(String),
    /// Absent value
    Null,
    /// Any other runtime type, by name
    Unsupported(&'static str),
}

impl Scalar {
    /// Runtime type name of the tagged value
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "Integer",
            Self::Long(_) => "Long",
            Self::Double(_) => "Double",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Boolean",
            Self::Byte(_) => "Byte",
            Self::Short(_) => "Short",
            Self::Char(_) => "Character",
            Self::Text(_) => "String",
            Self::Null => "null",
            Self::Unsupported(name) => name,
        }
    }

    /// Check for the absent value
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i32::try_from(i).map_or(Self::Long(i), Self::Int)
                } else if n.is_u64() {
                    Self::Unsupported("BigInteger")
                } else {
                    n.as_f64().map_or(Self::Unsupported("BigDecimal"), Self::Double)
                }
            }
            Value::String(s) => Self::Text(s),
            Value::Array(_) => Self::Unsupported("ArrayList"),
            Value::Object(_) => Self::Unsupported("LinkedHashMap"),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}"),
            Self::Double(d) => f.write_str(&format_double(*d)),
            Self::Float(x) => f.write_str(&format_float(*x)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Byte(b) => write!(f, "{b}"),
            Self::Short(s) => write!(f, "{s}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Text(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}

/// Render a double the way a boxed `Double` prints (`1.0`, `3.14`, `1.0E7`)
#[must_use]
pub fn format_double(value: f64) -> String {
    boxed_float_string(value, value.to_string(), format!("{value:e}"))
}

/// Render a float the way a boxed `Float` prints
#[must_use]
pub fn format_float(value: f32) -> String {
    boxed_float_string(f64::from(value), value.to_string(), format!("{value:e}"))
}

fn boxed_float_string(value: f64, plain: String, scientific: String) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if value == 0.0 || (1e-3..1e7).contains(&magnitude) {
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        // "1.5e7" -> "1.5E7", "1e7" -> "1.0E7"
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{mantissa}E{exponent}")
        } else {
            format!("{mantissa}.0E{exponent}")
        }
    }
}

/// Aggregated metrics for a category
///
/// The fields are fetched independently; no relation between them is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Item count
    pub count: i32,
    /// Sum of values
    pub sum: f64,
    /// Average value
    pub average: f64,
    /// Maximum value
    pub max: i32,
}

/// Connection descriptor produced by a deferred cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseConnection {
    /// Host name
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl DatabaseConnection {
    /// Create connection descriptor
    #[inline]
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// Result of a simulated expensive computation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpensiveResult {
    /// Payload
    pub data: String,
    /// Computed value
    pub value: i32,
}

impl ExpensiveResult {
    /// Create result record
    #[inline]
    #[must_use]
    pub fn new(data: impl Into<String>, value: i32) -> Self {
        Self {
            data: data.into(),
            value,
        }
    }
}

/// Simulated latencies for the demo workers
///
/// Stand-ins for I/O. All values in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Latency {
    pub profile_ms: u64,
    pub orders_ms: u64,
    pub preferences_ms: u64,
    pub database_ms: u64,
    pub cache_ms: u64,
    pub api_ms: u64,
    pub slow_op1_ms: u64,
    pub slow_op2_ms: u64,
    pub count_ms: u64,
    pub sum_ms: u64,
    pub average_ms: u64,
    pub max_ms: u64,
    pub config_load_ms: u64,
    pub expensive_ms: u64,
    pub race_ms: u64,
}

impl Latency {
    /// Profile with every delay disabled
    #[must_use]
    pub fn zero() -> Self {
        Self {
            profile_ms: 0,
            orders_ms: 0,
            preferences_ms: 0,
            database_ms: 0,
            cache_ms: 0,
            api_ms: 0,
            slow_op1_ms: 0,
            slow_op2_ms: 0,
            count_ms: 0,
            sum_ms: 0,
            average_ms: 0,
            max_ms: 0,
            config_load_ms: 0,
            expensive_ms: 0,
            race_ms: 0,
        }
    }

    /// Sleep for a simulated delay
    pub(crate) async fn wait(ms: u64) {
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            profile_ms: 100,
            orders_ms: 150,
            preferences_ms: 80,
            database_ms: 200,
            cache_ms: 50,
            api_ms: 300,
            slow_op1_ms: 1000,
            slow_op2_ms: 1500,
            count_ms: 100,
            sum_ms: 120,
            average_ms: 90,
            max_ms: 110,
            config_load_ms: 100,
            expensive_ms: 1000,
            race_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_from_json() {
        assert_eq!(Scalar::from(json!(null)), Scalar::Null);
        assert_eq!(Scalar::from(json!(true)), Scalar::Bool(true));
        assert_eq!(Scalar::from(json!(150)), Scalar::Int(150));
        assert_eq!(Scalar::from(json!(5_000_000_000_i64)), Scalar::Long(5_000_000_000));
        assert_eq!(Scalar::from(json!(u64::MAX)), Scalar::Unsupported("BigInteger"));
        assert_eq!(Scalar::from(json!(3.14)), Scalar::Double(3.14));
        assert_eq!(Scalar::from(json!("abc")), Scalar::Text("abc".to_string()));
        assert_eq!(Scalar::from(json!([1, 2])), Scalar::Unsupported("ArrayList"));
        assert_eq!(Scalar::from(json!({"a": 1})), Scalar::Unsupported("LinkedHashMap"));
    }

    #[test]
    fn boxed_float_rendering() {
        assert_eq!(format_double(3.14), "3.14");
        assert_eq!(format_double(1.0), "1.0");
        assert_eq!(format_double(0.0), "0.0");
        assert_eq!(format_double(-2.5), "-2.5");
        assert_eq!(format_double(1e7), "1.0E7");
        assert_eq!(format_double(1.5e-4), "1.5E-4");
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_float(2.5), "2.5");
    }

    #[test]
    fn type_names() {
        assert_eq!(Scalar::Int(1).type_name(), "Integer");
        assert_eq!(Scalar::Char('A').type_name(), "Character");
        assert_eq!(Scalar::Unsupported("ArrayList").type_name(), "ArrayList");
    }

    #[test]
    fn summary_serializes_four_fields() {
        let summary = Summary {
            count: 42,
            sum: 1234.56,
            average: 29.39,
            max: 999,
        };
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(
            value,
            json!({"count": 42, "sum": 1234.56, "average": 29.39, "max": 999})
        );
    }
}
