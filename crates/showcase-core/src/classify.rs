//! Pattern matching over tagged primitive values
//!
//! Each operation picks the first matching arm of a fixed priority order,
//! with numeric range guards ahead of plain type arms.

use crate::error::{Result, ShowcaseError};
use crate::types::Scalar;

/// Integers above this value classify as "large"
pub const SMALL_INT_LIMIT: i32 = 100;

/// Classification demo component
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitivePatternDemo;

impl PrimitivePatternDemo {
    /// Create the component
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Label a value by type, splitting integers into small and large
    #[must_use]
    pub fn process_primitive(&self, value: &Scalar) -> String {
        tracing::debug!(type_name = value.type_name(), "process_primitive");
        match value {
            Scalar::Int(i) if *i > SMALL_INT_LIMIT => format!("Integer grande: {i}"),
            Scalar::Int(i) => format!("Integer pequeño: {i}"),
            Scalar::Long(_) => format!("Long: {value}"),
            Scalar::Double(_) => format!("Double: {value}"),
            Scalar::Float(_) => format!("Float: {value}"),
            Scalar::Bool(b) => format!("Boolean: {b}"),
            Scalar::Byte(b) => format!("Byte: {b}"),
            Scalar::Short(s) => format!("Short: {s}"),
            Scalar::Char(c) => format!("Char: {c}"),
            Scalar::Text(s) => format!("String: {s}"),
            Scalar::Null => "Null value".to_string(),
            Scalar::Unsupported(name) => format!("Tipo desconocido: {name}"),
        }
    }

    /// Recognize only int, double and boolean
    #[must_use]
    pub fn check_primitive_type(&self, value: &Scalar) -> String {
        match value {
            Scalar::Int(i) => format!("Es un int con valor: {i}"),
            Scalar::Double(_) => format!("Es un double con valor: {value}"),
            Scalar::Bool(b) => format!("Es un boolean con valor: {b}"),
            _ => "No es un primitivo reconocido".to_string(),
        }
    }

    /// Convert to a plain integer
    ///
    /// Numeric tags widen or truncate, text is parsed, absent input is zero.
    ///
    /// # Errors
    /// - `ShowcaseError::InvalidNumber` if text is not a decimal `i32`
    #[allow(clippy::cast_possible_truncation)]
    pub fn safe_convert_to_int(&self, value: &Scalar) -> Result<i32> {
        let converted = match value {
            Scalar::Int(i) => *i,
            Scalar::Byte(b) => i32::from(*b),
            Scalar::Short(s) => i32::from(*s),
            // Low 32 bits, like a narrowing primitive conversion
            Scalar::Long(l) => *l as i32,
            // Saturating, NaN becomes zero
            Scalar::Double(d) => *d as i32,
            Scalar::Float(f) => *f as i32,
            Scalar::Text(s) => s.parse::<i32>().map_err(|source| {
                tracing::warn!(input = %s, "rejecting non-numeric text");
                ShowcaseError::InvalidNumber {
                    input: s.clone(),
                    source,
                }
            })?,
            Scalar::Null | Scalar::Bool(_) | Scalar::Char(_) | Scalar::Unsupported(_) => 0,
        };
        Ok(converted)
    }

    /// Validate an integer with range guards
    #[must_use]
    pub fn validate_number(&self, value: &Scalar) -> String {
        let label = match value {
            Scalar::Int(i) if *i < 0 => "Número negativo",
            Scalar::Int(0) => "Cero",
            Scalar::Int(i) if *i <= SMALL_INT_LIMIT => "Número positivo pequeño",
            Scalar::Int(_) => "Número positivo grande",
            Scalar::Null => "Valor nulo",
            _ => "No es un entero",
        };
        label.to_string()
    }
}
