//! Host-bound literal values
//!
//! A `Value` is what the host hands the cursor for each accepted constraint
//! (the right-hand side of `col > 50`, or a table function argument). The
//! accessors coerce the way the host engine does, so a data source can read
//! an argument as the type it expects regardless of how it was written.

use std::borrow::Cow;
use std::fmt;

/// A literal supplied by the host engine
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Returns true for SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// 32-bit integer view (low 32 bits of [`Value::as_int64`])
    pub fn as_int(&self) -> i32 {
        self.as_int64() as i32
    }

    /// 64-bit integer view. Floats truncate toward zero, text is parsed
    /// as a number when possible, everything else is 0.
    pub fn as_int64(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Integer(i) => *i,
            Value::Float(f) => *f as i64,
            Value::Text(s) => parse_int(s),
            Value::Blob(b) => parse_int(&String::from_utf8_lossy(b)),
        }
    }

    /// Floating point view
    pub fn as_float(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Integer(i) => *i as f64,
            Value::Float(f) => *f,
            Value::Text(s) => s.trim().parse().unwrap_or(0.0),
            Value::Blob(b) => String::from_utf8_lossy(b).trim().parse().unwrap_or(0.0),
        }
    }

    /// Text view. NULL reads as the empty string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Integer(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(format!("{:?}", f)),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Blob(b) => String::from_utf8_lossy(b),
        }
    }

    /// Byte view. NULL reads as an empty slice.
    pub fn as_blob(&self) -> Cow<'_, [u8]> {
        match self {
            Value::Null => Cow::Borrowed(&[]),
            Value::Blob(b) => Cow::Borrowed(b.as_slice()),
            Value::Text(s) => Cow::Borrowed(s.as_bytes()),
            other => match other.as_text() {
                Cow::Owned(s) => Cow::Owned(s.into_bytes()),
                Cow::Borrowed(s) => Cow::Owned(s.as_bytes().to_vec()),
            },
        }
    }
}

fn parse_int(s: &str) -> i64 {
    let s = s.trim();
    s.parse::<i64>()
        .or_else(|_| s.parse::<f64>().map(|f| f as i64))
        .unwrap_or(0)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Blob(b) => {
                write!(f, "X'")?;
                for byte in b {
                    write!(f, "{:02X}", byte)?;
                }
                write!(f, "'")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}
