use serde::Serialize;
use crate::core::library::{LibraryError, LibraryResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// Collects field errors and reports them together.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, "required");
        }
        self
    }

    pub fn min(&mut self, field: &str, value: i64, min: i64) -> &mut Self {
        if value < min {
            self.add(field, format!("min={}", min).as_str());
        }
        self
    }

    pub fn isbn(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, "required");
        } else if !is_isbn(value) {
            self.add(field, "isbn");
        }
        self
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let message = serde_json::to_string(&self.errors)?;
        Err(LibraryError::validation(message.as_str(), Some("400".to_string())))
    }

    fn add(&mut self, field: &str, error: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            error: error.to_string(),
        });
    }
}

// Up to four hyphens and four spaces are ignored.
pub fn is_isbn(value: &str) -> bool {
    let normalized = strip(&strip(value, '-', 4), ' ', 4);
    is_isbn10(&normalized) || is_isbn13(&normalized)
}

fn strip(value: &str, ch: char, max: usize) -> String {
    let mut removed = 0;
    value.chars().filter(|c| {
        if *c == ch && removed < max {
            removed += 1;
            return false;
        }
        true
    }).collect()
}

fn is_isbn10(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 10 || !b[..9].iter().all(u8::is_ascii_digit) {
        return false;
    }
    let last = match b[9] {
        b'X' => 10,
        d if d.is_ascii_digit() => u32::from(d - b'0'),
        _ => return false,
    };
    let sum: u32 = b[..9].iter().enumerate()
        .map(|(i, d)| (i as u32 + 1) * u32::from(d - b'0'))
        .sum::<u32>() + 10 * last;
    sum % 11 == 0
}

fn is_isbn13(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 13 || !(s.starts_with("978") || s.starts_with("979")) || !b.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let sum: u32 = b[..12].iter().enumerate()
        .map(|(i, d)| {
            let factor = if i % 2 == 0 { 1 } else { 3 };
            factor * u32::from(d - b'0')
        })
        .sum();
    u32::from(b[12] - b'0') == (10 - sum % 10) % 10
}
