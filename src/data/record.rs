use std::fmt;

/// One car passport entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarPassport {
    pub number: i64,
    pub timestamp: String,
    pub plate: String,
    pub brand: String,
}

impl CarPassport {
    pub fn new(
        number: i64,
        timestamp: impl Into<String>,
        plate: impl Into<String>,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            number,
            timestamp: timestamp.into(),
            plate: plate.into(),
            brand: brand.into(),
        }
    }
}

impl fmt::Display for CarPassport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: {} {} at {}",
            self.number, self.brand, self.plate, self.timestamp
        )
    }
}
