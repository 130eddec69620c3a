#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    P11,
    P12,
    P21,
    P22,
    P31,
    P32,
    Entero1,
    Entero2,
}

impl ReadingField {
    pub const ALL: [ReadingField; 8] = [
        ReadingField::P11,
        ReadingField::P12,
        ReadingField::P21,
        ReadingField::P22,
        ReadingField::P31,
        ReadingField::P32,
        ReadingField::Entero1,
        ReadingField::Entero2,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            ReadingField::P11 => "P11",
            ReadingField::P12 => "P12",
            ReadingField::P21 => "P21",
            ReadingField::P22 => "P22",
            ReadingField::P31 => "P31",
            ReadingField::P32 => "P32",
            ReadingField::Entero1 => "ENTERO1",
            ReadingField::Entero2 => "ENTERO2",
        }
    }
}

/// Two replicate readings of one channel; `None` is a missing reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadingPair {
    pub first: Option<i64>,
    pub second: Option<i64>,
}

impl ReadingPair {
    pub fn new(first: Option<i64>, second: Option<i64>) -> Self {
        Self { first, second }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecimenRecord {
    /// Position in the concatenated batch.
    pub row: usize,
    pub idcode: Option<String>,
    pub serotypes: [ReadingPair; 3],
    pub entero: ReadingPair,
    pub province: String,
}

impl SpecimenRecord {
    pub fn reading(&self, field: ReadingField) -> Option<i64> {
        match field {
            ReadingField::P11 => self.serotypes[0].first,
            ReadingField::P12 => self.serotypes[0].second,
            ReadingField::P21 => self.serotypes[1].first,
            ReadingField::P22 => self.serotypes[1].second,
            ReadingField::P31 => self.serotypes[2].first,
            ReadingField::P32 => self.serotypes[2].second,
            ReadingField::Entero1 => self.entero.first,
            ReadingField::Entero2 => self.entero.second,
        }
    }
}
