use serde::{Serialize, Serializer};
use std::fmt;

/// The fixed set of countries every chart reports on.
///
/// Declaration order is display order; charts never reorder it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Country {
    Ksa,
    Uae,
    Qatar,
    Egypt,
    Morocco,
    Jordan,
    Lebanon,
    Tunisia,
    Algeria,
    Other,
}

/// All countries in display order.
pub const COUNTRIES: [Country; 10] = [
    Country::Ksa,
    Country::Uae,
    Country::Qatar,
    Country::Egypt,
    Country::Morocco,
    Country::Jordan,
    Country::Lebanon,
    Country::Tunisia,
    Country::Algeria,
    Country::Other,
];

impl Country {
    pub const COUNT: usize = COUNTRIES.len();

    /// Key used for this country in the dataset files.
    pub fn code(self) -> &'static str {
        match self {
            Country::Ksa => "KSA",
            Country::Uae => "UAE",
            Country::Qatar => "Qatar",
            Country::Egypt => "Egypt",
            Country::Morocco => "Morocco",
            Country::Jordan => "Jordan",
            Country::Lebanon => "Lebanon",
            Country::Tunisia => "Tunisia",
            Country::Algeria => "Algeria",
            Country::Other => "Other",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_code(code: &str) -> Option<Self> {
        COUNTRIES.iter().copied().find(|c| c.code() == code)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One value per country, indexed in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryTable<T>([T; Country::COUNT]);

impl<T> CountryTable<T> {
    pub fn new(values: [T; Country::COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, country: Country) -> &T {
        &self.0[country.index()]
    }

    /// Pairs each value with its country, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Country, &T)> {
        COUNTRIES.iter().copied().zip(self.0.iter())
    }

    pub fn try_map<U, E>(&self, mut f: impl FnMut(Country, &T) -> Result<U, E>) -> Result<CountryTable<U>, E>
    where
        U: Default + Copy,
    {
        let mut out = [U::default(); Country::COUNT];
        for (country, value) in self.iter() {
            out[country.index()] = f(country, value)?;
        }
        Ok(CountryTable(out))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_order_is_fixed() {
        let codes: Vec<&str> = COUNTRIES.iter().map(|c| c.code()).collect();
        assert_eq!(
            codes,
            vec![
                "KSA", "UAE", "Qatar", "Egypt", "Morocco", "Jordan", "Lebanon", "Tunisia",
                "Algeria", "Other"
            ]
        );
    }

    #[test]
    fn index_matches_position() {
        for (i, c) in COUNTRIES.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn from_code_is_case_sensitive() {
        assert_eq!(Country::from_code("Qatar"), Some(Country::Qatar));
        assert_eq!(Country::from_code("qatar"), None);
    }

    #[test]
    fn try_map_short_circuits() {
        let table = CountryTable::new([1u32; Country::COUNT]);
        let res: Result<CountryTable<u32>, Country> =
            table.try_map(|c, v| if c == Country::Jordan { Err(c) } else { Ok(v * 2) });
        assert_eq!(res.unwrap_err(), Country::Jordan);
    }
}
