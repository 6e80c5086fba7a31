//! Country/area reference table.
//!
//! Each UCTE area has a two-letter code, a numeric identifier and, for real
//! areas, the character every node code of that area starts with. The table is
//! immutable and may be shared freely across concurrent decodes.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// One entry of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    pub code: &'static str,
    pub number: u32,
    /// First character of node codes belonging to this area
    pub node_prefix: Option<char>,
    pub name: &'static str,
    pub long_name: &'static str,
    /// Merged (UCTE-wide) dataset code rather than a real area
    pub merged: bool,
}

const fn country(
    code: &'static str,
    number: u32,
    node_prefix: Option<char>,
    name: &'static str,
    long_name: &'static str,
) -> Country {
    Country {
        code,
        number,
        node_prefix,
        name,
        long_name,
        merged: false,
    }
}

pub static COUNTRIES: &[Country] = &[
    country("AL", 2, Some('A'), "Albania", "Shqiperia (Albania)"),
    country("AT", 1, Some('O'), "Austria", "Österreich (Austria)"),
    country("BA", 5, Some('W'), "Bosna", "Bosna i Hercegovina (Bosnia and Herzegovina)"),
    country("BE", 3, Some('B'), "Belgium", "Belgique (Belgium)"),
    country("BG", 4, Some('V'), "Bulgaria", "Bulgarija (Bulgaria)"),
    country("BY", 6, Some('3'), "Belarus", "Belorussija (Belarus)"),
    country("CZ", 8, Some('C'), "Czech", "Ceska Republika (Czech Republic)"),
    country("DE", 9, Some('D'), "Germany", "Deutschland (Germany)"),
    country("DK", 10, Some('K'), "Denmark", "Danmark (Denmark)"),
    country("ES", 11, Some('E'), "Spain", "Espana (Spain)"),
    country("FR", 12, Some('F'), "France", "France (France)"),
    country("GB", 13, Some('5'), "Britain", "Great Britain (Great Britain)"),
    country("GR", 14, Some('G'), "Greece", "Hellas (Greece)"),
    country("HR", 16, Some('H'), "Croatia", "Hrvatska (Croatia)"),
    country("HU", 15, Some('M'), "Hungary", "Magyarorszag (Hungary)"),
    country("CH", 7, Some('S'), "Switzerland", "Schweiz (Switzerland)"),
    country("IT", 17, Some('I'), "Italy", "Italia (Italy)"),
    country("KS", 39, Some('_'), "Kosovo", "Kosovo"),
    country("LT", 19, Some('6'), "Lithuania", "Lietuva (Lithuania)"),
    country("LU", 18, Some('1'), "Luxemburg", "Luxembourg (Luxemburg)"),
    country("MA", 20, Some('2'), "Morocco", "Maroc (Morocco)"),
    country("MD", 21, Some('7'), "Moldavia", "Moldava (Moldavia)"),
    country("ME", 34, Some('0'), "Montenegro", "Crna Gora (Montenegro)"),
    country("MK", 22, Some('Y'), "Makedonija", "Makedonija (FYROM)"),
    country("NL", 24, Some('N'), "Netherlands", "Nederland (Netherlands)"),
    country("NO", 23, Some('9'), "Norway", "Norge (Norway)"),
    country("PL", 26, Some('Z'), "Poland", "Polska (Poland)"),
    country("PT", 25, Some('P'), "Portugal", "Portugal (Portugal)"),
    country("RO", 27, Some('R'), "Romania", "Romania (Romania)"),
    country("RS", 35, Some('J'), "Serbia", "Srbija (Serbia)"),
    country("RU", 28, Some('4'), "Russia", "Rossija (Russia)"),
    country("SE", 29, Some('8'), "Sweden", "Sverige (Sweden)"),
    country("SI", 31, Some('L'), "Slovenia", "Slovenija (Slovenia)"),
    country("SK", 30, Some('Q'), "Slovakia", "Slovensko (Slovakia)"),
    country("TR", 32, Some('T'), "Turkey", "Türkiye (Turkey)"),
    country("UA", 33, Some('U'), "Ukraine", "Ukraina (Ukraine)"),
    Country {
        code: "UC",
        number: 37,
        node_prefix: None,
        name: "Merged",
        long_name: "UCTE-wide merged datasets without X nodes",
        merged: true,
    },
    Country {
        code: "UX",
        number: 38,
        node_prefix: None,
        name: "Merged_wX",
        long_name: "UCTE-wide merged datasets with X nodes",
        merged: true,
    },
    country("XX", 36, Some('X'), "X_Nodes", "Fictitious border node"),
];

static BY_PREFIX: Lazy<HashMap<char, &'static Country>> = Lazy::new(|| {
    COUNTRIES
        .iter()
        .filter_map(|c| c.node_prefix.map(|prefix| (prefix, c)))
        .collect()
});

static BY_CODE: Lazy<HashMap<&'static str, &'static Country>> =
    Lazy::new(|| COUNTRIES.iter().map(|c| (c.code, c)).collect());

/// Resolves the area of a node that was declared outside any `##Z` block.
pub trait AreaLookup {
    /// Area code for the given node code, if its prefix is known.
    fn area_for_node(&self, node_code: &str) -> Option<String>;
}

/// The built-in reference table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryTable;

impl CountryTable {
    pub fn by_code(&self, code: &str) -> Option<&'static Country> {
        BY_CODE.get(code).copied()
    }

    pub fn by_node_prefix(&self, prefix: char) -> Option<&'static Country> {
        BY_PREFIX.get(&prefix).copied()
    }

    pub fn is_known_code(&self, code: &str) -> bool {
        BY_CODE.contains_key(code)
    }
}

impl AreaLookup for CountryTable {
    fn area_for_node(&self, node_code: &str) -> Option<String> {
        let prefix = node_code.chars().next()?;
        self.by_node_prefix(prefix).map(|c| c.code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_lookup() {
        let table = CountryTable;
        assert_eq!(table.area_for_node("QBYST21A").as_deref(), Some("SK"));
        assert_eq!(table.area_for_node("XSK_KP51").as_deref(), Some("XX"));
        assert_eq!(table.area_for_node("?UNKNOWN"), None);
        assert_eq!(table.area_for_node(""), None);
    }

    #[test]
    fn test_merged_codes_have_no_prefix() {
        let table = CountryTable;
        let merged = table.by_code("UX").expect("UX is listed");
        assert!(merged.merged);
        assert!(merged.node_prefix.is_none());
    }

    #[test]
    fn test_prefixes_are_unique() {
        let with_prefix = COUNTRIES.iter().filter(|c| c.node_prefix.is_some()).count();
        assert_eq!(BY_PREFIX.len(), with_prefix);
        assert_eq!(BY_CODE.len(), COUNTRIES.len());
    }
}
