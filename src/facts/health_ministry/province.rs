use strum::{Display, EnumString};

/// Austrian provinces, parsed from the abbreviations the health ministry's charts use and
/// displayed with their full names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Province {
    #[strum(serialize = "Bgld", to_string = "Burgenland")]
    Burgenland,

    #[strum(serialize = "Ktn", to_string = "Kärnten")]
    Carinthia,

    #[strum(serialize = "NÖ", to_string = "Niederösterreich")]
    LowerAustria,

    #[strum(serialize = "OÖ", to_string = "Oberösterreich")]
    UpperAustria,

    #[strum(serialize = "Sbg", to_string = "Salzburg")]
    Salzburg,

    #[strum(serialize = "Stmk", to_string = "Steiermark")]
    Styria,

    #[strum(serialize = "T", to_string = "Tirol")]
    Tyrol,

    #[strum(serialize = "Vbg", to_string = "Vorarlberg")]
    Vorarlberg,

    #[strum(serialize = "W", to_string = "Wien")]
    Vienna,
}

/// Full province name for a chart label; labels we do not know become `unknown`.
#[must_use]
pub fn province_name(label: &str) -> String {
    label
        .trim()
        .parse::<Province>()
        .map_or_else(|_| "unknown".to_string(), |province| province.to_string())
}
