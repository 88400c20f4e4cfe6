//! Дата выхода товара: разбор ISO строки и вывод в длинной испанской форме.

use chrono::{Datelike, NaiveDate};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Разобрать ISO дату. Допускается хвост времени: "2024-03-15T14:02:26Z".
pub fn parse_release_date(value: &str) -> Result<NaiveDate, String> {
    let date_part = value.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| format!("Fecha inválida '{}': {}", value.trim(), e))
}

/// "2020-12-10" -> "10 de diciembre de 2020"
pub fn format_release_date(date: NaiveDate) -> String {
    let month = MONTHS_ES[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_release_date() {
        let d = NaiveDate::from_ymd_opt(2020, 12, 10).unwrap();
        assert_eq!(format_release_date(d), "10 de diciembre de 2020");
        let d = NaiveDate::from_ymd_opt(2009, 1, 1).unwrap();
        assert_eq!(format_release_date(d), "1 de enero de 2009");
    }

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("2019-04-26"),
            Ok(NaiveDate::from_ymd_opt(2019, 4, 26).unwrap())
        );
        assert_eq!(
            parse_release_date(" 2019-04-26T10:00:00Z "),
            Ok(NaiveDate::from_ymd_opt(2019, 4, 26).unwrap())
        );
        assert!(parse_release_date("26/04/2019").is_err());
        assert!(parse_release_date("").is_err());
    }
}
