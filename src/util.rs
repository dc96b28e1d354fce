// 文本与数字格式转换工具

/// Decodes a response body: UTF-8 when valid, otherwise ISO-8859-1.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1 每个字节直接对应同值的 Unicode 码位
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parses an integer written with `.` as the thousands separator, e.g. `4.394.835.131`.
pub fn parse_br_integer(s: &str) -> Option<u64> {
    let digits: String = s.trim().chars().filter(|c| *c != '.').collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

/// Parses a decimal written with `,` as the decimal mark, e.g. `2,870` or `1.234,5`.
pub fn parse_br_decimal(s: &str) -> Option<f64> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Código;Ação".as_bytes()), "Código;Ação");
    }

    #[test]
    fn test_decode_latin1() {
        // "Código;Ação" encoded as ISO-8859-1
        let bytes = [
            b'C', 0xF3, b'd', b'i', b'g', b'o', b';', b'A', 0xE7, 0xE3, b'o',
        ];
        assert_eq!(decode_text(&bytes), "Código;Ação");
    }

    #[test]
    fn test_parse_br_integer() {
        assert_eq!(parse_br_integer("4.394.835.131"), Some(4_394_835_131));
        assert_eq!(parse_br_integer(" 120 "), Some(120));
        assert_eq!(parse_br_integer(""), None);
        assert_eq!(parse_br_integer("Redutor"), None);
    }

    #[test]
    fn test_parse_br_decimal() {
        assert_eq!(parse_br_decimal("2,870"), Some(2.87));
        assert_eq!(parse_br_decimal("1.234,5"), Some(1234.5));
        assert_eq!(parse_br_decimal("100"), Some(100.0));
        assert_eq!(parse_br_decimal(""), None);
        assert_eq!(parse_br_decimal("n/a"), None);
    }
}
