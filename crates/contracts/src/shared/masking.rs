//! Маскирование реквизитов для списков

const VISIBLE_TAIL: usize = 4;

/// Оставляет видимыми последние 4 символа номера счёта, остальное заменяет на `*`.
///
/// Пробелы удаляются, пустой номер даёт `"-"`.
pub fn mask_account_number(account_number: &str) -> String {
    let chars: Vec<char> = account_number.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return "-".to_string();
    }
    if chars.len() <= VISIBLE_TAIL {
        return chars.into_iter().collect();
    }

    let hidden = chars.len() - VISIBLE_TAIL;
    "*".repeat(hidden) + &chars[hidden..].iter().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_account_number() {
        assert_eq!(mask_account_number("123456789012"), "********9012");
        assert_eq!(mask_account_number("1234 5678"), "****5678");
        assert_eq!(mask_account_number("12345"), "*2345");
    }

    #[test]
    fn test_short_and_empty() {
        assert_eq!(mask_account_number("1234"), "1234");
        assert_eq!(mask_account_number("  "), "-");
        assert_eq!(mask_account_number(""), "-");
    }
}
