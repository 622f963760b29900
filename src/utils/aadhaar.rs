//! Aadhaar number validation: 12 digits, no leading 0 or 1, not a
//! palindrome, and a valid Verhoeff check digit.

const MULTIPLICATION: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const PERMUTATION: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Strips the separators users commonly type.
pub fn compact(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

fn verhoeff_checksum(digits: &[u8]) -> u8 {
    digits
        .iter()
        .rev()
        .enumerate()
        .fold(0, |check, (i, digit)| {
            MULTIPLICATION[check as usize][PERMUTATION[i % 8][*digit as usize] as usize]
        })
}

pub fn is_valid(raw: &str) -> bool {
    let number = compact(raw);

    if number.len() != 12 || !number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    if number.starts_with('0') || number.starts_with('1') {
        return false;
    }

    if number.chars().rev().collect::<String>() == number {
        return false;
    }

    let digits = number.bytes().map(|b| b - b'0').collect::<Vec<u8>>();
    verhoeff_checksum(&digits) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_numbers() {
        assert!(is_valid("234123412346"));
        assert!(is_valid("2341 2341 2346"));
        assert!(is_valid("499118665246"));
    }

    #[test]
    fn rejects_bad_check_digit() {
        assert!(!is_valid("234123412347"));
    }

    #[test]
    fn rejects_leading_zero_or_one() {
        assert!(!is_valid("123412341234"));
        assert!(!is_valid("023412341234"));
    }

    #[test]
    fn rejects_wrong_length_and_non_digits() {
        assert!(!is_valid("643343121"));
        assert!(!is_valid("23412341234a"));
        assert!(!is_valid(""));
    }

    #[test]
    fn rejects_palindromes_even_with_valid_checksum() {
        assert!(!is_valid("999999999999"));
    }
}
