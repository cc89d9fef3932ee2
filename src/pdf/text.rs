use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Encode `text` for a WinAnsi (CP-1252) base-14 font.
///
/// Polish letters WinAnsi lacks are replaced by their base letter; other
/// unmappable characters become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        'ą' => b'a',
        'Ą' => b'A',
        'ć' => b'c',
        'Ć' => b'C',
        'ę' => b'e',
        'Ę' => b'E',
        'ł' => b'l',
        'Ł' => b'L',
        'ń' => b'n',
        'Ń' => b'N',
        'ś' => b's',
        'Ś' => b'S',
        'ź' | 'ż' => b'z',
        'Ź' | 'Ż' => b'Z',
        '€' => 0x80,
        '„' => 0x84,
        '…' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '–' => 0x96,
        '—' => 0x97,
        '\t' | '\n' | '\r' => b' ',
        // Latin-1 supplement maps one to one (ó = 0xF3, ü = 0xFC, ...).
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        _ => b'?',
    }
}

/// `2024-06-15` → `15.06.2024`; anything unparsable is returned as is.
pub fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// `1234.5` → `1 234,50`; anything unparsable is returned as is.
pub fn format_amount(raw: &str) -> String {
    let Ok(amount) = Decimal::from_str(raw.trim()) else {
        return raw.to_string();
    };
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}")
}

/// Split `text` into lines of at most `max` characters, breaking at
/// whitespace. Words longer than `max` are split mid-word. Runs of
/// whitespace collapse to a single space.
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if len > 0 && len + 1 + word_len > max {
            lines.push(std::mem::take(&mut current));
            len = 0;
        }
        if word_len > max {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max) {
                if len > 0 {
                    lines.push(std::mem::take(&mut current));
                }
                current.extend(chunk);
                len = chunk.len();
            }
            continue;
        }
        if len > 0 {
            current.push(' ');
            len += 1;
        }
        current.push_str(word);
        len += word_len;
    }

    if len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
