// ==========================================
// 电子表格列名（双射 26 进制）
// ==========================================
// A..Z, AA..AZ, BA.. ZZ, AAA..
// 索引从 0 开始: 0 → A, 25 → Z, 26 → AA
// ==========================================

const BASE: u32 = 26;

/// 列索引 → 列名
pub fn column_name(index: u32) -> String {
    let mut n = index as u64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % BASE as u64) as u8);
        n /= BASE as u64;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// 列名 → 列索引
///
/// 空串、非字母或超出 u32 范围时返回 None
pub fn column_index(name: &str) -> Option<u32> {
    if name.is_empty() {
        return None;
    }

    let mut value: u64 = 0;
    for ch in name.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as u64 + 1;
        value = value * BASE as u64 + digit;
        if value > u32::MAX as u64 + 1 {
            return None;
        }
    }
    u32::try_from(value - 1).ok()
}

/// 下一列的列名（Z → AA, AZ → BA, ZZ → AAA）
pub fn next_column(name: &str) -> Option<String> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut letters: Vec<u8> = name.to_ascii_uppercase().into_bytes();
    let mut pos = letters.len();
    loop {
        if pos == 0 {
            // 全部进位
            letters.insert(0, b'A');
            break;
        }
        pos -= 1;
        if letters[pos] == b'Z' {
            letters[pos] = b'A';
        } else {
            letters[pos] += 1;
            break;
        }
    }
    String::from_utf8(letters).ok()
}
