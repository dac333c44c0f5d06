pub mod clock;
pub mod csv_handler;
pub mod url_validator;

pub use clock::{Clock, ManualClock, SystemClock};

/// 短码字符集：26 小写 + 26 大写 + 10 数字
pub const SHORTCODE_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 每个字符独立均匀抽取
    iter::repeat_with(|| SHORTCODE_ALPHABET[rand::random_range(0..SHORTCODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Letters and digits only, non-empty.
pub fn is_alphanumeric_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric())
}
