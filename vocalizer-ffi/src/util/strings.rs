use anyhow::{bail, Result};
use std::ffi::{c_char, CStr};

/// Platform `wchar_t`.
#[cfg(windows)]
pub type WChar = u16;
#[cfg(not(windows))]
pub type WChar = i32;

/// Reads a fixed-length, NUL padded character field.
pub fn fixed_to_string(field: &[c_char]) -> String {
    let bytes = field
        .iter()
        .take_while(|x| **x != 0)
        .map(|x| *x as u8)
        .collect::<Vec<_>>();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Writes `value` into a fixed-length character field, NUL terminated and
/// zero padded.
pub fn string_to_fixed(value: &str, field: &mut [c_char]) -> Result<()> {
    if value.as_bytes().contains(&0) {
        bail!("String `{}` contains an interior NUL byte.", value.escape_debug());
    }
    if value.len() >= field.len() {
        bail!(
            "String `{}` needs {} bytes but the field only holds {}.",
            value, value.len() + 1, field.len()
        );
    }

    field.fill(0);
    for (target, byte) in field.iter_mut().zip(value.bytes()) {
        *target = byte as c_char;
    }
    Ok(())
}

/// Copies a NUL terminated C string. Null yields `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL terminated string.
pub unsafe fn c_str_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

/// NUL terminated wide copy of `value`.
pub fn to_wide(value: &str) -> Vec<WChar> {
    #[cfg(windows)]
    let mut wide: Vec<WChar> = value.encode_utf16().collect();
    #[cfg(not(windows))]
    let mut wide: Vec<WChar> = value.chars().map(|x| x as WChar).collect();

    wide.push(0);
    wide
}

/// Copies a NUL terminated wide string. Null yields `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL terminated `wchar_t` string.
pub unsafe fn wide_to_string(ptr: *const WChar) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    let mut len = 0;
    while *ptr.add(len) != 0 {
        len += 1;
    }
    let units = std::slice::from_raw_parts(ptr, len);

    #[cfg(windows)]
    let string = String::from_utf16_lossy(units);
    #[cfg(not(windows))]
    let string = units
        .iter()
        .map(|x| char::from_u32(*x as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();

    Some(string)
}

#[test]
fn test_fixed_round_trip() {
    let mut field = [0x7f as c_char; 8];
    string_to_fixed("enu", &mut field).unwrap();
    assert_eq!(fixed_to_string(&field), "enu");
    assert!(field[3..].iter().all(|x| *x == 0));
}

#[test]
fn test_fixed_rejects_overflow() {
    let mut field = [0 as c_char; 4];
    assert!(string_to_fixed("abcd", &mut field).is_err());
    assert!(string_to_fixed("a\0b", &mut field).is_err());
    string_to_fixed("abc", &mut field).unwrap();
}

#[test]
fn test_wide_strings() {
    let wide = to_wide("Tiflotecnia ç");
    assert_eq!(wide.last(), Some(&0));
    let back = unsafe { wide_to_string(wide.as_ptr()) };
    assert_eq!(back.as_deref(), Some("Tiflotecnia ç"));
    assert_eq!(unsafe { wide_to_string(std::ptr::null()) }, None);
}
