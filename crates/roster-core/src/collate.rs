//! Turkish-aware string ordering and case folding.
//!
//! Names, departments and divisions are Turkish text, so plain byte order
//! puts `Ç`, `Ş` and `Ü` after `Z`. Ordering here follows the Turkish
//! alphabet case-insensitively and falls back to byte order on ties.

use std::cmp::Ordering;

const ALPHABET: &str = "abcçdefgğhıijklmnoöpqrsştuüvwxyz";

/// Lower-case with Turkish rules for the dotted and dotless i.
pub fn lower(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      'I' => out.push('ı'),
      'İ' => out.push('i'),
      _ => out.extend(c.to_lowercase()),
    }
  }
  out
}

/// Primary weight of a lower-cased character. Punctuation and digits sort
/// before letters; letters follow the Turkish alphabet; everything else
/// sorts after, by code point.
fn weight(c: char) -> u32 {
  if (c as u32) < 'a' as u32 {
    return c as u32;
  }
  match ALPHABET.chars().position(|l| l == c) {
    Some(pos) => 0x1_0000 + pos as u32,
    None => 0x2_0000 + c as u32,
  }
}

/// Upper-case the first letter and lower-case the rest, with Turkish rules.
pub fn capitalize(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some('i') => format!("İ{}", lower(chars.as_str())),
    Some('ı') => format!("I{}", lower(chars.as_str())),
    Some(first) => first.to_uppercase().chain(lower(chars.as_str()).chars()).collect(),
    None => String::new(),
  }
}

/// Compare two strings in Turkish alphabetical order.
pub fn compare(a: &str, b: &str) -> Ordering {
  let (lower_a, lower_b) = (lower(a), lower(b));
  lower_a
    .chars()
    .map(weight)
    .cmp(lower_b.chars().map(weight))
    .then_with(|| a.cmp(b))
}

/// Fold text for case-insensitive substring search. The four Turkish i
/// forms all fold to `i`, so users need not type the exact dot.
pub fn fold(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      'I' | 'İ' | 'ı' => out.push('i'),
      '\u{0307}' => {}
      _ => out.extend(c.to_lowercase()),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn turkish_letters_sort_inside_the_alphabet() {
    let mut names = vec!["Zeynep", "Çağrı", "Şule", "Can", "Ömer", "Osman", "Sema"];
    names.sort_by(|a, b| compare(a, b));
    assert_eq!(
      names,
      vec!["Can", "Çağrı", "Osman", "Ömer", "Sema", "Şule", "Zeynep"]
    );
  }

  #[test]
  fn dotless_i_sorts_before_dotted_i() {
    assert_eq!(compare("Irmak", "İpek"), Ordering::Less);
    assert_eq!(compare("ılık", "ilik"), Ordering::Less);
  }

  #[test]
  fn comparison_ignores_case_first() {
    assert_eq!(compare("ali", "Bora"), Ordering::Less);
    assert_ne!(compare("Ali", "ali"), Ordering::Equal);
  }

  #[test]
  fn capitalize_uses_turkish_case_rules() {
    assert_eq!(capitalize("İŞE GİRİŞ"), "İşe giriş");
    assert_eq!(capitalize("BAŞLANGIÇ TARIHI"), "Başlangıç tarıhı");
    assert_eq!(capitalize("ilk"), "İlk");
    assert_eq!(capitalize(""), "");
  }

  #[test]
  fn fold_merges_i_forms() {
    assert_eq!(fold("TEFTİŞ"), "teftiş");
    assert_eq!(fold("BILGI"), "bilgi");
    assert_eq!(fold("Işık"), "işik");
  }
}
