//! String helpers exposed to templates.
//!
//! [`export_name`] turns a SQL identifier into the name used for generated
//! items: `user_id` becomes `UserID`, `first name` becomes `First Name`.
//! [`export_ident`] additionally forces the result into a valid Rust
//! identifier, and [`rust_str`] quotes a name as a Rust string literal.

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// Words that are not simply capitalized.
const IRREGULAR_WORDS: &[(&str, &str)] = &[("id", "ID")];

/// Convert a raw SQL identifier into an exported name.
///
/// The first character and every character after a space or underscore is
/// upper-cased. Underscores are dropped, spaces are kept. A word spelled
/// exactly `id` becomes `ID`.
pub fn export_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word = String::new();

    for c in raw.chars() {
        match c {
            '_' => push_word(&mut out, &mut word),
            ' ' => {
                push_word(&mut out, &mut word);
                out.push(' ');
            }
            _ => word.push(c),
        }
    }
    push_word(&mut out, &mut word);

    out
}

fn push_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }

    if let Some((_, irregular)) = IRREGULAR_WORDS.iter().find(|(w, _)| *w == word.as_str()) {
        out.push_str(irregular);
    } else {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    word.clear();
}

/// [`export_name`], forced into a valid Rust identifier.
///
/// Characters that cannot appear in an identifier become `_`. A result that
/// is empty or starts with a digit gets a leading `_`; a keyword (`self`
/// exports as `Self`) gets a trailing `_`.
pub fn export_ident(raw: &str) -> String {
    let mut ident: String = export_name(raw)
        .chars()
        .map(|c| {
            if c == '_' || c.is_ascii_alphanumeric() || (!c.is_ascii() && c.is_alphabetic()) {
                c
            } else {
                '_'
            }
        })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if syn::parse_str::<syn::Ident>(&ident).is_err() {
        ident.push('_');
    }

    ident
}

/// Quote `s` as a Rust string literal.
pub fn rust_str(s: &str) -> String {
    format!("{s:?}")
}

/// Upper-case the first letter of each whitespace separated word.
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}

pub fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn snake_case(s: &str) -> String {
    s.to_snake_case()
}

pub fn upper_camel_case(s: &str) -> String {
    s.to_upper_camel_case()
}

pub fn shouty_snake_case(s: &str) -> String {
    s.to_shouty_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("id", "ID")]
    #[case("user_id", "UserID")]
    #[case("first name", "First Name")]
    #[case("users", "Users")]
    #[case("created_at", "CreatedAt")]
    #[case("a__b", "AB")]
    #[case("_private", "Private")]
    #[case("trailing_", "Trailing")]
    #[case("idx", "Idx")]
    #[case("ID", "ID")]
    #[case("first id", "First ID")]
    #[case("user_id_ref", "UserIDRef")]
    #[case("éclair_über", "ÉclairÜber")]
    #[case("straße", "Straße")]
    #[case("ßtraße", "SStraße")]
    fn export_name_cases(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(export_name(raw), expected);
    }

    #[test]
    fn export_name_edge_cases() {
        assert_eq!(export_name(""), "");
        assert_eq!(export_name("___"), "");
        assert_eq!(export_name("_ _"), " ");
    }

    #[test]
    fn export_name_never_contains_underscores() {
        for raw in ["a_b_c", "__x__", "snake_case_name", "_", "id_"] {
            assert!(!export_name(raw).contains('_'), "{raw}");
        }
    }

    #[test]
    fn export_name_only_touches_word_starts() {
        // Characters inside a word keep their case.
        assert_eq!(export_name("mixedCASE_value"), "MixedCASEValue");
        assert_eq!(export_name("x9_y"), "X9Y");
    }

    #[rstest]
    #[case("users", "Users")]
    #[case("user_id", "UserID")]
    #[case("self", "Self_")]
    #[case("1st_place", "_1stPlace")]
    #[case("first name", "First_Name")]
    #[case("a-b.c", "A_b_c")]
    #[case(r"a\tb", "A_tb")]
    #[case("___", "__")]
    #[case("", "__")]
    #[case("über", "Über")]
    fn export_ident_cases(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(export_ident(raw), expected);
    }

    #[test]
    fn export_ident_always_parses() {
        for raw in ["self", "Self", "super", "crate", "9", "a b c", "\"", "id", "x²"] {
            let ident = export_ident(raw);
            assert!(syn::parse_str::<syn::Ident>(&ident).is_ok(), "{raw} -> {ident}");
        }
    }

    #[rstest]
    #[case("users", r#""users""#)]
    #[case(r"a\tb", r#""a\\tb""#)]
    #[case(r#"say "hi""#, r#""say \"hi\"""#)]
    #[case("tab\there", r#""tab\there""#)]
    fn rust_str_cases(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(rust_str(raw), expected);
    }

    #[test]
    fn rust_str_survives_the_rust_parser() {
        for raw in [r"a\tb", r#"say "hi""#, "line\nbreak", "ünïcödé", ""] {
            let lit: syn::LitStr = syn::parse_str(&rust_str(raw)).unwrap();
            assert_eq!(lit.value(), raw);
        }
    }

    #[rstest]
    #[case("hello world", "Hello World")]
    #[case("hello_world", "Hello_world")]
    #[case("  leading  spaces", "  Leading  Spaces")]
    #[case("aBC dEF", "ABC DEF")]
    #[case("", "")]
    fn title_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(title(input), expected);
    }

    #[test]
    fn case_folding_helpers() {
        assert_eq!(to_upper("user_id"), "USER_ID");
        assert_eq!(to_lower("User_ID"), "user_id");
        assert_eq!(snake_case("UserAccounts"), "user_accounts");
        assert_eq!(upper_camel_case("user_accounts"), "UserAccounts");
        assert_eq!(shouty_snake_case("user accounts"), "USER_ACCOUNTS");
    }
}
