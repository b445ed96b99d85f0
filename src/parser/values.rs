// Splitting of VALUES blocks into tuples and tuples into fields.
// Both passes run the escape-aware scanner so parentheses and commas inside
// quoted literals never act as delimiters. No SQL grammar involved.

use crate::parser::scan::QuoteState;

/// Extract the top-level `(...)` tuple interiors from a VALUES block, in
/// source order. Separator runs (commas, whitespace) and stray characters
/// between tuples are skipped; an unterminated trailing tuple is dropped.
pub fn extract_tuples(values_block: &str) -> Vec<String> {
    let mut tuples = Vec::new();
    let mut buf = String::new();
    let mut state = QuoteState::new();
    let mut depth = 0i32;

    for c in values_block.chars() {
        if depth == 0 {
            // Between tuples: wait for the next opening paren.
            if c == '(' {
                depth = 1;
                state.reset();
            }
            continue;
        }
        let live = state.step(c);
        if live && c == '(' {
            depth += 1;
        } else if live && c == ')' {
            depth -= 1;
            if depth == 0 {
                tuples.push(buf.trim().to_string());
                buf.clear();
                continue;
            }
        }
        buf.push(c);
    }
    tuples
}

/// Split one tuple interior into raw fields on live (unquoted) commas.
/// Quote characters are preserved in the field text.
pub fn split_fields(tuple: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut buf = String::new();
    let mut state = QuoteState::new();

    for c in tuple.chars() {
        if state.step(c) && c == ',' {
            fields.push(buf.clone());
            buf.clear();
        } else {
            buf.push(c);
        }
    }
    if !buf.is_empty() {
        fields.push(buf);
    }
    fields
}

/// Trim a raw field and strip one layer of surrounding quotes, if present.
/// Escape sequences inside the field are left untouched here; cosmetic
/// cleanup happens at serialization time.
pub fn unquote(field: &str) -> String {
    let t = field.trim();
    for q in ['\'', '"'] {
        if t.len() >= 2 && t.starts_with(q) && t.ends_with(q) {
            return t[1..t.len() - 1].to_string();
        }
    }
    t.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_top_level_tuples() {
        let got = extract_tuples("(1, 'a'), (2, 'b'),(3, 'c')");
        assert_eq!(got, vec!["1, 'a'", "2, 'b'", "3, 'c'"]);
    }

    #[test]
    fn paren_inside_quotes_does_not_split() {
        let got = extract_tuples("(1, 'Cocos (Keeling) Islands', 46)");
        assert_eq!(got, vec!["1, 'Cocos (Keeling) Islands', 46"]);
    }

    #[test]
    fn stray_characters_between_tuples_are_skipped() {
        let got = extract_tuples("(1, 'a') ;x (2, 'b')");
        assert_eq!(got, vec!["1, 'a'", "2, 'b'"]);
    }

    #[test]
    fn empty_block_yields_no_tuples() {
        assert!(extract_tuples("").is_empty());
        assert!(extract_tuples("  \n ").is_empty());
    }

    #[test]
    fn unterminated_tuple_is_dropped() {
        let got = extract_tuples("(1, 'a'), (2, 'b");
        assert_eq!(got, vec!["1, 'a'"]);
    }

    #[test]
    fn nested_unquoted_parens_stay_in_one_tuple() {
        let got = extract_tuples("(1, (2, 3), 4), (5)");
        assert_eq!(got, vec!["1, (2, 3), 4", "5"]);
    }

    #[test]
    fn splits_fields_on_live_commas_only() {
        let got = split_fields("1, 'X, Y', 2");
        assert_eq!(got, vec!["1", " 'X, Y'", " 2"]);
    }

    #[test]
    fn escaped_quote_keeps_literal_open_across_comma() {
        let got = split_fields(r"1, 'O\'Brien, Pat', 2");
        assert_eq!(got.len(), 3);
        assert_eq!(got[1], r" 'O\'Brien, Pat'");
    }

    #[test]
    fn unquote_strips_one_layer() {
        assert_eq!(unquote(" 'abc' "), "abc");
        assert_eq!(unquote("\"abc\""), "abc");
        assert_eq!(unquote("''abc''"), "'abc'");
        assert_eq!(unquote("42"), "42");
        assert_eq!(unquote("'"), "'");
    }
}
