//! Splits a source line into whitespace/punctuation-delimited tokens,
//! tracking the 1-based column each token starts at so parse errors can
//! point at the offending text.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub column: usize,
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | ',' | '(' | ')' | ';')
}

pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = 0usize;

    for (byte_idx, c) in line.char_indices() {
        if is_delimiter(c) {
            if !current.is_empty() {
                tokens.push(Token {
                    text: std::mem::take(&mut current),
                    column: start + 1,
                });
            }
        } else {
            if current.is_empty() {
                start = byte_idx;
            }
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(Token {
            text: current,
            column: start + 1,
        });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_comma_and_parens() {
        let toks = tokenize("lw $t0, 4($s0)");
        let texts: Vec<&str> = toks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["lw", "$t0", "4", "$s0"]);
    }

    #[test]
    fn tracks_columns() {
        let toks = tokenize("add $t0 $t1 $t2");
        assert_eq!(toks[0].column, 1);
        assert_eq!(toks[1].column, 5);
    }
}
