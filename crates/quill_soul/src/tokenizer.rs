//! Input tokenization.
//!
//! Splits a command line on whitespace, keeping quoted messages intact and
//! remembering where each token ends so the unparsed remainder can be cut
//! from the original text.

/// A token from player input.
#[derive(Clone, Debug, PartialEq)]
pub enum InputToken {
    /// A bare word.
    Word {
        /// The word as typed, punctuation included.
        raw: String,
        /// Lowercased, trailing punctuation stripped.
        word: String,
        /// The word was followed by a comma.
        comma: bool,
        /// Byte offset just past the word in the input.
        end: usize,
    },
    /// A quoted message, without its quotes, case preserved.
    Quoted {
        /// The message text.
        text: String,
        /// Byte offset just past the closing quote.
        end: usize,
    },
}

impl InputToken {
    /// The normalized word, if this is a word token.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        match self {
            Self::Word { word, .. } => Some(word),
            Self::Quoted { .. } => None,
        }
    }

    /// The text as typed (message text for quotes).
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Word { raw, .. } => raw,
            Self::Quoted { text, .. } => text,
        }
    }

    /// Byte offset just past this token in the input.
    #[must_use]
    pub const fn end(&self) -> usize {
        match self {
            Self::Word { end, .. } | Self::Quoted { end, .. } => *end,
        }
    }

    /// True if a comma directly followed the word.
    #[must_use]
    pub const fn has_comma(&self) -> bool {
        matches!(self, Self::Word { comma: true, .. })
    }
}

/// Tokenizes player input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Tokenizes a raw command line.
    ///
    /// - Splits on whitespace
    /// - A lone leading punctuation mark is glued to the next word
    /// - `"..."` and `'...'` runs become a single [`InputToken::Quoted`]
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<InputToken> {
        let mut pieces = split_whitespace(input);
        if pieces.len() > 1 && is_lone_punctuation(&pieces[0].1) {
            let (start, mark, _) = pieces.remove(0);
            pieces[0].0 = start;
            pieces[0].1.insert_str(0, &mark);
        }

        let mut tokens = Vec::with_capacity(pieces.len());
        let mut i = 0;
        while i < pieces.len() {
            let (_, text, end) = &pieces[i];
            if let Some(quote) = opening_quote(text) {
                let close = (i..pieces.len()).find(|&j| closes_quote(&pieces[j].1, quote, j == i));
                let last = close.unwrap_or(pieces.len() - 1);
                let joined = pieces[i..=last]
                    .iter()
                    .map(|(_, t, _)| t.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let body = &joined[1..];
                let body = match close {
                    Some(_) => body.rfind(quote).map_or(body, |pos| &body[..pos]),
                    None => body,
                };
                tokens.push(InputToken::Quoted {
                    text: body.to_string(),
                    end: pieces[last].2,
                });
                i = last + 1;
                continue;
            }
            tokens.push(word_token(text, *end));
            i += 1;
        }
        tokens
    }
}

fn split_whitespace(input: &str) -> Vec<(usize, String, usize)> {
    let mut pieces = Vec::new();
    let mut start = None;
    for (pos, ch) in input.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                pieces.push((s, input[s..pos].to_string(), pos));
                start = None;
            }
            (false, None) => start = Some(pos),
            _ => {}
        }
    }
    if let Some(s) = start {
        pieces.push((s, input[s..].to_string(), input.len()));
    }
    pieces
}

fn is_lone_punctuation(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}

fn opening_quote(text: &str) -> Option<char> {
    text.chars().next().filter(|c| *c == '"' || *c == '\'')
}

fn closes_quote(text: &str, quote: char, is_opening: bool) -> bool {
    let trimmed = text.trim_end_matches(['.', ',', '!', '?', ';', ':']);
    let trimmed = if trimmed.is_empty() { text } else { trimmed };
    if is_opening {
        trimmed.len() >= 2 && trimmed.ends_with(quote)
    } else {
        trimmed.ends_with(quote)
    }
}

fn word_token(raw: &str, end: usize) -> InputToken {
    let lower = raw.to_lowercase();
    let stripped = lower.trim_end_matches([',', '.', '!', '?', ';', ':']);
    let word = if stripped.is_empty() { lower.clone() } else { stripped.to_string() };
    InputToken::Word {
        raw: raw.to_string(),
        word,
        comma: raw.ends_with(','),
        end,
    }
}
