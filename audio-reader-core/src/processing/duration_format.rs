use crate::models::error::ReaderError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(String),
    Hours,
    Minutes,
    Seconds,
    Millis,
}

#[derive(Debug, Clone, PartialEq)]
enum Layout {
    /// `%S`: seconds with three decimals.
    DecimalSeconds,
    /// `%I`: whole milliseconds.
    TotalMillis,
    Clock(Vec<Token>),
}

/// Renders a duration in seconds according to a time format.
///
/// Directives: `%h` hours, `%m` minutes, `%s` seconds (each zero-padded to
/// two digits) and `%i` milliseconds (three digits). A format that is exactly
/// `%S` or `%I` prints the whole duration as decimal seconds or integer
/// milliseconds instead.
///
/// ```
/// use audio_reader_core::DurationFormatter;
///
/// let fmt = DurationFormatter::new("%h:%m:%s.%i")?;
/// assert_eq!(fmt.format(3725.5), "01:02:05.500");
/// # Ok::<(), audio_reader_core::ReaderError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DurationFormatter {
    layout: Layout,
}

impl DurationFormatter {
    pub fn new(fmt: &str) -> Result<Self, ReaderError> {
        let layout = match fmt {
            "%S" => Layout::DecimalSeconds,
            "%I" => Layout::TotalMillis,
            _ => Layout::Clock(parse(fmt)?),
        };
        Ok(Self { layout })
    }

    pub fn format(&self, seconds: f64) -> String {
        let tokens = match &self.layout {
            Layout::DecimalSeconds => return format!("{:.3}", seconds),
            Layout::TotalMillis => return total_millis(seconds).to_string(),
            Layout::Clock(tokens) => tokens,
        };

        let millis = total_millis(seconds);
        let hours = millis.div_euclid(3_600_000);
        let millis = millis.rem_euclid(3_600_000);
        let minutes = millis / 60_000;
        let millis = millis % 60_000;
        let secs = millis / 1000;
        let millis = millis % 1000;

        let mut out = String::new();
        for token in tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Hours => out.push_str(&format!("{:02}", hours)),
                Token::Minutes => out.push_str(&format!("{:02}", minutes)),
                Token::Seconds => out.push_str(&format!("{:02}", secs)),
                Token::Millis => out.push_str(&format!("{:03}", millis)),
            }
        }
        out
    }
}

fn total_millis(seconds: f64) -> i64 {
    (seconds * 1000.0) as i64
}

fn parse(fmt: &str) -> Result<Vec<Token>, ReaderError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = fmt.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        let token = match chars.next() {
            Some('h') => Token::Hours,
            Some('m') => Token::Minutes,
            Some('s') => Token::Seconds,
            Some('i') => Token::Millis,
            Some(other) => return Err(ReaderError::TimeFormat(format!("%{}", other))),
            None => return Err(ReaderError::TimeFormat("%".into())),
        };
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(token);
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}
