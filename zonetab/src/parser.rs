use core::{
    fmt,
    iter::Peekable,
    str::{Lines, Split},
};

use alloc::{borrow::ToOwned, string::String, vec, vec::Vec};

use crate::types::{CountryCode, Iso3166Entry, ZoneTabEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneTabParseError {
    UnexpectedEndOfLine(u32, &'static str),
    InvalidCountryCode(u32, String),
    MissingIdentifier(u32),
}

impl fmt::Display for ZoneTabParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEndOfLine(line, span) => {
                write!(f, "line {line}: unexpected end of line while parsing {span}")
            }
            Self::InvalidCountryCode(line, code) => {
                write!(f, "line {line}: `{code}` is not an ISO 3166 alpha-2 code")
            }
            Self::MissingIdentifier(line) => write!(f, "line {line}: missing zone identifier"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZoneTabParseError {}

pub trait TryFromStr<C>: Sized {
    type Error;
    fn try_from_str(s: &str, context: &mut C) -> Result<Self, Self::Error>;
}

#[derive(Debug, Clone)]
pub struct LineParseContext {
    pub line_number: u32,
    pub spans: Vec<&'static str>,
}

impl LineParseContext {
    pub fn enter(&mut self, name: &'static str) {
        self.spans.push(name);
    }

    pub fn span(&self) -> &'static str {
        self.spans.last().copied().unwrap_or("undefined")
    }

    pub fn exit(&mut self) {
        self.spans.pop();
    }
}

impl Default for LineParseContext {
    fn default() -> Self {
        Self {
            line_number: 1,
            spans: vec!["undefined"],
        }
    }
}

pub trait ContextParse {
    fn context_parse<T: TryFromStr<LineParseContext>>(
        &self,
        ctx: &mut LineParseContext,
    ) -> Result<T, <T as TryFromStr<LineParseContext>>::Error>;
}

impl ContextParse for &str {
    fn context_parse<T: TryFromStr<LineParseContext>>(
        &self,
        ctx: &mut LineParseContext,
    ) -> Result<T, <T as TryFromStr<LineParseContext>>::Error> {
        T::try_from_str(self, ctx)
    }
}

impl TryFromStr<LineParseContext> for CountryCode {
    type Error = ZoneTabParseError;
    fn try_from_str(s: &str, ctx: &mut LineParseContext) -> Result<Self, Self::Error> {
        let invalid = || ZoneTabParseError::InvalidCountryCode(ctx.line_number, s.to_owned());
        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(invalid());
        }
        s.parse::<CountryCode>().map_err(|_| invalid())
    }
}

impl TryFromStr<LineParseContext> for Vec<CountryCode> {
    type Error = ZoneTabParseError;
    fn try_from_str(s: &str, ctx: &mut LineParseContext) -> Result<Self, Self::Error> {
        // zone1970.tab lists every country sharing a zone, comma separated.
        s.split(',').map(|code| code.context_parse(ctx)).collect()
    }
}

/// Returns the next tab separated column of a line.
pub(crate) fn next_column<'a>(
    columns: &mut Split<'a, char>,
    context: &LineParseContext,
) -> Result<&'a str, ZoneTabParseError> {
    columns
        .next()
        .filter(|column| !column.is_empty())
        .ok_or(ZoneTabParseError::UnexpectedEndOfLine(
            context.line_number,
            context.span(),
        ))
}

fn is_skippable(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

impl TryFromStr<LineParseContext> for Iso3166Entry {
    type Error = ZoneTabParseError;
    fn try_from_str(s: &str, ctx: &mut LineParseContext) -> Result<Self, Self::Error> {
        ctx.enter("iso3166 line");
        let mut columns = s.split('\t');
        let code = next_column(&mut columns, ctx)?.context_parse::<CountryCode>(ctx)?;
        let name = next_column(&mut columns, ctx)?.trim().to_owned();
        ctx.exit();
        Ok(Self { code, name })
    }
}

impl TryFromStr<LineParseContext> for ZoneTabEntry {
    type Error = ZoneTabParseError;
    fn try_from_str(s: &str, ctx: &mut LineParseContext) -> Result<Self, Self::Error> {
        ctx.enter("zone.tab line");
        let mut columns = s.split('\t');
        let countries = next_column(&mut columns, ctx)?.context_parse::<Vec<CountryCode>>(ctx)?;
        let coordinates = next_column(&mut columns, ctx)?.to_owned();
        let zone = columns
            .next()
            .map(str::trim)
            .filter(|zone| !zone.is_empty())
            .ok_or(ZoneTabParseError::MissingIdentifier(ctx.line_number))?
            .to_owned();
        let comments = columns
            .next()
            .map(str::trim)
            .filter(|comments| !comments.is_empty())
            .map(ToOwned::to_owned);
        ctx.exit();
        Ok(Self {
            countries,
            coordinates,
            zone,
            comments,
        })
    }
}

/// A line oriented parser over the contents of one tzdb table.
#[non_exhaustive]
pub struct ZoneTabParser<'data> {
    lines: Peekable<Lines<'data>>,
}

impl<'data> ZoneTabParser<'data> {
    /// Creates a parser from a `&str`
    pub fn from_table_str(source: &'data str) -> Self {
        Self {
            lines: source.lines().peekable(),
        }
    }

    /// Parses every non comment line of the table as a `T`.
    pub fn parse<T>(&mut self) -> Result<Vec<T>, ZoneTabParseError>
    where
        T: TryFromStr<LineParseContext, Error = ZoneTabParseError>,
    {
        let mut entries = Vec::new();
        let mut context = LineParseContext::default();
        for line in self.lines.by_ref() {
            if !is_skippable(line) {
                entries.push(line.trim_end().context_parse::<T>(&mut context)?);
            }
            context.line_number += 1;
        }
        Ok(entries)
    }
}
