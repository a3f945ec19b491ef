use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{hex_digit1, space0},
    combinator::opt,
    error::{ContextError, ErrorKind, ParseError},
    sequence::{delimited, preceded},
    IResult,
};

#[derive(Debug)]
pub struct HexNomError<I> {
    pub kind: HexNomErrorKind<I>,
    backtrace: Vec<HexNomErrorKind<I>>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HexNomErrorKind<I> {
    Nom(I, ErrorKind),
    Context(I, &'static str),
    HexadecimalValue,
}

impl<I> HexNomError<I> {
    pub fn new(kind: HexNomErrorKind<I>) -> Self {
        HexNomError {
            kind,
            backtrace: Vec::new(),
        }
    }

    // The outermost context this error was raised under, if any
    pub fn context(&self) -> Option<&'static str> {
        self.backtrace.iter().rev().find_map(|k| match k {
            HexNomErrorKind::Context(_, ctx) => Some(*ctx),
            _ => None,
        })
    }
}

impl<I> ParseError<I> for HexNomError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> HexNomError<I> {
        HexNomError::new(HexNomErrorKind::Nom(input, kind))
    }

    fn append(input: I, kind: ErrorKind, mut other: Self) -> Self {
        other.backtrace.push(HexNomErrorKind::Nom(input, kind));
        other
    }
}

impl<I> ContextError<I> for HexNomError<I> {
    fn add_context(input: I, ctx: &'static str, mut other: Self) -> Self {
        other.backtrace.push(HexNomErrorKind::Context(input, ctx));
        other
    }
}

pub type NomResult<I, T> = IResult<I, T, HexNomError<I>>;

const HEX_DIGITS_IN_WORD: usize = 8;

// Parses a single instruction word written in hexadecimal, with an optional 0x prefix and
// surrounding spaces.
//
// assert_eq!(hex_word("0x2008000a"), Ok(("", 0x2008000a)));
// assert_eq!(hex_word("  01095027 "), Ok(("", 0x01095027)));
//
pub fn hex_word(input: &str) -> NomResult<&str, u32> {
    let (rest, digits) = hex_digits(input)?;

    // A word is written with at most 8 digits, leading zeroes included
    if digits.len() > HEX_DIGITS_IN_WORD {
        return Err(nom::Err::Error(HexNomError::new(
            HexNomErrorKind::HexadecimalValue,
        )));
    }

    match u32::from_str_radix(digits, 16) {
        Ok(word) => Ok((rest, word)),
        Err(_) => Err(nom::Err::Error(HexNomError::new(
            HexNomErrorKind::HexadecimalValue,
        ))),
    }
}

fn hex_digits(input: &str) -> NomResult<&str, &str> {
    nom::error::context(
        "parsing hexadecimal word",
        delimited(
            space0,
            preceded(opt(alt((tag("0x"), tag("0X")))), hex_digit1),
            space0,
        ),
    )(input)
}

///////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////
