use thiserror::Error;

use crate::error::PrefixLenError;

enum FamilyType {
    V4,
    V6,
}

#[derive(Debug)]
enum ParserState {
    Initial,
    Digit,
    V4Sep,
    V6Sep,
}

mod flag {
    pub const IS_IPV6_ZERO_SKIP: u8 = 0b010;
    pub const IS_IPV6_SEP_INITIAL: u8 = 0b100;
    pub const IS_IPV6_SEP_LAST_DOUBLE: u8 = 0b1000;
}

const IPV4_LEN: u8 = 4;
const IPV6_LEN: u8 = 8;
const IPV4_MAX_DIGITS: u8 = 3;
const IPV6_MAX_DIGITS: u8 = 4;

struct Parser<'a> {
    state: ParserState,
    family: FamilyType,
    flags: u8,
    //Number of address components
    //For IPv4 it is always 4
    //For normal IPv6 it is always 8
    components_size: u8,
    components: [u16; 8],
    zero_component_start: u8,
    //Component being read
    digit_start: usize,
    digit_len: u8,
    digit_value: u32,
    text: &'a [u8],
}

impl<'a> Parser<'a> {
    const fn new(text: &'a str, family: FamilyType) -> Self {
        Self {
            state: ParserState::Initial,
            family,
            flags: 0,
            components_size: 0,
            components: [0; 8],
            zero_component_start: 0,
            digit_start: 0,
            digit_len: 0,
            digit_value: 0,
            text: text.as_bytes(),
        }
    }

    const fn extract_component(&mut self) -> Option<ParseError> {
        match self.family {
            FamilyType::V4 => {
                if self.components_size >= IPV4_LEN {
                    return Some(ParseError::Ipv4InvalidComponentSize(self.components_size.saturating_add(1)));
                }
                if self.digit_value > u8::MAX as u32 {
                    return Some(ParseError::Ipv4ComponentOverflow(self.digit_value as u16));
                }
            },
            FamilyType::V6 => {
                if self.components_size >= IPV6_LEN {
                    return Some(ParseError::Ipv6InvalidComponentSize(self.components_size.saturating_add(1)));
                }
            },
        }

        self.components[self.components_size as usize] = self.digit_value as u16;
        self.components_size = self.components_size.saturating_add(1);
        self.digit_len = 0;
        self.digit_value = 0;
        None
    }

    const fn expand_zero_skip(&mut self) {
        let zero_len = IPV6_LEN.saturating_sub(self.components_size) as usize;
        let start = self.zero_component_start as usize;
        //Move tail components to the end, leaving zeroes in their place
        let mut idx = self.components_size as usize;
        while idx > start {
            idx -= 1;
            self.components[idx + zero_len] = self.components[idx];
            self.components[idx] = 0;
        }
    }

    const fn read_v6(&mut self) -> Result<[u16; 8], ParseError> {
        if self.components_size < IPV6_LEN {
            if self.flags & flag::IS_IPV6_ZERO_SKIP == flag::IS_IPV6_ZERO_SKIP {
                self.expand_zero_skip();
            } else {
                return Err(ParseError::Ipv6InvalidComponentSize(self.components_size));
            }
        }

        Ok(self.components)
    }

    const fn read_v4(&self) -> Result<[u8; 4], ParseError> {
        if self.components_size != IPV4_LEN {
            return Err(ParseError::Ipv4InvalidComponentSize(self.components_size));
        }

        Ok([
            self.components[0] as u8,
            self.components[1] as u8,
            self.components[2] as u8,
            self.components[3] as u8,
        ])
    }

    #[inline(always)]
    const fn on_digit(&mut self, ch: u8, pos: usize) -> Option<ParseError> {
        match self.state {
            ParserState::Digit => (),
            ParserState::V6Sep if self.flags & flag::IS_IPV6_SEP_INITIAL == flag::IS_IPV6_SEP_INITIAL => return Some(ParseError::InvalidIpv6),
            _ => {
                self.flags &= !flag::IS_IPV6_SEP_LAST_DOUBLE;
                self.state = ParserState::Digit;
                self.digit_start = pos;
            }
        }

        let (digit, radix, max_digits) = match self.family {
            FamilyType::V4 => match ch {
                b'0'..=b'9' => (ch - b'0', 10, IPV4_MAX_DIGITS),
                _ => return Some(ParseError::InvalidComponent(self.digit_start)),
            },
            FamilyType::V6 => match ch {
                b'0'..=b'9' => (ch - b'0', 16, IPV6_MAX_DIGITS),
                b'a'..=b'f' => (ch - b'a' + 10, 16, IPV6_MAX_DIGITS),
                _ => (ch - b'A' + 10, 16, IPV6_MAX_DIGITS),
            },
        };

        self.digit_len = self.digit_len.saturating_add(1);
        if self.digit_len > max_digits {
            return Some(ParseError::InvalidComponent(self.digit_start));
        }
        self.digit_value = self.digit_value * radix + digit as u32;
        None
    }

    #[inline(always)]
    const fn on_v4_sep(&mut self) -> Option<ParseError> {
        let result = match self.family {
            FamilyType::V6 => return Some(ParseError::InvalidIpv6),
            FamilyType::V4 => match self.state {
                ParserState::Digit => self.extract_component(),
                ParserState::V4Sep | ParserState::V6Sep | ParserState::Initial => Some(ParseError::InvalidIpv4),
            },
        };
        self.state = ParserState::V4Sep;
        result
    }

    #[inline(always)]
    const fn on_v6_sep(&mut self) -> Option<ParseError> {
        if let FamilyType::V4 = self.family {
            return Some(ParseError::InvalidIpv4);
        }

        let result = match self.state {
            ParserState::Digit => self.extract_component(),
            ParserState::V6Sep => {
                //Only 1 zero skip is allowed
                if (self.flags & flag::IS_IPV6_ZERO_SKIP) == flag::IS_IPV6_ZERO_SKIP {
                    return Some(ParseError::Ipv6MultipleZeroAbbrv);
                } else {
                    self.flags = (self.flags & !flag::IS_IPV6_SEP_INITIAL) | flag::IS_IPV6_ZERO_SKIP | flag::IS_IPV6_SEP_LAST_DOUBLE;
                    self.zero_component_start = self.components_size;
                    return None
                }
            },
            //You can start with double ::
            ParserState::Initial => {
                self.flags |= flag::IS_IPV6_SEP_INITIAL;
                None
            }
            ParserState::V4Sep => Some(ParseError::InvalidIpv6),
        };

        self.state = ParserState::V6Sep;
        result
    }

    //Handles last address component if any
    const fn on_end(&mut self) -> Option<ParseError> {
        match self.state {
            ParserState::Digit => self.extract_component(),
            ParserState::V4Sep => Some(ParseError::InvalidIpv4),
            //Only `::` may terminate address, single trailing `:` is invalid
            ParserState::V6Sep if self.flags & flag::IS_IPV6_SEP_LAST_DOUBLE == flag::IS_IPV6_SEP_LAST_DOUBLE => None,
            ParserState::V6Sep => Some(ParseError::InvalidIpv6),
            ParserState::Initial => Some(ParseError::MissingIp),
        }
    }

    const fn run(&mut self) -> Option<ParseError> {
        let mut idx = 0;

        while idx < self.text.len() {
            let ch = self.text[idx];
            let error = if ch.is_ascii_hexdigit() {
                self.on_digit(ch, idx)
            } else if ch == b'.' {
                self.on_v4_sep()
            } else if ch == b':' {
                self.on_v6_sep()
            } else if ch.is_ascii() {
                Some(ParseError::UnexpectedCharacter(ch as char, idx))
            } else {
                Some(ParseError::NonAsciiCharacter(idx))
            };

            if let Some(error) = error {
                return Some(error);
            }

            idx = idx + 1;
        }

        self.on_end()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
///Possible errors parsing IP addr
pub enum ParseError {
    ///Invalid address component, starting at idx
    #[error("Invalid address component at idx={0}")]
    InvalidComponent(usize),
    ///Unexpected character with position where it is encountered at
    #[error("Encountered unexpected character '{0}' at idx={1}")]
    UnexpectedCharacter(char, usize),
    ///Input is neither IPv4 nor IPv6
    #[error("Input is not valid IP")]
    UnknownFamily,
    ///Address is not valid IPv4
    #[error("Address is not valid IPv4")]
    InvalidIpv4,
    ///IPv4 Address must have 4 components
    #[error("IPv4 Address has '{0}' components but expected 4")]
    Ipv4InvalidComponentSize(u8),
    ///IPv4 Address component is greater than 255
    #[error("IPv4 component is '{0}' while allowed range is 0..=255")]
    Ipv4ComponentOverflow(u16),
    ///Address is not valid IPv6
    #[error("Address is not valid IPv6")]
    InvalidIpv6,
    ///IPv6 Address must have 8 components
    #[error("IPv6 Address has '{0}' components but expected 8")]
    Ipv6InvalidComponentSize(u8),
    ///IPv6 contains more than 1 zero abbreviation
    #[error("IPv6 contains more than 1 zero abbreviation")]
    Ipv6MultipleZeroAbbrv,
    ///Unexpected Non-ASCII character encountered
    #[error("Encountered non-ASCII character at idx={0}")]
    NonAsciiCharacter(usize),
    ///IP address is not specified
    #[error("Address is not specified")]
    MissingIp,
    ///Mask or prefix is not specified after `/`
    #[error("Mask is not specified")]
    MissingMask,
    ///Prefix is greater than number of bits in address
    #[error("Prefix '{prefix}' is greater than {max}")]
    PrefixOverflow {
        ///Parsed prefix, saturated at `u32::MAX`
        prefix: u32,
        ///Number of bits within address
        max: u8,
    },
}

impl From<PrefixLenError> for ParseError {
    #[inline(always)]
    fn from(error: PrefixLenError) -> Self {
        Self::PrefixOverflow {
            prefix: error.prefix as u32,
            max: error.max,
        }
    }
}

///Parses IPv6 address text into its 8 groups
pub(crate) const fn parse_ipv6(text: &str) -> Result<[u16; 8], ParseError> {
    let mut parser = Parser::new(text, FamilyType::V6);
    match parser.run() {
        None => parser.read_v6(),
        Some(error) => Err(error),
    }
}

///Parses dotted-quad IPv4 address text into its octets
pub(crate) const fn parse_ipv4(text: &str) -> Result<[u8; 4], ParseError> {
    let mut parser = Parser::new(text, FamilyType::V4);
    match parser.run() {
        None => parser.read_v4(),
        Some(error) => Err(error),
    }
}

///Parses decimal prefix, returning `None` if `text` is not made of decimal digits only
pub(crate) const fn parse_prefix(text: &str, max: u8) -> Option<Result<u8, ParseError>> {
    let text = text.as_bytes();
    if text.is_empty() {
        return None;
    }

    let mut prefix: u32 = 0;
    let mut idx = 0;
    while idx < text.len() {
        let ch = text[idx];
        if !ch.is_ascii_digit() {
            return None;
        }
        prefix = prefix.saturating_mul(10).saturating_add((ch - b'0') as u32);
        idx = idx + 1;
    }

    if prefix > max as u32 {
        Some(Err(ParseError::PrefixOverflow { prefix, max }))
    } else {
        Some(Ok(prefix as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expand_zero_skip_in_the_middle() {
        assert_eq!(parse_ipv6("1:2::7:8"), Ok([1, 2, 0, 0, 0, 0, 7, 8]));
        assert_eq!(parse_ipv6("1::"), Ok([1, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(parse_ipv6("::8"), Ok([0, 0, 0, 0, 0, 0, 0, 8]));
        assert_eq!(parse_ipv6("::"), Ok([0; 8]));
        assert_eq!(parse_ipv6("1:2:3:4:5:6::7:8"), Ok([1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(parse_ipv6("1:2:3:4:5::6:7"), Ok([1, 2, 3, 4, 5, 0, 6, 7]));
        assert_eq!(parse_ipv6("1:2:3:4:5:6:7::"), Ok([1, 2, 3, 4, 5, 6, 7, 0]));
    }

    #[test]
    fn should_read_mixed_case_hex() {
        assert_eq!(parse_ipv6("FfE0:aBcD::"), Ok([0xffe0, 0xabcd, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn should_report_component_errors() {
        assert_eq!(parse_ipv6("12345::"), Err(ParseError::InvalidComponent(0)));
        assert_eq!(parse_ipv6("1:00000::"), Err(ParseError::InvalidComponent(2)));
        assert_eq!(parse_ipv6("1::3::8"), Err(ParseError::Ipv6MultipleZeroAbbrv));
        assert_eq!(parse_ipv6(":1::"), Err(ParseError::InvalidIpv6));
        assert_eq!(parse_ipv6("1::2:"), Err(ParseError::InvalidIpv6));
        assert_eq!(parse_ipv6("::1:"), Err(ParseError::InvalidIpv6));
        assert_eq!(parse_ipv6("1:2::3:4:"), Err(ParseError::InvalidIpv6));
        assert_eq!(parse_ipv6("1.2.3.4"), Err(ParseError::InvalidIpv6));
        assert_eq!(parse_ipv6("1:2"), Err(ParseError::Ipv6InvalidComponentSize(2)));
        assert_eq!(parse_ipv6("1::2/3"), Err(ParseError::UnexpectedCharacter('/', 4)));
        assert_eq!(parse_ipv6("1::é"), Err(ParseError::NonAsciiCharacter(3)));

        assert_eq!(parse_ipv4("1.2.3.256"), Err(ParseError::Ipv4ComponentOverflow(256)));
        assert_eq!(parse_ipv4("1.2.3.1000"), Err(ParseError::InvalidComponent(6)));
        assert_eq!(parse_ipv4("1.2.3.a"), Err(ParseError::InvalidComponent(6)));
        assert_eq!(parse_ipv4("1.2.3"), Err(ParseError::Ipv4InvalidComponentSize(3)));
        assert_eq!(parse_ipv4("1.2.3.4.5"), Err(ParseError::Ipv4InvalidComponentSize(5)));
        assert_eq!(parse_ipv4("1..3.4"), Err(ParseError::InvalidIpv4));
        assert_eq!(parse_ipv4("1:2::"), Err(ParseError::InvalidIpv4));
    }

    #[test]
    fn should_parse_prefix() {
        assert_eq!(parse_prefix("0", 128), Some(Ok(0)));
        assert_eq!(parse_prefix("128", 128), Some(Ok(128)));
        assert_eq!(parse_prefix("129", 128), Some(Err(ParseError::PrefixOverflow { prefix: 129, max: 128 })));
        assert_eq!(parse_prefix("33", 32), Some(Err(ParseError::PrefixOverflow { prefix: 33, max: 32 })));
        assert_eq!(parse_prefix("ff00::", 128), None);
        assert_eq!(parse_prefix("", 128), None);
    }
}
