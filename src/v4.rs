//!IPv4 module

use core::{fmt, net};

use crate::{base, parser, IpVersion, ParseError};

pub(crate) const BITS_LEN: u8 = net::Ipv4Addr::BITS as u8;
pub(crate) const VERSION: IpVersion = IpVersion::V4;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IPv4 address, stored as 4 bytes in network order
pub struct Ipv4Address([u8; 4]);

///IPv4 address with mask
pub type Ipv4AddressWithMask = base::AddressWithMask<Ipv4Address>;

crate::base::impl_address_methods!(Ipv4Address where REPR=u32, NET=net::Ipv4Addr);

impl Ipv4Address {
    #[inline(always)]
    ///Creates address from its components
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self([a, b, c, d])
    }

    #[inline]
    ///Parses dotted-quad form, i.e. 4 decimal components within `0..=255`
    pub const fn parse(text: &str) -> Result<Self, ParseError> {
        match parser::parse_ipv4(text) {
            Ok(octets) => Ok(Self(octets)),
            Err(error) => Err(error),
        }
    }
}

impl fmt::Display for Ipv4Address {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        fmt.write_fmt(format_args!("{a}.{b}.{c}.{d}"))
    }
}
