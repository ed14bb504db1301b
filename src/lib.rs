//! IP address values with arbitrary and CIDR masks

#![no_std]
#![warn(missing_docs)]
#![allow(clippy::style)]

mod parser;
pub use parser::ParseError;
pub mod error;
pub mod base;
pub mod v4;
pub mod v6;
#[cfg(feature = "serde")]
mod serde_impl;

use core::{fmt, net, str};

pub use v4::{Ipv4Address, Ipv4AddressWithMask};
pub use v6::{Ipv6Address, Ipv6AddressWithMask};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IP protocol version
pub enum IpVersion {
    ///IPv4
    V4,
    ///IPv6
    V6,
}

impl IpVersion {
    #[inline]
    ///Detects address family from `text` grammar
    ///
    ///Any `:` means IPv6, otherwise `.` means IPv4.
    ///Only the part before `/` is inspected.
    pub fn detect(text: &str) -> Result<Self, ParseError> {
        let addr = match text.split_once('/') {
            Some((addr, _)) => addr,
            None => text,
        };

        if addr.is_empty() {
            Err(ParseError::MissingIp)
        } else if addr.contains(':') {
            Ok(Self::V6)
        } else if addr.contains('.') {
            Ok(Self::V4)
        } else {
            Err(ParseError::UnknownFamily)
        }
    }
}

impl fmt::Display for IpVersion {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => fmt.write_str("IPv4"),
            Self::V6 => fmt.write_str("IPv6"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IP address of either family
pub enum IpAddress {
    ///IPv4 address
    V4(Ipv4Address),
    ///IPv6 address
    V6(Ipv6Address),
}

impl IpAddress {
    ///Parses address, picking family from `text` grammar
    ///
    ///Result is the same as parsing `text` with family's own `parse`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let result = match IpVersion::detect(text) {
            Ok(IpVersion::V4) => Ipv4Address::parse(text).map(Self::V4),
            Ok(IpVersion::V6) => Ipv6Address::parse(text).map(Self::V6),
            Err(error) => Err(error),
        };

        if let Err(error) = &result {
            log::trace!("'{text}' is not valid IP: {error}");
        }
        result
    }

    #[inline(always)]
    ///Returns address family
    pub const fn version(&self) -> IpVersion {
        match self {
            Self::V4(_) => IpVersion::V4,
            Self::V6(_) => IpVersion::V6,
        }
    }

    #[inline(always)]
    ///Returns number of leading one-bits if address is contiguous mask
    pub const fn as_cidr_mask_length(&self) -> Option<u8> {
        match self {
            Self::V4(addr) => addr.as_cidr_mask_length(),
            Self::V6(addr) => addr.as_cidr_mask_length(),
        }
    }

    #[inline(always)]
    ///Returns whether every bit is cleared
    pub const fn is_unspecified(&self) -> bool {
        match self {
            Self::V4(addr) => addr.is_unspecified(),
            Self::V6(addr) => addr.is_unspecified(),
        }
    }

    #[inline(always)]
    ///Writes address octets into `buf`
    pub fn write_to<B: bytes::BufMut>(&self, buf: &mut B) {
        match self {
            Self::V4(addr) => addr.write_to(buf),
            Self::V6(addr) => addr.write_to(buf),
        }
    }
}

impl fmt::Display for IpAddress {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(addr) => fmt::Display::fmt(addr, fmt),
            Self::V6(addr) => fmt::Display::fmt(addr, fmt),
        }
    }
}

impl str::FromStr for IpAddress {
    type Err = ParseError;

    #[inline(always)]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IP address with mask of either family
pub enum IpAddressWithMask {
    ///IPv4 block
    V4(Ipv4AddressWithMask),
    ///IPv6 block
    V6(Ipv6AddressWithMask),
}

impl IpAddressWithMask {
    ///Parses `addr`, `addr/prefix` or `addr/mask`, picking family from address grammar
    ///
    ///Result is the same as parsing `text` with family's own `parse`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let result = match IpVersion::detect(text) {
            Ok(IpVersion::V4) => Ipv4AddressWithMask::parse(text).map(Self::V4),
            Ok(IpVersion::V6) => Ipv6AddressWithMask::parse(text).map(Self::V6),
            Err(error) => Err(error),
        };

        if let Err(error) = &result {
            log::trace!("'{text}' is not valid masked IP: {error}");
        }
        result
    }

    #[inline(always)]
    ///Returns address family
    pub const fn version(&self) -> IpVersion {
        match self {
            Self::V4(_) => IpVersion::V4,
            Self::V6(_) => IpVersion::V6,
        }
    }

    #[inline(always)]
    ///Returns address with host bits cleared
    pub const fn value(&self) -> IpAddress {
        match self {
            Self::V4(block) => IpAddress::V4(block.value()),
            Self::V6(block) => IpAddress::V6(block.value()),
        }
    }

    #[inline(always)]
    ///Returns mask
    pub const fn mask(&self) -> IpAddress {
        match self {
            Self::V4(block) => IpAddress::V4(block.mask()),
            Self::V6(block) => IpAddress::V6(block.mask()),
        }
    }

    #[inline(always)]
    ///Returns prefix length if mask is contiguous
    pub const fn prefix_len(&self) -> Option<u8> {
        match self {
            Self::V4(block) => block.mask().as_cidr_mask_length(),
            Self::V6(block) => block.mask().as_cidr_mask_length(),
        }
    }

    #[inline(always)]
    ///Checks if a given `addr` matches `self` under the mask
    ///
    ///Address of another family never matches
    pub fn contains(&self, addr: IpAddress) -> bool {
        match (self, addr) {
            (Self::V4(block), IpAddress::V4(addr)) => block.contains(addr),
            (Self::V6(block), IpAddress::V6(addr)) => block.contains(addr),
            _ => false,
        }
    }
}

impl fmt::Display for IpAddressWithMask {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(block) => fmt::Display::fmt(block, fmt),
            Self::V6(block) => fmt::Display::fmt(block, fmt),
        }
    }
}

impl str::FromStr for IpAddressWithMask {
    type Err = ParseError;

    #[inline(always)]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

macro_rules! impl_family_conversions {
    ($poly:ident::$variant:ident($typ:ty)) => {
        impl From<$typ> for $poly {
            #[inline(always)]
            fn from(value: $typ) -> Self {
                Self::$variant(value)
            }
        }

        impl PartialEq<$typ> for $poly {
            #[inline(always)]
            fn eq(&self, other: &$typ) -> bool {
                match self {
                    Self::$variant(value) => value == other,
                    _ => false,
                }
            }
        }

        impl PartialEq<$poly> for $typ {
            #[inline(always)]
            fn eq(&self, other: &$poly) -> bool {
                other == self
            }
        }
    }
}

impl_family_conversions!(IpAddress::V4(Ipv4Address));
impl_family_conversions!(IpAddress::V6(Ipv6Address));
impl_family_conversions!(IpAddressWithMask::V4(Ipv4AddressWithMask));
impl_family_conversions!(IpAddressWithMask::V6(Ipv6AddressWithMask));

impl From<net::IpAddr> for IpAddress {
    #[inline(always)]
    fn from(addr: net::IpAddr) -> Self {
        match addr {
            net::IpAddr::V4(addr) => Self::V4(addr.into()),
            net::IpAddr::V6(addr) => Self::V6(addr.into()),
        }
    }
}

impl From<IpAddress> for net::IpAddr {
    #[inline(always)]
    fn from(addr: IpAddress) -> Self {
        match addr {
            IpAddress::V4(addr) => net::IpAddr::V4(addr.into()),
            IpAddress::V6(addr) => net::IpAddr::V6(addr.into()),
        }
    }
}
