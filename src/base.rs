//! Base module

use core::{fmt, hash, ops, str};

use crate::error::PrefixLenError;
use crate::parser::{self, ParseError};
use crate::IpVersion;

///Network address trait
pub trait NetworkAddress: Clone + Copy + fmt::Debug + fmt::Display + PartialEq + Eq + PartialOrd + Ord + hash::Hash
    + ops::BitAnd<Output = Self> + ops::BitOr<Output = Self> + ops::Not<Output = Self>
{
    ///Max possible length of the address in bits
    const BITS_LEN: u8;
    ///Address family
    const VERSION: IpVersion;
    ///Mask with every bit set
    const FULL_MASK: Self;

    ///Parses address from its textual form
    fn parse(text: &str) -> Result<Self, ParseError>;

    ///Builds contiguous mask of `prefix` leading one-bits
    fn of_cidr_mask_length(prefix: u8) -> Result<Self, PrefixLenError>;

    ///Returns number of leading one-bits if `self` is contiguous mask
    fn as_cidr_mask_length(&self) -> Option<u8>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///Address together with the mask applied to it
///
///The address is always stored masked, i.e. host bits are cleared on construction.
pub struct AddressWithMask<A> {
    value: A,
    mask: A,
}

impl<A: NetworkAddress> AddressWithMask<A> {
    #[inline]
    ///Constructs new instance, clearing bits of `addr` that are not set in `mask`
    ///
    ///`mask` is not required to be contiguous
    pub fn new(addr: A, mask: A) -> Self {
        Self {
            value: addr & mask,
            mask,
        }
    }

    #[inline]
    ///Constructs new instance with contiguous mask of `prefix` bits
    ///
    ///Returns `Err` if `prefix` is greater than address length
    pub fn with_prefix(addr: A, prefix: u8) -> Result<Self, PrefixLenError> {
        let mask = A::of_cidr_mask_length(prefix)?;
        Ok(Self::new(addr, mask))
    }

    #[inline(always)]
    ///Constructs new instance covering single `addr`
    pub fn new_single(addr: A) -> Self {
        Self::new(addr, A::FULL_MASK)
    }

    ///Parses `addr`, `addr/prefix` or `addr/mask`
    ///
    ///If mask is missing, it is assumed to cover single address.
    ///If mask consists only of decimal digits, it is treated as prefix length,
    ///otherwise it must be an address of the same family.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let (addr, mask) = match text.split_once('/') {
            Some((addr, mask)) => (addr, Some(mask)),
            None => (text, None),
        };

        let addr = A::parse(addr)?;
        let mask = match mask {
            None => A::FULL_MASK,
            Some("") => return Err(ParseError::MissingMask),
            Some(mask) => match parser::parse_prefix(mask, A::BITS_LEN) {
                Some(Ok(prefix)) => A::of_cidr_mask_length(prefix)?,
                Some(Err(error)) => return Err(error),
                None => A::parse(mask)?,
            },
        };

        Ok(Self::new(addr, mask))
    }

    #[inline(always)]
    ///Returns address with host bits cleared
    pub const fn value(&self) -> A {
        self.value
    }

    #[inline(always)]
    ///Returns mask
    pub const fn mask(&self) -> A {
        self.mask
    }

    #[inline(always)]
    ///Returns address family
    pub const fn version(&self) -> IpVersion {
        A::VERSION
    }

    #[inline(always)]
    ///Returns prefix length if mask is contiguous
    pub fn prefix_len(&self) -> Option<u8> {
        self.mask.as_cidr_mask_length()
    }

    #[inline(always)]
    ///Checks if a given `addr` matches `self` under the mask
    pub fn contains(&self, addr: A) -> bool {
        (addr & self.mask) == self.value
    }

    #[inline(always)]
    ///Returns address with every host bit set, which is highest possible address when mask is contiguous
    pub fn broadcast_addr(&self) -> A {
        self.value | !self.mask
    }
}

impl<A: NetworkAddress> fmt::Display for AddressWithMask<A> {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { value, mask } = self;
        match mask.as_cidr_mask_length() {
            Some(prefix) => fmt.write_fmt(format_args!("{value}/{prefix}")),
            None => fmt.write_fmt(format_args!("{value}/{mask}")),
        }
    }
}

impl<A: NetworkAddress> str::FromStr for AddressWithMask<A> {
    type Err = ParseError;

    #[inline(always)]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

macro_rules! impl_address_methods {
    ($typ:ident where REPR=$repr:ident, NET=$net:ty) => {
        ///Address width in bytes
        pub const LEN: usize = BITS_LEN as usize / 8;

        #[inline]
        ///Computes network mask for provided `prefix`, assuming `prefix` is valid prefix
        pub const fn mask(prefix: u8) -> $typ {
            match prefix {
                0 => $typ::NO_MASK,
                prefix => {
                    let mask = $repr::MAX << (BITS_LEN.saturating_sub(prefix));
                    $typ::from_bits(mask)
                }
            }
        }

        impl $typ {
            ///Address with every bit cleared
            pub const UNSPECIFIED: Self = Self([0; LEN]);
            ///Mask that matches nothing, i.e. `/0`
            pub const NO_MASK: Self = Self([0; LEN]);
            ///Mask that matches single address
            pub const FULL_MASK: Self = Self([u8::MAX; LEN]);

            #[inline(always)]
            ///Creates address from network order bytes
            pub const fn from_octets(octets: [u8; LEN]) -> Self {
                Self(octets)
            }

            #[inline]
            ///Creates address from slice of network order bytes
            ///
            ///Returns `Err` unless `bytes` has exactly address width length
            pub const fn from_slice(bytes: &[u8]) -> Result<Self, $crate::error::LengthError> {
                if bytes.len() != LEN {
                    return Err($crate::error::LengthError {
                        expected: LEN,
                        actual: bytes.len(),
                    });
                }

                let mut octets = [0u8; LEN];
                let mut idx = 0;
                while idx < LEN {
                    octets[idx] = bytes[idx];
                    idx = idx + 1;
                }
                Ok(Self(octets))
            }

            #[inline]
            ///Reads address from `buf`, advancing it by address width
            ///
            ///Returns `Err` without consuming anything if `buf` is too short
            pub fn read_from<B: bytes::Buf>(buf: &mut B) -> Result<Self, $crate::error::ReadError> {
                let remaining = buf.remaining();
                if remaining < LEN {
                    log::trace!("{}: cannot read address, remaining={remaining}", stringify!($typ));
                    return Err($crate::error::ReadError {
                        needed: LEN,
                        remaining,
                    });
                }

                let mut octets = [0u8; LEN];
                buf.copy_to_slice(&mut octets);
                Ok(Self(octets))
            }

            #[inline]
            ///Writes address octets into `buf`
            ///
            ///# Panics
            ///
            ///Panics if `buf` has no space for address, same as `BufMut::put_slice`
            pub fn write_to<B: bytes::BufMut>(&self, buf: &mut B) {
                buf.put_slice(&self.0);
            }

            #[inline(always)]
            ///Returns copy of network order bytes
            pub const fn octets(&self) -> [u8; LEN] {
                self.0
            }

            #[inline(always)]
            ///Creates address from its integer representation
            pub const fn from_bits(bits: $repr) -> Self {
                Self(bits.to_be_bytes())
            }

            #[inline(always)]
            ///Returns integer representation of address
            pub const fn to_bits(&self) -> $repr {
                $repr::from_be_bytes(self.0)
            }

            #[inline]
            ///Builds contiguous mask of `prefix` leading one-bits
            ///
            ///Returns `Err` if `prefix` is greater than address length
            pub const fn of_cidr_mask_length(prefix: u8) -> Result<Self, $crate::error::PrefixLenError> {
                if prefix > BITS_LEN {
                    Err($crate::error::PrefixLenError {
                        prefix,
                        max: BITS_LEN,
                    })
                } else {
                    Ok(mask(prefix))
                }
            }

            #[inline]
            ///Returns number of leading one-bits if `self` is contiguous mask
            ///
            ///Returns `None` if any one-bit follows the first zero-bit
            pub const fn as_cidr_mask_length(&self) -> Option<u8> {
                let bits = self.to_bits();
                let prefix = bits.leading_ones() as u8;
                if mask(prefix).to_bits() == bits {
                    Some(prefix)
                } else {
                    None
                }
            }

            #[inline(always)]
            ///Returns whether `self` is contiguous mask
            pub const fn is_cidr_mask(&self) -> bool {
                self.as_cidr_mask_length().is_some()
            }

            #[inline(always)]
            ///Returns whether every bit is cleared
            pub const fn is_unspecified(&self) -> bool {
                self.to_bits() == 0
            }

            #[inline(always)]
            ///Returns whether every bit is set
            pub const fn is_broadcast(&self) -> bool {
                self.to_bits() == $repr::MAX
            }
        }

        impl $crate::base::NetworkAddress for $typ {
            const BITS_LEN: u8 = BITS_LEN;
            const VERSION: $crate::IpVersion = VERSION;
            const FULL_MASK: Self = $typ::FULL_MASK;

            #[inline(always)]
            fn parse(text: &str) -> Result<Self, $crate::ParseError> {
                $typ::parse(text)
            }

            #[inline(always)]
            fn of_cidr_mask_length(prefix: u8) -> Result<Self, $crate::error::PrefixLenError> {
                $typ::of_cidr_mask_length(prefix)
            }

            #[inline(always)]
            fn as_cidr_mask_length(&self) -> Option<u8> {
                $typ::as_cidr_mask_length(self)
            }
        }

        impl core::ops::BitAnd for $typ {
            type Output = Self;

            #[inline(always)]
            fn bitand(self, other: Self) -> Self {
                Self::from_bits(self.to_bits() & other.to_bits())
            }
        }

        impl core::ops::BitOr for $typ {
            type Output = Self;

            #[inline(always)]
            fn bitor(self, other: Self) -> Self {
                Self::from_bits(self.to_bits() | other.to_bits())
            }
        }

        impl core::ops::Not for $typ {
            type Output = Self;

            #[inline(always)]
            fn not(self) -> Self {
                Self::from_bits(!self.to_bits())
            }
        }

        impl core::fmt::Debug for $typ {
            #[inline(always)]
            fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                fmt.write_fmt(format_args!("{}({self})", stringify!($typ)))
            }
        }

        impl core::str::FromStr for $typ {
            type Err = $crate::ParseError;

            #[inline(always)]
            fn from_str(text: &str) -> Result<Self, Self::Err> {
                Self::parse(text)
            }
        }

        impl From<[u8; LEN]> for $typ {
            #[inline(always)]
            fn from(octets: [u8; LEN]) -> Self {
                Self(octets)
            }
        }

        impl From<$typ> for [u8; LEN] {
            #[inline(always)]
            fn from(addr: $typ) -> Self {
                addr.0
            }
        }

        impl TryFrom<&[u8]> for $typ {
            type Error = $crate::error::LengthError;

            #[inline(always)]
            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                Self::from_slice(bytes)
            }
        }

        impl From<$net> for $typ {
            #[inline(always)]
            fn from(addr: $net) -> Self {
                Self(addr.octets())
            }
        }

        impl From<$typ> for $net {
            #[inline(always)]
            fn from(addr: $typ) -> Self {
                <$net>::from(addr.0)
            }
        }
    }
}

pub(super) use impl_address_methods;
