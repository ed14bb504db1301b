//!IPv6 module

use core::{fmt, net};

use crate::{base, parser, IpVersion, ParseError};

pub(crate) const BITS_LEN: u8 = net::Ipv6Addr::BITS as u8;
pub(crate) const VERSION: IpVersion = IpVersion::V6;
const GROUPS_LEN: usize = 8;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IPv6 address, stored as 16 bytes in network order
pub struct Ipv6Address([u8; 16]);

///IPv6 address with mask
pub type Ipv6AddressWithMask = base::AddressWithMask<Ipv6Address>;

crate::base::impl_address_methods!(Ipv6Address where REPR=u128, NET=net::Ipv6Addr);

impl Ipv6Address {
    #[inline]
    ///Parses RFC 4291 textual form, i.e. 8 groups of up to 4 hex digits with optional single `::`
    pub const fn parse(text: &str) -> Result<Self, ParseError> {
        match parser::parse_ipv6(text) {
            Ok(groups) => Ok(Self::from_groups(groups)),
            Err(error) => Err(error),
        }
    }

    #[inline]
    ///Creates address from its 16-bit groups
    pub const fn from_groups(groups: [u16; GROUPS_LEN]) -> Self {
        let mut octets = [0u8; LEN];
        let mut idx = 0;
        while idx < GROUPS_LEN {
            let [hi, lo] = groups[idx].to_be_bytes();
            octets[idx * 2] = hi;
            octets[idx * 2 + 1] = lo;
            idx = idx + 1;
        }
        Self(octets)
    }

    #[inline]
    ///Returns 16-bit groups of address
    pub const fn groups(&self) -> [u16; GROUPS_LEN] {
        let mut groups = [0u16; GROUPS_LEN];
        let mut idx = 0;
        while idx < GROUPS_LEN {
            groups[idx] = u16::from_be_bytes([self.0[idx * 2], self.0[idx * 2 + 1]]);
            idx = idx + 1;
        }
        groups
    }

    #[inline(always)]
    ///Creates textual representation with custom options
    ///
    ///- `zero_compression` replaces longest run of zero groups with `::`
    ///- `canonical_padding` pads every group to 4 digits and disables `zero_compression`
    pub const fn display(&self, zero_compression: bool, canonical_padding: bool) -> Ipv6Display {
        Ipv6Display {
            groups: self.groups(),
            zero_compression,
            canonical_padding,
        }
    }
}

impl fmt::Display for Ipv6Address {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(true, false), fmt)
    }
}

//Returns `(start, len)` of longest run of zero groups, leftmost one winning among equal runs
const fn longest_zero_run(groups: &[u16; GROUPS_LEN]) -> (usize, usize) {
    let mut best = (0, 0);
    let mut run_start = 0;
    let mut run_len = 0;
    let mut idx = 0;

    while idx < GROUPS_LEN {
        if groups[idx] == 0 {
            if run_len == 0 {
                run_start = idx;
            }
            run_len += 1;
            if run_len > best.1 {
                best = (run_start, run_len);
            }
        } else {
            run_len = 0;
        }
        idx = idx + 1;
    }

    best
}

fn write_groups(fmt: &mut fmt::Formatter<'_>, groups: &[u16]) -> fmt::Result {
    for (idx, group) in groups.iter().enumerate() {
        if idx > 0 {
            fmt.write_str(":")?;
        }
        fmt.write_fmt(format_args!("{group:x}"))?;
    }
    Ok(())
}

#[derive(Copy, Clone, Debug)]
///Textual representation of [Ipv6Address](struct.Ipv6Address.html) with custom options
pub struct Ipv6Display {
    groups: [u16; GROUPS_LEN],
    zero_compression: bool,
    canonical_padding: bool,
}

impl fmt::Display for Ipv6Display {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = &self.groups;

        if self.canonical_padding {
            for (idx, group) in groups.iter().enumerate() {
                if idx > 0 {
                    fmt.write_str(":")?;
                }
                fmt.write_fmt(format_args!("{group:04x}"))?;
            }
            return Ok(());
        }

        let (start, len) = match self.zero_compression {
            true => longest_zero_run(groups),
            false => (0, 0),
        };

        //Single zero group is never abbreviated
        if len < 2 {
            return write_groups(fmt, groups);
        }

        write_groups(fmt, &groups[..start])?;
        fmt.write_str("::")?;
        write_groups(fmt, &groups[start + len..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_find_longest_zero_run() {
        assert_eq!(longest_zero_run(&[0; 8]), (0, 8));
        assert_eq!(longest_zero_run(&[1, 2, 3, 4, 5, 6, 7, 8]), (0, 0));
        assert_eq!(longest_zero_run(&[1, 0, 0, 4, 5, 6, 0, 8]), (1, 2));
        assert_eq!(longest_zero_run(&[1, 0, 0, 4, 0, 0, 0, 8]), (4, 3));
        assert_eq!(longest_zero_run(&[1, 0, 0, 4, 0, 0, 7, 8]), (1, 2));
        assert_eq!(longest_zero_run(&[1, 2, 3, 4, 5, 6, 0, 0]), (6, 2));
    }

    #[test]
    fn should_convert_groups() {
        let groups = [0x2001, 0xdb8, 0, 0, 0, 0xff00, 0x42, 0x8329];
        let addr = Ipv6Address::from_groups(groups);
        assert_eq!(addr.groups(), groups);
        assert_eq!(addr.octets()[..4], [0x20, 0x01, 0x0d, 0xb8]);
    }
}
