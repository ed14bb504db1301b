//! Serde support through textual representation

use core::{fmt, marker, str};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{IpAddress, IpAddressWithMask, Ipv4Address, Ipv4AddressWithMask, Ipv6Address, Ipv6AddressWithMask};

struct FromStrVisitor<T> {
    expecting: &'static str,
    _type: marker::PhantomData<T>,
}

impl<T> de::Visitor<'_> for FromStrVisitor<T> where T: str::FromStr, T::Err: fmt::Display {
    type Value = T;

    #[inline(always)]
    fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.expecting)
    }

    #[inline]
    fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
        text.parse().map_err(E::custom)
    }
}

macro_rules! impl_serde {
    ($typ:ty => $expecting:literal) => {
        impl Serialize for $typ {
            #[inline(always)]
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $typ {
            #[inline]
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_str(FromStrVisitor {
                    expecting: $expecting,
                    _type: marker::PhantomData,
                })
            }
        }
    }
}

impl_serde!(Ipv4Address => "IPv4 address");
impl_serde!(Ipv6Address => "IPv6 address");
impl_serde!(Ipv4AddressWithMask => "IPv4 address with optional mask");
impl_serde!(Ipv6AddressWithMask => "IPv6 address with optional mask");
impl_serde!(IpAddress => "IP address");
impl_serde!(IpAddressWithMask => "IP address with optional mask");
