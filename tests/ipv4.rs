use core::net;

use ip_mask::error::{LengthError, ReadError};
use ip_mask::{Ipv4Address, Ipv4AddressWithMask, ParseError};

#[test]
fn should_parse_ipv4() {
    let inputs = [
        ("127.0.0.1", Ipv4Address::new(127, 0, 0, 1)),
        ("0.0.0.0", Ipv4Address::new(0, 0, 0, 0)),
        ("255.255.255.255", Ipv4Address::new(255, 255, 255, 255)),
        ("010.001.0.09", Ipv4Address::new(10, 1, 0, 9)),
    ];

    for (text, expected_ip) in inputs {
        println!("Parse '{text}'");
        let ip = match Ipv4Address::parse(text) {
            Ok(result) => result,
            Err(error) => panic!("Should parse '{text}' but got error={error}"),
        };
        assert_eq!(ip, expected_ip);
        assert_eq!(ip.to_string().parse::<Ipv4Address>(), Ok(ip));
        assert_eq!(net::Ipv4Addr::from(ip), net::Ipv4Addr::from(expected_ip.octets()));
    }
}

#[test]
fn should_reject_invalid_ipv4() {
    let inputs = [
        ("", ParseError::MissingIp),
        (".", ParseError::InvalidIpv4),
        ("1.2.3", ParseError::Ipv4InvalidComponentSize(3)),
        ("1.2.3.4.5", ParseError::Ipv4InvalidComponentSize(5)),
        ("1.2.3.", ParseError::InvalidIpv4),
        (".1.2.3", ParseError::InvalidIpv4),
        ("1.2..3", ParseError::InvalidIpv4),
        ("1.2.3.256", ParseError::Ipv4ComponentOverflow(256)),
        ("1.2.3.1234", ParseError::InvalidComponent(6)),
        ("1.2.3.f", ParseError::InvalidComponent(6)),
        ("1.2.3.4g", ParseError::UnexpectedCharacter('g', 7)),
        ("1.2.3.4/8", ParseError::UnexpectedCharacter('/', 7)),
        ("1:2::", ParseError::InvalidIpv4),
    ];

    for (text, expected) in inputs {
        assert_eq!(Ipv4Address::parse(text), Err(expected), "Input '{text}'");
    }
}

#[test]
fn should_create_ipv4_from_bytes() {
    let ip = Ipv4Address::from_slice(&[192, 168, 1, 1]).expect("to create");
    assert_eq!(ip.to_string(), "192.168.1.1");
    assert_eq!(ip.to_bits(), 0xc0a80101);

    assert_eq!(Ipv4Address::from_slice(&[1, 2, 3]), Err(LengthError { expected: 4, actual: 3 }));
    assert_eq!(Ipv4Address::from_slice(&[1, 2, 3, 4, 5]), Err(LengthError { expected: 4, actual: 5 }));

    let mut buf = &[10u8, 0, 0, 1, 10, 0][..];
    assert_eq!(Ipv4Address::read_from(&mut buf), Ok(Ipv4Address::new(10, 0, 0, 1)));
    assert_eq!(Ipv4Address::read_from(&mut buf), Err(ReadError { needed: 4, remaining: 2 }));
    assert_eq!(buf, &[10, 0]);

    let mut out = Vec::<u8>::new();
    ip.write_to(&mut out);
    assert_eq!(out, [192, 168, 1, 1]);
}

#[cfg_attr(miri, ignore)]
#[test]
fn should_verify_ipv4_prefix() {
    let addr = Ipv4Address::new(255, 255, 255, 255);

    for prefix in 0..=32u8 {
        let text = format!("{addr}/{prefix}");
        let value = match Ipv4AddressWithMask::parse(&text) {
            Ok(value) => value,
            Err(error) => panic!("Should parse '{text}' but got error={error}"),
        };
        assert_eq!(value.prefix_len(), Some(prefix), "Input {text}");
        assert_eq!(value.value(), value.mask());
        assert_eq!(value.broadcast_addr(), addr);
        assert_eq!(value.to_string(), format!("{}/{prefix}", value.value()));

        let expected_size = 1u64 << (32 - prefix);
        let first = value.value().to_bits() as u64;
        assert!(value.contains(Ipv4Address::from_bits(first as u32)));
        assert!(value.contains(Ipv4Address::from_bits((first + expected_size - 1) as u32)));
        if prefix > 0 {
            assert!(!value.contains(Ipv4Address::from_bits((first - 1) as u32)));
        }
    }

    assert_eq!(Ipv4AddressWithMask::parse("1.2.3.4/33"), Err(ParseError::PrefixOverflow { prefix: 33, max: 32 }));
}

#[test]
fn should_apply_ipv4_mask() {
    let value = Ipv4AddressWithMask::parse("192.168.17.5/255.255.240.0").expect("to parse");
    assert_eq!(value.value(), Ipv4Address::new(192, 168, 16, 0));
    assert_eq!(value.prefix_len(), Some(20));
    assert_eq!(value.to_string(), "192.168.16.0/20");

    let value = Ipv4AddressWithMask::parse("192.168.17.5/255.0.255.0").expect("to parse");
    assert_eq!(value.value(), Ipv4Address::new(192, 0, 17, 0));
    assert_eq!(value.prefix_len(), None);
    assert_eq!(value.to_string(), "192.0.17.0/255.0.255.0");

    let value = Ipv4AddressWithMask::parse("10.1.2.3").expect("to parse");
    assert_eq!(value.mask(), Ipv4Address::FULL_MASK);
    assert_eq!(value.to_string(), "10.1.2.3/32");

    assert_eq!(Ipv4AddressWithMask::parse("10.1.2.3/"), Err(ParseError::MissingMask));
    assert!(Ipv4AddressWithMask::parse("10.1.2.3/ffff::").is_err());
}
