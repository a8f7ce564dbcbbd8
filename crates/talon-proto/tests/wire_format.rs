//! End-to-end wire format scenarios against the public API, built from raw
//! byte fixtures rather than the crate's own encoder wherever the point is
//! to check decoding against the RFC 1035 layout itself.

use std::net::Ipv4Addr;
use std::str::FromStr;

use talon_proto::error::Error;
use talon_proto::name::Name;
use talon_proto::question::Question;
use talon_proto::rdata::RData;
use talon_proto::record::ResourceRecord;
use talon_proto::rtype::{RecordType, Type};
use talon_proto::{Class, Header, Message, Opcode, Rcode, RecordClass};

/// A captured-style query for `example.com. IN A`: ID 1, RD set.
fn query_fixture() -> Vec<u8> {
    let mut wire = vec![
        0x00, 0x01, // ID = 1
        0x01, 0x00, // RD
        0x00, 0x01, // QDCOUNT = 1
        0x00, 0x00, // ANCOUNT = 0
        0x00, 0x00, // NSCOUNT = 0
        0x00, 0x00, // ARCOUNT = 0
    ];
    wire.extend_from_slice(&[
        7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, // example.com.
        0x00, 0x01, // QTYPE = A
        0x00, 0x01, // QCLASS = IN
    ]);
    wire
}

#[test]
fn decodes_rfc1035_query() {
    let wire = query_fixture();
    let msg = Message::parse(&wire).unwrap();

    let header = msg.header();
    assert_eq!(header.id, 1);
    assert!(header.is_query());
    assert_eq!(header.opcode, Opcode::Query);
    assert!(header.recursion_desired());
    assert!(!header.recursion_available());
    assert_eq!(header.rcode, Rcode::NoError);
    assert_eq!(header.qd_count, 1);
    assert_eq!(header.an_count, 0);
    assert_eq!(header.ns_count, 0);
    assert_eq!(header.ar_count, 0);

    let question = msg.question().unwrap();
    let labels: Vec<_> = question
        .qname
        .labels()
        .map(|l| l.as_str().unwrap().to_owned())
        .collect();
    assert_eq!(labels, ["example", "com"]);
    assert_eq!(question.qtype, Type::Known(RecordType::A));
    assert_eq!(question.qclass, Class::Known(RecordClass::IN));
}

#[test]
fn reencodes_query_byte_identically() {
    let wire = query_fixture();
    let msg = Message::parse(&wire).unwrap();
    assert_eq!(&msg.to_wire()[..], &wire[..]);
}

#[test]
fn decodes_response_with_compressed_answer() {
    // Response to the query fixture: one A answer whose owner name is a
    // pointer to the question name at offset 12.
    let mut wire = query_fixture();
    wire[2] = 0x81; // QR | RD
    wire[3] = 0x80; // RA
    wire[7] = 0x01; // ANCOUNT = 1
    wire.extend_from_slice(&[
        0xC0, 0x0C, // owner = pointer to offset 12
        0x00, 0x01, // TYPE = A
        0x00, 0x01, // CLASS = IN
        0x00, 0x00, 0x0E, 0x10, // TTL = 3600
        0x00, 0x04, // RDLENGTH = 4
        0x7F, 0x00, 0x00, 0x01, // 127.0.0.1
    ]);

    let msg = Message::parse(&wire).unwrap();
    assert!(msg.is_response());

    let answer = &msg.answers()[0];
    assert_eq!(answer.name().to_string(), "example.com.");
    assert_eq!(answer.ttl(), 3600);
    assert_eq!(answer.rdata().as_a(), Some(Ipv4Addr::new(127, 0, 0, 1)));

    // The answer's owner matches the question it answers.
    assert_eq!(answer.name(), &msg.question().unwrap().qname);
}

#[test]
fn rejects_a_record_with_short_rdlength() {
    let mut wire = query_fixture();
    wire[7] = 0x01; // ANCOUNT = 1
    wire.extend_from_slice(&[
        0xC0, 0x0C, // owner
        0x00, 0x01, // TYPE = A
        0x00, 0x01, // CLASS = IN
        0x00, 0x00, 0x0E, 0x10, // TTL
        0x00, 0x03, // RDLENGTH = 3: inconsistent with TYPE=A
        0x7F, 0x00, 0x00,
    ]);

    assert!(matches!(
        Message::parse(&wire),
        Err(Error::MalformedRData { rtype: "A", .. })
    ));
}

#[test]
fn rejects_pointer_loops_quickly() {
    // QNAME is a pointer chain that cycles between two offsets.
    let mut wire = vec![
        0x00, 0x01, 0x00, 0x00, // ID, no flags
        0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // QDCOUNT = 1
    ];
    // Offset 12 points at itself.
    wire.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);

    assert!(matches!(
        Message::parse(&wire),
        Err(Error::CompressionLoopDetected { .. })
    ));
}

#[test]
fn rejects_label_length_64() {
    let mut wire = vec![
        0x00, 0x01, 0x00, 0x00, //
        0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    wire.push(64); // invalid: 0b0100_0000
    wire.extend_from_slice(&[b'a'; 64]);
    wire.extend_from_slice(&[0, 0x00, 0x01, 0x00, 0x01]);

    assert!(matches!(
        Message::parse(&wire),
        Err(Error::InvalidLabelLength { value: 64, .. })
    ));
}

#[test]
fn declared_count_exceeding_buffer_is_truncation() {
    let mut wire = query_fixture();
    wire[5] = 3; // QDCOUNT = 3, but only one question present

    assert!(matches!(
        Message::parse(&wire),
        Err(Error::TruncatedMessage { .. })
    ));
}

#[test]
fn unknown_type_records_roundtrip_opaquely() {
    let owner = Name::from_str("blob.example").unwrap();
    let record = ResourceRecord::new(
        owner,
        Type::Unknown(62347),
        Class::Known(RecordClass::IN),
        30,
        RData::Unknown(talon_proto::rdata::Unknown::new(
            62347,
            vec![0x00, 0xFF, 0x10, 0x20],
        )),
    );

    let mut msg = Message::new(Header::new(5));
    msg.add_additional(record);

    let wire = msg.to_wire();
    let decoded = Message::parse(&wire).unwrap();

    assert_eq!(decoded, msg);
    assert_eq!(decoded.to_wire(), wire);
}

#[test]
fn full_referral_response_roundtrips() {
    let zone = Name::from_str("example.com").unwrap();
    let ns = Name::from_str("ns1.example.com").unwrap();

    let query = Message::query(Question::a(Name::from_str("www.example.com").unwrap()));
    let mut response = Message::response_from(&query);
    response.add_authority(ResourceRecord::ns(zone.clone(), 86400, ns.clone()));
    response.add_additional(ResourceRecord::a(ns, 86400, Ipv4Addr::new(192, 0, 2, 53)));
    response.add_authority(ResourceRecord::soa(
        zone.clone(),
        3600,
        talon_proto::rdata::SOA::new(
            Name::from_str("ns1.example.com").unwrap(),
            Name::from_str("hostmaster.example.com").unwrap(),
            2024010101,
            7200,
            3600,
            1209600,
            3600,
        ),
    ));

    for wire in [response.to_wire(), response.to_wire_compressed()] {
        let decoded = Message::parse(&wire).unwrap();
        assert_eq!(decoded.questions(), response.questions());
        assert_eq!(decoded.authority(), response.authority());
        assert_eq!(decoded.additional(), response.additional());
    }
}

#[test]
fn strict_mode_distinguishes_padding() {
    let mut wire = query_fixture();
    wire.extend_from_slice(&[0x00; 4]);

    assert!(Message::parse(&wire).is_ok());
    assert!(matches!(
        Message::parse_strict(&wire),
        Err(Error::TrailingGarbage { remaining: 4, .. })
    ));

    // Without the padding, strict mode accepts the same bytes.
    let exact = query_fixture();
    assert!(Message::parse_strict(&exact).is_ok());
}
