use super::stream::{
    CodecError, VersionId, checked_u32, checked_usize, read_bool, read_f64, read_header,
    read_i64, read_string, read_u8, read_u32, read_u64, version_error, write_bool, write_header,
    write_string,
};
use crate::core::models::identifier::AtomIdentifier;
use crate::core::models::ids::AtomIdx;
use crate::matching::id_list::IdListMatcher;
use crate::matching::index::IndexMatcher;
use crate::matching::matcher::AtomMatcher;
use crate::matching::mcs::{MAX_MCS_TIMEOUT, McsMatcher};
use crate::matching::multi::MultiMatcher;
use crate::matching::name::NameMatcher;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use phf::{Map, phf_map};
use std::time::Duration;
use tracing::{instrument, trace};

/// Nesting limit for prematchers and multi-matcher children.
pub const MAX_NESTING_DEPTH: usize = 64;

const INDEX_VERSION: VersionId = 1;
const NAME_VERSION: VersionId = 1;
const ID_LIST_VERSION: VersionId = 1;
const MCS_VERSION: VersionId = 2;
const MULTI_VERSION: VersionId = 1;

const IDENTIFIER_INDEX: u8 = 0;
const IDENTIFIER_NAME: u8 = 1;
const IDENTIFIER_NUMBER: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatcherKind {
    Index,
    Name,
    IdList,
    Mcs,
    Multi,
}

static MATCHER_KINDS: Map<&'static str, MatcherKind> = phf_map! {
    "atommatch::IndexMatcher" => MatcherKind::Index,
    "atommatch::NameMatcher" => MatcherKind::Name,
    "atommatch::IdListMatcher" => MatcherKind::IdList,
    "atommatch::McsMatcher" => MatcherKind::Mcs,
    "atommatch::MultiMatcher" => MatcherKind::Multi,
};

/// Encodes a matcher in the newest format of every nested type.
///
/// # Errors
///
/// Returns [`CodecError::Overflow`] if a name, list or index is too large
/// for its encoded field.
#[instrument(skip_all, name = "encode_matcher", fields(matcher = matcher.type_name()))]
pub fn encode(matcher: &AtomMatcher) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::new();
    encode_into(&mut buf, matcher)?;
    trace!("Encoded matcher into {} bytes.", buf.len());
    Ok(buf.freeze())
}

pub fn encode_into(buf: &mut impl BufMut, matcher: &AtomMatcher) -> Result<(), CodecError> {
    match matcher {
        AtomMatcher::Index(_) => write_header(buf, IndexMatcher::TYPE_NAME, INDEX_VERSION)?,
        AtomMatcher::Name(_) => write_header(buf, NameMatcher::TYPE_NAME, NAME_VERSION)?,
        AtomMatcher::IdList(m) => {
            write_header(buf, IdListMatcher::TYPE_NAME, ID_LIST_VERSION)?;
            buf.put_u32(checked_u32("pair count", m.pairs().len())?);
            for (id0, id1) in m.pairs() {
                write_identifier(buf, id0)?;
                write_identifier(buf, id1)?;
            }
        }
        AtomMatcher::Mcs(m) => {
            write_header(buf, McsMatcher::TYPE_NAME, MCS_VERSION)?;
            write_mcs_body(buf, m)?;
            write_bool(buf, m.matching_light_atoms());
        }
        AtomMatcher::Multi(m) => {
            write_header(buf, MultiMatcher::TYPE_NAME, MULTI_VERSION)?;
            buf.put_u32(checked_u32("matcher count", m.matchers().len())?);
            for child in m.matchers() {
                encode_into(buf, child)?;
            }
        }
    }
    Ok(())
}

/// Writes an MCS matcher in the first format, which has no light-atom flag.
/// Readers of that format always treat light atoms as excluded.
pub fn encode_mcs_v1(matcher: &McsMatcher) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::new();
    write_header(&mut buf, McsMatcher::TYPE_NAME, 1)?;
    write_mcs_body(&mut buf, matcher)?;
    Ok(buf.freeze())
}

fn write_mcs_body(buf: &mut impl BufMut, matcher: &McsMatcher) -> Result<(), CodecError> {
    match matcher.prematcher() {
        Some(prematcher) => {
            write_bool(buf, true);
            encode_into(buf, prematcher)?;
        }
        None => write_bool(buf, false),
    }
    buf.put_f64(matcher.timeout().as_secs_f64());
    Ok(())
}

fn write_identifier(buf: &mut impl BufMut, identifier: &AtomIdentifier) -> Result<(), CodecError> {
    match identifier {
        AtomIdentifier::Index(idx) => {
            buf.put_u8(IDENTIFIER_INDEX);
            let value = u64::try_from(idx.value()).map_err(|_| CodecError::Overflow {
                field: "atom index",
                value: idx.value() as u128,
            })?;
            buf.put_u64(value);
        }
        AtomIdentifier::Name(name) => {
            buf.put_u8(IDENTIFIER_NAME);
            write_string(buf, name)?;
        }
        AtomIdentifier::Number(number) => {
            buf.put_u8(IDENTIFIER_NUMBER);
            buf.put_i64(*number);
        }
    }
    Ok(())
}

/// Decodes exactly one matcher from `data`; leftover bytes are an error.
#[instrument(skip_all, name = "decode_matcher", fields(len = data.len()))]
pub fn decode(data: &[u8]) -> Result<AtomMatcher, CodecError> {
    let mut buf = data;
    let matcher = decode_from(&mut buf)?;
    if buf.has_remaining() {
        return Err(CodecError::TrailingBytes(buf.remaining()));
    }
    trace!("Decoded {}.", matcher);
    Ok(matcher)
}

/// Decodes one matcher from the front of `buf`, leaving any following bytes.
pub fn decode_from<B: Buf>(buf: &mut B) -> Result<AtomMatcher, CodecError> {
    decode_nested(buf, 0)
}

fn decode_nested<B: Buf>(buf: &mut B, depth: usize) -> Result<AtomMatcher, CodecError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CodecError::TooDeep(MAX_NESTING_DEPTH));
    }

    let (type_name, version) = read_header(buf)?;
    let kind = MATCHER_KINDS
        .get(type_name.as_str())
        .copied()
        .ok_or_else(|| CodecError::UnknownType(type_name.clone()))?;

    match kind {
        MatcherKind::Index => {
            expect_version(&type_name, version, INDEX_VERSION)?;
            Ok(IndexMatcher.into())
        }
        MatcherKind::Name => {
            expect_version(&type_name, version, NAME_VERSION)?;
            Ok(NameMatcher.into())
        }
        MatcherKind::IdList => {
            expect_version(&type_name, version, ID_LIST_VERSION)?;
            let count = read_u32(buf)?;
            let mut pairs = Vec::new();
            for _ in 0..count {
                let id0 = read_identifier(buf)?;
                let id1 = read_identifier(buf)?;
                pairs.push((id0, id1));
            }
            Ok(IdListMatcher::from_identifier_pairs(pairs).into())
        }
        MatcherKind::Mcs => match version {
            1 | 2 => {
                let prematcher = if read_bool(buf)? {
                    Some(decode_nested(buf, depth + 1)?)
                } else {
                    None
                };
                let timeout = read_timeout(buf)?;
                let match_light_atoms = if version >= 2 { read_bool(buf)? } else { false };

                let mut matcher = McsMatcher::new()
                    .with_timeout(timeout)
                    .with_light_atoms(match_light_atoms);
                if let Some(prematcher) = prematcher {
                    matcher = matcher.with_prematcher(prematcher);
                }
                Ok(matcher.into())
            }
            other => Err(version_error(&type_name, other, "1, 2")),
        },
        MatcherKind::Multi => {
            expect_version(&type_name, version, MULTI_VERSION)?;
            let count = read_u32(buf)?;
            let mut children = Vec::new();
            for _ in 0..count {
                children.push(decode_nested(buf, depth + 1)?);
            }
            Ok(MultiMatcher::new(children).into())
        }
    }
}

fn expect_version(
    type_name: &str,
    found: VersionId,
    supported: VersionId,
) -> Result<(), CodecError> {
    if found != supported {
        // Every single-version type is at version 1.
        return Err(version_error(type_name, found, "1"));
    }
    Ok(())
}

/// Reads a timeout, saturating finite values beyond [`MAX_MCS_TIMEOUT`].
fn read_timeout(buf: &mut impl Buf) -> Result<Duration, CodecError> {
    let secs = read_f64(buf)?;
    if secs.is_finite() && secs >= MAX_MCS_TIMEOUT.as_secs_f64() {
        return Ok(MAX_MCS_TIMEOUT);
    }
    Duration::try_from_secs_f64(secs).map_err(|_| CodecError::InvalidTimeout(secs))
}

fn read_identifier(buf: &mut impl Buf) -> Result<AtomIdentifier, CodecError> {
    match read_u8(buf)? {
        IDENTIFIER_INDEX => Ok(AtomIdentifier::Index(AtomIdx(checked_usize(
            "atom index",
            read_u64(buf)?,
        )?))),
        IDENTIFIER_NAME => Ok(AtomIdentifier::Name(read_string(buf)?)),
        IDENTIFIER_NUMBER => Ok(AtomIdentifier::Number(read_i64(buf)?)),
        other => Err(CodecError::InvalidIdentifierKind(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::matcher::Matcher;

    fn nested_example() -> AtomMatcher {
        let id_list = IdListMatcher::from_identifier_pairs([
            (AtomIdentifier::name("CA"), AtomIdentifier::index(2)),
            (AtomIdentifier::number(7), AtomIdentifier::name("N")),
        ]);
        let mcs = McsMatcher::new()
            .with_prematcher(NameMatcher)
            .with_timeout(Duration::from_millis(1500))
            .with_light_atoms(true);
        MultiMatcher::new([id_list.into(), mcs.into(), IndexMatcher.into()]).into()
    }

    #[test]
    fn every_matcher_type_name_has_a_codec_tag() {
        let matchers: [AtomMatcher; 5] = [
            IndexMatcher.into(),
            NameMatcher.into(),
            IdListMatcher::default().into(),
            McsMatcher::new().into(),
            MultiMatcher::default().into(),
        ];
        for matcher in &matchers {
            assert!(MATCHER_KINDS.contains_key(matcher.type_name()));
        }
    }

    #[test]
    fn nested_matchers_survive_encoding() {
        let matcher = nested_example();
        let decoded = decode(&encode(&matcher).unwrap()).unwrap();
        assert_eq!(decoded, matcher);
        assert_eq!(decoded.to_string(), matcher.to_string());
    }

    #[test]
    fn null_id_list_encodes_as_empty_list() {
        let matcher: AtomMatcher = IdListMatcher::default().into();
        let bytes = encode(&matcher).unwrap();
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
        assert!(decode(&bytes).unwrap().is_null());
    }

    #[test]
    fn mcs_v1_defaults_to_ignoring_light_atoms() {
        let original = McsMatcher::new()
            .with_prematcher(IndexMatcher)
            .with_timeout(Duration::from_secs(3))
            .with_light_atoms(true);

        let decoded = match decode(&encode_mcs_v1(&original).unwrap()).unwrap() {
            AtomMatcher::Mcs(mcs) => mcs,
            other => panic!("expected an MCS matcher, got {other}"),
        };
        assert!(!decoded.matching_light_atoms());
        assert_eq!(decoded.timeout(), Duration::from_secs(3));
        assert_eq!(decoded.prematcher(), Some(&AtomMatcher::Index(IndexMatcher)));
    }

    #[test]
    fn mcs_v1_is_one_byte_shorter_than_v2() {
        let matcher = McsMatcher::new();
        let v1 = encode_mcs_v1(&matcher).unwrap();
        let v2 = encode(&matcher.into()).unwrap();
        assert_eq!(v1.len() + 1, v2.len());
    }

    #[test]
    fn longest_timeout_survives_encoding() {
        let matcher: AtomMatcher = McsMatcher::new().with_timeout(Duration::MAX).into();
        let decoded = decode(&encode(&matcher).unwrap()).unwrap();
        assert_eq!(decoded, matcher);
    }

    #[test]
    fn out_of_range_stored_timeouts_saturate() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, McsMatcher::TYPE_NAME, 2).unwrap();
        write_bool(&mut buf, false);
        buf.put_f64(Duration::MAX.as_secs_f64());
        write_bool(&mut buf, false);

        match decode(&buf).unwrap() {
            AtomMatcher::Mcs(decoded) => assert_eq!(decoded.timeout(), MAX_MCS_TIMEOUT),
            other => panic!("expected an MCS matcher, got {other}"),
        }
    }

    #[test]
    fn unknown_versions_are_rejected() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, McsMatcher::TYPE_NAME, 3).unwrap();
        assert_eq!(
            decode(&buf),
            Err(CodecError::VersionMismatch {
                type_name: McsMatcher::TYPE_NAME.to_string(),
                found: 3,
                supported: "1, 2",
            })
        );

        let mut buf = BytesMut::new();
        write_header(&mut buf, NameMatcher::TYPE_NAME, 2).unwrap();
        assert!(matches!(
            decode(&buf),
            Err(CodecError::VersionMismatch { found: 2, .. })
        ));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, "atommatch::ChargeMatcher", 1).unwrap();
        assert_eq!(
            decode(&buf),
            Err(CodecError::UnknownType("atommatch::ChargeMatcher".to_string()))
        );
    }

    #[test]
    fn truncated_and_padded_input_is_rejected() {
        let bytes = encode(&nested_example()).unwrap();
        assert!(matches!(
            decode(&bytes[..bytes.len() - 3]),
            Err(CodecError::UnexpectedEof { .. })
        ));

        let mut padded = bytes.to_vec();
        padded.extend_from_slice(&[1, 2]);
        assert_eq!(decode(&padded), Err(CodecError::TrailingBytes(2)));
    }

    #[test]
    fn decode_from_leaves_following_bytes() {
        let mut buf = BytesMut::new();
        encode_into(&mut buf, &NameMatcher.into()).unwrap();
        encode_into(&mut buf, &IndexMatcher.into()).unwrap();

        let mut data = &buf[..];
        assert_eq!(decode_from(&mut data).unwrap(), AtomMatcher::Name(NameMatcher));
        assert_eq!(decode_from(&mut data).unwrap(), AtomMatcher::Index(IndexMatcher));
        assert!(data.is_empty());
    }

    #[test]
    fn bad_identifier_kind_is_rejected() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, IdListMatcher::TYPE_NAME, 1).unwrap();
        buf.put_u32(1);
        buf.put_u8(9);
        assert_eq!(decode(&buf), Err(CodecError::InvalidIdentifierKind(9)));
    }

    #[test]
    fn negative_timeout_is_rejected() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, McsMatcher::TYPE_NAME, 2).unwrap();
        write_bool(&mut buf, false);
        buf.put_f64(-1.0);
        write_bool(&mut buf, false);
        assert_eq!(decode(&buf), Err(CodecError::InvalidTimeout(-1.0)));
    }

    #[test]
    fn deeply_nested_prematchers_are_rejected() {
        let mut buf = BytesMut::new();
        for _ in 0..=MAX_NESTING_DEPTH {
            write_header(&mut buf, McsMatcher::TYPE_NAME, 1).unwrap();
            write_bool(&mut buf, true);
        }
        write_header(&mut buf, IndexMatcher::TYPE_NAME, 1).unwrap();
        assert_eq!(decode(&buf), Err(CodecError::TooDeep(MAX_NESTING_DEPTH)));
    }
}
